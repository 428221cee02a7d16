// 盤面定数とユーティリティ型定義

use nohash_hasher::BuildNoHashHasher;

/// ====== パレット ======
/// インデックス0はブランク（'-'）
pub const COLORS: &str = "-ROYGBIV";
pub const BLANK_CELL: u8 = 0;
pub const MAX_COLORS: u8 = (COLORS.len() - 1) as u8;

/// 1セルあたりのビット幅（パレット 8 値 → 3 ビット）
pub const BITS_PER_CELL: usize = bit_length(MAX_COLORS as u64);

/// 消去できる最小グループサイズ
pub const MIN_GROUP_SIZE: usize = 2;

/// 手のキャッシュ保存先（既定）
pub const DEFAULT_CACHE_FILE: &str = "JKJ_MOVES_CACHE";

const fn bit_length(mut v: u64) -> usize {
    let mut n = 0;
    while v != 0 {
        v >>= 1;
        n += 1;
    }
    n
}

// u64 キー専用のノーハッシュ（セル番号 → グループ番号）
pub type U64Map<V> = std::collections::HashMap<u64, V, BuildNoHashHasher<u64>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_needs_three_bits() {
        assert_eq!(MAX_COLORS, 7);
        assert_eq!(BITS_PER_CELL, 3);
    }
}
