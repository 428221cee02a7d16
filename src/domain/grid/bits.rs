// ビット範囲エディタ - 任意幅整数上の範囲操作

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// 下位 `width` ビットがすべて1のマスク
#[inline]
pub fn range_mask(width: usize) -> BigUint {
    (BigUint::one() << width) - 1u32
}

/// `position` から `width` ビットを取り出す
#[inline]
pub fn extract_range(bits: &BigUint, width: usize, position: usize) -> BigUint {
    (bits >> position) & range_mask(width)
}

/// 範囲をクリアしてから `value` を書き込む（範囲外のビットは不変）
///
/// `value` は `width` ビットに収まっている前提。
pub fn overwrite_range(bits: &BigUint, value: &BigUint, width: usize, position: usize) -> BigUint {
    let mask = range_mask(width) << position;
    let cleared = bits ^ (bits & &mask);
    cleared | (value << position)
}

/// 範囲を物理的に削除する（上位ビットを `width` だけ右へ詰める）
///
/// クリアとは異なり結果は `width` ビット狭くなる。列の削除と
/// セル単位の落下はこの操作で実現する。
pub fn delete_range(bits: &BigUint, width: usize, position: usize) -> BigUint {
    let lower = if position == 0 {
        BigUint::zero()
    } else {
        bits & range_mask(position)
    };
    ((bits >> (position + width)) << position) | lower
}

/// u64 ワード列から `width` (< 64) ビットを読む
///
/// `BigUint::to_u64_digits` の結果を一度だけ作り、全セルを走査するときに使う。
#[inline]
pub fn read_bits(digits: &[u64], position: usize, width: usize) -> u64 {
    debug_assert!(width > 0 && width < 64);
    let word = position / 64;
    let offset = position % 64;
    let mut v = digits.get(word).copied().unwrap_or(0) >> offset;
    if offset + width > 64 {
        v |= digits.get(word + 1).copied().unwrap_or(0) << (64 - offset);
    }
    v & ((1u64 << width) - 1)
}
