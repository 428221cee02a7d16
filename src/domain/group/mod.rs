// グループ検出

pub mod finder;

pub use finder::{find_collapsible_groups, find_groups, group_at, Group};
