// ドメイン層 - 盤面とパズル規則の中核

pub mod collapse;
pub mod grid;
pub mod group;
pub mod search;
