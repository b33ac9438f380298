//! Rule definitions - read-only data the project engines consult

pub mod catalog;
pub mod item;
pub mod operation;
pub mod soldier_type;
pub mod transformation;

pub use catalog::RuleCatalog;
pub use item::{BattleType, ItemInfo};
pub use operation::OperationRule;
pub use soldier_type::{SoldierBonus, SoldierType};
pub use transformation::TransformationRule;
