pub mod value;
pub mod nodes;
pub mod constants;

// Re-export so callers can write `use crate::ast::{Value, ConstExpr, ...}`
pub use value::{Value, Dictionary};
pub use nodes::ConstExpr;
pub use constants::ConstantTable;
