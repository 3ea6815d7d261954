pub mod entity;
pub mod invariants;

pub use entity::{AliasSource, ImageSlot, Record};
pub use invariants::validate_record;
