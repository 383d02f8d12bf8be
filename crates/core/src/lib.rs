#![warn(missing_docs)]
//! Core item primitives shared across the workspace.

pub mod armor;
pub mod item;

// Re-export commonly used types
pub use armor::{ArmorKind, ArmorLookup, ArmorMaterial, ArmorTable};
pub use item::{FoodType, ItemStack, ItemType, ToolMaterial, ToolType, MAX_STACK_SIZE};
