//! Item types and stack arithmetic.
//!
//! An [`ItemStack`] always holds between one and [`ItemType::max_stack_size`]
//! items. Empty slots are modelled as `Option::None`; a stack with a count of
//! zero is never handed out by any operation in this module.

use serde::{Deserialize, Serialize};

use crate::armor::{ArmorKind, ArmorMaterial};

/// Item type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// A placeable block
    Block(u16), // BlockId
    /// Generic item (ingots, sticks, coal, ...)
    Item(u16),
    /// Food item
    Food(FoodType),
    /// A tool (pickaxe, axe, etc.)
    Tool(ToolType, ToolMaterial),
    /// A wearable armor piece
    Armor(ArmorKind, ArmorMaterial),
}

/// Tool types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolType {
    /// Pickaxe
    Pickaxe,
    /// Axe
    Axe,
    /// Shovel
    Shovel,
    /// Sword
    Sword,
    /// Hoe
    Hoe,
}

/// Tool material tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolMaterial {
    /// Wooden tools (tier 0)
    Wood = 0,
    /// Stone tools (tier 1)
    Stone = 1,
    /// Iron tools (tier 2)
    Iron = 2,
    /// Diamond tools (tier 3)
    Diamond = 3,
    /// Gold tools
    Gold = 4,
}

/// Food types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    /// Apple
    Apple,
    /// Bread
    Bread,
    /// Raw meat
    RawMeat,
    /// Cooked meat
    CookedMeat,
    /// Egg (stacks to 16)
    Egg,
}

/// Largest max stack size of any item type.
pub const MAX_STACK_SIZE: u32 = 64;

/// Generic item ids that stack to 16 instead of 64.
const SMALL_STACK_ITEMS: &[u16] = &[
    344, // egg (legacy id)
    332, // snowball
    368, // ender pearl
];

impl ItemType {
    /// Maximum number of items a single stack of this type may hold.
    pub fn max_stack_size(self) -> u32 {
        match self {
            ItemType::Tool(_, _) | ItemType::Armor(_, _) => 1,
            ItemType::Food(FoodType::Egg) => 16,
            ItemType::Item(id) if SMALL_STACK_ITEMS.contains(&id) => 16,
            ItemType::Block(_) | ItemType::Item(_) | ItemType::Food(_) => MAX_STACK_SIZE,
        }
    }
}

/// An item stack in a container slot or on the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Type of item
    pub item_type: ItemType,
    /// Quantity in stack (1..=max_stack_size)
    pub count: u32,
}

impl ItemStack {
    /// Create a new item stack.
    ///
    /// `count` must be within `1..=max_stack_size`; this is checked in debug builds.
    pub fn new(item_type: ItemType, count: u32) -> Self {
        debug_assert!(
            count >= 1 && count <= item_type.max_stack_size(),
            "stack count {count} out of range for {item_type:?}"
        );
        Self { item_type, count }
    }

    /// Clone this stack with a different count.
    pub fn with_count(&self, count: u32) -> Self {
        Self::new(self.item_type, count)
    }

    /// Maximum stack size for this item type.
    pub fn max_stack_size(&self) -> u32 {
        self.item_type.max_stack_size()
    }

    /// Two stacks can merge when their item types match; counts are ignored.
    pub fn can_merge(&self, other: &ItemStack) -> bool {
        self.item_type == other.item_type
    }

    /// Check if this stack is at max capacity.
    pub fn is_full(&self) -> bool {
        self.count >= self.max_stack_size()
    }

    /// Get remaining space in this stack.
    pub fn remaining_space(&self) -> u32 {
        self.max_stack_size().saturating_sub(self.count)
    }

    /// Try to add items to this stack, returning the amount that didn't fit.
    pub fn add(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.remaining_space());
        self.count += added;
        amount - added
    }

    /// Try to remove items from this stack, returning the amount actually removed.
    ///
    /// A stack drained to zero must be replaced with `None` by the caller.
    pub fn remove(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.count);
        self.count -= removed;
        removed
    }

    /// Split off `amount` items into a new stack.
    ///
    /// Returns `None` when `amount` is zero or would leave this stack empty;
    /// take the whole stack with `Option::take` instead.
    pub fn split(&mut self, amount: u32) -> Option<ItemStack> {
        if amount == 0 || amount >= self.count {
            return None;
        }

        self.count -= amount;
        Some(self.with_count(amount))
    }

    /// Move as many items as fit from `src` into this stack.
    ///
    /// Returns the number of items moved. `src` becomes `None` once drained.
    /// Incompatible stacks are left untouched.
    pub fn merge_from(&mut self, src: &mut Option<ItemStack>) -> u32 {
        let Some(source) = src.as_mut() else {
            return 0;
        };
        if !self.can_merge(source) {
            return 0;
        }

        let transferable = self.remaining_space().min(source.count);
        self.count += transferable;
        source.count -= transferable;
        if source.count == 0 {
            *src = None;
        }
        transferable
    }
}
