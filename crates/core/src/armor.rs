//! Armor classification.
//!
//! Containers with armor slots ask an [`ArmorLookup`] which body slot an item
//! can be worn in. [`ArmorTable`] is the stock lookup: every
//! [`ItemType::Armor`] piece maps to its own kind, and extra wearables (a
//! carved pumpkin, a mob head) can be registered on top.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::item::ItemType;

/// Armor slot types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorKind {
    /// Head slot
    Helmet,
    /// Chest slot
    Chestplate,
    /// Legs slot
    Leggings,
    /// Feet slot
    Boots,
}

/// Armor material types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorMaterial {
    /// Leather
    Leather,
    /// Chainmail
    Chainmail,
    /// Iron
    Iron,
    /// Gold
    Gold,
    /// Diamond
    Diamond,
}

impl ArmorKind {
    /// All kinds, head to feet.
    pub const ALL: [ArmorKind; 4] = [
        ArmorKind::Helmet,
        ArmorKind::Chestplate,
        ArmorKind::Leggings,
        ArmorKind::Boots,
    ];
}

/// Answers "which armor slot can this item be worn in".
pub trait ArmorLookup {
    /// Armor kind of `item`, or `None` when it cannot be worn.
    fn armor_kind(&self, item: ItemType) -> Option<ArmorKind>;

    /// Whether `item` may sit in an armor slot of `kind`.
    fn fits(&self, item: ItemType, kind: ArmorKind) -> bool {
        self.armor_kind(item) == Some(kind)
    }
}

/// Default armor classification table.
#[derive(Debug, Clone, Default)]
pub struct ArmorTable {
    extra: HashMap<ItemType, ArmorKind>,
}

impl ArmorTable {
    /// Table that only knows the built-in armor pieces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an additional wearable item.
    pub fn with_entry(mut self, item: ItemType, kind: ArmorKind) -> Self {
        self.extra.insert(item, kind);
        self
    }
}

impl ArmorLookup for ArmorTable {
    fn armor_kind(&self, item: ItemType) -> Option<ArmorKind> {
        match item {
            ItemType::Armor(kind, _) => Some(kind),
            other => self.extra.get(&other).copied(),
        }
    }
}
