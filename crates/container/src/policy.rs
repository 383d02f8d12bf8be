use mdinventory_core::{ArmorKind, ArmorLookup, ItemStack};
use serde::{Deserialize, Serialize};

/// Transfer rules a slot obeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SlotPolicy {
    /// Ordinary merge/swap slot.
    #[default]
    Normal,
    /// Take-everything-or-nothing slot that never receives placement
    /// (crafting results).
    FullOut,
    /// Output slot that hands over the larger half when taken with an empty
    /// cursor (furnace output).
    OnlyOut,
    /// Only accepts items worn in the given armor slot.
    Armor(ArmorKind),
}

impl SlotPolicy {
    /// Whether items may be put into this slot by a player.
    pub fn accepts_placement(self) -> bool {
        matches!(self, SlotPolicy::Normal | SlotPolicy::Armor(_))
    }

    /// Whether `stack` may be deposited here by a click or a shift-click.
    pub fn accepts(self, stack: &ItemStack, armor: &dyn ArmorLookup) -> bool {
        match self {
            SlotPolicy::Normal => true,
            SlotPolicy::FullOut | SlotPolicy::OnlyOut => false,
            SlotPolicy::Armor(kind) => armor.fits(stack.item_type, kind),
        }
    }
}
