//! Stock container layouts.
//!
//! Each layout numbers its own slots first and appends the viewing player's
//! 27 main-storage slots and 9 hotbar slots. Shift-clicking moves items
//! between the container part and the player part; inside the player
//! inventory it moves between main storage and hotbar.

use std::ops::Range;

use mdinventory_core::ArmorKind;
use serde::{Deserialize, Serialize};

use crate::container::{ContainerLayout, LayoutBuilder, LayoutError};
use crate::policy::SlotPolicy;

/// Slots in the player's main storage grid (3 rows × 9 columns).
pub const MAIN_SLOTS: usize = 27;

/// Number of hotbar slots.
pub const HOTBAR_SLOTS: usize = 9;

/// Slots per chest row.
pub const CHEST_ROW_SLOTS: usize = 9;

/// Player inventory window: crafting result, 2×2 grid, armor, main, hotbar.
pub mod player {
    use std::ops::Range;

    /// Crafting result slot.
    pub const RESULT: usize = 0;
    /// 2×2 crafting grid.
    pub const GRID: Range<usize> = 1..5;
    /// Helmet, chestplate, leggings, boots.
    pub const ARMOR: Range<usize> = 5..9;
    /// Main storage.
    pub const MAIN: Range<usize> = 9..36;
    /// Hotbar.
    pub const HOTBAR: Range<usize> = 36..45;
}

/// Furnace window: input, fuel, output, then the player inventory.
pub mod furnace {
    use std::ops::Range;

    /// Smelting input.
    pub const INPUT: usize = 0;
    /// Fuel.
    pub const FUEL: usize = 1;
    /// Smelting output.
    pub const OUTPUT: usize = 2;
    /// Player main storage.
    pub const MAIN: Range<usize> = 3..30;
    /// Player hotbar.
    pub const HOTBAR: Range<usize> = 30..39;
}

/// Crafting table window: result, 3×3 grid, then the player inventory.
pub mod crafting_table {
    use std::ops::Range;

    /// Crafting result slot.
    pub const RESULT: usize = 0;
    /// 3×3 crafting grid.
    pub const GRID: Range<usize> = 1..10;
    /// Player main storage.
    pub const MAIN: Range<usize> = 10..37;
    /// Player hotbar.
    pub const HOTBAR: Range<usize> = 37..46;
}

/// Container types with a built-in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardLayout {
    /// The player's own inventory screen.
    PlayerInventory,
    /// Single chest (3 rows).
    Chest,
    /// Double chest (6 rows).
    LargeChest,
    /// Furnace.
    Furnace,
    /// Crafting table.
    CraftingTable,
}

impl StandardLayout {
    /// Every stock layout.
    pub const ALL: [StandardLayout; 5] = [
        StandardLayout::PlayerInventory,
        StandardLayout::Chest,
        StandardLayout::LargeChest,
        StandardLayout::Furnace,
        StandardLayout::CraftingTable,
    ];

    /// Config/CLI name of the layout.
    pub fn name(self) -> &'static str {
        match self {
            StandardLayout::PlayerInventory => "player_inventory",
            StandardLayout::Chest => "chest",
            StandardLayout::LargeChest => "large_chest",
            StandardLayout::Furnace => "furnace",
            StandardLayout::CraftingTable => "crafting_table",
        }
    }

    /// Look a layout up by its config/CLI name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layout| layout.name() == name)
    }

    /// Build the slot layout.
    pub fn build(self) -> Result<ContainerLayout, LayoutError> {
        match self {
            StandardLayout::PlayerInventory => player_inventory(),
            StandardLayout::Chest => chest(self.name(), 3),
            StandardLayout::LargeChest => chest(self.name(), 6),
            StandardLayout::Furnace => furnace_layout(),
            StandardLayout::CraftingTable => crafting_table_layout(),
        }
    }
}

/// Append the viewer's main storage and hotbar, returning their ranges.
fn with_player_slots(builder: LayoutBuilder) -> (LayoutBuilder, Range<usize>, Range<usize>) {
    let main_start = builder.len();
    let builder = builder
        .slots(MAIN_SLOTS, SlotPolicy::Normal)
        .slots(HOTBAR_SLOTS, SlotPolicy::Normal);
    let main = main_start..main_start + MAIN_SLOTS;
    let hotbar = main.end..main.end + HOTBAR_SLOTS;
    (builder, main, hotbar)
}

fn player_inventory() -> Result<ContainerLayout, LayoutError> {
    let mut builder = ContainerLayout::builder(StandardLayout::PlayerInventory.name())
        .slot(SlotPolicy::FullOut)
        .slots(player::GRID.len(), SlotPolicy::Normal);
    for kind in ArmorKind::ALL {
        builder = builder.slot(SlotPolicy::Armor(kind));
    }
    let (builder, main, hotbar) = with_player_slots(builder);
    let storage = main.start..hotbar.end;

    builder
        .route([player::RESULT], storage.clone().rev())
        .route(player::GRID, storage.clone())
        .route(player::ARMOR, storage)
        .route(main, player::ARMOR.chain(hotbar.clone()))
        .route(hotbar, player::ARMOR.chain(player::MAIN))
        .build()
}

fn chest(name: &str, rows: usize) -> Result<ContainerLayout, LayoutError> {
    let chest_slots = 0..rows * CHEST_ROW_SLOTS;
    let builder = ContainerLayout::builder(name).slots(chest_slots.len(), SlotPolicy::Normal);
    let (builder, main, hotbar) = with_player_slots(builder);
    let storage = main.start..hotbar.end;

    builder
        .route(chest_slots.clone(), storage.clone().rev())
        .route(storage, chest_slots)
        .build()
}

fn furnace_layout() -> Result<ContainerLayout, LayoutError> {
    let builder = ContainerLayout::builder(StandardLayout::Furnace.name())
        .slot(SlotPolicy::Normal)
        .slot(SlotPolicy::Normal)
        .slot(SlotPolicy::OnlyOut);
    let (builder, main, hotbar) = with_player_slots(builder);
    let storage = main.start..hotbar.end;

    builder
        .route([furnace::INPUT, furnace::FUEL], storage.clone())
        .route([furnace::OUTPUT], storage.rev())
        .route(main, [furnace::INPUT, furnace::FUEL].into_iter().chain(hotbar.clone()))
        .route(hotbar, [furnace::INPUT, furnace::FUEL].into_iter().chain(furnace::MAIN))
        .build()
}

fn crafting_table_layout() -> Result<ContainerLayout, LayoutError> {
    let builder = ContainerLayout::builder(StandardLayout::CraftingTable.name())
        .slot(SlotPolicy::FullOut)
        .slots(crafting_table::GRID.len(), SlotPolicy::Normal);
    let (builder, main, hotbar) = with_player_slots(builder);
    let storage = main.start..hotbar.end;

    builder
        .route([crafting_table::RESULT], storage.clone().rev())
        .route(crafting_table::GRID, storage)
        .route(main, hotbar.clone())
        .route(hotbar, crafting_table::MAIN)
        .build()
}
