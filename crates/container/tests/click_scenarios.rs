//! End-to-end click scenarios against the stock layouts.

use std::sync::Arc;

use mdinventory_container::layouts::{crafting_table, furnace, player, StandardLayout};
use mdinventory_container::{
    ClickEngine, ClickEvent, ClickMode, ClickOutcome, Container, ContainerLayout, Cursor,
    SlotContainer, SlotPolicy,
};
use mdinventory_core::{ArmorKind, ArmorMaterial, ItemStack, ItemType};
use mdinventory_testkit::{assert_stack_invariants, ItemLedger};

const T: ItemType = ItemType::Block(4);
const PLANKS: ItemType = ItemType::Block(5);

fn stack(item_type: ItemType, count: u32) -> Option<ItemStack> {
    Some(ItemStack::new(item_type, count))
}

fn open(layout: StandardLayout) -> SlotContainer {
    SlotContainer::new(Arc::new(layout.build().expect("stock layout")))
}

/// Container whose result slot regenerates a fixed number of times after
/// being emptied, the way a crafting result does while ingredients last.
struct RefillingResult {
    inner: SlotContainer,
    result_slot: usize,
    refill: ItemStack,
    refills_left: u32,
}

impl Container for RefillingResult {
    fn size(&self) -> usize {
        self.inner.size()
    }

    fn policy(&self, slot: usize) -> SlotPolicy {
        self.inner.policy(slot)
    }

    fn shift_click_targets(&self, slot: usize) -> &[usize] {
        self.inner.shift_click_targets(slot)
    }

    fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.inner.get(slot)
    }

    fn set(&mut self, slot: usize, stack: Option<ItemStack>) {
        if slot == self.result_slot && stack.is_none() && self.refills_left > 0 {
            self.refills_left -= 1;
            self.inner.set(slot, Some(self.refill.clone()));
        } else {
            self.inner.set(slot, stack);
        }
    }
}

#[test]
fn scenario_place_stack_into_empty_slot() {
    let engine = ClickEngine::standard();
    let mut chest = open(StandardLayout::Chest);
    let mut cursor = Cursor::holding(ItemStack::new(T, 5));

    engine.handle_click(&mut chest, &mut cursor, ClickEvent::left(4));

    assert_eq!(chest.get(4).cloned(), stack(T, 5));
    assert!(cursor.is_empty());
}

#[test]
fn scenario_merge_leaves_overflow_on_cursor() {
    let engine = ClickEngine::standard();
    let mut chest = open(StandardLayout::Chest);
    chest.set(0, stack(T, 60));
    let mut cursor = Cursor::holding(ItemStack::new(T, 10));

    engine.handle_click(&mut chest, &mut cursor, ClickEvent::left(0));

    assert_eq!(chest.get(0).cloned(), stack(T, 64));
    assert_eq!(cursor.get().cloned(), stack(T, 6));
}

#[test]
fn scenario_furnace_output_splits_odd_stack() {
    let engine = ClickEngine::standard();
    let mut window = open(StandardLayout::Furnace);
    window.set(furnace::OUTPUT, stack(T, 7));
    let mut cursor = Cursor::new();

    engine.handle_click(&mut window, &mut cursor, ClickEvent::left(furnace::OUTPUT));

    assert_eq!(cursor.get().cloned(), stack(T, 4));
    assert_eq!(window.get(furnace::OUTPUT).cloned(), stack(T, 3));
}

#[test]
fn scenario_furnace_output_single_item() {
    let engine = ClickEngine::standard();
    let mut window = open(StandardLayout::Furnace);
    window.set(furnace::OUTPUT, stack(T, 1));
    let mut cursor = Cursor::new();

    engine.handle_click(&mut window, &mut cursor, ClickEvent::left(furnace::OUTPUT));

    assert_eq!(cursor.get().cloned(), stack(T, 1));
    assert!(window.get(furnace::OUTPUT).is_none());
}

#[test]
fn scenario_repeated_drain_of_refilling_result() {
    let layout = ContainerLayout::builder("bench")
        .slot(SlotPolicy::FullOut)
        .slots(2, SlotPolicy::Normal)
        .route([0], [1, 2])
        .build()
        .unwrap();
    let mut bench = RefillingResult {
        inner: SlotContainer::new(Arc::new(layout)),
        result_slot: 0,
        refill: ItemStack::new(T, 1),
        refills_left: 2,
    };
    bench.inner.set(0, stack(T, 1));
    let engine = ClickEngine::standard();
    let mut cursor = Cursor::new();

    let outcome = engine.handle_click(&mut bench, &mut cursor, ClickEvent::shift(0));

    assert_eq!(outcome, ClickOutcome::Changed);
    assert!(bench.get(0).is_none());
    assert_eq!(bench.get(1).cloned(), stack(T, 3));
    assert!(bench.get(2).is_none());
    assert_eq!(bench.refills_left, 0);
    assert!(cursor.is_empty());
}

#[test]
fn scenario_helmet_slot_rejects_chestplate() {
    let engine = ClickEngine::standard();
    let mut inventory = open(StandardLayout::PlayerInventory);
    let chestplate = ItemType::Armor(ArmorKind::Chestplate, ArmorMaterial::Diamond);
    let mut cursor = Cursor::holding(ItemStack::new(chestplate, 1));
    let helmet_slot = player::ARMOR.start;

    let outcome = engine.handle_click(&mut inventory, &mut cursor, ClickEvent::left(helmet_slot));

    assert_eq!(outcome, ClickOutcome::Unchanged);
    assert!(inventory.get(helmet_slot).is_none());
    assert_eq!(cursor.get().cloned(), stack(chestplate, 1));
}

#[test]
fn worn_helmet_stays_on_empty_cursor_click() {
    let engine = ClickEngine::standard();
    let mut inventory = open(StandardLayout::PlayerInventory);
    let helmet = ItemType::Armor(ArmorKind::Helmet, ArmorMaterial::Iron);
    inventory.set(player::ARMOR.start, stack(helmet, 1));
    let mut cursor = Cursor::new();

    let outcome = engine.handle_click(&mut inventory, &mut cursor, ClickEvent::left(player::ARMOR.start));

    assert_eq!(outcome, ClickOutcome::Unchanged);
    assert_eq!(inventory.get(player::ARMOR.start).cloned(), stack(helmet, 1));
    assert!(cursor.is_empty());

    engine.handle_click(&mut inventory, &mut cursor, ClickEvent::shift(player::ARMOR.start));
    assert!(inventory.get(player::ARMOR.start).is_none());
    assert_eq!(inventory.get(player::MAIN.start).cloned(), stack(helmet, 1));
}

#[test]
fn wrong_armor_clicks_are_idempotent() {
    let engine = ClickEngine::standard();
    let mut inventory = open(StandardLayout::PlayerInventory);
    let boots = ItemType::Armor(ArmorKind::Boots, ArmorMaterial::Iron);
    let helmet = ItemType::Armor(ArmorKind::Helmet, ArmorMaterial::Iron);
    inventory.set(player::ARMOR.start, stack(helmet, 1));
    let mut cursor = Cursor::holding(ItemStack::new(boots, 1));

    for button in [ClickEvent::left, ClickEvent::right] {
        for _ in 0..5 {
            let event = button(player::ARMOR.start).with_mode(ClickMode(2));
            let outcome = engine.handle_click(&mut inventory, &mut cursor, event);
            assert_eq!(outcome, ClickOutcome::Unchanged);
        }
    }
    assert_eq!(inventory.get(player::ARMOR.start).cloned(), stack(helmet, 1));
    assert_eq!(cursor.get().cloned(), stack(boots, 1));
}

#[test]
fn shift_click_equips_armor_from_main_storage() {
    let engine = ClickEngine::standard();
    let mut inventory = open(StandardLayout::PlayerInventory);
    let leggings = ItemType::Armor(ArmorKind::Leggings, ArmorMaterial::Gold);
    inventory.set(player::MAIN.start, stack(leggings, 1));
    inventory.set(player::MAIN.start + 1, stack(T, 20));
    let mut cursor = Cursor::new();

    engine.handle_click(&mut inventory, &mut cursor, ClickEvent::shift(player::MAIN.start));
    engine.handle_click(&mut inventory, &mut cursor, ClickEvent::shift(player::MAIN.start + 1));

    assert_eq!(inventory.get(player::ARMOR.start + 2).cloned(), stack(leggings, 1));
    // Plain blocks skip the armor slots and land on the hotbar.
    assert_eq!(inventory.get(player::HOTBAR.start).cloned(), stack(T, 20));
    assert!(inventory.get(player::MAIN.start).is_none());
}

#[test]
fn shift_click_moves_chest_stack_into_player_inventory() {
    let engine = ClickEngine::standard();
    let mut chest = open(StandardLayout::Chest);
    chest.set(3, stack(T, 40));
    chest.set(62, stack(T, 50));
    let mut cursor = Cursor::new();
    let before = ItemLedger::capture(&chest, &cursor);

    engine.handle_click(&mut chest, &mut cursor, ClickEvent::shift(3));

    assert!(chest.get(3).is_none());
    assert_eq!(chest.get(62).cloned(), stack(T, 64));
    assert_eq!(chest.get(61).cloned(), stack(T, 26));
    assert_eq!(before, ItemLedger::capture(&chest, &cursor));
}

#[test]
fn shift_click_keeps_what_does_not_fit() {
    let engine = ClickEngine::standard();
    let mut chest = open(StandardLayout::Chest);
    for slot in 27..63 {
        chest.set(slot, stack(PLANKS, 64));
    }
    chest.set(40, stack(T, 60));
    chest.set(0, stack(T, 10));
    let mut cursor = Cursor::new();

    engine.handle_click(&mut chest, &mut cursor, ClickEvent::shift(0));

    assert_eq!(chest.get(40).cloned(), stack(T, 64));
    assert_eq!(chest.get(0).cloned(), stack(T, 6));
}

#[test]
fn crafting_result_drains_into_player_inventory() {
    let engine = ClickEngine::standard();
    let mut bench = RefillingResult {
        inner: open(StandardLayout::CraftingTable),
        result_slot: crafting_table::RESULT,
        refill: ItemStack::new(PLANKS, 4),
        refills_left: 3,
    };
    bench.inner.set(crafting_table::RESULT, stack(PLANKS, 4));
    let mut cursor = Cursor::new();

    engine.handle_click(&mut bench, &mut cursor, ClickEvent::shift(crafting_table::RESULT));

    assert!(bench.get(crafting_table::RESULT).is_none());
    let last_hotbar = crafting_table::HOTBAR.end - 1;
    assert_eq!(bench.get(last_hotbar).cloned(), stack(PLANKS, 16));
    assert_stack_invariants(&bench, &cursor).unwrap();
}

#[test]
fn crafting_result_drain_stops_when_inventory_is_full() {
    let engine = ClickEngine::standard();
    let mut bench = RefillingResult {
        inner: open(StandardLayout::CraftingTable),
        result_slot: crafting_table::RESULT,
        refill: ItemStack::new(PLANKS, 4),
        refills_left: 10,
    };
    for slot in crafting_table::MAIN.start..crafting_table::HOTBAR.end {
        bench.inner.set(slot, stack(T, 64));
    }
    bench.inner.set(crafting_table::HOTBAR.end - 1, stack(PLANKS, 58));
    bench.inner.set(crafting_table::RESULT, stack(PLANKS, 4));
    let mut cursor = Cursor::new();

    engine.handle_click(&mut bench, &mut cursor, ClickEvent::shift(crafting_table::RESULT));

    // 58 + 4 fits once; the next 4 would only partially fit, so the whole
    // stack stays in the result slot.
    assert_eq!(
        bench.get(crafting_table::HOTBAR.end - 1).cloned(),
        stack(PLANKS, 62)
    );
    assert_eq!(bench.get(crafting_table::RESULT).cloned(), stack(PLANKS, 4));
    assert_eq!(bench.refills_left, 9);
}

#[test]
fn shift_click_on_furnace_output_takes_partial_amounts() {
    let engine = ClickEngine::standard();
    let mut window = open(StandardLayout::Furnace);
    for slot in furnace::MAIN.start..furnace::HOTBAR.end {
        window.set(slot, stack(PLANKS, 64));
    }
    window.set(furnace::HOTBAR.end - 1, stack(T, 62));
    window.set(furnace::OUTPUT, stack(T, 5));
    let mut cursor = Cursor::new();

    engine.handle_click(&mut window, &mut cursor, ClickEvent::shift(furnace::OUTPUT));

    assert_eq!(window.get(furnace::HOTBAR.end - 1).cloned(), stack(T, 64));
    assert_eq!(window.get(furnace::OUTPUT).cloned(), stack(T, 3));
}

#[test]
fn placing_into_furnace_output_is_refused() {
    let engine = ClickEngine::standard();
    let mut window = open(StandardLayout::Furnace);
    let mut cursor = Cursor::holding(ItemStack::new(T, 3));

    let outcome = engine.handle_click(&mut window, &mut cursor, ClickEvent::left(furnace::OUTPUT));

    assert_eq!(outcome, ClickOutcome::Unchanged);
    assert!(window.get(furnace::OUTPUT).is_none());
    assert_eq!(cursor.get().cloned(), stack(T, 3));
}
