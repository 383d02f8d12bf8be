//! Click interaction engine.
//!
//! Turns one [`ClickEvent`] into the resulting state of the clicked slot, the
//! cursor and, for shift-clicks, the slots on the routing list. Every path
//! either moves items between locations or leaves everything untouched; no
//! path creates or destroys items. Rejected transfers are silent no-ops.

use mdinventory_core::{ArmorKind, ArmorLookup, ArmorTable, ItemStack, MAX_STACK_SIZE};
use tracing::{debug, trace, warn};

use crate::click::{ClickEvent, ClickOutcome, MouseButton};
use crate::container::Container;
use crate::cursor::Cursor;
use crate::policy::SlotPolicy;

/// How much of the source a shift-click pass has to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransferMode {
    /// Place what fits, keep the rest in the source slot.
    Partial,
    /// Place everything or touch nothing.
    WholeStack,
}

/// Stateless click handler.
///
/// The only collaborator is the armor lookup used to gate armor slots; the
/// engine holds no other state, so one instance can serve every session.
#[derive(Debug, Clone)]
pub struct ClickEngine<A = ArmorTable> {
    armor: A,
}

impl ClickEngine {
    /// Engine using the built-in [`ArmorTable`].
    pub fn standard() -> Self {
        Self::new(ArmorTable::new())
    }
}

impl Default for ClickEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl<A: ArmorLookup> ClickEngine<A> {
    /// Create an engine backed by `armor`.
    pub fn new(armor: A) -> Self {
        Self { armor }
    }

    /// Apply one click to `container` and `cursor`.
    ///
    /// `event.slot` must be a valid index into `container`.
    pub fn handle_click<C>(
        &self,
        container: &mut C,
        cursor: &mut Cursor,
        event: ClickEvent,
    ) -> ClickOutcome
    where
        C: Container + ?Sized,
    {
        let slot = event.slot;
        debug_assert!(
            slot < container.size(),
            "click on slot {slot} outside a container of {} slots",
            container.size()
        );

        let policy = container.policy(slot);
        debug!(
            slot,
            ?policy,
            button = ?event.button,
            mode = event.mode.0,
            shift = event.shift,
            "handling click"
        );

        let changed = if event.shift {
            match policy {
                SlotPolicy::FullOut => self.drain_output(container, slot),
                _ => self.shift_transfer(container, slot, TransferMode::Partial) > 0,
            }
        } else {
            match policy {
                SlotPolicy::FullOut | SlotPolicy::OnlyOut => {
                    self.take_output(container, cursor, slot, policy)
                }
                SlotPolicy::Armor(kind) => self.click_armor(container, cursor, slot, kind),
                SlotPolicy::Normal => match event.button {
                    MouseButton::Left => swap_or_merge(container, cursor, slot),
                    MouseButton::Right => place_one(container, cursor, slot),
                },
            }
        };

        ClickOutcome::from_changed(changed)
    }

    /// Shift-click on a result slot: keep moving whole stacks out while the
    /// slot refills and the routing targets have room.
    fn drain_output<C>(&self, container: &mut C, slot: usize) -> bool
    where
        C: Container + ?Sized,
    {
        // Every productive pass deposits at least one item into the targets,
        // which cannot hold more than this many in total.
        let max_passes = container.shift_click_targets(slot).len() as u32 * MAX_STACK_SIZE + 1;

        let mut passes = 0;
        while passes < max_passes {
            let Some(snapshot) = container.get(slot).cloned() else {
                break;
            };
            let moved = self.shift_transfer(container, slot, TransferMode::WholeStack);
            if moved == 0 {
                debug_assert_eq!(container.get(slot), Some(&snapshot));
                break;
            }
            passes += 1;
            trace!(slot, moved, pass = passes, "drained result slot");
        }

        if passes == max_passes && container.get(slot).is_some() {
            warn!(slot, passes, "result slot kept refilling; stopped draining");
        }
        passes > 0
    }

    /// One shift-click pass over the routing list of `slot`.
    ///
    /// Returns how many items left the source slot.
    fn shift_transfer<C>(&self, container: &mut C, slot: usize, mode: TransferMode) -> u32
    where
        C: Container + ?Sized,
    {
        let Some(source) = container.get(slot).cloned() else {
            return 0;
        };
        let targets = container.shift_click_targets(slot).to_vec();

        if mode == TransferMode::WholeStack && !self.can_place_all(container, slot, &source, &targets)
        {
            trace!(slot, count = source.count, "not enough room for the whole stack");
            return 0;
        }

        let mut remaining = Some(source.clone());
        for &target in &targets {
            let Some(moving) = remaining.as_ref() else {
                break;
            };
            if !self.may_deposit(container, slot, target, moving) {
                continue;
            }
            match container.get(target).cloned() {
                None => container.set(target, remaining.take()),
                Some(mut existing) if existing.can_merge(moving) => {
                    if existing.merge_from(&mut remaining) > 0 {
                        container.set(target, Some(existing));
                    }
                }
                Some(_) => {}
            }
        }

        let moved = source.count - remaining.as_ref().map_or(0, |s| s.count);
        if moved > 0 {
            container.set(slot, remaining);
        }
        moved
    }

    /// Dry run of a [`TransferMode::WholeStack`] pass.
    fn can_place_all<C>(
        &self,
        container: &C,
        slot: usize,
        source: &ItemStack,
        targets: &[usize],
    ) -> bool
    where
        C: Container + ?Sized,
    {
        let mut needed = source.count;
        for &target in targets {
            if !self.may_deposit(container, slot, target, source) {
                continue;
            }
            match container.get(target) {
                None => return true,
                Some(existing) if existing.can_merge(source) => {
                    let room = existing.remaining_space();
                    if room >= needed {
                        return true;
                    }
                    needed -= room;
                }
                Some(_) => {}
            }
        }
        false
    }

    fn may_deposit<C>(&self, container: &C, source: usize, target: usize, stack: &ItemStack) -> bool
    where
        C: Container + ?Sized,
    {
        target != source && container.policy(target).accepts(stack, &self.armor)
    }

    /// Plain click on a `FullOut`/`OnlyOut` slot. The slot never receives
    /// items; it can only be emptied into the cursor.
    fn take_output<C>(
        &self,
        container: &mut C,
        cursor: &mut Cursor,
        slot: usize,
        policy: SlotPolicy,
    ) -> bool
    where
        C: Container + ?Sized,
    {
        let Some(stack) = container.get(slot).cloned() else {
            return false;
        };

        let Some(carried) = cursor.get() else {
            if policy == SlotPolicy::OnlyOut {
                let (kept, taken) = split_larger_half(&stack);
                cursor.set(Some(taken));
                container.set(slot, kept);
            } else {
                cursor.set(container.take(slot));
            }
            return true;
        };

        // All or nothing.
        if !carried.can_merge(&stack) || carried.remaining_space() < stack.count {
            trace!(slot, "cursor can't absorb the whole output stack");
            return false;
        }
        let mut merged = carried.clone();
        merged.add(stack.count);
        cursor.set(Some(merged));
        container.set(slot, None);
        true
    }

    fn click_armor<C>(
        &self,
        container: &mut C,
        cursor: &mut Cursor,
        slot: usize,
        kind: ArmorKind,
    ) -> bool
    where
        C: Container + ?Sized,
    {
        // Worn pieces only leave through shift-click.
        let Some(carried) = cursor.get() else {
            return false;
        };
        if !self.armor.fits(carried.item_type, kind) {
            trace!(slot, ?kind, item = ?carried.item_type, "item can't be worn here");
            return false;
        }
        swap_or_merge(container, cursor, slot)
    }
}

/// Left-click semantics: merge the cursor into a compatible slot (leaving
/// any overflow on the cursor), otherwise swap the two.
fn swap_or_merge<C>(container: &mut C, cursor: &mut Cursor, slot: usize) -> bool
where
    C: Container + ?Sized,
{
    match container.get(slot).cloned() {
        Some(mut target) if cursor.get().is_some_and(|c| target.can_merge(c)) => {
            if target.merge_from(cursor.slot_mut()) == 0 {
                return false;
            }
            container.set(slot, Some(target));
            true
        }
        target => swap(container, cursor, slot, target),
    }
}

/// Right-click semantics: drop a single item from the cursor, or pick up
/// the larger half of the slot when the cursor is empty.
fn place_one<C>(container: &mut C, cursor: &mut Cursor, slot: usize) -> bool
where
    C: Container + ?Sized,
{
    let target = container.get(slot).cloned();
    let Some(carried) = cursor.get().cloned() else {
        let Some(target) = target else {
            return false;
        };
        let (kept, taken) = split_larger_half(&target);
        cursor.set(Some(taken));
        container.set(slot, kept);
        return true;
    };

    match target {
        None => container.set(slot, Some(carried.with_count(1))),
        Some(mut existing) if existing.can_merge(&carried) => {
            if existing.add(1) > 0 {
                return false;
            }
            container.set(slot, Some(existing));
        }
        other => return swap(container, cursor, slot, other),
    }
    let mut rest = carried;
    rest.remove(1);
    cursor.set((rest.count > 0).then_some(rest));
    true
}

fn swap<C>(container: &mut C, cursor: &mut Cursor, slot: usize, target: Option<ItemStack>) -> bool
where
    C: Container + ?Sized,
{
    if cursor.get() == target.as_ref() {
        return false;
    }
    let carried = cursor.take();
    cursor.set(target);
    container.set(slot, carried);
    true
}

/// Split `stack` into `(kept, taken)` where `taken` gets the rounded-up half.
fn split_larger_half(stack: &ItemStack) -> (Option<ItemStack>, ItemStack) {
    let mut kept = stack.clone();
    match kept.split(stack.count - stack.count / 2) {
        Some(taken) => (Some(kept), taken),
        None => (None, kept),
    }
}
