//! Item conservation and stack bound checks.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use mdinventory_container::{Container, Cursor};
use mdinventory_core::{ItemStack, ItemType};

/// Per-item-type totals over a container plus the cursor.
///
/// Capture one before and one after a click; for any click that doesn't
/// touch an output slot the two must be equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemLedger {
    totals: HashMap<ItemType, u32>,
}

impl ItemLedger {
    /// Sum every stack in `container` and on `cursor`.
    pub fn capture<C: Container + ?Sized>(container: &C, cursor: &Cursor) -> Self {
        let mut ledger = Self::default();
        for slot in 0..container.size() {
            if let Some(stack) = container.get(slot) {
                ledger.record(stack);
            }
        }
        if let Some(stack) = cursor.get() {
            ledger.record(stack);
        }
        ledger
    }

    fn record(&mut self, stack: &ItemStack) {
        *self.totals.entry(stack.item_type).or_default() += stack.count;
    }

    /// Total count of `item_type`.
    pub fn total(&self, item_type: ItemType) -> u32 {
        self.totals.get(&item_type).copied().unwrap_or(0)
    }

    /// Total count across all item types.
    pub fn grand_total(&self) -> u32 {
        self.totals.values().sum()
    }

    /// Item types whose totals differ, with `after - before`.
    pub fn diff(&self, after: &ItemLedger) -> Vec<(ItemType, i64)> {
        let types: HashSet<ItemType> = self
            .totals
            .keys()
            .chain(after.totals.keys())
            .copied()
            .collect();
        types
            .into_iter()
            .filter_map(|item_type| {
                let delta = i64::from(after.total(item_type)) - i64::from(self.total(item_type));
                (delta != 0).then_some((item_type, delta))
            })
            .collect()
    }
}

/// Fail if any stack is empty or above its max stack size.
pub fn assert_stack_invariants<C: Container + ?Sized>(container: &C, cursor: &Cursor) -> Result<()> {
    for slot in 0..container.size() {
        if let Some(stack) = container.get(slot) {
            check_stack(stack).map_err(|err| err.context(format!("slot {slot}")))?;
        }
    }
    if let Some(stack) = cursor.get() {
        check_stack(stack).map_err(|err| err.context("cursor"))?;
    }
    Ok(())
}

fn check_stack(stack: &ItemStack) -> Result<()> {
    if stack.count == 0 {
        anyhow::bail!("zero-count stack of {:?}", stack.item_type);
    }
    if stack.count > stack.max_stack_size() {
        anyhow::bail!(
            "{:?} holds {} items, max is {}",
            stack.item_type,
            stack.count,
            stack.max_stack_size()
        );
    }
    Ok(())
}
