//! Slot storage and per-slot routing.

use std::sync::Arc;

use mdinventory_core::{ItemStack, ItemType};
use serde::Serialize;
use thiserror::Error;

use crate::policy::SlotPolicy;

/// Anything the click engine can operate on.
///
/// Slot indices are flat and must be `< size()`; out-of-range indices are a
/// caller bug and may panic.
pub trait Container {
    /// Number of slots.
    fn size(&self) -> usize;

    /// Transfer policy bound to `slot`.
    fn policy(&self, slot: usize) -> SlotPolicy;

    /// Slots searched, in order, when `slot` is shift-clicked.
    fn shift_click_targets(&self, slot: usize) -> &[usize];

    /// Current contents of `slot`.
    fn get(&self, slot: usize) -> Option<&ItemStack>;

    /// Replace the contents of `slot`.
    ///
    /// Implementations may react to writes, e.g. a crafting result slot that
    /// regenerates from the remaining grid after being emptied.
    fn set(&mut self, slot: usize, stack: Option<ItemStack>);

    /// Take the stack out of `slot`, leaving it empty.
    fn take(&mut self, slot: usize) -> Option<ItemStack> {
        let stack = self.get(slot).cloned();
        if stack.is_some() {
            self.set(slot, None);
        }
        stack
    }

    /// Check if every slot is empty.
    fn is_empty(&self) -> bool {
        (0..self.size()).all(|slot| self.get(slot).is_none())
    }

    /// Count the total number of a specific item across all slots.
    fn count_item(&self, item_type: ItemType) -> u32 {
        (0..self.size())
            .filter_map(|slot| self.get(slot))
            .filter(|stack| stack.item_type == item_type)
            .map(|stack| stack.count)
            .sum()
    }
}

/// Errors raised while assembling a [`ContainerLayout`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// A routing entry points past the end of the container.
    #[error("slot {slot} routes to {target}, but the container only has {size} slots")]
    TargetOutOfRange {
        /// Source slot.
        slot: usize,
        /// Offending target.
        target: usize,
        /// Container size.
        size: usize,
    },
    /// A slot lists itself as a shift-click destination.
    #[error("slot {slot} routes to itself")]
    SelfTarget {
        /// Source slot.
        slot: usize,
    },
    /// The same destination appears twice in one routing list.
    #[error("slot {slot} lists target {target} more than once")]
    DuplicateTarget {
        /// Source slot.
        slot: usize,
        /// Repeated target.
        target: usize,
    },
}

/// Fixed slot description of a container type: one policy and one routing
/// list per slot.
///
/// Only [`LayoutBuilder::build`] produces one, so every route is in range.
/// Layouts can be serialized for inspection but never deserialized:
///
/// ```compile_fail
/// fn load<T: serde::de::DeserializeOwned>() {}
/// load::<mdinventory_container::ContainerLayout>();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerLayout {
    name: String,
    slots: Vec<SlotSpec>,
}

/// Policy and shift-click routing of a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSpec {
    /// Transfer policy.
    pub policy: SlotPolicy,
    /// Shift-click destinations, searched in order.
    pub shift_targets: Vec<usize>,
}

impl ContainerLayout {
    /// Start building a layout.
    pub fn builder(name: impl Into<String>) -> LayoutBuilder {
        LayoutBuilder {
            name: name.into(),
            slots: Vec::new(),
        }
    }

    /// Human-readable layout name ("chest", "furnace", ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the layout has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot description.
    pub fn slot(&self, slot: usize) -> &SlotSpec {
        &self.slots[slot]
    }
}

/// Builder for [`ContainerLayout`].
#[derive(Debug, Clone)]
pub struct LayoutBuilder {
    name: String,
    slots: Vec<SlotSpec>,
}

impl LayoutBuilder {
    /// Append `count` slots sharing a policy. Routing is filled in later with
    /// [`LayoutBuilder::route`].
    pub fn slots(mut self, count: usize, policy: SlotPolicy) -> Self {
        self.slots.extend((0..count).map(|_| SlotSpec {
            policy,
            shift_targets: Vec::new(),
        }));
        self
    }

    /// Append a single slot.
    pub fn slot(self, policy: SlotPolicy) -> Self {
        self.slots(1, policy)
    }

    /// Number of slots added so far.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots were added yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Set the shift-click routing for every slot in `sources`.
    ///
    /// Slots outside the current layout are ignored here and reported by
    /// [`LayoutBuilder::build`] only when they are used as targets.
    pub fn route<S, T>(mut self, sources: S, targets: T) -> Self
    where
        S: IntoIterator<Item = usize>,
        T: IntoIterator<Item = usize> + Clone,
    {
        for slot in sources {
            if let Some(spec) = self.slots.get_mut(slot) {
                spec.shift_targets = targets.clone().into_iter().collect();
            }
        }
        self
    }

    /// Validate the routing table and produce the layout.
    pub fn build(self) -> Result<ContainerLayout, LayoutError> {
        let size = self.slots.len();
        for (slot, spec) in self.slots.iter().enumerate() {
            for (i, &target) in spec.shift_targets.iter().enumerate() {
                if target >= size {
                    return Err(LayoutError::TargetOutOfRange { slot, target, size });
                }
                if target == slot {
                    return Err(LayoutError::SelfTarget { slot });
                }
                if spec.shift_targets[..i].contains(&target) {
                    return Err(LayoutError::DuplicateTarget { slot, target });
                }
            }
        }

        Ok(ContainerLayout {
            name: self.name,
            slots: self.slots,
        })
    }
}

/// Plain in-memory container backed by a shared layout.
#[derive(Debug, Clone)]
pub struct SlotContainer {
    layout: Arc<ContainerLayout>,
    slots: Vec<Option<ItemStack>>,
}

impl SlotContainer {
    /// Create an empty container for `layout`.
    pub fn new(layout: Arc<ContainerLayout>) -> Self {
        let slots = vec![None; layout.len()];
        Self { layout, slots }
    }

    /// Layout this container was built from.
    pub fn layout(&self) -> &Arc<ContainerLayout> {
        &self.layout
    }

    /// All slot contents in index order.
    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }
}

impl Container for SlotContainer {
    fn size(&self) -> usize {
        self.slots.len()
    }

    fn policy(&self, slot: usize) -> SlotPolicy {
        self.layout.slot(slot).policy
    }

    fn shift_click_targets(&self, slot: usize) -> &[usize] {
        &self.layout.slot(slot).shift_targets
    }

    fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots[slot].as_ref()
    }

    fn set(&mut self, slot: usize, stack: Option<ItemStack>) {
        debug_assert!(
            stack
                .as_ref()
                .map_or(true, |s| s.count >= 1 && s.count <= s.max_stack_size()),
            "invalid stack written to slot {slot}: {stack:?}"
        );
        self.slots[slot] = stack;
    }
}
