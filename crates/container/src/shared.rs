use std::sync::{Arc, Mutex, MutexGuard};

use mdinventory_core::ArmorLookup;
use tracing::warn;

use crate::click::{ClickEvent, ClickOutcome};
use crate::container::Container;
use crate::cursor::Cursor;
use crate::engine::ClickEngine;

/// A container viewed by several sessions at once (two players at one chest).
///
/// Clicks are serialized under a per-container lock so slot reads and writes
/// of concurrent clicks never interleave. Cursors belong to sessions and are
/// passed in separately.
#[derive(Debug)]
pub struct SharedContainer<C> {
    inner: Arc<Mutex<C>>,
}

impl<C> Clone for SharedContainer<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Container> SharedContainer<C> {
    /// Share `container` between sessions.
    pub fn new(container: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(container)),
        }
    }

    /// Apply one click while holding the container lock.
    pub fn click<A: ArmorLookup>(
        &self,
        engine: &ClickEngine<A>,
        cursor: &mut Cursor,
        event: ClickEvent,
    ) -> ClickOutcome {
        let mut container = self.lock();
        engine.handle_click(&mut *container, cursor, event)
    }

    /// Run `f` with exclusive access to the container, e.g. to serialize its
    /// contents for the client after a click.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut container = self.lock();
        f(&mut container)
    }

    /// Number of sessions holding this container.
    pub fn viewers(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    fn lock(&self) -> MutexGuard<'_, C> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            // Slots are written whole, so every stack is still valid.
            warn!("container lock poisoned by a panicking session; recovering");
            poisoned.into_inner()
        })
    }
}
