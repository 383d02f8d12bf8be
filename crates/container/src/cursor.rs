use mdinventory_core::ItemStack;
use serde::{Deserialize, Serialize};

/// The stack a player is carrying with the pointer while a container view is
/// open.
///
/// One cursor exists per interaction session and is handed to the engine by
/// `&mut`. It is deliberately not `Clone`: duplicating a cursor duplicates
/// items.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    stack: Option<ItemStack>,
}

impl Cursor {
    /// An empty cursor for a new session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cursor already holding `stack`.
    pub fn holding(stack: ItemStack) -> Self {
        Self { stack: Some(stack) }
    }

    /// Carried stack, if any.
    pub fn get(&self) -> Option<&ItemStack> {
        self.stack.as_ref()
    }

    /// Whether nothing is carried.
    pub fn is_empty(&self) -> bool {
        self.stack.is_none()
    }

    /// Replace the carried stack.
    pub fn set(&mut self, stack: Option<ItemStack>) {
        self.stack = stack;
    }

    /// Take the carried stack, leaving the cursor empty.
    pub fn take(&mut self) -> Option<ItemStack> {
        self.stack.take()
    }

    /// Raw access for merge arithmetic.
    pub(crate) fn slot_mut(&mut self) -> &mut Option<ItemStack> {
        &mut self.stack
    }

    /// End the session, returning whatever was still carried so the caller
    /// can put it back into an inventory or drop it in the world.
    pub fn close(self) -> Option<ItemStack> {
        self.stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdinventory_core::ItemType;

    #[test]
    fn cursor_take_and_close() {
        let mut cursor = Cursor::holding(ItemStack::new(ItemType::Block(1), 3));
        assert!(!cursor.is_empty());
        assert_eq!(cursor.take().map(|s| s.count), Some(3));
        assert!(cursor.is_empty());

        cursor.set(Some(ItemStack::new(ItemType::Block(2), 1)));
        assert_eq!(cursor.close(), Some(ItemStack::new(ItemType::Block(2), 1)));
    }
}
