use serde::{Deserialize, Serialize};

/// Mouse button of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button: pick up, put down, swap, merge.
    Left,
    /// Secondary button: place one / pick up half.
    Right,
}

/// Auxiliary click kind forwarded from the protocol layer.
///
/// The engine does not interpret it; it is carried through for logging and
/// for collaborators that do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ClickMode(pub u8);

/// One decoded click against a container view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Flat slot index into the container.
    pub slot: usize,
    /// Button pressed.
    pub button: MouseButton,
    /// Opaque click mode.
    #[serde(default)]
    pub mode: ClickMode,
    /// Whether shift was held.
    #[serde(default)]
    pub shift: bool,
}

impl ClickEvent {
    /// Plain left click.
    pub fn left(slot: usize) -> Self {
        Self {
            slot,
            button: MouseButton::Left,
            mode: ClickMode::default(),
            shift: false,
        }
    }

    /// Plain right click.
    pub fn right(slot: usize) -> Self {
        Self {
            button: MouseButton::Right,
            ..Self::left(slot)
        }
    }

    /// Shift + left click.
    pub fn shift(slot: usize) -> Self {
        Self {
            shift: true,
            ..Self::left(slot)
        }
    }

    /// Same click with a different mode.
    pub fn with_mode(self, mode: ClickMode) -> Self {
        Self { mode, ..self }
    }
}

/// Whether a click changed anything.
///
/// Rejected transfers are not errors; they simply leave everything
/// untouched and report [`ClickOutcome::Unchanged`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// Some slot or the cursor was modified.
    Changed,
    /// Nothing moved.
    Unchanged,
}

impl ClickOutcome {
    pub(crate) fn from_changed(changed: bool) -> Self {
        if changed {
            ClickOutcome::Changed
        } else {
            ClickOutcome::Unchanged
        }
    }

    /// Whether the click modified state.
    pub fn changed(self) -> bool {
        self == ClickOutcome::Changed
    }
}
