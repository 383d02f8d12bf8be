use mdinventory_container::layouts::StandardLayout;
use mdinventory_container::{
    ClickEvent, Container, ContainerLayout, Cursor, LayoutError, SlotContainer,
};
use mdinventory_core::{ArmorTable, ItemStack, ItemType};
use serde::Deserialize;
use std::{collections::HashSet, fs, path::Path, path::PathBuf, sync::Arc};
use thiserror::Error;

/// Why a click script was rejected.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read click script {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed click script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("click script contains no steps")]
    NoSteps,
    #[error("{what} uses slot {slot}, but the {layout} layout only has {size} slots")]
    SlotOutOfRange {
        what: String,
        slot: usize,
        layout: &'static str,
        size: usize,
    },
    #[error("slot {slot} is filled more than once")]
    DuplicateSlot { slot: usize },
    #[error("{what} holds {count} of {item:?}, expected 1..={max}")]
    InvalidCount {
        what: String,
        item: ItemType,
        count: u32,
        max: u32,
    },
    #[error("slot {slot} can't hold {item:?}")]
    Refused { slot: usize, item: ItemType },
}

#[derive(Debug, Deserialize)]
struct ClickScriptFile {
    #[serde(default)]
    layout: Option<StandardLayout>,
    #[serde(default)]
    initial: Vec<SlotFillDef>,
    #[serde(default)]
    cursor: Option<StackDef>,
    steps: Vec<ClickEvent>,
}

#[derive(Debug, Deserialize)]
struct SlotFillDef {
    slot: usize,
    item: ItemType,
    count: u32,
}

#[derive(Debug, Deserialize)]
struct StackDef {
    item: ItemType,
    count: u32,
}

/// A validated click sequence against one stock layout.
///
/// Scripts list the starting contents and a sequence of clicks:
///
/// ```json
/// { "layout": "furnace",
///   "initial": [{ "slot": 2, "item": { "Item": 265 }, "count": 7 }],
///   "steps": [{ "slot": 2, "button": "Left" }] }
/// ```
#[derive(Debug)]
pub struct ClickScript {
    layout_kind: StandardLayout,
    layout: Arc<ContainerLayout>,
    initial: Vec<(usize, ItemStack)>,
    cursor: Option<ItemStack>,
    steps: Vec<ClickEvent>,
}

impl ClickScript {
    /// Load a click script from a JSON file on disk.
    pub fn from_path(path: &Path, fallback_layout: StandardLayout) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents, fallback_layout)
    }

    /// Parse and validate a click script. `fallback_layout` is used when the
    /// script doesn't name one.
    pub fn from_json(contents: &str, fallback_layout: StandardLayout) -> Result<Self, ScriptError> {
        let file: ClickScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            return Err(ScriptError::NoSteps);
        }

        let layout_kind = file.layout.unwrap_or(fallback_layout);
        let layout = Arc::new(layout_kind.build()?);
        let armor = ArmorTable::new();
        let check_slot = |what: String, slot: usize| {
            if slot < layout.len() {
                Ok(())
            } else {
                Err(ScriptError::SlotOutOfRange {
                    what,
                    slot,
                    layout: layout_kind.name(),
                    size: layout.len(),
                })
            }
        };

        let mut seen = HashSet::new();
        let mut initial = Vec::with_capacity(file.initial.len());
        for fill in file.initial {
            check_slot(format!("initial fill of slot {}", fill.slot), fill.slot)?;
            if !seen.insert(fill.slot) {
                return Err(ScriptError::DuplicateSlot { slot: fill.slot });
            }
            let stack = make_stack(format!("slot {}", fill.slot), fill.item, fill.count)?;
            let policy = layout.slot(fill.slot).policy;
            if policy.accepts_placement() && !policy.accepts(&stack, &armor) {
                return Err(ScriptError::Refused {
                    slot: fill.slot,
                    item: fill.item,
                });
            }
            initial.push((fill.slot, stack));
        }

        let cursor = file
            .cursor
            .map(|def| make_stack("cursor".to_string(), def.item, def.count))
            .transpose()?;

        for (i, step) in file.steps.iter().enumerate() {
            check_slot(format!("step {i}"), step.slot)?;
        }

        Ok(Self {
            layout_kind,
            layout,
            initial,
            cursor,
            steps: file.steps,
        })
    }

    /// Stock layout the script runs against.
    pub fn layout_kind(&self) -> StandardLayout {
        self.layout_kind
    }

    /// Clicks to replay, in order.
    pub fn steps(&self) -> &[ClickEvent] {
        &self.steps
    }

    /// Fresh container and cursor holding the script's starting contents.
    pub fn open(&self) -> (SlotContainer, Cursor) {
        let mut container = SlotContainer::new(Arc::clone(&self.layout));
        for (slot, stack) in &self.initial {
            container.set(*slot, Some(stack.clone()));
        }
        let cursor = match &self.cursor {
            Some(stack) => Cursor::holding(stack.clone()),
            None => Cursor::new(),
        };
        (container, cursor)
    }
}

fn make_stack(what: String, item: ItemType, count: u32) -> Result<ItemStack, ScriptError> {
    let max = item.max_stack_size();
    if count == 0 || count > max {
        return Err(ScriptError::InvalidCount {
            what,
            item,
            count,
            max,
        });
    }
    Ok(ItemStack::new(item, count))
}
