//! Golden-file snapshots of container state.
//!
//! A [`ContainerSnapshot`] lists every occupied slot and the cursor. Snapshots
//! are serialized as canonical pretty JSON with object keys sorted so the
//! files diff cleanly.
//!
//! By default, tests compare against the golden file on disk. To update goldens,
//! rerun with `MDI_UPDATE_SNAPSHOTS=1`.

use anyhow::{Context, Result};
use mdinventory_container::{Container, Cursor};
use mdinventory_core::ItemStack;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "MDI_UPDATE_SNAPSHOTS";

/// One occupied slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotEntry {
    /// Slot index.
    pub slot: usize,
    /// Contents.
    pub stack: ItemStack,
}

/// Serializable view of a container and the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSnapshot {
    /// Number of slots in the container.
    pub size: usize,
    /// Occupied slots in index order.
    pub slots: Vec<SlotEntry>,
    /// Cursor contents.
    pub cursor: Option<ItemStack>,
}

impl ContainerSnapshot {
    /// Capture the current state.
    pub fn capture<C: Container + ?Sized>(container: &C, cursor: &Cursor) -> Self {
        let slots = (0..container.size())
            .filter_map(|slot| {
                container.get(slot).map(|stack| SlotEntry {
                    slot,
                    stack: stack.clone(),
                })
            })
            .collect();
        Self {
            size: container.size(),
            slots,
            cursor: cursor.get().cloned(),
        }
    }

    /// Canonical JSON text of this snapshot.
    pub fn to_canonical_json(&self) -> Result<String> {
        canonical_json(self)
    }
}

/// Assert that `value` matches the JSON snapshot stored at `path`.
///
/// If `MDI_UPDATE_SNAPSHOTS=1` is set, the snapshot file is written/overwritten
/// with the current value instead.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = canonical_json(value)?;

    if should_update_snapshots() {
        write_snapshot(path, &actual)?;
        return Ok(());
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {}=1 to create/update)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        )
    })?;

    if expected != actual {
        anyhow::bail!(
            "Snapshot mismatch at {} (run with {}=1 to update)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        );
    }

    Ok(())
}

/// Write `value` as a canonical JSON snapshot, creating parent dirs.
pub fn write_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    write_snapshot(path.as_ref(), &canonical_json(value)?)
}

fn should_update_snapshots() -> bool {
    matches!(
        std::env::var(UPDATE_SNAPSHOTS_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes") | Ok("YES")
    )
}

fn write_snapshot(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create snapshot directory {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))
}

fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    let value = canonicalize_value(value);
    let mut s = serde_json::to_string_pretty(&value).context("Failed to format snapshot JSON")?;
    s.push('\n');
    Ok(s)
}

fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut out = serde_json::Map::with_capacity(entries.len());
            for (k, v) in entries {
                out.insert(k, canonicalize_value(v));
            }
            Value::Object(out)
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize_value).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdinventory_container::{ContainerLayout, SlotContainer, SlotPolicy};
    use mdinventory_core::ItemType;
    use std::sync::Arc;

    #[test]
    fn snapshot_lists_only_occupied_slots() {
        let layout = ContainerLayout::builder("snap")
            .slots(4, SlotPolicy::Normal)
            .build()
            .unwrap();
        let mut container = SlotContainer::new(Arc::new(layout));
        container.set(2, Some(ItemStack::new(ItemType::Block(1), 9)));
        let cursor = Cursor::holding(ItemStack::new(ItemType::Block(3), 1));

        let snapshot = ContainerSnapshot::capture(&container, &cursor);
        assert_eq!(snapshot.size, 4);
        assert_eq!(snapshot.slots.len(), 1);
        assert_eq!(snapshot.slots[0].slot, 2);
        assert_eq!(snapshot.cursor.as_ref().map(|s| s.count), Some(1));

        let json = snapshot.to_canonical_json().unwrap();
        let cursor_at = json.find("\"cursor\"").unwrap();
        let size_at = json.find("\"size\"").unwrap();
        assert!(cursor_at < size_at, "keys should be sorted:\n{json}");
    }
}
