//! Level-order flat-file encoding.
//!
//! A tree is written as one line of comma-separated slots in breadth-first
//! order. A real slot holds the first identifier of its node, an absent slot
//! holds `null`. The walk stops at the tree's height, and the output is cut
//! right after the last real slot plus one `null` marker.
//!
//! The two variants differ only in how absent slots expand:
//!
//! | Policy                    | Children enqueued for           |
//! |---------------------------|---------------------------------|
//! | [`ExpandPolicy::RealOnly`] | real slots above the last level |
//! | [`ExpandPolicy::Complete`] | every slot above the last level |

use std::collections::VecDeque;
use std::path::Path;

use super::node::{level_count, Node};
use crate::error::Result;
use crate::record::RecordId;

/// Marker written for an absent slot.
pub const NULL_MARKER: &str = "null";

/// Separator between slots.
pub const SEPARATOR: &str = ",";

/// How absent slots expand during the level-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandPolicy {
    /// Absent slots are leaves: level widths follow the real shape
    /// (unbalanced variant).
    RealOnly,
    /// Absent slots synthesize two absent children, giving a complete binary
    /// layout down to the tree height (balanced variant).
    Complete,
}

/// Walks the tree and returns the truncated slot sequence.
pub(crate) fn encode_slots<H>(root: Option<&Node<H>>, policy: ExpandPolicy) -> Vec<Option<RecordId>> {
    let height = level_count(root);
    let mut slots = Vec::new();
    let mut queue: VecDeque<(Option<&Node<H>>, usize)> = VecDeque::new();
    queue.push_back((root, 1));

    while let Some((slot, level)) = queue.pop_front() {
        slots.push(slot.and_then(|node| node.ids.first()));
        if level >= height {
            continue;
        }
        match (slot, policy) {
            (Some(node), _) => {
                queue.push_back((node.left.as_deref(), level + 1));
                queue.push_back((node.right.as_deref(), level + 1));
            }
            (None, ExpandPolicy::Complete) => {
                queue.push_back((None, level + 1));
                queue.push_back((None, level + 1));
            }
            (None, ExpandPolicy::RealOnly) => {}
        }
    }

    truncate(&mut slots);
    slots
}

/// Keeps everything up to the last real slot plus exactly one trailing marker.
fn truncate(slots: &mut Vec<Option<RecordId>>) {
    let keep = slots
        .iter()
        .rposition(Option::is_some)
        .map_or(1, |last_real| last_real + 2);
    slots.truncate(keep);
}

/// Renders slots as their textual entries.
pub(crate) fn render(slots: &[Option<RecordId>]) -> Vec<String> {
    slots
        .iter()
        .map(|slot| slot.map_or_else(|| NULL_MARKER.to_string(), |id| id.to_string()))
        .collect()
}

/// Joins entries with [`SEPARATOR`], no trailing separator.
pub(crate) fn join(entries: &[String]) -> String {
    entries.join(SEPARATOR)
}

/// Writes the encoded tree to `path`, replacing any existing file.
pub(crate) fn write_encoded(path: &Path, encoded: &str) -> Result<()> {
    std::fs::write(path, encoded)?;
    Ok(())
}
