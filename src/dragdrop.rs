//! Drag-end resolution: reinterpret a finished drag as a hierarchy move.
//!
//! Every droppable container is keyed by the id of its owning list or item,
//! and the two id spaces never collide, so the destination container id
//! alone decides whether the item lands in a list or under another item.

use anyhow::Result;

use crate::hierarchy::{LoadOutcome, Snapshot};
use crate::model::MoveRequest;
use crate::remote::ApiClient;

/// A position inside a droppable container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSpot {
    pub container_id: String,
    pub index: usize,
}

impl DragSpot {
    pub fn new(container_id: &str, index: usize) -> Self {
        Self {
            container_id: container_id.to_string(),
            index,
        }
    }
}

/// Decide whether a finished drag warrants a move request.
///
/// Returns `None` when the drop landed outside any container or exactly
/// where it started. Otherwise the destination container is classified
/// against the snapshot and the request is built as-is; depth is not
/// checked here (only item creation is depth-limited).
pub fn resolve_drag(
    snapshot: &Snapshot,
    source: &DragSpot,
    destination: Option<&DragSpot>,
    draggable_id: &str,
) -> Option<MoveRequest> {
    let destination = destination?;
    if destination == source {
        return None;
    }

    Some(MoveRequest {
        item_id: draggable_id.to_string(),
        target_parent_type: snapshot.classify_container(&destination.container_id),
        target_parent_id: destination.container_id.clone(),
        target_index: destination.index,
    })
}

/// Resolve a drag and, if it produced a request, send it and reload.
///
/// The move's outcome is deliberately not branched on: the reload shows
/// whatever the server settled on, which for a failed move is the pre-move
/// state. A drag that resolves to nothing touches neither the network nor
/// the snapshot.
pub fn perform_drag(
    api: &ApiClient,
    snapshot: &mut Snapshot,
    source: &DragSpot,
    destination: Option<&DragSpot>,
    draggable_id: &str,
) -> Result<LoadOutcome> {
    let Some(request) = resolve_drag(snapshot, source, destination, draggable_id) else {
        return Ok(LoadOutcome::Loaded);
    };

    let _ = api.move_item(&request);
    snapshot.load(api)
}

#[cfg(test)]
#[path = "tests/dragdrop/resolve_tests.rs"]
mod tests;
