//! Client-side snapshot of the user's lists and their nested items.
//!
//! The snapshot is authoritative only between reloads: every mutation goes
//! to the server and is followed by a wholesale refetch. The two exceptions
//! are list creation (the new empty list is merged locally) and list
//! deletion (removed locally regardless of the server's answer).

use anyhow::Result;

use crate::model::{Board, Item, ParentKind, TodoList, find_item, item_depth};
use crate::remote::{ApiClient, FetchLists};

/// Result of a reload. `LoggedOut` means the server no longer recognizes
/// the held identity; the caller clears the session and falls back to the
/// unauthenticated state.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    LoggedOut,
}

/// Where an item currently sits: its container id (owning list or parent
/// item) and its index within that container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemSlot {
    pub container_id: String,
    pub index: usize,
}

#[derive(Debug, Default)]
pub struct Snapshot {
    lists: Board,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_board(lists: Board) -> Self {
        Self { lists }
    }

    pub fn lists(&self) -> impl Iterator<Item = &TodoList> {
        self.lists.values()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn list(&self, list_id: &str) -> Option<&TodoList> {
        self.lists.get(list_id)
    }

    /// Replace the snapshot with the server's current state.
    pub fn load(&mut self, api: &ApiClient) -> Result<LoadOutcome> {
        match api.fetch_lists()? {
            FetchLists::Authorized(board) => {
                self.lists = board;
                Ok(LoadOutcome::Loaded)
            }
            FetchLists::Unauthorized => Ok(LoadOutcome::LoggedOut),
        }
    }

    /// Create a top-level list. The created (empty) list is merged locally
    /// without a reload; a failed request leaves the snapshot unchanged.
    /// Blank titles are rejected locally before any request is sent.
    pub fn create_list(&mut self, api: &ApiClient, title: &str) -> Result<Option<String>> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let list = api.create_list(title)?;
        let id = list.id.clone();
        self.lists.insert(id.clone(), list);
        Ok(Some(id))
    }

    /// Delete a list. The local removal happens regardless of the server's
    /// response (preserved original behavior).
    pub fn remove_list(&mut self, api: &ApiClient, list_id: &str) {
        let _ = api.delete_list(list_id);
        self.lists.remove(list_id);
    }

    /// Classify a droppable container id: a known list id means "list",
    /// anything else is a sub-item slot keyed by the parent item's id.
    pub fn classify_container(&self, container_id: &str) -> ParentKind {
        if self.lists.contains_key(container_id) {
            ParentKind::List
        } else {
            ParentKind::Item
        }
    }

    pub fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.lists
            .values()
            .find_map(|list| find_item(&list.items, item_id))
    }

    /// Depth of an item from its owning list (0 = top-level).
    pub fn depth_of(&self, item_id: &str) -> Option<usize> {
        self.lists
            .values()
            .find_map(|list| item_depth(&list.items, item_id, 0))
    }

    /// The container id and index an item currently occupies.
    pub fn slot_of(&self, item_id: &str) -> Option<ItemSlot> {
        for list in self.lists.values() {
            if let Some(slot) = slot_in(&list.id, &list.items, item_id) {
                return Some(slot);
            }
        }
        None
    }

    /// Number of direct children of a container, or `None` for an unknown id.
    pub fn container_len(&self, container_id: &str) -> Option<usize> {
        if let Some(list) = self.lists.get(container_id) {
            return Some(list.items.len());
        }
        self.find_item(container_id).map(|item| item.sub_items.len())
    }
}

fn slot_in(container_id: &str, items: &[Item], item_id: &str) -> Option<ItemSlot> {
    for (index, item) in items.iter().enumerate() {
        if item.id == item_id {
            return Some(ItemSlot {
                container_id: container_id.to_string(),
                index,
            });
        }
        if let Some(slot) = slot_in(&item.id, &item.sub_items, item_id) {
            return Some(slot);
        }
    }
    None
}

#[cfg(test)]
#[path = "tests/hierarchy/snapshot_tests.rs"]
mod tests;
