//! Inline edit semantics shared by the CLI and the board: commit rules for
//! titles and content, the sub-item creation depth gate, completion
//! toggling, and transient collapse state.
//!
//! Every mutation here is one API call followed by a full reload. Request
//! errors on update/delete are ignored; the reload shows the authoritative
//! state either way.

use std::collections::HashSet;

use anyhow::Result;

use crate::hierarchy::{LoadOutcome, Snapshot};
use crate::model::ParentKind;
use crate::remote::{ApiClient, ItemUpdate};

/// Sub-items can be created under items at depth 0 and 1, yielding a
/// maximum creatable depth of 2. Deeper structures can only arise from
/// moves and still render and edit normally.
pub const MAX_CREATE_DEPTH: usize = 2;

pub fn can_add_sub_item(depth: usize) -> bool {
    depth < MAX_CREATE_DEPTH
}

/// Commit rule for inline rename/edit: the trimmed draft must be non-empty
/// and differ from the current value. Anything else commits nothing (and
/// sends nothing).
pub fn commit_text(current: &str, draft: &str) -> Option<String> {
    let draft = draft.trim();
    if draft.is_empty() || draft == current {
        return None;
    }
    Some(draft.to_string())
}

/// Rename a list if the commit rule passes, then reload.
pub fn rename_list(
    api: &ApiClient,
    snapshot: &mut Snapshot,
    list_id: &str,
    draft: &str,
) -> Result<LoadOutcome> {
    let current = snapshot.list(list_id).map(|l| l.title.as_str()).unwrap_or("");
    let Some(title) = commit_text(current, draft) else {
        return Ok(LoadOutcome::Loaded);
    };
    let _ = api.rename_list(list_id, &title);
    snapshot.load(api)
}

/// Create a top-level item in a list, then reload so the server-assigned id
/// and ordering are reflected exactly. Blank content sends nothing.
pub fn create_item(
    api: &ApiClient,
    snapshot: &mut Snapshot,
    list_id: &str,
    content: &str,
) -> Result<LoadOutcome> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(LoadOutcome::Loaded);
    }
    let _ = api.create_item(ParentKind::List, list_id, content);
    snapshot.load(api)
}

/// Create a sub-item under an item, gated by the creation depth limit.
pub fn create_sub_item(
    api: &ApiClient,
    snapshot: &mut Snapshot,
    parent_item_id: &str,
    content: &str,
) -> Result<LoadOutcome> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(LoadOutcome::Loaded);
    }
    match snapshot.depth_of(parent_item_id) {
        Some(depth) if can_add_sub_item(depth) => {}
        _ => return Ok(LoadOutcome::Loaded),
    }
    let _ = api.create_item(ParentKind::Item, parent_item_id, content);
    snapshot.load(api)
}

/// Edit an item's content if the commit rule passes, then reload.
pub fn edit_item_content(
    api: &ApiClient,
    snapshot: &mut Snapshot,
    item_id: &str,
    draft: &str,
) -> Result<LoadOutcome> {
    let current = snapshot
        .find_item(item_id)
        .map(|i| i.content.as_str())
        .unwrap_or("");
    let Some(content) = commit_text(current, draft) else {
        return Ok(LoadOutcome::Loaded);
    };
    let _ = api.update_item(item_id, &ItemUpdate::content(&content));
    snapshot.load(api)
}

/// Send the inverted completion flag, then reload. There is no optimistic
/// local flip; the checkbox catches up when the reload lands.
pub fn toggle_complete(
    api: &ApiClient,
    snapshot: &mut Snapshot,
    item_id: &str,
) -> Result<LoadOutcome> {
    let Some(item) = snapshot.find_item(item_id) else {
        return Ok(LoadOutcome::Loaded);
    };
    let _ = api.update_item(item_id, &ItemUpdate::complete(!item.complete));
    snapshot.load(api)
}

/// Delete an item, then reload.
pub fn delete_item(api: &ApiClient, snapshot: &mut Snapshot, item_id: &str) -> Result<LoadOutcome> {
    let _ = api.delete_item(item_id);
    snapshot.load(api)
}

/// Collapsed/expanded item ids. Pure view state: never sent to the server
/// and dropped whenever the board is reopened.
#[derive(Debug, Default)]
pub struct CollapseState {
    collapsed: HashSet<String>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, item_id: &str) {
        if !self.collapsed.remove(item_id) {
            self.collapsed.insert(item_id.to_string());
        }
    }

    pub fn is_collapsed(&self, item_id: &str) -> bool {
        self.collapsed.contains(item_id)
    }
}

#[cfg(test)]
#[path = "tests/editor/rules_tests.rs"]
mod tests;
