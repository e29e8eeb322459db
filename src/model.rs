use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Wire shape of a top-level list: `{id, title, items}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub items: Vec<Item>,
}

/// Wire shape of an item: `{id, content, complete, subItems}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub content: String,

    #[serde(default)]
    pub complete: bool,

    #[serde(default)]
    pub sub_items: Vec<Item>,
}

/// The full hierarchy as served by `GET /lists`: a JSON object keyed by list id.
pub type Board = BTreeMap<String, TodoList>;

/// What kind of container an item is created under or moved into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentKind {
    List,
    Item,
}

impl ParentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ParentKind::List => "list",
            ParentKind::Item => "item",
        }
    }
}

/// Body of `POST /items/move`. Transient; built by the drag resolver and
/// never stored client-side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub item_id: String,
    pub target_parent_type: ParentKind,
    pub target_parent_id: String,
    pub target_index: usize,
}

/// Server-assigned entity id: 16 random bytes, hex-encoded. A single
/// generator covers users, lists, and items, so the two container id spaces
/// never collide (the drag resolver relies on that).
pub fn new_entity_id() -> anyhow::Result<String> {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
    let mut out = String::with_capacity(32);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

/// Depth-first lookup of an item anywhere in a forest.
pub fn find_item<'a>(items: &'a [Item], id: &str) -> Option<&'a Item> {
    for item in items {
        if item.id == id {
            return Some(item);
        }
        if let Some(found) = find_item(&item.sub_items, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_item_mut<'a>(items: &'a mut [Item], id: &str) -> Option<&'a mut Item> {
    for item in items {
        if item.id == id {
            return Some(item);
        }
        if let Some(found) = find_item_mut(&mut item.sub_items, id) {
            return Some(found);
        }
    }
    None
}

/// Depth of an item within a forest whose roots sit at `base`. Top-level
/// items of a list have depth 0.
pub fn item_depth(items: &[Item], id: &str, base: usize) -> Option<usize> {
    for item in items {
        if item.id == id {
            return Some(base);
        }
        if let Some(d) = item_depth(&item.sub_items, id, base + 1) {
            return Some(d);
        }
    }
    None
}

/// Remove an item from wherever it sits in the forest, returning it with its
/// subtree intact.
pub fn detach_item(items: &mut Vec<Item>, id: &str) -> Option<Item> {
    if let Some(pos) = items.iter().position(|i| i.id == id) {
        return Some(items.remove(pos));
    }
    for item in items.iter_mut() {
        if let Some(found) = detach_item(&mut item.sub_items, id) {
            return Some(found);
        }
    }
    None
}

/// True if `id` names `item` or anything in its subtree. The server uses
/// this to reject moves that would put an item under its own descendant.
pub fn subtree_contains(item: &Item, id: &str) -> bool {
    item.id == id || item.sub_items.iter().any(|sub| subtree_contains(sub, id))
}

#[cfg(test)]
#[path = "tests/model/tree_tests.rs"]
mod tests;
