//! Item CRUD and the move operation.
//!
//! Ordering within a container is authoritative here: a move detaches the
//! item wherever it sits and reinserts it at the requested index, clamped
//! to the container's length.

use axum::extract::{Extension, Path};

use super::*;
use stacklist::model::{
    Item, MoveRequest, ParentKind, detach_item, find_item_mut, new_entity_id, subtree_contains,
};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateItemPayload {
    parent_type: Option<ParentKind>,
    parent_id: Option<String>,

    #[serde(default)]
    content: String,
}

pub(super) async fn create_item(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<CreateItemPayload>,
) -> Result<Response, Response> {
    let (Some(parent_type), Some(parent_id)) = (payload.parent_type, payload.parent_id) else {
        return Err(bad_request("Invalid parentType"));
    };

    let item = Item {
        id: new_entity_id().map_err(internal_error)?,
        content: payload.content,
        complete: false,
        sub_items: Vec::new(),
    };

    let mut boards = state.boards.write().await;
    let board = boards.entry(subject.user_id.clone()).or_default();

    match parent_type {
        ParentKind::List => {
            let Some(list) = board.get_mut(&parent_id) else {
                return Err(not_found("List not found or not yours"));
            };
            list.items.push(item.clone());
        }
        ParentKind::Item => {
            let Some(parent) = board
                .values_mut()
                .find_map(|list| find_item_mut(&mut list.items, &parent_id))
            else {
                return Err(not_found("Item not found or not yours"));
            };
            parent.sub_items.push(item.clone());
        }
    }

    persist_boards(&state.data_dir, &boards).map_err(internal_error)?;
    Ok((StatusCode::CREATED, Json(item)).into_response())
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct UpdateItemPayload {
    #[serde(default)]
    content: Option<String>,

    #[serde(default)]
    complete: Option<bool>,
}

pub(super) async fn update_item(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(item_id): Path<String>,
    Json(payload): Json<UpdateItemPayload>,
) -> Result<Json<serde_json::Value>, Response> {
    let mut boards = state.boards.write().await;
    let board = boards.entry(subject.user_id.clone()).or_default();

    let Some(item) = board
        .values_mut()
        .find_map(|list| find_item_mut(&mut list.items, &item_id))
    else {
        return Err(not_found("Item not found or not yours"));
    };

    if let Some(content) = payload.content {
        item.content = content;
    }
    if let Some(complete) = payload.complete {
        item.complete = complete;
    }
    let updated = serde_json::json!({
        "id": item.id,
        "content": item.content,
        "complete": item.complete,
    });

    persist_boards(&state.data_dir, &boards).map_err(internal_error)?;
    Ok(Json(updated))
}

pub(super) async fn delete_item(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(item_id): Path<String>,
) -> Result<Json<serde_json::Value>, Response> {
    let mut boards = state.boards.write().await;
    let board = boards.entry(subject.user_id.clone()).or_default();

    let detached = board
        .values_mut()
        .find_map(|list| detach_item(&mut list.items, &item_id));
    if detached.is_none() {
        return Err(not_found("Item not found or not yours"));
    }

    persist_boards(&state.data_dir, &boards).map_err(internal_error)?;
    Ok(Json(serde_json::json!({"message": "Item deleted"})))
}

pub(super) async fn move_item(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<serde_json::Value>, Response> {
    let mut boards = state.boards.write().await;
    let board = boards.entry(subject.user_id.clone()).or_default();

    // Detach first so an in-list reorder indexes against the list without
    // the moved item, but refuse cycles while the tree is still intact.
    match payload.target_parent_type {
        ParentKind::List => {
            if !board.contains_key(&payload.target_parent_id) {
                return Err(not_found("Target list not found or not yours"));
            }
        }
        ParentKind::Item => {
            let Some(target) = board
                .values_mut()
                .find_map(|list| find_item_mut(&mut list.items, &payload.target_parent_id))
            else {
                return Err(not_found("Target item not found or not yours"));
            };
            let target_id = target.id.clone();
            let moved_subtree = board
                .values()
                .find_map(|list| stacklist::model::find_item(&list.items, &payload.item_id));
            let Some(moved_subtree) = moved_subtree else {
                return Err(not_found("Item not found or not yours"));
            };
            if subtree_contains(moved_subtree, &target_id) {
                return Err(bad_request("Cannot move an item under itself"));
            }
        }
    }

    let Some(item) = board
        .values_mut()
        .find_map(|list| detach_item(&mut list.items, &payload.item_id))
    else {
        return Err(not_found("Item not found or not yours"));
    };

    let fragment = match payload.target_parent_type {
        ParentKind::List => {
            let list = board
                .get_mut(&payload.target_parent_id)
                .expect("target list checked above");
            let index = payload.target_index.min(list.items.len());
            list.items.insert(index, item);
            serde_json::to_value(&*list)
        }
        ParentKind::Item => {
            let parent = board
                .values_mut()
                .find_map(|list| find_item_mut(&mut list.items, &payload.target_parent_id))
                .expect("target item checked above");
            let index = payload.target_index.min(parent.sub_items.len());
            parent.sub_items.insert(index, item);
            serde_json::to_value(&*parent)
        }
    };
    let fragment = fragment.map_err(|e| internal_error(e.into()))?;

    persist_boards(&state.data_dir, &boards).map_err(internal_error)?;
    Ok(Json(fragment))
}
