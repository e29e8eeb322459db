//! List CRUD, scoped to the authenticated user's board.

use axum::extract::{Extension, Path};

use super::*;
use stacklist::model::{TodoList, new_entity_id};

pub(super) async fn get_lists(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Json<Board> {
    let boards = state.boards.read().await;
    Json(boards.get(&subject.user_id).cloned().unwrap_or_default())
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct CreateListPayload {
    #[serde(default)]
    title: Option<String>,
}

pub(super) async fn create_list(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<CreateListPayload>,
) -> Result<Response, Response> {
    let list = TodoList {
        id: new_entity_id().map_err(internal_error)?,
        title: payload.title.unwrap_or_else(|| "Untitled List".to_string()),
        items: Vec::new(),
    };

    let mut boards = state.boards.write().await;
    boards
        .entry(subject.user_id.clone())
        .or_default()
        .insert(list.id.clone(), list.clone());
    persist_boards(&state.data_dir, &boards).map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(list)).into_response())
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct RenameListPayload {
    #[serde(default)]
    title: Option<String>,
}

pub(super) async fn rename_list(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(list_id): Path<String>,
    Json(payload): Json<RenameListPayload>,
) -> Result<Json<TodoList>, Response> {
    let mut boards = state.boards.write().await;
    let board = boards.entry(subject.user_id.clone()).or_default();

    let Some(list) = board.get_mut(&list_id) else {
        return Err(not_found("List not found or not yours"));
    };
    if let Some(title) = payload.title {
        list.title = title;
    }
    let updated = list.clone();

    persist_boards(&state.data_dir, &boards).map_err(internal_error)?;
    Ok(Json(updated))
}

pub(super) async fn delete_list(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(list_id): Path<String>,
) -> Result<Json<serde_json::Value>, Response> {
    let mut boards = state.boards.write().await;
    let board = boards.entry(subject.user_id.clone()).or_default();

    if board.remove(&list_id).is_none() {
        return Err(not_found("List not found or not yours"));
    }

    persist_boards(&state.data_dir, &boards).map_err(internal_error)?;
    Ok(Json(serde_json::json!({"message": "List deleted"})))
}
