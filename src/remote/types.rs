//! Request/response payload types for the stacklist API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub(super) struct Credentials<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LoginResponse {
    pub(super) user_id: String,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateListRequest<'a> {
    pub(super) title: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateItemRequest<'a> {
    pub(super) parent_type: crate::model::ParentKind,
    pub(super) parent_id: &'a str,
    pub(super) content: &'a str,
}

/// Partial update for `PUT /items/:id`. Absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

impl ItemUpdate {
    pub fn content(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            complete: None,
        }
    }

    pub fn complete(complete: bool) -> Self {
        Self {
            content: None,
            complete: Some(complete),
        }
    }
}

/// Outcome of `GET /lists`. A 401 is a structural signal (fall back to the
/// unauthenticated state), not a failure.
#[derive(Debug)]
pub enum FetchLists {
    Authorized(crate::model::Board),
    Unauthorized,
}
