//! List CRUD operations.

use super::*;
use crate::model::{Board, TodoList};

impl ApiClient {
    /// Fetch the whole hierarchy. A 401 means the server no longer
    /// recognizes the held identity; callers clear it and fall back to the
    /// unauthenticated state.
    pub fn fetch_lists(&self) -> Result<FetchLists> {
        let resp = self
            .authed(self.client.get(self.url("/lists")))
            .send()
            .context("fetch lists request")?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(FetchLists::Unauthorized);
        }

        let board: Board = self
            .ensure_ok(resp, "fetch lists")?
            .json()
            .context("parse lists")?;
        Ok(FetchLists::Authorized(board))
    }

    pub fn create_list(&self, title: &str) -> Result<TodoList> {
        let resp = self
            .authed(self.client.post(self.url("/lists")))
            .json(&CreateListRequest { title })
            .send()
            .context("create list request")?;

        let list: TodoList = self
            .ensure_ok(resp, "create list")?
            .json()
            .context("parse created list")?;
        Ok(list)
    }

    pub fn rename_list(&self, list_id: &str, title: &str) -> Result<TodoList> {
        let resp = self
            .authed(self.client.put(self.url(&format!("/lists/{}", list_id))))
            .json(&CreateListRequest { title })
            .send()
            .context("rename list request")?;

        let list: TodoList = self
            .ensure_ok(resp, "rename list")?
            .json()
            .context("parse renamed list")?;
        Ok(list)
    }

    pub fn delete_list(&self, list_id: &str) -> Result<()> {
        let resp = self
            .authed(self.client.delete(self.url(&format!("/lists/{}", list_id))))
            .send()
            .context("delete list request")?;

        let _ = self.ensure_ok(resp, "delete list")?;
        Ok(())
    }
}
