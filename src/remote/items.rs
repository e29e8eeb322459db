//! Item CRUD and the move operation.

use super::*;
use crate::model::{Item, MoveRequest, ParentKind};

impl ApiClient {
    pub fn create_item(
        &self,
        parent_type: ParentKind,
        parent_id: &str,
        content: &str,
    ) -> Result<Item> {
        let resp = self
            .authed(self.client.post(self.url("/items")))
            .json(&CreateItemRequest {
                parent_type,
                parent_id,
                content,
            })
            .send()
            .context("create item request")?;

        let item: Item = self
            .ensure_ok(resp, "create item")?
            .json()
            .context("parse created item")?;
        Ok(item)
    }

    pub fn update_item(&self, item_id: &str, update: &ItemUpdate) -> Result<Item> {
        let resp = self
            .authed(self.client.put(self.url(&format!("/items/{}", item_id))))
            .json(update)
            .send()
            .context("update item request")?;

        let item: Item = self
            .ensure_ok(resp, "update item")?
            .json()
            .context("parse updated item")?;
        Ok(item)
    }

    pub fn delete_item(&self, item_id: &str) -> Result<()> {
        let resp = self
            .authed(self.client.delete(self.url(&format!("/items/{}", item_id))))
            .send()
            .context("delete item request")?;

        let _ = self.ensure_ok(resp, "delete item")?;
        Ok(())
    }

    /// Reparent/reorder an item. Callers do not branch on the outcome; the
    /// unconditional reload afterwards shows whatever the server settled on.
    pub fn move_item(&self, req: &MoveRequest) -> Result<()> {
        let resp = self
            .authed(self.client.post(self.url("/items/move")))
            .json(req)
            .send()
            .context("move item request")?;

        let _ = self.ensure_ok(resp, "move item")?;
        Ok(())
    }
}
