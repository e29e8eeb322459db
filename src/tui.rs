use anyhow::Result;

use crate::session::SessionStore;

pub fn run(store: &SessionStore) -> Result<()> {
    crate::board::run(store)
}
