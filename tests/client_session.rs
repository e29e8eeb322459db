mod common;

use anyhow::Result;
use tempfile::TempDir;

use stacklist::hierarchy::{LoadOutcome, Snapshot};
use stacklist::remote::ApiClient;
use stacklist::session::SessionStore;

#[test]
fn stored_identity_survives_reopening_the_store() -> Result<()> {
    let dir = TempDir::new()?;
    let store = SessionStore::open(dir.path())?;
    store.set_base_url("http://127.0.0.1:9999/")?;
    store.set_identity("user-1", "a@x.com")?;

    let reopened = SessionStore::open(dir.path())?;
    let config = reopened.read()?;
    assert_eq!(config.base_url, "http://127.0.0.1:9999");
    let identity = config.identity.expect("identity persisted");
    assert_eq!(identity.user_id, "user-1");
    assert_eq!(identity.email, "a@x.com");

    Ok(())
}

#[test]
fn stale_identity_is_reported_as_logged_out() -> Result<()> {
    let server = common::spawn_server()?;

    // An id the server has never issued. The server answers 401 and the
    // snapshot surfaces that as a structural outcome rather than an error.
    let api = ApiClient::with_identity(&server.base_url, "no-such-user")?;
    let mut snapshot = Snapshot::new();
    let outcome = snapshot.load(&api)?;
    assert_eq!(outcome, LoadOutcome::LoggedOut);
    assert!(snapshot.is_empty());

    Ok(())
}

#[test]
fn logged_out_clears_the_stored_identity() -> Result<()> {
    let server = common::spawn_server()?;
    let dir = TempDir::new()?;
    let store = SessionStore::open(dir.path())?;
    store.set_identity("no-such-user", "ghost@x.com")?;

    let api = ApiClient::with_identity(&server.base_url, "no-such-user")?;
    let mut snapshot = Snapshot::new();
    if snapshot.load(&api)? == LoadOutcome::LoggedOut {
        store.clear_identity()?;
    }

    assert!(store.read()?.identity.is_none());

    Ok(())
}

#[test]
fn fresh_login_loads_the_hierarchy() -> Result<()> {
    let server = common::spawn_server()?;
    let user = common::register_and_login(&server.base_url, "a@x.com", "secret1")?;
    let api = common::authed_api(&server.base_url, &user)?;

    let mut snapshot = Snapshot::new();
    assert_eq!(snapshot.load(&api)?, LoadOutcome::Loaded);
    assert!(snapshot.is_empty());

    Ok(())
}

#[test]
fn created_list_is_merged_without_a_reload() -> Result<()> {
    let server = common::spawn_server()?;
    let user = common::register_and_login(&server.base_url, "a@x.com", "secret1")?;
    let api = common::authed_api(&server.base_url, &user)?;

    let mut snapshot = Snapshot::new();
    snapshot.load(&api)?;

    let created = snapshot.create_list(&api, "  Groceries  ")?;
    let id = created.expect("non-blank title creates a list");
    assert_eq!(snapshot.list(&id).map(|l| l.title.as_str()), Some("Groceries"));

    // Blank titles never reach the server and change nothing.
    assert!(snapshot.create_list(&api, "   ")?.is_none());
    assert_eq!(snapshot.len(), 1);

    Ok(())
}

#[test]
fn removing_a_list_is_reflected_immediately_and_on_reload() -> Result<()> {
    let server = common::spawn_server()?;
    let user = common::register_and_login(&server.base_url, "a@x.com", "secret1")?;
    let api = common::authed_api(&server.base_url, &user)?;

    let mut snapshot = Snapshot::new();
    snapshot.load(&api)?;
    let keep = snapshot.create_list(&api, "Keep")?.expect("created");
    let gone = snapshot.create_list(&api, "Drop")?.expect("created");

    snapshot.remove_list(&api, &gone);
    assert!(snapshot.list(&gone).is_none());
    assert!(snapshot.list(&keep).is_some());

    snapshot.load(&api)?;
    assert!(snapshot.list(&gone).is_none());
    assert!(snapshot.list(&keep).is_some());

    Ok(())
}
