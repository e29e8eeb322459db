use super::*;

#[test]
fn missing_session_file_reads_as_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::open(dir.path()).unwrap();

    let cfg = store.read().unwrap();
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert!(cfg.identity.is_none());
}

#[test]
fn login_identity_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::open(dir.path()).unwrap();

    store.set_identity("user-1", "a@x.com").unwrap();

    let cfg = store.read().unwrap();
    let identity = cfg.identity.expect("identity stored");
    assert_eq!(identity.user_id, "user-1");
    assert_eq!(identity.email, "a@x.com");
}

#[test]
fn clear_identity_is_teardown() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::open(dir.path()).unwrap();

    store.set_identity("user-1", "a@x.com").unwrap();
    store.clear_identity().unwrap();

    let cfg = store.read().unwrap();
    assert!(cfg.identity.is_none());
}

#[test]
fn base_url_survives_identity_changes() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::open(dir.path()).unwrap();

    store.set_base_url("http://10.0.0.5:9000/").unwrap();
    store.set_identity("user-1", "a@x.com").unwrap();
    store.clear_identity().unwrap();

    let cfg = store.read().unwrap();
    assert_eq!(cfg.base_url, "http://10.0.0.5:9000");
}
