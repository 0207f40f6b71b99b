use std::sync::Arc;

use storage::{
    DISPLAY_NAME_KEY, JsonFileStore, KeyValueStore, SessionStore, StorageError, TOKEN_KEY,
};
use tempfile::tempdir;
use vida_core::model::{Session, SessionToken};

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("absent.json"));
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    store.remove(TOKEN_KEY).unwrap();
}

#[test]
fn session_survives_a_new_store_instance() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("session.json");

    let session = Session::authenticated(
        SessionToken::parse("persisted-token").unwrap(),
        Some("João da Silva".into()),
    );
    SessionStore::new(Arc::new(JsonFileStore::new(&path)))
        .save(&session)
        .unwrap();

    let reopened = SessionStore::new(Arc::new(JsonFileStore::new(&path)));
    assert_eq!(reopened.load().unwrap(), session);

    reopened.clear().unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(raw.trim(), "{}");
}

#[test]
fn corrupt_file_is_a_serialization_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let err = JsonFileStore::new(&path).get(TOKEN_KEY).unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[test]
fn corrupt_file_is_replaced_by_the_next_write() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let store = SessionStore::new(Arc::new(JsonFileStore::new(&path)));
    assert_eq!(store.load().unwrap(), Session::anonymous());

    let session = Session::authenticated(SessionToken::parse("fresh").unwrap(), None);
    store.save(&session).unwrap();
    assert_eq!(store.load().unwrap(), session);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
}

#[test]
fn clear_on_a_corrupt_file_leaves_an_empty_object() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ truncated").unwrap();

    SessionStore::new(Arc::new(JsonFileStore::new(&path)))
        .clear()
        .unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
}

#[test]
fn writes_leave_no_scratch_files_behind() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    let store = JsonFileStore::new(&path);

    store
        .apply(&[(TOKEN_KEY, Some("t")), (DISPLAY_NAME_KEY, Some("Ana"))])
        .unwrap();
    store.apply(&[(DISPLAY_NAME_KEY, None)]).unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("session.json")]);
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("t"));
    assert_eq!(store.get(DISPLAY_NAME_KEY).unwrap(), None);
}
