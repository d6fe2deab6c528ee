//! Integration tests for the directory-backed store.
//!
//! Verifies that a task list written by one controller session is read
//! back by the next one through [`FileStore`], and how the store behaves
//! with unusable keys and damaged files.
//!
//! Run with: `cargo test --test storage`

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck::store::{CORRUPT_BACKUP_KEY, FileStore, KeyValueStore, STORAGE_KEY, StoreError};
use taskdeck::tasks::{IdSource, StorageWarning, TaskListController};
use taskdeck_proto::task::Priority;

fn frozen() -> u64 {
    1_000
}

fn session(dir: &std::path::Path) -> TaskListController<FileStore> {
    TaskListController::load_with_ids(FileStore::new(dir), IdSource::with_clock(frozen))
}

#[test]
fn tasks_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let (milk, book) = {
        let mut ctrl = session(dir.path());
        let milk = ctrl.add("Buy milk", Priority::Urgente).unwrap();
        let book = ctrl.add("Read book", Priority::Basse).unwrap();
        ctrl.toggle_complete(milk);
        (milk, book)
    };

    let ctrl = session(dir.path());
    let ids: Vec<_> = ctrl.tasks().iter().map(|t| t.id).collect();
    assert_eq!(ids, [book, milk]);
    assert!(ctrl.get(milk).unwrap().completed);
    assert_eq!(ctrl.get(book).unwrap().priority, Priority::Basse);
    assert!(ctrl.warning().is_none());
}

#[test]
fn stored_value_lives_under_todos_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctrl = session(dir.path());
    ctrl.add("a", Priority::Moyenne);

    let contents = std::fs::read_to_string(dir.path().join("todos.json")).unwrap();
    assert!(contents.starts_with('['));
    assert!(contents.contains("\"priority\":\"Moyenne\""));
    // No temporary file is left behind.
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, ["todos.json"]);
}

#[test]
fn edits_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let mut ctrl = session(dir.path());
        let id = ctrl.add("draft", Priority::Moyenne).unwrap();
        ctrl.commit_edit(id, "  final wording  ");
        id
    };
    assert_eq!(session(dir.path()).get(id).unwrap().text, "final wording");
}

#[test]
fn damaged_file_is_backed_up_and_session_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("todos.json"), "[{\"id\":").unwrap();

    let mut ctrl = session(dir.path());
    assert!(ctrl.tasks().is_empty());
    assert!(matches!(
        ctrl.warning(),
        Some(StorageWarning::LoadFailed { .. })
    ));
    let backup = std::fs::read_to_string(dir.path().join("todos.corrupt.json")).unwrap();
    assert_eq!(backup, "[{\"id\":");

    ctrl.add("recovered", Priority::Moyenne);
    let reloaded = session(dir.path());
    assert_eq!(reloaded.tasks().len(), 1);
    assert!(reloaded.warning().is_none());
    // The backup is left alone by later saves.
    assert_eq!(
        FileStore::new(dir.path())
            .get(CORRUPT_BACKUP_KEY)
            .unwrap()
            .as_deref(),
        Some("[{\"id\":")
    );
}

#[test]
fn non_utf8_file_is_set_aside_before_the_first_save() {
    let dir = tempfile::tempdir().unwrap();
    let raw = b"[{\"id\":1,\"text\":\"caf\xe9\"}]".to_vec();
    std::fs::write(dir.path().join("todos.json"), &raw).unwrap();

    let mut ctrl = session(dir.path());
    assert!(ctrl.tasks().is_empty());
    assert!(matches!(
        ctrl.warning(),
        Some(StorageWarning::LoadFailed {
            saving_disabled: false,
            ..
        })
    ));

    ctrl.add("after the damage", Priority::Moyenne).unwrap();
    assert_eq!(
        std::fs::read(dir.path().join("todos.corrupt.json")).unwrap(),
        raw
    );
    let reloaded = session(dir.path());
    assert_eq!(reloaded.tasks().len(), 1);
    assert!(reloaded.warning().is_none());
}

#[test]
fn unwritable_directory_surfaces_save_warning() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the data directory should be.
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let mut ctrl = session(&blocker);
    ctrl.add("kept in memory", Priority::Urgente).unwrap();
    assert_eq!(ctrl.tasks().len(), 1);
    assert!(matches!(
        ctrl.warning(),
        Some(StorageWarning::SaveFailed { .. })
    ));
}

#[test]
fn path_like_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    for key in ["", "..", "../escape", "a/b", "a\\b"] {
        assert!(
            matches!(store.set(key, "x"), Err(StoreError::InvalidKey(_))),
            "key {key:?} should be rejected"
        );
        assert!(matches!(store.get(key), Err(StoreError::InvalidKey(_))));
    }
    assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
}
