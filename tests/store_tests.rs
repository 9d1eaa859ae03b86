// File-backed local storage: persistence across reopen and damaged files

use job_board::config::AppConfig;
use job_board::controller::JobBoard;
use job_board::core::store::{
    JsonFileStore, KeyValueStore, LocalStore, HIDDEN_JOB_IDS_KEY, SAVED_JOBS_KEY,
};
use job_board::types::{Job, JobId, SearchCriteria};
use serde_json::json;
use tempfile::TempDir;

fn board_at(path: &std::path::Path) -> JobBoard {
    JobBoard::from_config(
        &AppConfig::default(),
        LocalStore::new(JsonFileStore::open(path)),
    )
}

fn load_results(board: &mut JobBoard) {
    let ticket = board
        .begin_search(SearchCriteria::Skills("rust".to_string()))
        .unwrap();
    board.complete_search(
        ticket,
        Ok(vec![
            Job::from(json!({"id": 10, "title": "Rust Dev", "salary": {"min": 1}})),
            Job::from(json!({"title": "No Id", "company": "Acme"})),
        ]),
    );
}

#[test]
fn test_saved_and_hidden_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    {
        let mut board = board_at(&path);
        load_results(&mut board);
        board.toggle_save(&JobId::from("10"));
        let derived = board.resolve(&board.current_jobs()[1]);
        board.hide(&derived);
    }

    let board = board_at(&path);
    let saved = board.saved_jobs();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].field("salary"), Some(&json!({"min": 1})));
    assert_eq!(board.hidden_ids().len(), 1);
}

#[test]
fn test_layout_uses_browser_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let mut store = LocalStore::new(JsonFileStore::open(&path));
    store
        .set_hidden_ids(&[JobId::from("b"), JobId::from("a")].into_iter().collect())
        .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[HIDDEN_JOB_IDS_KEY], json!(r#"["a","b"]"#));
    assert!(raw.get(SAVED_JOBS_KEY).is_none());
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = LocalStore::new(JsonFileStore::open(&path));
    assert!(store.saved_jobs().is_empty());
    assert!(store.hidden_ids().is_empty());
}

#[test]
fn test_malformed_values_fall_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(
        &path,
        r#"{"savedJobs": "{\"oops\": 1}", "hiddenJobIds": "null"}"#,
    )
    .unwrap();

    let store = LocalStore::new(JsonFileStore::open(&path));
    assert!(store.saved_jobs().is_empty());
    assert!(store.hidden_ids().is_empty());
}

#[test]
fn test_failed_write_keeps_previous_value() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file, not a directory").unwrap();

    let mut store = JsonFileStore::open(blocker.join("storage.json"));
    assert!(store.set_item(SAVED_JOBS_KEY, "[]".to_string()).is_err());
    assert_eq!(store.get_item(SAVED_JOBS_KEY), None);
}
