use std::collections::HashMap;

use spotgram::management::{HistoryError, HistoryManager};

#[tokio::test]
async fn test_load_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let history = HistoryManager::load(path.clone()).await.unwrap();

    assert!(history.is_empty());
    assert!(!history.has("Song A - Artist X"));
    // Loading must not create the file
    assert!(!path.exists());
}

#[tokio::test]
async fn test_load_empty_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "\n").unwrap();

    let history = HistoryManager::load(path).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_load_malformed_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    // Truncated in the middle of an object
    std::fs::write(&path, r#"{"Song A - Artist X": tr"#).unwrap();
    let result = HistoryManager::load(path.clone()).await;
    assert!(matches!(result, Err(HistoryError::SerdeError(_))));

    // Not an object of booleans
    std::fs::write(&path, r#"["Song A - Artist X"]"#).unwrap();
    let result = HistoryManager::load(path).await;
    assert!(matches!(result, Err(HistoryError::SerdeError(_))));
}

#[tokio::test]
async fn test_persist_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let mut history = HistoryManager::new(path.clone());
    history.mark("Song A - Artist X");
    history.mark("Song B - Artist Y, Artist Z");
    history.persist().await.unwrap();

    let loaded = HistoryManager::load(path).await.unwrap();
    assert_eq!(loaded.entries(), history.entries());
    assert!(loaded.has("Song A - Artist X"));
    assert!(loaded.has("Song B - Artist Y, Artist Z"));
}

#[tokio::test]
async fn test_persist_writes_flat_json_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let mut history = HistoryManager::new(path.clone());
    history.mark("Song A - Artist X");
    history.persist().await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: HashMap<String, bool> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.get("Song A - Artist X"), Some(&true));

    // No temp file is left behind
    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
}

#[tokio::test]
async fn test_persist_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state/nested/data.json");

    let mut history = HistoryManager::new(path.clone());
    history.mark("Song A - Artist X");
    history.persist().await.unwrap();

    assert!(path.is_file());
}

#[tokio::test]
async fn test_false_entries_are_not_processed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, r#"{"Song A - Artist X": false, "Song B - Artist Y": true}"#).unwrap();

    let history = HistoryManager::load(path).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(!history.has("Song A - Artist X"));
    assert!(history.has("Song B - Artist Y"));
}

#[test]
fn test_forget() {
    let mut history = HistoryManager::new("unused.json".into());
    history.mark("Song A - Artist X");

    assert!(history.forget("Song A - Artist X"));
    assert!(!history.has("Song A - Artist X"));
    assert!(!history.forget("Song A - Artist X"));
}
