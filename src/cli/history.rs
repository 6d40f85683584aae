use std::path::PathBuf;

use tabled::Table;

use crate::{error, info, management::HistoryManager, success, types::HistoryTableRow, warning};

pub async fn list_history(path: PathBuf, search: Option<String>) {
    let history = match HistoryManager::load(path.clone()).await {
        Ok(history) => history,
        Err(e) => error!("Failed to load history from {}: {}", path.display(), e),
    };

    if history.is_empty() {
        info!("No tracks in {}", path.display());
        return;
    }

    let needle = search.map(|s| s.to_lowercase());
    let mut rows: Vec<HistoryTableRow> = history
        .entries()
        .iter()
        .filter(|(key, _)| match &needle {
            Some(needle) => key.to_lowercase().contains(needle),
            None => true,
        })
        .map(|(key, processed)| HistoryTableRow {
            track: key.clone(),
            processed: *processed,
        })
        .collect();

    if rows.is_empty() {
        warning!("No tracks match the search");
        return;
    }

    rows.sort_by(|a, b| a.track.cmp(&b.track));
    let count = rows.len();
    println!("{}", Table::new(rows));
    info!("{} of {} tracks", count, history.len());
}

pub async fn forget_history(path: PathBuf, key: String) {
    let mut history = match HistoryManager::load(path.clone()).await {
        Ok(history) => history,
        Err(e) => error!("Failed to load history from {}: {}", path.display(), e),
    };

    if !history.forget(&key) {
        warning!("'{}' is not in the history", key);
        return;
    }

    if let Err(e) = history.persist().await {
        error!("Failed to save history: {}", e);
    }
    success!("Forgot '{}'", key);
}
