mod history;

pub use history::HistoryError;
pub use history::HistoryManager;
