use std::{
    collections::HashMap,
    fmt,
    io::Error,
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub enum HistoryError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for HistoryError {
    fn from(err: Error) -> Self {
        HistoryError::IoError(err)
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        HistoryError::SerdeError(err)
    }
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::IoError(e) => write!(f, "history file error: {}", e),
            HistoryError::SerdeError(e) => write!(f, "history file is malformed: {}", e),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::IoError(e) => Some(e),
            HistoryError::SerdeError(e) => Some(e),
        }
    }
}

/// Tracks that were already posted, keyed by track key.
///
/// Stored as a flat JSON object (`{"Song - Artist": true}`) which is read
/// once and rewritten in full after every change.
pub struct HistoryManager {
    path: PathBuf,
    entries: HashMap<String, bool>,
}

impl HistoryManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: HashMap::new(),
        }
    }

    /// Reads the history at `path`.
    ///
    /// A missing or empty file yields an empty history. Any other content
    /// that isn't a JSON object of booleans is an error.
    pub async fn load(path: PathBuf) -> Result<Self, HistoryError> {
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new(path)),
            Err(e) => return Err(HistoryError::IoError(e)),
        };

        if content.trim().is_empty() {
            return Ok(Self::new(path));
        }

        let entries: HashMap<String, bool> = serde_json::from_str(&content)?;
        Ok(Self { path, entries })
    }

    /// Overwrites the file with the current entries.
    ///
    /// Writes a sibling `.tmp` file first and renames it over the target.
    pub async fn persist(&self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.tmp_path();
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    pub fn mark(&mut self, key: &str) {
        self.entries.insert(key.to_string(), true);
    }

    /// Removes `key`, returning whether it was present.
    pub fn forget(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn entries(&self) -> &HashMap<String, bool> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
