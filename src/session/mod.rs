//! Run history
//!
//! Completed runs can be recorded to a small JSON history file keyed to
//! the current user. Recording is fire-and-forget: the visualizer never
//! fails because the history could not be written. A persisted `enabled`
//! flag turns the whole feature off without deleting past records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// One recorded run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub algorithm: String,
    /// Raw input parameters, keyed by field name.
    pub inputs: BTreeMap<String, String>,
    /// Wall-clock playback duration, if the run finished.
    pub duration_ms: Option<u64>,
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub device: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
pub enum SessionError {
    Io(std::io::Error),
    Format(serde_json::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "history file error: {}", e),
            SessionError::Format(e) => write!(f, "history file is not valid JSON: {}", e),
        }
    }
}

impl Error for SessionError {}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Io(e)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        SessionError::Format(e)
    }
}

/// Where completed runs go. Implementations decide whether anything is
/// actually kept.
pub trait SessionStore {
    /// Record a completed run. Implementations swallow storage failures;
    /// a lost record never interrupts playback.
    fn record_session(&mut self, record: SessionRecord);

    /// Past records, newest first.
    fn list_sessions(&self) -> Vec<SessionRecord>;
}

/// Store that keeps nothing.
#[derive(Debug, Default)]
pub struct NullSessionStore;

impl SessionStore for NullSessionStore {
    fn record_session(&mut self, _record: SessionRecord) {}

    fn list_sessions(&self) -> Vec<SessionRecord> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default = "default_enabled")]
    enabled: bool,
    sessions: Vec<SessionRecord>,
}

fn default_enabled() -> bool {
    true
}

impl Default for HistoryFile {
    fn default() -> Self {
        HistoryFile { enabled: true, sessions: Vec::new() }
    }
}

/// JSON-file-backed store. Records are only kept when a user is known
/// and the persisted `enabled` flag is on.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    user: Option<String>,
    file: HistoryFile,
}

impl FileSessionStore {
    /// Open the history at `path`, creating state in memory if the file
    /// does not exist yet. A corrupt file is an error; an absent one is
    /// not.
    pub fn open(path: impl Into<PathBuf>, user: Option<String>) -> Result<Self, SessionError> {
        let path = path.into();
        let file = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            HistoryFile::default()
        };
        Ok(FileSessionStore { path, user, file })
    }

    /// Open the history at its default location for the current user.
    pub fn open_default() -> Result<Self, SessionError> {
        let user = std::env::var("USER").ok().filter(|u| !u.is_empty());
        Self::open(default_history_path(), user)
    }

    pub fn is_enabled(&self) -> bool {
        self.file.enabled
    }

    /// Flip the persisted enabled flag.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.file.enabled = enabled;
        self.save()
    }

    fn save(&self) -> Result<(), SessionError> {
        let text = serde_json::to_string_pretty(&self.file)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// `$HOME/.algotty_history.json`, falling back to the working directory.
pub fn default_history_path() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => Path::new(&home).join(".algotty_history.json"),
        _ => PathBuf::from(".algotty_history.json"),
    }
}

impl SessionStore for FileSessionStore {
    fn record_session(&mut self, record: SessionRecord) {
        if !self.file.enabled || self.user.is_none() {
            return;
        }
        self.file.sessions.push(record);
        // best effort; a failed save drops the record silently
        let _ = self.save();
    }

    fn list_sessions(&self) -> Vec<SessionRecord> {
        if self.user.is_none() {
            return Vec::new();
        }
        let mut sessions = self.file.sessions.clone();
        sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(algorithm: &str, ts: DateTime<Utc>) -> SessionRecord {
        SessionRecord {
            algorithm: algorithm.to_string(),
            inputs: BTreeMap::new(),
            duration_ms: Some(1200),
            result: Some("Finished".to_string()),
            notes: None,
            device: "test".to_string(),
            timestamp: ts,
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("algotty-test-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn records_round_trip_through_the_file() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_file(&path);
        {
            let mut store =
                FileSessionStore::open(&path, Some("tester".to_string())).unwrap();
            store.record_session(record("Bubble Sort", Utc::now()));
        }
        let store = FileSessionStore::open(&path, Some("tester".to_string())).unwrap();
        let sessions = store.list_sessions();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].algorithm, "Bubble Sort");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn no_user_means_no_records() {
        let path = temp_path("nouser");
        let _ = fs::remove_file(&path);
        let mut store = FileSessionStore::open(&path, None).unwrap();
        store.record_session(record("Bubble Sort", Utc::now()));
        assert!(store.list_sessions().is_empty());
        assert!(!path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn disabled_flag_survives_reopen_and_blocks_records() {
        let path = temp_path("disabled");
        let _ = fs::remove_file(&path);
        {
            let mut store =
                FileSessionStore::open(&path, Some("tester".to_string())).unwrap();
            store.set_enabled(false).unwrap();
        }
        let mut store = FileSessionStore::open(&path, Some("tester".to_string())).unwrap();
        assert!(!store.is_enabled());
        store.record_session(record("Quick Sort", Utc::now()));
        assert!(store.list_sessions().is_empty());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn listing_is_newest_first() {
        let path = temp_path("order");
        let _ = fs::remove_file(&path);
        let mut store = FileSessionStore::open(&path, Some("tester".to_string())).unwrap();
        let older = Utc::now() - chrono::Duration::minutes(5);
        store.record_session(record("Old", older));
        store.record_session(record("New", Utc::now()));
        let sessions = store.list_sessions();
        assert_eq!(sessions[0].algorithm, "New");
        assert_eq!(sessions[1].algorithm, "Old");
        let _ = fs::remove_file(&path);
    }
}
