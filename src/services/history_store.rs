// History Storage Service
// Per-identity append-only activity ledger, persisted as one JSON file per
// identity. Entries are ordered newest-first by completion time of their
// triggering action. The store never holds credentials.

use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{HistoryAction, HistoryEntry};

const SNIPPET_CHARS: usize = 50;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to access history file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse history file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub struct HistoryStore {
    data_dir: PathBuf,
}

impl HistoryStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Get default data directory
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("integrityAI"))
    }

    fn history_file(&self, identity: &str) -> PathBuf {
        self.data_dir.join(format!("history_{}.json", sanitize_identity(identity)))
    }

    /// Load the ledger for an identity, newest-first. A missing file is an
    /// empty ledger.
    pub fn load(&self, identity: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        let file = self.history_file(identity);
        if !file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&file)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Prepend one completed action to the identity's ledger.
    pub fn append(&self, identity: &str, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.load(identity)?;
        entries.insert(0, entry);
        self.save(identity, &entries)
    }

    /// Look up an entry by id, for restoring a past action into a view.
    pub fn find(&self, identity: &str, id: &str) -> Result<Option<HistoryEntry>, HistoryError> {
        Ok(self.load(identity)?.into_iter().find(|e| e.id == id))
    }

    /// Drop the identity's entire ledger.
    pub fn clear(&self, identity: &str) -> Result<(), HistoryError> {
        let file = self.history_file(identity);
        if file.exists() {
            fs::remove_file(file)?;
        }
        Ok(())
    }

    fn save(&self, identity: &str, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        fs::create_dir_all(&self.data_dir)?;
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(self.history_file(identity), content)?;
        Ok(())
    }
}

/// Build a new ledger entry stamped with a fresh id and the current time.
pub fn new_entry(source_text: &str, action: HistoryAction) -> HistoryEntry {
    HistoryEntry {
        id: Uuid::new_v4().to_string(),
        ts: chrono::Utc::now(),
        snippet: snippet(source_text),
        action,
    }
}

fn snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(SNIPPET_CHARS).collect();
    format!("{}...", head)
}

fn sanitize_identity(identity: &str) -> String {
    identity
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
