//! Character persistence: the save-on-change store and file import/export.
//!
//! The sheet keeps one serialized document per storage key, much like
//! browser local storage. Files picked by the player for import go through
//! strict validation first; everything else loads leniently.

use crate::document::CharacterDocument;
use crate::validate::{validate_document, ValidationFailure};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "character-sheet";

/// A string key/value store the session writes after every change.
pub trait Store {
    /// The stored text, or `None` when nothing has been saved yet.
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;

    fn save(&mut self, key: &str, contents: &str) -> Result<(), PersistError>;

    fn remove(&mut self, key: &str) -> Result<(), PersistError>;
}

/// Keeps everything in memory. Useful for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `contents` already stored under `key`.
    pub fn with_entry(key: impl Into<String>, contents: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.into(), contents.into());
        store
    }

    /// Number of successful saves so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), contents.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Stores each key as a JSON file in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_file_stem(key)))
    }
}

impl Store for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir)?;
        // Write then rename so a crash never leaves half a document behind.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Serialize a document for export.
pub fn export_json(doc: &CharacterDocument, pretty: bool) -> Result<String, PersistError> {
    let json = if pretty {
        doc.to_json_pretty()?
    } else {
        doc.to_json()?
    };
    Ok(json)
}

/// Parse an import file: strict validation, then defaulting and migration.
pub fn import_json(json: &str) -> Result<CharacterDocument, PersistError> {
    let value: Value = serde_json::from_str(json)?;
    validate_document(&value)?;
    Ok(CharacterDocument::from_value(value))
}

/// Write a document to `path`.
pub async fn export_to_file(
    doc: &CharacterDocument,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), PersistError> {
    let content = export_json(doc, pretty)?;
    fs::write(path, content).await?;
    Ok(())
}

/// Read and strictly validate a character file.
pub async fn import_from_file(path: impl AsRef<Path>) -> Result<CharacterDocument, PersistError> {
    let content = fs::read_to_string(path).await?;
    import_json(&content)
}

/// Suggested file name for exporting a character.
pub fn export_file_path(dir: impl AsRef<Path>, character_name: &str) -> PathBuf {
    let stem = if character_name.trim().is_empty() {
        "character".to_string()
    } else {
        sanitize_file_stem(character_name)
    };
    dir.as_ref().join(format!("{stem}.json"))
}

fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
