use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::StorageError;
use crate::model::{EventUpdate, LeaseUpdate, Schema};
use crate::submit::{Updater, seed_object};

/// JSONL-backed update operation.
///
/// Each committed payload becomes one line of `events.jsonl` or
/// `leases.jsonl` under the outbox directory.
#[derive(Debug, Clone)]
pub struct Outbox {
    base_path: PathBuf,
}

impl Outbox {
    /// Creates an outbox in the XDG data directory.
    ///
    /// The directory (`~/.local/share/leasegate/outbox/`) is created if it
    /// does not already exist.
    pub fn new() -> Result<Self, StorageError> {
        let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        Self::with_path(data_dir.join("leasegate").join("outbox"))
    }

    /// Creates an outbox rooted at the given path.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Returns the JSONL file for a resource kind.
    pub fn path(&self, schema: Schema) -> PathBuf {
        let name = match schema {
            Schema::Event => "events.jsonl",
            Schema::Lease => "leases.jsonl",
        };
        self.base_path.join(name)
    }

    /// Appends one record to the file for `schema`.
    fn append<T: Serialize>(&self, schema: Schema, record: &T) -> Result<(), StorageError> {
        let path = self.path(schema);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        serde_json::to_writer(&mut file, record)?;
        writeln!(file)?;
        tracing::info!(%schema, path = %path.display(), "payload written to outbox");
        Ok(())
    }

    /// Loads every committed event update, oldest first.
    pub fn load_events(&self) -> Result<Vec<EventUpdate>, StorageError> {
        load_lines(&self.path(Schema::Event))
    }

    /// Loads every committed lease update, oldest first.
    pub fn load_leases(&self) -> Result<Vec<LeaseUpdate>, StorageError> {
        load_lines(&self.path(Schema::Lease))
    }
}

impl Updater for Outbox {
    type Error = StorageError;

    fn update_event(&mut self, event: &EventUpdate) -> Result<(), Self::Error> {
        self.append(Schema::Event, event)
    }

    fn update_lease(&mut self, lease: &LeaseUpdate) -> Result<(), Self::Error> {
        self.append(Schema::Lease, lease)
    }
}

/// Loads the seed item for an edit modal from a JSON file.
pub fn load_seed(path: &Path) -> Result<Map<String, Value>, StorageError> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    seed_object(value).ok_or_else(|| StorageError::SeedNotObject(path.to_path_buf()))
}

/// Parses every non-blank line of a JSONL file. A missing file is empty.
fn load_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let reader = BufReader::new(fs::File::open(path)?);
    reader
        .lines()
        .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
        .map(|line| {
            let line = line?;
            serde_json::from_str(&line).map_err(StorageError::Json)
        })
        .collect()
}
