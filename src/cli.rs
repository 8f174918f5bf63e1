//! Command-line arguments and process-wide logging setup.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Config;
use crate::model::Schema;
use crate::storage::{Outbox, StorageError};

#[derive(Parser, Debug)]
#[command(
    name = "leasegate",
    version,
    about = "Validated edit forms for event and lease records"
)]
pub struct Cli {
    /// Kind of record to edit
    #[arg(value_enum)]
    pub resource: Resource,

    /// JSON file holding the record to edit
    pub seed: PathBuf,

    /// Override the config file location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the directory committed updates are written to
    #[arg(long)]
    pub outbox: Option<PathBuf>,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Record kinds selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    Event,
    Lease,
}

impl From<Resource> for Schema {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Event => Schema::Event,
            Resource::Lease => Schema::Lease,
        }
    }
}

impl Cli {
    /// The outbox to commit into: `--outbox`, then the config, then the
    /// XDG data directory.
    pub fn outbox(&self, config: &Config) -> Result<Outbox, StorageError> {
        match self.outbox.as_ref().or(config.outbox_dir.as_ref()) {
            Some(dir) => Outbox::with_path(dir),
            None => Outbox::new(),
        }
    }
}

/// Default log file: `~/.local/share/leasegate/leasegate.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("leasegate").join("leasegate.log"))
}

/// Installs the global subscriber, writing to `log_file`. Later calls are no-ops.
pub fn init_tracing(level: &str, log_file: &Path) -> io::Result<()> {
    static INIT: OnceLock<()> = OnceLock::new();
    if INIT.get().is_some() {
        return Ok(());
    }
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    INIT.get_or_init(|| {
        // Fails only if another subscriber is already installed, which leaves
        // that one in place.
        let _ = fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    });
    Ok(())
}
