//! Persistence gateway
//!
//! Everything that writes to the data root goes through here: each write
//! first copies the current file to `<file>.backup`, and every operation
//! returns an [`OperationReport`] instead of failing as a whole.

mod delete;
mod save;
mod tools;

pub use delete::{delete_item_everywhere, delete_skill_everywhere};
pub use save::{list_multisell_files, save_buylists, save_families, save_family, save_multisell};
pub use tools::{generate_set_items, sync_name_class};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Severity of a collected log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Step,
    Info,
    Success,
    Error,
}

/// One log line collected during an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
}

/// Outcome of a gateway operation
///
/// Serializes to `{ success, message, logs?, deletedFrom?, errors? }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationReport {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<LogEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_from: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl OperationReport {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Collect a log line and emit it through `tracing`
    pub fn log(&mut self, message: impl Into<String>, kind: LogKind) {
        let message = message.into();
        match kind {
            LogKind::Error => tracing::error!("{}", message),
            _ => tracing::info!("{}", message),
        }
        self.logs.get_or_insert_with(Vec::new).push(LogEntry { message, kind });
    }

    pub fn push_error(&mut self, error: impl Into<String>) {
        self.errors.get_or_insert_with(Vec::new).push(error.into());
    }

    pub fn error_count(&self) -> usize {
        self.errors.as_ref().map_or(0, Vec::len)
    }

    /// The JSON envelope
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `<file>.backup` next to `path`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".backup");
    PathBuf::from(name)
}

/// Write `content` to `path`, first copying the current file to
/// `<file>.backup`.
///
/// A missing original is not an error, and neither is a failed backup
/// (it is logged). Missing parent directories are created.
///
/// # Errors
/// Returns an error if the file itself cannot be written.
pub fn write_with_backup<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    match fs::read(path) {
        Ok(original) => {
            if let Err(e) = fs::write(backup_path(path), original) {
                tracing::warn!("Could not create backup for {}: {}", path.display(), e);
            }
        }
        Err(_) => tracing::debug!("No existing file to backup at {}", path.display()),
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
