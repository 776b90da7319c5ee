//! Saving block families and the XML documents

use std::path::PathBuf;

use super::{OperationReport, write_with_backup};
use crate::config::DataLayout;
use crate::error::{Error, Result};
use crate::formats::block::BlockKind;
use crate::formats::xml::{self, MultisellTable, Tradelist, serialize_buylists, serialize_multisell};
use crate::store::DataStore;

/// Serialize one family from the store and write it with a backup
///
/// # Returns
/// The path written
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_family(layout: &DataLayout, store: &DataStore, kind: BlockKind) -> Result<PathBuf> {
    let path = layout.block_file(kind);
    write_with_backup(&path, &store.serialize(kind))?;
    tracing::info!("Saved {} {} records to {}", store.records(kind).len(), kind, path.display());
    Ok(path)
}

/// Save several families. Each one is attempted on its own; a failure is
/// reported and the rest are still written.
pub fn save_families(layout: &DataLayout, store: &DataStore, kinds: &[BlockKind]) -> OperationReport {
    let mut saved = Vec::new();
    let mut errors = Vec::new();

    for &kind in kinds {
        match save_family(layout, store, kind) {
            Ok(_) => saved.push(kind.name()),
            Err(e) => errors.push(format!("{kind}: {e}")),
        }
    }

    let mut report = if errors.is_empty() {
        OperationReport::ok(format!("Files saved: {}", saved.join(", ")))
    } else if saved.is_empty() {
        OperationReport::failed("No files saved")
    } else {
        OperationReport::failed(format!("Files saved: {} ({} failed)", saved.join(", "), errors.len()))
    };
    for error in errors {
        report.push_error(error);
    }
    report
}

/// Write `merchant_buylists.xml` with a backup
pub fn save_buylists(layout: &DataLayout, tradelists: &[Tradelist]) -> OperationReport {
    let result = serialize_buylists(tradelists).and_then(|xml| write_with_backup(layout.buylists(), &xml));
    match result {
        Ok(()) => OperationReport::ok(format!("Saved {} tradelists", tradelists.len())),
        Err(e) => OperationReport::failed(e.to_string()),
    }
}

/// Write one multisell file by name with a backup.
///
/// The name must be a plain file name inside the multisell directory.
pub fn save_multisell(layout: &DataLayout, filename: &str, table: &MultisellTable) -> OperationReport {
    let result = validate_file_name(filename).and_then(|()| {
        let xml = serialize_multisell(table)?;
        write_with_backup(layout.multisell_dir().join(filename), &xml)
    });
    match result {
        Ok(()) => OperationReport::ok(format!("Multisell {filename} saved successfully")),
        Err(e) => OperationReport::failed(e.to_string()),
    }
}

/// Sorted `.xml` names in the multisell directory
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn list_multisell_files(layout: &DataLayout) -> Result<Vec<String>> {
    xml::multisell::list_multisell_files(layout.multisell_dir())
}

fn validate_file_name(filename: &str) -> Result<()> {
    if filename.is_empty() || filename.contains(['/', '\\']) || filename.contains("..") {
        return Err(Error::InvalidPath(format!("invalid multisell file name: {filename}")));
    }
    Ok(())
}
