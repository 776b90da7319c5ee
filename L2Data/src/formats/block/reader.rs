//! Block file reading

use super::{BlockKind, BlockRecord, RecordKey};
use crate::error::Result;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// Read a block file from disk
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_block_file<P: AsRef<Path>>(path: P, kind: BlockKind) -> Result<Vec<BlockRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_blocks(&content, kind))
}

/// Parse every block of `kind` from file text.
///
/// Fragments without the begin marker, and blocks lacking their identity
/// key, are dropped silently. When two blocks share an identity the later
/// one replaces the earlier one in the earlier one's position.
pub fn parse_blocks(content: &str, kind: BlockKind) -> Vec<BlockRecord> {
    let begin = kind.begin_tag();
    let mut records: IndexMap<RecordKey, BlockRecord> = IndexMap::new();

    for fragment in content.split(kind.end_tag()) {
        if !fragment.contains(begin) {
            continue;
        }

        let record = parse_fragment(fragment, kind);
        match record.identity() {
            Some(key) => {
                records.insert(key, record);
            }
            None => tracing::debug!("Dropping {} block without identity", kind),
        }
    }

    records.into_values().collect()
}

/// Parse the `key=value` tokens of one fragment (last duplicate key wins)
pub(super) fn parse_fragment(fragment: &str, kind: BlockKind) -> BlockRecord {
    let begin = kind.begin_tag();
    let mut record = BlockRecord::new(kind);

    for part in fragment.split(['\t', '\n']) {
        if part.trim().is_empty() || part.contains(begin) {
            continue;
        }
        if let Some((key, value)) = part.split_once('=') {
            record.set(key.trim(), value.trim());
        }
    }

    record
}
