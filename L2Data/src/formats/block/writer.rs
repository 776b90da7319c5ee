//! Block file writing

use super::{BlockKind, BlockRecord};
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Write records to disk as a block file
///
/// This is a plain write; use [`crate::gateway::write_with_backup`] to keep
/// the previous version.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_block_file<P: AsRef<Path>>(path: P, records: &[BlockRecord], kind: BlockKind) -> Result<()> {
    fs::write(path, serialize_blocks(records, kind))?;
    Ok(())
}

/// Serialize records as one line per block, each terminated by `\n`
pub fn serialize_blocks(records: &[BlockRecord], kind: BlockKind) -> String {
    let mut content = String::new();
    for record in records {
        content.push_str(&serialize_record(record, kind));
        content.push('\n');
    }
    content
}

/// Serialize a single block without the trailing line break.
///
/// Families with a canonical key order emit those keys first, then any
/// other keys in insertion order. All other families keep insertion order.
pub fn serialize_record(record: &BlockRecord, kind: BlockKind) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(record.len() + 2);
    parts.push(kind.begin_tag().to_string());

    match kind.canonical_keys() {
        Some(keys) => {
            for key in keys {
                if let Some(value) = record.get(key) {
                    parts.push(format!("{key}={value}"));
                }
            }
            for (key, value) in record.iter() {
                if !keys.contains(&key) {
                    parts.push(format!("{key}={value}"));
                }
            }
        }
        None => {
            for (key, value) in record.iter() {
                parts.push(format!("{key}={value}"));
            }
        }
    }

    parts.push(kind.end_tag().to_string());
    parts.join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::block::parse_blocks;

    #[test]
    fn test_item_name_canonical_order() {
        let record = BlockRecord::from_pairs(
            BlockKind::ItemName,
            [("name", "[Sword]"), ("custom", "x"), ("id", "10"), ("color", "1")],
        );
        assert_eq!(
            serialize_record(&record, BlockKind::ItemName),
            "item_name_begin\tid=10\tname=[Sword]\tcolor=1\tcustom=x\titem_name_end"
        );
    }

    #[test]
    fn test_group_insertion_order() {
        let record = BlockRecord::from_pairs(
            BlockKind::Weapon,
            [("tag", "2"), ("object_id", "1"), ("weight", "")],
        );
        assert_eq!(
            serialize_record(&record, BlockKind::Weapon),
            "item_begin\ttag=2\tobject_id=1\tweight=\titem_end"
        );
    }

    #[test]
    fn test_round_trip_each_kind() {
        let samples = [
            BlockRecord::from_pairs(
                BlockKind::ItemName,
                [("id", "1"), ("name", "[Short Sword]"), ("additionalname", "[]"), ("description", "[Line\\nNext]"), ("name_class", "-1")],
            ),
            BlockRecord::from_pairs(
                BlockKind::Weapon,
                [("object_id", "1"), ("drop_type", "1"), ("icon", "{[icon.weapon_small_sword_i00];[None]}")],
            ),
            BlockRecord::from_pairs(BlockKind::Armor, [("object_id", "22"), ("crystal_type", "none")]),
            BlockRecord::from_pairs(BlockKind::EtcItem, [("object_id", "57"), ("weight", "0")]),
            BlockRecord::from_pairs(
                BlockKind::SkillName,
                [("skill_id", "3"), ("skill_level", "1"), ("skill_sublevel", "0"), ("name", "[Power Strike]"), ("desc", "[a\\\\nb]")],
            ),
            BlockRecord::from_pairs(
                BlockKind::SkillGroup,
                [("skill_id", "3"), ("skill_level", "1"), ("skill_sublevel", "0"), ("icon", "[icon.skill0003]"), ("mp_consume", "10")],
            ),
        ];

        for record in samples {
            let text = serialize_blocks(std::slice::from_ref(&record), record.kind);
            let parsed = parse_blocks(&text, record.kind);
            assert_eq!(parsed, vec![record]);
        }
    }
}
