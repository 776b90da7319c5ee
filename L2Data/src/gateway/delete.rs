//! Deleting records straight from the files

use std::fs;

use super::{OperationReport, write_with_backup};
use crate::config::DataLayout;
use crate::error::Result;
use crate::formats::block::{BlockKind, BlockRecord, RecordKey, remove_blocks};
use crate::store::skill_matches;

/// Remove an item from `ItemName` and the three group files
pub fn delete_item_everywhere(layout: &DataLayout, item_id: &str) -> OperationReport {
    let item_id = item_id.trim();
    if item_id.is_empty() {
        return OperationReport::failed("Item ID is required");
    }

    let key = RecordKey::single(item_id);
    let kinds = [BlockKind::ItemName, BlockKind::Weapon, BlockKind::Armor, BlockKind::EtcItem];
    delete_everywhere(layout, &kinds, &format!("Item {item_id}"), |r| r.has_identity(&key))
}

/// Remove skill rows from `SkillName` and `Skillgrp`. A `None` level or
/// sublevel matches every value.
pub fn delete_skill_everywhere(
    layout: &DataLayout,
    skill_id: &str,
    level: Option<&str>,
    sublevel: Option<&str>,
) -> OperationReport {
    let skill_id = skill_id.trim();
    if skill_id.is_empty() {
        return OperationReport::failed("Skill ID is required");
    }

    let kinds = [BlockKind::SkillName, BlockKind::SkillGroup];
    delete_everywhere(layout, &kinds, &format!("Skill {skill_id}"), |r| {
        skill_matches(r, skill_id, level, sublevel)
    })
}

fn delete_everywhere<F>(layout: &DataLayout, kinds: &[BlockKind], subject: &str, matches: F) -> OperationReport
where
    F: Fn(&BlockRecord) -> bool,
{
    let mut deleted_from = Vec::new();
    let mut errors = Vec::new();

    for &kind in kinds {
        match delete_from_file(layout, kind, &matches) {
            Ok(0) => {}
            Ok(removed) => {
                tracing::info!("Removed {} {} block(s) for {}", removed, kind, subject);
                deleted_from.push(kind.name().to_string());
            }
            Err(e) => errors.push(format!("{kind}: {e}")),
        }
    }

    let mut report = if deleted_from.is_empty() {
        OperationReport::failed(format!("{subject} not found in any files"))
    } else {
        let mut report = OperationReport::ok(format!("{subject} deleted from: {}", deleted_from.join(", ")));
        report.deleted_from = Some(deleted_from);
        report
    };
    for error in errors {
        report.push_error(error);
    }
    report
}

/// Returns the number of blocks removed; the file is only rewritten when
/// that is not zero
fn delete_from_file<F>(layout: &DataLayout, kind: BlockKind, matches: &F) -> Result<usize>
where
    F: Fn(&BlockRecord) -> bool,
{
    let path = layout.block_file(kind);
    let content = fs::read_to_string(&path)?;
    let result = remove_blocks(&content, kind, matches);
    if result.removed > 0 {
        write_with_backup(&path, &result.content)?;
    }
    Ok(result.removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::backup_path;

    fn write(layout: &DataLayout, kind: BlockKind, content: &str) {
        let path = layout.block_file(kind);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_delete_item_cascades_and_backs_up() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path().to_string_lossy());
        write(
            &layout,
            BlockKind::ItemName,
            "item_name_begin\tid=1\tname=[A]\titem_name_end\nitem_name_begin\tid=2\tname=[B]\titem_name_end\n",
        );
        write(&layout, BlockKind::Weapon, "item_begin\tobject_id=2\titem_end\n");
        write(&layout, BlockKind::Armor, "item_begin\tobject_id=3\titem_end\n");

        let report = delete_item_everywhere(&layout, "2");
        assert!(report.success);
        assert_eq!(report.message, "Item 2 deleted from: item-name, weapon");
        assert_eq!(report.deleted_from, Some(vec!["item-name".to_string(), "weapon".to_string()]));
        // EtcItemgrp does not exist
        assert_eq!(report.error_count(), 1);

        let item_name = fs::read_to_string(layout.block_file(BlockKind::ItemName)).unwrap();
        assert_eq!(item_name, "item_name_begin\tid=1\tname=[A]\titem_name_end\n");
        assert!(backup_path(&layout.block_file(BlockKind::Weapon)).exists());
        // Untouched files are not rewritten
        assert!(!backup_path(&layout.block_file(BlockKind::Armor)).exists());
    }

    #[test]
    fn test_delete_missing_is_not_success() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path().to_string_lossy());
        write(&layout, BlockKind::SkillName, "skill_begin\tskill_id=1\tskill_level=1\tskill_sublevel=0\tskill_end\n");
        write(&layout, BlockKind::SkillGroup, "");

        let report = delete_skill_everywhere(&layout, "2", None, None);
        assert!(!report.success);
        assert_eq!(report.message, "Skill 2 not found in any files");
        assert_eq!(report.errors, None);

        assert!(!delete_skill_everywhere(&layout, " ", None, None).success);
    }
}
