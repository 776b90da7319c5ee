//! Removing whole blocks from raw file text
//!
//! Deleting through the raw text leaves every other byte of the file as it
//! was, so records that were never loaded or edited are not reformatted.

use super::reader::parse_fragment;
use super::{BlockKind, BlockRecord};

/// Result of [`remove_blocks`]
#[derive(Debug, Clone)]
pub struct RemovedBlocks {
    /// The file text with matching blocks removed
    pub content: String,
    /// Number of blocks removed
    pub removed: usize,
}

/// Remove every block of `kind` for which `matches` returns true
pub fn remove_blocks<F>(content: &str, kind: BlockKind, matches: F) -> RemovedBlocks
where
    F: Fn(&BlockRecord) -> bool,
{
    let begin = kind.begin_tag();
    let end = kind.end_tag();
    let fragments: Vec<&str> = content.split(end).collect();
    let last = fragments.len() - 1;

    let mut output = String::with_capacity(content.len());
    let mut removed = 0;

    for (index, fragment) in fragments.iter().enumerate() {
        if fragment.contains(begin) && matches(&parse_fragment(fragment, kind)) {
            removed += 1;
            continue;
        }
        // A removed leading block takes its line break with it
        let fragment = if output.is_empty() && removed > 0 {
            fragment.trim_start_matches(['\r', '\n'])
        } else {
            fragment
        };
        output.push_str(fragment);
        if index < last {
            output.push_str(end);
        }
    }

    RemovedBlocks { content: output, removed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::block::RecordKey;

    #[test]
    fn test_remove_keeps_other_bytes() {
        let content = "item_begin\tobject_id=1\tx=a\titem_end\r\nitem_begin\tobject_id=2\titem_end\r\nitem_begin\tobject_id=3\titem_end\r\n";
        let result = remove_blocks(content, BlockKind::Weapon, |r| r.get("object_id") == Some("2"));
        assert_eq!(result.removed, 1);
        assert_eq!(
            result.content,
            "item_begin\tobject_id=1\tx=a\titem_end\r\nitem_begin\tobject_id=3\titem_end\r\n"
        );
    }

    #[test]
    fn test_remove_first_block_leaves_no_blank_line() {
        let content = "item_begin\tobject_id=1\titem_end\r\nitem_begin\tobject_id=2\titem_end\r\nitem_begin\tobject_id=3\titem_end\r\n";
        let result = remove_blocks(content, BlockKind::Weapon, |r| r.get("object_id") == Some("1"));
        assert_eq!(result.removed, 1);
        assert_eq!(
            result.content,
            "item_begin\tobject_id=2\titem_end\r\nitem_begin\tobject_id=3\titem_end\r\n"
        );

        let all = remove_blocks(content, BlockKind::Weapon, |_| true);
        assert_eq!(all.removed, 3);
        assert_eq!(all.content, "");
    }

    #[test]
    fn test_remove_nothing_is_identity() {
        let content = "skill_begin\tskill_id=1\tskill_end\nskill_begin\tskill_id=2\tskill_end";
        let result = remove_blocks(content, BlockKind::SkillName, |_| false);
        assert_eq!(result.removed, 0);
        assert_eq!(result.content, content);
    }

    #[test]
    fn test_remove_exact_skill_level() {
        let content = "skill_begin\tskill_id=1000\tskill_level=1\tskill_sublevel=0\tskill_end\n\
                       skill_begin\tskill_id=1000\tskill_level=2\tskill_sublevel=0\tskill_end\n";
        let key = RecordKey::skill("1000", "1", "0");
        let result = remove_blocks(content, BlockKind::SkillGroup, |r| r.has_identity(&key));
        assert_eq!(result.removed, 1);
        assert!(result.content.contains("skill_level=2"));
        assert!(!result.content.contains("skill_level=1"));
    }
}
