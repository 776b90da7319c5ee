//! Point each chest item's `name_class` at its set row
//!
//! The client shows the set bonus of an item through `ItemName.name_class`,
//! which must equal the `num` of the `SetItemGrp` row listing that chest.

use crate::formats::block::{BlockKind, parse_blocks};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One rewritten `name_class`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameClassChange {
    pub item_id: u64,
    pub old: i64,
    pub new: u64,
}

/// Result of [`sync_name_class`]
#[derive(Debug, Clone, Default)]
pub struct NameClassSync {
    /// The rewritten `ItemName` text
    pub content: String,
    pub changes: Vec<NameClassChange>,
    /// Chest items whose `name_class` was already correct
    pub already_correct: usize,
}

/// Map chest item id → set row `num` from `SetItemGrp` text.
///
/// Chest ids are the first `{...}` group of `essential_setitem_id`. When an
/// item is listed by several rows the first row wins.
pub fn chest_assignments(set_text: &str) -> IndexMap<u64, u64> {
    let mut assignments = IndexMap::new();

    for record in parse_blocks(set_text, BlockKind::SetItemGroup) {
        let Some(num) = record.get("num").and_then(|n| n.trim().parse::<u64>().ok()) else {
            continue;
        };
        let Some(group) = record.get("essential_setitem_id").and_then(first_id_group) else {
            continue;
        };

        for id in group.split(';').map(str::trim).filter(|id| is_digits(id)) {
            if let Ok(id) = id.parse::<u64>() {
                assignments.entry(id).or_insert(num);
            }
        }
    }

    assignments
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// `{{1};{2}}` → `1`
fn first_id_group(value: &str) -> Option<&str> {
    let rest = value.strip_prefix("{{")?;
    let end = rest.find('}')?;
    (end > 0).then(|| &rest[..end])
}

/// Rewrite `name_class` of every chest item in `ItemName` text.
///
/// Only lines holding an `item_name_begin` block are touched, and only the
/// `name_class=` token within them, so every other byte is kept. Items
/// without an integer `name_class` are left alone.
pub fn sync_name_class(item_name_text: &str, assignments: &IndexMap<u64, u64>) -> NameClassSync {
    let begin = BlockKind::ItemName.begin_tag();
    let mut result = NameClassSync::default();

    let lines: Vec<String> = item_name_text
        .split('\n')
        .map(|line| {
            if !line.contains(begin) {
                return line.to_string();
            }
            rewrite_line(line, assignments, &mut result).unwrap_or_else(|| line.to_string())
        })
        .collect();

    result.content = lines.join("\n");
    result
}

fn rewrite_line(line: &str, assignments: &IndexMap<u64, u64>, result: &mut NameClassSync) -> Option<String> {
    let mut tokens: Vec<String> = line.split('\t').map(str::to_string).collect();

    let item_id = tokens.iter().find_map(|t| token_value(t, "id")?.parse::<u64>().ok())?;
    let new = *assignments.get(&item_id)?;

    let index = tokens.iter().position(|t| token_value(t, "name_class").is_some())?;
    let old: i64 = token_value(&tokens[index], "name_class")?.parse().ok()?;

    if u64::try_from(old).is_ok_and(|old| old == new) {
        result.already_correct += 1;
        return None;
    }

    // Keep any trailing `\r` or whitespace attached to the token
    let token = &tokens[index];
    let trailing = &token[token.trim_end().len()..];
    tokens[index] = format!("name_class={new}{trailing}");

    tracing::debug!("Updated item {}: name_class {} → {}", item_id, old, new);
    result.changes.push(NameClassChange { item_id, old, new });
    Some(tokens.join("\t"))
}

fn token_value<'a>(token: &'a str, key: &str) -> Option<&'a str> {
    let (k, v) = token.split_once('=')?;
    (k.trim() == key).then(|| v.trim())
}
