//! Tab-delimited `*_begin ... key=value ... *_end` block files
//!
//! Used by the client data tables: `ItemName`, `Weapongrp`, `Armorgrp`,
//! `EtcItemgrp`, `SkillName`, `Skillgrp` and the generated `SetItemGrp`.
//! Every value is kept as raw text; numeric fields are parsed on demand by
//! the code that needs them.

mod fields;
mod raw;
mod reader;
mod writer;

pub use fields::{NewlineEscape, strip_brackets, wrap_brackets};
pub use raw::{RemovedBlocks, remove_blocks};
pub use reader::{parse_blocks, read_block_file};
pub use writer::{serialize_blocks, serialize_record, write_block_file};

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const ITEM_NAME_KEYS: &[&str] = &[
    "id",
    "name",
    "additionalname",
    "description",
    "popup",
    "default_action",
    "use_order",
    "name_class",
    "color",
    "Tooltip_Texture",
    "is_trade",
    "is_drop",
    "is_destruct",
    "is_private_store",
    "keep_type",
    "is_npctrade",
    "is_commission_store",
];

const SKILL_NAME_KEYS: &[&str] = &[
    "skill_id",
    "skill_level",
    "skill_sublevel",
    "name",
    "desc",
    "desc_param",
    "enchant_name",
    "enchant_name_param",
    "enchant_desc",
    "enchant_desc_param",
];

const ITEM_NAME_BRACKETS: &[&str] = &[
    "name",
    "additionalname",
    "description",
    "default_action",
    "Tooltip_Texture",
];

const SKILL_NAME_BRACKETS: &[&str] = &["name", "desc"];

const SKILL_IDENTITY: &[&str] = &["skill_id", "skill_level", "skill_sublevel"];

/// The record families stored in block format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    /// `ItemName_Classic-eu.txt`
    ItemName,
    /// `Weapongrp_Classic.txt`
    Weapon,
    /// `Armorgrp_Classic.txt`
    Armor,
    /// `EtcItemgrp_Classic.txt`
    #[serde(rename = "etc")]
    EtcItem,
    /// `SkillName_Classic-eu.txt`
    SkillName,
    /// `Skillgrp_Classic.txt`
    SkillGroup,
    /// Generated `SetItemGrp_Classic-eu.txt`
    SetItemGroup,
}

impl BlockKind {
    /// The three item group families that share `object_id` with `ItemName`
    pub const ITEM_GROUPS: [BlockKind; 3] = [BlockKind::Weapon, BlockKind::Armor, BlockKind::EtcItem];

    /// Marker opening a record
    pub fn begin_tag(self) -> &'static str {
        match self {
            BlockKind::ItemName => "item_name_begin",
            BlockKind::Weapon | BlockKind::Armor | BlockKind::EtcItem => "item_begin",
            BlockKind::SkillName | BlockKind::SkillGroup => "skill_begin",
            BlockKind::SetItemGroup => "setitem_group_begin",
        }
    }

    /// Marker closing a record
    pub fn end_tag(self) -> &'static str {
        match self {
            BlockKind::ItemName => "item_name_end",
            BlockKind::Weapon | BlockKind::Armor | BlockKind::EtcItem => "item_end",
            BlockKind::SkillName | BlockKind::SkillGroup => "skill_end",
            BlockKind::SetItemGroup => "setitem_group_end",
        }
    }

    /// Fields that together identify a record. The first one must be
    /// present and non-empty for a block to be kept.
    pub fn identity_fields(self) -> &'static [&'static str] {
        match self {
            BlockKind::ItemName => &["id"],
            BlockKind::Weapon | BlockKind::Armor | BlockKind::EtcItem => &["object_id"],
            BlockKind::SkillName | BlockKind::SkillGroup => SKILL_IDENTITY,
            BlockKind::SetItemGroup => &["num"],
        }
    }

    /// Fixed output order, `None` for families with open-ended key sets
    /// (those keep insertion order).
    pub fn canonical_keys(self) -> Option<&'static [&'static str]> {
        match self {
            BlockKind::ItemName => Some(ITEM_NAME_KEYS),
            BlockKind::SkillName => Some(SKILL_NAME_KEYS),
            _ => None,
        }
    }

    /// Text fields stored wrapped in `[...]`
    pub fn bracket_fields(self) -> &'static [&'static str] {
        match self {
            BlockKind::ItemName => ITEM_NAME_BRACKETS,
            BlockKind::SkillName => SKILL_NAME_BRACKETS,
            _ => &[],
        }
    }

    /// How line breaks are escaped inside description text
    pub fn newline_escape(self) -> NewlineEscape {
        match self {
            BlockKind::SkillName | BlockKind::SkillGroup => NewlineEscape::Double,
            _ => NewlineEscape::Single,
        }
    }

    pub fn is_bracket_field(self, field: &str) -> bool {
        self.bracket_fields().contains(&field)
    }

    pub fn is_item_group(self) -> bool {
        matches!(self, BlockKind::Weapon | BlockKind::Armor | BlockKind::EtcItem)
    }

    pub fn is_skill(self) -> bool {
        matches!(self, BlockKind::SkillName | BlockKind::SkillGroup)
    }

    /// Short tag used in logs and reports
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::ItemName => "item-name",
            BlockKind::Weapon => "weapon",
            BlockKind::Armor => "armor",
            BlockKind::EtcItem => "etc",
            BlockKind::SkillName => "skill-name",
            BlockKind::SkillGroup => "skill-group",
            BlockKind::SetItemGroup => "setitem-group",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a block record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKey {
    /// `id`, `object_id` or `num`
    Single(String),
    /// `(skill_id, skill_level, skill_sublevel)`
    Skill {
        id: String,
        level: String,
        sublevel: String,
    },
}

impl RecordKey {
    pub fn single(id: impl Into<String>) -> Self {
        RecordKey::Single(id.into())
    }

    pub fn skill(id: impl Into<String>, level: impl Into<String>, sublevel: impl Into<String>) -> Self {
        RecordKey::Skill {
            id: id.into(),
            level: level.into(),
            sublevel: sublevel.into(),
        }
    }

    /// The primary id (`id`, `object_id`, `num` or `skill_id`)
    pub fn id(&self) -> &str {
        match self {
            RecordKey::Single(id) | RecordKey::Skill { id, .. } => id,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Single(id) => f.write_str(id),
            RecordKey::Skill { id, level, sublevel } => {
                write!(f, "{id} level {level} sublevel {sublevel}")
            }
        }
    }
}

/// One `*_begin ... *_end` block: ordered raw key/value pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub kind: BlockKind,
    pub fields: IndexMap<String, String>,
}

impl BlockRecord {
    #[must_use]
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            fields: IndexMap::new(),
        }
    }

    /// Build a record from `(key, value)` pairs in order
    pub fn from_pairs<K, V, I>(kind: BlockKind, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            kind,
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Set a raw value. Existing keys keep their position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Remove a key, keeping the order of the others
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Identity of this record, `None` when the primary id is missing or empty
    pub fn identity(&self) -> Option<RecordKey> {
        let fields = self.kind.identity_fields();
        let id = self.get(fields[0]).filter(|v| !v.is_empty())?;

        if self.kind.is_skill() {
            Some(RecordKey::skill(
                id,
                self.get(fields[1]).unwrap_or_default(),
                self.get(fields[2]).unwrap_or_default(),
            ))
        } else {
            Some(RecordKey::single(id))
        }
    }

    /// Whether this record has exactly the given identity
    pub fn has_identity(&self, key: &RecordKey) -> bool {
        self.identity().is_some_and(|own| own == *key)
    }

    /// Editable text of a field: brackets stripped and escaped line breaks restored
    pub fn display_text(&self, field: &str) -> Option<String> {
        let raw = self.get(field)?;
        let text = if self.kind.is_bracket_field(field) {
            strip_brackets(raw)
        } else {
            raw
        };
        Some(self.kind.newline_escape().unescape(text))
    }

    /// Store edited text: line breaks escaped at this family's depth and
    /// bracket fields wrapped (`[]` when empty)
    pub fn set_display_text(&mut self, field: &str, text: &str) {
        let escaped = self.kind.newline_escape().escape(text);
        let value = if self.kind.is_bracket_field(field) {
            wrap_brackets(&escaped)
        } else {
            escaped
        };
        self.set(field, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_identity_is_composite() {
        let a = BlockRecord::from_pairs(
            BlockKind::SkillName,
            [("skill_id", "1000"), ("skill_level", "1"), ("skill_sublevel", "0")],
        );
        let b = BlockRecord::from_pairs(
            BlockKind::SkillName,
            [("skill_id", "1000"), ("skill_level", "2"), ("skill_sublevel", "0")],
        );
        assert_ne!(a.identity(), b.identity());
        assert_eq!(a.identity().unwrap().to_string(), "1000 level 1 sublevel 0");
    }

    #[test]
    fn test_empty_identity_is_none() {
        let record = BlockRecord::from_pairs(BlockKind::Weapon, [("object_id", ""), ("weight", "1")]);
        assert!(record.identity().is_none());
    }

    #[test]
    fn test_display_text_round_trip() {
        let mut record = BlockRecord::new(BlockKind::ItemName);
        record.set_display_text("description", "Line one\nLine two");
        assert_eq!(record.get("description"), Some("[Line one\\nLine two]"));
        assert_eq!(record.display_text("description").unwrap(), "Line one\nLine two");

        record.set_display_text("name", "");
        assert_eq!(record.get("name"), Some("[]"));
        assert_eq!(record.display_text("name").unwrap(), "");

        // Non-bracket fields are never wrapped
        record.set_display_text("color", "1");
        assert_eq!(record.get("color"), Some("1"));
    }

    #[test]
    fn test_skill_text_uses_double_escape() {
        let mut record = BlockRecord::new(BlockKind::SkillName);
        record.set_display_text("desc", "a\nb");
        assert_eq!(record.get("desc"), Some("[a\\\\nb]"));
        assert_eq!(record.display_text("desc").unwrap(), "a\nb");
    }

    #[test]
    fn test_set_keeps_position() {
        let mut record = BlockRecord::from_pairs(BlockKind::Armor, [("object_id", "1"), ("weight", "10"), ("tag", "0")]);
        record.set("weight", "20");
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["object_id", "weight", "tag"]);
    }
}
