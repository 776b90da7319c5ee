//! Skill edits across `SkillName` and `Skillgrp`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DataStore;
use super::items::next_id;
use crate::error::{Error, Result};
use crate::formats::block::{BlockKind, BlockRecord, RecordKey, strip_brackets};

/// How a modifier changes a numeric skill group field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    Add,
    Multiply,
    Set,
}

/// A change applied to `mp_consume`, `hp_consume` or `cast_range` of copied
/// skill group rows. A zero modifier changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillModifier {
    pub kind: ModifierKind,
    pub value: f64,
}

impl SkillModifier {
    pub fn new(kind: ModifierKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// The modified value, `None` when this modifier leaves it alone
    fn apply(&self, current: &str) -> Option<String> {
        if current.is_empty() || self.value == 0.0 {
            return None;
        }
        let current = parse_number(current);
        let result = match self.kind {
            ModifierKind::Add => current + self.value,
            ModifierKind::Multiply => current * self.value,
            ModifierKind::Set => self.value,
        };
        Some(format_number(result))
    }
}

/// `add:10`, `multiply:1.5` (or `mul:1.5`), `set:100`
impl FromStr for SkillModifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, value) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidFormat(format!("expected <add|multiply|set>:<number>, got {s}")))?;
        let kind = match kind.trim() {
            "add" => ModifierKind::Add,
            "multiply" | "mul" => ModifierKind::Multiply,
            "set" => ModifierKind::Set,
            other => return Err(Error::InvalidFormat(format!("unknown modifier type: {other}"))),
        };
        let value = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::InvalidFormat(format!("modifier value is not a number: {value}")))?;
        Ok(Self { kind, value })
    }
}

impl fmt::Display for SkillModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ModifierKind::Add => "add",
            ModifierKind::Multiply => "multiply",
            ModifierKind::Set => "set",
        };
        write!(f, "{kind}:{}", format_number(self.value))
    }
}

fn parse_number(value: &str) -> f64 {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Whole numbers print without a fraction (`15`, not `15.0`)
fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Options for [`DataStore::duplicate_skill`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicateSkill {
    /// Target id; the next free id when `None`
    pub new_id: Option<String>,
    /// Name of every copied level; `Copy of <name>` when `None`
    pub name: Option<String>,
    pub mp_consume: Option<SkillModifier>,
    pub hp_consume: Option<SkillModifier>,
    pub cast_range: Option<SkillModifier>,
}

/// Result of [`DataStore::duplicate_skill`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicatedSkill {
    pub new_id: String,
    pub name: String,
    /// `SkillName` rows copied
    pub levels: usize,
    /// `Skillgrp` rows copied
    pub group_rows: usize,
}

impl DataStore {
    /// Every `SkillName` level of a skill, in file order
    pub fn skill_levels(&self, skill_id: &str) -> Vec<&BlockRecord> {
        self.skill_names
            .iter()
            .filter(|r| r.get("skill_id") == Some(skill_id))
            .collect()
    }

    /// Store edited text in a `SkillName` field
    ///
    /// # Errors
    /// Returns an error if the skill level does not exist.
    pub fn set_skill_text(&mut self, key: &RecordKey, field: &str, text: &str) -> Result<()> {
        self.require_mut(BlockKind::SkillName, key)?.set_display_text(field, text);
        Ok(())
    }

    /// Set a raw value on a `Skillgrp` row
    ///
    /// # Errors
    /// Returns an error if the row does not exist.
    pub fn set_skill_group_field(&mut self, key: &RecordKey, field: &str, value: &str) -> Result<()> {
        self.require_mut(BlockKind::SkillGroup, key)?.set(field, value);
        Ok(())
    }

    /// Move one skill level to another `skill_id` in both skill files.
    ///
    /// # Returns
    /// The new identity
    ///
    /// # Errors
    /// Returns an error if the new id is empty, if another row already has
    /// the new identity, or if the level does not exist in `SkillName`.
    pub fn rename_skill_id(&mut self, key: &RecordKey, new_id: &str) -> Result<RecordKey> {
        let RecordKey::Skill { id, level, sublevel } = key else {
            return Err(Error::InvalidFormat(format!("not a skill identity: {key}")));
        };

        let new_id = new_id.trim();
        if new_id.is_empty() {
            return Err(Error::EmptyIdentity {
                field: "Skill ID".to_string(),
            });
        }

        let new_key = RecordKey::skill(new_id, level.as_str(), sublevel.as_str());
        if new_id == id.as_str() {
            return Ok(new_key);
        }
        if self.get(BlockKind::SkillName, key).is_none() {
            return Err(Error::RecordNotFound {
                kind: BlockKind::SkillName,
                key: key.to_string(),
            });
        }
        for kind in [BlockKind::SkillName, BlockKind::SkillGroup] {
            if self.get(kind, &new_key).is_some() {
                return Err(Error::DuplicateIdentity {
                    kind,
                    key: new_key.to_string(),
                });
            }
        }

        for kind in [BlockKind::SkillName, BlockKind::SkillGroup] {
            if let Some(record) = self.get_mut(kind, key) {
                record.set("skill_id", new_id);
            }
        }

        tracing::info!("Skill {} renamed to {}", key, new_key);
        Ok(new_key)
    }

    /// Remove skill rows from both skill lists. `None` for level or
    /// sublevel matches every value.
    ///
    /// # Returns
    /// The families a row was removed from
    pub fn delete_skill(&mut self, skill_id: &str, level: Option<&str>, sublevel: Option<&str>) -> Vec<BlockKind> {
        let mut deleted_from = Vec::new();

        for kind in [BlockKind::SkillName, BlockKind::SkillGroup] {
            let records = self.records_mut(kind);
            let before = records.len();
            records.retain(|r| !skill_matches(r, skill_id, level, sublevel));
            if records.len() != before {
                deleted_from.push(kind);
            }
        }

        deleted_from
    }

    /// Copy every level of a skill to a new id.
    ///
    /// `SkillName` copies get the new name; `Skillgrp` copies get the
    /// modifiers applied to fields that are present. All copies are
    /// appended in source order.
    ///
    /// # Errors
    /// Returns an error if the skill has no `SkillName` rows, or if the
    /// requested id is empty or already used.
    pub fn duplicate_skill(&mut self, skill_id: &str, options: &DuplicateSkill) -> Result<DuplicatedSkill> {
        let levels: Vec<BlockRecord> = self.skill_levels(skill_id).into_iter().cloned().collect();
        let Some(first) = levels.first() else {
            return Err(Error::RecordNotFound {
                kind: BlockKind::SkillName,
                key: skill_id.to_string(),
            });
        };

        let new_id = match options.new_id.as_deref().map(str::trim) {
            Some("") => {
                return Err(Error::EmptyIdentity {
                    field: "Skill ID".to_string(),
                });
            }
            Some(id) => {
                for (kind, records) in [
                    (BlockKind::SkillName, &self.skill_names),
                    (BlockKind::SkillGroup, &self.skill_groups),
                ] {
                    if records.iter().any(|r| r.get("skill_id") == Some(id)) {
                        return Err(Error::DuplicateIdentity {
                            kind,
                            key: id.to_string(),
                        });
                    }
                }
                id.to_string()
            }
            None => next_id(&self.skill_names, "skill_id")
                .max(next_id(&self.skill_groups, "skill_id"))
                .to_string(),
        };

        let name = options.name.clone().unwrap_or_else(|| {
            let original = first.get("name").map(strip_brackets).unwrap_or_default();
            format!("Copy of {original}")
        });

        let group_rows: Vec<BlockRecord> = self
            .skill_groups
            .iter()
            .filter(|r| r.get("skill_id") == Some(skill_id))
            .map(|r| {
                let mut copy = r.clone();
                copy.set("skill_id", new_id.as_str());
                for (field, modifier) in [
                    ("mp_consume", options.mp_consume),
                    ("hp_consume", options.hp_consume),
                    ("cast_range", options.cast_range),
                ] {
                    let updated = modifier.zip(r.get(field)).and_then(|(m, current)| m.apply(current));
                    if let Some(value) = updated {
                        copy.set(field, value);
                    }
                }
                copy
            })
            .collect();

        let result = DuplicatedSkill {
            new_id: new_id.clone(),
            name: name.clone(),
            levels: levels.len(),
            group_rows: group_rows.len(),
        };

        self.skill_names.extend(levels.into_iter().map(|mut record| {
            record.set("skill_id", new_id.as_str());
            record.set_display_text("name", &name);
            record
        }));
        self.skill_groups.extend(group_rows);

        tracing::info!(
            "Skill {} duplicated as {} ({} levels, {} group rows)",
            skill_id,
            result.new_id,
            result.levels,
            result.group_rows
        );
        Ok(result)
    }
}

pub(crate) fn skill_matches(record: &BlockRecord, skill_id: &str, level: Option<&str>, sublevel: Option<&str>) -> bool {
    record.get("skill_id") == Some(skill_id)
        && level.is_none_or(|level| record.get("skill_level") == Some(level))
        && sublevel.is_none_or(|sublevel| record.get("skill_sublevel") == Some(sublevel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::block::parse_blocks;
    use crate::store::tests::sample_store;

    #[test]
    fn test_modifier_parse_and_apply() {
        let add: SkillModifier = "add:5".parse().unwrap();
        assert_eq!(add, SkillModifier::new(ModifierKind::Add, 5.0));
        assert_eq!(add.apply("10"), Some("15".to_string()));
        assert_eq!(add.apply(""), None);

        let mul: SkillModifier = "mul:1.5".parse().unwrap();
        assert_eq!(mul.apply("10"), Some("15".to_string()));
        assert_eq!(mul.apply("3"), Some("4.5".to_string()));

        let set: SkillModifier = "set:900".parse().unwrap();
        assert_eq!(set.apply("40"), Some("900".to_string()));
        assert_eq!(set.to_string(), "set:900");

        let zero: SkillModifier = "add:0".parse().unwrap();
        assert_eq!(zero.apply("10"), None);

        assert!("pow:2".parse::<SkillModifier>().is_err());
        assert!("add:abc".parse::<SkillModifier>().is_err());
        assert!("add".parse::<SkillModifier>().is_err());
    }

    #[test]
    fn test_rename_skill_id_both_files() {
        let mut store = sample_store();
        let key = RecordKey::skill("1000", "2", "0");
        let new_key = store.rename_skill_id(&key, " 2000 ").unwrap();
        assert_eq!(new_key, RecordKey::skill("2000", "2", "0"));

        assert!(store.get(BlockKind::SkillName, &new_key).is_some());
        assert!(store.get(BlockKind::SkillGroup, &new_key).is_some());
        assert!(store.get(BlockKind::SkillName, &key).is_none());
        // Level 1 is untouched
        assert!(store.get(BlockKind::SkillName, &RecordKey::skill("1000", "1", "0")).is_some());
    }

    #[test]
    fn test_rename_rejects_duplicate_and_empty() {
        let mut store = sample_store();
        let key = RecordKey::skill("1001", "1", "0");

        let err = store.rename_skill_id(&key, "1000").unwrap_err();
        assert!(matches!(err, Error::DuplicateIdentity { kind: BlockKind::SkillName, .. }));
        assert_eq!(err.to_string(), "skill-name 1000 level 1 sublevel 0 already exists");

        let err = store.rename_skill_id(&key, "  ").unwrap_err();
        assert_eq!(err.to_string(), "Skill ID cannot be empty");

        // Renaming to itself is a no-op
        assert_eq!(store.rename_skill_id(&key, "1001").unwrap(), key);
        assert!(store.rename_skill_id(&RecordKey::single("1"), "2").is_err());
    }

    #[test]
    fn test_delete_skill_levels() {
        let mut store = sample_store();
        let deleted = store.delete_skill("1000", Some("1"), None);
        assert_eq!(deleted, vec![BlockKind::SkillName, BlockKind::SkillGroup]);
        assert_eq!(store.skill_levels("1000").len(), 1);

        store.delete_skill("1000", None, None);
        assert!(store.skill_levels("1000").is_empty());
        assert_eq!(store.skill_groups.len(), 1);
        assert!(store.delete_skill("1000", None, None).is_empty());
    }

    #[test]
    fn test_duplicate_skill_defaults() {
        let mut store = sample_store();
        let result = store.duplicate_skill("1000", &DuplicateSkill::default()).unwrap();
        assert_eq!(
            result,
            DuplicatedSkill {
                new_id: "1002".to_string(),
                name: "Copy of Bash".to_string(),
                levels: 2,
                group_rows: 2,
            }
        );

        let copies = store.skill_levels("1002");
        assert_eq!(copies.len(), 2);
        assert_eq!(copies[1].get("skill_level"), Some("2"));
        assert_eq!(copies[1].get("name"), Some("[Copy of Bash]"));
        assert_eq!(store.skill_groups.last().unwrap().get("mp_consume"), Some("12"));
    }

    #[test]
    fn test_duplicate_skill_with_modifiers() {
        let mut store = sample_store();
        let options = DuplicateSkill {
            new_id: Some("5000".to_string()),
            name: Some("Power Bash".to_string()),
            mp_consume: Some(SkillModifier::new(ModifierKind::Multiply, 1.5)),
            hp_consume: Some(SkillModifier::new(ModifierKind::Add, 10.0)),
            cast_range: Some(SkillModifier::new(ModifierKind::Set, 600.0)),
        };
        store.duplicate_skill("1000", &options).unwrap();

        let rows: Vec<&BlockRecord> = store
            .skill_groups
            .iter()
            .filter(|r| r.get("skill_id") == Some("5000"))
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("mp_consume"), Some("15"));
        assert_eq!(rows[1].get("mp_consume"), Some("18"));
        assert_eq!(rows[0].get("cast_range"), Some("600"));
        // Absent fields stay absent
        assert_eq!(rows[0].get("hp_consume"), None);
        assert_eq!(store.skill_levels("5000")[0].get("name"), Some("[Power Bash]"));

        let clash = store.duplicate_skill("1001", &options).unwrap_err();
        assert!(matches!(clash, Error::DuplicateIdentity { .. }));
        assert!(store.duplicate_skill("404", &DuplicateSkill::default()).is_err());
    }

    #[test]
    fn test_duplicate_skill_id_taken_in_group_file_only() {
        let mut store = sample_store();
        store.skill_groups.extend(parse_blocks(
            "skill_begin\tskill_id=7000\tskill_level=1\tskill_sublevel=0\tmp_consume=1\tskill_end\n",
            BlockKind::SkillGroup,
        ));
        let options = DuplicateSkill {
            new_id: Some("7000".to_string()),
            ..DuplicateSkill::default()
        };
        let clash = store.duplicate_skill("1000", &options).unwrap_err();
        assert!(matches!(clash, Error::DuplicateIdentity { kind: BlockKind::SkillGroup, .. }));
        assert!(store.skill_levels("7000").is_empty());

        // The default id skips past ids used only by the group file
        let result = store.duplicate_skill("1000", &DuplicateSkill::default()).unwrap();
        assert_eq!(result.new_id, "7001");
    }

    #[test]
    fn test_duplicate_skill_keeps_bracketed_name() {
        let mut store = sample_store();
        let options = DuplicateSkill {
            name: Some("[Bash II]".to_string()),
            ..DuplicateSkill::default()
        };
        let result = store.duplicate_skill("1001", &options).unwrap();
        assert_eq!(store.skill_levels(&result.new_id)[0].get("name"), Some("[Bash II]"));
    }

    #[test]
    fn test_set_skill_text_double_escape() {
        let mut store = sample_store();
        let key = RecordKey::skill("1001", "1", "0");
        store.set_skill_text(&key, "desc", "Hits hard.\nStuns.").unwrap();
        let record = store.get(BlockKind::SkillName, &key).unwrap();
        assert_eq!(record.get("desc"), Some("[Hits hard.\\\\nStuns.]"));

        store.set_skill_group_field(&key, "mp_consume", "7").unwrap();
        assert_eq!(store.get(BlockKind::SkillGroup, &key).unwrap().get("mp_consume"), Some("7"));
    }
}
