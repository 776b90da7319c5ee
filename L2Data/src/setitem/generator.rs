//! `SetItemGrp` row generation from `armor_sets.xml`

use super::describe::describe_effects;
use crate::formats::block::{BlockKind, BlockRecord, serialize_blocks};
use crate::formats::xml::skills::load_skill;
use crate::formats::xml::{ArmorSet, SkillDefinition};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Description used when a skill exists but has no describable modifier
pub const NO_SET_EFFECT: &str = "No set effect";

/// Where skill definitions come from during generation
pub trait SkillSource: Sync {
    /// The skill with this id, or `None` if it cannot be found
    fn skill(&self, skill_id: &str) -> Option<SkillDefinition>;
}

/// Skill definitions read from `<lo>-<hi>.xml` bucket files
#[derive(Debug, Clone)]
pub struct SkillDirectory {
    pub dir: PathBuf,
    pub bucket_width: u32,
}

impl SkillDirectory {
    pub fn new(dir: impl Into<PathBuf>, bucket_width: u32) -> Self {
        Self {
            dir: dir.into(),
            bucket_width,
        }
    }
}

impl SkillSource for SkillDirectory {
    fn skill(&self, skill_id: &str) -> Option<SkillDefinition> {
        match load_skill(&self.dir, skill_id, self.bucket_width) {
            Ok(skill) => skill,
            Err(e) => {
                tracing::debug!("Skill {} lookup failed: {}", skill_id, e);
                None
            }
        }
    }
}

impl SkillSource for Vec<SkillDefinition> {
    fn skill(&self, skill_id: &str) -> Option<SkillDefinition> {
        self.iter().find(|skill| skill.id == skill_id).cloned()
    }
}

/// Bonus text for one skill, `None` when the skill cannot be found
pub fn skill_description<S: SkillSource + ?Sized>(source: &S, skill_id: &str) -> Option<String> {
    let skill = source.skill(skill_id)?;
    let description = describe_effects(&skill.effects);
    if description.is_empty() {
        Some(NO_SET_EFFECT.to_string())
    } else {
        Some(description)
    }
}

/// One generated `setitem_group` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEntry {
    pub num: usize,
    /// Chest, legs, head, gloves, feet (present pieces only)
    pub essential_ids: Vec<String>,
    /// Bracketed descriptions, padded to one less than the piece count
    pub essential_desc: Vec<String>,
    pub additional_id: Option<String>,
    /// Bracketed shield description
    pub additional_desc: Option<String>,
}

impl SetEntry {
    /// Build the entry for the set at position `num`
    pub fn build<S: SkillSource + ?Sized>(num: usize, set: &ArmorSet, source: &S) -> Self {
        let essential_ids: Vec<String> = set.essential_items().into_iter().map(str::to_string).collect();

        let mut essential_desc: Vec<String> = set
            .skill_ids()
            .into_iter()
            .filter_map(|id| skill_description(source, id))
            .collect();

        while essential_desc.len() < essential_ids.len().saturating_sub(1) {
            essential_desc.insert(0, format!("[{NO_SET_EFFECT}]"));
        }
        repair_brackets(&mut essential_desc);

        let additional_id = set.shield.clone();
        let additional_desc = if additional_id.is_some() {
            // Only the last shield skill that resolves is kept
            set.shield_skill_ids()
                .into_iter()
                .rev()
                .find_map(|id| skill_description(source, id))
                .map(|desc| format!("[{desc}]"))
        } else {
            None
        };

        Self {
            num,
            essential_ids,
            essential_desc,
            additional_id,
            additional_desc,
        }
    }

    /// The entry as a `SetItemGroup` block record
    pub fn to_record(&self) -> BlockRecord {
        let ids = self
            .essential_ids
            .iter()
            .map(|id| format!("{{{id}}}"))
            .collect::<Vec<_>>()
            .join(";");
        let additional_id = self
            .additional_id
            .as_ref()
            .map(|id| format!("{{{id}}}"))
            .unwrap_or_default();

        BlockRecord::from_pairs(
            BlockKind::SetItemGroup,
            [
                ("num", self.num.to_string()),
                ("essential_setitem_id", format!("{{{ids}}}")),
                ("essential_setitem_desc", format!("{{{}}}", self.essential_desc.join(";"))),
                ("additional_setitem_id", format!("{{{additional_id}}}")),
                (
                    "additional_setitem_desc",
                    format!("{{{}}}", self.additional_desc.as_deref().unwrap_or_default()),
                ),
                ("unk1", "0".to_string()),
                ("unk2", "0".to_string()),
                ("enchant_setitem_condition", "{}".to_string()),
            ],
        )
    }
}

/// Bracket every description.
///
/// When the first entry is not bracketed the last entry is wrapped first,
/// even if it already carries brackets. This matches files produced by the
/// existing client tooling and is kept as is.
fn repair_brackets(descriptions: &mut [String]) {
    let first_unwrapped = descriptions.first().is_some_and(|first| !first.starts_with('['));
    if first_unwrapped {
        if let Some(last) = descriptions.last_mut() {
            *last = format!("[{last}]");
        }
    }
    for desc in descriptions.iter_mut() {
        if !desc.starts_with('[') {
            *desc = format!("[{desc}]");
        }
    }
}

/// Generate one entry per armor set, `num` following document order.
///
/// Skill lookups run in parallel; the result keeps the input order.
pub fn generate_set_entries<S: SkillSource>(sets: &[ArmorSet], source: &S) -> Vec<SetEntry> {
    sets.par_iter()
        .enumerate()
        .map(|(num, set)| SetEntry::build(num, set, source))
        .collect()
}

/// Render entries as `SetItemGrp` file text (one row per line)
pub fn render_set_file(entries: &[SetEntry]) -> String {
    let records: Vec<BlockRecord> = entries.iter().map(SetEntry::to_record).collect();
    serialize_blocks(&records, BlockKind::SetItemGroup)
}
