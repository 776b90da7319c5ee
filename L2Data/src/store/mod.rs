//! In-memory record store
//!
//! Holds every block family loaded from a data root. Edits mutate the
//! records in place; nothing touches disk until the gateway saves a family.

mod items;
mod skills;

pub use skills::{DuplicateSkill, DuplicatedSkill, ModifierKind, SkillModifier};
pub(crate) use skills::skill_matches;

use crate::config::DataLayout;
use crate::error::{Error, Result};
use crate::formats::block::{BlockKind, BlockRecord, RecordKey, read_block_file, serialize_blocks};

/// All block records of one data root
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    pub item_names: Vec<BlockRecord>,
    pub weapons: Vec<BlockRecord>,
    pub armors: Vec<BlockRecord>,
    pub etc_items: Vec<BlockRecord>,
    pub skill_names: Vec<BlockRecord>,
    pub skill_groups: Vec<BlockRecord>,
    /// Generated `SetItemGrp` rows
    pub set_items: Vec<BlockRecord>,
}

impl DataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The families a store holds, in load order
    pub const KINDS: [BlockKind; 7] = [
        BlockKind::ItemName,
        BlockKind::Weapon,
        BlockKind::Armor,
        BlockKind::EtcItem,
        BlockKind::SkillName,
        BlockKind::SkillGroup,
        BlockKind::SetItemGroup,
    ];

    /// Load every family from the layout.
    ///
    /// Missing skill and set files load as empty lists; the item files are
    /// required.
    ///
    /// # Errors
    /// Returns an error if a required file is missing or unreadable.
    pub fn load(layout: &DataLayout) -> Result<Self> {
        let mut store = Self::new();
        for kind in Self::KINDS {
            let path = layout.block_file(kind);
            if is_optional(kind) && !path.exists() {
                tracing::warn!("{} not found, starting with no {} records", path.display(), kind);
                continue;
            }
            *store.records_mut(kind) = read_block_file(&path, kind)?;
            tracing::debug!("Loaded {} {} records", store.records(kind).len(), kind);
        }
        Ok(store)
    }

    pub fn records(&self, kind: BlockKind) -> &[BlockRecord] {
        match kind {
            BlockKind::ItemName => &self.item_names,
            BlockKind::Weapon => &self.weapons,
            BlockKind::Armor => &self.armors,
            BlockKind::EtcItem => &self.etc_items,
            BlockKind::SkillName => &self.skill_names,
            BlockKind::SkillGroup => &self.skill_groups,
            BlockKind::SetItemGroup => &self.set_items,
        }
    }

    pub fn records_mut(&mut self, kind: BlockKind) -> &mut Vec<BlockRecord> {
        match kind {
            BlockKind::ItemName => &mut self.item_names,
            BlockKind::Weapon => &mut self.weapons,
            BlockKind::Armor => &mut self.armors,
            BlockKind::EtcItem => &mut self.etc_items,
            BlockKind::SkillName => &mut self.skill_names,
            BlockKind::SkillGroup => &mut self.skill_groups,
            BlockKind::SetItemGroup => &mut self.set_items,
        }
    }

    pub fn get(&self, kind: BlockKind, key: &RecordKey) -> Option<&BlockRecord> {
        self.records(kind).iter().find(|r| r.has_identity(key))
    }

    pub fn get_mut(&mut self, kind: BlockKind, key: &RecordKey) -> Option<&mut BlockRecord> {
        self.records_mut(kind).iter_mut().find(|r| r.has_identity(key))
    }

    /// Like [`DataStore::get_mut`] but a missing record is an error
    pub(crate) fn require_mut(&mut self, kind: BlockKind, key: &RecordKey) -> Result<&mut BlockRecord> {
        self.get_mut(kind, key).ok_or_else(|| Error::RecordNotFound {
            kind,
            key: key.to_string(),
        })
    }

    /// Flip a `0`/`1` flag. Any value other than `1` becomes `1`.
    ///
    /// # Returns
    /// The new value
    ///
    /// # Errors
    /// Returns an error if the record does not exist.
    pub fn toggle_flag(&mut self, kind: BlockKind, key: &RecordKey, field: &str) -> Result<String> {
        let record = self.require_mut(kind, key)?;
        let value = if record.get(field) == Some("1") { "0" } else { "1" };
        record.set(field, value);
        Ok(value.to_string())
    }

    /// Serialize one family back to file text
    pub fn serialize(&self, kind: BlockKind) -> String {
        serialize_blocks(self.records(kind), kind)
    }

    /// Total number of records across all families
    pub fn len(&self) -> usize {
        Self::KINDS.iter().map(|kind| self.records(*kind).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Families a data root may lack
fn is_optional(kind: BlockKind) -> bool {
    kind.is_skill() || kind == BlockKind::SetItemGroup
}
