//! Item edits: `ItemName` plus the weapon, armor and etc group rows

use super::DataStore;
use crate::error::Result;
use crate::formats::block::{BlockKind, BlockRecord, RecordKey, strip_brackets};

impl DataStore {
    /// The group row sharing `object_id` with an item, searched in weapon,
    /// armor, then etc order
    pub fn group_record(&self, item_id: &str) -> Option<(BlockKind, &BlockRecord)> {
        let key = RecordKey::single(item_id);
        BlockKind::ITEM_GROUPS
            .into_iter()
            .find_map(|kind| self.get(kind, &key).map(|record| (kind, record)))
    }

    /// Store edited text in an `ItemName` field
    ///
    /// # Errors
    /// Returns an error if the item does not exist.
    pub fn set_item_text(&mut self, item_id: &str, field: &str, text: &str) -> Result<()> {
        self.require_mut(BlockKind::ItemName, &RecordKey::single(item_id))?
            .set_display_text(field, text);
        Ok(())
    }

    /// Set a raw value on a group row
    ///
    /// # Errors
    /// Returns an error if the row does not exist.
    pub fn set_group_field(&mut self, kind: BlockKind, item_id: &str, field: &str, value: &str) -> Result<()> {
        self.require_mut(kind, &RecordKey::single(item_id))?.set(field, value);
        Ok(())
    }

    /// Remove an item from `ItemName` and every group list
    ///
    /// # Returns
    /// The families a record was removed from
    pub fn delete_item(&mut self, item_id: &str) -> Vec<BlockKind> {
        let key = RecordKey::single(item_id);
        let mut deleted_from = Vec::new();

        for kind in [BlockKind::ItemName, BlockKind::Weapon, BlockKind::Armor, BlockKind::EtcItem] {
            let records = self.records_mut(kind);
            let before = records.len();
            records.retain(|r| !r.has_identity(&key));
            if records.len() != before {
                deleted_from.push(kind);
            }
        }

        deleted_from
    }

    /// Copy an item under the next free id.
    ///
    /// The copy is named `Copy of <name>`; its group row (if any) is copied
    /// too with `tag` reset to `0`. Both are appended.
    ///
    /// # Returns
    /// The new id
    ///
    /// # Errors
    /// Returns an error if the item does not exist.
    pub fn duplicate_item(&mut self, item_id: &str) -> Result<String> {
        let key = RecordKey::single(item_id);
        let mut copy = self.require_mut(BlockKind::ItemName, &key)?.clone();

        let new_id = next_id(&self.item_names, "id").to_string();
        let name = copy.get("name").map(strip_brackets).unwrap_or_default();
        let name = format!("[Copy of {name}]");
        copy.set("id", new_id.as_str());
        copy.set("name", name);
        self.item_names.push(copy);

        if let Some((kind, group)) = self.group_record(item_id) {
            let mut group = group.clone();
            group.set("object_id", new_id.as_str());
            group.set("tag", "0");
            self.records_mut(kind).push(group);
        }

        tracing::info!("Item {} duplicated with ID: {}", item_id, new_id);
        Ok(new_id)
    }
}

/// One past the largest numeric `field` in `records` (non-numeric counts as 0)
pub(super) fn next_id(records: &[BlockRecord], field: &str) -> u64 {
    records
        .iter()
        .map(|r| r.get(field).map_or(0, leading_number))
        .max()
        .unwrap_or(0)
        + 1
}

/// Leading decimal digits of a value, `0` when there are none
fn leading_number(value: &str) -> u64 {
    let value = value.trim();
    let end = value.find(|c: char| !c.is_ascii_digit()).unwrap_or(value.len());
    value[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_store;

    #[test]
    fn test_group_record_lookup() {
        let store = sample_store();
        let (kind, record) = store.group_record("22").unwrap();
        assert_eq!(kind, BlockKind::Armor);
        assert_eq!(record.get("weight"), Some("4830"));
        assert!(store.group_record("404").is_none());
    }

    #[test]
    fn test_set_item_text_wraps_and_escapes() {
        let mut store = sample_store();
        store.set_item_text("1", "description", "Sharp.\nVery sharp.").unwrap();
        let record = store.get(BlockKind::ItemName, &RecordKey::single("1")).unwrap();
        assert_eq!(record.get("description"), Some("[Sharp.\\nVery sharp.]"));

        assert!(store.set_item_text("404", "name", "x").is_err());
    }

    #[test]
    fn test_set_group_field() {
        let mut store = sample_store();
        store.set_group_field(BlockKind::Weapon, "1", "weight", "1700").unwrap();
        assert_eq!(store.weapons[0].get("weight"), Some("1700"));
        assert!(store.set_group_field(BlockKind::Armor, "1", "weight", "1").is_err());
    }

    #[test]
    fn test_delete_item_cascades() {
        let mut store = sample_store();
        assert_eq!(store.delete_item("22"), vec![BlockKind::ItemName, BlockKind::Armor]);
        assert_eq!(store.item_names.len(), 1);
        assert!(store.armors.is_empty());
        assert!(store.delete_item("22").is_empty());
    }

    #[test]
    fn test_duplicate_item() {
        let mut store = sample_store();
        let new_id = store.duplicate_item("1").unwrap();
        assert_eq!(new_id, "23");

        let copy = store.item_names.last().unwrap();
        assert_eq!(copy.get("id"), Some("23"));
        assert_eq!(copy.get("name"), Some("[Copy of Short Sword]"));
        assert_eq!(copy.get("is_trade"), Some("1"));

        let group = store.weapons.last().unwrap();
        assert_eq!(group.get("object_id"), Some("23"));
        assert_eq!(group.get("tag"), Some("0"));
        assert_eq!(group.get("weight"), Some("1600"));
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("42"), 42);
        assert_eq!(leading_number(" 17abc"), 17);
        assert_eq!(leading_number("abc"), 0);
        assert_eq!(leading_number(""), 0);
    }
}
