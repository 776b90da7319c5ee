//! Attribute-centric XML documents
//!
//! The server datapack mixes plain attributes and `<set name=".." value=".."/>`
//! children depending on the file family. Everything here is normalized to
//! flat, ordered string maps so callers never branch on schema shape.

pub mod armor_sets;
pub mod buylist;
pub mod items;
pub mod multisell;
pub mod skills;

pub use armor_sets::{ArmorSet, parse_armor_sets, read_armor_sets};
pub use buylist::{BuylistItem, Tradelist, parse_buylists, read_buylists, serialize_buylists, write_buylists};
pub use items::{ItemDatabase, ItemDefinition, NpcDatabase, NpcDefinition};
pub use multisell::{MultisellEntry, MultisellSide, MultisellTable, parse_multisell, read_multisell, serialize_multisell, write_multisell};
pub use skills::{EffectOp, SkillDefinition, SkillEffect, find_skill, parse_skills};

use crate::error::Result;
use indexmap::IndexMap;
use quick_xml::events::BytesStart;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One element's attributes, in document order
pub type XmlRecord = IndexMap<String, String>;

/// Collect every attribute of an element, unescaped
pub(crate) fn collect_attributes(element: &BytesStart) -> Result<XmlRecord> {
    let mut record = XmlRecord::new();
    for attr in element.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        record.insert(key, value);
    }
    Ok(record)
}

/// Value of a single attribute, if present
pub(crate) fn attribute(element: &BytesStart, name: &str) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Bounds of the fixed-width id bucket holding `id`, e.g. `(1200, 1299)`.
///
/// Returns `None` when the bucket would extend past `u32::MAX`.
#[must_use]
pub fn bucket_range(id: u32, width: u32) -> Option<(u32, u32)> {
    let width = width.max(1);
    let low = id / width * width;
    let high = low.checked_add(width - 1)?;
    Some((low, high))
}

/// File name of the bucket holding `id`, e.g. `1200-1299.xml`
#[must_use]
pub fn bucket_file_name(id: u32, width: u32) -> Option<String> {
    let (low, high) = bucket_range(id, width)?;
    Some(format!("{low}-{high}.xml"))
}

/// Whether a file name looks like a `<lo>-<hi>.xml` bucket
pub(crate) fn is_bucket_file_name(name: &str) -> bool {
    name.strip_suffix(".xml")
        .and_then(|stem| stem.split_once('-'))
        .is_some_and(|(low, high)| {
            !low.is_empty()
                && !high.is_empty()
                && low.bytes().all(|b| b.is_ascii_digit())
                && high.bytes().all(|b| b.is_ascii_digit())
        })
}

/// Every `<lo>-<hi>.xml` bucket file directly inside `dir`, in ascending id order.
///
/// A missing directory yields no files.
pub(crate) fn bucket_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::debug!("Bucket directory {} not found", dir.display());
        return Vec::new();
    }

    let mut files: Vec<(u32, PathBuf)> = WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file())
        .filter_map(|e| {
            let name = e.file_name().to_str()?;
            if !is_bucket_file_name(name) {
                return None;
            }
            let low = name.split('-').next()?.parse().ok()?;
            Some((low, e.into_path()))
        })
        .collect();

    files.sort_by_key(|(low, _)| *low);
    files.into_iter().map(|(_, path)| path).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_range() {
        assert_eq!(bucket_range(0, 100), Some((0, 99)));
        assert_eq!(bucket_range(99, 100), Some((0, 99)));
        assert_eq!(bucket_range(100, 100), Some((100, 199)));
        assert_eq!(bucket_range(3456, 100), Some((3400, 3499)));
        assert_eq!(bucket_file_name(3456, 100).as_deref(), Some("3400-3499.xml"));
        assert_eq!(bucket_file_name(12_345, 1000).as_deref(), Some("12000-12999.xml"));
    }

    #[test]
    fn test_bucket_range_at_upper_limit() {
        // 4294967200 + 99 = 4294967299 does not fit in u32
        assert_eq!(bucket_range(u32::MAX, 100), None);
        assert_eq!(bucket_file_name(u32::MAX, 100), None);
        assert_eq!(bucket_range(u32::MAX, 1), Some((u32::MAX, u32::MAX)));
        assert_eq!(bucket_range(4_294_967_199, 100), Some((4_294_967_100, 4_294_967_199)));
    }

    #[test]
    fn test_bucket_file_names() {
        assert!(is_bucket_file_name("3400-3499.xml"));
        assert!(!is_bucket_file_name("armor_sets.xml"));
        assert!(!is_bucket_file_name("-99.xml"));
        assert!(!is_bucket_file_name("0-99.txt"));
    }
}
