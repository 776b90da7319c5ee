//! `xml/multisell/*.xml`: exchange tables

use super::{XmlRecord, collect_attributes};
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use walkdir::WalkDir;

/// Config flags that always appear, defaulting to `"false"`
const DEFAULT_FLAGS: [&str; 5] = ["showall", "notax", "keepenchanted", "nokey", "is_chanced"];

/// One `<item>`: what the player gives and what they get
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisellEntry {
    /// `<ingredient>` attributes, `id` and `count` first
    pub ingredients: Vec<XmlRecord>,
    /// `<production>` attributes, `id` and `count` first
    pub productions: Vec<XmlRecord>,
}

/// A whole multisell document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisellTable {
    /// File name inside the multisell directory, e.g. `001.xml`
    pub filename: String,
    /// `<config>` attributes in document order
    pub config: XmlRecord,
    pub items: Vec<MultisellEntry>,
}

/// Which side of an entry a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultisellSide {
    Ingredient,
    Production,
}

impl MultisellSide {
    pub fn as_str(self) -> &'static str {
        match self {
            MultisellSide::Ingredient => "ingredient",
            MultisellSide::Production => "production",
        }
    }
}

impl fmt::Display for MultisellSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `ingredient` or `production`
impl FromStr for MultisellSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ingredient" | "in" => Ok(MultisellSide::Ingredient),
            "production" | "out" => Ok(MultisellSide::Production),
            other => Err(Error::InvalidFormat(format!(
                "expected ingredient or production, got {other}"
            ))),
        }
    }
}

/// `{id, count: 1}`
fn item_record(id: &str) -> XmlRecord {
    let mut record = XmlRecord::new();
    record.insert("id".to_string(), id.to_string());
    record.insert("count".to_string(), "1".to_string());
    record
}

impl MultisellEntry {
    /// A new entry with one blank ingredient and one blank production
    pub fn blank() -> Self {
        Self {
            ingredients: vec![item_record("")],
            productions: vec![item_record("")],
        }
    }

    pub fn records(&self, side: MultisellSide) -> &[XmlRecord] {
        match side {
            MultisellSide::Ingredient => &self.ingredients,
            MultisellSide::Production => &self.productions,
        }
    }

    pub fn records_mut(&mut self, side: MultisellSide) -> &mut Vec<XmlRecord> {
        match side {
            MultisellSide::Ingredient => &mut self.ingredients,
            MultisellSide::Production => &mut self.productions,
        }
    }

    /// Append `{id, count=1}` to one side
    pub fn add_record(&mut self, side: MultisellSide, id: &str) {
        self.records_mut(side).push(item_record(id));
    }

    /// Point the record at `index` to another item, keeping count and extras
    ///
    /// # Returns
    /// `false` if `index` is out of range
    pub fn replace_record(&mut self, side: MultisellSide, index: usize, id: &str) -> bool {
        self.set_field(side, index, "id", id)
    }

    /// Set one attribute of the record at `index`
    ///
    /// # Returns
    /// `false` if `index` is out of range
    pub fn set_field(&mut self, side: MultisellSide, index: usize, field: &str, value: &str) -> bool {
        match self.records_mut(side).get_mut(index) {
            Some(record) => {
                record.insert(field.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    /// Remove the record at `index`
    pub fn remove_record(&mut self, side: MultisellSide, index: usize) -> Option<XmlRecord> {
        let records = self.records_mut(side);
        (index < records.len()).then(|| records.remove(index))
    }
}

impl MultisellTable {
    /// Append a blank entry.
    ///
    /// # Returns
    /// The new entry's index
    pub fn add_entry(&mut self) -> usize {
        self.items.push(MultisellEntry::blank());
        self.items.len() - 1
    }

    /// Append a copy of the entry at `index`.
    ///
    /// # Returns
    /// The copy's index, `None` if `index` is out of range
    pub fn duplicate_entry(&mut self, index: usize) -> Option<usize> {
        let copy = self.items.get(index)?.clone();
        self.items.push(copy);
        Some(self.items.len() - 1)
    }

    /// Remove the entry at `index`; later entries move up by one
    pub fn remove_entry(&mut self, index: usize) -> Option<MultisellEntry> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut MultisellEntry> {
        self.items.get_mut(index)
    }
}

/// Read one multisell file; `filename` is taken from the path
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_multisell<P: AsRef<Path>>(path: P) -> Result<MultisellTable> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let mut table = parse_multisell(&content)?;
    table.filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(table)
}

/// Parse a multisell document.
///
/// Missing or empty `showall`, `notax`, `keepenchanted`, `nokey` and
/// `is_chanced` flags are set to `"false"`. Only `<item>` elements directly
/// under the root are entries.
///
/// # Errors
/// Returns an error if the XML is malformed.
pub fn parse_multisell(content: &str) -> Result<MultisellTable> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut table = MultisellTable::default();
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut seen_config = false;
    let mut current: Option<MultisellEntry> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                read_element(&e, depth, &mut table, &mut current, &mut seen_config)?;
                if depth == 1 && e.name().as_ref() == b"item" {
                    current = Some(MultisellEntry::default());
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                read_element(&e, depth, &mut table, &mut current, &mut seen_config)?;
                if depth == 1 && e.name().as_ref() == b"item" {
                    table.items.push(MultisellEntry::default());
                }
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                if depth == 1 {
                    if let Some(entry) = current.take() {
                        table.items.push(entry);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    for flag in DEFAULT_FLAGS {
        let missing = table.config.get(flag).is_none_or(String::is_empty);
        if missing {
            table.config.insert(flag.to_string(), "false".to_string());
        }
    }

    Ok(table)
}

fn read_element(
    element: &BytesStart,
    depth: usize,
    table: &mut MultisellTable,
    current: &mut Option<MultisellEntry>,
    seen_config: &mut bool,
) -> Result<()> {
    match element.name().as_ref() {
        b"config" if !*seen_config => {
            table.config = collect_attributes(element)?;
            *seen_config = true;
        }
        b"ingredient" if depth > 1 => {
            if let Some(entry) = current.as_mut() {
                entry.ingredients.push(id_count_first(collect_attributes(element)?));
            }
        }
        b"production" if depth > 1 => {
            if let Some(entry) = current.as_mut() {
                entry.productions.push(id_count_first(collect_attributes(element)?));
            }
        }
        _ => {}
    }
    Ok(())
}

fn id_count_first(mut attrs: XmlRecord) -> XmlRecord {
    let mut ordered = XmlRecord::with_capacity(attrs.len());
    for key in ["id", "count"] {
        if let Some(value) = attrs.shift_remove(key) {
            ordered.insert(key.to_string(), value);
        }
    }
    ordered.extend(attrs);
    ordered
}

/// Serialize a multisell table to XML text
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_multisell(table: &MultisellTable) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("list")))?;

    let mut config = BytesStart::new("config");
    for (key, value) in &table.config {
        config.push_attribute((key.as_str(), value.as_str()));
    }
    writer.write_event(Event::Empty(config))?;

    for entry in &table.items {
        if entry.ingredients.is_empty() && entry.productions.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("item")))?;
            continue;
        }

        writer.write_event(Event::Start(BytesStart::new("item")))?;
        for (tag, records) in [("ingredient", &entry.ingredients), ("production", &entry.productions)] {
            for record in records {
                let mut element = BytesStart::new(tag);
                for (key, value) in record {
                    element.push_attribute((key.as_str(), value.as_str()));
                }
                writer.write_event(Event::Empty(element))?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("list")))?;

    let mut xml = String::from_utf8(output)?;
    xml.push('\n');
    Ok(xml)
}

/// Write a multisell table to disk (plain write, no backup)
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_multisell<P: AsRef<Path>>(path: P, table: &MultisellTable) -> Result<()> {
    fs::write(path, serialize_multisell(table)?)?;
    Ok(())
}

/// Names of the `.xml` files directly inside the multisell directory, sorted
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn list_multisell_files<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.to_ascii_lowercase().ends_with(".xml") {
            names.push(name.into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTISELL: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<list>
  <config showall="true" custom_flag="7" />

  <item>
    <ingredient count="2" id="57" />
    <production id="1" count="1" chance="50" enchant="3" />
  </item>

  <item>
    <ingredient id="1" count="1" />
    <production id="2" count="1" />
    <production id="3" count="5" />
  </item>
</list>
"#;

    fn keys(record: &XmlRecord) -> Vec<&str> {
        record.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_parse_multisell() {
        let table = parse_multisell(MULTISELL).unwrap();
        assert_eq!(
            keys(&table.config),
            vec!["showall", "custom_flag", "notax", "keepenchanted", "nokey", "is_chanced"]
        );
        assert_eq!(table.config["showall"], "true");
        assert_eq!(table.config["nokey"], "false");

        assert_eq!(table.items.len(), 2);
        assert_eq!(keys(&table.items[0].ingredients[0]), vec!["id", "count"]);
        assert_eq!(keys(&table.items[0].productions[0]), vec!["id", "count", "chance", "enchant"]);
        assert_eq!(table.items[1].productions.len(), 2);
    }

    #[test]
    fn test_missing_config_gets_defaults() {
        let table = parse_multisell("<list><item><production id=\"1\" count=\"1\"/></item></list>").unwrap();
        assert_eq!(table.config.len(), 5);
        assert!(table.config.values().all(|v| v == "false"));
        assert_eq!(table.items.len(), 1);
    }

    #[test]
    fn test_entry_add_duplicate_remove() {
        let mut table = parse_multisell(MULTISELL).unwrap();

        assert_eq!(table.add_entry(), 2);
        assert_eq!(table.items[2], MultisellEntry::blank());
        assert_eq!(table.items[2].ingredients[0]["id"], "");
        assert_eq!(table.items[2].ingredients[0]["count"], "1");

        assert_eq!(table.duplicate_entry(0), Some(3));
        assert_eq!(table.items[3], table.items[0]);
        assert_eq!(table.duplicate_entry(9), None);

        let removed = table.remove_entry(1).unwrap();
        assert_eq!(removed.productions.len(), 2);
        assert_eq!(table.items.len(), 3);
        assert!(table.remove_entry(3).is_none());
    }

    #[test]
    fn test_record_edits_keep_extras() {
        let mut table = parse_multisell(MULTISELL).unwrap();
        let entry = table.entry_mut(0).unwrap();

        entry.add_record(MultisellSide::Ingredient, "1864");
        assert_eq!(keys(&entry.ingredients[1]), vec!["id", "count"]);
        assert_eq!(entry.ingredients[1]["count"], "1");

        assert!(entry.replace_record(MultisellSide::Production, 0, "2"));
        let production = &entry.productions[0];
        assert_eq!(production["id"], "2");
        assert_eq!(production["chance"], "50");
        assert_eq!(keys(production), vec!["id", "count", "chance", "enchant"]);
        assert!(!entry.replace_record(MultisellSide::Production, 5, "2"));

        assert!(entry.set_field(MultisellSide::Ingredient, 0, "count", "10"));
        assert_eq!(entry.ingredients[0]["count"], "10");

        let removed = entry.remove_record(MultisellSide::Ingredient, 0).unwrap();
        assert_eq!(removed["id"], "57");
        assert_eq!(entry.records(MultisellSide::Ingredient).len(), 1);
        assert!(entry.remove_record(MultisellSide::Production, 1).is_none());
    }

    #[test]
    fn test_side_from_str() {
        assert_eq!("ingredient".parse::<MultisellSide>().unwrap(), MultisellSide::Ingredient);
        assert_eq!("Production".parse::<MultisellSide>().unwrap(), MultisellSide::Production);
        assert!("reward".parse::<MultisellSide>().is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let table = parse_multisell(MULTISELL).unwrap();
        let xml = serialize_multisell(&table).unwrap();
        assert!(xml.contains(r#"<production id="1" count="1" chance="50" enchant="3"/>"#));
        assert_eq!(parse_multisell(&xml).unwrap(), table);
    }
}
