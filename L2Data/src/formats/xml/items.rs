//! Static item and NPC databases (`xml/items/`, `xml/npc/`)
//!
//! Both are split over `<lo>-<hi>.xml` bucket files. They are read-only here:
//! the editor uses them to label buylist entries and to sort by slot/price.

use super::{XmlRecord, attribute, bucket_files, collect_attributes};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Element family an item definition came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemClass {
    Weapon,
    Armor,
    EtcItem,
}

impl ItemClass {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"weapon" => Some(ItemClass::Weapon),
            b"armor" => Some(ItemClass::Armor),
            b"etcitem" => Some(ItemClass::EtcItem),
            _ => None,
        }
    }
}

/// One `<weapon>`, `<armor>` or `<etcitem>` element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub add_name: Option<String>,
    pub class: ItemClass,
    /// `equip > slot` ids joined with `,`
    pub slot: Option<String>,
    /// Element attributes followed by every folded `<set name value/>`
    pub properties: XmlRecord,
}

impl ItemDefinition {
    fn from_element(element: &BytesStart, class: ItemClass) -> Result<Self> {
        let properties = collect_attributes(element)?;
        Ok(Self {
            id: properties.get("id").cloned().unwrap_or_default(),
            name: properties.get("name").cloned().unwrap_or_default(),
            add_name: properties.get("add_name").filter(|v| !v.is_empty()).cloned(),
            class,
            slot: None,
            properties,
        })
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Bare icon token, e.g. `icon.weapon_small_sword_i00`
    pub fn icon(&self) -> Option<&str> {
        self.property("icon")
    }

    pub fn price(&self) -> Option<&str> {
        self.property("price")
    }

    /// The `type` property (e.g. `SWORD`, `HEAVY`)
    pub fn item_type(&self) -> Option<&str> {
        self.property("type")
    }

    /// Price as a number, 0 when missing or unparsable
    pub fn price_value(&self) -> i64 {
        self.price().and_then(|p| p.trim().parse().ok()).unwrap_or(0)
    }
}

/// All item definitions, keyed by id in load order
#[derive(Debug, Clone, Default)]
pub struct ItemDatabase {
    items: IndexMap<String, ItemDefinition>,
}

impl ItemDatabase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every bucket file in `dir`. Unreadable files are skipped.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Self {
        let mut db = Self::new();
        for path in bucket_files(dir.as_ref()) {
            match fs::read_to_string(&path).map_err(Error::from).and_then(|c| parse_items(&c)) {
                Ok(items) => db.extend(items),
                Err(e) => tracing::debug!("Skipping {}: {}", path.display(), e),
            }
        }
        tracing::info!("Loaded {} item definitions", db.len());
        db
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = ItemDefinition>) {
        for item in items {
            self.items.insert(item.id.clone(), item);
        }
    }

    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }
}

/// Parse the item definitions in one bucket document
///
/// # Errors
/// Returns an error if the XML is malformed.
pub fn parse_items(content: &str) -> Result<Vec<ItemDefinition>> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut items = Vec::new();
    let mut buf = Vec::new();
    let mut current: Option<ItemDefinition> = None;
    // Element names opened inside the current item
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut slots: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if let Some(item) = current.as_mut() {
                    fold_child(item, &e, path.last().map(Vec::as_slice), &mut slots)?;
                    path.push(e.name().as_ref().to_vec());
                } else if let Some(class) = ItemClass::from_tag(e.name().as_ref()) {
                    current = Some(ItemDefinition::from_element(&e, class)?);
                    path.clear();
                    slots.clear();
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(item) = current.as_mut() {
                    fold_child(item, &e, path.last().map(Vec::as_slice), &mut slots)?;
                } else if let Some(class) = ItemClass::from_tag(e.name().as_ref()) {
                    items.push(ItemDefinition::from_element(&e, class)?);
                }
            }
            Ok(Event::End(_)) => {
                if current.is_some() && path.pop().is_none() {
                    if let Some(mut item) = current.take() {
                        if !slots.is_empty() {
                            item.slot = Some(slots.join(","));
                        }
                        items.push(item);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(items)
}

fn fold_child(
    item: &mut ItemDefinition,
    element: &BytesStart,
    parent: Option<&[u8]>,
    slots: &mut Vec<String>,
) -> Result<()> {
    match element.name().as_ref() {
        b"set" => {
            if let (Some(name), Some(value)) = (attribute(element, "name")?, attribute(element, "value")?) {
                item.properties.insert(name, value);
            }
        }
        b"slot" if parent == Some(b"equip".as_slice()) => {
            if let Some(id) = attribute(element, "id")?.filter(|id| !id.is_empty()) {
                slots.push(id);
            }
        }
        _ => {}
    }
    Ok(())
}

/// One `<npc>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcDefinition {
    pub id: String,
    pub name: String,
    pub title: Option<String>,
}

/// All NPC definitions, keyed by id
#[derive(Debug, Clone, Default)]
pub struct NpcDatabase {
    npcs: IndexMap<String, NpcDefinition>,
}

impl NpcDatabase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every bucket file in `dir`. Unreadable files are skipped.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Self {
        let mut db = Self::new();
        for path in bucket_files(dir.as_ref()) {
            match fs::read_to_string(&path).map_err(Error::from).and_then(|c| parse_npcs(&c)) {
                Ok(npcs) => {
                    for npc in npcs {
                        db.npcs.insert(npc.id.clone(), npc);
                    }
                }
                Err(e) => tracing::debug!("Skipping {}: {}", path.display(), e),
            }
        }
        tracing::info!("Loaded {} NPC definitions", db.len());
        db
    }

    pub fn get(&self, id: &str) -> Option<&NpcDefinition> {
        self.npcs.get(id)
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }
}

/// Parse the NPC definitions in one bucket document
///
/// # Errors
/// Returns an error if the XML is malformed.
pub fn parse_npcs(content: &str) -> Result<Vec<NpcDefinition>> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut npcs = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) if e.name().as_ref() == b"npc" => {
                npcs.push(NpcDefinition {
                    id: attribute(&e, "id")?.unwrap_or_default(),
                    name: attribute(&e, "name")?.unwrap_or_default(),
                    title: attribute(&e, "title")?,
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(npcs)
}
