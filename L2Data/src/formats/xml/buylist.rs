//! `merchant_buylists.xml`: NPC tradelists
//!
//! Item order inside a tradelist is the in-game display order, so every
//! edit here works on positions and nothing reorders implicitly.

use super::items::{ItemDatabase, ItemDefinition};
use super::{XmlRecord, collect_attributes};
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Equipment slots in display order; anything else sorts after these
const SLOT_ORDER: &[&str] = &[
    "HEAD",
    "CHEST",
    "FULL_ARMOR",
    "LEGS",
    "GLOVES",
    "FEET",
    "NECK",
    "L_EAR",
    "R_EAR",
    "L_FINGER",
    "R_FINGER",
    "L_HAND",
    "R_HAND",
    "RIGHT_HAND",
    "LEFT_HAND",
    "TWO_HAND",
    "HAIR",
    "HAIR2",
    "HAIRALL",
    "UNDERWEAR",
    "BACK",
    "BELT",
];

/// Slot label used for items missing from the database
const UNKNOWN_SLOT: &str = "zzz-unknown";

/// One `<item id name/>` entry of a tradelist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuylistItem {
    pub id: String,
    pub name: String,
    /// Any other attributes, written back after `id` and `name`
    #[serde(flatten)]
    pub extra: XmlRecord,
}

impl BuylistItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: XmlRecord::new(),
        }
    }
}

/// One `<tradelist npc shop markup>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tradelist {
    pub npc: String,
    pub shop: String,
    pub markup: String,
    pub items: Vec<BuylistItem>,
}

impl Tradelist {
    /// Whether an item with this id is already listed
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Append an item.
    ///
    /// # Returns
    /// `false` (and no change) if the id is already listed and
    /// `allow_duplicate` is not set
    pub fn add_item(&mut self, item: BuylistItem, allow_duplicate: bool) -> bool {
        if !allow_duplicate && self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the item at `index`
    pub fn remove_item(&mut self, index: usize) -> Option<BuylistItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Move the item at `from` so it ends up at `to` (drag and drop)
    ///
    /// # Returns
    /// `false` if either index is out of range
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
        true
    }

    /// Swap the item at `index` with the one above it
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.items.len() {
            return false;
        }
        self.items.swap(index - 1, index);
        true
    }

    /// Swap the item at `index` with the one below it
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.items.len() {
            return false;
        }
        self.items.swap(index, index + 1);
        true
    }

    /// Replace every item (paste from another tradelist)
    pub fn replace_items(&mut self, items: Vec<BuylistItem>) {
        self.items = items;
    }

    /// Sort by equipment slot order, then slot name, then ascending price.
    ///
    /// The sort is stable, so items that compare equal keep their order.
    pub fn sort_by_slot(&mut self, db: &ItemDatabase) {
        self.items.sort_by(|a, b| compare_by_slot(db, &a.id, &b.id));
    }
}

fn slot_rank(slot: &str) -> usize {
    SLOT_ORDER
        .iter()
        .position(|s| *s == slot)
        .map_or(999, |pos| pos + 1)
}

fn compare_by_slot(db: &ItemDatabase, a: &str, b: &str) -> Ordering {
    let item_a = db.get(a);
    let item_b = db.get(b);

    let slot_a = item_a.and_then(|i| i.slot.as_deref()).filter(|s| !s.is_empty()).unwrap_or(UNKNOWN_SLOT);
    let slot_b = item_b.and_then(|i| i.slot.as_deref()).filter(|s| !s.is_empty()).unwrap_or(UNKNOWN_SLOT);

    slot_rank(slot_a)
        .cmp(&slot_rank(slot_b))
        .then_with(|| slot_a.cmp(slot_b))
        .then_with(|| {
            let price_a = item_a.map_or(0, ItemDefinition::price_value);
            let price_b = item_b.map_or(0, ItemDefinition::price_value);
            price_a.cmp(&price_b)
        })
}

/// Read `merchant_buylists.xml`
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_buylists<P: AsRef<Path>>(path: P) -> Result<Vec<Tradelist>> {
    let content = fs::read_to_string(path)?;
    parse_buylists(&content)
}

/// Parse tradelists in document order
///
/// # Errors
/// Returns an error if the XML is malformed.
pub fn parse_buylists(content: &str) -> Result<Vec<Tradelist>> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut tradelists = Vec::new();
    let mut buf = Vec::new();
    let mut current: Option<Tradelist> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"tradelist" => {
                current = Some(tradelist_from_element(&e)?);
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"tradelist" => {
                tradelists.push(tradelist_from_element(&e)?);
            }
            Ok(Event::Start(e) | Event::Empty(e)) if e.name().as_ref() == b"item" => {
                if let Some(tradelist) = current.as_mut() {
                    let mut attrs = collect_attributes(&e)?;
                    let id = attrs.shift_remove("id").unwrap_or_default();
                    let name = attrs.shift_remove("name").unwrap_or_default();
                    tradelist.items.push(BuylistItem { id, name, extra: attrs });
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"tradelist" => {
                if let Some(tradelist) = current.take() {
                    tradelists.push(tradelist);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(tradelists)
}

fn tradelist_from_element(element: &BytesStart) -> Result<Tradelist> {
    let attrs = collect_attributes(element)?;
    let get = |key: &str| attrs.get(key).cloned().unwrap_or_default();
    Ok(Tradelist {
        npc: get("npc"),
        shop: get("shop"),
        markup: get("markup"),
        items: Vec::new(),
    })
}

/// Serialize tradelists to XML text
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_buylists(tradelists: &[Tradelist]) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, b' ', 4);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("list")))?;

    for tradelist in tradelists {
        let mut element = BytesStart::new("tradelist");
        element.push_attribute(("npc", tradelist.npc.as_str()));
        element.push_attribute(("shop", tradelist.shop.as_str()));
        element.push_attribute(("markup", tradelist.markup.as_str()));

        if tradelist.items.is_empty() {
            writer.write_event(Event::Empty(element))?;
            continue;
        }

        writer.write_event(Event::Start(element))?;
        for item in &tradelist.items {
            let mut entry = BytesStart::new("item");
            entry.push_attribute(("id", item.id.as_str()));
            entry.push_attribute(("name", item.name.as_str()));
            for (key, value) in &item.extra {
                entry.push_attribute((key.as_str(), value.as_str()));
            }
            writer.write_event(Event::Empty(entry))?;
        }
        writer.write_event(Event::End(BytesEnd::new("tradelist")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("list")))?;

    let mut xml = String::from_utf8(output)?;
    xml.push('\n');
    Ok(xml)
}

/// Write tradelists to disk (plain write, no backup)
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_buylists<P: AsRef<Path>>(path: P, tradelists: &[Tradelist]) -> Result<()> {
    fs::write(path, serialize_buylists(tradelists)?)?;
    Ok(())
}
