//! `armor_sets.xml` (read only)

use super::collect_attributes;
use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One `<set>` element. Empty attributes are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorSet {
    pub id: Option<String>,
    pub chest: Option<String>,
    pub legs: Option<String>,
    pub head: Option<String>,
    pub gloves: Option<String>,
    pub feet: Option<String>,
    pub shield: Option<String>,
    /// `;`-joined `skillId-level` references granted by the full set
    pub skills: Option<String>,
    /// `;`-joined references granted by the shield
    pub shield_skills: Option<String>,
    pub enchant6skills: Option<String>,
}

impl ArmorSet {
    /// Required pieces in client order: chest, legs, head, gloves, feet
    pub fn essential_items(&self) -> Vec<&str> {
        [&self.chest, &self.legs, &self.head, &self.gloves, &self.feet]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect()
    }

    /// Skill ids referenced by `skills` (the part before `-` of each entry)
    pub fn skill_ids(&self) -> Vec<&str> {
        split_skill_ids(self.skills.as_deref())
    }

    /// Skill ids referenced by `shield_skills`
    pub fn shield_skill_ids(&self) -> Vec<&str> {
        split_skill_ids(self.shield_skills.as_deref())
    }
}

fn split_skill_ids(list: Option<&str>) -> Vec<&str> {
    list.map(|list| {
        list.split(';')
            .map(|part| part.split('-').next().unwrap_or(part))
            .collect()
    })
    .unwrap_or_default()
}

/// Read `armor_sets.xml`
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or holds no sets.
pub fn read_armor_sets<P: AsRef<Path>>(path: P) -> Result<Vec<ArmorSet>> {
    let content = fs::read_to_string(path)?;
    parse_armor_sets(&content)
}

/// Parse every `<set>` in document order
///
/// # Errors
/// Returns [`Error::NoArmorSets`] when the document has no `<set>` elements.
pub fn parse_armor_sets(content: &str) -> Result<Vec<ArmorSet>> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut sets = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) if e.name().as_ref() == b"set" => {
                let mut attrs = collect_attributes(&e)?;
                let mut take = |key: &str| attrs.shift_remove(key).filter(|v| !v.is_empty());
                sets.push(ArmorSet {
                    id: take("id"),
                    chest: take("chest"),
                    legs: take("legs"),
                    head: take("head"),
                    gloves: take("gloves"),
                    feet: take("feet"),
                    shield: take("shield"),
                    skills: take("skills"),
                    shield_skills: take("shield_skills"),
                    enchant6skills: take("enchant6skills"),
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    if sets.is_empty() {
        return Err(Error::NoArmorSets);
    }
    Ok(sets)
}
