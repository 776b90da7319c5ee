//! `xml/stats/skills/<lo>-<hi>.xml` skill fragments
//!
//! Only the stat modifiers are read: the `add|mul|sub|div|set` children of a
//! skill's top-level `<for>` blocks.

use super::{attribute, bucket_file_name};
use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Stat modifier operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectOp {
    Add,
    Mul,
    Sub,
    Div,
    Set,
}

impl EffectOp {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"add" => Some(EffectOp::Add),
            b"mul" => Some(EffectOp::Mul),
            b"sub" => Some(EffectOp::Sub),
            b"div" => Some(EffectOp::Div),
            b"set" => Some(EffectOp::Set),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EffectOp::Add => "add",
            EffectOp::Mul => "mul",
            EffectOp::Sub => "sub",
            EffectOp::Div => "div",
            EffectOp::Set => "set",
        }
    }
}

impl fmt::Display for EffectOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<mul stat="pAtk" val="1.05"/>`-style modifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEffect {
    pub op: EffectOp,
    pub stat: String,
    /// Raw `val` text; empty when the attribute is missing
    pub value: String,
    pub order: Option<String>,
}

/// A `<skill>` element reduced to what set descriptions need
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    /// Modifiers of every top-level `<for>` block, in block order. Inside a
    /// block they are grouped add, mul, sub, div, set.
    pub effects: Vec<SkillEffect>,
}

/// Path of the bucket file holding `skill_id` inside `dir`, `None` for ids
/// whose bucket cannot be named
#[must_use]
pub fn skill_bucket_path(dir: &Path, skill_id: u32, width: u32) -> Option<PathBuf> {
    bucket_file_name(skill_id, width).map(|name| dir.join(name))
}

/// Parse every `<skill>` directly under the document root
///
/// # Errors
/// Returns an error if the XML is malformed.
pub fn parse_skills(content: &str) -> Result<Vec<SkillDefinition>> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut skills = Vec::new();
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut current: Option<SkillDefinition> = None;
    // Modifiers of the `<for>` block being read
    let mut block: Option<Vec<SkillEffect>> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                match (depth, e.name().as_ref()) {
                    (1, b"skill") => current = Some(skill_from_element(&e)?),
                    (2, b"for") if current.is_some() => block = Some(Vec::new()),
                    (3, _) => push_effect(&mut block, &e)?,
                    _ => {}
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => match (depth, e.name().as_ref()) {
                (1, b"skill") => skills.push(skill_from_element(&e)?),
                (3, _) => push_effect(&mut block, &e)?,
                _ => {}
            },
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                match depth {
                    2 => {
                        if let (Some(skill), Some(mut effects)) = (current.as_mut(), block.take()) {
                            effects.sort_by_key(|effect| effect.op);
                            skill.effects.extend(effects);
                        }
                    }
                    1 => {
                        if let Some(skill) = current.take() {
                            skills.push(skill);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(skills)
}

fn skill_from_element(element: &BytesStart) -> Result<SkillDefinition> {
    Ok(SkillDefinition {
        id: attribute(element, "id")?.unwrap_or_default(),
        name: attribute(element, "name")?.unwrap_or_default(),
        effects: Vec::new(),
    })
}

fn push_effect(block: &mut Option<Vec<SkillEffect>>, element: &BytesStart) -> Result<()> {
    let Some(effects) = block.as_mut() else {
        return Ok(());
    };
    let Some(op) = EffectOp::from_tag(element.name().as_ref()) else {
        return Ok(());
    };
    let Some(stat) = attribute(element, "stat")?.filter(|s| !s.is_empty()) else {
        return Ok(());
    };

    effects.push(SkillEffect {
        op,
        stat,
        value: attribute(element, "val")?.unwrap_or_default(),
        order: attribute(element, "order")?,
    });
    Ok(())
}

/// Find the skill whose `id` attribute equals `skill_id` in one document
///
/// # Errors
/// Returns an error if the XML is malformed.
pub fn find_skill(content: &str, skill_id: &str) -> Result<Option<SkillDefinition>> {
    Ok(parse_skills(content)?.into_iter().find(|skill| skill.id == skill_id))
}

/// Load a skill from its bucket file in `dir`.
///
/// Returns `Ok(None)` when the id is not a number or is out of bucket range,
/// the bucket file does not exist, or the file has no such skill.
///
/// # Errors
/// Returns an error if the bucket file exists but cannot be read or parsed.
pub fn load_skill(dir: &Path, skill_id: &str, width: u32) -> Result<Option<SkillDefinition>> {
    let Ok(numeric) = skill_id.trim().parse::<u32>() else {
        return Ok(None);
    };
    let Some(path) = skill_bucket_path(dir, numeric, width).filter(|path| path.is_file()) else {
        return Ok(None);
    };
    let content = fs::read_to_string(&path)?;
    find_skill(&content, skill_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKILLS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<list>
    <skill id="3500" levels="1" name="Set Bonus">
        <set name="target" value="TARGET_SELF" />
        <for>
            <mul order="0x30" stat="pAtk" val="1.05" />
            <add order="0x40" stat="maxHp" val="100" />
            <mul order="0x30" stat="mAtk" val="1.1" />
            <sub stat="runSpd" val="-5" />
            <add val="1" />
        </for>
        <cond><for><add stat="ignored" val="1" /></for></cond>
        <for>
            <set stat="STR" val="1" />
            <add stat="CON" val="1" />
        </for>
    </skill>
    <skill id="3501" name="Empty" />
</list>"#;

    #[test]
    fn test_effects_grouped_per_block() {
        let skill = find_skill(SKILLS, "3500").unwrap().unwrap();
        let summary: Vec<(EffectOp, &str)> = skill.effects.iter().map(|e| (e.op, e.stat.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (EffectOp::Add, "maxHp"),
                (EffectOp::Mul, "pAtk"),
                (EffectOp::Mul, "mAtk"),
                (EffectOp::Sub, "runSpd"),
                (EffectOp::Add, "CON"),
                (EffectOp::Set, "STR"),
            ]
        );
        assert_eq!(skill.effects[1].order.as_deref(), Some("0x30"));
    }

    #[test]
    fn test_find_by_exact_id() {
        let skill = find_skill(SKILLS, "3501").unwrap().unwrap();
        assert!(skill.effects.is_empty());
        assert!(find_skill(SKILLS, "350").unwrap().is_none());
    }

    #[test]
    fn test_bucket_path() {
        let path = skill_bucket_path(Path::new("skills"), 3543, 100);
        assert_eq!(path, Some(Path::new("skills").join("3500-3599.xml")));
    }

    #[test]
    fn test_load_skill_out_of_range_id() {
        let dir = tempfile::tempdir().unwrap();
        assert!(skill_bucket_path(dir.path(), u32::MAX, 100).is_none());
        assert!(load_skill(dir.path(), "4294967295", 100).unwrap().is_none());
        assert!(load_skill(dir.path(), "99999999999", 100).unwrap().is_none());
    }
}
