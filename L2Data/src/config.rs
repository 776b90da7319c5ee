//! Data layout configuration (`l2data.toml`)
//!
//! Every setting is optional; a data root without `l2data.toml` uses the
//! layout below.
//!
//! ```toml
//! txt_dir = "public/txt"
//! xml_dir = "xml"
//!
//! [files]
//! item_name = "ItemName_Classic-eu.txt"
//!
//! [buckets]
//! skills = 100
//! ```

use crate::error::Result;
use crate::formats::block::BlockKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Name of the optional layout file inside the data root
pub const LAYOUT_FILE_NAME: &str = "l2data.toml";

fn default_txt_dir() -> String {
    "public/txt".to_string()
}

fn default_xml_dir() -> String {
    "xml".to_string()
}

fn default_bucket_width() -> u32 {
    100
}

fn default_item_name() -> String {
    "ItemName_Classic-eu.txt".to_string()
}

fn default_weapon() -> String {
    "Weapongrp_Classic.txt".to_string()
}

fn default_armor() -> String {
    "Armorgrp_Classic.txt".to_string()
}

fn default_etc_item() -> String {
    "EtcItemgrp_Classic.txt".to_string()
}

fn default_skill_name() -> String {
    "SkillName_Classic-eu.txt".to_string()
}

fn default_skill_group() -> String {
    "Skillgrp_Classic.txt".to_string()
}

fn default_set_item_group() -> String {
    "SetItemGrp_Classic-eu.txt".to_string()
}

fn default_armor_sets() -> String {
    "armor_sets.xml".to_string()
}

fn default_buylists() -> String {
    "merchant_buylists.xml".to_string()
}

fn default_multisell_dir() -> String {
    "multisell".to_string()
}

fn default_items_dir() -> String {
    "items".to_string()
}

fn default_npc_dir() -> String {
    "npc".to_string()
}

fn default_skills_dir() -> String {
    "stats/skills".to_string()
}

/// File names, relative to `txt_dir` or `xml_dir`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNames {
    #[serde(default = "default_item_name")]
    pub item_name: String,
    #[serde(default = "default_weapon")]
    pub weapon: String,
    #[serde(default = "default_armor")]
    pub armor: String,
    #[serde(default = "default_etc_item")]
    pub etc_item: String,
    #[serde(default = "default_skill_name")]
    pub skill_name: String,
    #[serde(default = "default_skill_group")]
    pub skill_group: String,
    #[serde(default = "default_set_item_group")]
    pub set_item_group: String,
    #[serde(default = "default_armor_sets")]
    pub armor_sets: String,
    #[serde(default = "default_buylists")]
    pub buylists: String,
    #[serde(default = "default_multisell_dir")]
    pub multisell_dir: String,
    #[serde(default = "default_items_dir")]
    pub items_dir: String,
    #[serde(default = "default_npc_dir")]
    pub npc_dir: String,
    #[serde(default = "default_skills_dir")]
    pub skills_dir: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            item_name: default_item_name(),
            weapon: default_weapon(),
            armor: default_armor(),
            etc_item: default_etc_item(),
            skill_name: default_skill_name(),
            skill_group: default_skill_group(),
            set_item_group: default_set_item_group(),
            armor_sets: default_armor_sets(),
            buylists: default_buylists(),
            multisell_dir: default_multisell_dir(),
            items_dir: default_items_dir(),
            npc_dir: default_npc_dir(),
            skills_dir: default_skills_dir(),
        }
    }
}

/// Id bucket widths of the `<lo>-<hi>.xml` directories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketWidths {
    #[serde(default = "default_bucket_width")]
    pub items: u32,
    #[serde(default = "default_bucket_width")]
    pub npcs: u32,
    #[serde(default = "default_bucket_width")]
    pub skills: u32,
}

impl Default for BucketWidths {
    fn default() -> Self {
        Self {
            items: default_bucket_width(),
            npcs: default_bucket_width(),
            skills: default_bucket_width(),
        }
    }
}

/// Where every file family lives under a data root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLayout {
    /// Data root; not part of the TOML, set by [`DataLayout::load`]
    #[serde(skip)]
    pub root: PathBuf,
    #[serde(default = "default_txt_dir")]
    pub txt_dir: String,
    #[serde(default = "default_xml_dir")]
    pub xml_dir: String,
    #[serde(default)]
    pub files: FileNames,
    #[serde(default)]
    pub buckets: BucketWidths,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            txt_dir: default_txt_dir(),
            xml_dir: default_xml_dir(),
            files: FileNames::default(),
            buckets: BucketWidths::default(),
        }
    }
}

impl DataLayout {
    /// Default layout under `root` (with `~` expanded), ignoring `l2data.toml`
    pub fn new(root: impl AsRef<str>) -> Self {
        Self {
            root: expand_root(root.as_ref()),
            ..Self::default()
        }
    }

    /// Layout for `root`, applying `l2data.toml` when present
    ///
    /// # Errors
    /// Returns an error if `l2data.toml` exists but cannot be read or parsed.
    pub fn load(root: impl AsRef<str>) -> Result<Self> {
        let root = expand_root(root.as_ref());
        let config_path = root.join(LAYOUT_FILE_NAME);

        let mut layout = if config_path.is_file() {
            tracing::debug!("Reading layout from {}", config_path.display());
            Self::from_toml(&fs::read_to_string(&config_path)?)?
        } else {
            Self::default()
        };
        layout.root = root;
        Ok(layout)
    }

    /// Parse layout settings from TOML text
    ///
    /// # Errors
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn txt_path(&self, name: &str) -> PathBuf {
        self.root.join(&self.txt_dir).join(name)
    }

    pub fn xml_path(&self, name: &str) -> PathBuf {
        self.root.join(&self.xml_dir).join(name)
    }

    /// Block file of a record family
    pub fn block_file(&self, kind: BlockKind) -> PathBuf {
        let name = match kind {
            BlockKind::ItemName => &self.files.item_name,
            BlockKind::Weapon => &self.files.weapon,
            BlockKind::Armor => &self.files.armor,
            BlockKind::EtcItem => &self.files.etc_item,
            BlockKind::SkillName => &self.files.skill_name,
            BlockKind::SkillGroup => &self.files.skill_group,
            BlockKind::SetItemGroup => &self.files.set_item_group,
        };
        self.txt_path(name)
    }

    pub fn armor_sets(&self) -> PathBuf {
        self.xml_path(&self.files.armor_sets)
    }

    pub fn buylists(&self) -> PathBuf {
        self.xml_path(&self.files.buylists)
    }

    pub fn multisell_dir(&self) -> PathBuf {
        self.xml_path(&self.files.multisell_dir)
    }

    pub fn items_dir(&self) -> PathBuf {
        self.xml_path(&self.files.items_dir)
    }

    pub fn npc_dir(&self) -> PathBuf {
        self.xml_path(&self.files.npc_dir)
    }

    pub fn skills_dir(&self) -> PathBuf {
        self.xml_path(&self.files.skills_dir)
    }
}

fn expand_root(root: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(root).into_owned())
}
