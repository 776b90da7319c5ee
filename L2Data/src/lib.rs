//! # l2data
//!
//! A pure-Rust library for editing Lineage 2 Classic datapack files.
//!
//! ## Supported Files
//!
//! - **Block files** - `ItemName`, `Weapongrp`, `Armorgrp`, `EtcItemgrp`,
//!   `SkillName`, `Skillgrp` and the generated `SetItemGrp`
//! - **Buylists** - `merchant_buylists.xml`
//! - **Multisell** - `xml/multisell/*.xml`
//! - **Item/NPC/skill databases** - bucketed `<lo>-<hi>.xml` directories
//! - **Armor sets** - `armor_sets.xml` to `SetItemGrp` generation
//!
//! ## Quick Start
//!
//! ### Editing Records
//!
//! ```no_run
//! use l2data::prelude::*;
//!
//! let layout = DataLayout::load("~/l2/datapack")?;
//! let mut store = DataStore::load(&layout)?;
//!
//! store.set_item_text("1", "description", "A short blade.\nCheap.")?;
//! store.toggle_flag(BlockKind::ItemName, &RecordKey::single("1"), "is_trade")?;
//!
//! let report = save_families(&layout, &store, &[BlockKind::ItemName]);
//! println!("{}", report.message);
//! # Ok::<(), l2data::Error>(())
//! ```
//!
//! ### Generating Set Bonuses
//!
//! ```no_run
//! use l2data::prelude::*;
//!
//! let layout = DataLayout::load(".")?;
//! let report = generate_set_items(&layout);
//! for log in report.logs.unwrap_or_default() {
//!     println!("{}", log.message);
//! }
//! # Ok::<(), l2data::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `l2data` command-line binary

pub mod config;
pub mod error;
pub mod formats;
pub mod gateway;
pub mod setitem;
pub mod store;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::DataLayout;
    pub use crate::error::{Error, Result};
    pub use crate::formats::block::{
        BlockKind, BlockRecord, RecordKey, parse_blocks, read_block_file, serialize_blocks,
        write_block_file,
    };
    pub use crate::formats::icon::{IconContext, icon_asset_url, resolve_icon};
    pub use crate::formats::xml::{
        ArmorSet, ItemDatabase, MultisellEntry, MultisellSide, MultisellTable, NpcDatabase,
        SkillDefinition, Tradelist, read_armor_sets, read_buylists, read_multisell,
    };

    // Store and gateway
    pub use crate::gateway::{
        LogEntry, LogKind, OperationReport, delete_item_everywhere, delete_skill_everywhere,
        generate_set_items, save_buylists, save_families, save_multisell, sync_name_class,
        write_with_backup,
    };
    pub use crate::store::{DataStore, DuplicateSkill, ModifierKind, SkillModifier};

    pub use crate::setitem::{SetEntry, SkillDirectory, SkillSource, generate_set_entries};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
