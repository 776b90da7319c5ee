//! Subcommand enum definitions for CLI

use clap::Subcommand;

use crate::formats::xml::MultisellSide;
use crate::store::SkillModifier;

/// Item commands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// Show an item's ItemName fields and group record
    Show {
        /// Item id
        id: String,
    },

    /// Set a field (text fields are bracketed and escaped automatically)
    Set {
        /// Item id
        id: String,

        /// Field name, e.g. name, description, weight
        field: String,

        /// New value
        value: String,

        /// Edit the weapon/armor/etc group record instead of ItemName
        #[arg(short, long)]
        group: bool,
    },

    /// Flip a 0/1 flag such as is_trade or is_drop
    Toggle {
        /// Item id
        id: String,

        /// Flag field name
        field: String,
    },

    /// Copy an item (and its group record) under the next free id
    Duplicate {
        /// Item id
        id: String,
    },

    /// Delete an item from ItemName and every group file
    Delete {
        /// Item id
        id: String,
    },
}

/// Skill commands
#[derive(Subcommand)]
pub enum SkillCommands {
    /// Show every level of a skill (or one level)
    Show {
        /// Skill id
        id: String,

        /// Only this level
        #[arg(short, long)]
        level: Option<String>,

        /// Only this sublevel
        #[arg(short, long)]
        sublevel: Option<String>,
    },

    /// Set a field of one skill level
    Set {
        /// Skill id
        id: String,

        /// Skill level
        level: String,

        /// Skill sublevel
        sublevel: String,

        /// Field name, e.g. name, desc, mp_consume
        field: String,

        /// New value
        value: String,

        /// Edit the Skillgrp row instead of SkillName
        #[arg(short, long)]
        group: bool,
    },

    /// Move one skill level to another skill id
    Rename {
        /// Current skill id
        id: String,

        /// Skill level
        level: String,

        /// Skill sublevel
        sublevel: String,

        /// New skill id
        new_id: String,
    },

    /// Delete skill rows from SkillName and Skillgrp
    Delete {
        /// Skill id
        id: String,

        /// Only this level (all levels if omitted)
        #[arg(short, long)]
        level: Option<String>,

        /// Only this sublevel (all sublevels if omitted)
        #[arg(short, long)]
        sublevel: Option<String>,
    },

    /// Copy every level of a skill to a new id
    Duplicate {
        /// Skill id to copy
        id: String,

        /// Target id (next free id if omitted)
        #[arg(long)]
        new_id: Option<String>,

        /// Name of the copy (defaults to "Copy of <name>")
        #[arg(long)]
        name: Option<String>,

        /// MP cost modifier: add:N, multiply:N or set:N
        #[arg(long)]
        mp: Option<SkillModifier>,

        /// HP cost modifier: add:N, multiply:N or set:N
        #[arg(long)]
        hp: Option<SkillModifier>,

        /// Cast range modifier: add:N, multiply:N or set:N
        #[arg(long)]
        cast_range: Option<SkillModifier>,
    },
}

/// Buylist commands
#[derive(Subcommand)]
pub enum BuylistCommands {
    /// List tradelists (or the items of one shop)
    List {
        /// Shop id
        #[arg(short, long)]
        shop: Option<String>,
    },

    /// Add an item to a shop
    Add {
        /// Shop id
        shop: String,

        /// Item id
        item: String,

        /// Item name (looked up in xml/items when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Add even if the shop already lists this item
        #[arg(long)]
        allow_duplicate: bool,
    },

    /// Remove the item at a position (0-based)
    Remove {
        /// Shop id
        shop: String,

        /// Item position
        index: usize,
    },

    /// Move an item to another position (0-based)
    Move {
        /// Shop id
        shop: String,

        /// Current position
        from: usize,

        /// New position
        to: usize,
    },

    /// Sort items by equipment slot, then price
    Sort {
        /// Shop id (all shops if omitted)
        shop: Option<String>,
    },
}

/// Multisell commands
#[derive(Subcommand)]
pub enum MultisellCommands {
    /// List multisell files
    List,

    /// Show a multisell table
    Show {
        /// File name, e.g. 001.xml
        file: String,
    },

    /// Re-write a multisell file with default config flags filled in
    Normalize {
        /// File name, e.g. 001.xml
        file: String,
    },

    /// Append a blank entry
    AddEntry {
        /// File name, e.g. 001.xml
        file: String,
    },

    /// Append a copy of an entry
    DuplicateEntry {
        /// File name, e.g. 001.xml
        file: String,

        /// Entry position (0-based)
        entry: usize,
    },

    /// Remove an entry
    RemoveEntry {
        /// File name, e.g. 001.xml
        file: String,

        /// Entry position (0-based)
        entry: usize,
    },

    /// Add an ingredient or production (count 1)
    Add {
        /// File name, e.g. 001.xml
        file: String,

        /// Entry position (0-based)
        entry: usize,

        /// ingredient or production
        side: MultisellSide,

        /// Item id
        item: String,
    },

    /// Point an ingredient or production at another item
    Replace {
        /// File name, e.g. 001.xml
        file: String,

        /// Entry position (0-based)
        entry: usize,

        /// ingredient or production
        side: MultisellSide,

        /// Position within that side (0-based)
        index: usize,

        /// New item id
        item: String,
    },

    /// Set one attribute of an ingredient or production
    Set {
        /// File name, e.g. 001.xml
        file: String,

        /// Entry position (0-based)
        entry: usize,

        /// ingredient or production
        side: MultisellSide,

        /// Position within that side (0-based)
        index: usize,

        /// Attribute name, e.g. count or chance
        field: String,

        /// New value
        value: String,
    },

    /// Remove an ingredient or production
    Remove {
        /// File name, e.g. 001.xml
        file: String,

        /// Entry position (0-based)
        entry: usize,

        /// ingredient or production
        side: MultisellSide,

        /// Position within that side (0-based)
        index: usize,
    },
}

/// Set item tool commands
#[derive(Subcommand)]
pub enum ToolCommands {
    /// Generate SetItemGrp_Classic-eu.txt from armor_sets.xml
    GenerateSets,

    /// Point chest items' name_class at their SetItemGrp rows
    SyncNameClass,
}
