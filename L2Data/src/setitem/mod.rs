//! Armor set bonus rows for `SetItemGrp_Classic-eu.txt`
//!
//! Combines `armor_sets.xml` with the skill fragments under `stats/skills/`
//! to describe each set's bonus, and keeps `ItemName.name_class` of chest
//! pieces pointing at the generated rows.

pub mod describe;
pub mod generator;
pub mod name_class;
pub mod stats;

pub use describe::{describe_effects, format_effect};
pub use generator::{
    NO_SET_EFFECT, SetEntry, SkillDirectory, SkillSource, generate_set_entries, render_set_file,
    skill_description,
};
pub use name_class::{NameClassChange, NameClassSync, chest_assignments, sync_name_class};
pub use stats::stat_display_name;
