//! Command execution implementations

use super::definitions::{BuylistCommands, ItemCommands, MultisellCommands, SkillCommands, ToolCommands};
use super::{Commands, Context};
use super::{buylist, items, multisell, skills, tools};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the command fails.
    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        match self {
            Commands::Items { command } => command.execute(ctx),
            Commands::Skills { command } => command.execute(ctx),
            Commands::Icon { raw, skill } => items::icon(ctx, raw, *skill),
            Commands::Buylist { command } => command.execute(ctx),
            Commands::Multisell { command } => command.execute(ctx),
            Commands::Normalize => tools::normalize(ctx),
            Commands::Tools { command } => command.execute(ctx),
        }
    }
}

impl ItemCommands {
    /// Execute the selected item command.
    ///
    /// # Errors
    /// Returns an error if loading, editing or saving fails.
    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        match self {
            ItemCommands::Show { id } => items::show(ctx, id),
            ItemCommands::Set {
                id,
                field,
                value,
                group,
            } => items::set(ctx, id, field, value, *group),
            ItemCommands::Toggle { id, field } => items::toggle(ctx, id, field),
            ItemCommands::Duplicate { id } => items::duplicate(ctx, id),
            ItemCommands::Delete { id } => items::delete(ctx, id),
        }
    }
}

impl SkillCommands {
    /// Execute the selected skill command.
    ///
    /// # Errors
    /// Returns an error if loading, editing or saving fails.
    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        match self {
            SkillCommands::Show { id, level, sublevel } => {
                skills::show(ctx, id, level.as_deref(), sublevel.as_deref())
            }
            SkillCommands::Set {
                id,
                level,
                sublevel,
                field,
                value,
                group,
            } => skills::set(ctx, id, level, sublevel, field, value, *group),
            SkillCommands::Rename {
                id,
                level,
                sublevel,
                new_id,
            } => skills::rename(ctx, id, level, sublevel, new_id),
            SkillCommands::Delete { id, level, sublevel } => {
                skills::delete(ctx, id, level.as_deref(), sublevel.as_deref())
            }
            SkillCommands::Duplicate {
                id,
                new_id,
                name,
                mp,
                hp,
                cast_range,
            } => skills::duplicate(
                ctx,
                id,
                &crate::store::DuplicateSkill {
                    new_id: new_id.clone(),
                    name: name.clone(),
                    mp_consume: *mp,
                    hp_consume: *hp,
                    cast_range: *cast_range,
                },
            ),
        }
    }
}

impl BuylistCommands {
    /// Execute the selected buylist command.
    ///
    /// # Errors
    /// Returns an error if the buylist file cannot be read or written.
    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        match self {
            BuylistCommands::List { shop } => buylist::list(ctx, shop.as_deref()),
            BuylistCommands::Add {
                shop,
                item,
                name,
                allow_duplicate,
            } => buylist::add(ctx, shop, item, name.as_deref(), *allow_duplicate),
            BuylistCommands::Remove { shop, index } => buylist::remove(ctx, shop, *index),
            BuylistCommands::Move { shop, from, to } => buylist::move_item(ctx, shop, *from, *to),
            BuylistCommands::Sort { shop } => buylist::sort(ctx, shop.as_deref()),
        }
    }
}

impl MultisellCommands {
    /// Execute the selected multisell command.
    ///
    /// # Errors
    /// Returns an error if the multisell directory or file cannot be read.
    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        match self {
            MultisellCommands::List => multisell::list(ctx),
            MultisellCommands::Show { file } => multisell::show(ctx, file),
            MultisellCommands::Normalize { file } => multisell::normalize(ctx, file),
            MultisellCommands::AddEntry { file } => multisell::add_entry(ctx, file),
            MultisellCommands::DuplicateEntry { file, entry } => multisell::duplicate_entry(ctx, file, *entry),
            MultisellCommands::RemoveEntry { file, entry } => multisell::remove_entry(ctx, file, *entry),
            MultisellCommands::Add {
                file,
                entry,
                side,
                item,
            } => multisell::add_record(ctx, file, *entry, *side, item),
            MultisellCommands::Replace {
                file,
                entry,
                side,
                index,
                item,
            } => multisell::replace_record(ctx, file, *entry, *side, *index, item),
            MultisellCommands::Set {
                file,
                entry,
                side,
                index,
                field,
                value,
            } => multisell::set_field(ctx, file, *entry, *side, *index, field, value),
            MultisellCommands::Remove {
                file,
                entry,
                side,
                index,
            } => multisell::remove_record(ctx, file, *entry, *side, *index),
        }
    }
}

impl ToolCommands {
    /// Execute the selected tool.
    ///
    /// # Errors
    /// Returns an error if the tool reports a failure.
    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        match self {
            ToolCommands::GenerateSets => tools::generate_sets(ctx),
            ToolCommands::SyncNameClass => tools::sync_name_class(ctx),
        }
    }
}
