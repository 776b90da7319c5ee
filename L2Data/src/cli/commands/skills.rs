//! CLI commands for skill records

use console::style;

use super::items::print_fields;
use super::{Context, finish, print_json};
use crate::formats::block::{BlockKind, BlockRecord, RecordKey};
use crate::gateway::{OperationReport, delete_skill_everywhere, save_families};
use crate::store::{DataStore, DuplicateSkill, skill_matches};

const SKILL_FILES: [BlockKind; 2] = [BlockKind::SkillName, BlockKind::SkillGroup];

/// Show matching `SkillName` rows with their `Skillgrp` rows
pub fn show(ctx: &Context, id: &str, level: Option<&str>, sublevel: Option<&str>) -> anyhow::Result<()> {
    let store = DataStore::load(&ctx.layout)?;
    let names: Vec<&BlockRecord> = store
        .skill_names
        .iter()
        .filter(|r| skill_matches(r, id, level, sublevel))
        .collect();
    if names.is_empty() {
        anyhow::bail!("Skill {id} not found");
    }

    let rows: Vec<(&BlockRecord, Option<&BlockRecord>)> = names
        .into_iter()
        .map(|name| {
            let group = name
                .identity()
                .and_then(|key| store.get(BlockKind::SkillGroup, &key));
            (name, group)
        })
        .collect();

    if ctx.json {
        let json: Vec<_> = rows
            .iter()
            .map(|(name, group)| serde_json::json!({ "skill": name, "group": group }))
            .collect();
        return print_json(&json);
    }

    for (name, group) in rows {
        let title = name.identity().map(|key| key.to_string()).unwrap_or_default();
        println!("{}", style(format!("Skill {title}")).bold());
        print_fields(name);
        if let Some(group) = group {
            println!("  {}", style("skillgrp").underlined());
            print_fields(group);
        }
        println!();
    }
    Ok(())
}

/// Set a `SkillName` text field, or a raw `Skillgrp` field with `group`
pub fn set(
    ctx: &Context,
    id: &str,
    level: &str,
    sublevel: &str,
    field: &str,
    value: &str,
    group: bool,
) -> anyhow::Result<()> {
    let mut store = DataStore::load(&ctx.layout)?;
    let key = RecordKey::skill(id, level, sublevel);

    let kind = if group {
        store.set_skill_group_field(&key, field, value)?;
        BlockKind::SkillGroup
    } else {
        store.set_skill_text(&key, field, value)?;
        BlockKind::SkillName
    };

    finish(ctx, &save_families(&ctx.layout, &store, &[kind]))
}

/// Move one skill level to another id in both skill files
pub fn rename(ctx: &Context, id: &str, level: &str, sublevel: &str, new_id: &str) -> anyhow::Result<()> {
    let mut store = DataStore::load(&ctx.layout)?;
    let key = RecordKey::skill(id, level, sublevel);

    let new_key = match store.rename_skill_id(&key, new_id) {
        Ok(new_key) => new_key,
        Err(e) => return finish(ctx, &OperationReport::failed(e.to_string())),
    };

    let mut report = save_families(&ctx.layout, &store, &SKILL_FILES);
    if report.success {
        report.message = format!("Skill {key} renamed to {new_key}");
    }
    finish(ctx, &report)
}

/// Delete skill rows straight from the files
pub fn delete(ctx: &Context, id: &str, level: Option<&str>, sublevel: Option<&str>) -> anyhow::Result<()> {
    finish(ctx, &delete_skill_everywhere(&ctx.layout, id, level, sublevel))
}

/// Copy every level of a skill to a new id
pub fn duplicate(ctx: &Context, id: &str, options: &DuplicateSkill) -> anyhow::Result<()> {
    let mut store = DataStore::load(&ctx.layout)?;
    let copied = store.duplicate_skill(id, options)?;

    let mut report = save_families(&ctx.layout, &store, &SKILL_FILES);
    if report.success {
        report.message = format!(
            "Skill {id} duplicated as {} \"{}\" ({} levels, {} skillgrp rows)",
            copied.new_id, copied.name, copied.levels, copied.group_rows
        );
    }
    finish(ctx, &report)
}
