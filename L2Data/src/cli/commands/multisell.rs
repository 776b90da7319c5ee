//! CLI commands for multisell tables

use console::style;

use super::{Context, finish, print_json};
use crate::formats::xml::{MultisellEntry, MultisellSide, MultisellTable, read_multisell};
use crate::gateway::{list_multisell_files, save_multisell};

/// List multisell file names
pub fn list(ctx: &Context) -> anyhow::Result<()> {
    let files = list_multisell_files(&ctx.layout)?;
    if ctx.json {
        return print_json(&files);
    }
    for file in &files {
        println!("{file}");
    }
    println!("{} files", files.len());
    Ok(())
}

/// Show a table's config and entries
pub fn show(ctx: &Context, file: &str) -> anyhow::Result<()> {
    let table = load(ctx, file)?;
    if ctx.json {
        return print_json(&table);
    }

    println!("{}", style(&table.filename).bold());
    for (key, value) in &table.config {
        println!("  {:<16} {}", style(key).dim(), value);
    }
    for (index, entry) in table.items.iter().enumerate() {
        let side = |records: &[crate::formats::xml::XmlRecord]| {
            records
                .iter()
                .map(|r| {
                    format!(
                        "{}x{}",
                        r.get("count").map_or("?", String::as_str),
                        r.get("id").map_or("?", String::as_str)
                    )
                })
                .collect::<Vec<_>>()
                .join(" + ")
        };
        println!("  {index:>3}  {} -> {}", side(&entry.ingredients), side(&entry.productions));
    }
    Ok(())
}

/// Re-write a table, filling in default config flags
pub fn normalize(ctx: &Context, file: &str) -> anyhow::Result<()> {
    let table = load(ctx, file)?;
    save(ctx, file, &table)
}

/// Append a blank entry
pub fn add_entry(ctx: &Context, file: &str) -> anyhow::Result<()> {
    let mut table = load(ctx, file)?;
    let index = table.add_entry();
    tracing::info!("Added entry {} to {}", index, file);
    save(ctx, file, &table)
}

/// Append a copy of the entry at `entry`
pub fn duplicate_entry(ctx: &Context, file: &str, entry: usize) -> anyhow::Result<()> {
    let mut table = load(ctx, file)?;
    let Some(index) = table.duplicate_entry(entry) else {
        anyhow::bail!("{file} has no entry {entry}");
    };
    tracing::info!("Copied entry {} of {} to {}", entry, file, index);
    save(ctx, file, &table)
}

/// Remove the entry at `entry`
pub fn remove_entry(ctx: &Context, file: &str, entry: usize) -> anyhow::Result<()> {
    let mut table = load(ctx, file)?;
    if table.remove_entry(entry).is_none() {
        anyhow::bail!("{file} has no entry {entry}");
    }
    save(ctx, file, &table)
}

/// Add an ingredient or production with count 1
pub fn add_record(ctx: &Context, file: &str, entry: usize, side: MultisellSide, item: &str) -> anyhow::Result<()> {
    let mut table = load(ctx, file)?;
    entry_mut(&mut table, file, entry)?.add_record(side, item);
    save(ctx, file, &table)
}

/// Point an ingredient or production at another item
pub fn replace_record(
    ctx: &Context,
    file: &str,
    entry: usize,
    side: MultisellSide,
    index: usize,
    item: &str,
) -> anyhow::Result<()> {
    let mut table = load(ctx, file)?;
    if !entry_mut(&mut table, file, entry)?.replace_record(side, index, item) {
        anyhow::bail!("Entry {entry} of {file} has no {side} {index}");
    }
    save(ctx, file, &table)
}

/// Set one attribute of an ingredient or production
pub fn set_field(
    ctx: &Context,
    file: &str,
    entry: usize,
    side: MultisellSide,
    index: usize,
    field: &str,
    value: &str,
) -> anyhow::Result<()> {
    let mut table = load(ctx, file)?;
    if !entry_mut(&mut table, file, entry)?.set_field(side, index, field, value) {
        anyhow::bail!("Entry {entry} of {file} has no {side} {index}");
    }
    save(ctx, file, &table)
}

/// Remove an ingredient or production
pub fn remove_record(ctx: &Context, file: &str, entry: usize, side: MultisellSide, index: usize) -> anyhow::Result<()> {
    let mut table = load(ctx, file)?;
    if entry_mut(&mut table, file, entry)?.remove_record(side, index).is_none() {
        anyhow::bail!("Entry {entry} of {file} has no {side} {index}");
    }
    save(ctx, file, &table)
}

fn load(ctx: &Context, file: &str) -> anyhow::Result<MultisellTable> {
    Ok(read_multisell(ctx.layout.multisell_dir().join(file))?)
}

fn entry_mut<'a>(table: &'a mut MultisellTable, file: &str, entry: usize) -> anyhow::Result<&'a mut MultisellEntry> {
    table
        .entry_mut(entry)
        .ok_or_else(|| anyhow::anyhow!("{file} has no entry {entry}"))
}

fn save(ctx: &Context, file: &str, table: &MultisellTable) -> anyhow::Result<()> {
    finish(ctx, &save_multisell(&ctx.layout, file, table))
}
