//! Set item tools: `SetItemGrp` generation and `name_class` sync

use std::fs;

use super::{LogKind, OperationReport, write_with_backup};
use crate::config::DataLayout;
use crate::error::Result;
use crate::formats::block::BlockKind;
use crate::formats::xml::read_armor_sets;
use crate::setitem::{self, SkillDirectory, chest_assignments, generate_set_entries, render_set_file};

/// Generate `SetItemGrp_Classic-eu.txt` from `armor_sets.xml` and the skill
/// directory
pub fn generate_set_items(layout: &DataLayout) -> OperationReport {
    let mut report = OperationReport::ok("SetItemGrp_Classic-eu.txt generated successfully!");
    report.log("Starting SetItemGrp generation...", LogKind::Step);

    if let Err(e) = run_generate(layout, &mut report) {
        report.log(format!("Error: {e}"), LogKind::Error);
        report.success = false;
        report.message = e.to_string();
    }
    report
}

fn run_generate(layout: &DataLayout, report: &mut OperationReport) -> Result<()> {
    report.log("Reading armor_sets.xml", LogKind::Step);
    let sets = read_armor_sets(layout.armor_sets())?;
    report.log(format!("Found {} armor sets", sets.len()), LogKind::Success);

    report.log("Processing sets and extracting skill effects", LogKind::Step);
    let source = SkillDirectory::new(layout.skills_dir(), layout.buckets.skills);
    let entries = generate_set_entries(&sets, &source);

    report.log("Writing output file", LogKind::Step);
    write_with_backup(layout.block_file(BlockKind::SetItemGroup), &render_set_file(&entries))?;

    report.log(format!("Generated {} set entries", entries.len()), LogKind::Success);
    report.log("SetItemGrp_Classic-eu.txt generated successfully!", LogKind::Success);
    Ok(())
}

/// Point chest items' `name_class` at their `SetItemGrp` rows
pub fn sync_name_class(layout: &DataLayout) -> OperationReport {
    let mut report = OperationReport::ok("ItemName_Classic-eu.txt updated successfully!");
    report.log("Starting name_class update...", LogKind::Step);

    if let Err(e) = run_sync(layout, &mut report) {
        report.log(format!("Error: {e}"), LogKind::Error);
        report.success = false;
        report.message = e.to_string();
    }
    report
}

fn run_sync(layout: &DataLayout, report: &mut OperationReport) -> Result<()> {
    report.log("Reading SetItemGrp_Classic-eu.txt", LogKind::Step);
    let set_text = fs::read_to_string(layout.block_file(BlockKind::SetItemGroup))?;
    let assignments = chest_assignments(&set_text);
    let rows = set_text.lines().filter(|line| !line.trim().is_empty()).count();
    report.log(
        format!("Found {} chest pieces across {} armor sets", assignments.len(), rows),
        LogKind::Success,
    );

    report.log("Reading ItemName_Classic-eu.txt", LogKind::Step);
    let item_name_path = layout.block_file(BlockKind::ItemName);
    let item_text = fs::read_to_string(&item_name_path)?;
    let sync = setitem::sync_name_class(&item_text, &assignments);
    for change in &sync.changes {
        report.log(
            format!("Updated item {}: name_class {} → {}", change.item_id, change.old, change.new),
            LogKind::Info,
        );
    }

    report.log("Writing updated ItemName_Classic-eu.txt", LogKind::Step);
    write_with_backup(&item_name_path, &sync.content)?;

    report.log(
        format!("{} items updated, {} items already correct", sync.changes.len(), sync.already_correct),
        LogKind::Success,
    );
    report.log("ItemName_Classic-eu.txt updated successfully!", LogKind::Success);
    Ok(())
}
