//! CLI commands for whole-datapack tools

use std::time::Instant;

use super::{Context, finish};
use crate::cli::progress::{DISK, LOOKING_GLASS, print_done, print_step, simple_spinner};
use crate::gateway::{self, save_families};
use crate::store::DataStore;

/// Load every block family and write it back through the codec
pub fn normalize(ctx: &Context) -> anyhow::Result<()> {
    let started = Instant::now();
    if !ctx.json {
        print_step(1, 2, LOOKING_GLASS, "Loading block files...");
    }
    let store = DataStore::load(&ctx.layout)?;
    tracing::info!("Loaded {} records", store.len());

    if !ctx.json {
        print_step(2, 2, DISK, "Writing block files...");
    }
    // Families without a file on disk stay absent
    let kinds: Vec<_> = DataStore::KINDS
        .into_iter()
        .filter(|kind| ctx.layout.block_file(*kind).is_file())
        .collect();
    let report = save_families(&ctx.layout, &store, &kinds);
    finish(ctx, &report)?;
    if !ctx.json {
        print_done(started.elapsed());
    }
    Ok(())
}

/// Generate `SetItemGrp_Classic-eu.txt`
pub fn generate_sets(ctx: &Context) -> anyhow::Result<()> {
    let started = Instant::now();
    let report = if ctx.json {
        gateway::generate_set_items(&ctx.layout)
    } else {
        let spinner = simple_spinner("Generating set items...");
        let report = gateway::generate_set_items(&ctx.layout);
        spinner.finish_and_clear();
        report
    };

    finish(ctx, &report)?;
    if !ctx.json {
        print_done(started.elapsed());
    }
    Ok(())
}

/// Point chest items' `name_class` at their set rows
pub fn sync_name_class(ctx: &Context) -> anyhow::Result<()> {
    let started = Instant::now();
    let report = gateway::sync_name_class(&ctx.layout);
    finish(ctx, &report)?;
    if !ctx.json {
        print_done(started.elapsed());
    }
    Ok(())
}
