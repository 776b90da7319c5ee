//! CLI commands for item records

use console::style;

use super::{Context, finish, print_json};
use crate::formats::block::{BlockKind, BlockRecord, RecordKey};
use crate::formats::{IconContext, icon_asset_url};
use crate::gateway::{delete_item_everywhere, save_families};
use crate::store::DataStore;

/// Show an item's `ItemName` fields, its group record and icon
pub fn show(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let store = DataStore::load(&ctx.layout)?;
    let Some(item) = store.get(BlockKind::ItemName, &RecordKey::single(id)) else {
        anyhow::bail!("Item {id} not found");
    };
    let group = store.group_record(id);
    let icon = group
        .and_then(|(_, record)| record.get("icon"))
        .and_then(|raw| icon_asset_url(raw, IconContext::Item));

    if ctx.json {
        return print_json(&serde_json::json!({
            "item": item,
            "groupType": group.map(|(kind, _)| kind),
            "group": group.map(|(_, record)| record),
            "icon": icon,
        }));
    }

    println!("{}", style(format!("Item {id}")).bold());
    print_fields(item);
    if let Some((kind, record)) = group {
        println!();
        println!("{}", style(format!("{kind} record")).bold());
        print_fields(record);
    }
    if let Some(icon) = icon {
        println!();
        println!("Icon: {icon}");
    }
    Ok(())
}

pub(crate) fn print_fields(record: &BlockRecord) {
    for (key, value) in record.iter() {
        println!("  {:<28} {}", style(key).dim(), value);
    }
}

/// Set an `ItemName` text field, or a raw group field with `group`
pub fn set(ctx: &Context, id: &str, field: &str, value: &str, group: bool) -> anyhow::Result<()> {
    let mut store = DataStore::load(&ctx.layout)?;

    let kind = if group {
        let Some((kind, _)) = store.group_record(id) else {
            anyhow::bail!("Item {id} has no weapon, armor or etc record");
        };
        store.set_group_field(kind, id, field, value)?;
        kind
    } else {
        store.set_item_text(id, field, value)?;
        BlockKind::ItemName
    };

    finish(ctx, &save_families(&ctx.layout, &store, &[kind]))
}

/// Flip a `0`/`1` flag on an `ItemName` record
pub fn toggle(ctx: &Context, id: &str, field: &str) -> anyhow::Result<()> {
    let mut store = DataStore::load(&ctx.layout)?;
    let value = store.toggle_flag(BlockKind::ItemName, &RecordKey::single(id), field)?;

    let mut report = save_families(&ctx.layout, &store, &[BlockKind::ItemName]);
    if report.success {
        report.message = format!("Item {id}: {field}={value}");
    }
    finish(ctx, &report)
}

/// Copy an item under the next free id
pub fn duplicate(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let mut store = DataStore::load(&ctx.layout)?;
    let new_id = store.duplicate_item(id)?;

    let mut kinds = vec![BlockKind::ItemName];
    if let Some((kind, _)) = store.group_record(&new_id) {
        kinds.push(kind);
    }

    let mut report = save_families(&ctx.layout, &store, &kinds);
    if report.success {
        report.message = format!("Item duplicated with ID: {new_id}");
    }
    finish(ctx, &report)
}

/// Delete an item from every file it appears in
pub fn delete(ctx: &Context, id: &str) -> anyhow::Result<()> {
    finish(ctx, &delete_item_everywhere(&ctx.layout, id))
}

/// Resolve an icon reference
pub fn icon(ctx: &Context, raw: &str, skill: bool) -> anyhow::Result<()> {
    let icon_ctx = if skill { IconContext::Skill } else { IconContext::Item };
    let Some(url) = icon_asset_url(raw, icon_ctx) else {
        anyhow::bail!("No icon in {raw}");
    };

    if ctx.json {
        print_json(&serde_json::json!({ "raw": raw, "url": url }))
    } else {
        println!("{url}");
        Ok(())
    }
}
