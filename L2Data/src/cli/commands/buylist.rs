//! CLI commands for merchant buylists

use console::style;

use super::{Context, finish, print_json};
use crate::formats::xml::{BuylistItem, ItemDatabase, Tradelist, read_buylists};
use crate::gateway::save_buylists;

/// List tradelists, or the items of one shop
pub fn list(ctx: &Context, shop: Option<&str>) -> anyhow::Result<()> {
    let tradelists = read_buylists(ctx.layout.buylists())?;

    if let Some(shop) = shop {
        let tradelist = find(&tradelists, shop)?;
        if ctx.json {
            return print_json(tradelist);
        }
        println!(
            "{} (npc {}, markup {}%)",
            style(format!("Shop {}", tradelist.shop)).bold(),
            tradelist.npc,
            tradelist.markup
        );
        for (index, item) in tradelist.items.iter().enumerate() {
            println!("  {index:>3}  {:>6}  {}", item.id, item.name);
        }
        return Ok(());
    }

    if ctx.json {
        return print_json(&tradelists);
    }
    for tradelist in &tradelists {
        println!(
            "shop {:>10}  npc {:>6}  markup {:>3}  {} items",
            tradelist.shop,
            tradelist.npc,
            tradelist.markup,
            tradelist.items.len()
        );
    }
    Ok(())
}

/// Add an item; the name comes from the item database unless given
pub fn add(ctx: &Context, shop: &str, item_id: &str, name: Option<&str>, allow_duplicate: bool) -> anyhow::Result<()> {
    let mut tradelists = read_buylists(ctx.layout.buylists())?;

    let name = match name {
        Some(name) => name.to_string(),
        None => {
            let db = ItemDatabase::load_dir(ctx.layout.items_dir());
            match db.get(item_id) {
                Some(item) => item.name.clone(),
                None => anyhow::bail!("Item {item_id} not found in {}", ctx.layout.items_dir().display()),
            }
        }
    };

    let tradelist = find_mut(&mut tradelists, shop)?;
    if !tradelist.add_item(BuylistItem::new(item_id, name), allow_duplicate) {
        anyhow::bail!("Shop {shop} already lists item {item_id}");
    }
    save(ctx, &tradelists)
}

/// Remove the item at `index`
pub fn remove(ctx: &Context, shop: &str, index: usize) -> anyhow::Result<()> {
    let mut tradelists = read_buylists(ctx.layout.buylists())?;
    let Some(removed) = find_mut(&mut tradelists, shop)?.remove_item(index) else {
        anyhow::bail!("Shop {shop} has no item at position {index}");
    };
    tracing::info!("Removed {} ({}) from shop {}", removed.name, removed.id, shop);
    save(ctx, &tradelists)
}

/// Move an item from one position to another
pub fn move_item(ctx: &Context, shop: &str, from: usize, to: usize) -> anyhow::Result<()> {
    let mut tradelists = read_buylists(ctx.layout.buylists())?;
    if !find_mut(&mut tradelists, shop)?.move_item(from, to) {
        anyhow::bail!("Cannot move position {from} to {to} in shop {shop}");
    }
    save(ctx, &tradelists)
}

/// Sort one shop (or every shop) by equipment slot, then price
pub fn sort(ctx: &Context, shop: Option<&str>) -> anyhow::Result<()> {
    let mut tradelists = read_buylists(ctx.layout.buylists())?;
    let db = ItemDatabase::load_dir(ctx.layout.items_dir());

    match shop {
        Some(shop) => find_mut(&mut tradelists, shop)?.sort_by_slot(&db),
        None => tradelists.iter_mut().for_each(|t| t.sort_by_slot(&db)),
    }
    save(ctx, &tradelists)
}

fn find<'a>(tradelists: &'a [Tradelist], shop: &str) -> anyhow::Result<&'a Tradelist> {
    tradelists
        .iter()
        .find(|t| t.shop == shop)
        .ok_or_else(|| anyhow::anyhow!("Shop {shop} not found"))
}

fn find_mut<'a>(tradelists: &'a mut [Tradelist], shop: &str) -> anyhow::Result<&'a mut Tradelist> {
    tradelists
        .iter_mut()
        .find(|t| t.shop == shop)
        .ok_or_else(|| anyhow::anyhow!("Shop {shop} not found"))
}

fn save(ctx: &Context, tradelists: &[Tradelist]) -> anyhow::Result<()> {
    finish(ctx, &save_buylists(&ctx.layout, tradelists))
}
