use clap::Subcommand;

use crate::config::DataLayout;
use crate::gateway::OperationReport;

pub mod buylist;
pub mod definitions;
mod execute;
pub mod items;
pub mod multisell;
pub mod skills;
pub mod tools;

pub use definitions::{BuylistCommands, ItemCommands, MultisellCommands, SkillCommands, ToolCommands};

/// Shared settings for every command
pub struct Context {
    pub layout: DataLayout,
    /// Print JSON instead of human-readable text
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ItemName and weapon/armor/etc group records
    Items {
        #[command(subcommand)]
        command: ItemCommands,
    },

    /// SkillName and Skillgrp records
    Skills {
        #[command(subcommand)]
        command: SkillCommands,
    },

    /// Resolve an icon reference to its asset URL
    Icon {
        /// Raw icon value, e.g. "{[icon.weapon_small_sword_i00];[None]}"
        raw: String,

        /// Resolve in skill context (skill_i fallback folder)
        #[arg(long)]
        skill: bool,
    },

    /// Merchant buylists (merchant_buylists.xml)
    Buylist {
        #[command(subcommand)]
        command: BuylistCommands,
    },

    /// Multisell tables (xml/multisell/*.xml)
    Multisell {
        #[command(subcommand)]
        command: MultisellCommands,
    },

    /// Re-write every block file through the codec
    Normalize,

    /// Set item tools
    Tools {
        #[command(subcommand)]
        command: ToolCommands,
    },
}

/// Print a report (JSON or text) and fail when it did not succeed
pub(crate) fn finish(ctx: &Context, report: &OperationReport) -> anyhow::Result<()> {
    if ctx.json {
        println!("{}", report.to_json()?);
    } else {
        super::progress::print_report(report);
    }
    if !report.success {
        anyhow::bail!("{}", report.message);
    }
    Ok(())
}

/// Print a value as pretty JSON
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
