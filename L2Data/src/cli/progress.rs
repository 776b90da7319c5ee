//! CLI progress display utilities
//!
//! Step indicators with emoji, and rendering of gateway reports.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::gateway::{LogKind, OperationReport};

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Gear - for processing operations
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Check mark - for successful steps
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "+ ");
/// Cross - for failures
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "x ");

/// Print a step indicator: `[1/3] 🔍 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Print a report's collected logs, errors and final message
pub fn print_report(report: &OperationReport) {
    let logs = report.logs.as_deref().unwrap_or_default();
    let total = logs.iter().filter(|log| log.kind == LogKind::Step).count();
    let mut step = 0;

    for log in logs {
        match log.kind {
            LogKind::Step => {
                step += 1;
                print_step(step, total, GEAR, &log.message);
            }
            LogKind::Info => println!("      {}", style(&log.message).dim()),
            LogKind::Success => println!("      {}{}", CHECK, log.message),
            LogKind::Error => println!("      {}{}", CROSS, style(&log.message).red()),
        }
    }

    for error in report.errors.as_deref().unwrap_or_default() {
        eprintln!("{}{}", CROSS, style(error).red());
    }

    if report.success {
        println!("{}{}", CHECK, report.message);
    } else {
        println!("{}{}", CROSS, style(&report.message).red().bold());
    }
}

/// Create a simple spinner
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn simple_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
