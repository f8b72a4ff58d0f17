//! One-shot refresh command

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::{Error, Result};
use crate::models::RefreshOutcomeDisplay;
use crate::output::{json, table};

/// Run a single refresh cycle against a fresh cache and report each key.
///
/// Fails only when no task succeeded.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let scheduler = ctx.scheduler();

    let spinner = match ctx.format {
        OutputFormat::Table => spinner(scheduler.tasks().len()),
        OutputFormat::Json => ProgressBar::hidden(),
    };
    let report = scheduler.run_refresh_cycle().await;
    spinner.finish_and_clear();

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<RefreshOutcomeDisplay> =
                report.outcomes.iter().map(RefreshOutcomeDisplay::from).collect();
            println!("{}", table::format_section("Refresh", &rows));
            println!(
                "\n{} refreshed, {} kept stale",
                report.refreshed().to_string().green(),
                report.kept_stale().to_string().yellow()
            );
        }
        OutputFormat::Json => println!(
            "{}",
            json::format_report("refresh", &ctx.config.refresh.season, &report)?
        ),
    }

    if report.refreshed() == 0 && !report.outcomes.is_empty() {
        return Err(Error::Unavailable("every refresh task failed".to_string()));
    }
    Ok(())
}

fn spinner(tasks: usize) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(format!("Refreshing {} keys", tasks));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
