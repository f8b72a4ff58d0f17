//! Driver dossier command

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::models::{QualifyingDisplay, RaceRowDisplay};
use crate::output::formatters::{NONE, format_delta, format_points};
use crate::output::{json, table};
use crate::stats::DriverDossier;

/// Fetch a driver's season and print the dossier.
pub async fn run(opts: &GlobalOptions, driver_id: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let state = ctx.app_state();
    let driver_id = driver_id.unwrap_or(&ctx.config.refresh.focus_driver);

    let dossier = state.driver_dossier(driver_id).await?;

    match ctx.format {
        OutputFormat::Table => print_dossier(&dossier),
        OutputFormat::Json => println!(
            "{}",
            json::format_report("dossier", &ctx.config.refresh.season, &dossier)?
        ),
    }

    Ok(())
}

fn print_dossier(dossier: &DriverDossier) {
    let team = dossier
        .team
        .as_ref()
        .and_then(|t| t.name.as_deref())
        .unwrap_or(NONE);
    println!("{} ({})", dossier.driver.full_name().bold(), team);
    println!(
        "Championship: {}  Points: {}  Wins: {}",
        dossier.position.as_deref().unwrap_or(NONE),
        dossier.points,
        dossier.wins
    );

    let stats = &dossier.stats;
    println!(
        "Races: {}  Best: {}  Avg: {}  DNFs: {}  Pts/race: {}  Streak: {} {}",
        stats.total_races,
        stats.best_finish.map_or_else(|| NONE.to_string(), |p| format!("P{}", p)),
        stats.avg_finish.map_or_else(|| NONE.to_string(), format_points),
        stats.dnfs,
        stats.points_per_race.map_or_else(|| NONE.to_string(), format_points),
        stats.streak.count,
        match stats.streak.kind {
            crate::stats::StreakKind::Points => "in the points".green(),
            crate::stats::StreakKind::NoPoints => "without points".red(),
        }
    );

    if let Some(mate) = &dossier.teammate {
        println!(
            "Teammate: {} ({} pts, {})",
            mate.driver.full_name(),
            mate.points.as_deref().unwrap_or(NONE),
            format_delta(mate.points_delta)
        );
    }

    let races: Vec<RaceRowDisplay> = dossier.races.iter().map(RaceRowDisplay::from).collect();
    println!("\n{}", table::format_section("Races", &races));

    let quali: Vec<QualifyingDisplay> =
        dossier.quali_data.iter().map(QualifyingDisplay::from).collect();
    println!("\n{}", table::format_section("Qualifying", &quali));
}
