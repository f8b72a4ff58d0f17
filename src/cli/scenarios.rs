//! Championship scenario command

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::models::{ScenarioDisplay, StandingDisplay};
use crate::output::{json, table};

/// Print the forecast for the leading drivers.
pub async fn run(opts: &GlobalOptions, top: Option<usize>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let top_n = top.unwrap_or(ctx.config.refresh.scenario_top_n).max(1);

    let forecast = ctx.app_state().scenario_forecast(top_n).await?;

    match ctx.format {
        OutputFormat::Table => {
            match &forecast.next_race {
                Some(race) => println!(
                    "Next race: {} (round {}{})",
                    race.name.as_deref().unwrap_or("TBA").bold(),
                    race.round.as_deref().unwrap_or("?"),
                    if race.is_sprint { ", sprint weekend" } else { "" }
                ),
                None => println!("{}", "Season complete".bold()),
            }
            println!(
                "{} races left, up to {} points available\n",
                forecast.remaining_races, forecast.max_points_remaining
            );

            let standings: Vec<StandingDisplay> = forecast
                .current_standings
                .iter()
                .map(StandingDisplay::from)
                .collect();
            println!("{}", table::format_section("Standings", &standings));

            let scenarios: Vec<ScenarioDisplay> =
                forecast.scenarios.iter().map(ScenarioDisplay::from).collect();
            println!("\n{}", table::format_section("If they win next", &scenarios));
        }
        OutputFormat::Json => println!(
            "{}",
            json::format_report("scenarios", &ctx.config.refresh.season, &forecast)?
        ),
    }

    Ok(())
}
