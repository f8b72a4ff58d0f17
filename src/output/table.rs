//! Titled table sections for terminal output

use colored::Colorize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Render `rows` under a bold title carrying the row count.
///
/// An empty section is a single line, so a driver with no qualifying data
/// does not print an empty frame.
pub fn format_section<T: Tabled>(title: &str, rows: &[T]) -> String {
    if rows.is_empty() {
        return format!("{} {}", title.bold(), "(none)".dimmed());
    }

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{} ({})\n{}", title.bold(), rows.len(), table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct StandingRow {
        #[tabled(rename = "DRIVER")]
        driver: String,
        #[tabled(rename = "POINTS")]
        points: String,
    }

    fn row(driver: &str, points: &str) -> StandingRow {
        StandingRow {
            driver: driver.to_string(),
            points: points.to_string(),
        }
    }

    #[test]
    fn test_empty_section_is_one_line() {
        let rows: Vec<StandingRow> = vec![];
        let out = format_section("Qualifying", &rows);

        assert!(out.contains("Qualifying"));
        assert!(out.contains("(none)"));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_section_has_count_and_rounded_frame() {
        let out = format_section(
            "Standings",
            &[row("max_verstappen", "60"), row("leclerc", "58")],
        );

        assert!(out.contains("Standings"));
        assert!(out.contains("(2)"));
        assert!(out.contains("DRIVER"));
        assert!(out.contains("leclerc"));
        assert!(out.contains("╭"));
        assert!(out.contains("╰"));
    }
}
