//! Derived statistics
//!
//! Pure functions over upstream data. Nothing here fails: missing or
//! unparseable inputs become zero or `None`.

pub mod dossier;
pub mod scenario;

pub use dossier::{DriverDossier, Streak, StreakKind, compute_driver_dossier};
pub use scenario::{ScenarioForecast, StandingEntry, compute_scenario_forecast};

/// Parse the leading decimal digits of `s`, or 0.
///
/// Upstream sends positions as strings and sometimes as codes ("R", "D").
pub fn parse_leading_int(s: Option<&str>) -> u32 {
    let Some(s) = s else { return 0 };
    let digits: String = s
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Parse the leading decimal number of `s`, or 0.
pub fn parse_points(s: Option<&str>) -> f64 {
    let Some(s) = s else { return 0.0 };
    let s = s.trim_start();

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '-' | '+' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int(Some("12")), 12);
        assert_eq!(parse_leading_int(Some(" 7th")), 7);
        assert_eq!(parse_leading_int(Some("R")), 0);
        assert_eq!(parse_leading_int(Some("")), 0);
        assert_eq!(parse_leading_int(None), 0);
    }

    #[test]
    fn test_parse_points() {
        assert_eq!(parse_points(Some("25")), 25.0);
        assert_eq!(parse_points(Some("0.5")), 0.5);
        assert_eq!(parse_points(Some("12.5pts")), 12.5);
        assert_eq!(parse_points(Some("-3")), -3.0);
        assert_eq!(parse_points(Some("n/a")), 0.0);
        assert_eq!(parse_points(Some(".")), 0.0);
        assert_eq!(parse_points(None), 0.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(8.25), 8.3);
        assert_eq!(round1(7.0 / 3.0), 2.3);
        assert_eq!(round1(0.0), 0.0);
    }
}
