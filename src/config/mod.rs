//! Configuration management for Pitwall

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listener settings
    pub server: ServerConfig,

    /// Background refresh settings
    pub refresh: RefreshConfig,

    /// Cache lifetimes per data kind
    pub ttl: TtlConfig,

    /// Upstream API locations and timeouts
    pub upstream: UpstreamConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

/// Background refresh settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between refresh cycles
    pub interval_secs: u64,

    /// Season identifier passed to Jolpica ("current" or a year)
    pub season: String,

    /// Driver whose results and qualifying are kept warm
    pub focus_driver: String,

    /// Number of leading drivers included in scenario forecasts
    pub scenario_top_n: usize,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5 * 60,
            season: "current".to_string(),
            focus_driver: "alonso".to_string(),
            scenario_top_n: crate::stats::scenario::DEFAULT_TOP_N,
        }
    }
}

/// Cache lifetimes in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TtlConfig {
    pub schedule: u64,
    pub standings: u64,
    pub results: u64,
    pub news: u64,
    pub driver: u64,
    pub meetings: u64,
}

impl Default for TtlConfig {
    fn default() -> Self {
        Self {
            schedule: 60 * 60,
            standings: 10 * 60,
            results: 10 * 60,
            news: 5 * 60,
            driver: 10 * 60,
            meetings: 60 * 60,
        }
    }
}

/// A single RSS or Atom news source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    /// Display name attached to every article from this feed
    pub name: String,

    /// Feed URL
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Upstream API locations and timeouts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub jolpica_url: String,
    pub openf1_url: String,

    /// Per-request timeout for the statistics APIs
    pub timeout_secs: u64,

    /// Per-request timeout for news feeds
    pub news_timeout_secs: u64,

    pub feeds: Vec<FeedSource>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            jolpica_url: crate::client::jolpica::JOLPICA_BASE_URL.to_string(),
            openf1_url: crate::client::openf1::OPENF1_BASE_URL.to_string(),
            timeout_secs: 10,
            news_timeout_secs: 8,
            feeds: default_feeds(),
        }
    }
}

fn default_feeds() -> Vec<FeedSource> {
    vec![
        FeedSource::new(
            "Formula 1",
            "https://www.formula1.com/content/fom-website/en/latest/all.xml",
        ),
        FeedSource::new("Autosport", "https://www.autosport.com/rss/feed/f1"),
        FeedSource::new("Motorsport", "https://www.motorsport.com/rss/f1/news/"),
    ]
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".pitwall").join("config.yaml"))
    }

    /// Load configuration from an explicit path, or from the default path.
    ///
    /// An explicitly named file must exist. A missing default file yields the
    /// built-in defaults so the server runs without any setup.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::load_from(PathBuf::from(p))?,
            None => {
                let default_path = Self::default_path()?;
                if default_path.exists() {
                    Self::load_from(default_path)?
                } else {
                    log::debug!("No config at {}, using defaults", default_path.display());
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path).into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Reject settings the scheduler or clients cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.refresh.interval_secs == 0 {
            return Err(ConfigError::Invalid("refresh.interval_secs must be at least 1".into()).into());
        }
        if self.refresh.focus_driver.trim().is_empty() {
            return Err(ConfigError::Invalid("refresh.focus_driver must not be empty".into()).into());
        }
        if self.refresh.scenario_top_n == 0 {
            return Err(ConfigError::Invalid("refresh.scenario_top_n must be at least 1".into()).into());
        }

        let ttl = &self.ttl;
        let ttls = [
            ("schedule", ttl.schedule),
            ("standings", ttl.standings),
            ("results", ttl.results),
            ("news", ttl.news),
            ("driver", ttl.driver),
            ("meetings", ttl.meetings),
        ];
        if let Some((name, _)) = ttls.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigError::Invalid(format!("ttl.{} must be at least 1 second", name)).into());
        }

        if self.upstream.timeout_secs == 0 || self.upstream.news_timeout_secs == 0 {
            return Err(ConfigError::Invalid("upstream timeouts must be at least 1 second".into()).into());
        }
        if let Some(feed) = self.upstream.feeds.iter().find(|f| f.url.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("feed '{}' has no url", feed.name)).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.refresh.interval_secs, 300);
        assert_eq!(config.refresh.focus_driver, "alonso");
        assert_eq!(config.ttl.schedule, 3600);
        assert_eq!(config.ttl.news, 300);
        assert_eq!(config.upstream.feeds.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "server:\n  port: 8080\nrefresh:\n  focus_driver: hamilton\n").unwrap();

        let config = Config::load_at(path.to_str()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.refresh.focus_driver, "hamilton");
        assert_eq!(config.refresh.season, "current");
        assert_eq!(config.ttl.standings, 600);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.yaml");

        let err = Config::load_at(path.to_str()).unwrap_err();

        assert!(matches!(err, Error::Config(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "server: [port").unwrap();

        let err = Config::load_at(path.to_str()).unwrap_err();

        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = Config::default();
        config.refresh.interval_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = Config::default();
        config.ttl.news = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ttl.news"));
    }

    #[test]
    fn test_custom_feeds_parse() {
        let yaml = "upstream:\n  feeds:\n    - name: Local\n      url: http://localhost/rss\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            config.upstream.feeds,
            vec![FeedSource::new("Local", "http://localhost/rss")]
        );
        assert_eq!(config.upstream.timeout_secs, 10);
    }
}
