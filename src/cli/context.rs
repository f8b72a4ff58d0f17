//! Command execution context
//!
//! Loads configuration, applies CLI overrides and wires the upstream
//! clients, cache and refresh plan that every command shares.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheOrFetch, CacheTtl, TtlCache};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{JolpicaClient, NewsClient, OpenF1Client, Upstreams};
use crate::config::Config;
use crate::error::Result;
use crate::refresh::{RefreshScheduler, refresh_plan};
use crate::server::AppState;

/// Context for command execution containing config, upstreams and the cache.
pub struct CommandContext {
    /// Loaded configuration with CLI overrides applied
    pub config: Config,
    /// Upstream collaborators
    pub upstreams: Upstreams,
    /// Process-wide cache
    pub cache: Arc<TtlCache>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if the config cannot be loaded or a client cannot be built.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;

        if let Some(url) = &opts.jolpica_url {
            config.upstream.jolpica_url = url.clone();
        }
        if let Some(url) = &opts.openf1_url {
            config.upstream.openf1_url = url.clone();
        }

        let upstreams = build_upstreams(&config)?;

        Ok(Self {
            config,
            upstreams,
            cache: Arc::new(TtlCache::new()),
            format: opts.format,
        })
    }

    pub fn ttl(&self) -> CacheTtl {
        CacheTtl::from(&self.config.ttl)
    }

    /// Scheduler running the standard refresh plan against this context's cache
    pub fn scheduler(&self) -> RefreshScheduler {
        let plan = refresh_plan(
            &self.upstreams,
            &self.config.refresh.season,
            &self.config.refresh.focus_driver,
            &self.ttl(),
        );
        RefreshScheduler::new(
            self.cache.clone(),
            plan,
            Duration::from_secs(self.config.refresh.interval_secs),
        )
    }

    /// Handler state sharing this context's cache
    pub fn app_state(&self) -> AppState {
        AppState::new(
            CacheOrFetch::new(self.cache.clone(), self.ttl()),
            self.upstreams.clone(),
            &self.config.refresh.season,
            &self.config.refresh.focus_driver,
            self.config.refresh.scenario_top_n,
        )
    }
}

fn build_upstreams(config: &Config) -> Result<Upstreams> {
    let upstream = &config.upstream;
    let timeout = Duration::from_secs(upstream.timeout_secs);

    let f1 = JolpicaClient::new(upstream.jolpica_url.clone(), timeout)?;
    let live = OpenF1Client::new(upstream.openf1_url.clone(), timeout)?;
    let news = NewsClient::new(
        upstream.feeds.clone(),
        Duration::from_secs(upstream.news_timeout_secs),
    )?;

    Ok(Upstreams {
        f1: Arc::new(f1),
        live: Arc::new(live),
        news: Arc::new(news),
    })
}
