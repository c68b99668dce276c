//! Command execution context
//!
//! Resolves configuration and builds the fleet store each command runs against.

use std::path::Path;
use std::sync::Arc;

use log::debug;
use tokio::task::JoinHandle;

use crate::cache::{ResponseCache, SWEEP_INTERVAL, spawn_sweep_task};
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::HttpClient;
use crate::config::Config;
use crate::error::Result;
use crate::store::{DataSource, FixtureSource, FleetStore};

/// Context for command execution containing config, store, and runtime options.
///
/// Owns the process-wide response cache (through the store) and the background task
/// that sweeps expired entries out of it.
pub struct CommandContext {
    /// Resolved configuration (defaults, file, then flags/env)
    pub config: Config,
    /// Fleet store backed by the API or a fixture document
    pub store: FleetStore,
    /// Output format preference
    pub format: OutputFormat,
    sweep: Option<JoinHandle<()>>,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if the config file cannot be loaded or the resolved
    /// configuration is invalid.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = resolve_config(opts)?;
        let cache = Arc::new(ResponseCache::with_config(config.cache.to_cache_config()));

        let (source, sweep) = if config.fixture_mode {
            let fixtures = match &config.fixtures_path {
                Some(path) => FixtureSource::from_path(path),
                None => FixtureSource::bundled(),
            };
            debug!("Using fixture data ({:?})", fixtures.path());
            (DataSource::Fixture(fixtures), None)
        } else {
            let http = HttpClient::new(config.api_url.as_str())?
                .with_retry_policy(config.retry.to_retry_policy());
            debug!("Using API at {}", config.api_url);
            let sweep = spawn_sweep_task(cache.clone(), SWEEP_INTERVAL);
            (DataSource::Remote(http), Some(sweep))
        };

        Ok(Self {
            store: FleetStore::new(source, cache),
            format: opts.format,
            config,
            sweep,
        })
    }
}

impl Drop for CommandContext {
    fn drop(&mut self) {
        if let Some(sweep) = self.sweep.take() {
            sweep.abort();
            let stats = self.store.cache().stats();
            debug!(
                "Response cache: {} entries ({} expired)",
                stats.total_entries, stats.expired_entries
            );
        }
    }
}

/// Load the config file and apply flag/env overrides.
pub fn resolve_config(opts: &GlobalOptions) -> Result<Config> {
    let config = Config::load(opts.config_ref().map(Path::new))?
        .with_overrides(opts.api_url_ref(), opts.fixtures_ref());
    config.validate()?;
    Ok(config)
}
