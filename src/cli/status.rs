//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::resolve_config;
use crate::config::Config;
use crate::error::Result;
use crate::store::FixtureSource;

fn join_codes(codes: &[u16]) -> String {
    codes
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run the status command to display configuration status
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "fleetop Configuration Status".bold());

    // Config file location
    match opts.config_ref() {
        Some(path) => println!("Config file: {}", path.cyan()),
        None => {
            let path = Config::default_path()?;
            if path.exists() {
                println!("Config file: {}", path.display().to_string().cyan());
            } else {
                println!(
                    "Config file: {} {}",
                    path.display().to_string().cyan(),
                    "(not found, using defaults)".dimmed()
                );
            }
        }
    }
    println!();

    let config = match resolve_config(opts) {
        Ok(config) => config,
        Err(err) => {
            println!("{} {}", "✗".red(), err);
            println!();
            return Ok(());
        }
    };

    // Data source
    if config.fixture_mode {
        let source = match &config.fixtures_path {
            Some(path) => FixtureSource::from_path(path),
            None => FixtureSource::bundled(),
        };
        let label = source
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled".to_string());

        match source.load().await {
            Ok(data) => println!(
                "{} Fixture data: {} ({} cars, {} users)",
                "✓".green(),
                label.cyan(),
                data.cars.len(),
                data.users.len()
            ),
            Err(err) => println!("{} Fixture data: {} ({})", "✗".red(), label.cyan(), err),
        }
    } else {
        println!("{} API: {}", "✓".green(), config.api_url.cyan());
    }

    // Cache and retry settings
    let cache = &config.cache;
    println!(
        "{} Cache: ttl {}s, max {} entries{}",
        "○".dimmed(),
        cache.ttl_secs,
        cache.max_entries,
        if cache.excluded_key_patterns.is_empty() {
            String::new()
        } else {
            format!(", excluding {}", cache.excluded_key_patterns.join(", "))
        }
    );

    let retry = &config.retry;
    println!(
        "{} Retry: {} retries, base delay {}ms, on {}",
        "○".dimmed(),
        retry.max_retries,
        retry.base_delay_ms,
        join_codes(&retry.retryable_status_codes)
    );
    println!();

    Ok(())
}
