mod analysis;
mod api;
mod cache;
mod clock;
mod config;
mod display;
mod error;
mod rate_limit;
mod validate;

use analysis::engine::ReviewEngine;
use analysis::player::PlayerStats;
use anyhow::Context;
use api::client::RiotApiClient;
use api::transport::UreqTransport;
use cache::TtlCache;
use clap::Parser;
use clock::{Clock, SystemClock};
use config::Config;
use display::output::{display_api_usage, display_error, display_failure, display_info, display_player, display_success};
use error::AppError;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use rate_limit::RateLimiter;
use std::sync::Arc;
use std::panic;
use std::thread::{self, ScopedJoinHandle};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "League Review")]
#[command(about = "Review recent match history and performance for one or more players", long_about = None)]
struct Args {
    /// Riot IDs in Name#TAG form
    #[arg(required = true)]
    riot_ids: Vec<String>,

    /// Platform region (default: RIOT_REGION or na1)
    #[arg(short, long)]
    region: Option<String>,

    /// Number of matches to analyze per player
    #[arg(short, long, default_value = "20")]
    matches: usize,

    /// Print results as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Re-run the review every N seconds, reusing cached data between rounds
    #[arg(long, value_name = "SECS")]
    watch: Option<u64>,
}

struct Target {
    game_name: String,
    tag_line: String,
}

impl Target {
    fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("league_review={}", level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_engine(config: &Config) -> ReviewEngine {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rate_limiter = Arc::new(RateLimiter::new(
        config.rate_per_second,
        config.rate_per_two_minutes,
        clock.clone(),
    ));
    let client = RiotApiClient::new(
        config.api_key.clone(),
        config.max_retries,
        rate_limiter,
        Box::new(UreqTransport::new(config.request_timeout)),
        clock.clone(),
    );
    let cache = TtlCache::new(config.cache_default_ttl, clock);

    ReviewEngine::new(client, cache, config.cache_ttls)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    init_tracing(&config.log_level);

    let region = validate::validate_region(args.region.as_deref().unwrap_or(&config.region))?;
    let match_count = validate::validate_match_count(args.matches, config.max_matches)?;
    let targets = args
        .riot_ids
        .iter()
        .map(|id| {
            validate::parse_riot_id(id).map(|(game_name, tag_line)| Target {
                game_name,
                tag_line,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let engine = build_engine(&config);
    tracing::info!(players = targets.len(), %region, match_count, "starting review");

    loop {
        let failures = review_round(&engine, &targets, &region, match_count, args.json)?;

        let Some(interval) = args.watch else {
            if failures > 0 {
                anyhow::bail!("{} of {} reviews failed", failures, targets.len());
            }
            return Ok(());
        };

        let swept = engine.cache().sweep();
        if !args.json {
            display_info(&format!(
                "Next refresh in {}s ({} stale cache entries dropped)",
                interval, swept
            ));
        }
        thread::sleep(Duration::from_secs(interval));
    }
}

/// Joins workers in spawn order; a panicking worker re-raises its panic here.
fn join_all<T>(handles: Vec<ScopedJoinHandle<'_, T>>) -> Vec<T> {
    handles
        .into_iter()
        .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
        .collect()
}

/// Reviews every target concurrently against the one shared engine and
/// returns how many failed.
fn review_round(
    engine: &ReviewEngine,
    targets: &[Target],
    region: &str,
    match_count: usize,
    json: bool,
) -> anyhow::Result<usize> {
    let progress = MultiProgress::new();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .context("invalid progress template")?;

    let results: Vec<(String, Result<PlayerStats, AppError>)> = thread::scope(|scope| {
        let handles: Vec<_> = targets
            .iter()
            .map(|target| {
                let spinner = progress.add(ProgressBar::new_spinner());
                spinner.set_style(style.clone());
                spinner.set_message(format!("Reviewing {} in {}...", target.riot_id(), region));
                spinner.enable_steady_tick(Duration::from_millis(120));

                scope.spawn(move || {
                    let result =
                        engine.analyze(&target.game_name, &target.tag_line, region, match_count);
                    spinner.finish_and_clear();
                    result
                })
            })
            .collect();

        join_all(handles)
            .into_iter()
            .zip(targets)
            .map(|(result, target)| (target.riot_id(), result))
            .collect()
    });

    let mut reports = Vec::new();
    let mut failures = 0;
    for (riot_id, result) in results {
        match result {
            Ok(stats) => reports.push(stats),
            Err(e) => {
                failures += 1;
                tracing::error!(%riot_id, error = %e, "review failed");
                display_failure(&riot_id, &e);
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for stats in &reports {
            display_player(stats);
            if !stats.matches.is_empty() {
                display_success(&format!(
                    "Reviewed {} matches for {}",
                    stats.matches.len(),
                    stats.player.riot_id
                ));
            }
        }
        display_api_usage(
            engine.client().rate_limiter().status(),
            engine.cache().stats(),
        );
    }

    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_all_keeps_spawn_order() {
        let results = thread::scope(|scope| {
            let handles = (0..4).map(|i| scope.spawn(move || i * 10)).collect();
            join_all(handles)
        });
        assert_eq!(results, vec![0, 10, 20, 30]);
    }

    #[test]
    fn worker_panic_propagates_instead_of_becoming_an_error() {
        let outcome = panic::catch_unwind(|| {
            thread::scope(|scope| {
                let handles = vec![
                    scope.spawn(|| 1),
                    scope.spawn(|| -> i32 { panic!("worker failed") }),
                ];
                join_all(handles)
            })
        });

        let payload = outcome.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"worker failed"));
    }
}
