use std::time::Duration;

use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use submerge::constants::PREF_PATH;
use submerge::utils::HttpFetcher;
use submerge::{run, Settings};

/// Merge proxy subscriptions from many sources into Clash and V2Ray configurations.
///
/// Sources are read from the source list file (default `sources.txt`); output
/// paths can be changed in an optional `pref.toml`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {}

fn main() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let _args = Args::parse();

    let settings = Settings::load_or_default(PREF_PATH);
    let fetcher = HttpFetcher::new(
        Duration::from_secs(settings.fetch_timeout),
        &settings.user_agent,
    )?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = rt.block_on(run(&settings, &fetcher));

    info!(
        "done: {} sources, {} proxies ({} before dedup), {} share links",
        report.sources,
        report.items.len(),
        report.raw_items,
        report.uris
    );
    let failed = report.outputs.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        warn!("{} of {} outputs were not written", failed, report.outputs.len());
    }

    Ok(())
}
