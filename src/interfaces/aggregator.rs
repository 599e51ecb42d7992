//! One aggregation run: read the source list, fetch and parse every source,
//! deduplicate, then write each output format.

use std::fmt;

use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};

use crate::generator::{proxy_to_clash, proxy_to_single, proxy_to_v2ray, EmitError};
use crate::models::{Aggregate, AggregateItem};
use crate::parser::detect::{extract_uri_lines, ContentKind};
use crate::parser::subparser::{parse_content, LinkFailure, SourceContent, SourceEntry};
use crate::settings::Settings;
use crate::utils::{file_exists, file_get, file_write, Fetcher};

/// Read the source list. A missing or unreadable file gives an empty list.
pub fn load_sources(path: &str) -> Vec<SourceEntry> {
    match file_get(path) {
        Ok(content) => parse_source_list(&content),
        Err(e) => {
            warn!("cannot read source list {}: {}", path, e);
            Vec::new()
        }
    }
}

pub fn parse_source_list(content: &str) -> Vec<SourceEntry> {
    content.lines().filter_map(SourceEntry::from_line).collect()
}

/// Everything gathered from all sources, in source-list order.
#[derive(Debug, Default)]
pub struct Collected {
    pub items: Vec<AggregateItem>,
    /// Every share link seen, untranslated and not deduplicated.
    pub uris: Vec<String>,
    pub failures: Vec<LinkFailure>,
    /// Sources that produced no body.
    pub empty_sources: usize,
}

async fn fetch_source<F: Fetcher>(entry: &SourceEntry, fetcher: &F) -> Option<String> {
    match entry {
        SourceEntry::Url(url) => {
            info!("fetching subscription: {}", url);
            fetcher.fetch(url).await
        }
        SourceEntry::Literal(link) => Some(link.clone()),
    }
}

fn source_content(entry: &SourceEntry, body: &str) -> SourceContent {
    match entry {
        SourceEntry::Url(_) => parse_content(body),
        SourceEntry::Literal(link) => SourceContent {
            kind: ContentKind::Plain,
            entries: Vec::new(),
            uris: extract_uri_lines(link),
        },
    }
}

/// Fetch and parse every source.
///
/// Up to `concurrency` downloads run at once, but results are consumed in
/// source-list order, so the outcome does not depend on which download
/// finishes first.
pub async fn collect<F: Fetcher>(
    sources: &[SourceEntry],
    fetcher: &F,
    concurrency: usize,
) -> Collected {
    let bodies: Vec<Option<String>> = stream::iter(sources)
        .map(|entry| fetch_source(entry, fetcher))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut collected = Collected::default();
    for (entry, body) in sources.iter().zip(bodies) {
        let label = entry.label();
        let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
            debug!("{} contributed nothing", label);
            collected.empty_sources += 1;
            continue;
        };

        let content = source_content(entry, &body);
        info!("{} recognised as {}", label, content.kind);
        let (items, uris, failures) = content.into_items(&label);
        info!(
            "{}: {} items, {} links, {} unparsable",
            label,
            items.len(),
            uris.len(),
            failures.len()
        );
        collected.items.extend(items);
        collected.uris.extend(uris);
        collected.failures.extend(failures);
    }
    collected
}

/// Output formats written by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    Clash,
    V2Ray,
    Subscription,
    RawUris,
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputTarget::Clash => "Clash",
            OutputTarget::V2Ray => "V2Ray",
            OutputTarget::Subscription => "link subscription",
            OutputTarget::RawUris => "raw URI list",
        })
    }
}

/// Result of writing one output.
#[derive(Debug)]
pub struct TargetOutcome {
    pub target: OutputTarget,
    pub path: String,
    pub result: Result<(), EmitError>,
}

/// Summary of a run.
#[derive(Debug)]
pub struct RunReport {
    pub sources: usize,
    pub raw_items: usize,
    pub items: Vec<AggregateItem>,
    pub uris: usize,
    pub failures: Vec<LinkFailure>,
    pub outputs: Vec<TargetOutcome>,
}

impl RunReport {
    pub fn outcome(&self, target: OutputTarget) -> Option<&TargetOutcome> {
        self.outputs.iter().find(|o| o.target == target)
    }
}

fn emit_clash(settings: &Settings, items: &[AggregateItem]) -> Result<(), EmitError> {
    if !file_exists(&settings.clash_template) {
        return Err(EmitError::TemplateMissing(settings.clash_template.clone()));
    }
    let base = file_get(&settings.clash_template)?;
    let output = proxy_to_clash(items, &base)?;
    file_write(&settings.clash_output, &output)?;
    Ok(())
}

fn emit_v2ray(settings: &Settings, items: &[AggregateItem]) -> Result<(), EmitError> {
    let base = if file_exists(&settings.v2ray_template) {
        Some(file_get(&settings.v2ray_template)?)
    } else {
        warn!(
            "V2Ray template {} not found, using the built-in skeleton",
            settings.v2ray_template
        );
        None
    };
    let output = proxy_to_v2ray(items, base.as_deref())?;
    file_write(&settings.v2ray_output, &output)?;
    Ok(())
}

fn emit_subscription(settings: &Settings, items: &[AggregateItem]) -> Result<(), EmitError> {
    file_write(&settings.subscription_output, &proxy_to_single(items))?;
    Ok(())
}

fn emit_raw_uris(settings: &Settings, uris: &[String]) -> Result<(), EmitError> {
    file_write(&settings.raw_uri_output, &uris.join("\n"))?;
    Ok(())
}

fn outcome(target: OutputTarget, path: &str, result: Result<(), EmitError>) -> TargetOutcome {
    match &result {
        Ok(()) => info!("wrote {} output to {}", target, path),
        Err(e) => error!("{} output not written: {}", target, e),
    }
    TargetOutcome {
        target,
        path: path.to_string(),
        result,
    }
}

/// Run the whole pipeline once with the given settings.
///
/// Only a failure to produce a particular output is reported, and it never
/// stops the other outputs from being written.
pub async fn run<F: Fetcher>(settings: &Settings, fetcher: &F) -> RunReport {
    let sources = load_sources(&settings.source_list);
    info!("{} sources listed in {}", sources.len(), settings.source_list);

    let collected = collect(&sources, fetcher, settings.max_concur_threads).await;
    let aggregate: Aggregate = collected.items.into_iter().collect();
    let raw_items = aggregate.seen();
    let items = aggregate.into_items();
    info!(
        "aggregated proxies: raw={}, deduplicated={}",
        raw_items,
        items.len()
    );
    info!(
        "share links collected: {} ({} unparsable)",
        collected.uris.len(),
        collected.failures.len()
    );

    let outputs = vec![
        outcome(
            OutputTarget::Clash,
            &settings.clash_output,
            emit_clash(settings, &items),
        ),
        outcome(
            OutputTarget::V2Ray,
            &settings.v2ray_output,
            emit_v2ray(settings, &items),
        ),
        outcome(
            OutputTarget::Subscription,
            &settings.subscription_output,
            emit_subscription(settings, &items),
        ),
        outcome(
            OutputTarget::RawUris,
            &settings.raw_uri_output,
            emit_raw_uris(settings, &collected.uris),
        ),
    ];

    RunReport {
        sources: sources.len(),
        raw_items,
        items,
        uris: collected.uris.len(),
        failures: collected.failures,
        outputs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_list() {
        let list = "# personal list\n\nhttps://a.example/sub\n  ss://aes-256-gcm:pw@h:1  \n#http://off\n";
        assert_eq!(
            parse_source_list(list),
            vec![
                SourceEntry::Url("https://a.example/sub".to_string()),
                SourceEntry::Literal("ss://aes-256-gcm:pw@h:1".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_source_list() {
        assert!(load_sources("/nonexistent/sources.txt").is_empty());
    }
}
