//! Subcommand implementations

use crate::io;
use allot_codec::ShareCodec;
use allot_core::{facts_for, ChartSummary, Fact, ShareConfig, ShareMetadata, ShareRequest, ShareService};
use allot_model::{Activity, AllocationMode, OwnerId};
use allot_resolver::{MemoryChartStore, ResolveError, ResolvedChart, ShareResolver};
use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Exit status for success
pub(crate) const EXIT_OK: u8 = 0;

/// Exit status for a segment or token that did not resolve
pub(crate) const EXIT_UNRESOLVED: u8 = 2;

fn mode(args: &ArgMatches) -> Result<AllocationMode> {
    args.get_one::<String>("mode")
        .map_or(Ok(AllocationMode::Hours), |m| m.parse().map_err(anyhow::Error::msg))
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing <{name}>"))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn encode(config: &ShareConfig, args: &ArgMatches) -> Result<u8> {
    let activities = io::read_activities(args.get_one::<String>("input").map(String::as_str))?;
    let mode = if args.get_flag("legacy") {
        None
    } else {
        Some(mode(args)?)
    };

    let token = ShareCodec::new()
        .encode(&activities, mode)
        .context("could not encode activities")?;
    println!("{token}");
    println!("{}", config.share_url(token.as_str()));
    Ok(EXIT_OK)
}

#[derive(Serialize)]
struct DecodeOutput<'a> {
    activities: &'a [Activity],
    mode: AllocationMode,
    revision: allot_codec::WireRevision,
}

pub(crate) fn decode(args: &ArgMatches) -> Result<u8> {
    let token = required(args, "token")?;
    match ShareCodec::new().decode(token) {
        Ok(decoded) => {
            print_json(&DecodeOutput {
                activities: &decoded.chart.activities,
                mode: decoded.chart.mode,
                revision: decoded.revision,
            })?;
            Ok(EXIT_OK)
        }
        Err(err) => {
            eprintln!("{err}");
            Ok(EXIT_UNRESOLVED)
        }
    }
}

#[derive(Serialize)]
struct ResolveOutput {
    chart: ResolvedChart,
    summary: ChartSummary,
    facts: Vec<Fact>,
    metadata: ShareMetadata,
}

#[derive(Serialize)]
struct ResolveFailure<'a> {
    error: &'a str,
    retryable: bool,
}

fn open_store(args: &ArgMatches) -> Result<MemoryChartStore> {
    match args.get_one::<String>("store") {
        Some(path) => io::load_store(Path::new(path)),
        None => Ok(MemoryChartStore::new()),
    }
}

pub(crate) async fn resolve(config: &ShareConfig, args: &ArgMatches) -> Result<u8> {
    let segment = required(args, "segment")?;
    let resolver = ShareResolver::new(Arc::new(open_store(args)?));

    match resolver.resolve(segment).await {
        Ok(chart) => {
            print_json(&ResolveOutput {
                summary: ChartSummary::from_chart(&chart),
                facts: facts_for(&chart),
                metadata: ShareMetadata::for_segment(config, segment),
                chart,
            })?;
            Ok(EXIT_OK)
        }
        Err(err) => {
            report_unresolved(&err);
            Ok(EXIT_UNRESOLVED)
        }
    }
}

fn report_unresolved(err: &ResolveError) {
    tracing::debug!(error = %err, "segment did not resolve");
    eprintln!("{}", err.user_message());
    if let Ok(json) = serde_json::to_string(&ResolveFailure {
        error: err.user_message(),
        retryable: err.is_retryable(),
    }) {
        println!("{json}");
    }
}

pub(crate) async fn share(config: ShareConfig, args: &ArgMatches) -> Result<u8> {
    let activities = io::read_activities(args.get_one::<String>("input").map(String::as_str))?;
    let mut request = ShareRequest::new(activities, mode(args)?);
    if let Some(owner) = args.get_one::<String>("owner") {
        request = request.with_owner(OwnerId::new(owner.as_str()));
    }
    if let Some(caller) = args.get_one::<String>("caller") {
        request = request.with_caller(caller.as_str());
    }

    let store_path = args.get_one::<String>("store").map(Path::new);
    if request.owner.is_some() && store_path.is_none() {
        tracing::warn!("no --store given; the persisted chart will not outlive this process");
    }

    let store = Arc::new(match store_path {
        Some(path) => io::load_store(path)?,
        None => MemoryChartStore::new(),
    });
    let service = ShareService::new(config, store.clone());

    let persisted = request.owner.is_some();
    let link = service.share(request).await?;
    if persisted {
        if let Some(path) = store_path {
            io::save_store(path, &store)?;
        }
    }

    println!("{}", link.url);
    Ok(EXIT_OK)
}
