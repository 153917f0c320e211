use std::{collections::BTreeMap, fs};

use anyhow::Context;
use clap::Parser;
use owo_colors::{OwoColorize, Stream};
use revparse::{
    BatchReport, Dispatcher, LocationCanonicalizer, Origin,
    config::{Settings, unescape},
};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, Source};

mod cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(sep) = args.separator.as_deref() {
        settings.separator = unescape(sep);
    }
    let dispatcher = Dispatcher::standard(settings.separator.clone());

    match args.command {
        Command::Parse { from, pretty } => {
            let report = load(&dispatcher, &from)?;
            let json = if pretty {
                serde_json::to_string_pretty(&report.reviews)?
            } else {
                serde_json::to_string(&report.reviews)?
            };
            println!("{json}");
            print_summary(&report);
        }
        Command::Locations {
            from,
            origin,
            state,
        } => {
            let report = load(&dispatcher, &from)?;
            let canon = LocationCanonicalizer::new(state.unwrap_or(settings.default_state));
            print_locations(&report, &canon, origin);
            print_summary(&report);
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn load(dispatcher: &Dispatcher, from: &[Source]) -> anyhow::Result<BatchReport> {
    let texts = from
        .iter()
        .map(|src| {
            fs::read_to_string(&src.path)
                .with_context(|| format!("failed to read {}", src.path.display()))
                .map(|text| (src.name.as_str(), text))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(dispatcher.parse_batch(texts.iter().map(|(name, text)| (*name, text.as_str()))))
}

/// Per bucket: review count, mean score and the geocoding keys that fell into it.
fn print_locations(report: &BatchReport, canon: &LocationCanonicalizer, origin: Option<Origin>) {
    let mut buckets: BTreeMap<String, (usize, f64, Vec<String>)> = BTreeMap::new();
    for review in report
        .reviews
        .iter()
        .filter(|r| origin.is_none_or(|o| r.origin() == o))
    {
        let (Some(bucket), Some(key)) = (review.location_bucket(canon), review.location_key(canon))
        else {
            continue;
        };
        let entry = buckets.entry(bucket).or_default();
        entry.0 += 1;
        entry.1 += review.score();
        if !entry.2.contains(&key) {
            entry.2.push(key);
        }
    }
    for (bucket, (count, total, keys)) in buckets {
        println!("{bucket}\t{count}\t{:.2}\t{}", total / count as f64, keys.join("; "));
    }
}

fn print_summary(report: &BatchReport) {
    for s in &report.sources {
        eprintln!(
            "{}: {} {} {} {}",
            s.source,
            "✓".if_supports_color(Stream::Stderr, |t| t.green()),
            s.parsed,
            "✗".if_supports_color(Stream::Stderr, |t| t.red()),
            s.dropped
        );
    }
    for name in report.skipped_sources() {
        eprintln!(
            "{}: {}",
            name,
            "skipped, no extractor for this source".if_supports_color(Stream::Stderr, |t| t.yellow())
        );
    }
}
