#![deny(warnings)]

//! `upgrade-advisor`: find the bottleneck of a CPU/GPU/RAM build and list
//! ranked upgrade picks from the product catalogs.

mod browse;
mod config;
mod report;

use advisor_catalog::{find_by_name, load_dir};
use advisor_core::{ComponentKind, Part, Selection};
use advisor_engine::{stress, Advancement, Advisor, EffortLevel, Preferences};
use anyhow::{bail, Context, Result};
use browse::{Filters, Listing};
use config::AdvisorConfig;
use report::{StressText, TextReport};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_STRESS_SEED: u64 = 42;

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    cpu: Option<String>,
    gpu: Option<String>,
    ram: Option<String>,
    advancement: Option<Advancement>,
    effort: Option<EffortLevel>,
    json: bool,
    stress: Option<u64>,
    seed: Option<u64>,
    list: Option<ComponentKind>,
    filters: Filters,
    version: bool,
    unknown: Vec<String>,
}

fn parse_args() -> Result<Args> {
    parse_from(std::env::args().skip(1))
}

fn parse_from<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut out = Args::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        let mut value = || it.next().with_context(|| format!("{arg} expects a value"));
        match arg.as_str() {
            "--config" => out.config = Some(value()?.into()),
            "--data" => out.data = Some(value()?.into()),
            "--cpu" => out.cpu = Some(value()?),
            "--gpu" => out.gpu = Some(value()?),
            "--ram" => out.ram = Some(value()?),
            "--advancement" => out.advancement = Some(value()?.parse()?),
            "--effort" => out.effort = Some(value()?.parse()?),
            "--stress" => out.stress = Some(value()?.parse().context("--stress expects an iteration count")?),
            "--seed" => out.seed = Some(value()?.parse().context("--seed expects an unsigned integer")?),
            "--list" => out.list = Some(value()?.parse().map_err(anyhow::Error::msg)?),
            "--brand" => out.filters.cpu.brand = Some(value()?.parse().map_err(anyhow::Error::msg)?),
            "--series" => out.filters.cpu.series = Some(value()?),
            "--chipset-maker" => {
                out.filters.gpu.chipset_maker = Some(value()?.parse().map_err(anyhow::Error::msg)?)
            }
            "--chipset" => out.filters.gpu.chipset = Some(value()?),
            "--card-maker" => out.filters.gpu.card_maker = Some(value()?),
            "--kit" => out.filters.ram.kit = Some(value()?.parse().context("--kit expects a stick count")?),
            "--capacity" => out.filters.ram.capacity_gb = Some(parse_gb(&value()?)?),
            "--ddr" => out.filters.ram.ddr = Some(value()?.parse().map_err(anyhow::Error::msg)?),
            "--speed" => out.filters.ram.speed = Some(value()?),
            "--manufacturer" => out.filters.ram.manufacturer = Some(value()?),
            "--json" => out.json = true,
            "--version" | "-V" => out.version = true,
            _ => out.unknown.push(arg),
        }
    }
    Ok(out)
}

/// `32`, `32GB` or `32 gb`.
fn parse_gb(text: &str) -> Result<u32> {
    let digits = text.trim().trim_end_matches(|c: char| c.is_ascii_alphabetic() || c.is_whitespace());
    digits
        .parse()
        .with_context(|| format!("--capacity expects a size in GB, got '{text}'"))
}

/// Resolve a `--cpu/--gpu/--ram` query against its catalog.
fn lookup<P: Part + Clone>(items: &[P], query: Option<&str>) -> Result<Option<P>> {
    let Some(query) = query else {
        return Ok(None);
    };
    match find_by_name(items, query) {
        Some(found) => {
            info!(kind = %P::KIND, query, found = found.name(), "component selected");
            Ok(Some(found.clone()))
        }
        None => bail!("no {} in the catalog matches '{query}'", P::KIND),
    }
}

fn main() -> Result<()> {
    let args = parse_args()?;
    if args.version {
        println!(
            "upgrade-advisor {} ({} {})",
            env!("CARGO_PKG_VERSION"),
            env!("ADVISOR_GIT_SHA"),
            env!("ADVISOR_COMMIT_DATE")
        );
        return Ok(());
    }
    let config = match &args.config {
        Some(path) => AdvisorConfig::load(path)?,
        None => AdvisorConfig::default(),
    };

    // Logging setup; stdout is reserved for the report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    for arg in &args.unknown {
        warn!(%arg, "ignoring unrecognized argument");
    }

    let data_dir = args.data.clone().unwrap_or_else(|| config.data_dir.clone());
    info!(data_dir = %data_dir.display(), "starting upgrade advisor");
    let catalogs = load_dir(&data_dir)?;
    let advisor = Advisor::new(&catalogs, config.tier_mappings.clone());

    if let Some(kind) = args.list {
        let mut filters = args.filters.clone();
        if let Some(cpu) = lookup(catalogs.cpus(), args.cpu.as_deref())? {
            filters.ram = filters.ram.for_cpu(&cpu);
        }
        let listing = Listing {
            catalogs: &catalogs,
            kind,
            filters: &filters,
        };
        if args.json {
            println!("{}", serde_json::to_string_pretty(&listing.to_json()?)?);
        } else {
            print!("{listing}");
        }
        return Ok(());
    }

    if let Some(iterations) = args.stress {
        let report = stress::run(&advisor, iterations, args.seed.unwrap_or(DEFAULT_STRESS_SEED));
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", StressText(&report));
        }
        if !report.is_clean() {
            bail!("stress run recommended {} downgrade(s)", report.total_downgrades());
        }
        return Ok(());
    }

    let prefs = Preferences {
        advancement: args.advancement.unwrap_or(config.advancement),
        effort: args.effort.unwrap_or(config.effort),
    };
    let selection = Selection {
        cpu: lookup(catalogs.cpus(), args.cpu.as_deref())?,
        gpu: lookup(catalogs.gpus(), args.gpu.as_deref())?,
        ram: lookup(catalogs.rams(), args.ram.as_deref())?,
    };
    let analysis = advisor.analyze(&selection, &prefs)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", TextReport(&analysis));
    }
    Ok(())
}
