//! # Framecheck CLI
//!
//! Command-line driver for `frame_core`:
//!
//! - `codes` lists the supported design codes with their defaults
//! - `element` normalizes a single-element form and optionally submits it
//! - `frame` replays a scripted editing session, prints the analysis request
//!   and optionally submits it and fetches the report
//!
//! Output is JSON on stdout; logs go to stderr.

mod script;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use frame_core::codes::DesignCode;
use frame_core::config::ServiceConfig;
use frame_core::elements::{normalize, ElementKind, RawFields};
use frame_core::loads::combinations_for;
use frame_core::materials::BuiltinSteelCatalog;
use frame_core::request::{AnalysisRequest, ElementAnalysisRequest};
use frame_core::seismic::SeismicParameters;
use frame_core::session::{analyze_element, AnalysisUpdate, Session};
use frame_core::HttpAnalysisClient;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::script::FrameScript;

const DEFAULT_LOG_FILTER: &str = "frame_core=info,frame_cli=info";

#[derive(Parser)]
#[command(name = "frame_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Structural element and frame analysis driver", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long)]
    log_level: Option<String>,

    /// JSON service configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List design codes, default strengths, seismic zones and combinations
    Codes,
    /// Normalize one element form
    Element(ElementArgs),
    /// Replay a frame script
    Frame(FrameArgs),
}

#[derive(Args)]
struct ElementArgs {
    /// beam, column, slab, footing, staircase, steel_beam, steel_column
    kind: String,

    /// Design code (defaults to the configured one)
    #[arg(long)]
    code: Option<String>,

    /// Form field as name=value; repeatable
    #[arg(short, long = "field", value_parser = parse_pair)]
    fields: Vec<(String, String)>,

    /// Seismic field as name=value (zone, soil, importance, system)
    #[arg(short, long = "seismic", value_parser = parse_pair)]
    seismic: Vec<(String, String)>,

    /// Send to the analysis service instead of printing the request
    #[arg(long)]
    submit: bool,
}

#[derive(Args)]
struct FrameArgs {
    /// Frame script (JSON)
    script: PathBuf,

    /// Design code (overrides the script and the configuration)
    #[arg(long)]
    code: Option<String>,

    /// Send to the analysis service instead of printing the request
    #[arg(long)]
    submit: bool,

    /// After a successful analysis, write the report to this file
    #[arg(long, requires = "submit")]
    report: Option<PathBuf>,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

fn init_tracing(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match level {
        Some(level) => EnvFilter::new(format!("frame_core={0},frame_cli={0}", level)),
        None => EnvFilter::new(DEFAULT_LOG_FILTER),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_code(explicit: Option<&str>, fallback: DesignCode) -> Result<DesignCode> {
    match explicit {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(fallback),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let config = ServiceConfig::load(cli.config.as_deref()).context("loading service configuration")?;

    match cli.command {
        Commands::Codes => list_codes(),
        Commands::Element(args) => run_element(args, config).await,
        Commands::Frame(args) => run_frame(args, config).await,
    }
}

fn list_codes() -> Result<()> {
    let codes: Vec<_> = DesignCode::ALL
        .iter()
        .map(|code| {
            json!({
                "code": code.id(),
                "name": code.display_name(),
                "defaults": code.material_defaults(),
                "seismic_zones": code.seismic_zones(),
                "combinations": combinations_for(*code),
            })
        })
        .collect();
    print_json(&codes)
}

async fn run_element(args: ElementArgs, config: ServiceConfig) -> Result<()> {
    let kind: ElementKind = args.kind.parse()?;
    let code = resolve_code(args.code.as_deref(), config.design_code)?;
    let fields: RawFields = args.fields.into_iter().collect();
    let seismic: RawFields = args.seismic.into_iter().collect();

    if !args.submit {
        let input = normalize(kind, &fields, code.id(), &BuiltinSteelCatalog)?;
        let seismic = SeismicParameters::from_fields(&seismic, code)?;
        return print_json(&ElementAnalysisRequest::new(code, input, seismic));
    }

    let client = HttpAnalysisClient::new(config)?;
    let verdict = analyze_element(&client, code, kind, &fields, &seismic, &BuiltinSteelCatalog).await?;
    info!(element = %kind, status = %verdict.overall(), "element verdict");
    print_json(&verdict)
}

async fn run_frame(args: FrameArgs, config: ServiceConfig) -> Result<()> {
    let script = FrameScript::from_file(&args.script)?;
    let fallback = script.code.unwrap_or(config.design_code);
    let code = resolve_code(args.code.as_deref(), fallback)?;

    let mut session = Session::new(code);
    script.replay(&mut session);

    if !args.submit {
        let request = AnalysisRequest::build(session.code, &session.graph, &session.catalog)?;
        return print_json(&request);
    }

    let client = HttpAnalysisClient::new(config)?;
    match session.run_analysis(&client).await? {
        AnalysisUpdate::Applied { combinations, .. } => info!(combinations, "analysis complete"),
        AnalysisUpdate::Failed { error, .. } => return Err(error).context("frame analysis failed"),
        AnalysisUpdate::Stale { seq, latest } => bail!("analysis {} superseded by {}", seq, latest),
    }

    let Some(results) = session.results() else {
        bail!("analysis produced no result");
    };
    let summary: Vec<_> = results
        .iter()
        .map(|combo| {
            json!({
                "id": combo.id,
                "name": combo.name,
                "status": combo.status(),
                "failing": combo.failing_members(),
                "displacements": combo.displacement_rows(),
                "forces": combo.force_rows(),
                "design": combo.design_rows(),
            })
        })
        .collect();
    print_json(&summary)?;

    if let Some(path) = &args.report {
        let pdf = session.generate_report(&client).await?;
        write_report(path, &pdf)?;
    }
    Ok(())
}

fn write_report(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing report to {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "report saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("fc=30").unwrap(), ("fc".to_string(), "30".to_string()));
        assert_eq!(parse_pair("live=").unwrap(), ("live".to_string(), String::new()));
        assert!(parse_pair("fc").is_err());
    }

    #[test]
    fn test_cli_parses_element_command() {
        let cli = Cli::try_parse_from([
            "frame_cli", "element", "steel-beam", "--code", "eurocode", "-f", "span=6000", "-f", "uniform_load=12",
        ])
        .unwrap();
        let Commands::Element(args) = cli.command else {
            panic!("expected element command");
        };
        assert_eq!(args.kind.parse::<ElementKind>().unwrap(), ElementKind::SteelBeam);
        assert_eq!(resolve_code(args.code.as_deref(), DesignCode::Aci).unwrap(), DesignCode::Eurocode);
        assert_eq!(args.fields.len(), 2);
    }

    #[test]
    fn test_report_requires_submit() {
        assert!(Cli::try_parse_from(["frame_cli", "frame", "portal.json", "--report", "out.pdf"]).is_err());
    }
}
