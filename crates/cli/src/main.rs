use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use circuit_sketch_core::parser::{parse_value, parse_value_or};
use circuit_sketch_core::{CircuitAnalysis, CircuitSnapshot, SimulationConfig, SimulationResult, Status};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("circuit-sketch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Single-path DC simulator for sketched circuits")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log pipeline stages to stderr"),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("simulate")
                .about("Simulate a circuit snapshot stored as JSON")
                .arg(Arg::new("file").required(true).value_parser(value_parser!(PathBuf)).help("Snapshot file"))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["json", "text"])
                        .default_value("json")
                        .help("Output format"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON file overriding simulation constants"),
                )
                .arg(
                    Arg::new("max-depth")
                        .long("max-depth")
                        .value_parser(value_parser!(usize))
                        .help("Hop cap for loop enumeration"),
                ),
        )
        .subcommand(
            Command::new("parse-value")
                .about("Parse a component value such as 220Ω or 4.7k")
                .arg(Arg::new("value").required(true).allow_hyphen_values(true))
                .arg(
                    Arg::new("default")
                        .long("default")
                        .value_parser(value_parser!(f64))
                        .help("Printed when the value has no leading number"),
                ),
        )
        .subcommand(
            Command::new("import-analysis")
                .about("Normalize analysis output and simulate its reconstructed circuit")
                .arg(Arg::new("file").required(true).value_parser(value_parser!(PathBuf))),
        )
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<SimulationConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(&max_depth) = matches.get_one::<usize>("max-depth") {
        config = config.with_max_depth(max_depth);
    }
    config.validate().context("invalid simulation config")?;
    Ok(config)
}

fn read_snapshot(path: &Path) -> Result<CircuitSnapshot> {
    CircuitSnapshot::from_json_file(path)
        .with_context(|| format!("failed to read circuit from {}", path.display()))
}

fn print_report(result: &SimulationResult) {
    println!("Voltage:    {:.2} V", result.total_voltage);
    println!("Resistance: {:.2} Ω", result.total_resistance);
    println!("Current:    {:.2} mA", result.total_current_milliamps);
    println!("Power:      {:.2} mW", result.total_power_milliwatts);

    if !result.per_component.is_empty() {
        println!();
        for part in &result.per_component {
            let marker = match part.status {
                Status::Off => " ",
                Status::On | Status::Normal => "*",
                Status::Warning => "!",
            };
            println!(
                "{marker} {:<12} {:<10} {:>8.2} V {:>10.2} mA  {:?}",
                part.id, part.kind.as_str(), part.voltage, part.current_milliamps, part.status
            );
        }
    }

    if !result.warnings.is_empty() {
        println!();
        for warning in &result.warnings {
            println!("[{:?}] {}", warning.severity, warning.message);
        }
    }
}

fn simulate(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<PathBuf>("file")
        .context("missing snapshot file")?;
    let config = load_config(matches)?;
    let snapshot = read_snapshot(path)?;
    debug!(
        components = snapshot.components.len(),
        connections = snapshot.connections.len(),
        "loaded snapshot"
    );

    let result = snapshot.simulate(&config);
    match matches.get_one::<String>("format").map(String::as_str) {
        Some("text") => print_report(&result),
        _ => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

fn parse(matches: &ArgMatches) -> Result<()> {
    let text = matches
        .get_one::<String>("value")
        .context("missing value")?;
    let value = match matches.get_one::<f64>("default") {
        Some(&default) => parse_value_or(Some(text.as_str()), default),
        None => match parse_value(text) {
            Some(value) => value,
            None => bail!("no numeric value in {text:?}"),
        },
    };
    println!("{value}");
    Ok(())
}

fn import_analysis(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<PathBuf>("file")
        .context("missing analysis file")?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read analysis from {}", path.display()))?;

    let analysis = CircuitAnalysis::from_model_text(&text);
    let simulation = analysis
        .reconstructed_circuit
        .as_ref()
        .map(|circuit| circuit.to_snapshot().simulate(&SimulationConfig::default()));

    let output = serde_json::json!({
        "analysis": analysis,
        "simulation": simulation,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("simulate", sub_matches)) => simulate(sub_matches),
        Some(("parse-value", sub_matches)) => parse(sub_matches),
        Some(("import-analysis", sub_matches)) => import_analysis(sub_matches),
        _ => unreachable!("subcommand is required"),
    }
}
