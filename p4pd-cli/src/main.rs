//! p4c-pd
//!
//! Generate PD control-plane sources for a program compiled to bmv2 JSON.

mod paths;

use anyhow::Context;
use clap::Parser;
use p4pd_model::GeneratorConfig;
use paths::{validate_dir, validate_file, PathError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "p4c-pd", version)]
#[command(about = "Generate PD control-plane sources from a bmv2 JSON program")]
struct Args {
    /// Compiled program (bmv2 JSON)
    #[arg(long = "json", value_name = "FILE")]
    json: PathBuf,

    /// Directory receiving the generated sources
    #[arg(long = "pd", value_name = "DIR")]
    pd: PathBuf,

    /// Program name used in generated identifiers
    #[arg(long = "p4-prefix", value_name = "NAME", default_value = GeneratorConfig::DEFAULT_PREFIX)]
    p4_prefix: String,

    /// Template directory
    #[arg(long, value_name = "DIR")]
    templates: PathBuf,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Paths checked to exist, made absolute
struct Inputs {
    json: PathBuf,
    pd: PathBuf,
    templates: PathBuf,
}

impl Inputs {
    fn validate(args: &Args) -> Result<Self, PathError> {
        Ok(Self {
            json: validate_file(&args.json)?,
            pd: validate_dir(&args.pd)?,
            templates: validate_dir(&args.templates)?,
        })
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_tracing(args.verbose);

    let inputs = match Inputs::validate(&args) {
        Ok(inputs) => inputs,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &inputs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, inputs: &Inputs) -> anyhow::Result<()> {
    let config = GeneratorConfig::new(args.p4_prefix.as_str()).context("invalid --p4-prefix")?;
    tracing::debug!("{}", config);

    let model = p4pd_loader::load_file(&inputs.json)
        .with_context(|| format!("failed to load {}", inputs.json.display()))?;
    tracing::debug!("loaded model\n{}", model);

    let written = p4pd_render::generate(&model, &config, &inputs.templates, &inputs.pd)
        .with_context(|| format!("failed to generate into {}", inputs.pd.display()))?;
    tracing::info!("generated {} files", written.len());

    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
