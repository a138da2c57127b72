use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use ising_mcmc::{
    run_config, AttemptPolicy, InitialState, RunConfig, RunSummary, SeedPolicy,
    TemperatureSchedule,
};
use log::info;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "ising-sim", about = "2D Ising Metropolis temperature sweep CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a temperature sweep described by a YAML configuration.
    Run(RunArgs),
    /// Execute a temperature sweep described entirely by flags.
    Sweep(SweepArgs),
}

#[derive(ClapArgs, Debug)]
struct RunArgs {
    /// YAML configuration describing the run.
    #[arg(long)]
    config: PathBuf,
    /// Output directory for run artefacts.
    #[arg(long)]
    out: PathBuf,
    /// Override the master seed from the configuration.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(ClapArgs, Debug)]
struct SweepArgs {
    /// Side length of the square lattice.
    #[arg(long, default_value_t = 50)]
    size: usize,
    /// Attempts per sweep expressed as average visits per site.
    #[arg(long, conflicts_with = "attempts")]
    sweeps_per_site: Option<u64>,
    /// Exact attempts per sweep; negative values mean no attempts.
    #[arg(long, allow_negative_numbers = true)]
    attempts: Option<i64>,
    /// First temperature.
    #[arg(long, default_value_t = 1.6)]
    start: f64,
    /// Exclusive upper temperature bound.
    #[arg(long, default_value_t = 3.25)]
    stop: f64,
    /// Temperature spacing.
    #[arg(long, default_value_t = 0.01)]
    step: f64,
    /// External magnetic field strength.
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    field: f64,
    /// Magnetic moment of each spin.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    moment: f64,
    /// Starting configuration: random, all-up or all-down.
    #[arg(long, default_value = "random", value_parser = parse_initial_state)]
    initial: InitialState,
    /// Master seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Output directory for run artefacts.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run_from_config(args),
        Command::Sweep(args) => run_sweep(args),
    }
}

fn run_from_config(args: RunArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let mut config = RunConfig::load(&args.config)?;
    config.output.run_directory = Some(args.out.clone());
    if let Some(seed) = args.seed {
        config.seed_policy.master_seed = seed;
    }
    let summary = run_config(&config)?;

    write_yaml(args.out.join("config.yaml"), &config)?;
    report(&args.out, &summary)
}

fn run_sweep(args: SweepArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let attempts = match (args.attempts, args.sweeps_per_site) {
        (Some(attempts), _) => AttemptPolicy::Fixed {
            attempts: attempts.max(0) as u64,
        },
        (None, Some(sweeps)) => AttemptPolicy::PerSite { sweeps },
        (None, None) => AttemptPolicy::default(),
    };
    let mut seed_policy = SeedPolicy::default();
    if let Some(seed) = args.seed {
        seed_policy.master_seed = seed;
    }
    let mut config = RunConfig {
        lattice_size: args.size,
        attempts,
        field: args.field,
        moment: args.moment,
        schedule: TemperatureSchedule::Range {
            start: args.start,
            stop: args.stop,
            step: args.step,
        },
        initial_state: args.initial,
        seed_policy,
        ..RunConfig::default()
    };
    config.output.run_directory = Some(args.out.clone());
    let summary = run_config(&config)?;

    write_yaml(args.out.join("config.yaml"), &config)?;
    report(&args.out, &summary)
}

fn report(out_dir: &Path, summary: &RunSummary) -> Result<(), Box<dyn Error>> {
    info!(
        "{} temperatures written to {}",
        summary.samples.len(),
        out_dir.display()
    );
    let payload = json!({
        "temperatures": summary.samples.len(),
        "final_lattice_hash": summary.final_lattice_hash,
        "observables": summary.observables_path,
        "summary": summary.summary_path,
        "manifest": summary.manifest_path,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn write_yaml<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_yaml::to_string(value)?)?;
    Ok(())
}

fn parse_initial_state(value: &str) -> Result<InitialState, String> {
    serde_yaml::from_str(value).map_err(|_| format!("unknown initial state `{value}`"))
}
