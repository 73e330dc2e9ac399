// astrars/src/main.rs

use anyhow::{Context, Result};
use astrars::cli::{list_distributions, read_distribution, run_generator, run_simulation, store_distribution};
use astrars::config::{AstraConfig, ConfigArgs};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "astrars")]
#[command(about = "Run management for the ASTRA beam-dynamics code", long_about = None)]
#[command(version = env!("ASTRARS_CLI_VERSION"))]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an initial particle distribution
    Generate {
        /// JSON request document
        request: PathBuf,
        /// Wall-clock limit for the external binary, e.g. "10m"
        #[arg(long, value_name = "DURATION")]
        timeout: Option<String>,
    },
    /// Run a beam-dynamics simulation
    Simulate {
        /// JSON request document
        request: PathBuf,
        /// Override of the run's wall-clock limit, e.g. "30m"
        #[arg(long, value_name = "DURATION")]
        timeout: Option<String>,
    },
    /// Manage stored particle distributions
    #[command(subcommand)]
    Particles(ParticlesCommand),
}

#[derive(Subcommand)]
enum ParticlesCommand {
    /// List stored distributions
    List,
    /// Print one distribution as JSON
    Show { name: String },
    /// Store a distribution from a JSON table document
    Upload {
        /// JSON table document
        file: PathBuf,
        /// Name to store under; a fresh run id when omitted
        #[arg(long)]
        name: Option<String>,
    },
}

fn parse_timeout(timeout: Option<String>) -> Result<Option<Duration>> {
    timeout
        .map(|s| {
            humantime::parse_duration(&s).context(format!("Error parsing duration: {:?}", s))
        })
        .transpose()
}

fn entrypoint() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let config = AstraConfig::from(cli.config);

    match cli.command {
        Commands::Generate { request, timeout } => {
            let output = run_generator(&config, &request, parse_timeout(timeout)?)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Simulate { request, timeout } => {
            let output = run_simulation(&config, &request, parse_timeout(timeout)?)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Particles(command) => match command {
            ParticlesCommand::List => {
                for name in list_distributions(&config)? {
                    println!("{}", name);
                }
            }
            ParticlesCommand::Show { name } => match read_distribution(&config, &name)? {
                Some(table) => println!("{}", serde_json::to_string_pretty(&table)?),
                None => anyhow::bail!("No particle distribution named `{}`.", name),
            },
            ParticlesCommand::Upload { file, name } => {
                let name = store_distribution(&config, name, &file)?;
                println!("{}", name);
            }
        },
    }

    Ok(())
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
