mod config;
mod logger;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use transport_core::TransportSolver;

#[derive(Parser)]
#[command(name = "transport")]
#[command(about = "Find the cheapest way to ship from two factories to two cities", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance and print the minimum-cost plan
    Solve {
        /// TOML file with `costs`, `supplies` and `demands`
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
        #[command(flatten)]
        instance: config::InstanceArgs,
    },
    /// Print the reference instance as TOML
    Defaults,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Solve {
            config: config_path,
            format,
            instance,
        } => {
            let instance = config::resolve_instance(config_path.as_deref(), &instance)?;
            tracing::info!(?instance, "solving");

            let result = TransportSolver::new().solve_instance(&instance);

            match format {
                OutputFormat::Json => println!("{}", report::render_json(&result)?),
                OutputFormat::Pretty => match &result {
                    Ok(plan) => print!("{}", report::render_plan(plan)),
                    Err(e) => print!("{}", report::render_failure(e)),
                },
            }

            Ok(if result.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Defaults => {
            print!("{}", config::default_instance_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_solve_flags() {
        let cli = Cli::try_parse_from([
            "transport", "solve", "--cost-12", "2.5", "--supply-2", "90", "--format", "json", "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Commands::Solve { config, format, instance } = cli.command else {
            panic!("expected solve");
        };
        assert!(config.is_none());
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(instance.cost_12, Some(2.5));
        assert_eq!(instance.supply_2, Some(90.0));
        assert_eq!(instance.demand_3, None);
    }

    #[test]
    fn test_solve_defaults_to_pretty() {
        let cli = Cli::try_parse_from(["transport", "solve"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Solve {
                format: OutputFormat::Pretty,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_values_the_form_would_refuse() {
        assert!(Cli::try_parse_from(["transport", "solve", "--cost-12", "NaN"]).is_err());
        assert!(Cli::try_parse_from(["transport", "solve", "--supply-1=-5"]).is_err());
        assert!(Cli::try_parse_from(["transport", "solve", "--demand-3", "inf"]).is_err());
        assert!(Cli::try_parse_from(["transport", "solve", "--cost-22", "0"]).is_ok());
    }

    #[test]
    fn test_rejects_non_numeric_cost() {
        assert!(Cli::try_parse_from(["transport", "solve", "--cost-13", "cheap"]).is_err());
    }
}
