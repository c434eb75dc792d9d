use clap::{Parser, Subcommand};
use lifeterm::config::{LifeConfig, RunArgs};
use lifeterm::patterns::PATTERNS;
use lifeterm::settings::Settings;
use lifeterm::{driver, Result};
use std::fs::File;
use std::path::Path;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lifeterm")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Toroidal Game of Life in the terminal, with immortal cells", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation
    Run(RunArgs),

    /// List built-in patterns
    Patterns,
}

/// Logs go to `log_file` when given. Otherwise the interactive display owns
/// the terminal, so logging stays off unless RUST_LOG asks for it.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let default_filter = match (log_file, interactive) {
        (Some(_), _) => "info",
        (None, true) => "off",
        (None, false) => "warn",
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

fn run(args: RunArgs) -> Result<()> {
    init_logging(args.log_file.as_deref(), !args.print)?;

    let settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    let config = LifeConfig::resolve(&args, &settings);

    if config.print {
        driver::print_to_stdout(&config)
    } else {
        driver::run(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => run(args),
        Commands::Patterns => {
            for pattern in PATTERNS {
                let (h, w) = pattern.bounds();
                println!("{:<12} {}x{}", pattern.name, h, w);
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lifeterm: {}", e);
            ExitCode::FAILURE
        }
    }
}
