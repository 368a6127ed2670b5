//! Catalogue runner.
//!
//! ```bash
//! patterns list                        # every demo
//! patterns list --family structural    # one family
//! patterns run observer proxy          # named demos, in order
//! patterns family behavioral           # a whole family
//! patterns all                         # everything
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use design_patterns::catalog::{self, Family, CATALOG};
use design_patterns::{telemetry, Narrator, Settings};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "patterns")]
#[command(version)]
#[command(about = "Runnable catalogue of classic design patterns", long_about = None)]
struct Cli {
    /// Config file (defaults to $PATTERNS_CONFIG, then ./patterns.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Plain headings without ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Log filter for diagnostics on stderr, e.g. "debug" (RUST_LOG wins)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List demos with their family and summary
    List {
        #[arg(long, value_enum)]
        family: Option<Family>,
    },
    /// Run one or more demos by name
    Run {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Run every demo of one family
    Family {
        #[arg(value_enum)]
        family: Family,
    },
    /// Run the whole catalogue
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings =
        Settings::discover(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = cli.log_level {
        settings.logging.level = level;
    }
    if cli.no_color {
        settings.narration.color = false;
    }

    telemetry::init(&settings.logging.level);
    Narrator::set_color(settings.narration.color);
    debug!(?settings, "settings resolved");

    let narrator = Narrator::stdout();
    match cli.command {
        Command::List { family } => {
            for demo in CATALOG
                .iter()
                .filter(|demo| family.map_or(true, |f| demo.family == f))
            {
                println!(
                    "{:<26} {:<11} {}",
                    demo.name.bold(),
                    demo.family.to_string(),
                    demo.summary
                );
            }
        }
        Command::Run { names } => {
            let demos = names
                .iter()
                .map(|name| catalog::find(name))
                .collect::<Result<Vec<_>, _>>()?;
            catalog::run_all(demos, &narrator, &settings)?;
        }
        Command::Family { family } => {
            catalog::run_all(catalog::by_family(family), &narrator, &settings)
                .with_context(|| format!("{} demos failed", family))?;
        }
        Command::All => {
            let ran = catalog::run_all(CATALOG, &narrator, &settings)?;
            println!("{}", format!("Ran {} demos.", ran).green());
        }
    }

    Ok(())
}
