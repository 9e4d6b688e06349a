use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::core::operations::ScorecardService;
use crate::core::store::SqliteStore;
use crate::manager::{crud, menu, query};
use crate::utils::error::AppResult;
use crate::utils::interactive::parse_number;
use crate::utils::output::print_warning;

/// Shown when the tool is invoked without anything to do
pub const USAGE_HINT: &str = "No action specified.
Use the following examples:
  Add a KPI:
     --perspective \"Financial\" --kpi \"Revenue Growth\" --target 100 --actual 80
  Show report:
     --report
  Start the interactive menu:
     --interactive";

#[derive(Parser, Debug)]
#[command(name = "scorecard")]
#[command(about = "CLI for Balanced Scorecard Management")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "FILE", global = true, help = "Database file (overrides config)")]
    pub db: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub debug: bool,

    #[arg(short = 'i', long, help = "Run the interactive menu")]
    pub interactive: bool,

    #[command(flatten)]
    pub oneshot: OneShotArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Add-and/or-report flags for a single invocation
#[derive(Args, Debug, Default)]
pub struct OneShotArgs {
    #[arg(short, long, help = "Perspective of the KPI", conflicts_with = "interactive")]
    pub perspective: Option<String>,

    #[arg(short, long, help = "Name of the KPI", conflicts_with = "interactive")]
    pub kpi: Option<String>,

    #[arg(
        short,
        long,
        help = "Target value of the KPI",
        allow_negative_numbers = true,
        value_parser = finite_number,
        conflicts_with = "interactive"
    )]
    pub target: Option<f64>,

    #[arg(
        short,
        long,
        help = "Actual value achieved",
        allow_negative_numbers = true,
        value_parser = finite_number,
        conflicts_with = "interactive"
    )]
    pub actual: Option<f64>,

    #[arg(
        short,
        long,
        help = "Weight of the KPI (stored, not scored)",
        value_parser = finite_number,
        conflicts_with = "interactive"
    )]
    pub weight: Option<f64>,

    #[arg(short, long, help = "Display Balanced Scorecard report", conflicts_with = "interactive")]
    pub report: bool,
}

/// Numeric flag parser that rejects NaN and infinities
fn finite_number(value: &str) -> Result<f64, String> {
    parse_number("value", value).map_err(|e| e.to_string())
}

/// A complete add request assembled from one-shot flags
#[derive(Debug, Clone, PartialEq)]
pub struct AddRequest {
    pub perspective: String,
    pub name: String,
    pub target: f64,
    pub actual: f64,
    pub weight: Option<f64>,
}

impl OneShotArgs {
    /// The add request, if perspective, name, target and actual were all given
    pub fn add_request(&self) -> Option<AddRequest> {
        Some(AddRequest {
            perspective: self.perspective.clone()?,
            name: self.kpi.clone()?,
            target: self.target?,
            actual: self.actual?,
            weight: self.weight,
        })
    }

    /// True when some, but not all, add inputs were given
    pub fn has_partial_add(&self) -> bool {
        let given = [
            self.perspective.is_some(),
            self.kpi.is_some(),
            self.target.is_some(),
            self.actual.is_some(),
        ];
        given.iter().any(|g| *g) && !given.iter().all(|g| *g)
    }

    pub fn is_actionable(&self) -> bool {
        self.report || self.add_request().is_some()
    }

    pub fn execute(&self, service: &ScorecardService<SqliteStore>, config: &Config) -> AppResult<()> {
        if let Some(request) = self.add_request() {
            crud::handle_add_request(service, config, &request)?;
        } else if self.has_partial_add() {
            print_warning("Incomplete add request ignored: perspective, kpi, target and actual are all required");
        }

        if self.report {
            query::print_report(service, &config.general.report_format, false)?;
        }

        Ok(())
    }
}

impl Commands {
    pub fn execute(self, config: Config, config_path: Option<&Path>) -> AppResult<()> {
        match self {
            Commands::Edit(args) => with_service(&config, |service| crud::handle_edit_command(service, &args)),
            Commands::Delete(args) => with_service(&config, |service| crud::handle_delete_command(service, &args)),
            Commands::Report(args) => {
                with_service(&config, |service| query::handle_report_command(service, &config, &args))
            }
            Commands::Config(args) => {
                crate::manager::config::handle_config_command(config, config_path, args.command)
            }
        }
    }
}

impl Cli {
    /// Usage error for an invocation that asks for nothing
    pub fn usage_error(&self) -> Option<clap::Error> {
        if self.command.is_some() || self.interactive || self.oneshot.is_actionable() {
            return None;
        }
        Some(Cli::command().error(ErrorKind::MissingRequiredArgument, USAGE_HINT))
    }
}

/// Open the store, run `f` against it and close the connection afterwards
fn with_service<T>(
    config: &Config,
    f: impl FnOnce(&ScorecardService<SqliteStore>) -> AppResult<T>,
) -> AppResult<T> {
    let service = ScorecardService::open(config)?;
    let result = f(&service);
    let closed = service.into_store().close();
    let value = result?;
    closed?;
    Ok(value)
}

/// Entry point used by `main` once logging is set up
pub fn run(cli: Cli) -> AppResult<()> {
    if cli.config.is_none() {
        Config::ensure_config_exists()?;
    }

    let mut config = if let Some(config_path) = &cli.config {
        Config::load_custom(config_path)?
    } else {
        Config::load()?
    };

    if let Some(db) = cli.db {
        config.general.database_file = db;
    }

    if !config.general.color {
        colored::control::set_override(false);
    }

    if let Some(command) = cli.command {
        command.execute(config, cli.config.as_deref())
    } else if cli.interactive {
        with_service(&config, |service| menu::run_menu(service, &config))
    } else {
        with_service(&config, |service| cli.oneshot.execute(service, &config))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Update target and actual of an existing KPI
    Edit(EditArgs),

    /// Delete a KPI
    Delete(DeleteArgs),

    /// Show the scorecard report
    Report(ReportArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct EditArgs {
    #[arg(help = "Perspective of the KPI")]
    pub perspective: String,

    #[arg(help = "Name of the KPI")]
    pub name: String,

    #[arg(short, long, allow_negative_numbers = true, value_parser = finite_number)]
    pub target: f64,

    #[arg(short, long, allow_negative_numbers = true, value_parser = finite_number)]
    pub actual: f64,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(help = "Perspective of the KPI")]
    pub perspective: String,

    #[arg(help = "Name of the KPI")]
    pub name: String,

    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    #[arg(long, help = "Show per-perspective statistics")]
    pub stats: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Simple,
    Json,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}
