//! The command line interface for the estimator.
use crate::estimate::{EstimateInputs, run_estimate};
use crate::log;
use crate::output::metadata::write_metadata;
use crate::output::{create_output_directory, write_report};
use crate::prompt::{prompt_monthly_bill, prompt_postal_code, prompt_subsidy};
use crate::reference::ReferenceData;
use crate::report::Report;
use crate::settings::Settings;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for the estimator.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for the estimate command
#[derive(Args, Debug, Default)]
pub struct EstimateOpts {
    /// Average monthly electricity bill (asked for if not given)
    #[arg(long)]
    pub bill: Option<f64>,
    /// Postal code of the installation (asked for if not given)
    #[arg(long)]
    pub postal_code: Option<String>,
    /// Whether to claim the government subsidy (asked for if not given)
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub subsidy: Option<bool>,
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Estimate the size and cost of a rooftop solar installation.
    Estimate {
        /// Path to the reference data directory.
        data_dir: PathBuf,
        /// Other estimate options
        #[command(flatten)]
        opts: EstimateOpts,
    },
    /// Validate a reference data directory.
    Validate {
        /// The path to the reference data directory.
        data_dir: PathBuf,
    },
    /// Manage bundled example data.
    Example {
        /// The available subcommands for managing example data.
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Manage settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Estimate { data_dir, opts } => handle_estimate_command(&data_dir, &opts, None),
            Self::Validate { data_dir } => handle_validate_command(&data_dir, None),
            Self::Example { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start solarcalc
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ solarcalc --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        // Output program help
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load settings from file, if they weren't provided
fn load_settings(settings: Option<Settings>) -> Result<Settings> {
    match settings {
        Some(settings) => Ok(settings),
        None => Settings::load().context("Failed to load settings."),
    }
}

/// Initialise the program logger, unless this has already been done
fn init_logger(settings: &Settings, log_file_path: Option<&Path>) -> Result<()> {
    if log::is_logger_initialised() {
        return Ok(());
    }

    log::init(&settings.log_level, log_file_path).context("Failed to initialise logging.")
}

/// Fill in any inputs missing from the command line by asking the user
fn get_inputs<R: BufRead, W: Write>(
    opts: &EstimateOpts,
    input: &mut R,
    output: &mut W,
) -> Result<EstimateInputs> {
    let monthly_bill = match opts.bill {
        Some(bill) => bill,
        None => prompt_monthly_bill(input, output)?,
    };
    let postal_code = match &opts.postal_code {
        Some(postal_code) => postal_code.clone(),
        None => prompt_postal_code(input, output)?,
    };
    let wants_subsidy = match opts.subsidy {
        Some(subsidy) => subsidy,
        None => prompt_subsidy(input, output)?,
    };

    Ok(EstimateInputs {
        monthly_bill,
        postal_code,
        wants_subsidy,
    })
}

/// Handle the `estimate` command.
pub fn handle_estimate_command(
    data_path: &Path,
    opts: &EstimateOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = load_settings(settings)?;

    // Prepare the output folder, if one was requested
    let mut overwrite = false;
    if let Some(output_path) = opts.output_dir.as_deref() {
        overwrite = create_output_directory(output_path, opts.overwrite || settings.overwrite)
            .with_context(|| {
                format!(
                    "Failed to create output directory: {}",
                    output_path.display()
                )
            })?;
    }

    // Initialise program logger, with log files alongside other outputs
    init_logger(&settings, opts.output_dir.as_deref())?;

    // Load the reference data
    let data = ReferenceData::from_path(data_path).context("Failed to load reference data.")?;
    info!("Loaded reference data from {}", data_path.display());

    // NB: We have to wait until the logger is initialised to display this warning
    if overwrite {
        warn!("Output folder will be overwritten");
    }

    let inputs = get_inputs(opts, &mut std::io::stdin().lock(), &mut std::io::stdout())?;
    let estimate = run_estimate(&data, &inputs)?;
    let report = Report::from_estimate(&estimate);
    println!("\n{report}");

    if let Some(output_path) = opts.output_dir.as_deref() {
        write_report(output_path, &report).context("Failed to write report.")?;
        write_metadata(output_path, data_path, &inputs).context("Failed to write metadata.")?;
        info!("Output written to {}", output_path.display());
    }

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(data_path: &Path, settings: Option<Settings>) -> Result<()> {
    let settings = load_settings(settings)?;

    // Initialise program logger (we won't save log files when running the validate command)
    init_logger(&settings, None)?;

    // Load/validate the reference data
    ReferenceData::from_path(data_path).context("Failed to validate reference data.")?;
    info!("Reference data validation successful!");

    Ok(())
}
