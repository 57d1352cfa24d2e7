//! # Linecut CLI Application
//!
//! Terminal front end for the cut-list planner. Loads a job (or a bare input
//! document), runs the planner once and prints the plan as JSON, a text
//! table, or an HTML table.
//!
//! ```text
//! linecut new deck.cut.json --name "Deck" --kerf 0.125
//! linecut plan deck.cut.json --format text
//! linecut plan deck.cut.json --format html --output deck.html
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use cut_core::report::{render_html, render_text};
use cut_core::units::LengthUnit;
use cut_core::{load_input, save_job, CutJob, CutPlan, JobSettings, PlanError, PlanResult};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "linecut")]
#[command(about = "Plan linear cuts from stock bars with minimal waste")]
#[command(version)]
struct Cli {
    /// Log planner decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a job file or bare input document
    Plan {
        /// Path to the job (.cut.json) or input JSON
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write the plan to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a starter job file
    New {
        /// Path of the job file to create
        file: PathBuf,

        /// Job name
        #[arg(short, long, default_value = "Untitled")]
        name: String,

        /// Saw kerf width
        #[arg(short, long, default_value = "0.125")]
        kerf: f64,

        /// Unit the job's lengths are written in (in, ft, mm, cm)
        #[arg(short, long, default_value = "in", value_parser = parse_unit)]
        unit: LengthUnit,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a job file without planning it
    Check {
        /// Path to the job (.cut.json) or input JSON
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
    Html,
}

fn parse_unit(code: &str) -> Result<LengthUnit, String> {
    LengthUnit::from_code(code).ok_or_else(|| {
        let known: Vec<_> = LengthUnit::ALL.iter().map(LengthUnit::code).collect();
        format!("unknown unit '{}' (expected one of: {})", code, known.join(", "))
    })
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Plan {
            file,
            format,
            output,
        } => run_plan(&file, format, output.as_deref()),
        Commands::New {
            file,
            name,
            kerf,
            unit,
            force,
        } => run_new(&file, name, kerf, unit, force),
        Commands::Check { file } => run_check(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::from(exit_status(&e))
        }
    }
}

fn run_plan(file: &Path, format: OutputFormat, output: Option<&Path>) -> PlanResult<()> {
    let job = load_input(file)?;
    info!(job = %job.meta.name, parts = job.input.part_count(), "planning");

    let plan = job.plan()?;
    let rendered = render(&plan, &job.settings, format)?;

    match output {
        Some(path) => {
            fs::write(path, &rendered).map_err(|e| {
                PlanError::file_error("write", path.display().to_string(), e.to_string())
            })?;
            println!(
                "Wrote plan for '{}' to {} ({} bars, yield {:.2}%)",
                job.meta.name,
                path.display(),
                plan.bar_count(),
                plan.yield_pct
            );
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn render(plan: &CutPlan, settings: &JobSettings, format: OutputFormat) -> PlanResult<String> {
    Ok(match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(plan)?;
            json.push('\n');
            json
        }
        OutputFormat::Text => render_text(plan, settings),
        OutputFormat::Html => render_html(plan, settings),
    })
}

fn run_new(file: &Path, name: String, kerf: f64, unit: LengthUnit, force: bool) -> PlanResult<()> {
    if file.exists() && !force {
        return Err(PlanError::file_error(
            "create",
            file.display().to_string(),
            "File already exists (use --force to overwrite)",
        ));
    }

    let mut job = CutJob::sample(name, kerf);
    job.settings.unit = unit;
    job.input.validate()?;
    save_job(&job, file)?;
    debug!(id = %job.meta.id, "created job");

    println!("Created job '{}' at {}", job.meta.name, file.display());
    Ok(())
}

fn run_check(file: &Path) -> PlanResult<()> {
    let job = load_input(file)?;
    job.input.validate()?;

    println!("Job:    {} ({})", job.meta.name, job.meta.id);
    println!("Kerf:   {}", job.settings.unit.format(job.input.kerf, job.settings.precision));
    println!("Stock:  {} definitions", job.input.stock.len());
    println!(
        "Parts:  {} requested, {} pieces",
        job.input.parts.len(),
        job.input.part_count()
    );
    println!("OK");
    Ok(())
}

/// Exit status 2 for problems with the request itself, 1 for everything else.
fn exit_status(e: &PlanError) -> u8 {
    if e.is_user_error() {
        2
    } else {
        1
    }
}

fn report_error(e: &PlanError) {
    eprintln!("Error [{}]: {}", e.error_code(), e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}
