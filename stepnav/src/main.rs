//! Step navigation CLI.
//!
//! Loads a task definition (`--task`) and an optional result snapshot
//! (`--result`), builds the configured navigator and answers one question:
//! which step comes next, which came before, or how far along the task is.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use stepnav::exit_codes;
use stepnav::io::config::{
    DEFAULT_CONFIG_FILE, NavigatorConfig, OutputFormat, load_config, write_config,
};
use stepnav::io::result_store::{load_or_empty, write_task_result};
use stepnav::io::task_store::load_task;
use stepnav::logging;
use stepnav::navigator::NavigatorKind;
use stepnav::query::{self, NavigationOutcome, ProgressOutcome, StepReport};

#[derive(Parser)]
#[command(
    name = "stepnav",
    version,
    about = "Resolve next/previous steps and progress for multi-step tasks"
)]
struct Cli {
    /// Navigator config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Override the configured navigator.
    #[arg(long, global = true, value_enum)]
    navigator: Option<NavigatorKind>,
    /// Override the configured output format.
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct TaskArgs {
    /// Task definition file (JSON).
    #[arg(long)]
    task: PathBuf,
}

#[derive(Args, Debug)]
struct ResultArgs {
    /// Task result snapshot (JSON). Missing means no results yet.
    #[arg(long)]
    result: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default config file if missing.
    Init {
        /// Overwrite an existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Check a task definition against the schema and invariants.
    Validate {
        #[command(flatten)]
        task: TaskArgs,
    },
    /// List every step the navigator knows.
    Steps {
        #[command(flatten)]
        task: TaskArgs,
    },
    /// Resolve one identifier (legacy shorthand included).
    Step {
        #[command(flatten)]
        task: TaskArgs,
        identifier: String,
    },
    /// Print the step after `--from`, or the first step.
    Next {
        #[command(flatten)]
        task: TaskArgs,
        #[command(flatten)]
        result: ResultArgs,
        #[arg(long)]
        from: Option<String>,
    },
    /// Print the step before `--from`.
    Previous {
        #[command(flatten)]
        task: TaskArgs,
        #[command(flatten)]
        result: ResultArgs,
        #[arg(long)]
        from: String,
    },
    /// Print progress at `--step`.
    Progress {
        #[command(flatten)]
        task: TaskArgs,
        #[command(flatten)]
        result: ResultArgs,
        #[arg(long)]
        step: String,
    },
    /// Append a step result to a result snapshot file.
    Record {
        #[command(flatten)]
        task: TaskArgs,
        /// Result snapshot to update (created if missing).
        #[arg(long)]
        result: PathBuf,
        #[arg(long)]
        step: String,
        /// Step to jump to from `--step`.
        #[arg(long)]
        skip_to: Option<String>,
    },
}

/// Settings resolved from the config file and global flags.
struct Settings {
    navigator: NavigatorKind,
    output: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    if let Command::Init { force } = cli.command {
        return cmd_init(&cli.config, force);
    }

    let config = load_config(&cli.config)?;
    logging::init(&config.log_filter);
    let settings = Settings {
        navigator: cli.navigator.unwrap_or(config.navigator),
        output: cli.output.unwrap_or(config.output),
    };

    match cli.command {
        Command::Init { .. } => Ok(exit_codes::OK),
        Command::Validate { task } => cmd_validate(&settings, &task.task),
        Command::Steps { task } => cmd_steps(&settings, &task.task),
        Command::Step { task, identifier } => cmd_step(&settings, &task.task, &identifier),
        Command::Next { task, result, from } => {
            let (task, result) = query::load_inputs(&task.task, result.result.as_deref())?;
            let outcome = query::next(&task, settings.navigator, from.as_deref(), &result)?;
            print_navigation(&settings, &outcome)
        }
        Command::Previous { task, result, from } => {
            let (task, result) = query::load_inputs(&task.task, result.result.as_deref())?;
            let outcome = query::previous(&task, settings.navigator, &from, &result)?;
            print_navigation(&settings, &outcome)
        }
        Command::Progress { task, result, step } => {
            let (task, result) = query::load_inputs(&task.task, result.result.as_deref())?;
            let outcome = query::progress(&task, settings.navigator, &step, &result)?;
            print_progress(&settings, &outcome)
        }
        Command::Record {
            task,
            result,
            step,
            skip_to,
        } => cmd_record(&settings, &task.task, &result, &step, skip_to.as_deref()),
    }
}

fn cmd_init(config_path: &Path, force: bool) -> Result<i32> {
    if !force && config_path.exists() {
        eprintln!("{} already exists", config_path.display());
        return Ok(exit_codes::OK);
    }
    write_config(config_path, &NavigatorConfig::default())
        .with_context(|| format!("write {}", config_path.display()))?;
    println!("{}", config_path.display());
    Ok(exit_codes::OK)
}

fn cmd_validate(settings: &Settings, task_path: &Path) -> Result<i32> {
    let summary = query::validate(task_path)?;
    match settings.output {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Text => println!(
            "{}: {} steps, {} leaves",
            summary.identifier, summary.steps, summary.leaves
        ),
    }
    Ok(exit_codes::OK)
}

fn cmd_steps(settings: &Settings, task_path: &Path) -> Result<i32> {
    let task = load_task(task_path)?;
    let reports = query::list_steps(&task, settings.navigator);
    match settings.output {
        OutputFormat::Json => print_json(&reports)?,
        OutputFormat::Text => {
            for report in &reports {
                println!("{}\t{}", report.path, report.step_type);
            }
        }
    }
    Ok(exit_codes::OK)
}

fn cmd_step(settings: &Settings, task_path: &Path, identifier: &str) -> Result<i32> {
    let task = load_task(task_path)?;
    let report = query::find_step(&task, settings.navigator, identifier)?;
    print_report(settings, &report)?;
    Ok(exit_codes::OK)
}

fn cmd_record(
    settings: &Settings,
    task_path: &Path,
    result_path: &Path,
    identifier: &str,
    skip_to: Option<&str>,
) -> Result<i32> {
    let task = load_task(task_path)?;
    let result = load_or_empty(result_path, &task.identifier)?;
    let updated = query::record(&task, settings.navigator, &result, identifier, skip_to)?;
    write_task_result(result_path, &updated)?;
    match settings.output {
        OutputFormat::Json => print_json(&updated)?,
        OutputFormat::Text => {
            if let Some(recorded) = updated.step_history.last() {
                println!("{}", recorded.identifier);
            }
        }
    }
    Ok(exit_codes::OK)
}

fn print_navigation(settings: &Settings, outcome: &NavigationOutcome) -> Result<i32> {
    match outcome {
        NavigationOutcome::Moved(report) => {
            print_report(settings, report)?;
            Ok(exit_codes::OK)
        }
        NavigationOutcome::End => {
            match settings.output {
                OutputFormat::Json => print_json(outcome)?,
                OutputFormat::Text => eprintln!("no step in that direction"),
            }
            Ok(exit_codes::END)
        }
    }
}

fn print_progress(settings: &Settings, outcome: &ProgressOutcome) -> Result<i32> {
    if settings.output == OutputFormat::Json {
        print_json(outcome)?;
    }
    match outcome {
        ProgressOutcome::Progress(progress) => {
            if settings.output == OutputFormat::Text {
                let suffix = if progress.estimated { " (estimated)" } else { "" };
                println!("{}/{}{}", progress.progress, progress.total, suffix);
            }
            Ok(exit_codes::OK)
        }
        ProgressOutcome::Hidden => {
            if settings.output == OutputFormat::Text {
                eprintln!("no progress to show");
            }
            Ok(exit_codes::END)
        }
    }
}

fn print_report(settings: &Settings, report: &StepReport) -> Result<()> {
    match settings.output {
        OutputFormat::Json => print_json(report),
        OutputFormat::Text => {
            println!("{}", report.identifier);
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{}", payload);
    Ok(())
}
