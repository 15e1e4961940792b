//! Chest Pain Simulator CLI
//!
//! Replays scripted actions into a training session and prints the derived
//! state:
//! - case catalog and per-case action menus
//! - posterior, risk, phase, acuity, feedback and score for a session
//! - local history of confirmed sessions
//! - JSON schema of history records

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use cps_common::{Diagnosis, Error, ErrorPayload, OutputFormat};
use cps_config::{load_catalog, resolve_history_path, CatalogOptions, CatalogSnapshot, ResolvedCatalog};
use cps_core::actions::action_menu;
use cps_core::exit_codes::ExitCode;
use cps_core::history::{summarize, FileHistoryStore, HistoryRecord, HistoryStore};
use cps_core::logging::{event_names, generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use cps_core::output;
use cps_core::schema::{available_schemas, generate_schema, DEFAULT_SCHEMA};
use cps_core::session::{Session, SessionSnapshot};
use serde::Serialize;
use std::path::PathBuf;

/// Five killer chest pain training simulator
#[derive(Parser)]
#[command(name = "cps")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Case catalog file (overrides CPS_CATALOG and the config directory)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// History file (overrides CPS_HISTORY and the data directory)
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Log format on stderr
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the cases in the catalog
    Cases,

    /// List the scripted actions available for a case
    Actions {
        /// Case code (AMI, AoD, PE, TPT, Boerhaave)
        #[arg(long)]
        case: Diagnosis,
    },

    /// Replay actions into a session and print its state
    Run(RunArgs),

    /// Show or clear the session history
    History {
        #[command(subcommand)]
        command: Option<HistoryCommands>,
    },

    /// Print the JSON schema of a history record (or another type)
    Schema {
        /// Type name
        #[arg(long = "type", default_value = DEFAULT_SCHEMA)]
        type_name: String,

        /// List available types
        #[arg(long)]
        list: bool,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Case code (AMI, AoD, PE, TPT, Boerhaave)
    #[arg(long)]
    case: Diagnosis,

    /// Trainee name recorded in history
    #[arg(long, default_value = "")]
    user: String,

    /// Elapsed minutes since arrival
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    elapsed: f64,

    /// Action id to perform, in order (repeatable or comma-separated)
    #[arg(long = "action", value_delimiter = ',')]
    actions: Vec<String>,

    /// Confirm the diagnosis and save a history record
    #[arg(long)]
    confirm: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum HistoryCommands {
    /// All records, newest first (default)
    List,
    /// Count and average score
    Summary,
    /// Delete all records
    Clear,
}

/// Payload of `cps run`.
#[derive(Serialize)]
struct RunOutput {
    catalog: CatalogSnapshot,
    session: SessionSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved: Option<HistoryRecord>,
}

#[derive(Serialize)]
struct HistoryCounts {
    count: usize,
    average_score: u32,
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env(
        LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet),
        cli.global.log_format,
    );
    init_logging(&log_config);
    tracing::debug!(
        event = event_names::RUN_STARTED,
        run_id = %generate_run_id(),
        "cps started"
    );

    let result = match &cli.command {
        Commands::Cases => run_cases(&cli.global),
        Commands::Actions { case } => run_actions(&cli.global, *case),
        Commands::Run(args) => run_session(&cli.global, args),
        Commands::History { command } => {
            run_history(&cli.global, command.unwrap_or(HistoryCommands::List))
        }
        Commands::Schema { type_name, list } => run_schema(type_name, *list),
    };

    let exit_code = match result {
        Ok(()) => ExitCode::Clean,
        Err(err) => output_error(&cli.global, &err),
    };
    std::process::exit(exit_code.as_i32());
}

fn load(global: &GlobalOpts) -> Result<ResolvedCatalog, Error> {
    let resolved = load_catalog(&CatalogOptions {
        catalog_path: global.catalog.clone(),
    })?;
    tracing::debug!(
        event = event_names::CATALOG_LOADED,
        source = %resolved.source,
        cases = resolved.catalog.cases.len(),
        "catalog loaded"
    );
    Ok(resolved)
}

fn history_store(global: &GlobalOpts) -> FileHistoryStore {
    FileHistoryStore::new(resolve_history_path(global.history.as_deref()))
}

fn emit(text: String) {
    println!("{}", text);
}

fn run_cases(global: &GlobalOpts) -> Result<(), Error> {
    let resolved = load(global)?;
    let cases = output::case_summaries(&resolved.catalog);
    emit(output::render(global.format, cases.as_slice(), output::render_cases_md)?);
    Ok(())
}

fn run_actions(global: &GlobalOpts, case: Diagnosis) -> Result<(), Error> {
    let resolved = load(global)?;
    let case_def = resolved
        .catalog
        .case(case)
        .ok_or_else(|| Error::UnknownCase(case.to_string()))?;
    let actions = action_menu(case_def, case);
    emit(output::render(global.format, actions.as_slice(), |a| {
        output::render_actions_md(case, a)
    })?);
    Ok(())
}

fn run_session(global: &GlobalOpts, args: &RunArgs) -> Result<(), Error> {
    let resolved = load(global)?;
    let mut session = Session::new(&resolved.catalog, args.case)?.with_user(args.user.clone());
    session.set_elapsed_minutes(args.elapsed);
    for action in &args.actions {
        session.perform(action.trim())?;
    }

    let saved = if args.confirm {
        let mut store = history_store(global);
        session.confirm_diagnosis(&mut store, Utc::now())
    } else {
        None
    };

    let out = RunOutput {
        catalog: CatalogSnapshot::from_resolved(&resolved),
        session: session.snapshot(),
        saved,
    };
    emit(output::render(global.format, &out, |o| {
        let mut md = output::render_snapshot_md(&o.session);
        if let Some(record) = &o.saved {
            md.push_str(&format!(
                "\n\nSaved to history: {} scored {} on {}",
                record.user, record.score, record.case
            ));
        }
        md
    })?);
    Ok(())
}

fn run_history(global: &GlobalOpts, command: HistoryCommands) -> Result<(), Error> {
    let mut store = history_store(global);
    match command {
        HistoryCommands::List => {
            let summary = summarize(store.load());
            emit(output::render(global.format, &summary, output::render_history_md)?);
        }
        HistoryCommands::Summary => {
            let summary = summarize(store.load());
            let counts = HistoryCounts {
                count: summary.count,
                average_score: summary.average_score,
            };
            emit(output::render(global.format, &counts, |c| {
                format!("Sessions: {}  Average score: {}", c.count, c.average_score)
            })?);
        }
        HistoryCommands::Clear => {
            store.clear();
            emit(output::render(
                global.format,
                &serde_json::json!({ "cleared": true }),
                |_| "History cleared.".to_string(),
            )?);
        }
    }
    Ok(())
}

fn run_schema(type_name: &str, list: bool) -> Result<(), Error> {
    if list {
        for (name, desc) in available_schemas() {
            println!("{:<16} {}", name, desc);
        }
        return Ok(());
    }
    let schema = generate_schema(type_name).ok_or_else(|| {
        Error::Config(format!(
            "unknown schema type '{}' (see 'cps schema --list')",
            type_name
        ))
    })?;
    emit(serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn output_error(global: &GlobalOpts, error: &Error) -> ExitCode {
    let exit_code = ExitCode::from(error);
    match global.format {
        OutputFormat::Json => {
            let payload = ErrorPayload::from(error);
            let response = serde_json::json!({
                "status": "error",
                "exit_code": exit_code.code_name(),
                "error": payload,
            });
            match serde_json::to_string_pretty(&response) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("Error: {}", error),
            }
        }
        OutputFormat::Md => {
            eprintln!("# Error");
            eprintln!();
            eprintln!("{}", error);
            eprintln!();
            eprintln!("{}", error.remediation());
        }
    }
    exit_code
}
