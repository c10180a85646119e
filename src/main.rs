// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Curator: Local File Organizer
//!
//! Plans and executes file organization by date or type, with built-in
//! diagnostics for the local AI inference engine.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use curator::collector::{collect_file_paths, CollectOptions};
use curator::config::AppConfig;
use curator::doctor::{self, report, DoctorOptions};
use curator::engine::EngineClient;
use curator::executor::{execute_plan, undo_moves};
use curator::history::History;
use curator::planner::{self, OperationPlan, OrganizeMode};
use curator::{CuratorError, Result};

/// Curator CLI - Local File Organizer
#[derive(Parser, Debug)]
#[command(name = "curator")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version = "1.0.0")]
#[command(about = "Local file organizer with AI engine diagnostics", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Output format for results
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json", "jsonl"])]
    format: String,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute an organization plan without touching any file
    Plan {
        /// Directory to organize (overrides config)
        source: Option<PathBuf>,

        /// Destination root (overrides config)
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Grouping mode
        #[arg(long, default_value = "type", value_parser = ["date", "type"])]
        by: String,
    },

    /// Plan and execute an organization pass
    Organize {
        /// Directory to organize (overrides config)
        source: Option<PathBuf>,

        /// Destination root (overrides config)
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Grouping mode
        #[arg(long, default_value = "type", value_parser = ["date", "type"])]
        by: String,

        /// Dry run mode (report moves without performing them)
        #[arg(long)]
        dry_run: bool,
    },

    /// Run diagnostic checks on the pipeline and engine
    Doctor {
        /// Directory to check (overrides config)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Skip engine reachability, model, and completion checks
        #[arg(long)]
        skip_engine: bool,
    },

    /// Show engine and configuration status
    Status {
        /// Check specific model availability
        #[arg(short, long)]
        model: Option<String>,
    },

    /// History and undo operations
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryCommands {
    /// List recent history entries
    List {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },

    /// Undo recent moves
    Undo {
        /// Number of moves to undo
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Dry run (show what would be undone)
        #[arg(long)]
        dry_run: bool,
    },

    /// Clear all history
    Clear {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config.json")]
        output: PathBuf,
    },

    /// Validate configuration file
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load configuration
    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Some(Commands::Plan { source, dest, by }) => {
            run_plan(config, source, dest, &by, &cli.format)
        }
        Some(Commands::Organize { source, dest, by, dry_run }) => {
            run_organize(config, source, dest, &by, dry_run)
        }
        Some(Commands::Doctor { source, skip_engine }) => {
            run_doctor(config, source, skip_engine, &cli.format).await
        }
        Some(Commands::Status { model }) => {
            run_status(config, model).await
        }
        Some(Commands::History { action }) => {
            run_history_command(config, action)
        }
        Some(Commands::Config { action }) => {
            run_config_command(config, action, &cli.config)
        }
        None => {
            // Default: run diagnostics
            run_doctor(config, None, false, &cli.format).await
        }
    }
}

fn resolve_mode(by: &str) -> Result<OrganizeMode> {
    OrganizeMode::parse(by)
        .ok_or_else(|| CuratorError::Config(format!("Unknown organize mode: {}", by)))
}

/// Collect paths and compute the plan for a command invocation
fn build_plan(
    config: &AppConfig,
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
    mode: OrganizeMode,
) -> Result<(OperationPlan, PathBuf)> {
    let source = source.unwrap_or_else(|| PathBuf::from(&config.source));
    let dest = dest.unwrap_or_else(|| PathBuf::from(&config.destination));

    let options = CollectOptions::from_patterns(&config.collector.exclude)?;
    let files = collect_file_paths(&source, &options)?;
    info!("Collected {} files from {:?}", files.len(), source);

    let plan = planner::plan(mode, &files, &dest);
    Ok((plan, dest))
}

/// Print a plan without executing it
fn run_plan(
    config: AppConfig,
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
    by: &str,
    format: &str,
) -> Result<()> {
    let mode = resolve_mode(by)?;
    let (plan, _) = build_plan(&config, source, dest, mode)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        "jsonl" => {
            for op in &plan {
                println!("{}", serde_json::to_string(op)?);
            }
        }
        _ => {
            for op in &plan {
                println!(
                    "{:<14} {} -> {}",
                    op.category,
                    op.source.display(),
                    op.destination.display()
                );
            }
            println!("\nPlanned {} operations", plan.len());
        }
    }

    Ok(())
}

/// Plan and execute an organization pass
fn run_organize(
    config: AppConfig,
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
    by: &str,
    dry_run: bool,
) -> Result<()> {
    let mode = resolve_mode(by)?;

    if dry_run {
        warn!("DRY RUN MODE - files will not be moved");
    }

    let (plan, dest) = build_plan(&config, source, dest, mode)?;
    let history = History::new(PathBuf::from(&config.history.path));

    let report = execute_plan(&plan, mode, &history, dry_run)?;

    println!(
        "{}Organized into {:?}: {} moved, {} skipped, {} failed",
        if dry_run { "[DRY RUN] " } else { "" },
        dest,
        report.moved,
        report.skipped,
        report.failed
    );

    Ok(())
}

/// Run the diagnostic suite
async fn run_doctor(
    config: AppConfig,
    source: Option<PathBuf>,
    skip_engine: bool,
    format: &str,
) -> Result<()> {
    let mut config = config;
    if let Some(source) = source {
        config.source = source.to_string_lossy().to_string();
    }

    let options = DoctorOptions {
        skip_engine,
        ..DoctorOptions::default()
    };

    let results = doctor::run_checks(&config, &options).await;

    match format {
        "json" => println!("{}", report::render_json(&results)?),
        "jsonl" => print!("{}", report::render_jsonl(&results)?),
        _ => print!("{}", report::render_text(&results)),
    }

    if report::failure_count(&results) > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Run status check
async fn run_status(config: AppConfig, model: Option<String>) -> Result<()> {
    let client = EngineClient::new(&config.engine);

    println!("Curator v1.0.0 Status");
    println!("=====================");

    // Check engine
    match client.health_check().await {
        Ok(()) => println!("Engine: Running"),
        Err(e) => println!("Engine: Error - {}", e),
    }

    // List models
    match client.list_models().await {
        Ok(models) => {
            let wanted = model.as_deref().unwrap_or(&config.engine.model);
            println!("\nAvailable models:");
            for m in &models {
                let marker = if m.starts_with(wanted) { "→" } else { " " };
                println!("  {} {}", marker, m);
            }
        }
        Err(e) => println!("  Error listing models: {}", e),
    }

    println!("\nConfiguration:");
    println!("  Source: {}", config.source);
    println!("  Destination: {}", config.destination);
    println!("  Model: {}", config.engine.model);
    println!("  History: {}", config.history.path);

    Ok(())
}

/// Run history commands
fn run_history_command(config: AppConfig, action: HistoryCommands) -> Result<()> {
    let history = History::new(PathBuf::from(&config.history.path));

    match action {
        HistoryCommands::List { count } => {
            let entries = history.get_recent(count)?;
            println!("Recent history ({} entries):", entries.len());
            for entry in entries {
                let status = if entry.undone { "[UNDONE]" } else { "" };
                println!(
                    "  {} [{}] {} -> {} {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.category,
                    entry.source.display(),
                    entry.destination.display(),
                    status
                );
            }
        }
        HistoryCommands::Undo { count, dry_run } => {
            let report = undo_moves(&history, count, dry_run)?;
            if report.moved == 0 && report.skipped == 0 {
                println!("No moves to undo");
            } else {
                println!(
                    "{}Undone: {}, skipped: {}, failed: {}",
                    if dry_run { "[DRY RUN] " } else { "" },
                    report.moved,
                    report.skipped,
                    report.failed
                );
            }
        }
        HistoryCommands::Clear { force } => {
            if !force {
                eprintln!("Use --force to confirm clearing history");
                return Ok(());
            }
            history.clear()?;
            println!("History cleared");
        }
    }

    Ok(())
}

/// Run config commands
fn run_config_command(
    config: AppConfig,
    action: ConfigCommands,
    config_path: &std::path::Path,
) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        ConfigCommands::Generate { output } => {
            let default_config = AppConfig::default();
            default_config.save(&output)?;
            println!("Generated config at {:?}", output);
        }
        ConfigCommands::Validate => {
            println!("Configuration at {:?} is valid", config_path);
            println!("  Source: {}", config.source);
            println!("  Destination: {}", config.destination);
            println!("  Engine URL: {}", config.engine.url);
            println!("  Model: {}", config.engine.model);
        }
    }

    Ok(())
}
