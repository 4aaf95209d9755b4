use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveTime};
use clap::Parser;
use echo_core::Granularity;
use tracing_subscriber::EnvFilter;

use echo_cli::commands::slots::SlotSettings;
use echo_cli::commands::{catalog, merge, notes, slots, status, tasks, util};
use echo_cli::{Cli, Commands, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config: &Config) -> Result<echo_db::Database> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    echo_db::Database::open(&config.database_path).context("failed to open database")
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

/// Resolves slot settings from config, letting command-line flags win.
fn slot_settings(
    config: &Config,
    granularity: Option<u32>,
    end_of_day: Option<f64>,
) -> Result<SlotSettings> {
    let granularity = match granularity {
        Some(minutes) => Granularity::try_from(minutes)?,
        None => config.granularity()?,
    };
    Ok(SlotSettings {
        granularity,
        end_of_day: end_of_day.unwrap_or(config.end_of_day),
    })
}

fn local_time() -> NaiveTime {
    Local::now().time()
}

#[expect(
    clippy::too_many_lines,
    reason = "CLI command dispatch is inherently verbose"
)]
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Slots {
            at,
            granularity,
            end_of_day,
            json,
            watch,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let settings = slot_settings(&config, granularity, end_of_day)?;
            if watch {
                slots::watch(
                    &mut out,
                    local_time,
                    settings,
                    config.refresh_interval(),
                    None,
                )?;
            } else {
                let now = match at.as_deref() {
                    Some(at) => util::parse_clock(at)?,
                    None => local_time(),
                };
                slots::run(&mut out, now, settings, json)?;
            }
        }
        Some(Commands::Merge { tokens }) => {
            merge::run(&mut out, &tokens)?;
        }
        Some(Commands::Format { start, end }) => {
            merge::format(&mut out, start, end)?;
        }
        Some(Commands::Catalog { json }) => {
            catalog::run(&mut out, json)?;
        }
        Some(Commands::Add {
            text,
            quadrant,
            slots,
            hours,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let db = open_database(&config)?;
            let selection = util::build_selection(&slots, &hours)?;
            tasks::add(&mut out, &db, quadrant, &text, &selection)?;
        }
        Some(Commands::List { json }) => {
            let config = load_config(cli.config.as_deref())?;
            let db = open_database(&config)?;
            tasks::list(&mut out, &db, json)?;
        }
        Some(Commands::Done { id }) => {
            let config = load_config(cli.config.as_deref())?;
            let db = open_database(&config)?;
            tasks::toggle(&mut out, &db, &id)?;
        }
        Some(Commands::Edit {
            id,
            text,
            slots,
            clear_times,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let db = open_database(&config)?;
            tasks::edit(&mut out, &db, &id, text, &slots, clear_times)?;
        }
        Some(Commands::Rm { id }) => {
            let config = load_config(cli.config.as_deref())?;
            let db = open_database(&config)?;
            tasks::remove(&mut out, &db, &id)?;
        }
        Some(Commands::Mv {
            id,
            quadrant,
            index,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let db = open_database(&config)?;
            tasks::move_task(&mut out, &db, &id, quadrant, index)?;
        }
        Some(Commands::ClearCompleted) => {
            let config = load_config(cli.config.as_deref())?;
            let db = open_database(&config)?;
            tasks::clear_completed(&mut out, &db)?;
        }
        Some(Commands::Reset) => {
            let config = load_config(cli.config.as_deref())?;
            let db = open_database(&config)?;
            tasks::reset(&mut out, &db)?;
        }
        Some(Commands::Notes { set }) => {
            let config = load_config(cli.config.as_deref())?;
            let db = open_database(&config)?;
            notes::run(&mut out, &db, set.as_deref())?;
        }
        Some(Commands::Status) => {
            let config = load_config(cli.config.as_deref())?;
            let db = open_database(&config)?;
            let settings = slot_settings(&config, None, None)?;
            status::run(&mut out, &db, &config.database_path, local_time(), settings)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    out.flush()?;
    Ok(())
}
