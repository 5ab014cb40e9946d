//! Command-line interface entry point for `cgpa-tracker`

mod args;
mod commands;

use args::{Cli, Command};
use cgpa_tracker::config::Config;
use cgpa_tracker::info;
use cgpa_tracker::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use clap::Parser;
use commands::AppContext;

fn main() {
    let args = Cli::parse();

    // The config command edits the file as stored; everything else sees CLI overrides
    let file_config = Config::load();
    let defaults = Config::from_defaults();
    let mut config = file_config.clone();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    // Handlers other than config need the session and a resolved grade scale
    let reg = args.reg.clone();
    let context = move || AppContext::new(config, reg);

    match args.command {
        Command::Config { subcommand } => {
            let mut file_config = file_config;
            commands::config::run(subcommand, &mut file_config, &defaults);
        }
        Command::Sgpa { courses, csv, save } => {
            commands::sgpa::run(&context(), &courses, csv.as_ref(), save);
        }
        Command::Cgpa { offline } => commands::cgpa::run(&context(), &offline.sgpas),
        Command::Target { subcommand } => commands::target::run(&context(), subcommand),
        Command::History { subcommand } => commands::history::run(&context(), subcommand),
        Command::Report {
            output,
            format,
            offline,
            target,
        } => {
            commands::report::run(&context(), output.as_deref(), &format, &offline.sgpas, target);
        }
        Command::Auth { subcommand } => commands::auth::run(&context(), subcommand),
        Command::Leave { subcommand } => commands::leave::run(&context(), subcommand),
        Command::Docs { subcommand } => commands::docs::run(&context(), subcommand),
        Command::Profile { subcommand } => commands::profile::run(&context(), subcommand),
        Command::Class { subcommand } => commands::class::run(&context(), subcommand),
        Command::Admin { subcommand } => commands::admin::run(&context(), subcommand),
    }
}
