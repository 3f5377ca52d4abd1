// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use remould_app::{AppState, DashboardStats, Project, Room, ShoppingItem, TabKind, User};
use runtime::FsRuntime;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `remould --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        return Ok(());
    }

    let mut state = initial_state(&config, &options);
    if options.dump_state {
        println!("{}", dump_state(&state)?);
        return Ok(());
    }

    if let Some(log_file) = config.log_file() {
        logging::init_file_logging(&log_file, &config.log_filter())?;
    }
    info!(
        rooms = state.rooms.len(),
        projects = state.projects.len(),
        tab = state.active_tab.as_str(),
        "starting remould"
    );

    let mut runtime = FsRuntime::new(config.max_image_size());
    remould_tui::run_app(&mut state, &mut runtime)
}

fn initial_state(config: &Config, options: &CliOptions) -> AppState {
    let mut state = if options.empty || !config.seed_demo() {
        AppState::default()
    } else {
        AppState::with_demo_data()
    };
    state.active_tab = config.start_tab();
    state
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StateDump<'a> {
    active_tab: TabKind,
    stats: DashboardStats,
    user: &'a User,
    rooms: &'a [Room],
    projects: &'a [Project],
    shopping_list: &'a [ShoppingItem],
}

fn dump_state(state: &AppState) -> Result<String> {
    let dump = StateDump {
        active_tab: state.active_tab,
        stats: DashboardStats::collect(&state.rooms, &state.projects),
        user: &state.user,
        rooms: &state.rooms,
        projects: &state.projects,
        shopping_list: &state.shopping_list,
    };
    serde_json::to_string_pretty(&dump).context("serialize state")
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    dump_state: bool,
    empty: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        dump_state: false,
        empty: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--dump-state" => {
                options.dump_state = true;
            }
            "--empty" => {
                options.empty = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("remould");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --dump-state             Print the starting rooms and projects as JSON");
    println!("  --empty                  Start without the sample rooms and projects");
    println!("  --check                  Validate config and exit");
    println!("  --help                   Show this help");
}
