// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Run with `cargo run --example shell_echo -- --log-file /tmp/shell_echo.log`.

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use r3bl_shell_readline::{DisplayPreference, History, ReadlineAsync, ReadlineError,
                          ReadlineOptions, SafeAutocompleteFn, TracingConfig,
                          WriterConfig, create_autocomplete_fn, tracing_setup};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing_core::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// JSON file with the readline options. Defaults to the one in the config folder.
    #[arg(long = "options", short = 'o')]
    options_file: Option<PathBuf>,

    /// Write logs to this file.
    #[arg(long = "log-file", short = 'l')]
    log_file: Option<String>,

    /// Also write logs to `stdout` or `stderr`.
    #[arg(long = "log-display")]
    log_display: Option<DisplayPreference>,

    /// Overrides the history size from the options.
    #[arg(long = "history-size")]
    history_size: Option<usize>,
}

#[derive(Debug, PartialEq, EnumString, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
enum Command {
    #[strum(ascii_case_insensitive)]
    Help,

    #[strum(ascii_case_insensitive)]
    History,

    #[strum(ascii_case_insensitive)]
    Clear,

    #[strum(ascii_case_insensitive)]
    Exit,
}

fn command_names() -> Vec<String> { Command::iter().map(|it| it.to_string()).collect() }

/// Completes the command name in the first position, nothing after that.
fn create_command_provider() -> SafeAutocompleteFn {
    create_autocomplete_fn(|index, _tokens, args| {
        if index == 0 {
            Ok(args.to_vec())
        } else {
            Ok(vec![])
        }
    })
}

fn create_tracing_config(cli: &Cli) -> TracingConfig {
    let writer_config = match (cli.log_display, cli.log_file.clone()) {
        (Some(display), Some(file)) => WriterConfig::DisplayAndFile(display, file),
        (Some(display), None) => WriterConfig::Display(display),
        (None, Some(file)) => WriterConfig::File(file),
        (None, None) => WriterConfig::None,
    };
    TracingConfig {
        writer_config,
        level_filter: LevelFilter::DEBUG,
    }
}

fn load_options(cli: &Cli) -> miette::Result<ReadlineOptions> {
    let mut options = match &cli.options_file {
        Some(path) => ReadlineOptions::try_load(path)?,
        None => ReadlineOptions::try_load_from_config_folder()?,
    };
    if let Some(history_size) = cli.history_size {
        options.history_size = history_size.max(1);
    }
    Ok(options)
}

#[tokio::main]
#[allow(clippy::needless_return)]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    tracing_setup::init(create_tracing_config(&cli))?;
    let options = load_options(&cli)?;

    let Some(mut readline) = ReadlineAsync::try_new(options)? else {
        println!("stdin and stdout must be an interactive terminal");
        return Ok(());
    };

    readline.add_autocomplete_handler(create_command_provider(), command_names());
    readline.println(&format!("Available commands: {:?}", command_names()))?;

    loop {
        let line = match readline.read_line("$ ", None).await {
            Ok(line) => line,
            Err(report) => {
                if let Some(ReadlineError::Closed) = report.downcast_ref::<ReadlineError>() {
                    break;
                }
                return Err(report);
            }
        };

        // % is Display, ? is Debug.
        tracing::info!(message = "Read line", line = ?line);

        match Command::from_str(line.trim()) {
            Ok(Command::Help) => readline.print_wide(&command_names())?,
            Ok(Command::History) => {
                let count = readline.line_editor.history().len();
                readline.println(&format!("{count} entries in history"))?;
            }
            Ok(Command::Clear) => {
                let answer = readline.read_char("Clear history? (y or n) ").await?;
                if answer.eq_ignore_ascii_case("y") {
                    let max_size = readline.line_editor.options().history_size;
                    *readline.line_editor.history_mut() =
                        History::new(max_size);
                }
            }
            Ok(Command::Exit) => break,
            Err(_) => readline.println(&format!("echo: {line}"))?,
        }
    }

    Ok(())
}
