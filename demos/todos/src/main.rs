//! todos - todo and goal lists on a minidux store
//!
//! # Usage
//!
//! ```sh
//! # Commands as arguments: keyword followed by a name or an id
//! cargo run -p todos-demo -- add-todo "Learn Rust" add-goal "Ship it" toggle-todo 1
//!
//! # Or one command per stdin line
//! printf 'add-todo Learn Rust\nadd-todo Buy bitcoin\n' | cargo run -p todos-demo
//!
//! # Final state as JSON, with the action log on stderr
//! cargo run -p todos-demo -- --json --debug add-todo "Learn Rust"
//! ```

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use minidux::debug::{ActionLoggerConfig, ActionLoggerMiddleware};
use todos_demo::{create_app_store, render, Command, IdGenerator, RandomIds, SequentialIds};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "todos")]
#[command(about = "Todo and goal lists driven by a minidux store")]
struct Args {
    /// Commands as keyword/argument pairs; read from stdin when empty
    commands: Vec<String>,

    /// Print the final state as JSON instead of rendering after every change
    #[arg(long)]
    json: bool,

    /// Generate random UUIDs instead of sequential ids
    #[arg(long)]
    random_ids: bool,

    /// Record dispatched actions through the action logger
    #[arg(long)]
    debug: bool,

    /// Action names to log, comma separated globs (falls back to MINIDUX_LOG_INCLUDE)
    #[arg(long)]
    log_include: Option<String>,

    /// Action names to skip, comma separated globs (falls back to MINIDUX_LOG_EXCLUDE)
    #[arg(long)]
    log_exclude: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let commands = if args.commands.is_empty() {
        read_commands(io::stdin().lock())?
    } else {
        Command::parse_args(&args.commands).context("invalid command arguments")?
    };

    let logger = ActionLoggerMiddleware::new(logger_config(&args)).active(args.debug);
    let store = create_app_store(logger, |_, reason| eprintln!("{reason}"));

    let _render = (!args.json).then(|| {
        let weak = store.downgrade();
        store.subscribe(move || {
            if let Some(store) = weak.upgrade() {
                println!("{}", render(&store.get_state()));
            }
        })
    });

    let mut ids: Box<dyn IdGenerator> = if args.random_ids {
        Box::new(RandomIds)
    } else {
        Box::new(SequentialIds::new())
    };

    tracing::debug!(count = commands.len(), "Dispatching commands");
    for command in commands {
        store.dispatch(command.into_action(&mut *ids));
    }

    if args.json {
        let json = serde_json::to_string_pretty(&*store.get_state())?;
        println!("{json}");
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    let default = if debug {
        "todos=debug,todos_demo=debug,minidux_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// CLI patterns win; otherwise the environment decides
fn logger_config(args: &Args) -> ActionLoggerConfig {
    if args.log_include.is_none() && args.log_exclude.is_none() {
        ActionLoggerConfig::from_env()
    } else {
        ActionLoggerConfig::new(args.log_include.as_deref(), args.log_exclude.as_deref())
    }
}

/// One command per line; blank lines and `#` comments are skipped
fn read_commands(input: impl BufRead) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command = line
            .parse::<Command>()
            .with_context(|| format!("line {}: `{line}`", index + 1))?;
        commands.push(command);
    }
    Ok(commands)
}
