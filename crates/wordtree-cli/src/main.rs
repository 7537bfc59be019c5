mod cli;
mod config;
mod error;
mod loader;
mod session;

use clap::Parser;
use cli::Cli;
use config::Config;
use error::{exit_with_error, CliResult};
use session::Session;
use std::io::{self, Write};
use wordtree::RbTree;

fn init_tracing(cli: &Cli) {
    // --quiet silences everything, --verbose honours RUST_LOG and falls back
    // to "info", and the default keeps warnings only.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    let ansi = !(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing(&cli);

    if let Err(e) = run(cli) {
        exit_with_error(e);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = Config::resolve(&cli)?;
    let mut tree = RbTree::with_order(config.order);
    let report = loader::load_file(&config.dictionary, &mut tree)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if config.show_level_order {
        writeln!(out, "Level order:")?;
        session::print_keys(&mut out, tree.level_order())?;
    }
    writeln!(out, "File loaded successfully")?;

    let mut session = Session::new(tree, report.inserted);
    session.report(&mut out)?;
    session.run(io::stdin().lock(), &mut out)?;
    tracing::info!(size = session.size(), "session finished");
    Ok(())
}
