//! Pokedex - browse the PokeAPI from an interactive prompt
//!
//! Reads commands from stdin one line at a time, runs each to completion, and
//! prints the result. Responses are cached in memory for the configured TTL.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex::app::{App, Reply};
use pokedex::cli::{Cli, StartupConfig};

const PROMPT: &str = "Pokedex > ";

/// Sets up stderr logging; `RUST_LOG` overrides the verbosity flag
fn init_logging(verbose: bool) {
    let filter = if verbose { "pokedex=debug" } else { "pokedex=warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(PROMPT.as_bytes())?;
    stdout.flush()
}

/// Runs the REPL until `exit` or end of input
async fn run(config: StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::from_config(&config)?;
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();

    prompt()?;
    loop {
        buf.clear();
        if stdin.read_until(b'\n', &mut buf).await? == 0 {
            // EOF behaves like exit
            println!();
            return Ok(());
        }

        // Undecodable bytes become U+FFFD and fail as an unknown command
        let line = String::from_utf8_lossy(&buf);
        match app.handle_line(&line).await {
            Ok(Reply::Exit) => {
                println!("Closing the Pokedex... Goodbye!");
                return Ok(());
            }
            Ok(Reply::Output(text)) => print!("{}", text),
            Err(e) => println!("Error: {}", e),
        }
        prompt()?;
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    init_logging(config.verbose);
    tracing::debug!(?config, "starting");

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
