mod command;
mod logging;
mod render;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use genz_core::{AfterSave, Session, Settings};
use render::{OutputFormat, Renderer};
use shell::{Shell, Step};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// GenZ - a tiny in-memory social feed driven from the console
#[derive(Parser, Debug)]
#[command(name = "genz")]
#[command(about = "Post, react and browse notifications in an in-memory social feed")]
#[command(version)]
struct Cli {
    /// Settings file to load instead of ./genz.toml
    #[arg(long, short, env = "GENZ_CONFIG")]
    config: Option<PathBuf>,

    /// Pin the intro post to the top of the feed
    #[arg(long)]
    pinned_intro: bool,

    /// Stay on the edited post after saving instead of returning to the list
    #[arg(long)]
    stay_after_save: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if cli.pinned_intro {
        settings.store.pinned_intro = true;
    }
    if cli.stay_after_save {
        settings.navigation.after_save = AfterSave::StayOnPost;
    }
    tracing::debug!("Settings: {:?}", settings);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut shell = Shell::new(Session::from_settings(&settings), Renderer::new(format));

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    if !cli.json {
        writeln!(stdout, "GenZ - type 'help' for commands")?;
    }

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        match shell.handle_line(&line) {
            Some(Step::Print(output)) => {
                writeln!(stdout, "{}", output)?;
                stdout.flush()?;
            }
            Some(Step::Quit) => break,
            None => {}
        }
    }

    tracing::info!(
        "Session ended with {} posts",
        shell.session().store().list_posts().len()
    );
    Ok(())
}
