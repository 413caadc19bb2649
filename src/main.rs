//! DarkProxy command-line front end.
//!
//! Each subcommand maps one address-bar or history-panel action onto the
//! [`App`] core.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use darkproxy::app::App;
use darkproxy::managers::history_store::{HistoryStoreTrait, RECENT_DISPLAY_COUNT};
use darkproxy::services::settings_engine::SettingsEngineTrait;
use darkproxy::services::theme_engine::ThemeEngineTrait;
use darkproxy::types::navigation::AttemptResult;
use darkproxy::types::settings::ThemeMode;

#[derive(Parser, Debug)]
#[command(name = "darkproxy", version, about = "Browse through public CORS proxies with a local history")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a URL and render it through the proxy chain
    Open {
        /// Address to open; `https://` is assumed when no scheme is given
        url: String,
        /// Write the rendered page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List browsing history, most recent first
    History {
        #[arg(short, long, default_value_t = RECENT_DISPLAY_COUNT)]
        limit: usize,
        /// Show every entry regardless of --limit
        #[arg(long)]
        all: bool,
    },
    /// Delete one URL from history
    Remove { url: String },
    /// Delete all history
    Clear,
    /// Show or set the theme (dark, light, auto)
    Theme { mode: Option<ThemeMode> },
    /// Show or set the accent color (#rrggbb)
    Accent { color: Option<String> },
    /// Print the active configuration
    Config,
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut app = App::open_default().context("failed to initialize DarkProxy")?;

    match cli.command {
        Command::Open { url, output } => {
            let outcome = app.navigate(&url).await?;
            for (i, attempt) in outcome.report.attempts.iter().enumerate() {
                match &attempt.result {
                    AttemptResult::Loaded => eprintln!("[{}] {} ok", i + 1, attempt.endpoint),
                    AttemptResult::Failed(reason) => {
                        eprintln!("[{}] {} failed: {}", i + 1, attempt.endpoint, reason)
                    }
                }
            }

            let Some(page) = outcome.page else {
                eprintln!("Unable to load {}", outcome.report.target);
                eprintln!("All proxy services failed. The site might be blocking proxy access.");
                return Ok(ExitCode::FAILURE);
            };
            match output {
                Some(path) => {
                    fs::write(&path, &page.body)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Saved {} to {}", page.address, path.display());
                }
                None => println!("{}", page.body),
            }
        }
        Command::History { limit, all } => {
            let entries = if all { app.history.all() } else { app.history.recent(limit) };
            if entries.is_empty() {
                println!("No browsing history");
            }
            for entry in entries {
                let plural = if entry.visit_count > 1 { "s" } else { "" };
                println!("{}\n  {}\n  Visited {} time{}", entry.title, entry.url, entry.visit_count, plural);
            }
        }
        Command::Remove { url } => {
            app.history.remove(&url)?;
        }
        Command::Clear => {
            app.history.clear()?;
            println!("History cleared");
        }
        Command::Theme { mode } => {
            if let Some(mode) = mode {
                app.theme_engine.set_theme(mode)?;
                println!("Theme updated");
            }
            println!("{}", app.theme_engine.get_theme());
        }
        Command::Accent { color } => {
            if let Some(color) = color {
                app.theme_engine.set_accent_color(&color)?;
                println!("Accent color updated");
            }
            println!(
                "{} (hover {})",
                app.theme_engine.get_accent_color(),
                app.theme_engine.hover_color()
            );
        }
        Command::Config => {
            println!("# {}", app.settings_engine.get_config_path());
            println!("{}", serde_json::to_string_pretty(app.config())?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
