use std::path::PathBuf;

use clap::Parser;
use clipboard_translator_lib::shared::settings::AppSettings;
use clipboard_translator_lib::shared::types::Language;
use clipboard_translator_lib::{run, RunOptions};

/// Watch the clipboard and translate newly copied text
#[derive(Debug, Parser)]
#[command(name = "clipboard-translator", version, about)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Target language for English text (en, es, ko, vi, ja, de, fr)
    #[arg(long)]
    target: Option<String>,

    /// Copy translations back to the clipboard
    #[arg(long)]
    auto_copy: bool,

    /// Clipboard poll interval in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default filter
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => AppSettings::load_from(path).await,
        None => AppSettings::load().await,
    };
    let mut settings = loaded.unwrap_or_else(|e| {
        log::error!("Failed to load settings: {}", e);
        AppSettings::default()
    });

    if let Some(target) = &cli.target {
        match Language::parse(target) {
            Ok(lang) => settings.preferences.default_target_lang = lang.code().to_string(),
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(2);
            }
        }
    }
    if cli.auto_copy {
        settings.preferences.auto_copy = true;
    }
    if let Some(interval) = cli.poll_interval_ms {
        settings.monitor.poll_interval_ms = interval;
    }

    if let Err(e) = run(settings, RunOptions { json: cli.json }).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
