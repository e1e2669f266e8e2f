#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod pages;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::Context;
use clap::Parser;
use coursepath_core::AppConfig;
use dioxus::desktop::{Config, WindowBuilder};

/// Global data directory, set from command line
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Loaded configuration, set once before launch
static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Get the data directory (set from command line or default)
pub fn get_data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

/// Get the loaded configuration (defaults if launched without one)
pub fn get_config() -> AppConfig {
    APP_CONFIG.get().cloned().unwrap_or_default()
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("coursepath")
}

/// Coursepath - online course enrollment
#[derive(Parser, Debug)]
#[command(name = "coursepath-desktop")]
#[command(about = "Coursepath - browse courses and manage your learner profile")]
struct Args {
    /// Data directory for the session, profile cache and config
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to <data-dir>/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long)]
    base_url: Option<String>,

    /// CSRF token to send with form posts
    #[arg(long)]
    csrf_token: Option<String>,
}

fn main() -> anyhow::Result<()> {
    coursepath_core::logging::init("coursepath=info,coursepath_core=info");

    let args = Args::parse();

    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data dir {}", data_dir.display()))?;

    let config_path = args
        .config
        .unwrap_or_else(|| data_dir.join(coursepath_core::config::CONFIG_FILE_NAME));
    let mut config = AppConfig::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(token) = args.csrf_token {
        config.csrf_token = Some(token);
    }

    tracing::info!(data_dir = ?data_dir, backend = %config.base_url, "Starting Coursepath");

    let _ = DATA_DIR.set(data_dir);
    let _ = APP_CONFIG.set(config);

    let window = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Coursepath")
            .with_inner_size(dioxus::desktop::LogicalSize::new(960.0, 800.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(window)
        .launch(app::App);

    Ok(())
}
