//! CardVault - browse trading-card catalogs from the terminal
//!
//! Thin front end over `cardvault-core`: resolves configuration, drives
//! the catalog browser, and renders results as tables.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cardvault_core::catalog::{CatalogBrowser, ClientConfig, HttpTransport, License};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "cardvault",
    about = "Browse card catalogs and track your collection",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Base URL for the catalog API
    #[clap(long, global = true)]
    base_url: Option<String>,

    /// Path to a JSON client config file
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (RUST_LOG takes precedence when set)
    #[clap(long, global = true, value_enum)]
    log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the supported licenses
    Licenses,

    /// List a license's extensions, newest release first
    Extensions {
        /// License slug (e.g. "pokemon", "magic")
        license: String,
    },

    /// Show the card grid for an extension
    Cards {
        /// License slug (e.g. "pokemon", "magic")
        license: String,
        /// Extension id as shown by `extensions`
        extension: String,
    },
}

#[derive(Tabled)]
struct LicenseRow {
    #[tabled(rename = "License")]
    name: &'static str,
    #[tabled(rename = "Slug")]
    slug: &'static str,
}

#[derive(Tabled)]
struct ExtensionRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cards")]
    total: String,
}

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Owned")]
    owned: &'static str,
    #[tabled(rename = "Image")]
    image: String,
}

fn init_logging(level: Option<&LogLevel>) {
    let directive = level
        .map(LogLevel::to_filter_directive)
        .unwrap_or("warn");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_license(name: &str) -> Result<License> {
    License::from_name(name).with_context(|| {
        let slugs: Vec<&str> = License::ALL.iter().map(|l| l.slug()).collect();
        format!("Unknown license '{}'. Supported: {}", name, slugs.join(", "))
    })
}

/// Fetch failures are stored inline on the browser; surface them as a
/// command failure here.
fn check_fetch(browser: &CatalogBrowser) -> Result<()> {
    if let Some(message) = &browser.fetch_state().error {
        bail!("{message}");
    }
    Ok(())
}

fn print_table<R: Tabled>(rows: Vec<R>) {
    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_ref());

    let mut config = cli
        .config
        .as_deref()
        .and_then(ClientConfig::load_from_path)
        .unwrap_or_default();
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }

    debug!("Using catalog base URL {}", config.base_url);
    let transport = HttpTransport::new(&config).context("Failed to build catalog transport")?;
    let mut browser = CatalogBrowser::new(Box::new(transport));

    match cli.command {
        Command::Licenses => {
            let rows: Vec<LicenseRow> = License::ALL
                .iter()
                .map(|license| LicenseRow {
                    name: license.display_name(),
                    slug: license.slug(),
                })
                .collect();
            print_table(rows);
        }

        Command::Extensions { license } => {
            let license = resolve_license(&license)?;
            browser.select_license(license).await;
            check_fetch(&browser)?;

            if browser.extensions().is_empty() {
                println!("No extensions found for {license}");
                return Ok(());
            }
            let rows: Vec<ExtensionRow> = browser
                .extensions()
                .iter()
                .map(|extension| ExtensionRow {
                    id: extension.id.clone(),
                    name: extension.name.clone(),
                    total: extension
                        .total_cards
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                })
                .collect();
            print_table(rows);
        }

        Command::Cards { license, extension } => {
            let license = resolve_license(&license)?;
            browser.select_license(license).await;
            check_fetch(&browser)?;

            let wanted = browser
                .extensions()
                .iter()
                .find(|e| e.id.eq_ignore_ascii_case(&extension))
                .cloned()
                .with_context(|| {
                    format!("Extension '{extension}' not found for {license}")
                })?;
            browser.select_extension(wanted).await;
            check_fetch(&browser)?;

            if browser.cards().is_empty() {
                println!("No cards found");
                return Ok(());
            }
            let rows: Vec<CardRow> = browser
                .grid()
                .into_iter()
                .map(|row| CardRow {
                    number: row.number.unwrap_or_else(|| "-".to_string()),
                    name: row.name,
                    owned: if row.owned { "yes" } else { "" },
                    image: row.image_url,
                })
                .collect();
            print_table(rows);
        }
    }

    Ok(())
}
