//! # TFT Audit
//!
//! Command line entry point. Takes no arguments: fetches all TFT and TFTA
//! holders from Horizon and prints the audit report as CSV.
//!
//! ## Quick Start
//!
//! ```text
//! cargo run --release > report.csv
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see every page request.
//! See `.env.example` for the optional settings.

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tft_holder_audit::config::{AppConfig, AuditConfig};
use tft_holder_audit::errors::AuditError;
use tft_holder_audit::horizon::HorizonClient;
use tft_holder_audit::services::Auditor;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // =========================================
    // STEP 1: Load .env and initialize logging
    // =========================================
    dotenvy::dotenv().ok(); // It's okay if .env doesn't exist

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .with_line_number(true)
        .init();

    info!("🔍 Starting TFT holder audit");

    // =========================================
    // STEP 2: Run
    // =========================================
    match run().await {
        Ok(()) => {
            info!("✅ Audit complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("❌ Audit failed: {}", e);
            for cause in e.causes() {
                error!("   caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AuditError> {
    let config = AppConfig::from_env()?;
    let rules = AuditConfig::default();

    info!("📋 Configuration loaded");
    info!("   Horizon: {}", config.horizon_url);
    info!("   Page size: {}", config.page_size);

    let horizon = HorizonClient::new(&config)?;

    let report = Auditor::new(&horizon, &config, &rules).run().await?;

    // The report is only written once it is complete.
    match &config.report_path {
        Some(path) => {
            fs::write(path, &report)?;
            info!("📄 Report written to {}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
