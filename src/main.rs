//! i18n sync checker
//!
//! Usage:
//!   i18n-sync            # errors fail the run, warnings are printed
//!   i18n-sync --strict   # warnings (placeholder markers) fail the run too
//!   i18n-sync --json     # print a JSON summary instead of grouped text
//!
//! Optional environment variables:
//! - I18N_ROOT (defaults to the current directory)
//! - I18N_FALLBACK_LOCALES (defaults to en-US,en-GB)
//! - I18N_STRICT, I18N_JSON (same as the flags)

use airnub_i18n::config::Config;
use airnub_i18n::i18n::{
    render_text, DiskSource, MessageLayout, ReportSummary, Rules, SyncChecker,
};
use anyhow::Result;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr, so stdout carries only the report)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("airnub_i18n=info".parse()?)
                .add_directive("i18n_sync=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?.apply_args(std::env::args().skip(1))?;
    info!(
        "Starting i18n sync check under {} (strict: {})",
        config.root.display(),
        config.strict
    );

    let checker = SyncChecker::new(
        DiskSource::new(),
        MessageLayout::new(&config.root),
        Rules::standard()?,
    )
    .with_fallback_locales(config.fallback_locales.clone())
    .strict(config.strict);

    let outcome = match checker.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("i18n sync aborted: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if config.json_output {
        let summary = ReportSummary::from_outcome(&outcome, config.strict);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_text(&outcome.report));
    }

    if outcome.report.should_fail(config.strict) {
        error!("i18n sync failed");
        return Ok(ExitCode::FAILURE);
    }

    info!("✓ i18n sync passed");
    Ok(ExitCode::SUCCESS)
}
