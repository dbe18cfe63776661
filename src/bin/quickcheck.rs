//! i18n quick check - advisory scan for missing keys and untranslated English
//!
//! Usage:
//!   i18n-quickcheck
//!   i18n-quickcheck --json
//!
//! Every locale is read exactly as written (no fallback). The exit code is 1
//! when anything was found, but all findings are warnings.

use airnub_i18n::config::Config;
use airnub_i18n::i18n::{render_text, DiskSource, MessageLayout, QuickCheck, ReportSummary, Rules};
use anyhow::Result;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("airnub_i18n=info".parse()?)
                .add_directive("i18n_quickcheck=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?.apply_args(std::env::args().skip(1))?;
    if config.strict {
        warn!("--strict has no effect on the quick check");
    }

    info!("Starting i18n quick check under {}", config.root.display());

    let check = QuickCheck::new(
        DiskSource::new(),
        MessageLayout::new(&config.root),
        Rules::standard()?,
    );

    let outcome = match check.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("i18n quick check aborted: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if config.json_output {
        let summary = ReportSummary::from_outcome(&outcome, false);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_text(&outcome.report));
    }

    if outcome.report.is_clean() {
        info!("✓ No missing keys or suspected English strings");
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
