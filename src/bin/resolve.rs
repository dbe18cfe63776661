//! Resolve one app's messages for a locale and print the merged tree.
//!
//! Usage:
//!   i18n-resolve <app> <locale>
//!
//! Uses the same shared + app merge and fallback chain the sites use at
//! request time. I18N_ROOT and I18N_FALLBACK_LOCALES apply.

use airnub_i18n::config::Config;
use airnub_i18n::i18n::{DiskSource, Locale, MessageLayout, Merger};
use anyhow::{bail, Context, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("i18n_resolve=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [app, locale] = args.as_slice() else {
        bail!("Usage: i18n-resolve <app> <locale>");
    };
    let locale = Locale::parse(locale).context("Invalid locale argument")?;

    let config = Config::from_env()?;
    let merger = Merger::new(DiskSource::new(), MessageLayout::new(&config.root))
        .with_fallback_locales(config.fallback_locales.clone());

    info!(
        "Resolving {}/{} (fallbacks: {:?})",
        app,
        locale,
        merger
            .fallback_locales()
            .iter()
            .map(Locale::as_str)
            .collect::<Vec<_>>()
    );

    let messages = merger
        .load_messages(app, &locale)
        .await
        .with_context(|| format!("Failed to resolve messages for {}/{}", app, locale))?;

    println!("{}", serde_json::to_string_pretty(&messages)?);
    Ok(())
}
