//! Observability (structured logging)
//!
//! Installs a global `tracing` subscriber whose format and default filter
//! come from [`LoggingSettings`].

use crate::config::{LogFormat, LoggingSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber
///
/// Filter precedence: `RUST_LOG`, then `settings.filter`, then a build
/// dependent default (`debug,thiep_cuoi=trace` in debug builds, `info`
/// otherwise).
///
/// # Errors
///
/// Returns an error if a filter directive is invalid or a global subscriber
/// is already installed.
///
/// # Example
///
/// ```rust,no_run
/// use thiep_cuoi::{config::LoggingSettings, observability};
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(&LoggingSettings::default())?;
/// tracing::info!("Application started");
/// # Ok(())
/// # }
/// ```
pub fn init(settings: &LoggingSettings) -> anyhow::Result<()> {
    let env_filter = env_filter(settings)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    match settings.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init()?,
    }

    Ok(())
}

fn env_filter(settings: &LoggingSettings) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directives = settings.filter.as_deref().unwrap_or(if cfg!(debug_assertions) {
        "debug,thiep_cuoi=trace"
    } else {
        "info"
    });
    Ok(EnvFilter::try_new(directives)?)
}
