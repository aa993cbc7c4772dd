//! Process-wide `tracing` subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::ConfigError;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

/// Log targets owned by this workspace: explicit `trainconf.*` targets and
/// the crates' module paths.
const OWN_TARGETS: [&str; 3] = ["trainconf", "trainconf_core", "trainconf_plugins"];

/// A bare level such as `debug` applies to this workspace only; dependencies
/// (reqwest, hyper) stay at `warn`. Full directive strings pass through.
fn level_filter(level: &str) -> Result<EnvFilter, ConfigError> {
    let level = level.trim();
    let directives = if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        let level = if level.is_empty() { "info" } else { level };
        std::iter::once("warn".to_string())
            .chain(OWN_TARGETS.iter().map(|target| format!("{target}={level}")))
            .collect::<Vec<_>>()
            .join(",")
    };
    EnvFilter::try_new(&directives)
        .map_err(|e| ConfigError::Logging(format!("invalid level '{directives}': {e}")))
}

/// `RUST_LOG` takes precedence over `logging.level`. Fails when both the
/// console and the file output are turned off, or when a global subscriber
/// is already installed.
pub fn init_tracing(logging: &LoggingConfig) -> Result<(), ConfigError> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => level_filter(&logging.level)?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("trainconf"),
        };

        std::fs::create_dir_all(&dir)
            .map_err(|e| ConfigError::Logging(format!("create log dir failed: {e}")))?;
        let file_name = format!("trainconf.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err(ConfigError::Logging(
            "logging disabled for both console and file".to_string(),
        ));
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_is_noop() {
        let cfg = LoggingConfig {
            enabled: false,
            ..LoggingConfig::default()
        };
        assert!(init_tracing(&cfg).is_ok());
    }

    #[test]
    fn test_bare_level_scoped_to_workspace() {
        let filter = level_filter("debug").unwrap().to_string();
        assert!(filter.contains("trainconf=debug"));
        assert!(filter.contains("trainconf_plugins=debug"));
        assert!(filter.contains("warn"));

        let filter = level_filter("reqwest=trace").unwrap().to_string();
        assert!(filter.contains("reqwest=trace"));
        assert!(!filter.contains("trainconf"));
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        assert!(matches!(
            level_filter("trainconf=loud"),
            Err(ConfigError::Logging(_))
        ));
    }

    #[test]
    fn test_no_output_is_rejected() {
        let cfg = LoggingConfig {
            console: false,
            file: false,
            ..LoggingConfig::default()
        };
        assert!(matches!(init_tracing(&cfg), Err(ConfigError::Logging(_))));
    }
}
