use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Overrides;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rooz",
    version,
    about = "Print today's weekday as a Persian label"
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// IANA time zone used for both the index and the name
    #[arg(long = "timezone", short = 'z')]
    pub timezone: Option<String>,

    /// Label this instant (RFC 3339) instead of reading the clock
    #[arg(long = "at", value_parser = parse_instant)]
    pub at: Option<DateTime<Utc>>,

    /// text, html or json
    #[arg(long = "format", short = 'f')]
    pub format: Option<String>,

    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Print the whole weekday table
    #[arg(long = "all")]
    pub all: bool,
}

impl GlobalCli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            timezone: self.timezone.clone(),
            format: self.format.clone(),
            config: self.config.clone(),
        }
    }
}

fn parse_instant(s: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("expected an RFC 3339 instant, got {s:?}: {e}"))
}

/// Filter used when `RUST_LOG` is unset. The weekday index stays visible
/// unless `-q` is given.
pub fn default_filter(verbose: u8, quiet: u8) -> &'static str {
    match (quiet, verbose) {
        (q, _) if q >= 2 => "error",
        (1, _) => "warn",
        (_, v) if v >= 3 => "trace",
        (_, 2) => "debug",
        (_, 1) => "info",
        _ => "warn,rooz_core::weekday=info",
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(verbose, quiet)))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_flags() {
        let cli = GlobalCli::parse_from([
            "rooz",
            "-vv",
            "--timezone",
            "UTC",
            "--at",
            "2024-03-16T09:00:00+03:30",
            "--format",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
        assert_eq!(
            cli.at,
            Utc.with_ymd_and_hms(2024, 3, 16, 5, 30, 0).single()
        );
        let overrides = cli.overrides();
        assert_eq!(overrides.format.as_deref(), Some("json"));
        assert!(overrides.config.is_none());
    }

    #[test]
    fn default_filter_keeps_weekday_index() {
        assert_eq!(default_filter(0, 0), "warn,rooz_core::weekday=info");
        assert!(EnvFilter::try_new(default_filter(0, 0)).is_ok());
        assert_eq!(default_filter(0, 1), "warn");
        assert_eq!(default_filter(3, 2), "error");
        assert_eq!(default_filter(2, 0), "debug");
    }

    #[test]
    fn rejects_bad_instant() {
        let result = GlobalCli::try_parse_from(["rooz", "--at", "yesterday"]);
        assert!(result.is_err());
    }
}
