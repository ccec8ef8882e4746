//! Command line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error::{Error, Result};
use crate::refresh::RefreshConfig;
use crate::source::{AclSource, CommandSource, FileSource};

#[derive(Parser, Debug)]
#[command(
    name = "acl-viewer",
    version,
    about = "Draw who can read from and write to which Kafka topics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Shorthand for --log-level debug
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn effective_log_level(&self) -> &str {
        if self.verbose { "debug" } else { &self.log_level }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Periodically fetch ACLs and serve the graph over HTTP
    Serve(ServeArgs),
    /// Render an ACL listing once and print it
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Kafka bootstrap brokers, as a comma separated list
    #[arg(long, env = "KAFKA_URL", required_unless_present = "acl_file")]
    pub brokers: Option<String>,

    /// Client properties file handed to the Kafka tools (TLS, SASL)
    #[arg(long, env = "COMMAND_CONFIG")]
    pub command_config: Option<PathBuf>,

    /// Directory containing kafka-acls.sh and kafka-topics.sh
    #[arg(long, env = "KAFKA_BIN_DIR")]
    pub kafka_bin_dir: Option<PathBuf>,

    /// Read ACLs from a file (JSON or `kafka-acls --list` output) instead of a cluster;
    /// takes precedence over --brokers
    #[arg(long, env = "ACL_FILE")]
    pub acl_file: Option<PathBuf>,

    /// Topic list used with --acl-file, one name per line
    #[arg(long, env = "TOPICS_FILE")]
    pub topics_file: Option<PathBuf>,

    /// Address to listen on for the web interface
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    /// Interval at which ACLs are re-fetched (e.g. 30s, 10m, 1h30m)
    #[arg(long, env = "FETCH_INTERVAL", default_value = "10m", value_parser = parse_duration)]
    pub fetch_interval: Duration,

    /// Give up on a single fetch after this long
    #[arg(long, env = "FETCH_TIMEOUT", default_value = "60s", value_parser = parse_duration)]
    pub fetch_timeout: Duration,

    /// Directory served under /static
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Also show topics nobody has ACLs on
    #[arg(long)]
    pub show_all_topics: bool,
}

impl ServeArgs {
    pub fn source(&self) -> Result<Arc<dyn AclSource>> {
        if let Some(path) = &self.acl_file {
            if self.brokers.is_some() {
                tracing::info!(acl_file = %path.display(), "ACL file given, ignoring Kafka brokers");
            }
            let mut source = FileSource::new(path);
            if let Some(topics) = &self.topics_file {
                source = source.with_topics(topics);
            }
            return Ok(Arc::new(source));
        }

        let brokers = self
            .brokers
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                Error::config("no Kafka bootstrap brokers defined, please set --brokers")
            })?;
        let mut source = CommandSource::new(brokers);
        if let Some(path) = &self.command_config {
            source = source.with_command_config(path);
        }
        if let Some(dir) = &self.kafka_bin_dir {
            source = source.with_bin_dir(dir);
        }
        Ok(Arc::new(source))
    }

    pub fn refresh_config(&self) -> RefreshConfig {
        RefreshConfig {
            interval: self.fetch_interval,
            timeout: self.fetch_timeout,
            show_all_topics: self.show_all_topics,
        }
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `{"nodes": [...], "edges": [...]}`
    Json,
    /// Standalone visualization page
    Html,
    /// Aligned text listing
    Table,
}

/// Longest accepted interval or timeout.
const MAX_DURATION: Duration = Duration::from_secs(365 * 24 * 3600);

/// Parses durations such as `90s`, `10m`, `1h30m` or `250ms`. A bare number is seconds.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }
    let total = match s.parse::<u64>() {
        Ok(secs) => Duration::from_secs(secs),
        Err(_) => parse_units(s)?,
    };
    if total.is_zero() {
        return Err(format!("invalid duration `{s}`: must be greater than zero"));
    }
    if total > MAX_DURATION {
        return Err(format!("invalid duration `{s}`: too large"));
    }
    Ok(total)
}

fn parse_units(s: &str) -> std::result::Result<Duration, String> {
    let too_large = || format!("invalid duration `{s}`: too large");
    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return Err(format!("invalid duration `{s}`: expected a number"));
        }
        let value: u64 = rest[..digits]
            .parse()
            .map_err(|e| format!("invalid duration `{s}`: {e}"))?;
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let unit = match &rest[..unit_len] {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => value.checked_mul(60).map(Duration::from_secs).ok_or_else(too_large)?,
            "h" => value.checked_mul(3600).map(Duration::from_secs).ok_or_else(too_large)?,
            other => return Err(format!("invalid duration `{s}`: unknown unit `{other}`")),
        };
        total = total.checked_add(unit).ok_or_else(too_large)?;
        rest = &rest[unit_len..];
    }
    Ok(total)
}
