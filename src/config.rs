//! Startup configuration: CLI flags with env fallbacks, validated before the terminal opens.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Server hosting the /ask endpoint
    #[arg(long, env = "ASK_BASE_URL", default_value = "http://127.0.0.1:5000")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "ASK_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,

    /// Write logs here (the terminal is taken by the UI)
    #[arg(long, env = "ASK_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base URL must be http or https, got {0:?}")]
    UnsupportedScheme(String),
    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Fully resolved POST target.
    pub ask_url: Url,
    pub timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        if cli.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self {
            ask_url: ask_url(&cli.base_url)?,
            timeout: Duration::from_secs(cli.timeout_secs),
            log_file: cli.log_file,
        })
    }
}

/// `http://host:5000` and `http://host:5000/chat/` resolve to `.../ask` under that path.
fn ask_url(base: &str) -> Result<Url, ConfigError> {
    let invalid = |source| ConfigError::InvalidUrl { url: base.to_string(), source };
    let mut url = Url::parse(base).map_err(invalid)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.join("ask").map_err(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        let cli = Cli::try_parse_from(std::iter::once("ask-tui").chain(args.iter().copied()))
            .expect("cli parses");
        Config::from_cli(cli)
    }

    #[test]
    fn base_url_resolves_to_ask() {
        let cfg = parse(&["--base-url", "http://localhost:8080"]).unwrap();
        assert_eq!(cfg.ask_url.as_str(), "http://localhost:8080/ask");
        let cfg = parse(&["--base-url", "https://example.org/bot"]).unwrap();
        assert_eq!(cfg.ask_url.as_str(), "https://example.org/bot/ask");
    }

    #[test]
    fn timeout_is_configurable() {
        let cfg = parse(&["--base-url", "http://localhost", "--timeout-secs", "7"]).unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(7));
        assert!(matches!(
            parse(&["--base-url", "http://localhost", "--timeout-secs", "0"]),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn bad_urls_fail_fast() {
        assert!(matches!(parse(&["--base-url", "not a url"]), Err(ConfigError::InvalidUrl { .. })));
        assert!(matches!(
            parse(&["--base-url", "ftp://example.org"]),
            Err(ConfigError::UnsupportedScheme(s)) if s == "ftp"
        ));
    }
}
