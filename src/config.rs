//! Process configuration, from command line arguments and the environment.
//!
//! The following environment variables are read:
//!
//! - `BOT_ACCESS_TOKEN`: required, authorizes every call to the messaging API.
//! - `BOT_API_BASE`: optional, overrides [API_BASE].
//! - `BOT_WEBHOOK_SECRET`: optional, enables webhook signature verification.
//! - `PORT`: optional, as per `--port`.

use crate::{
    notification::signature::WebhookSecret,
    spark::{api::API_BASE, auth::BotToken, error::SparkError},
};
use clap::Parser;
use std::{ffi::OsString, io, net::SocketAddr};
use thiserror::Error;
use url::Url;

pub const TOKEN_VAR: &str = "BOT_ACCESS_TOKEN";
pub const API_BASE_VAR: &str = "BOT_API_BASE";
pub const SECRET_VAR: &str = "BOT_WEBHOOK_SECRET";

#[derive(Parser, Debug)]
#[command(author, version, about = "Reply to messages sent to the bot", long_about = None)]
pub struct Args {
    /// Override the default port
    #[arg(long, short, env = "PORT")]
    pub port: Option<u16>,

    /// Run in development mode
    #[arg(long)]
    pub dev: bool,
}

impl Args {
    /// Parse arguments once `load_dotenv` has run, as clap reads `PORT` at
    /// parse time and it may come from `.env`. Also returns whether a `.env`
    /// was loaded, for logging once tracing is up.
    pub fn parse_after<L, I, T>(load_dotenv: L, argv: I) -> Result<(Self, bool), clap::Error>
    where
        L: FnOnce() -> bool,
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let has_dotenv = load_dotenv();

        Args::try_parse_from(argv).map(|args| (args, has_dotenv))
    }
}

/// Development mode binds to loopback only and logs verbosely to the console
/// as well as to the log file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Production,
    Development,
}

impl Mode {
    pub fn from_dev_flag(dev: bool) -> Self {
        if dev {
            Mode::Development
        } else {
            Mode::Production
        }
    }

    fn default_addr(self) -> SocketAddr {
        match self {
            Mode::Production => SocketAddr::from(([0, 0, 0, 0], 8080)),
            Mode::Development => SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}

/// Everything needed to run the server, read once at startup and immutable
/// thereafter.
#[derive(Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub mode: Mode,
    pub token: BotToken,
    pub api_base: Url,
    pub webhook_secret: Option<WebhookSecret>,
}

/// Sum type representing every reason the process can fail to start.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("No 'BOT_ACCESS_TOKEN' env var set")]
    MissingCredential,
    #[error("Invalid 'BOT_API_BASE' env var: {0}")]
    InvalidApiBase(String),
    #[error("Could not create messaging API client: {0}")]
    Client(#[from] SparkError),
    #[error("Could not bind to {0}: {1}")]
    Bind(SocketAddr, io::Error),
    #[error("Server failed: {0}")]
    Serve(io::Error),
}

impl StartupError {
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl Config {
    /// Build configuration from parsed arguments and a means of looking up
    /// environment variables, typically [std::env::var].
    pub fn load<F>(args: &Args, lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .filter(|x| !x.is_empty())
            .map(BotToken)
            .ok_or(StartupError::MissingCredential)?;

        let api_base = parse_api_base(lookup(API_BASE_VAR).as_deref().unwrap_or(API_BASE))?;

        let webhook_secret = lookup(SECRET_VAR)
            .filter(|x| !x.is_empty())
            .map(WebhookSecret);

        let mode = Mode::from_dev_flag(args.dev);
        let mut addr = mode.default_addr();
        if let Some(port) = args.port {
            addr.set_port(port);
        }

        Ok(Config {
            addr,
            mode,
            token,
            api_base,
            webhook_secret,
        })
    }
}

/// The API base must be something we can append path segments to.
fn parse_api_base(x: &str) -> Result<Url, StartupError> {
    let url = Url::parse(x).map_err(|e| StartupError::InvalidApiBase(e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(StartupError::InvalidApiBase(format!("{} cannot be a base", x)));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(port: Option<u16>, dev: bool) -> Args {
        Args { port, dev }
    }

    fn env(xs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = xs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_parse_args() {
        let parsed = Args::try_parse_from(["spark-bot", "-p", "9000", "--dev"]).unwrap();
        assert_eq!(parsed.port, Some(9000));
        assert!(parsed.dev);

        let parsed = Args::try_parse_from(["spark-bot", "--port", "9001"]).unwrap();
        assert_eq!(parsed.port, Some(9001));
        assert!(!parsed.dev);

        assert!(Args::try_parse_from(["spark-bot", "--port", "not-a-port"]).is_err());
    }

    #[test]
    fn test_port_from_dotenv() {
        let path = std::env::temp_dir().join(format!("spark-bot-{}.env", std::process::id()));
        std::fs::write(&path, "PORT=18765\n").unwrap();

        let (parsed, has_dotenv) = Args::parse_after(
            || dotenvy::from_path_override(&path).is_ok(),
            ["spark-bot"],
        )
        .unwrap();
        std::fs::remove_file(&path).ok();
        std::env::remove_var("PORT");

        assert!(has_dotenv);
        assert_eq!(parsed.port, Some(18765));

        let config = Config::load(&parsed, env(&[(TOKEN_VAR, "foobar")])).unwrap();
        assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 18765)));
    }

    #[test]
    fn test_missing_credential() {
        let res = Config::load(&args(None, false), env(&[]));
        assert!(matches!(res, Err(StartupError::MissingCredential)));

        let res = Config::load(&args(None, false), env(&[(TOKEN_VAR, "")]));
        assert!(matches!(res, Err(StartupError::MissingCredential)));

        assert_eq!(StartupError::MissingCredential.exit_code(), 1);
    }

    #[test]
    fn test_defaults() {
        let config = Config::load(&args(None, false), env(&[(TOKEN_VAR, "foobar")])).unwrap();

        assert_eq!(config.token, BotToken("foobar".into()));
        assert_eq!(config.api_base.as_str(), "https://api.ciscospark.com/v1");
        assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.mode, Mode::Production);
        assert!(config.webhook_secret.is_none());
    }

    #[test]
    fn test_dev_with_port() {
        let config = Config::load(&args(Some(1234), true), env(&[(TOKEN_VAR, "foobar")])).unwrap();

        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 1234)));
        assert_eq!(config.mode, Mode::Development);
    }

    #[test]
    fn test_overrides() {
        let config = Config::load(
            &args(None, false),
            env(&[
                (TOKEN_VAR, "foobar"),
                (API_BASE_VAR, "http://localhost:4000/v1/"),
                (SECRET_VAR, "shh"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_base.as_str(), "http://localhost:4000/v1/");
        assert_eq!(config.webhook_secret.map(|x| x.0), Some("shh".to_owned()));
    }

    #[test]
    fn test_invalid_api_base() {
        for base in ["not a url", "data:text/plain,hello"] {
            let res = Config::load(
                &args(None, false),
                env(&[(TOKEN_VAR, "foobar"), (API_BASE_VAR, base)]),
            );

            assert!(matches!(res, Err(StartupError::InvalidApiBase(_))));
        }
    }
}
