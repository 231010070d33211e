use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use titleparser_gateway::telemetry::LogFormat;
use titleparser_resolver::http::{
    DEFAULT_ACCEPT, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_MAX_BODY_BYTES, DEFAULT_USER_AGENT,
};

pub const MODE_ENV: &str = "TITLEPARSER_MODE";
pub const LISTEN_ADDR_ENV: &str = "TITLEPARSER_LISTEN_ADDR";
pub const CACHE_BACKEND_ENV: &str = "TITLEPARSER_CACHE_BACKEND";
pub const REDIS_URL_ENV: &str = "TITLEPARSER_REDIS_URL";
pub const REDIS_KEY_PREFIX_ENV: &str = "TITLEPARSER_REDIS_KEY_PREFIX";
pub const MEMORY_CAPACITY_ENV: &str = "TITLEPARSER_MEMORY_CAPACITY";
pub const CACHE_TTL_ENV: &str = "TITLEPARSER_CACHE_TTL_SECS";
pub const TIMEOUT_ENV: &str = "TITLEPARSER_TIMEOUT_SECS";
pub const MAX_BODY_BYTES_ENV: &str = "TITLEPARSER_MAX_BODY_BYTES";
pub const USER_AGENT_ENV: &str = "TITLEPARSER_USER_AGENT";
pub const ACCEPT_ENV: &str = "TITLEPARSER_ACCEPT";
pub const ACCEPT_LANGUAGE_ENV: &str = "TITLEPARSER_ACCEPT_LANGUAGE";
pub const LOG_FORMAT_ENV: &str = "TITLEPARSER_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MEMORY_CAPACITY: u64 = 10_000;
pub const DEFAULT_CACHE_TTL_SECS: i64 = 86_400;
/// Ten years.
pub const MAX_CACHE_TTL_SECS: i64 = 315_576_000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunModeArg {
    /// Serve `POST /title` over HTTP.
    #[value(name = "server")]
    Server,
    /// Resolve one record read from stdin and exit.
    #[value(name = "stdin")]
    Stdin,
}

impl Display for RunModeArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RunModeArg::Server => write!(f, "server"),
            RunModeArg::Stdin => write!(f, "stdin"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheBackendArg {
    #[value(name = "none")]
    None,
    #[value(name = "memory")]
    Memory,
    #[value(name = "redis")]
    Redis,
    #[value(name = "layered")]
    Layered,
}

impl Display for CacheBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackendArg::None => write!(f, "none"),
            CacheBackendArg::Memory => write!(f, "memory"),
            CacheBackendArg::Redis => write!(f, "redis"),
            CacheBackendArg::Layered => write!(f, "layered"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "titleparser", about = "Resolves display titles for URLs")]
pub struct CLI {
    #[arg(long, env = MODE_ENV, value_enum, default_value_t = RunModeArg::Server)]
    pub mode: RunModeArg,

    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = CACHE_BACKEND_ENV,
        value_enum,
        default_value_t = CacheBackendArg::Memory
    )]
    pub cache: CacheBackendArg,

    #[arg(
        long,
        env = REDIS_URL_ENV,
        required_if_eq_any([("cache", "redis"), ("cache", "layered")])
    )]
    pub redis_url: Option<String>,

    /// Prepended to every Redis key. Empty stores entries under the bare URL.
    #[arg(long, env = REDIS_KEY_PREFIX_ENV, default_value = "")]
    pub redis_key_prefix: String,

    #[arg(long, env = MEMORY_CAPACITY_ENV, default_value_t = DEFAULT_MEMORY_CAPACITY)]
    pub memory_capacity: u64,

    /// How long resolved titles stay cached, in seconds.
    #[arg(
        long,
        env = CACHE_TTL_ENV,
        default_value_t = DEFAULT_CACHE_TTL_SECS,
        value_parser = clap::value_parser!(i64).range(1..=MAX_CACHE_TTL_SECS)
    )]
    pub cache_ttl_secs: i64,

    /// Per-request fetch timeout, in seconds.
    #[arg(long, env = TIMEOUT_ENV, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, env = MAX_BODY_BYTES_ENV, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    #[arg(long, env = USER_AGENT_ENV, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, env = ACCEPT_ENV, default_value = DEFAULT_ACCEPT)]
    pub accept: String,

    #[arg(long, env = ACCEPT_LANGUAGE_ENV, default_value = DEFAULT_ACCEPT_LANGUAGE)]
    pub accept_language: String,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CLI::try_parse_from(["titleparser"]).unwrap();

        assert_eq!(cli.mode, RunModeArg::Server);
        assert_eq!(cli.cache, CacheBackendArg::Memory);
        assert_eq!(cli.listen_addr, DEFAULT_LISTEN_ADDR.parse().unwrap());
        assert_eq!(cli.cache_ttl_secs, 86_400);
        assert_eq!(cli.timeout_secs, 10);
        assert_eq!(cli.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(cli.redis_key_prefix, "");
    }

    #[test]
    fn cache_ttl_is_bounded() {
        let parse = |ttl: &str| CLI::try_parse_from(["titleparser", "--cache-ttl-secs", ttl]);

        assert_eq!(parse("3600").unwrap().cache_ttl_secs, 3600);
        assert_eq!(
            parse(&MAX_CACHE_TTL_SECS.to_string()).unwrap().cache_ttl_secs,
            MAX_CACHE_TTL_SECS
        );
        assert!(parse("0").is_err());
        assert!(parse("-1").is_err());
        assert!(parse(&i64::MAX.to_string()).is_err());
    }

    #[test]
    fn redis_key_prefix_is_configurable() {
        let cli = CLI::try_parse_from([
            "titleparser",
            "--cache",
            "redis",
            "--redis-url",
            "redis://localhost:6379",
            "--redis-key-prefix",
            "tp:title:",
        ])
        .unwrap();
        assert_eq!(cli.redis_key_prefix, "tp:title:");
    }

    #[test]
    fn redis_backends_need_a_url() {
        assert!(CLI::try_parse_from(["titleparser", "--cache", "redis"]).is_err());
        assert!(CLI::try_parse_from(["titleparser", "--cache", "layered"]).is_err());

        let cli = CLI::try_parse_from([
            "titleparser",
            "--cache",
            "layered",
            "--redis-url",
            "redis://localhost:6379",
        ])
        .unwrap();
        assert_eq!(cli.redis_url.as_deref(), Some("redis://localhost:6379"));
    }

    #[test]
    fn stdin_mode() {
        let cli =
            CLI::try_parse_from(["titleparser", "--mode", "stdin", "--cache", "none"]).unwrap();
        assert_eq!(cli.mode, RunModeArg::Stdin);
        assert_eq!(cli.cache, CacheBackendArg::None);
    }
}
