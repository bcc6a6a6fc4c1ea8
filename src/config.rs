use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

/// Base address used when nothing is configured at build or deploy time.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_lookup(|key| env::var(key).ok())
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Builds the configuration from a variable lookup, so tests don't have to
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let build_time_base = option_env!("KBSEARCH_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL);
        Config {
            api_base_url: get_or_default(&lookup, "KBSEARCH_API_BASE_URL", build_time_base),
            log_level: get_or_default(&lookup, "KBSEARCH_LOG_LEVEL", "info"),
            log_file: non_empty(&lookup, "KBSEARCH_LOG_FILE").map(PathBuf::from),
        }
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).unwrap_or_else(|| default.to_string())
}
