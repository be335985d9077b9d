pub mod analysis;
pub mod domain;
pub mod ingest;
pub mod scoring;
pub mod storage;
pub mod time;

pub mod config {
    use anyhow::Context;
    use std::fmt;

    const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_key: Option<String>,
        pub base_url: Option<String>,
        pub sentry_dsn: Option<String>,
        pub schedule_cache_ttl_secs: u64,
        pub schedule_timeout_secs: u64,
        pub schedule_utc_offset_hours: Option<i32>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

            let schedule_cache_ttl_secs = match non_empty("SCHEDULE_CACHE_TTL_SECS") {
                Some(s) => s
                    .trim()
                    .parse::<u64>()
                    .context("SCHEDULE_CACHE_TTL_SECS must be an integer")?,
                None => DEFAULT_CACHE_TTL_SECS,
            };

            let schedule_timeout_secs = match non_empty("SCHEDULE_TIMEOUT_SECS") {
                Some(s) => s
                    .trim()
                    .parse::<u64>()
                    .context("SCHEDULE_TIMEOUT_SECS must be an integer")?,
                None => DEFAULT_TIMEOUT_SECS,
            };

            let schedule_utc_offset_hours = match non_empty("SCHEDULE_UTC_OFFSET_HOURS") {
                Some(s) => {
                    let hours = s
                        .trim()
                        .parse::<i32>()
                        .context("SCHEDULE_UTC_OFFSET_HOURS must be an integer")?;
                    anyhow::ensure!(
                        (-12..=14).contains(&hours),
                        "SCHEDULE_UTC_OFFSET_HOURS out of range: {hours}"
                    );
                    Some(hours)
                }
                None => None,
            };

            Ok(Self {
                api_key: non_empty("API_KEY"),
                base_url: non_empty("BASE_URL"),
                sentry_dsn: non_empty("SENTRY_DSN"),
                schedule_cache_ttl_secs,
                schedule_timeout_secs,
                schedule_utc_offset_hours,
            })
        }

        pub fn require_api_key(&self) -> Result<&str, ConfigError> {
            self.api_key
                .as_deref()
                .ok_or_else(|| ConfigError::Missing { keys: vec!["API_KEY"] })
        }

        pub fn require_base_url(&self) -> Result<&str, ConfigError> {
            self.base_url
                .as_deref()
                .ok_or_else(|| ConfigError::Missing { keys: vec!["BASE_URL"] })
        }
    }

    /// Connection details for the schedule API. Only constructible when both
    /// secrets are present.
    #[derive(Debug, Clone)]
    pub struct ScheduleApiConfig {
        pub base_url: String,
        pub api_key: String,
        pub timeout_secs: u64,
    }

    impl ScheduleApiConfig {
        pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
            let mut missing = Vec::new();
            if settings.api_key.is_none() {
                missing.push("API_KEY");
            }
            if settings.base_url.is_none() {
                missing.push("BASE_URL");
            }
            if !missing.is_empty() {
                return Err(ConfigError::Missing { keys: missing });
            }

            let base_url = settings.require_base_url()?.trim().to_string();
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    key: "BASE_URL",
                    detail: format!("expected an http(s) URL, got {base_url:?}"),
                });
            }

            Ok(Self {
                base_url,
                api_key: settings.require_api_key()?.trim().to_string(),
                timeout_secs: settings.schedule_timeout_secs,
            })
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ConfigError {
        Missing { keys: Vec<&'static str> },
        Invalid { key: &'static str, detail: String },
    }

    impl fmt::Display for ConfigError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                ConfigError::Missing { keys } => write!(
                    f,
                    "API credentials not found: {} must be configured",
                    keys.join(", ")
                ),
                ConfigError::Invalid { key, detail } => {
                    write!(f, "invalid configuration for {key}: {detail}")
                }
            }
        }
    }

    impl std::error::Error for ConfigError {}

}
