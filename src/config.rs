use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Carepoint";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Medication lookups allowed in flight at once while loading prescriptions.
const DEFAULT_MEDICATION_CONCURRENCY: usize = 4;

const ENV_API_URL: &str = "CAREPOINT_API_URL";
const ENV_TIMEOUT_SECS: &str = "CAREPOINT_TIMEOUT_SECS";
const ENV_MEDICATION_CONCURRENCY: &str = "CAREPOINT_MEDICATION_CONCURRENCY";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "carepoint=info,warn"
}

/// Connection settings for the hospital API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the API, without a trailing slash.
    pub base_url: String,
    pub timeout_secs: u64,
    /// Upper bound on concurrent `/api/medications` requests per dashboard load.
    pub medication_concurrency: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            medication_concurrency: DEFAULT_MEDICATION_CONCURRENCY,
        }
    }
}

impl ClientConfig {
    /// Build a config for a specific origin, keeping the other defaults.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Read `CAREPOINT_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with the variable source injected.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup(ENV_API_URL)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url);

        let timeout_secs = parse_or(
            lookup(ENV_TIMEOUT_SECS),
            ENV_TIMEOUT_SECS,
            defaults.timeout_secs,
        );

        let medication_concurrency = parse_or(
            lookup(ENV_MEDICATION_CONCURRENCY),
            ENV_MEDICATION_CONCURRENCY,
            defaults.medication_concurrency,
        )
        .max(1);

        Self {
            base_url,
            timeout_secs,
            medication_concurrency,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL for an API path such as `/api/doctors`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, fallback: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match raw {
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!(key, value = %value, "Ignoring unparsable setting");
                fallback
            }
        },
        None => fallback,
    }
}
