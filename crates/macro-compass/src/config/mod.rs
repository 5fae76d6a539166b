use crate::catalog::ScoreVariant;
use crate::series::YearRange;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub provider: ProviderConfig,
    pub scoring: ScoringConfig,
    pub explorer: ExplorerConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidValue {
                key: "APP_LOG_FORMAT",
                value: raw,
            })?,
            Err(_) => LogFormat::Compact,
        };

        let defaults = ProviderConfig::default();
        let provider = ProviderConfig {
            base_url: env::var("MACRO_PROVIDER_URL").unwrap_or(defaults.base_url),
            timeout_secs: numeric_var("MACRO_PROVIDER_TIMEOUT_SECS", defaults.timeout_secs)?,
            per_page: numeric_var("MACRO_PROVIDER_PER_PAGE", defaults.per_page)?,
            max_pages: numeric_var("MACRO_PROVIDER_MAX_PAGES", defaults.max_pages)?,
            cache_ttl_secs: numeric_var("MACRO_CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
        };

        let variant = match env::var("MACRO_SCORE_VARIANT") {
            Ok(raw) => ScoreVariant::parse(&raw).ok_or(ConfigError::InvalidValue {
                key: "MACRO_SCORE_VARIANT",
                value: raw,
            })?,
            Err(_) => ScoreVariant::default(),
        };
        let catalog_path = env::var("MACRO_CATALOG_PATH")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        let explorer_defaults = ExplorerConfig::default();
        let min_year = numeric_var("MACRO_YEAR_MIN", explorer_defaults.bounds.start)?;
        let max_year = numeric_var("MACRO_YEAR_MAX", explorer_defaults.bounds.end)?;
        let bounds =
            YearRange::new(min_year, max_year).map_err(|_| ConfigError::InvalidYearBounds {
                min: min_year,
                max: max_year,
            })?;
        let explorer = ExplorerConfig::with_bounds(bounds);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            provider,
            scoring: ScoringConfig {
                variant,
                catalog_path,
            },
            explorer,
        })
    }
}

fn numeric_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Indicator data provider connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub per_page: u32,
    pub max_pages: u32,
    /// Zero disables the series cache.
    pub cache_ttl_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.worldbank.org/v2".to_string(),
            timeout_secs: 10,
            per_page: 100,
            max_pages: 5,
            cache_ttl_secs: 3600,
        }
    }
}

/// Which score catalog to grade against.
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    pub variant: ScoreVariant,
    /// JSON catalog replacing the built-in one when set.
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplorerConfig {
    pub bounds: YearRange,
    pub default_range: YearRange,
    pub max_countries: usize,
}

impl ExplorerConfig {
    /// Default range is 2005 onwards, clamped into `bounds`.
    pub fn with_bounds(bounds: YearRange) -> Self {
        let start = 2005.clamp(bounds.start, bounds.end);
        Self {
            bounds,
            default_range: YearRange {
                start,
                end: bounds.end,
            },
            max_countries: 3,
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::with_bounds(YearRange {
            start: 2000,
            end: 2023,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { key: &'static str, value: String },
    InvalidYearBounds { min: i32, max: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key} has an invalid value '{value}'")
            }
            ConfigError::InvalidYearBounds { min, max } => write!(
                f,
                "MACRO_YEAR_MIN ({min}) must not be greater than MACRO_YEAR_MAX ({max})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidValue { .. }
            | ConfigError::InvalidYearBounds { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    const KEYS: [&str; 14] = [
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "APP_LOG_LEVEL",
        "APP_LOG_FORMAT",
        "MACRO_PROVIDER_URL",
        "MACRO_PROVIDER_TIMEOUT_SECS",
        "MACRO_PROVIDER_PER_PAGE",
        "MACRO_PROVIDER_MAX_PAGES",
        "MACRO_CACHE_TTL_SECS",
        "MACRO_SCORE_VARIANT",
        "MACRO_CATALOG_PATH",
        "MACRO_YEAR_MIN",
        "MACRO_YEAR_MAX",
    ];

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.log_format, LogFormat::Compact);
        assert_eq!(config.provider, ProviderConfig::default());
        assert_eq!(config.scoring.variant, ScoreVariant::GovernmentDebt);
        assert!(config.scoring.catalog_path.is_none());
        assert_eq!(config.explorer, ExplorerConfig::default());
        assert_eq!(
            config.explorer.default_range,
            YearRange {
                start: 2005,
                end: 2023
            }
        );
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn provider_and_scoring_overrides_are_read() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MACRO_PROVIDER_TIMEOUT_SECS", "3");
        env::set_var("MACRO_CACHE_TTL_SECS", "0");
        env::set_var("MACRO_SCORE_VARIANT", "interest-rate");
        env::set_var("MACRO_YEAR_MIN", "2010");
        env::set_var("MACRO_YEAR_MAX", "2020");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.provider.timeout_secs, 3);
        assert_eq!(config.provider.cache_ttl_secs, 0);
        assert_eq!(config.scoring.variant, ScoreVariant::InterestRate);
        assert_eq!(
            config.explorer.default_range,
            YearRange {
                start: 2010,
                end: 2020
            }
        );
        reset_env();
    }

    #[test]
    fn rejects_invalid_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MACRO_PROVIDER_PER_PAGE", "lots");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidValue {
                key: "MACRO_PROVIDER_PER_PAGE",
                ..
            })
        ));

        reset_env();
        env::set_var("MACRO_YEAR_MIN", "2030");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidYearBounds { .. })
        ));
        reset_env();
    }
}
