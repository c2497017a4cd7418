use rust_decimal::Decimal;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_MESSAGING_URI: &str = "https://wa.me/";

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
    pub pricing: PricingConfig,
    pub store: StoreConfig,
    pub notify: NotifyConfig,
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

        let vat_rate = match env::var("HORECA_VAT_RATE") {
            Ok(raw) => parse_decimal(&raw).ok_or(ConfigError::InvalidVatRate { value: raw })?,
            Err(_) => PricingConfig::default().vat_rate,
        };
        if vat_rate.is_sign_negative() {
            return Err(ConfigError::InvalidVatRate {
                value: vat_rate.to_string(),
            });
        }

        let healthy_margin_pct = match env::var("HORECA_MARGIN_THRESHOLD") {
            Ok(raw) => {
                parse_decimal(&raw).ok_or(ConfigError::InvalidMarginThreshold { value: raw })?
            }
            Err(_) => PricingConfig::default().healthy_margin_pct,
        };

        let directory = env::var("HORECA_STORE_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let messaging_uri = env::var("HORECA_MESSAGING_URI")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MESSAGING_URI.to_string());
        let phone = env::var("HORECA_NOTIFY_PHONE")
            .ok()
            .filter(|value| !value.trim().is_empty());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            pricing: PricingConfig {
                vat_rate,
                healthy_margin_pct,
            },
            store: StoreConfig { directory },
            notify: NotifyConfig {
                messaging_uri,
                phone,
            },
        })
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    raw.trim().parse::<Decimal>().ok()
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Per-deployment pricing constants used by the wine margin calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    /// VAT as a fraction, e.g. `0.22`.
    pub vat_rate: Decimal,
    /// Margin percentage at or above which a wine is considered healthy.
    pub healthy_margin_pct: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            vat_rate: Decimal::new(22, 2),
            healthy_margin_pct: Decimal::from(60),
        }
    }
}

/// Where rows end up. No directory means rows live in memory for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub directory: Option<PathBuf>,
}

/// Deep-link settings for share-ready messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    pub messaging_uri: String,
    pub phone: Option<String>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            messaging_uri: DEFAULT_MESSAGING_URI.to_string(),
            phone: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidVatRate { value: String },
    InvalidMarginThreshold { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidVatRate { value } => write!(
                f,
                "HORECA_VAT_RATE must be a non-negative decimal fraction (got '{value}')"
            ),
            ConfigError::InvalidMarginThreshold { value } => write!(
                f,
                "HORECA_MARGIN_THRESHOLD must be a decimal percentage (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidVatRate { .. }
            | ConfigError::InvalidMarginThreshold { .. } => None,
        }
    }
}
