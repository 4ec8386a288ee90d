//! Proxy configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_ACCESS_TOKEN` - Admin API access token
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `SHOPIFY_ADMIN_ENDPOINT` - Full GraphQL endpoint URL (overrides store/version)
//! - `PROXY_HOST` - Bind address (default: 127.0.0.1)
//! - `PROXY_PORT` / `PORT` - Listen port (default: 3000)
//! - `PROXY_CORS_ORIGINS` - `*` or comma-separated origins (default: `*`)
//! - `PROXY_RESOLVE_TIMEOUT_SECS` - Budget for one whole lookup (default: 20)
//! - `PROXY_UPSTREAM_TIMEOUT_SECS` - Budget for one upstream call (default: 10)
//! - `PROXY_UPSTREAM_CONCURRENCY` - Parallel per-variant fetches (default: 4)
//! - `PROXY_UPSTREAM_RETRIES` - Extra attempts on transient failures (default: 1)
//! - `PROXY_VARIANTS_PAGE_SIZE` - Variants per product page (default: 50)
//! - `PROXY_LEVELS_PAGE_SIZE` - Inventory levels per variant page (default: 50)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Largest page size the Admin API accepts for a connection.
pub const MAX_PAGE_SIZE: i64 = 250;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Inventory proxy configuration.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Admin API configuration
    pub shopify: ShopifyAdminConfig,
    /// Inventory resolution limits
    pub resolver: ResolverConfig,
    /// Origins allowed to call the proxy from a browser
    pub cors: AllowedOrigins,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyAdminConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Admin API access token
    pub access_token: SecretString,
    /// GraphQL endpoint all queries are posted to
    pub endpoint: Url,
    /// Timeout for a single upstream HTTP call
    pub request_timeout: Duration,
    /// Extra attempts made after a transient failure
    pub max_retries: u32,
}

impl std::fmt::Debug for ShopifyAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAdminConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .field("endpoint", &self.endpoint.as_str())
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl ShopifyAdminConfig {
    /// Build a configuration pointing at the store's Admin GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the store domain does not form
    /// a valid URL.
    pub fn new(
        store: impl Into<String>,
        api_version: impl Into<String>,
        access_token: SecretString,
    ) -> Result<Self, ConfigError> {
        let store = store.into();
        let api_version = api_version.into();
        let endpoint = admin_endpoint(&store, &api_version)?;

        Ok(Self {
            store,
            api_version,
            access_token,
            endpoint,
            request_timeout: Duration::from_secs(10),
            max_retries: 1,
        })
    }

    /// Replace the GraphQL endpoint (e.g., for a local mock of the Admin API).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }
}

/// Limits applied to a single inventory lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Wall-clock budget for the whole pagination loop
    pub timeout: Duration,
    /// Maximum per-variant upstream calls in flight at once
    pub concurrency: usize,
    /// Variants requested per product page
    pub variants_page_size: i64,
    /// Inventory levels requested per variant page
    pub levels_page_size: i64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            concurrency: 4,
            variants_page_size: 50,
            levels_page_size: 50,
        }
    }
}

/// Browser origins allowed by the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Any origin (`*`).
    Any,
    /// Only these origins, serialized as `scheme://host[:port]`.
    List(Vec<String>),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text (local development).
    Text,
    /// One JSON object per line (log aggregation).
    Json,
}

impl ProxyConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the access token fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ProxyConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env.parse_or("PROXY_HOST", "127.0.0.1".parse::<IpAddr>().ok())?;
        let port = match env.optional("PROXY_PORT") {
            Some(_) => env.parse_or("PROXY_PORT", Some(3000))?,
            None => env.parse_or("PORT", Some(3000))?,
        };

        let shopify = ShopifyAdminConfig::from_env(&env)?;
        let resolver = ResolverConfig::from_env(&env)?;
        let cors = parse_allowed_origins(
            &env.or_default("PROXY_CORS_ORIGINS", "*"),
            "PROXY_CORS_ORIGINS",
        )?;
        let log_format = match env.or_default("LOG_FORMAT", "text").as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "LOG_FORMAT".to_string(),
                    format!("expected 'text' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            host,
            port,
            shopify,
            resolver,
            cors,
            log_format,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", Some(1.0))?,
            sentry_traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", Some(0.0))?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyAdminConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let store = env.required("SHOPIFY_STORE")?;
        let api_version = env.or_default("SHOPIFY_API_VERSION", "2026-01");
        let access_token = env.validated_secret("SHOPIFY_ACCESS_TOKEN")?;

        let mut config = Self::new(store, api_version, access_token)?;

        if let Some(raw) = env.optional("SHOPIFY_ADMIN_ENDPOINT") {
            let endpoint = Url::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPIFY_ADMIN_ENDPOINT".to_string(), e.to_string())
            })?;
            config = config.with_endpoint(endpoint);
        }

        config.request_timeout =
            Duration::from_secs(env.parse_or("PROXY_UPSTREAM_TIMEOUT_SECS", Some(10))?);
        config.max_retries = env.parse_or("PROXY_UPSTREAM_RETRIES", Some(1))?;

        Ok(config)
    }
}

impl ResolverConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timeout_secs: u64 = env.parse_or(
            "PROXY_RESOLVE_TIMEOUT_SECS",
            Some(defaults.timeout.as_secs()),
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "PROXY_RESOLVE_TIMEOUT_SECS".to_string(),
                "must be greater than 0".to_string(),
            ));
        }

        let concurrency: usize =
            env.parse_or("PROXY_UPSTREAM_CONCURRENCY", Some(defaults.concurrency))?;
        if concurrency == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "PROXY_UPSTREAM_CONCURRENCY".to_string(),
                "must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            timeout: Duration::from_secs(timeout_secs),
            concurrency,
            variants_page_size: page_size(env, "PROXY_VARIANTS_PAGE_SIZE", defaults.variants_page_size)?,
            levels_page_size: page_size(env, "PROXY_LEVELS_PAGE_SIZE", defaults.levels_page_size)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Environment lookup with typed accessors.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable; empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: Option<T>) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(key) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
            None => default.ok_or_else(|| ConfigError::MissingEnvVar(key.to_string())),
        }
    }

    /// Load and validate a secret.
    fn validated_secret(&self, key: &str) -> Result<SecretString, ConfigError> {
        let value = self.required(key)?;
        validate_secret_strength(&value, key)?;
        Ok(SecretString::from(value))
    }
}

/// Build the Admin GraphQL endpoint for a store.
fn admin_endpoint(store: &str, api_version: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(&format!(
        "https://{store}/admin/api/{api_version}/graphql.json"
    ))
    .map_err(|e| ConfigError::InvalidEnvVar("SHOPIFY_STORE".to_string(), e.to_string()))?;

    if !url.host_str().is_some_and(|host| host.eq_ignore_ascii_case(store)) {
        return Err(ConfigError::InvalidEnvVar(
            "SHOPIFY_STORE".to_string(),
            format!("'{store}' is not a bare domain"),
        ));
    }

    Ok(url)
}

fn page_size(env: &Env<'_>, key: &str, default: i64) -> Result<i64, ConfigError> {
    let size: i64 = env.parse_or(key, Some(default))?;
    if !(1..=MAX_PAGE_SIZE).contains(&size) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 1 and {MAX_PAGE_SIZE} (got {size})"),
        ));
    }
    Ok(size)
}

/// Parse `*` or a comma-separated list of origins.
fn parse_allowed_origins(raw: &str, var_name: &str) -> Result<AllowedOrigins, ConfigError> {
    if raw.trim() == "*" {
        return Ok(AllowedOrigins::Any);
    }

    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let url = Url::parse(s)
                .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), format!("{s}: {e}")))?;
            if !url.origin().is_tuple() {
                return Err(ConfigError::InvalidEnvVar(
                    var_name.to_string(),
                    format!("{s}: not an http(s) origin"),
                ));
            }
            Ok(url.origin().ascii_serialization())
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "no origins given".to_string(),
        ));
    }

    Ok(AllowedOrigins::List(origins))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real access tokens are long random hex strings
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
