//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Auth cookie configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Locale configuration.
    #[serde(default)]
    pub locale: LocaleConfig,
    /// Public site configuration.
    #[serde(default)]
    pub site: SiteConfig,
    /// Rate limiting configuration.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deployment environment (`development`, `production`, ...).
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Returns true when running in production.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

fn default_environment() -> String {
    "development".to_string()
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (`mysql://...`).
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration as loaded from config sources.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
    /// Refresh token expiration in seconds.
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    3600 // 1 hour
}

fn default_refresh_token_expiry() -> u64 {
    604_800 // 7 days
}

/// Auth cookie configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    /// Marks auth cookies `Secure`.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Optional cookie domain.
    #[serde(default)]
    pub cookie_domain: Option<String>,
}

/// Locale configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// Supported locale codes.
    #[serde(default = "default_supported_locales")]
    pub supported: Vec<String>,
    /// Locale used when nothing else matches.
    #[serde(default = "default_locale")]
    pub default: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: default_supported_locales(),
            default: default_locale(),
        }
    }
}

fn default_supported_locales() -> Vec<String> {
    vec!["tr".to_string(), "en".to_string(), "de".to_string()]
}

fn default_locale() -> String {
    "tr".to_string()
}

/// Public site configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Absolute public URL of the frontend, used for sitemap entries.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            public_url: default_public_url(),
        }
    }
}

fn default_public_url() -> String {
    "http://localhost:3000".to_string()
}

/// Fixed-window rate limiting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Requests allowed per client per window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
        }
    }
}

fn default_window_secs() -> u64 {
    60
}

fn default_max_requests() -> u32 {
    20
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TORONTO")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("locale.supported")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_environment_applies_defaults() {
        temp_env::with_vars(
            [
                ("TORONTO__DATABASE__URL", Some("mysql://root@localhost/toronto")),
                ("TORONTO__JWT__SECRET", Some("secret")),
                ("TORONTO__LOCALE__SUPPORTED", Some("tr,en")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "mysql://root@localhost/toronto");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.jwt.access_token_expiry_secs, 3600);
                assert_eq!(config.locale.supported, vec!["tr", "en"]);
                assert_eq!(config.locale.default, "tr");
                assert_eq!(config.rate_limit.max_requests, 20);
                assert!(!config.server.is_production());
            },
        );
    }

    #[test]
    fn production_detection_ignores_case() {
        let server = ServerConfig {
            environment: "Production".to_string(),
            ..ServerConfig::default()
        };
        assert!(server.is_production());
    }
}
