//! Server configuration.
//!
//! Settings load from an optional TOML file plus `MEDREC_`-prefixed
//! environment variables (e.g. `MEDREC_SERVER__PORT=8080`,
//! `MEDREC_AUTH__ACCESS_SECRET=...`). Environment wins over file.

use std::net::SocketAddr;

use medrec_auth::TokenConfig;
use serde::{Deserialize, Serialize};
use time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from `path` (if the file exists) and the
    /// environment.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder
            .add_source(config::Environment::with_prefix("MEDREC").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        if self.auth.access_secret.is_empty() || self.auth.refresh_secret.is_empty() {
            return Err("auth secrets must not be empty".into());
        }
        if self.auth.access_secret == self.auth.refresh_secret {
            return Err("auth.access_secret and auth.refresh_secret must differ".into());
        }
        if self.auth.access_ttl_hours == 0 || self.auth.refresh_ttl_days == 0 {
            return Err("auth token lifetimes must be > 0".into());
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }

    /// Builds the token service configuration.
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            access_secret: self.auth.access_secret.clone(),
            refresh_secret: self.auth.refresh_secret.clone(),
            access_ttl: Duration::hours(self.auth.access_ttl_hours as i64),
            refresh_ttl: Duration::days(self.auth.refresh_ttl_days as i64),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// HMAC secret for access tokens.
    #[serde(default = "default_access_secret")]
    pub access_secret: String,
    /// HMAC secret for refresh tokens.
    #[serde(default = "default_refresh_secret")]
    pub refresh_secret: String,
    /// Access token lifetime in hours.
    #[serde(default = "default_access_ttl_hours")]
    pub access_ttl_hours: u64,
    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_ttl_days: u64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            access_secret: default_access_secret(),
            refresh_secret: default_refresh_secret(),
            access_ttl_hours: default_access_ttl_hours(),
            refresh_ttl_days: default_refresh_ttl_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

// Development-only defaults; deployments override via file or environment.
fn default_access_secret() -> String {
    "medrec-dev-access-secret".to_string()
}

fn default_refresh_secret() -> String {
    "medrec-dev-refresh-secret".to_string()
}

fn default_access_ttl_hours() -> u64 {
    24
}

fn default_refresh_ttl_days() -> u64 {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.addr().port(), 8080);
        assert_eq!(cfg.auth.access_ttl_hours, 24);
        assert_eq!(cfg.auth.refresh_ttl_days, 7);
    }

    #[test]
    fn test_validate_rejects_shared_secret() {
        let mut cfg = AppConfig::default();
        cfg.auth.refresh_secret = cfg.auth.access_secret.clone();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut cfg = AppConfig::default();
        cfg.logging.level = "verbose".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_token_config_lifetimes() {
        let cfg = AppConfig::default();
        let tokens = cfg.token_config();
        assert_eq!(tokens.access_ttl, Duration::hours(24));
        assert_eq!(tokens.refresh_ttl, Duration::days(7));
    }
}
