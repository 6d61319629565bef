//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `JWT_SECRET` - HMAC secret for signing bearer tokens
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `JWT_TTL_HOURS` - Token lifetime in hours (default: 168)
//! - `PUBLIC_BASE_URL` - Base for short URLs; derived from the request when unset
//! - `CODE_LENGTH` - Length of generated codes (default: 6, range: 4-32)
//! - `MAX_CODE_ATTEMPTS` - Generated-code retry bound (default: 100)
//! - `CUSTOM_CODE_PATTERN` - Regex custom codes must match
//!   (default: `^[A-Za-z0-9_-]{3,20}$`)
//! - `SWEEP_INTERVAL_SECONDS` - Background expiry sweep period, 0 disables (default: 0)
//! - `STATIC_DIR` - Directory with the browser frontend (default: `public`)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

use crate::application::services::LinkSettings;
use crate::utils::code_generator::{
    CodeGenerator, CustomCodePolicy, DEFAULT_CODE_LENGTH, DEFAULT_CUSTOM_CODE_PATTERN,
};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Secret used to sign and verify bearer tokens. Must be non-empty.
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    /// When set, short URLs are built from this base instead of the request `Host`.
    pub public_base_url: Option<String>,
    pub code_length: usize,
    pub max_code_attempts: usize,
    pub custom_code_pattern: String,
    /// Period of the background expiry sweep in seconds; `0` disables it.
    pub sweep_interval_seconds: u64,
    pub static_dir: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing or a numeric variable does not parse.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let custom_code_pattern = env::var("CUSTOM_CODE_PATTERN")
            .unwrap_or_else(|_| DEFAULT_CUSTOM_CODE_PATTERN.to_string());

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            jwt_secret,
            jwt_ttl_hours: parse_var("JWT_TTL_HOURS", 168)?,
            public_base_url,
            code_length: parse_var("CODE_LENGTH", DEFAULT_CODE_LENGTH)?,
            max_code_attempts: parse_var("MAX_CODE_ATTEMPTS", 100)?,
            custom_code_pattern,
            sweep_interval_seconds: parse_var("SWEEP_INTERVAL_SECONDS", 0)?,
            static_dir,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range or malformed.
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        if self.jwt_ttl_hours <= 0 {
            anyhow::bail!("JWT_TTL_HOURS must be greater than 0");
        }

        if let Some(ref base) = self.public_base_url
            && !base.starts_with("http://")
            && !base.starts_with("https://")
        {
            anyhow::bail!(
                "PUBLIC_BASE_URL must start with 'http://' or 'https://', got '{}'",
                base
            );
        }

        if !(4..=32).contains(&self.code_length) {
            anyhow::bail!(
                "CODE_LENGTH must be between 4 and 32, got {}",
                self.code_length
            );
        }

        if self.max_code_attempts == 0 || self.max_code_attempts > 10_000 {
            anyhow::bail!(
                "MAX_CODE_ATTEMPTS must be between 1 and 10000, got {}",
                self.max_code_attempts
            );
        }

        CustomCodePolicy::new(&self.custom_code_pattern).with_context(|| {
            format!(
                "CUSTOM_CODE_PATTERN '{}' is not a valid regex",
                self.custom_code_pattern
            )
        })?;

        Ok(())
    }

    /// Returns whether the background expiry sweep is enabled.
    pub fn is_sweeper_enabled(&self) -> bool {
        self.sweep_interval_seconds > 0
    }

    /// Builds registry settings from the code allocation variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom code pattern does not compile.
    pub fn link_settings(&self) -> Result<LinkSettings> {
        Ok(LinkSettings {
            generator: CodeGenerator::new(self.code_length),
            custom_code_policy: CustomCodePolicy::new(&self.custom_code_pattern)?,
            max_code_attempts: self.max_code_attempts,
        })
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  JWT secret: {}", mask_secret(&self.jwt_secret));
        tracing::info!("  JWT lifetime: {}h", self.jwt_ttl_hours);

        match self.public_base_url {
            Some(ref base) => tracing::info!("  Public base URL: {}", base),
            None => tracing::info!("  Public base URL: derived from Host header"),
        }

        tracing::info!(
            "  Codes: length {}, max attempts {}, custom pattern {}",
            self.code_length,
            self.max_code_attempts,
            self.custom_code_pattern
        );

        if self.is_sweeper_enabled() {
            tracing::info!("  Expiry sweep: every {}s", self.sweep_interval_seconds);
        } else {
            tracing::info!("  Expiry sweep: disabled (lazy eviction only)");
        }

        tracing::info!("  Static dir: {}", self.static_dir);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses an optional numeric variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

/// Masks a secret for logging, keeping only its length visible.
fn mask_secret(secret: &str) -> String {
    format!("*** ({} chars)", secret.chars().count())
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_ttl_hours: 168,
            public_base_url: None,
            code_length: 6,
            max_code_attempts: 100,
            custom_code_pattern: DEFAULT_CUSTOM_CODE_PATTERN.to_string(),
            sweep_interval_seconds: 0,
            static_dir: "public".to_string(),
        }
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("hunter2"), "*** (7 chars)");
        assert!(!mask_secret("super-secret").contains("super"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:3000".to_string();

        config.jwt_secret = String::new();
        assert!(config.validate().is_err());
        config.jwt_secret = "test-secret".to_string();

        config.jwt_ttl_hours = 0;
        assert!(config.validate().is_err());
        config.jwt_ttl_hours = 168;

        config.public_base_url = Some("sho.rt".to_string());
        assert!(config.validate().is_err());
        config.public_base_url = Some("https://sho.rt".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_code_settings_validation() {
        let mut config = valid_config();

        config.code_length = 3;
        assert!(config.validate().is_err());
        config.code_length = 33;
        assert!(config.validate().is_err());
        config.code_length = 8;

        config.max_code_attempts = 0;
        assert!(config.validate().is_err());
        config.max_code_attempts = 100;

        config.custom_code_pattern = "([a-z]".to_string();
        assert!(config.validate().is_err());
        assert!(config.link_settings().is_err());

        config.custom_code_pattern = "^[a-z]{4,8}$".to_string();
        let settings = config.link_settings().unwrap();
        assert_eq!(settings.generator.length(), 8);
        assert!(settings.custom_code_policy.validate("promo").is_ok());
        assert!(settings.custom_code_policy.validate("PROMO").is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("JWT_SECRET", "env-secret");
            env::remove_var("LISTEN");
            env::remove_var("CODE_LENGTH");
            env::remove_var("SWEEP_INTERVAL_SECONDS");
            env::remove_var("PUBLIC_BASE_URL");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.jwt_secret, "env-secret");
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.code_length, DEFAULT_CODE_LENGTH);
        assert_eq!(config.custom_code_pattern, DEFAULT_CUSTOM_CODE_PATTERN);
        assert!(!config.is_sweeper_enabled());
        assert!(config.public_base_url.is_none());

        unsafe {
            env::remove_var("JWT_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_jwt_secret() {
        // SAFETY: Tests are run serially
        unsafe {
            env::remove_var("JWT_SECRET");
        }

        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("JWT_SECRET", "env-secret");
            env::set_var("SWEEP_INTERVAL_SECONDS", "often");
        }

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("SWEEP_INTERVAL_SECONDS"));

        unsafe {
            env::remove_var("JWT_SECRET");
            env::remove_var("SWEEP_INTERVAL_SECONDS");
        }
    }

    #[test]
    #[serial]
    fn test_blank_public_base_url_is_unset() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("JWT_SECRET", "env-secret");
            env::set_var("PUBLIC_BASE_URL", "  ");
        }

        let config = Config::from_env().unwrap();
        assert!(config.public_base_url.is_none());

        unsafe {
            env::remove_var("JWT_SECRET");
            env::remove_var("PUBLIC_BASE_URL");
        }
    }
}
