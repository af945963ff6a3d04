//! Server Configuration

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::error::ApiError;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/eventforms.json";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,
    /// Base URL of the respondent-facing site; form links are `{base}/form/{id}`
    pub public_base_url: String,
    /// Shared HS256 secret of the auth service
    pub jwt_secret: String,
    /// Prefix of exported file names
    pub export_prefix: String,
    /// Allow any origin
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:9000".into(),
            public_base_url: "http://localhost:3000".into(),
            jwt_secret: String::new(),
            export_prefix: "ecell".into(),
            cors_permissive: true,
        }
    }
}

impl ServerConfig {
    /// Load from file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| ApiError::Config(format!("{}: {e}", path.display())))
    }

    /// Load `path`, apply env overrides and validate
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        Self::resolve(path, |key| std::env::var(key).ok())
    }

    fn resolve(path: impl AsRef<Path>, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::load(path)?;
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = lookup("EVENTFORMS_BIND") {
            self.bind_addr = bind;
        }
        if let Some(url) = lookup("EVENTFORMS_PUBLIC_URL") {
            self.public_base_url = url;
        }
        if let Some(secret) = lookup("EVENTFORMS_JWT_SECRET") {
            self.jwt_secret = secret;
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        self.socket_addr()?;
        if self.jwt_secret.is_empty() {
            return Err(ApiError::Config(
                "jwt_secret is not set (config file or EVENTFORMS_JWT_SECRET)".into(),
            ));
        }
        if self.public_base_url.trim().is_empty() {
            return Err(ApiError::Config("public_base_url must not be empty".into()));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ApiError> {
        self.bind_addr
            .parse()
            .map_err(|e| ApiError::Config(format!("invalid bind_addr {:?}: {e}", self.bind_addr)))
    }
}
