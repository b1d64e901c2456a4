//! # Service Configuration
//!
//! Where the analysis service lives and how to call it.
//!
//! Sources are layered, later wins:
//!
//! 1. [`ServiceConfig::default`]
//! 2. a JSON file (any subset of the fields)
//! 3. environment variables `FRAME_API_URL`, `FRAME_ACCESS_TOKEN`,
//!    `FRAME_TIMEOUT_SECS`, `FRAME_DESIGN_CODE`
//!
//! ```rust
//! use frame_core::codes::DesignCode;
//! use frame_core::config::ServiceConfig;
//!
//! let mut config = ServiceConfig::default();
//! config
//!     .apply_env_with(|key| match key {
//!         "FRAME_DESIGN_CODE" => Some("eurocode".to_string()),
//!         _ => None,
//!     })
//!     .unwrap();
//!
//! assert_eq!(config.design_code, DesignCode::Eurocode);
//! assert_eq!(config.api_url, "http://localhost:8000");
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codes::DesignCode;
use crate::errors::{FrameError, FrameResult};

pub const ENV_API_URL: &str = "FRAME_API_URL";
pub const ENV_ACCESS_TOKEN: &str = "FRAME_ACCESS_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "FRAME_TIMEOUT_SECS";
pub const ENV_DESIGN_CODE: &str = "FRAME_DESIGN_CODE";

/// Analysis service connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL, without trailing slash
    pub api_url: String,
    /// Opaque bearer credential, passed through untouched
    pub access_token: Option<String>,
    pub timeout_secs: u64,
    /// Code used when none is chosen explicitly
    pub design_code: DesignCode,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            api_url: "http://localhost:8000".to_string(),
            access_token: None,
            timeout_secs: 30,
            design_code: DesignCode::Aci,
        }
    }
}

impl ServiceConfig {
    /// Defaults, then the optional file, then the process environment
    pub fn load(path: Option<&Path>) -> FrameResult<Self> {
        let mut config = match path {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        debug!(api_url = %config.api_url, code = %config.design_code, "service config loaded");
        Ok(config)
    }

    /// Read a JSON config file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> FrameResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FrameError::config(format!("cannot read {}: {}", path.display(), e)))?;
        ServiceConfig::from_json(&text)
    }

    pub fn from_json(text: &str) -> FrameResult<Self> {
        let config: ServiceConfig =
            serde_json::from_str(text).map_err(|e| FrameError::config(format!("invalid config: {}", e)))?;
        config.validated()
    }

    /// Overlay values from an environment lookup
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> FrameResult<()> {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| FrameError::config(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw)))?;
        }
        if let Some(raw) = lookup(ENV_DESIGN_CODE) {
            self.design_code = DesignCode::from_id(&raw)
                .ok_or_else(|| FrameError::config(format!("{} '{}' is not a supported design code", ENV_DESIGN_CODE, raw)))?;
        }
        *self = self.clone().validated()?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `api_url` joined with an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    fn validated(mut self) -> FrameResult<Self> {
        self.api_url = self.api_url.trim().trim_end_matches('/').to_string();
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(FrameError::config(format!("api_url must be http(s), got '{}'", self.api_url)));
        }
        if self.timeout_secs == 0 {
            return Err(FrameError::config("timeout_secs must be at least 1"));
        }
        Ok(self)
    }
}
