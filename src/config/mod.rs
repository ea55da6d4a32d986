//! Configuration module for the Pwinty client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "v2";

/// Vendor domain shared by the sandbox and production hosts
pub const API_DOMAIN: &str = "pwinty.com";

// ============================================================================
// Client Configuration
// ============================================================================

/// Connection settings for a [`PwintyClient`](crate::PwintyClient)
///
/// Built once and handed to the client, which never mutates it.
#[derive(Clone)]
pub struct ClientConfig {
    /// Vendor-issued account identifier
    pub merchant_id: String,

    /// Vendor-issued secret credential
    pub api_key: String,

    /// API version segment appended to the host (e.g. "v2")
    pub version: String,

    /// Target the sandbox host instead of production
    pub sandbox: bool,

    /// Replaces the derived base URL entirely (proxies, local test servers)
    pub base_url: Option<String>,

    /// Whole-request timeout; `None` leaves requests unbounded
    pub timeout: Option<Duration>,

    /// User agent sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a sandbox configuration for the default API version
    pub fn new(merchant_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        ClientConfig {
            merchant_id: merchant_id.into(),
            api_key: api_key.into(),
            version: DEFAULT_API_VERSION.to_string(),
            sandbox: true,
            base_url: None,
            timeout: None,
            user_agent: format!("pwinty-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the API version segment
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Choose between the sandbox and production hosts
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Override the derived base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Bound every request by `timeout`
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Resolve the base URL every request path is appended to
    ///
    /// `https://sandbox.pwinty.com/{version}` or `https://api.pwinty.com/{version}`
    /// unless an explicit base URL was configured.
    pub fn base_url(&self) -> String {
        if let Some(ref base_url) = self.base_url {
            return base_url.trim_end_matches('/').to_string();
        }

        format!(
            "https://{}.{}/{}",
            if self.sandbox { "sandbox" } else { "api" },
            API_DOMAIN,
            self.version,
        )
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("merchant_id", &self.merchant_id)
            .field("api_key", &"<redacted>")
            .field("version", &self.version)
            .field("sandbox", &self.sandbox)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

// ============================================================================
// Settings (files + environment)
// ============================================================================

/// Client settings loaded from config files and the environment
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub merchant_id: String,
    pub api_key: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_sandbox() -> bool {
    true
}

impl Settings {
    /// Load settings from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (PWINTY__MERCHANT_ID, PWINTY__API_KEY, ...)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    ///
    /// A `.env` file is read first when present. The config directory can be
    /// moved with `CONFIG_PATH`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        Self::load_from(&config_dir)
    }

    /// Load settings using `config_dir` for the TOML layers
    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix("PWINTY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Convert into the configuration consumed by the client
    pub fn into_client_config(self) -> ClientConfig {
        let mut config = ClientConfig::new(self.merchant_id, self.api_key).with_sandbox(self.sandbox);

        if let Some(version) = self.version {
            config = config.with_version(version);
        }
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config
    }
}
