use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub login: LoginConfig,
    #[serde(default)]
    pub vendor: VendorSection,
}

/// What the login button asks for and how its result is interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginConfig {
    #[serde(default = "default_permissions")]
    pub permissions: Vec<String>,
    /// Outcome precedence: "error-first" or "token-first".
    #[serde(default = "default_policy")]
    pub policy: String,
}

fn default_permissions() -> Vec<String> {
    vec!["public_profile".into()]
}
fn default_policy() -> String {
    "error-first".into()
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            permissions: default_permissions(),
            policy: default_policy(),
        }
    }
}

/// Settings handed to the third-party login SDK.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorSection {
    #[serde(default = "default_app_id")]
    pub app_id: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

fn default_app_id() -> String {
    "loginseam-demo".into()
}
fn default_token_ttl_secs() -> u64 {
    3600
}

impl Default for VendorSection {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config with fallback chain: explicit path → ./config/default.toml → hardcoded defaults.
    pub fn load_or_default(explicit_path: Option<&Path>) -> Self {
        if let Some(path) = explicit_path {
            match Self::load(path) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {e}", path.display());
                }
            }
        }

        let default_path = Path::new("config/default.toml");
        if default_path.exists() {
            match Self::load(default_path) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    tracing::warn!("Failed to load default config: {e}");
                }
            }
        }

        tracing::info!("Using hardcoded default configuration");
        Self::default()
    }
}
