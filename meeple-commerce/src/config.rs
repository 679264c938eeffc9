use std::path::PathBuf;

use crate::error::CommerceError;

/// Connection settings for the commerce platform project.
///
/// Passed explicitly into the client at construction; components never read
/// ambient environment state themselves.
#[derive(Debug, Clone)]
pub struct CommerceConfig {
    pub project_key: String,
    pub client_id: String,
    pub client_secret: String,
    /// Base API host, e.g. `https://api.europe-west1.gcp.commercetools.com`.
    pub api_url: String,
    /// OAuth token host.
    pub auth_url: String,
    pub scopes: Vec<String>,
}

/// TOML config file format.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    commerce: Option<CommerceFileConfig>,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct CommerceFileConfig {
    project_key: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    api_url: Option<String>,
    auth_url: Option<String>,
    scopes: Option<String>,
}

impl CommerceConfig {
    /// Load configuration from environment variables or the config file.
    ///
    /// Priority: env vars > config file. Required: project key, client id,
    /// client secret, API url, auth url. Scopes default to
    /// `manage_products:{project_key}`.
    ///
    /// Missing required values fail here, before any network activity.
    pub fn load() -> Result<Self, CommerceError> {
        let file = load_config_file();

        let project_key = env_or_file("CTP_PROJECT_KEY", file.as_ref().and_then(|c| c.project_key.clone()))
            .ok_or_else(|| missing("project_key", "CTP_PROJECT_KEY"))?;
        let client_id = env_or_file("CTP_CLIENT_ID", file.as_ref().and_then(|c| c.client_id.clone()))
            .ok_or_else(|| missing("client_id", "CTP_CLIENT_ID"))?;
        let client_secret = env_or_file(
            "CTP_CLIENT_SECRET",
            file.as_ref().and_then(|c| c.client_secret.clone()),
        )
        .ok_or_else(|| missing("client_secret", "CTP_CLIENT_SECRET"))?;
        let api_url = env_or_file("CTP_API_URL", file.as_ref().and_then(|c| c.api_url.clone()))
            .ok_or_else(|| missing("api_url", "CTP_API_URL"))?;
        let auth_url = env_or_file("CTP_AUTH_URL", file.as_ref().and_then(|c| c.auth_url.clone()))
            .ok_or_else(|| missing("auth_url", "CTP_AUTH_URL"))?;

        let scopes_str = env_or_file("CTP_SCOPES", file.as_ref().and_then(|c| c.scopes.clone()))
            .unwrap_or_else(|| format!("manage_products:{project_key}"));
        let scopes = scopes_str.split_whitespace().map(str::to_string).collect();

        Ok(Self {
            project_key,
            client_id,
            client_secret,
            api_url,
            auth_url,
            scopes,
        })
    }
}

/// Return the path to the commerce config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("meeple").join("commerce.toml"))
}

fn env_or_file(var: &str, file_value: Option<String>) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty()).or(file_value)
}

fn missing(field: &str, var: &str) -> CommerceError {
    CommerceError::Config(format!(
        "Missing {field}. Set {var} env var or add to config file"
    ))
}

fn load_config_file() -> Option<CommerceFileConfig> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    let config: ConfigFile = toml::from_str(&content).ok()?;
    config.commerce
}
