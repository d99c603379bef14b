//! HTTP API configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token required on admin endpoints. Admin endpoints are
    /// disabled when neither this nor `admin_token_env` resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_token: Option<String>,

    /// Environment variable containing the admin token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_token_env: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            admin_token: None,
            admin_token_env: None,
        }
    }
}

impl ServerConfig {
    /// Socket address string, e.g. `127.0.0.1:8080`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the admin token, checking `admin_token_env` first.
    pub fn resolve_admin_token(&self) -> Option<String> {
        if let Some(env_var) = &self.admin_token_env {
            if let Ok(token) = std::env::var(env_var) {
                return Some(token);
            }
        }
        self.admin_token.clone().filter(|t| !t.is_empty())
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}
