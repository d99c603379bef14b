//! Shared application state.

use scopewise_core::{Locale, ScopewiseConfig, config::ReportConfig};
use scopewise_gateway::PersistenceGateway;
use std::sync::Arc;

/// State shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    gateway: Arc<dyn PersistenceGateway>,
    config: ScopewiseConfig,
    /// Resolved once at startup.
    admin_token: Option<String>,
}

impl AppState {
    /// Create state for `config`, resolving the admin token from it.
    pub fn new(config: ScopewiseConfig, gateway: Arc<dyn PersistenceGateway>) -> Self {
        let admin_token = config.server.resolve_admin_token();
        if admin_token.is_none() {
            tracing::warn!("No admin token configured; admin endpoints are disabled");
        }
        Self {
            inner: Arc::new(AppStateInner {
                gateway,
                config,
                admin_token,
            }),
        }
    }

    /// Replace the admin token.
    pub fn with_admin_token(self, token: impl Into<String>) -> Self {
        let inner = match Arc::try_unwrap(self.inner) {
            Ok(inner) => inner,
            Err(shared) => AppStateInner {
                gateway: shared.gateway.clone(),
                config: shared.config.clone(),
                admin_token: None,
            },
        };
        Self {
            inner: Arc::new(AppStateInner {
                admin_token: Some(token.into()),
                ..inner
            }),
        }
    }

    pub fn gateway(&self) -> &dyn PersistenceGateway {
        self.inner.gateway.as_ref()
    }

    /// Owned handle for spawned tasks.
    pub fn gateway_handle(&self) -> Arc<dyn PersistenceGateway> {
        self.inner.gateway.clone()
    }

    pub fn config(&self) -> &ScopewiseConfig {
        &self.inner.config
    }

    pub fn report_config(&self) -> &ReportConfig {
        &self.inner.config.report
    }

    pub fn default_locale(&self) -> &Locale {
        &self.inner.config.wizard.default_locale
    }

    pub fn admin_token(&self) -> Option<&str> {
        self.inner.admin_token.as_deref()
    }
}
