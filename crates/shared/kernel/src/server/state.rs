use axum::extract::FromRef;
use iredo_domain::config::ApiConfig;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
}

/// Process-wide request state: the frozen configuration behind an `Arc`.
///
/// Built once at startup and cloned into the router; handlers extract the
/// pieces they need via `FromRef`.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { inner: Arc::new(ApiStateInner { config }) }
    }

    /// Whether the process runs in development mode.
    #[must_use]
    pub fn development(&self) -> bool {
        self.inner.config.server.environment.is_development()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iredo_domain::config::Environment;

    #[test]
    fn state_exposes_development_flag() {
        let mut config = ApiConfig::default();
        config.server.environment = Environment::Development;
        let state = ApiState::new(config);
        assert!(state.development());

        let state = ApiState::new(ApiConfig::default());
        assert!(!state.development());
    }

    #[test]
    fn config_is_extractable_from_ref() {
        let state = ApiState::new(ApiConfig::default());
        let cfg = ApiConfig::from_ref(&state);
        assert_eq!(cfg.server.port, state.config.server.port);
    }
}
