//! Convenience re-exports for server assembly code.

pub use crate::config::load_config;
pub use crate::server::{ApiDoc, ApiState};
pub use iredo_domain::config::ApiConfig;
pub use iredo_domain::constants;
