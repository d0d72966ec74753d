//! Facade crate for iredo features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature routers.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Call [`server::router::api_router`] to obtain the aggregated feature
//!   routes; extend the merge chain as new slices appear.

pub use iredo_domain as domain;
pub use iredo_kernel as kernel;

pub mod server {
    pub mod router {
        use utoipa_axum::router::OpenApiRouter;

        /// Aggregates the routers of all enabled feature slices.
        pub fn api_router<S>() -> OpenApiRouter<S>
        where
            S: Send + Sync + Clone + 'static,
        {
            OpenApiRouter::<S>::new().merge(iredo_rooms::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use iredo_rooms as rooms;

    /// Build-time enabled features.
    pub const ENABLED: &[&str] = &["rooms"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}
