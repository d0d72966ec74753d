//! Shared constants used across the API surface.

/// OpenAPI document title.
pub const API_DOC_TITLE: &str = "iredo_v1";
/// OpenAPI document version.
pub const API_DOC_VERSION: &str = "v1";

/// OpenAPI tag for the rooms routes.
pub const ROOMS_TAG: &str = "rooms";

/// Path serving the generated OpenAPI JSON document (development only).
pub const SWAGGER_JSON_PATH: &str = "/swagger/v1/swagger.json";
/// Path serving the interactive documentation UI (development only).
pub const SWAGGER_UI_PATH: &str = "/swagger";

/// Name of the process-wide permissive CORS policy.
pub const CORS_POLICY_NAME: &str = "AllowAll";
