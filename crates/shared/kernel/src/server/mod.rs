//! Shared server plumbing: request state, OpenAPI document assembly, and
//! fault responses for the panic-catching layer.

pub mod docs;
pub mod fault;
pub mod state;

pub use docs::ApiDoc;
pub use state::ApiState;
