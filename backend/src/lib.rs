//! Pilgrimage management backend library.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, the
//! partial-update engine, services, and ports; `inbound` exposes the REST
//! adapter; `outbound` provides the Diesel persistence adapter.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::trace::Trace;
