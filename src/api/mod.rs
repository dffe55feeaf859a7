//! API Module
//!
//! HTTP handlers, authentication middleware, and route definitions.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::AppState;
pub use middleware::{auth_middleware, AuthSubject};
pub use routes::{create_routes, RouterBuilder};
