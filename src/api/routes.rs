//! API Route Definitions
//!
//! This module defines all HTTP routes and their corresponding handlers using
//! a builder pattern. The RouterBuilder allows selective enabling/disabling of
//! endpoints for different deployment scenarios.

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::*;
use super::middleware::auth_middleware;

/// Builder for creating API routes with configurable endpoints
///
/// Useful for deployments that only expose a subset of the API, such as a
/// read-only search service or a registration-only front door.
#[derive(Default)]
pub struct RouterBuilder {
    /// Whether to enable the health check endpoint (GET /health)
    health_check: bool,
    /// Whether to enable identity registration (POST /user)
    register_identity: bool,
    /// Whether to enable token issuance (POST /token)
    issue_token: bool,
    /// Whether to enable candidate creation (POST /candidate)
    create_candidate: bool,
    /// Whether to enable candidate retrieval (GET /candidate/{id})
    get_candidate: bool,
    /// Whether to enable candidate replacement (PUT /candidate/{id})
    update_candidate: bool,
    /// Whether to enable candidate deletion (DELETE /candidate/{id})
    delete_candidate: bool,
    /// Whether to enable filtered search (GET /all-candidates)
    search_candidates: bool,
    /// Whether to enable CSV export (GET /generate-report)
    generate_report: bool,
}

impl RouterBuilder {
    /// Creates a new router builder with all routes disabled by default
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router builder with all routes enabled
    pub fn with_all_routes() -> Self {
        Self {
            health_check: true,
            register_identity: true,
            issue_token: true,
            create_candidate: true,
            get_candidate: true,
            update_candidate: true,
            delete_candidate: true,
            search_candidates: true,
            generate_report: true,
        }
    }

    /// Creates a router builder with read-only candidate routes
    ///
    /// Search, retrieval, and export stay enabled alongside the auth
    /// endpoints; all mutating candidate routes are off.
    pub fn with_readonly_routes() -> Self {
        Self {
            health_check: true,
            register_identity: false,
            issue_token: true,
            create_candidate: false,
            get_candidate: true,
            update_candidate: false,
            delete_candidate: false,
            search_candidates: true,
            generate_report: true,
        }
    }

    /// Creates a router builder with only the health check enabled
    pub fn with_minimal_routes() -> Self {
        Self {
            health_check: true,
            ..Self::default()
        }
    }

    pub fn health_check(mut self, enabled: bool) -> Self {
        self.health_check = enabled;
        self
    }

    pub fn register_identity(mut self, enabled: bool) -> Self {
        self.register_identity = enabled;
        self
    }

    pub fn issue_token(mut self, enabled: bool) -> Self {
        self.issue_token = enabled;
        self
    }

    pub fn create_candidate(mut self, enabled: bool) -> Self {
        self.create_candidate = enabled;
        self
    }

    pub fn get_candidate(mut self, enabled: bool) -> Self {
        self.get_candidate = enabled;
        self
    }

    pub fn update_candidate(mut self, enabled: bool) -> Self {
        self.update_candidate = enabled;
        self
    }

    pub fn delete_candidate(mut self, enabled: bool) -> Self {
        self.delete_candidate = enabled;
        self
    }

    pub fn search_candidates(mut self, enabled: bool) -> Self {
        self.search_candidates = enabled;
        self
    }

    pub fn generate_report(mut self, enabled: bool) -> Self {
        self.generate_report = enabled;
        self
    }

    /// Builds the Axum router with the configured routes
    ///
    /// The candidate routes are grouped behind the bearer-token middleware;
    /// health, registration, and token issuance stay public.
    pub fn build(self, state: AppState) -> Router {
        let mut public = Router::new();

        if self.health_check {
            public = public.route("/health", get(health_check));
        }

        if self.register_identity {
            public = public.route("/user", post(register_identity));
        }

        if self.issue_token {
            public = public.route("/token", post(issue_token));
        }

        let mut protected = Router::new();

        if self.create_candidate {
            protected = protected.route("/candidate", post(create_candidate));
        }

        if self.get_candidate {
            protected = protected.route("/candidate/{id}", get(get_candidate));
        }

        if self.update_candidate {
            protected = protected.route("/candidate/{id}", put(update_candidate));
        }

        if self.delete_candidate {
            protected = protected.route("/candidate/{id}", delete(delete_candidate));
        }

        if self.search_candidates {
            protected = protected.route("/all-candidates", get(search_candidates));
        }

        if self.generate_report {
            protected = protected.route("/generate-report", get(generate_report));
        }

        let any_protected = self.create_candidate
            || self.get_candidate
            || self.update_candidate
            || self.delete_candidate
            || self.search_candidates
            || self.generate_report;

        // axum panics if route_layer is applied to a router with no routes.
        let protected = if any_protected {
            protected.route_layer(from_fn_with_state(state.clone(), auth_middleware))
        } else {
            protected
        };

        public.merge(protected).with_state(state)
    }
}

/// Creates the full API router
pub fn create_routes(state: AppState) -> Router {
    RouterBuilder::with_all_routes().build(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::state_with_stores;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_minimal_router_serves_health_only() {
        let (state, _) = state_with_stores().await;
        let app = RouterBuilder::with_minimal_routes().build(state);

        let health = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let token = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(token.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_readonly_router_disables_mutations() {
        let (state, _) = state_with_stores().await;
        let app = RouterBuilder::with_readonly_routes().build(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/candidate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_builder_enables_individual_routes() {
        let (state, _) = state_with_stores().await;
        let app = RouterBuilder::new().health_check(true).build(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
