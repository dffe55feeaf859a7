//! Talent Service Library
//!
//! A candidate record-management service providing token-protected CRUD
//! operations, dynamic multi-field search, and paginated CSV export.
//! Designed as a small self-contained HTTP service backed by PostgreSQL.
//!
//! # Features
//!
//! - **Token-Based Access**: identities exchange credentials for signed,
//!   expiring bearer tokens; every candidate endpoint requires one
//! - **Candidate Management**: full CRUD with enforced email uniqueness
//! - **Dynamic Search**: optional per-field filters combined into a single
//!   predicate, plus a cross-field keyword search
//! - **Partitioned Data**: live and shadow table sets selected at startup
//! - **CSV Export**: paginated report download as a streamed attachment
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use talent_service::{
//!     api::{create_routes, AppState},
//!     database::{DatabaseConfig, Partition},
//!     service::{CandidateService, IdentityService, ReportService, TokenService},
//!     store::{PgCandidateStore, PgIdentityStore},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = DatabaseConfig::from_env()?.create_pool().await?;
//!     let partition = Partition::select(true);
//!
//!     let identity_store = Arc::new(PgIdentityStore::new(pool.clone(), partition.identities));
//!     let candidate_store = Arc::new(PgCandidateStore::new(pool, partition.candidates));
//!
//!     let state = AppState {
//!         identity_service: Arc::new(IdentityService::new(identity_store)),
//!         candidate_service: Arc::new(CandidateService::new(candidate_store.clone())),
//!         report_service: Arc::new(ReportService::new(candidate_store)),
//!         token_service: Arc::new(TokenService::new("signing-secret".to_string(), 30)),
//!     };
//!
//!     let app = create_routes(state);
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **API Layer**: HTTP handlers, bearer-token middleware, and the
//!   configurable RouterBuilder
//! - **Service Layer**: business rules for identities, tokens, candidates,
//!   and report export
//! - **Query**: the filter engine compiling request parameters into one
//!   combined predicate
//! - **Store**: storage traits with PostgreSQL and in-memory adapters
//! - **Database**: connection pooling and live/shadow partition selection

/// HTTP API layer with handlers and configurable routing
pub mod api;

/// Configuration management for all service settings
pub mod config;

/// Database connection management and partition selection
pub mod database;

/// Data models and request/response structures
pub mod models;

/// Filter engine for candidate search
pub mod query;

/// Business logic services
pub mod service;

/// Storage traits and adapters
pub mod store;

/// Shared utilities for security, validation, and error handling
pub mod utils;

// Convenient re-exports of the most commonly used types
pub use models::candidate::{Candidate, Gender};
pub use models::identity::Identity;
pub use models::requests::{CandidateRequest, RegisterIdentityRequest, TokenRequest};
pub use query::FilterSpec;
pub use service::{CandidateService, IdentityService, ReportService, TokenService};
pub use utils::error::{AppError, AppResult};

/// Current version of the service
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
