//! Data Models Module
//!
//! Data structures used throughout the service: the two managed entity
//! kinds, and request/response types with validation logic.

pub mod candidate;
pub mod identity;
pub mod requests;

// Re-export commonly used types
pub use candidate::{Candidate, Gender};
pub use identity::{Identity, IdentityRecord};
pub use requests::*;
