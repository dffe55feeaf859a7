//! Service Module
//!
//! Business logic for identities, tokens, candidates, and report export.

pub mod candidate;
pub mod identity;
pub mod report;
pub mod token;

pub use candidate::CandidateService;
pub use identity::IdentityService;
pub use report::ReportService;
pub use token::{AuthError, Claims, TokenService};
