//! Request and Response Models
//!
//! Data structures for API request and response payloads with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::candidate::Gender;
use crate::utils::validation::{email_validator, name_validator};

/// Request payload for registering a new identity
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterIdentityRequest {
    #[validate(custom(function = "name_validator"))]
    pub first_name: String,

    #[validate(custom(function = "name_validator"))]
    pub last_name: String,

    /// Email address (must be unique and valid format)
    #[validate(custom(function = "email_validator"))]
    pub email: String,

    /// Credential secret; stored only as a bcrypt hash
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// Request payload for exchanging credentials for a bearer token
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(custom(function = "email_validator"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// Response for token issuance
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
}

/// Request payload carrying every candidate field except the identifier
///
/// Used for both creation and full-replacement updates.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CandidateRequest {
    #[validate(custom(function = "name_validator"))]
    pub first_name: String,

    #[validate(custom(function = "name_validator"))]
    pub last_name: String,

    #[validate(custom(function = "email_validator"))]
    pub email: String,

    #[validate(length(min = 1, message = "Career level cannot be empty"))]
    pub career_level: String,

    #[validate(length(min = 1, message = "Job major cannot be empty"))]
    pub job_major: String,

    #[validate(range(min = 0, message = "Years of experience must be non-negative"))]
    pub years_of_experience: i32,

    #[validate(length(min = 1, message = "Degree type cannot be empty"))]
    pub degree_type: String,

    pub skills: Vec<String>,

    #[validate(length(min = 1, message = "Nationality cannot be empty"))]
    pub nationality: String,

    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: String,

    #[validate(range(min = 0.0, message = "Salary must be non-negative"))]
    pub salary: f64,

    pub gender: Gender,
}

/// Query parameters for the report export endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    /// Page number, 1-based (default 1)
    pub page: Option<u32>,
    /// Rows per page, 1..=100 (default 10)
    pub page_size: Option<u32>,
}

/// Response for health check
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
}
