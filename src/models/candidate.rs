//! Candidate Model
//!
//! The managed business record: a job candidate's profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Candidate gender, stored and rendered as its display text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[serde(rename = "Not Specified")]
    NotSpecified,
}

impl Gender {
    /// Textual form used in storage, CSV rows, and keyword matching
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NotSpecified => "Not Specified",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Not Specified" => Ok(Gender::NotSpecified),
            other => Err(format!("unknown gender value: {}", other)),
        }
    }
}

/// Full candidate record as stored and returned by the API
///
/// The identifier is assigned at creation and never replaced by updates;
/// every other field is subject to full-replacement updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique identifier, generated at creation
    pub id: Uuid,

    pub first_name: String,
    pub last_name: String,

    /// Email address (unique across the candidate partition)
    pub email: String,

    pub career_level: String,
    pub job_major: String,

    /// Non-negative years of professional experience
    pub years_of_experience: i32,

    pub degree_type: String,

    /// Ordered list of skills
    pub skills: Vec<String>,

    pub nationality: String,
    pub city: String,

    /// Non-negative salary figure
    pub salary: f64,

    pub gender: Gender,
}
