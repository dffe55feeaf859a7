//! Candidate Service
//!
//! Business operations over candidate records: CRUD with email uniqueness
//! plus filtered search.

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::models::candidate::Candidate;
use crate::models::requests::CandidateRequest;
use crate::query::FilterSpec;
use crate::store::CandidateStore;
use crate::utils::error::{validation_error, AppError, AppResult};
use crate::utils::validation::normalize_email;

/// Service for candidate record operations
#[derive(Clone)]
pub struct CandidateService {
    store: Arc<dyn CandidateStore>,
}

impl CandidateService {
    pub fn new(store: Arc<dyn CandidateStore>) -> Self {
        Self { store }
    }

    /// Create a candidate with a fresh identifier.
    pub async fn create(&self, request: CandidateRequest) -> AppResult<Candidate> {
        request.validate().map_err(validation_error)?;

        let email = normalize_email(&request.email);
        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email must be unique".to_string()));
        }

        let candidate = Self::from_request(Uuid::new_v4(), email, request);

        // A concurrent insert can still slip past the pre-check; the unique
        // index turns that into the same conflict.
        self.store.insert(&candidate).await?;
        log::info!("Created candidate {}", candidate.id);
        Ok(candidate)
    }

    /// Fetch a candidate by id.
    pub async fn read(&self, id: Uuid) -> AppResult<Candidate> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))
    }

    /// Fully replace a candidate's fields, keeping its identifier.
    pub async fn update(&self, id: Uuid, request: CandidateRequest) -> AppResult<Candidate> {
        request.validate().map_err(validation_error)?;

        let email = normalize_email(&request.email);
        if let Some(existing) = self.store.find_by_email(&email).await? {
            if existing.id != id {
                return Err(AppError::Conflict("Email must be unique".to_string()));
            }
        }

        let candidate = Self::from_request(id, email, request);
        self.store
            .replace(&candidate)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))
    }

    /// Delete a candidate by id.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.store.delete(id).await?;
        if !deleted {
            return Err(AppError::NotFound("Candidate not found".to_string()));
        }
        log::info!("Deleted candidate {}", id);
        Ok(())
    }

    /// Return every candidate matching the given filters.
    pub async fn search(&self, filter: &FilterSpec) -> AppResult<Vec<Candidate>> {
        Ok(self.store.search(filter).await?)
    }

    fn from_request(id: Uuid, email: String, request: CandidateRequest) -> Candidate {
        Candidate {
            id,
            first_name: request.first_name,
            last_name: request.last_name,
            email,
            career_level: request.career_level,
            job_major: request.job_major,
            years_of_experience: request.years_of_experience,
            degree_type: request.degree_type,
            skills: request.skills,
            nationality: request.nationality,
            city: request.city,
            salary: request.salary,
            gender: request.gender,
        }
    }
}
