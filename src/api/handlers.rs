//! API Handlers
//!
//! HTTP request handlers for identity registration, token issuance,
//! candidate records, search, and report export.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::models::candidate::Candidate;
use crate::models::identity::Identity;
use crate::models::requests::{
    CandidateRequest, HealthCheckResponse, RegisterIdentityRequest, ReportQuery, TokenRequest,
    TokenResponse,
};
use crate::query::FilterSpec;
use crate::service::{CandidateService, IdentityService, ReportService, TokenService};
use crate::utils::error::AppResult;

/// Shared application state for handlers
#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<IdentityService>,
    pub candidate_service: Arc<CandidateService>,
    pub report_service: Arc<ReportService>,
    pub token_service: Arc<TokenService>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
    })
}

/// Register a new identity
pub async fn register_identity(
    State(state): State<AppState>,
    Json(request): Json<RegisterIdentityRequest>,
) -> AppResult<(StatusCode, Json<Identity>)> {
    let identity = state.identity_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(identity)))
}

/// Exchange credentials for a bearer token
pub async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let subject = state
        .identity_service
        .verify_credentials(&request.email, &request.password)
        .await?;

    let access_token = state.token_service.issue(&subject)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Create a candidate record
pub async fn create_candidate(
    State(state): State<AppState>,
    Json(request): Json<CandidateRequest>,
) -> AppResult<(StatusCode, Json<Candidate>)> {
    let candidate = state.candidate_service.create(request).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// Fetch a candidate by id
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Candidate>> {
    let candidate = state.candidate_service.read(id).await?;
    Ok(Json(candidate))
}

/// Fully replace a candidate's fields
pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CandidateRequest>,
) -> AppResult<Json<Candidate>> {
    let candidate = state.candidate_service.update(id, request).await?;
    Ok(Json(candidate))
}

/// Delete a candidate by id
pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.candidate_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search candidates with optional filters
///
/// Query parameters arrive as raw pairs so repeatable parameters like
/// `skills` and `gender` keep every occurrence.
pub async fn search_candidates(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<Candidate>>> {
    let filter = FilterSpec::from_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
    let candidates = state.candidate_service.search(&filter).await?;
    Ok(Json(candidates))
}

/// Export one page of candidates as a CSV attachment
pub async fn generate_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Response> {
    let lines = state
        .report_service
        .generate(query.page, query.page_size)
        .await?;

    let stream = futures::stream::iter(lines.map(Ok::<String, Infallible>));
    let response = (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"candidates_report.csv\"",
            ),
        ],
        Body::from_stream(stream),
    )
        .into_response();
    Ok(response)
}
