//! Identity Service
//!
//! Registration and credential verification for the identities allowed to
//! call the protected endpoints.

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::models::identity::{Identity, IdentityRecord};
use crate::models::requests::RegisterIdentityRequest;
use crate::store::IdentityStore;
use crate::utils::error::{validation_error, AppError, AppResult};
use crate::utils::security::{hash_password, verify_password};
use crate::utils::validation::normalize_email;

/// Service for identity registration and credential checks
#[derive(Clone)]
pub struct IdentityService {
    store: Arc<dyn IdentityStore>,
}

impl IdentityService {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// Register a new identity.
    ///
    /// The email is normalized before storage and must not already be in
    /// use. The secret is stored only as a bcrypt hash.
    pub async fn register(&self, request: RegisterIdentityRequest) -> AppResult<Identity> {
        request.validate().map_err(validation_error)?;

        let email = normalize_email(&request.email);

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email must be unique".to_string()));
        }

        let secret_hash = hash_password(&request.password)?;
        let record = IdentityRecord {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            email,
            secret_hash,
        };

        // The unique index backstops the pre-check under concurrent inserts.
        self.store.insert(&record).await?;
        log::info!("Registered identity {}", record.email);
        Ok(record.into())
    }

    /// Verify a credential pair and return the subject to issue a token for.
    ///
    /// Unknown emails and wrong secrets produce the same error so callers
    /// cannot probe which emails are registered.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<String> {
        let email = normalize_email(email);

        let record = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let valid = verify_password(password, &record.secret_hash)?;
        if !valid {
            return Err(AppError::Unauthorized);
        }

        Ok(record.email)
    }

    /// Check that the subject of a validated token still exists.
    ///
    /// A deleted identity loses access even while its tokens are unexpired.
    pub async fn authorize(&self, subject: &str) -> AppResult<Identity> {
        let record = self
            .store
            .find_by_email(subject)
            .await?
            .ok_or(AppError::Unauthorized)?;
        Ok(record.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryIdentityStore;

    fn service() -> (IdentityService, Arc<MemoryIdentityStore>) {
        let store = Arc::new(MemoryIdentityStore::new());
        (IdentityService::new(store.clone()), store)
    }

    fn request(email: &str) -> RegisterIdentityRequest {
        RegisterIdentityRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            password: "s3cret-passw0rd".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_returns_identity_without_hash() {
        let (service, _) = service();
        let identity = service.register(request("jane@example.com")).await.unwrap();
        assert_eq!(identity.email, "jane@example.com");
        assert_eq!(identity.first_name, "Jane");
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let (service, _) = service();
        let identity = service
            .register(request("  Jane@Example.COM "))
            .await
            .unwrap();
        assert_eq!(identity.email, "jane@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (service, _) = service();
        service.register(request("jane@example.com")).await.unwrap();
        let err = service
            .register(request("JANE@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let (service, _) = service();
        let err = service.register(request("not-an-email")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_verify_credentials_success() {
        let (service, _) = service();
        service.register(request("jane@example.com")).await.unwrap();
        let subject = service
            .verify_credentials("jane@example.com", "s3cret-passw0rd")
            .await
            .unwrap();
        assert_eq!(subject, "jane@example.com");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_indistinguishable() {
        let (service, _) = service();
        service.register(request("jane@example.com")).await.unwrap();

        let wrong_password = service
            .verify_credentials("jane@example.com", "wrong")
            .await
            .unwrap_err();
        let unknown_email = service
            .verify_credentials("nobody@example.com", "s3cret-passw0rd")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::Unauthorized));
        assert!(matches!(unknown_email, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_authorize_rejects_deleted_identity() {
        let (service, store) = service();
        service.register(request("jane@example.com")).await.unwrap();
        assert!(service.authorize("jane@example.com").await.is_ok());

        store.remove("jane@example.com").unwrap();
        let err = service.authorize("jane@example.com").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
