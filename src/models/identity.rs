//! Identity Model
//!
//! Account holders capable of authenticating and performing candidate
//! operations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity representation for external API responses
///
/// Never carries the credential hash; use [`IdentityRecord`] for storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier, generated at registration
    pub id: Uuid,

    pub first_name: String,
    pub last_name: String,

    /// Email address (unique key, doubles as the token subject)
    pub email: String,
}

/// Internal identity representation including the bcrypt secret hash
///
/// Used by the credential store only. The hash is write-only from the
/// caller's perspective and is never serialized into a response.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IdentityRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub secret_hash: String,
}

impl From<IdentityRecord> for Identity {
    /// Strips the secret hash so it cannot leak into API responses
    fn from(record: IdentityRecord) -> Self {
        Identity {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_conversion_drops_hash() {
        let record = IdentityRecord {
            id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            secret_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
        };

        let identity: Identity = record.clone().into();
        assert_eq!(identity.id, record.id);
        assert_eq!(identity.email, record.email);

        let json = serde_json::to_string(&identity).unwrap();
        assert!(!json.contains("secret_hash"));
        assert!(!json.contains("$2b$"));
    }
}
