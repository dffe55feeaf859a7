//! Data Partition Selection
//!
//! The service keeps two parallel sets of tables: a live partition that
//! serves production traffic and a shadow partition used for staging data.
//! Which set a deployment reads and writes is decided once at startup from
//! configuration and never changes for the lifetime of the process.

/// Table names for one partition of the data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub identities: &'static str,
    pub candidates: &'static str,
}

impl Partition {
    /// Select the partition for the given mode.
    ///
    /// `live` picks the production tables; anything else falls back to the
    /// shadow tables.
    pub fn select(live: bool) -> Self {
        if live {
            Self {
                identities: "identities",
                candidates: "candidates",
            }
        } else {
            Self {
                identities: "shadow_identities",
                candidates: "shadow_candidates",
            }
        }
    }
}
