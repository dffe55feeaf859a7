//! Report Service
//!
//! Paginated CSV export of candidate records. One page of candidates is
//! pulled from the store and rendered lazily as CSV lines, header first.

use std::sync::Arc;

use crate::models::candidate::Candidate;
use crate::store::CandidateStore;
use crate::utils::error::{AppError, AppResult};

/// Column order for the exported report
const CSV_HEADER: &str = "id,first_name,last_name,email,career_level,job_major,\
years_of_experience,degree_type,skills,nationality,city,salary,gender";

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Service producing CSV report pages
#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn CandidateStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn CandidateStore>) -> Self {
        Self { store }
    }

    /// Generate one page of the candidate report as CSV lines.
    ///
    /// `page` is 1-based and defaults to 1; `page_size` defaults to 10 and
    /// is capped at 100. The returned iterator yields the header row
    /// followed by one line per candidate, each terminated with a newline.
    pub async fn generate(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> AppResult<impl Iterator<Item = String>> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(AppError::Validation(
                "Page must be at least 1".to_string(),
            ));
        }
        if page_size < 1 || page_size > MAX_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "Page size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let offset = i64::from(page - 1) * i64::from(page_size);
        let candidates = self.store.window(offset, i64::from(page_size)).await?;
        log::debug!(
            "Report page {} (size {}) contains {} rows",
            page,
            page_size,
            candidates.len()
        );

        let header = std::iter::once(format!("{}\n", CSV_HEADER));
        let rows = candidates.into_iter().map(|c| format!("{}\n", csv_row(&c)));
        Ok(header.chain(rows))
    }
}

/// Render one candidate as a CSV line.
///
/// Fields are joined with commas without quoting; skills are joined with
/// commas inside the field, so consumers should treat the tail columns
/// positionally from the right when skills are present.
fn csv_row(candidate: &Candidate) -> String {
    [
        candidate.id.to_string(),
        candidate.first_name.clone(),
        candidate.last_name.clone(),
        candidate.email.clone(),
        candidate.career_level.clone(),
        candidate.job_major.clone(),
        candidate.years_of_experience.to_string(),
        candidate.degree_type.clone(),
        candidate.skills.join(","),
        candidate.nationality.clone(),
        candidate.city.clone(),
        candidate.salary.to_string(),
        candidate.gender.to_string(),
    ]
    .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::Gender;
    use crate::store::MemoryCandidateStore;
    use uuid::Uuid;

    fn candidate(n: usize) -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            first_name: format!("First{}", n),
            last_name: format!("Last{}", n),
            email: format!("c{}@example.com", n),
            career_level: "Senior".to_string(),
            job_major: "Computer Science".to_string(),
            years_of_experience: n as i32,
            degree_type: "Bachelor".to_string(),
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            nationality: "JO".to_string(),
            city: "Amman".to_string(),
            salary: 50_000.0,
            gender: Gender::NotSpecified,
        }
    }

    async fn seeded(count: usize) -> ReportService {
        let store = Arc::new(MemoryCandidateStore::new());
        for n in 0..count {
            store.insert(&candidate(n)).await.unwrap();
        }
        ReportService::new(store)
    }

    #[tokio::test]
    async fn test_first_page_defaults() {
        let service = seeded(3).await;
        let lines: Vec<String> = service.generate(None, None).await.unwrap().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id,first_name,"));
        assert!(lines[1].contains("First0"));
    }

    #[tokio::test]
    async fn test_second_page_has_remainder() {
        let service = seeded(15).await;
        let lines: Vec<String> = service.generate(Some(2), Some(10)).await.unwrap().collect();
        // header plus the 5 rows past the first ten
        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("First10"));
        assert!(lines[5].contains("First14"));
    }

    #[tokio::test]
    async fn test_page_past_end_is_header_only() {
        let service = seeded(3).await;
        let lines: Vec<String> = service.generate(Some(5), Some(10)).await.unwrap().collect();
        assert_eq!(lines.len(), 1);
    }

    #[tokio::test]
    async fn test_page_zero_rejected() {
        let service = seeded(0).await;
        let err = service.generate(Some(0), None).await.map(|_| ()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_page_size_bounds() {
        let service = seeded(0).await;
        assert!(matches!(
            service.generate(None, Some(0)).await.map(|_| ()).unwrap_err(),
            AppError::Validation(_)
        ));
        assert!(matches!(
            service.generate(None, Some(101)).await.map(|_| ()).unwrap_err(),
            AppError::Validation(_)
        ));
        assert!(service.generate(None, Some(100)).await.is_ok());
    }

    #[test]
    fn test_csv_row_field_order() {
        let c = candidate(7);
        let row = csv_row(&c);
        assert!(row.starts_with(&c.id.to_string()));
        assert!(row.contains("First7,Last7,c7@example.com"));
        assert!(row.contains("Rust,SQL"));
        assert!(row.ends_with("Not Specified"));
    }
}
