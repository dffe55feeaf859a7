//! Query Filter Engine
//!
//! Compiles the open set of optional search parameters into a single
//! candidate predicate. The engine accumulates typed clauses (exact match,
//! set containment, set membership, keyword substring) and offers two
//! compile targets: a SQL predicate for the Postgres store and direct
//! in-memory evaluation for the memory store. All per-field special-casing
//! (numeric attributes matched by their textual form, skills matched by
//! element membership) lives here and nowhere else.
//!
//! Absent parameters and empty strings contribute no clause; a literal `0`
//! for `years_of_experience` or `salary` is a real filter value. A spec
//! with no clauses matches every record.

use std::str::FromStr;

use sqlx::{Postgres, QueryBuilder};
use thiserror::Error;
use uuid::Uuid;

use crate::models::Candidate;
use crate::utils::error::AppError;

/// Errors produced while parsing request parameters into a filter
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid candidate id: {0}")]
    InvalidId(String),

    #[error("Invalid value for {param}: {value}")]
    InvalidNumber { param: String, value: String },
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// String-typed candidate attributes usable in exact-match clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    FirstName,
    LastName,
    Email,
    CareerLevel,
    JobMajor,
    DegreeType,
    Nationality,
    City,
}

impl TextField {
    const ALL: [TextField; 8] = [
        TextField::FirstName,
        TextField::LastName,
        TextField::Email,
        TextField::CareerLevel,
        TextField::JobMajor,
        TextField::DegreeType,
        TextField::Nationality,
        TextField::City,
    ];

    fn column(self) -> &'static str {
        match self {
            TextField::FirstName => "first_name",
            TextField::LastName => "last_name",
            TextField::Email => "email",
            TextField::CareerLevel => "career_level",
            TextField::JobMajor => "job_major",
            TextField::DegreeType => "degree_type",
            TextField::Nationality => "nationality",
            TextField::City => "city",
        }
    }

    fn get(self, candidate: &Candidate) -> &str {
        match self {
            TextField::FirstName => &candidate.first_name,
            TextField::LastName => &candidate.last_name,
            TextField::Email => &candidate.email,
            TextField::CareerLevel => &candidate.career_level,
            TextField::JobMajor => &candidate.job_major,
            TextField::DegreeType => &candidate.degree_type,
            TextField::Nationality => &candidate.nationality,
            TextField::City => &candidate.city,
        }
    }
}

/// One accumulated filter clause
#[derive(Debug, Clone, PartialEq)]
enum Clause {
    /// Exact match on the candidate identifier
    IdEq(Uuid),
    /// Exact match on a string attribute
    TextEq(TextField, String),
    /// Exact match on years of experience (zero is a valid value)
    ExperienceEq(i32),
    /// Exact match on salary (zero is a valid value)
    SalaryEq(f64),
    /// Stored skill list must contain every supplied value
    SkillsAll(Vec<String>),
    /// Gender must equal any of the supplied values
    GenderAny(Vec<String>),
    /// Cross-field keyword group, ANDed with the structured clauses
    Keyword(String),
}

/// Compiled, request-scoped representation of a search request
///
/// Built once per request from the raw query pairs, then handed to a store
/// backend for execution. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    clauses: Vec<Clause>,
}

impl FilterSpec {
    /// Build a filter from raw query pairs
    ///
    /// The parameter set is open: unknown names are ignored, repeated
    /// `skills` and `gender` values accumulate, and an empty value is
    /// equivalent to an absent parameter (there is no way to filter for
    /// "empty value" through this engine).
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut clauses = Vec::new();
        let mut skills = Vec::new();
        let mut genders = Vec::new();
        let mut keyword = None;

        for (name, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match name {
                "_id" => {
                    let id = Uuid::from_str(value)
                        .map_err(|_| FilterError::InvalidId(value.to_string()))?;
                    clauses.push(Clause::IdEq(id));
                }
                "first_name" => clauses.push(Clause::TextEq(TextField::FirstName, value.into())),
                "last_name" => clauses.push(Clause::TextEq(TextField::LastName, value.into())),
                "email" => clauses.push(Clause::TextEq(TextField::Email, value.into())),
                "career_level" => {
                    clauses.push(Clause::TextEq(TextField::CareerLevel, value.into()))
                }
                "job_major" => clauses.push(Clause::TextEq(TextField::JobMajor, value.into())),
                "degree_type" => clauses.push(Clause::TextEq(TextField::DegreeType, value.into())),
                "nationality" => {
                    clauses.push(Clause::TextEq(TextField::Nationality, value.into()))
                }
                "city" => clauses.push(Clause::TextEq(TextField::City, value.into())),
                "years_of_experience" => {
                    let years = value.parse::<i32>().map_err(|_| FilterError::InvalidNumber {
                        param: "years_of_experience".to_string(),
                        value: value.to_string(),
                    })?;
                    clauses.push(Clause::ExperienceEq(years));
                }
                "salary" => {
                    let salary = value.parse::<f64>().map_err(|_| FilterError::InvalidNumber {
                        param: "salary".to_string(),
                        value: value.to_string(),
                    })?;
                    clauses.push(Clause::SalaryEq(salary));
                }
                "skills" => skills.push(value.to_string()),
                "gender" => genders.push(value.to_string()),
                "keyword" => keyword = Some(value.to_string()),
                _ => {}
            }
        }

        if !skills.is_empty() {
            clauses.push(Clause::SkillsAll(skills));
        }
        if !genders.is_empty() {
            clauses.push(Clause::GenderAny(genders));
        }
        if let Some(term) = keyword {
            clauses.push(Clause::Keyword(term));
        }

        Ok(Self { clauses })
    }

    /// True when no parameter contributed a clause
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate the whole predicate against a single candidate
    ///
    /// Used by the in-memory store; mirrors the SQL rendering exactly.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        self.clauses.iter().all(|clause| match clause {
            Clause::IdEq(id) => candidate.id == *id,
            Clause::TextEq(field, value) => field.get(candidate) == value,
            Clause::ExperienceEq(years) => candidate.years_of_experience == *years,
            Clause::SalaryEq(salary) => candidate.salary == *salary,
            Clause::SkillsAll(values) => values.iter().all(|v| candidate.skills.contains(v)),
            Clause::GenderAny(values) => {
                values.iter().any(|v| v == candidate.gender.as_str())
            }
            Clause::Keyword(term) => keyword_matches(term, candidate),
        })
    }

    /// Render the predicate into a SQL `WHERE` tail
    ///
    /// The caller supplies a builder already holding `... WHERE 1=1`; each
    /// clause appends an ` AND ...` fragment with bound parameters, so an
    /// empty filter leaves the query matching every row.
    pub fn push_predicate(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for clause in &self.clauses {
            qb.push(" AND ");
            match clause {
                Clause::IdEq(id) => {
                    qb.push("id = ");
                    qb.push_bind(*id);
                }
                Clause::TextEq(field, value) => {
                    qb.push(field.column());
                    qb.push(" = ");
                    qb.push_bind(value.clone());
                }
                Clause::ExperienceEq(years) => {
                    qb.push("years_of_experience = ");
                    qb.push_bind(*years);
                }
                Clause::SalaryEq(salary) => {
                    qb.push("salary = ");
                    qb.push_bind(*salary);
                }
                Clause::SkillsAll(values) => {
                    qb.push("skills @> ");
                    qb.push_bind(values.clone());
                }
                Clause::GenderAny(values) => {
                    qb.push("gender = ANY(");
                    qb.push_bind(values.clone());
                    qb.push(")");
                }
                Clause::Keyword(term) => push_keyword_group(qb, term),
            }
        }
    }
}

/// In-memory evaluation of the cross-field keyword group
fn keyword_matches(term: &str, candidate: &Candidate) -> bool {
    let needle = term.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    TextField::ALL.iter().any(|f| contains(f.get(candidate)))
        || contains(&candidate.id.to_string())
        || contains(&candidate.years_of_experience.to_string())
        || contains(&candidate.salary.to_string())
        || contains(candidate.gender.as_str())
        || candidate.skills.iter().any(|s| s == term)
}

/// SQL rendering of the cross-field keyword group
///
/// String attributes get a case-insensitive substring match; numeric
/// attributes and the identifier are cast to text first; skills match by
/// exact element membership rather than substring.
fn push_keyword_group(qb: &mut QueryBuilder<'_, Postgres>, term: &str) {
    let pattern = like_pattern(term);

    qb.push("(");
    for field in TextField::ALL {
        qb.push(field.column());
        qb.push(" ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR ");
    }
    qb.push("id::text ILIKE ");
    qb.push_bind(pattern.clone());
    qb.push(" OR years_of_experience::text ILIKE ");
    qb.push_bind(pattern.clone());
    qb.push(" OR salary::text ILIKE ");
    qb.push_bind(pattern.clone());
    qb.push(" OR gender ILIKE ");
    qb.push_bind(pattern);
    qb.push(" OR ");
    qb.push_bind(term.to_string());
    qb.push(" = ANY(skills))");
}

/// Escape LIKE metacharacters and wrap the term for substring matching
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{}%", escaped)
}
