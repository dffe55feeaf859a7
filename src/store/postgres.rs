//! PostgreSQL Storage Adapter
//!
//! Production implementation of the store traits. Each adapter is pinned to
//! one partition table at construction time, so a request can never mix
//! live and shadow data. Queries are built at runtime because the table
//! name is partition-dependent and the search predicate is dynamic.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{Candidate, Gender, IdentityRecord};
use crate::query::FilterSpec;

use super::{CandidateStore, IdentityStore, StoreError, StoreResult};

const CANDIDATE_COLUMNS: &str = "id, first_name, last_name, email, career_level, job_major, \
     years_of_experience, degree_type, skills, nationality, city, salary, gender";

fn map_sqlx(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate;
        }
    }
    StoreError::Database(err)
}

/// Identity partition backed by Postgres
pub struct PgIdentityStore {
    pool: PgPool,
    table: &'static str,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool, table: &'static str) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<IdentityRecord>> {
        let sql = format!(
            "SELECT id, first_name, last_name, email, secret_hash FROM {} WHERE email = $1",
            self.table
        );
        sqlx::query_as::<_, IdentityRecord>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn insert(&self, record: &IdentityRecord) -> StoreResult<()> {
        let sql = format!(
            "INSERT INTO {} (id, first_name, last_name, email, secret_hash) \
             VALUES ($1, $2, $3, $4, $5)",
            self.table
        );
        sqlx::query(&sql)
            .bind(record.id)
            .bind(&record.first_name)
            .bind(&record.last_name)
            .bind(&record.email)
            .bind(&record.secret_hash)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}

/// Candidate partition backed by Postgres
pub struct PgCandidateStore {
    pool: PgPool,
    table: &'static str,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool, table: &'static str) -> Self {
        Self { pool, table }
    }

    async fn fetch_one_by(&self, column: &str, sql_value: CandidateKey<'_>) -> StoreResult<Option<Candidate>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = $1",
            CANDIDATE_COLUMNS, self.table, column
        );
        let query = sqlx::query_as::<_, CandidateRow>(&sql);
        let row = match sql_value {
            CandidateKey::Id(id) => query.bind(id),
            CandidateKey::Email(email) => query.bind(email),
        }
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Candidate::try_from).transpose()
    }
}

enum CandidateKey<'a> {
    Id(Uuid),
    Email(&'a str),
}

/// Raw candidate row; gender is stored as text and parsed on the way out
#[derive(sqlx::FromRow)]
struct CandidateRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    career_level: String,
    job_major: String,
    years_of_experience: i32,
    degree_type: String,
    skills: Vec<String>,
    nationality: String,
    city: String,
    salary: f64,
    gender: String,
}

impl TryFrom<CandidateRow> for Candidate {
    type Error = StoreError;

    fn try_from(row: CandidateRow) -> Result<Self, Self::Error> {
        let gender = Gender::from_str(&row.gender).map_err(StoreError::Backend)?;
        Ok(Candidate {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            career_level: row.career_level,
            job_major: row.job_major,
            years_of_experience: row.years_of_experience,
            degree_type: row.degree_type,
            skills: row.skills,
            nationality: row.nationality,
            city: row.city,
            salary: row.salary,
            gender,
        })
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn insert(&self, candidate: &Candidate) -> StoreResult<()> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
            self.table, CANDIDATE_COLUMNS
        );
        sqlx::query(&sql)
            .bind(candidate.id)
            .bind(&candidate.first_name)
            .bind(&candidate.last_name)
            .bind(&candidate.email)
            .bind(&candidate.career_level)
            .bind(&candidate.job_major)
            .bind(candidate.years_of_experience)
            .bind(&candidate.degree_type)
            .bind(&candidate.skills)
            .bind(&candidate.nationality)
            .bind(&candidate.city)
            .bind(candidate.salary)
            .bind(candidate.gender.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Candidate>> {
        self.fetch_one_by("id", CandidateKey::Id(id)).await
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Candidate>> {
        self.fetch_one_by("email", CandidateKey::Email(email)).await
    }

    async fn replace(&self, candidate: &Candidate) -> StoreResult<Option<Candidate>> {
        let sql = format!(
            "UPDATE {} SET first_name = $2, last_name = $3, email = $4, career_level = $5, \
             job_major = $6, years_of_experience = $7, degree_type = $8, skills = $9, \
             nationality = $10, city = $11, salary = $12, gender = $13 \
             WHERE id = $1 RETURNING {}",
            self.table, CANDIDATE_COLUMNS
        );
        let row = sqlx::query_as::<_, CandidateRow>(&sql)
            .bind(candidate.id)
            .bind(&candidate.first_name)
            .bind(&candidate.last_name)
            .bind(&candidate.email)
            .bind(&candidate.career_level)
            .bind(&candidate.job_major)
            .bind(candidate.years_of_experience)
            .bind(&candidate.degree_type)
            .bind(&candidate.skills)
            .bind(&candidate.nationality)
            .bind(&candidate.city)
            .bind(candidate.salary)
            .bind(candidate.gender.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Candidate::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, filter: &FilterSpec) -> StoreResult<Vec<Candidate>> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM {} WHERE 1=1",
            CANDIDATE_COLUMNS, self.table
        ));
        filter.push_predicate(&mut qb);

        let rows = qb
            .build_query_as::<CandidateRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Candidate::try_from).collect()
    }

    async fn window(&self, offset: i64, limit: i64) -> StoreResult<Vec<Candidate>> {
        let sql = format!(
            "SELECT {} FROM {} OFFSET $1 LIMIT $2",
            CANDIDATE_COLUMNS, self.table
        );
        let rows = sqlx::query_as::<_, CandidateRow>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Candidate::try_from).collect()
    }
}
