//! Submission Repository
//!
//! CRUD operations for form submissions.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use leadform_models::{NewSubmission, Submission, SubmissionStatus};

/// Optional admin list filters: exact status match plus a free-text search
/// over the applicant contact columns.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    pub status: Option<SubmissionStatus>,
    pub search: Option<String>,
}

pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new submission with status `pending`.
    pub async fn create(&self, submission: &NewSubmission) -> Result<Submission> {
        let row: SubmissionRow = sqlx::query_as(
            r#"
            INSERT INTO submissions
                (name, affiliation, position, phone, email, items_summary,
                 total_amount, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending')
            RETURNING id, name, affiliation, position, phone, email,
                      items_summary, total_amount, status, created_at
            "#,
        )
        .bind(&submission.name)
        .bind(&submission.affiliation)
        .bind(&submission.position)
        .bind(&submission.phone)
        .bind(&submission.email)
        .bind(&submission.items_summary)
        .bind(submission.total_amount)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create submission")?;

        Ok(row.into())
    }

    /// List submissions for the admin dashboard, newest first.
    pub async fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>> {
        let status = filter.status.map(|s| s.as_str().to_string());
        let search = filter
            .search
            .as_ref()
            .map(|term| format!("%{}%", term.trim()));

        let rows: Vec<SubmissionRow> = sqlx::query_as(
            r#"
            SELECT id, name, affiliation, position, phone, email,
                   items_summary, total_amount, status, created_at
            FROM submissions
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL
                   OR name ILIKE $2 OR affiliation ILIKE $2
                   OR phone ILIKE $2 OR email ILIKE $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list submissions")?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Update the status of one submission. Returns `None` for an unknown id.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>> {
        let row: Option<SubmissionRow> = sqlx::query_as(
            r#"
            UPDATE submissions
            SET status = $2
            WHERE id = $1
            RETURNING id, name, affiliation, position, phone, email,
                      items_summary, total_amount, status, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update submission status")?;

        Ok(row.map(|r| r.into()))
    }

    /// Delete one submission. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete submission")?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a batch of submissions. Returns the number of rows removed.
    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .context("Failed to delete submissions in bulk")?;

        Ok(result.rows_affected())
    }

    /// Confirmed submissions created within `[start, end]`, oldest first.
    pub async fn find_confirmed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Submission>> {
        let rows: Vec<SubmissionRow> = sqlx::query_as(
            r#"
            SELECT id, name, affiliation, position, phone, email,
                   items_summary, total_amount, status, created_at
            FROM submissions
            WHERE status = 'confirmed'
              AND created_at >= $1
              AND created_at <= $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch confirmed submissions")?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

#[derive(Debug, FromRow)]
struct SubmissionRow {
    id: Uuid,
    name: String,
    affiliation: String,
    position: String,
    phone: String,
    email: String,
    items_summary: String,
    total_amount: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<SubmissionRow> for Submission {
    fn from(row: SubmissionRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            affiliation: row.affiliation,
            position: row.position,
            phone: row.phone,
            email: row.email,
            items_summary: row.items_summary,
            total_amount: row.total_amount,
            status: SubmissionStatus::parse(&row.status).unwrap_or(SubmissionStatus::Pending),
            created_at: row.created_at,
        }
    }
}
