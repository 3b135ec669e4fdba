//! Submission domain models for the leadform backend.
//!
//! A submission is one filled-out DB 신청 form: applicant contact details,
//! the display summary of the ordered line items, the order total, and an
//! admin-managed status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of a submission, mutated by admin action only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Confirmed,
    Completed,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
        }
    }

    /// Parse a wire value. Returns `None` for anything outside the
    /// pending/confirmed/completed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted form submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: Uuid,
    pub name: String,
    pub affiliation: String,
    pub position: String,
    pub phone: String,
    pub email: String,
    /// Legacy display string; older submissions carry their line items only
    /// here, as `<br>`-separated pseudo-HTML.
    pub items_summary: String,
    pub total_amount: i64,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn is_confirmed(&self) -> bool {
        self.status == SubmissionStatus::Confirmed
    }
}

/// Insert shape for a new submission. Status is always `pending` at creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSubmission {
    #[validate(length(min = 1, max = 255, message = "Applicant name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Affiliation is required"))]
    pub affiliation: String,
    #[validate(length(max = 255))]
    pub position: String,
    #[validate(length(min = 1, max = 50, message = "Phone number is required"))]
    pub phone: String,
    #[validate(email(message = "Applicant email must be a valid email address"))]
    pub email: String,
    pub items_summary: String,
    #[validate(range(min = 0, message = "Total amount must not be negative"))]
    pub total_amount: i64,
}
