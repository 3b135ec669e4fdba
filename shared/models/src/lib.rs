//! # Leadform Domain Models
//!
//! Core domain models for the leadform DB 신청 backend: persisted
//! submissions and order line items, plus the ephemeral shapes the monthly
//! aggregation report is built from.
//!
//! Inbound shapes (`NewSubmission`, `NewOrderItem`) carry validator rules;
//! persisted and report shapes are plain serde types. Report wire names are
//! camelCase for compatibility with the existing admin dashboard.

pub mod aggregation;
pub mod order_item;
pub mod submission;

pub use aggregation::*;
pub use order_item::*;
pub use submission::*;
