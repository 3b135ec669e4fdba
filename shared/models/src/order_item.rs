//! Order item domain models.
//!
//! Newer submissions persist one `OrderItem` row per selected line item
//! (vendor type x product x region). Older submissions have no rows here
//! and carry their items only inside `Submission::items_summary`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// One persisted order line item belonging to a submission.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct OrderItem {
    pub id: Uuid,
    pub submission_id: Uuid,
    /// Vendor type code, e.g. `"A"` or `"A업체"`; both forms occur in
    /// historical data.
    pub db_type: String,
    /// Raw product name; may redundantly embed the vendor prefix and a
    /// trailing `(region)` suffix.
    pub product_name: String,
    pub region: String,
    pub quantity: i32,
    pub unit_price: i64,
    /// quantity x unit_price, computed at submit time. The stored value is
    /// trusted downstream and never re-derived.
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for an order line item, as received from the form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOrderItem {
    #[validate(length(min = 1, max = 50, message = "Vendor type is required"))]
    pub db_type: String,
    #[validate(length(min = 1, max = 255, message = "Product name is required"))]
    pub product_name: String,
    #[validate(length(min = 1, max = 255, message = "Region is required"))]
    pub region: String,
    #[validate(range(min = 1, message = "Quantity must be a positive integer"))]
    pub quantity: i32,
    #[validate(range(min = 0))]
    pub unit_price: i64,
    #[validate(range(min = 0))]
    pub total_price: i64,
}
