//! Order Item Repository
//!
//! Persistence for the structured line items belonging to a submission.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use leadform_models::{NewOrderItem, OrderItem};

pub struct OrderItemRepository {
    pool: PgPool,
}

impl OrderItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the line items of a freshly created submission.
    pub async fn create_for_submission(
        &self,
        submission_id: Uuid,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderItem>> {
        let mut created = Vec::with_capacity(items.len());

        for item in items {
            let row: OrderItem = sqlx::query_as(
                r#"
                INSERT INTO order_items
                    (submission_id, db_type, product_name, region,
                     quantity, unit_price, total_price)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, submission_id, db_type, product_name, region,
                          quantity, unit_price, total_price, created_at
                "#,
            )
            .bind(submission_id)
            .bind(&item.db_type)
            .bind(&item.product_name)
            .bind(&item.region)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.total_price)
            .fetch_one(&self.pool)
            .await
            .context("Failed to create order item")?;

            created.push(row);
        }

        Ok(created)
    }

    /// All order items belonging to the given submissions.
    pub async fn find_by_submission_ids(&self, ids: &[Uuid]) -> Result<Vec<OrderItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<OrderItem> = sqlx::query_as(
            r#"
            SELECT id, submission_id, db_type, product_name, region,
                   quantity, unit_price, total_price, created_at
            FROM order_items
            WHERE submission_id = ANY($1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch order items by submission ids")?;

        Ok(rows)
    }

    /// Remove the order items of the given submissions (run before the
    /// submissions themselves are deleted).
    pub async fn delete_by_submission_ids(&self, ids: &[Uuid]) -> Result<u64> {
        let result = sqlx::query("DELETE FROM order_items WHERE submission_id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .context("Failed to delete order items")?;

        Ok(result.rows_affected())
    }
}
