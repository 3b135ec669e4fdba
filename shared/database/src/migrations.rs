use anyhow::Result;
use sqlx::PgPool;

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<()> {
    tracing::info!("Running PostgreSQL migrations");

    // Create submissions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS submissions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR NOT NULL,
            affiliation VARCHAR NOT NULL,
            position VARCHAR NOT NULL DEFAULT '',
            phone VARCHAR NOT NULL,
            email VARCHAR NOT NULL,
            items_summary TEXT NOT NULL DEFAULT '',
            total_amount BIGINT NOT NULL DEFAULT 0,
            status VARCHAR NOT NULL DEFAULT 'pending',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create order_items table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS order_items (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            submission_id UUID NOT NULL REFERENCES submissions(id),
            db_type VARCHAR NOT NULL,
            product_name VARCHAR NOT NULL,
            region VARCHAR NOT NULL,
            quantity INTEGER NOT NULL,
            unit_price BIGINT NOT NULL,
            total_price BIGINT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for better performance
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_submissions_status_created_at ON submissions(status, created_at)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_order_items_submission_id ON order_items(submission_id)",
    )
    .execute(pool)
    .await?;

    tracing::info!("PostgreSQL migrations completed successfully");
    Ok(())
}
