use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create recurring_slots table; (day_of_week, slot_index) caps each weekday at two rows
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recurring_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            day_of_week SMALLINT NOT NULL,
            slot_index SMALLINT NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
            CONSTRAINT valid_slot_index CHECK (slot_index IN (0, 1)),
            CONSTRAINT recurring_slots_day_capacity UNIQUE (day_of_week, slot_index)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create slot_exceptions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slot_exceptions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            recurring_slot_id UUID NOT NULL REFERENCES recurring_slots(id) ON DELETE CASCADE,
            date DATE NOT NULL,
            start_time TIME NULL,
            end_time TIME NULL,
            is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT slot_exceptions_slot_date UNIQUE (recurring_slot_id, date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_slot_exceptions_date ON slot_exceptions(date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
