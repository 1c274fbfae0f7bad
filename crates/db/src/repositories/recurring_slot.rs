use crate::models::DbRecurringSlot;
use chrono::{NaiveTime, Utc};
use eyre::{Result, WrapErr};
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use weekslot_core::models::recurring_slot::MAX_SLOTS_PER_DAY;

/// Inserts a recurring slot into the first free position of its weekday.
///
/// Each position is claimed with `ON CONFLICT DO NOTHING` against
/// `UNIQUE (day_of_week, slot_index)`, so concurrent creators can never push a
/// weekday past its capacity. Returns `None` when every position is taken.
pub async fn create_recurring_slot(
    pool: &Pool<Postgres>,
    day_of_week: i16,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<Option<DbRecurringSlot>> {
    for slot_index in 0..MAX_SLOTS_PER_DAY as i16 {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let recurring_slot = sqlx::query_as::<_, DbRecurringSlot>(
            r#"
            INSERT INTO recurring_slots (id, day_of_week, slot_index, start_time, end_time, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT (day_of_week, slot_index) DO NOTHING
            RETURNING id, day_of_week, slot_index, start_time, end_time, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(day_of_week)
        .bind(slot_index)
        .bind(start_time)
        .bind(end_time)
        .bind(now)
        .fetch_optional(pool)
        .await
        .wrap_err("Failed to insert recurring slot")?;

        if recurring_slot.is_some() {
            tracing::debug!(
                "Recurring slot created: id={}, day_of_week={}, slot_index={}",
                id, day_of_week, slot_index
            );
            return Ok(recurring_slot);
        }
    }

    tracing::debug!("No free slot position left for day_of_week={}", day_of_week);
    Ok(None)
}

pub async fn list_recurring_slots(pool: &Pool<Postgres>) -> Result<Vec<DbRecurringSlot>> {
    let recurring_slots = sqlx::query_as::<_, DbRecurringSlot>(
        r#"
        SELECT id, day_of_week, slot_index, start_time, end_time, created_at, updated_at
        FROM recurring_slots
        ORDER BY created_at ASC, slot_index ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .wrap_err("Failed to list recurring slots")?;

    Ok(recurring_slots)
}
