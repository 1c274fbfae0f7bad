use crate::models::{DbExceptionUpsert, DbSlotException};
use chrono::{NaiveDate, Utc};
use eyre::{Result, WrapErr};
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use weekslot_core::models::exception::{ExceptionChange, TimeChange};

const FOREIGN_KEY_VIOLATION: &str = "23503";

pub async fn list_exceptions_on_dates(
    pool: &Pool<Postgres>,
    dates: &[NaiveDate],
) -> Result<Vec<DbSlotException>> {
    let exceptions = sqlx::query_as::<_, DbSlotException>(
        r#"
        SELECT id, recurring_slot_id, date, start_time, end_time, is_deleted, created_at, updated_at
        FROM slot_exceptions
        WHERE date = ANY($1)
        ORDER BY date ASC, created_at ASC
        "#,
    )
    .bind(dates)
    .fetch_all(pool)
    .await
    .wrap_err("Failed to list slot exceptions")?;

    Ok(exceptions)
}

/// Creates or updates the exception for `(recurring_slot_id, date)` in one statement.
///
/// An override writes the time fields it carries, keeps the ones marked
/// [`TimeChange::Keep`] and clears `is_deleted`; a cancel sets `is_deleted`
/// and keeps whatever times are stored. `inserted` is derived
/// from `xmax = 0`, which only holds for a freshly inserted tuple.
///
/// Returns `None` when the recurring slot does not exist.
pub async fn apply_exception(
    pool: &Pool<Postgres>,
    recurring_slot_id: Uuid,
    date: NaiveDate,
    change: &ExceptionChange,
) -> Result<Option<DbExceptionUpsert>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let (start_time, end_time, is_deleted) = match *change {
        ExceptionChange::Override {
            start_time,
            end_time,
        } => (start_time, end_time, false),
        ExceptionChange::Cancel => (TimeChange::Keep, TimeChange::Keep, true),
    };

    tracing::debug!(
        "Applying exception: slot={}, date={}, is_deleted={}",
        recurring_slot_id, date, is_deleted
    );

    let result = sqlx::query_as::<_, DbExceptionUpsert>(
        r#"
        INSERT INTO slot_exceptions
            (id, recurring_slot_id, date, start_time, end_time, is_deleted, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        ON CONFLICT (recurring_slot_id, date)
        DO UPDATE SET
            start_time = CASE WHEN $8 THEN slot_exceptions.start_time ELSE EXCLUDED.start_time END,
            end_time = CASE WHEN $9 THEN slot_exceptions.end_time ELSE EXCLUDED.end_time END,
            is_deleted = EXCLUDED.is_deleted,
            updated_at = EXCLUDED.updated_at
        RETURNING id, recurring_slot_id, date, start_time, end_time, is_deleted, created_at, updated_at,
            (xmax = 0) AS inserted
        "#,
    )
    .bind(id)
    .bind(recurring_slot_id)
    .bind(date)
    .bind(start_time.apply(None))
    .bind(end_time.apply(None))
    .bind(is_deleted)
    .bind(now)
    .bind(start_time.is_keep())
    .bind(end_time.is_keep())
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => Ok(Some(row)),
        Err(sqlx::Error::Database(db_err))
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) =>
        {
            tracing::debug!("Recurring slot not found: id={}", recurring_slot_id);
            Ok(None)
        }
        Err(e) => Err(e).wrap_err("Failed to apply slot exception"),
    }
}
