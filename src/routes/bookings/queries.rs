use sqlx::{PgPool, Result};
use uuid::Uuid;

use super::BookingRow;
use crate::bookings::BookingStatus;

pub async fn list_bookings(pool: &PgPool) -> Result<Vec<BookingRow>> {
    let rows = sqlx::query_as::<_, BookingRow>(
        r#"
        SELECT b.id, b.reference, c.name AS client_name, v.label AS vehicle_label,
               b.status, b.starts_at, b.ends_at
        FROM bookings b
        JOIN clients c ON c.id = b.client_id
        LEFT JOIN vehicles v ON v.id = b.vehicle_id
        ORDER BY b.starts_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_status(pool: &PgPool, id: Uuid) -> Result<Option<String>> {
    let status = sqlx::query_scalar::<_, String>(
        r#"
        SELECT status FROM bookings WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(status)
}

/// Moves a booking from `from` to `to`. Returns `None` when the row no longer has
/// status `from`, i.e. someone else moved it first.
pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    from: BookingStatus,
    to: BookingStatus,
) -> Result<Option<BookingRow>> {
    let row = sqlx::query_as::<_, BookingRow>(
        r#"
        WITH updated AS (
            UPDATE bookings
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING id, reference, client_id, vehicle_id, status, starts_at, ends_at
        )
        SELECT u.id, u.reference, c.name AS client_name, v.label AS vehicle_label,
               u.status, u.starts_at, u.ends_at
        FROM updated u
        JOIN clients c ON c.id = u.client_id
        LEFT JOIN vehicles v ON v.id = u.vehicle_id
        "#,
    )
    .bind(id)
    .bind(from.as_str())
    .bind(to.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
