pub mod queries;
pub mod routes;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::bookings::{
    get_booking_board_heading, resolve_booking_board_variant, resolve_booking_view_variant, BookingBoardVariant,
    BookingStatus, BookingViewVariant,
};

// MODELS

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub reference: String,
    pub client_name: String,
    pub vehicle_label: Option<String>,
    pub status: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BookingCard {
    pub id: Uuid,
    pub reference: String,
    pub client_name: String,
    pub vehicle_label: Option<String>,
    pub status: BookingStatus,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BoardColumn {
    pub status: BookingStatus,
    pub bookings: Vec<BookingCard>,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub view: BookingViewVariant,
    pub board: BookingBoardVariant,
    pub heading: &'static str,
    pub read_only: bool,
    pub columns: Vec<BoardColumn>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
}

// HELPER FUNCTIONS

impl BoardResponse {
    /// Board for an already normalized `view` value.
    pub fn for_view(view: Option<&str>, rows: Vec<BookingRow>) -> Self {
        let board = resolve_booking_board_variant(view);
        BoardResponse {
            view: resolve_booking_view_variant(view),
            board,
            heading: get_booking_board_heading(board),
            read_only: board.is_read_only(),
            columns: group_into_columns(rows),
        }
    }
}

impl BookingRow {
    pub fn into_card(self) -> Option<BookingCard> {
        let status = BookingStatus::parse(&self.status)?;
        Some(BookingCard {
            id: self.id,
            reference: self.reference,
            client_name: self.client_name,
            vehicle_label: self.vehicle_label,
            status,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
        })
    }
}

/// One column per lifecycle status, in lifecycle order. Rows keep their input order
/// inside a column; rows with an unrecognised status are left off the board.
pub fn group_into_columns(rows: Vec<BookingRow>) -> Vec<BoardColumn> {
    let mut columns: Vec<BoardColumn> = BookingStatus::LIFECYCLE
        .into_iter()
        .map(|status| BoardColumn { status, bookings: Vec::new() })
        .collect();

    for row in rows {
        let (id, raw_status) = (row.id, row.status.clone());
        match row.into_card() {
            Some(card) => {
                if let Some(column) = columns.iter_mut().find(|c| c.status == card.status) {
                    column.bookings.push(card);
                }
            }
            None => warn!(booking_id = %id, status = %raw_status, "booking has unknown status"),
        }
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(reference: &str, status: &str) -> BookingRow {
        BookingRow {
            id: Uuid::new_v4(),
            reference: reference.to_string(),
            client_name: "Client".to_string(),
            vehicle_label: None,
            status: status.to_string(),
            starts_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2026, 3, 4, 17, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_group_into_columns() {
        let columns = group_into_columns(vec![
            row("BK-1", "quoted"),
            row("BK-2", "on_hire"),
            row("BK-3", "quoted"),
            row("BK-4", "archived"),
        ]);

        assert_eq!(columns.len(), BookingStatus::LIFECYCLE.len());
        assert_eq!(columns[0].status, BookingStatus::Inquiry);
        assert!(columns[0].bookings.is_empty());

        let quoted: Vec<&str> = columns[1].bookings.iter().map(|b| b.reference.as_str()).collect();
        assert_eq!(quoted, vec!["BK-1", "BK-3"]);
        assert_eq!(columns[3].bookings[0].reference, "BK-2");

        let total: usize = columns.iter().map(|c| c.bookings.len()).sum();
        assert_eq!(total, 3);
    }
}
