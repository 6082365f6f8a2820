use serde::{Deserialize, Serialize};

// Role-scoped views of the booking board. The `view` query parameter is normalized to
// a single optional value before it reaches anything in here.

/// Which role's booking view to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingViewVariant {
    #[default]
    Sales,
    Operations,
    Exec,
}

/// Board layout. Operations shares the sales board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingBoardVariant {
    #[default]
    Sales,
    Exec,
}

impl BookingBoardVariant {
    /// The exec board is an overview and does not allow status moves.
    pub fn is_read_only(self) -> bool {
        matches!(self, BookingBoardVariant::Exec)
    }
}

pub fn resolve_booking_view_variant(raw: Option<&str>) -> BookingViewVariant {
    match raw {
        Some("operations") => BookingViewVariant::Operations,
        Some("exec") => BookingViewVariant::Exec,
        _ => BookingViewVariant::Sales,
    }
}

/// Resolved on its own, not through the view variant: `"operations"` gives the sales
/// board.
pub fn resolve_booking_board_variant(raw: Option<&str>) -> BookingBoardVariant {
    match raw {
        Some("exec") => BookingBoardVariant::Exec,
        _ => BookingBoardVariant::Sales,
    }
}

pub fn get_booking_board_heading(variant: BookingBoardVariant) -> &'static str {
    match variant {
        BookingBoardVariant::Exec => "Lifecycle overview",
        BookingBoardVariant::Sales => "Booking lifecycle board",
    }
}

// LIFECYCLE

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Inquiry,
    Quoted,
    Confirmed,
    OnHire,
    Returned,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Board column order.
    pub const LIFECYCLE: [BookingStatus; 7] = [
        BookingStatus::Inquiry,
        BookingStatus::Quoted,
        BookingStatus::Confirmed,
        BookingStatus::OnHire,
        BookingStatus::Returned,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Inquiry => "inquiry",
            BookingStatus::Quoted => "quoted",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::OnHire => "on_hire",
            BookingStatus::Returned => "returned",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::LIFECYCLE.into_iter().find(|status| status.as_str() == value)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    pub fn allowed_transitions(self) -> &'static [BookingStatus] {
        use BookingStatus::*;
        match self {
            Inquiry => &[Quoted, Cancelled],
            Quoted => &[Confirmed, Inquiry, Cancelled],
            Confirmed => &[OnHire, Cancelled],
            OnHire => &[Returned],
            Returned => &[Completed],
            Completed | Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }
}
