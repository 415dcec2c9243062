use thiserror::Error;

use crate::model::DateRange;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("venue not found: {0}")]
    VenueNotFound(String),
    #[error("reservation not found: {0}")]
    ReservationNotFound(String),
    #[error("reservation already exists: {0}")]
    ReservationExists(String),
    #[error("room {room} already exists in venue {venue}")]
    RoomExists { venue: String, room: String },
    #[error("invalid range {0}: start is after end")]
    InvalidRange(DateRange),
    #[error("limit exceeded: {0}")]
    LimitExceeded(&'static str),
}
