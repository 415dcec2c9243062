use crate::model::*;

use super::{Engine, EngineError};

impl Engine {
    /// Per-room booking report for a venue, rooms in registration order.
    pub fn list(&self, venue: &str) -> Result<Vec<RoomReport>, EngineError> {
        self.venue_id(venue)
            .and_then(|vid| self.list_room_reports(vid))
            .ok_or_else(|| EngineError::VenueNotFound(venue.to_string()))
    }

    pub fn reservation(&self, id: &str) -> Option<ReservationDetails> {
        let r = self.reservations.get(id)?;
        Some(ReservationDetails {
            id: r.id.clone(),
            range: r.range,
            venue: self.venues[r.venue.0].name.clone(),
            rooms: self.room_names(&r.rooms),
        })
    }

    pub fn venue_names(&self) -> Vec<String> {
        self.venues.iter().map(|v| v.name.clone()).collect()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }
}
