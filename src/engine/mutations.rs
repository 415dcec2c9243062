use chrono::NaiveDate;
use tracing::debug;

use crate::limits::*;
use crate::model::*;

use super::conflict::{validate_demand, validate_name, validate_range};
use super::{Engine, EngineError};

impl Engine {
    /// Register a room, creating the venue on first use.
    pub fn add_room(&mut self, venue: &str, room: &str, size: Size) -> Result<RoomId, EngineError> {
        validate_name(venue, "venue name too long")?;
        validate_name(room, "room name too long")?;

        let vid = match self.venue_id(venue) {
            Some(vid) => {
                let existing = &self.venues[vid.0];
                if existing.rooms.len() >= MAX_ROOMS_PER_VENUE {
                    return Err(EngineError::LimitExceeded("too many rooms in venue"));
                }
                if existing.rooms.iter().any(|&rid| self.room(rid).name == room) {
                    return Err(EngineError::RoomExists {
                        venue: venue.to_string(),
                        room: room.to_string(),
                    });
                }
                vid
            }
            None => {
                let vid = VenueId(self.venues.len());
                self.venues.push(VenueState::new(venue.to_string()));
                self.venue_index.insert(venue.to_string(), vid);
                debug!("venue {venue} registered");
                vid
            }
        };

        let rid = RoomId(self.rooms.len());
        self.rooms.push(RoomState::new(room.to_string(), size, vid));
        self.venues[vid.0].rooms.push(rid);
        metrics::gauge!(crate::observability::ROOMS_TOTAL).set(self.rooms.len() as f64);
        debug!("room {room} ({size}) added to venue {venue}");
        Ok(rid)
    }

    /// Allocate rooms for a new reservation. Nothing changes unless a venue
    /// can satisfy the whole demand.
    pub fn request(
        &mut self,
        id: &str,
        start: NaiveDate,
        end: NaiveDate,
        demand: Demand,
    ) -> Result<Outcome, EngineError> {
        validate_name(id, "reservation id too long")?;
        let range = validate_range(start, end)?;
        validate_demand(&demand)?;
        if self.reservations.contains_key(id) {
            return Err(EngineError::ReservationExists(id.to_string()));
        }
        if self.reservations.len() >= MAX_RESERVATIONS {
            return Err(EngineError::LimitExceeded("too many reservations"));
        }

        let Some((vid, rooms)) = self.find_allocation(&range, demand, None) else {
            debug!("request {id} {range} ({demand}) rejected");
            return Ok(Outcome::Rejected);
        };

        self.link(id, range, &rooms);
        let names = self.room_names(&rooms);
        self.reservations.insert(
            id.to_string(),
            ReservationState {
                id: id.to_string(),
                range,
                venue: vid,
                rooms,
            },
        );
        metrics::gauge!(crate::observability::RESERVATIONS_ACTIVE)
            .set(self.reservations.len() as f64);

        let venue = self.venues[vid.0].name.clone();
        debug!("reservation {id} {range} allocated in {venue}: {names:?}");
        Ok(Outcome::Allocated {
            venue,
            rooms: names,
        })
    }

    /// Re-allocate an existing reservation. The reservation's own bookings do
    /// not block the scan; on rejection its range and rooms stay as they were.
    pub fn change(
        &mut self,
        id: &str,
        start: NaiveDate,
        end: NaiveDate,
        demand: Demand,
    ) -> Result<Outcome, EngineError> {
        let range = validate_range(start, end)?;
        validate_demand(&demand)?;
        let old_rooms = self
            .reservations
            .get(id)
            .map(|r| r.rooms.clone())
            .ok_or_else(|| EngineError::ReservationNotFound(id.to_string()))?;

        let Some((vid, rooms)) = self.find_allocation(&range, demand, Some(id)) else {
            debug!("change {id} {range} ({demand}) rejected");
            return Ok(Outcome::Rejected);
        };

        self.unlink(id, &old_rooms);
        self.link(id, range, &rooms);
        let names = self.room_names(&rooms);
        if let Some(reservation) = self.reservations.get_mut(id) {
            reservation.range = range;
            reservation.venue = vid;
            reservation.rooms = rooms;
        }

        let venue = self.venues[vid.0].name.clone();
        debug!("reservation {id} moved to {range} in {venue}: {names:?}");
        Ok(Outcome::Allocated {
            venue,
            rooms: names,
        })
    }

    /// Release a reservation from all its rooms and forget it.
    pub fn cancel(&mut self, id: &str) -> Result<(), EngineError> {
        let reservation = self
            .reservations
            .remove(id)
            .ok_or_else(|| EngineError::ReservationNotFound(id.to_string()))?;
        self.unlink(id, &reservation.rooms);
        metrics::gauge!(crate::observability::RESERVATIONS_ACTIVE)
            .set(self.reservations.len() as f64);
        debug!("reservation {id} cancelled");
        Ok(())
    }
}
