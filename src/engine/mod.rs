mod allocation;
mod conflict;
mod error;
mod mutations;
mod queries;

pub use allocation::first_fit;
pub use error::EngineError;

use std::collections::HashMap;

use crate::model::*;

/// The allocation registry: every venue, room and reservation of one process.
///
/// Rooms live in a single arena indexed by [`RoomId`]. Venues and reservations
/// refer to rooms by id, and rooms refer back to reservations by reservation id,
/// so commit and release never alias mutable state.
pub struct Engine {
    policy: OverlapPolicy,
    /// Venues in registration order.
    venues: Vec<VenueState>,
    venue_index: HashMap<String, VenueId>,
    rooms: Vec<RoomState>,
    reservations: HashMap<String, ReservationState>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(OverlapPolicy::default())
    }
}

impl Engine {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            policy,
            venues: Vec::new(),
            venue_index: HashMap::new(),
            rooms: Vec::new(),
            reservations: HashMap::new(),
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn venue_id(&self, name: &str) -> Option<VenueId> {
        self.venue_index.get(name).copied()
    }

    pub(super) fn room(&self, id: RoomId) -> &RoomState {
        &self.rooms[id.0]
    }

    /// First-fit scan of one venue. Read-only. `None` when the demand cannot be
    /// met or `venue` is not registered here.
    pub fn try_allocate(
        &self,
        venue: VenueId,
        range: &DateRange,
        demand: Demand,
    ) -> Option<Vec<RoomId>> {
        let venue = self.venues.get(venue.0)?;
        first_fit(&self.rooms, venue, range, demand, self.policy, None)
    }

    /// Same scan as [`Engine::try_allocate`], but bookings held by `excluded_id`
    /// do not block a room.
    pub fn try_allocate_for_change(
        &self,
        venue: VenueId,
        excluded_id: &str,
        range: &DateRange,
        demand: Demand,
    ) -> Option<Vec<RoomId>> {
        let venue = self.venues.get(venue.0)?;
        first_fit(
            &self.rooms,
            venue,
            range,
            demand,
            self.policy,
            Some(excluded_id),
        )
    }

    pub fn list_room_reports(&self, venue: VenueId) -> Option<Vec<RoomReport>> {
        let venue = self.venues.get(venue.0)?;
        Some(
            venue
                .rooms
                .iter()
                .map(|&rid| self.room(rid).snapshot())
                .collect(),
        )
    }

    /// Scan venues in registration order; the first that satisfies `demand` wins.
    pub(super) fn find_allocation(
        &self,
        range: &DateRange,
        demand: Demand,
        excluding: Option<&str>,
    ) -> Option<(VenueId, Vec<RoomId>)> {
        (0..self.venues.len()).map(VenueId).find_map(|vid| {
            let rooms = match excluding {
                Some(id) => self.try_allocate_for_change(vid, id, range, demand),
                None => self.try_allocate(vid, range, demand),
            }?;
            Some((vid, rooms))
        })
    }

    pub(super) fn room_names(&self, ids: &[RoomId]) -> Vec<String> {
        ids.iter().map(|&rid| self.room(rid).name.clone()).collect()
    }

    /// Commit a booking for `reservation_id` into every room in `rooms`.
    fn link(&mut self, reservation_id: &str, range: DateRange, rooms: &[RoomId]) {
        for &rid in rooms {
            self.rooms[rid.0].commit(reservation_id, range);
        }
    }

    /// Release `reservation_id` from every room in `rooms`.
    fn unlink(&mut self, reservation_id: &str, rooms: &[RoomId]) {
        for &rid in rooms {
            self.rooms[rid.0].release(reservation_id);
        }
    }
}
