use crate::model::*;

// ── First-fit allocation ──────────────────────────────────────────

/// Pick rooms from `venue` for `demand`, scanning rooms in registration order.
///
/// A room is taken when its size class still has outstanding demand and no
/// booking on it conflicts with `range` (bookings of `excluding` are ignored).
/// Returns the taken rooms in scan order once every class is satisfied, or
/// `None` if the venue runs out of rooms first. Nothing is mutated.
pub fn first_fit(
    rooms: &[RoomState],
    venue: &VenueState,
    range: &DateRange,
    demand: Demand,
    policy: OverlapPolicy,
    excluding: Option<&str>,
) -> Option<Vec<RoomId>> {
    let mut outstanding = demand;
    let mut taken = Vec::new();

    for &rid in &venue.rooms {
        if outstanding.is_met() {
            break;
        }
        let room = &rooms[rid.0];
        if outstanding.get(room.size) == 0 {
            continue;
        }
        let free = match excluding {
            Some(id) => room.is_available_excluding(id, range, policy),
            None => room.is_available(range, policy),
        };
        if free {
            taken.push(rid);
            outstanding.take(room.size);
        }
    }

    outstanding.is_met().then_some(taken)
}
