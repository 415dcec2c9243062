use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closed interval `[start, end]` of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end, "DateRange start must not be after end");
        Self { start, end }
    }

    /// Whether a booking holding `self` blocks a candidate `other`.
    pub fn conflicts_with(&self, other: &DateRange, policy: OverlapPolicy) -> bool {
        match policy {
            OverlapPolicy::Inclusive => other.start <= self.end && self.start <= other.end,
            OverlapPolicy::Exclusive => {
                (other.start < self.end && self.start < other.end)
                    || other.start == self.start
                    || other.end == self.end
            }
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// How a shared boundary day between two ranges is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Ranges sharing any day conflict, including a boundary day.
    #[default]
    Inclusive,
    /// A range may start on the day another ends. Identical start or end days still conflict.
    Exclusive,
}

impl OverlapPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "inclusive" => Some(Self::Inclusive),
            "exclusive" => Some(Self::Exclusive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inclusive => "inclusive",
            Self::Exclusive => "exclusive",
        }
    }
}

/// Room size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    fn index(self) -> usize {
        match self {
            Size::Small => 0,
            Size::Medium => 1,
            Size::Large => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outstanding number of rooms wanted per size class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Demand([u32; 3]);

impl Demand {
    pub fn new(small: u32, medium: u32, large: u32) -> Self {
        Self([small, medium, large])
    }

    pub fn get(&self, size: Size) -> u32 {
        self.0[size.index()]
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&n| u64::from(n)).sum()
    }

    /// True once every size class is down to zero.
    pub fn is_met(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    pub fn take(&mut self, size: Size) {
        let slot = &mut self.0[size.index()];
        *slot = slot.saturating_sub(1);
    }
}

impl fmt::Display for Demand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "small={} medium={} large={}",
            self.0[0], self.0[1], self.0[2]
        )
    }
}

/// Index of a room in the engine's room arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub(crate) usize);

/// Index of a venue in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VenueId(pub(crate) usize);

/// A reservation's claim on one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub reservation_id: String,
    pub range: DateRange,
}

#[derive(Debug, Clone)]
pub struct RoomState {
    pub name: String,
    pub size: Size,
    pub venue: VenueId,
    /// Bookings sorted by `(range.start, reservation_id)`.
    pub bookings: Vec<Booking>,
}

impl RoomState {
    pub fn new(name: String, size: Size, venue: VenueId) -> Self {
        Self {
            name,
            size,
            venue,
            bookings: Vec::new(),
        }
    }

    /// Insert booking maintaining sort order.
    pub fn commit(&mut self, reservation_id: &str, range: DateRange) {
        let pos = self
            .bookings
            .binary_search_by(|b| {
                (b.range.start, b.reservation_id.as_str()).cmp(&(range.start, reservation_id))
            })
            .unwrap_or_else(|e| e);
        self.bookings.insert(
            pos,
            Booking {
                reservation_id: reservation_id.to_string(),
                range,
            },
        );
    }

    /// Remove the booking held by `reservation_id`, if any.
    pub fn release(&mut self, reservation_id: &str) -> Option<Booking> {
        let pos = self
            .bookings
            .iter()
            .position(|b| b.reservation_id == reservation_id)?;
        Some(self.bookings.remove(pos))
    }

    /// Bookings that could conflict with `query`.
    /// Everything starting after `query.end` is skipped by binary search.
    pub fn candidates(&self, query: &DateRange) -> &[Booking] {
        let right_bound = self
            .bookings
            .partition_point(|b| b.range.start <= query.end);
        &self.bookings[..right_bound]
    }

    /// First booking that blocks `range`, ignoring the one held by `excluding`.
    pub fn conflict(
        &self,
        range: &DateRange,
        policy: OverlapPolicy,
        excluding: Option<&str>,
    ) -> Option<&Booking> {
        self.candidates(range).iter().find(|b| {
            excluding != Some(b.reservation_id.as_str()) && b.range.conflicts_with(range, policy)
        })
    }

    pub fn is_available(&self, range: &DateRange, policy: OverlapPolicy) -> bool {
        self.conflict(range, policy, None).is_none()
    }

    pub fn is_available_excluding(
        &self,
        excluded_id: &str,
        range: &DateRange,
        policy: OverlapPolicy,
    ) -> bool {
        self.conflict(range, policy, Some(excluded_id)).is_none()
    }

    pub fn snapshot(&self) -> RoomReport {
        RoomReport {
            room: self.name.clone(),
            reservations: self
                .bookings
                .iter()
                .map(|b| ReservationInfo {
                    id: b.reservation_id.clone(),
                    start: b.range.start,
                    end: b.range.end,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VenueState {
    pub name: String,
    /// Rooms in registration order.
    pub rooms: Vec<RoomId>,
}

impl VenueState {
    pub fn new(name: String) -> Self {
        Self {
            name,
            rooms: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReservationState {
    pub id: String,
    pub range: DateRange,
    pub venue: VenueId,
    /// Rooms in allocation order.
    pub rooms: Vec<RoomId>,
}

// ── Query result types ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationInfo {
    pub id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomReport {
    pub room: String,
    pub reservations: Vec<ReservationInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDetails {
    pub id: String,
    pub range: DateRange,
    pub venue: String,
    pub rooms: Vec<String>,
}

/// Result of a request or change that did not hit a precondition error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Allocated { venue: String, rooms: Vec<String> },
    Rejected,
}

impl Outcome {
    pub fn is_allocated(&self) -> bool {
        matches!(self, Outcome::Allocated { .. })
    }
}
