/// Maximum length in bytes of a venue name, room name or reservation id.
pub const MAX_NAME_LEN: usize = 256;

/// Maximum number of rooms registered in a single venue.
pub const MAX_ROOMS_PER_VENUE: usize = 10_000;

/// Maximum number of live reservations held by one engine.
pub const MAX_RESERVATIONS: usize = 1_000_000;

/// Maximum `small + medium + large` in a single request or change.
pub const MAX_DEMAND_PER_REQUEST: u64 = 10_000;

/// Default maximum length in bytes of one input line.
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;
