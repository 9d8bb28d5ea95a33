//! Time helpers shared by the report builders and appointment matching.

use time::{OffsetDateTime, Time};

/// Returns the millisecond-precision Unix timestamp for `t`.
///
/// Appointment identity is defined as equality at this precision.
#[must_use]
pub fn unix_millis(t: OffsetDateTime) -> i128 {
    t.unix_timestamp_nanos() / 1_000_000
}

/// Returns the `[00:00:00.000, 23:59:59.999]` window containing `now`.
///
/// Windows are computed in UTC; see DESIGN.md for the deviation from the
/// original's process-local time.
#[must_use]
pub fn day_window(now: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
    let start = now.replace_time(Time::MIDNIGHT);
    let end = now.replace_time(time::macros::time!(23:59:59.999));
    (start, end)
}

/// Returns `true` if `t` falls inside the inclusive window.
#[must_use]
pub fn in_window(t: OffsetDateTime, window: (OffsetDateTime, OffsetDateTime)) -> bool {
    t >= window.0 && t <= window.1
}
