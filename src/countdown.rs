// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Next-prayer resolution and countdown formatting.
//!
//! [`resolve_next`] is the tick-rate half of the crate: given today's five
//! boundaries and the live clock, it finds the first boundary strictly in
//! the future.  Once all of today's prayers have passed it wraps to
//! tomorrow's Fajr, so a well-formed schedule always yields a next prayer.
//!
//! The computation is cheap (no astronomy) and is intended to run once per
//! timer tick against a cached [`PrayerSchedule`](crate::PrayerSchedule).

use crate::error::WaqtError;
use crate::schedule::PrayerTime;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use std::fmt;

/// Remaining time until a boundary, rendered at minute resolution.
///
/// Formats as `"2h 5m"`, or just `"45m"` under an hour; seconds are
/// truncated (floor to the whole minute).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Countdown(Duration);

impl Countdown {
    /// Wrap a remaining duration.
    #[inline]
    pub const fn new(remaining: Duration) -> Self {
        Self(remaining)
    }

    /// Whole minutes remaining, truncated.
    #[inline]
    pub fn minutes(&self) -> i64 {
        self.0.num_minutes()
    }

    /// The underlying duration, untruncated.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.minutes();
        if minutes >= 60 {
            write!(f, "{}h {}m", minutes / 60, minutes % 60)
        } else {
            write!(f, "{minutes}m")
        }
    }
}

/// The prayer judged next relative to some instant.
///
/// A stateless derived value: recompute on every tick and discard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NextPrayer {
    /// The upcoming boundary (name and clock time).
    pub prayer: PrayerTime,
    /// Concrete local date-time of the boundary — tomorrow's date after the
    /// day wrap.
    pub at: NaiveDateTime,
    /// Time remaining until `at`; strictly positive.
    pub remaining: Duration,
}

impl NextPrayer {
    /// Remaining time as a formattable countdown.
    #[inline]
    pub const fn countdown(&self) -> Countdown {
        Countdown::new(self.remaining)
    }
}

impl fmt::Display for NextPrayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.prayer, self.countdown())
    }
}

/// Resolve the next prayer from a raw five-entry sequence.
///
/// The sequence must hold exactly five entries (canonically Fajr through
/// Isha); anything else is an input-contract violation reported as
/// [`WaqtError::WrongScheduleLength`] — never an out-of-bounds access and
/// never a silently wrong prayer.  Callers holding a
/// [`PrayerSchedule`](crate::PrayerSchedule) should prefer its infallible
/// [`next`](crate::PrayerSchedule::next) method.
pub fn resolve_next<Tz: TimeZone>(
    times: &[PrayerTime],
    now: &DateTime<Tz>,
) -> Result<NextPrayer, WaqtError> {
    let times: &[PrayerTime; 5] = times
        .try_into()
        .map_err(|_| WaqtError::WrongScheduleLength(times.len()))?;
    Ok(next_from_times(times, now.naive_local()))
}

/// Core scan: first boundary strictly after `now_local`, else tomorrow's
/// first entry.
pub(crate) fn next_from_times(times: &[PrayerTime; 5], now_local: NaiveDateTime) -> NextPrayer {
    let today = now_local.date();

    for pt in times {
        let at = today.and_time(pt.time());
        if at > now_local {
            return NextPrayer {
                prayer: *pt,
                at,
                remaining: at - now_local,
            };
        }
    }

    // Every boundary today is at or before `now`: wrap to tomorrow's first.
    let fajr = times[0];
    let tomorrow = today
        .checked_add_days(chrono::Days::new(1))
        .expect("calendar date overflow");
    let at = tomorrow.and_time(fajr.time());
    NextPrayer {
        prayer: fajr,
        at,
        remaining: at - now_local,
    }
}
