// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Prayer-Time Module
//!
//! This crate computes the five daily Islamic prayer boundaries from solar
//! geometry, and resolves the "next prayer" countdown from a schedule and a
//! live clock.  Everything is a pure function of its inputs: no I/O, no
//! caching, no hidden state.
//!
//! # Core types
//!
//! - [`Coordinate`] — observer latitude/longitude in decimal degrees.
//! - [`Prayer`] — the fixed five-member prayer set.
//! - [`PrayerTime`] — a prayer paired with its local clock time.
//! - [`PrayerSchedule`] — the five boundaries of one local calendar day.
//! - [`AngleSet`] — the calculation convention (depression angles, Asr
//!   shadow factor), with documented defaults.
//! - [`NextPrayer`] / [`Countdown`] — the upcoming boundary and its
//!   `"2h 5m"`-style remaining time.
//!
//! # Usage
//!
//! Recompute the schedule when the location or date changes; resolve the
//! next prayer on every clock tick against the cached schedule:
//!
//! ```
//! use chrono::{FixedOffset, TimeZone};
//! use waqt::{Coordinate, PrayerSchedule};
//!
//! let mecca = Coordinate::from_degrees(21.4225, 39.8262);
//! let tz = FixedOffset::east_opt(3 * 3600).unwrap();
//! let now = tz.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
//!
//! let schedule = PrayerSchedule::compute(mecca, &now);
//! let next = schedule.next(&now);
//! println!("{schedule}");
//! println!("next: {next}");
//! ```
//!
//! # Time-zone handling
//!
//! The `chrono::DateTime` passed to the calculator carries both the local
//! calendar date and the UTC offset in effect on that date, so
//! daylight-saving transitions are resolved by the caller's `TimeZone`
//! implementation, not by this crate.
//!
//! # Polar latitudes
//!
//! Where a depression angle is geometrically unreachable (polar day/night)
//! the hour-angle cosine is clamped and a best-effort boundary time is
//! produced instead of an error.  See [`solar::hour_angle`].

mod countdown;
mod error;
mod schedule;
pub mod solar;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use countdown::{resolve_next, Countdown, NextPrayer};
pub use error::WaqtError;
pub use schedule::{AngleSet, Coordinate, Prayer, PrayerSchedule, PrayerTime};

use chrono::{DateTime, TimeZone};

/// Compute the five prayer boundaries for the local calendar day of `when`.
///
/// Convenience wrapper around [`PrayerSchedule::compute`] with
/// [`AngleSet::DEFAULT`].
#[inline]
pub fn compute_prayer_times<Tz: TimeZone>(
    coordinate: Coordinate,
    when: &DateTime<Tz>,
) -> PrayerSchedule {
    PrayerSchedule::compute(coordinate, when)
}
