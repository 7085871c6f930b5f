// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Prayer schedule computation.
//!
//! [`PrayerSchedule`] is the core type of the crate: the five daily prayer
//! boundaries for one (coordinate, date) pair, in the observer's local civil
//! time.  It is a pure derived value — recompute it whenever the location or
//! the calendar date changes, and discard the old one.
//!
//! The calculation convention (depression angles, Asr shadow factor, Dhuhr
//! offset) is carried by [`AngleSet`] so that alternative juristic
//! conventions can be substituted without touching the solar kernel.

use crate::countdown::{self, NextPrayer};
use crate::error::WaqtError;
use crate::solar;
use chrono::{DateTime, Datelike, NaiveTime, Offset, TimeZone, Timelike};
use qtty::{Degrees, Seconds};
use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// Coordinate
// ═══════════════════════════════════════════════════════════════════════════

/// Geographic position of the observer, in decimal degrees.
///
/// Latitude is positive north, longitude positive east.  No validation is
/// performed: callers are responsible for sane inputs, and extreme polar
/// latitudes yield clamped best-effort times (see [`solar::hour_angle`]).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Coordinate {
    latitude: Degrees,
    longitude: Degrees,
}

impl Coordinate {
    /// Create from typed angle quantities.
    #[inline]
    pub const fn new(latitude: Degrees, longitude: Degrees) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create from raw decimal degrees.
    #[inline]
    pub const fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self::new(Degrees::new(latitude), Degrees::new(longitude))
    }

    /// Latitude, positive north.
    #[inline]
    pub const fn latitude(&self) -> Degrees {
        self.latitude
    }

    /// Longitude, positive east.
    #[inline]
    pub const fn longitude(&self) -> Degrees {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4}°, {:.4}°",
            self.latitude.value(),
            self.longitude.value()
        )
    }
}

#[cfg(feature = "serde")]
impl Serialize for Coordinate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Coordinate", 2)?;
        s.serialize_field("latitude", &self.latitude.value())?;
        s.serialize_field("longitude", &self.longitude.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            latitude: f64,
            longitude: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Coordinate::from_degrees(raw.latitude, raw.longitude))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Prayer
// ═══════════════════════════════════════════════════════════════════════════

/// The five daily prayers, in canonical order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All five prayers in schedule order.
    pub const ALL: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Canonical English name.
    pub const fn name(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }

    /// Inverse of [`Prayer::name`], case-insensitive.
    pub fn from_name(name: &str) -> Option<Prayer> {
        Prayer::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// AngleSet
// ═══════════════════════════════════════════════════════════════════════════

/// Calculation convention: the solar angles that define each boundary.
///
/// [`AngleSet::DEFAULT`] models the single convention used by the source
/// product (Fajr 18°, Isha 17°, majority Asr shadow rule).  Schools of
/// thought that differ only in these parameters can be expressed by
/// constructing a different `AngleSet`; the solar kernel is unchanged.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AngleSet {
    /// Solar depression below the horizon at dawn.
    pub fajr: Degrees,
    /// Solar depression below the horizon at nightfall.
    pub isha: Degrees,
    /// Effective horizon depression at sunset: refraction plus solar radius.
    pub horizon: Degrees,
    /// Delay after apparent solar noon, so the sun has started its decline.
    pub dhuhr_offset: Seconds,
    /// Asr shadow factor: 1 for the majority convention, 2 for Hanafi.
    pub asr_shadow: f64,
}

impl AngleSet {
    /// Fajr 18°, Isha 17°, horizon 0.833°, Dhuhr +1 min, shadow factor 1.
    pub const DEFAULT: Self = Self {
        fajr: Degrees::new(18.0),
        isha: Degrees::new(17.0),
        horizon: Degrees::new(0.833),
        dhuhr_offset: Seconds::new(60.0),
        asr_shadow: 1.0,
    };
}

impl Default for AngleSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PrayerTime
// ═══════════════════════════════════════════════════════════════════════════

/// A named prayer paired with its local clock time, at minute resolution.
///
/// Carries no identity beyond the name; completion flags and the like are
/// layered on top by the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrayerTime {
    prayer: Prayer,
    time: NaiveTime,
}

impl PrayerTime {
    /// Pair a prayer with a clock time.  Seconds are dropped.
    #[inline]
    pub fn new(prayer: Prayer, time: NaiveTime) -> Self {
        let truncated = time
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(time);
        Self {
            prayer,
            time: truncated,
        }
    }

    /// Parse a 24-hour `"HH:MM"` clock string.
    pub fn parse(prayer: Prayer, hhmm: &str) -> Result<Self, WaqtError> {
        let time = NaiveTime::parse_from_str(hhmm, "%H:%M")
            .map_err(|_| WaqtError::MalformedClockTime(hhmm.to_string()))?;
        Ok(Self::new(prayer, time))
    }

    /// The prayer this boundary belongs to.
    #[inline]
    pub const fn prayer(&self) -> Prayer {
        self.prayer
    }

    /// Local clock time of the boundary.
    #[inline]
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    /// Clock time rendered as 24-hour `"HH:MM"`.
    pub fn hhmm(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

impl fmt::Display for PrayerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.prayer, self.hhmm())
    }
}

// Stable wire shape: the clock time travels as its "HH:MM" rendering.
#[cfg(feature = "serde")]
impl Serialize for PrayerTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("PrayerTime", 2)?;
        s.serialize_field("prayer", self.prayer.name())?;
        s.serialize_field("time", &self.hhmm())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PrayerTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            prayer: String,
            time: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        let prayer = Prayer::from_name(&raw.prayer)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown prayer {:?}", raw.prayer)))?;
        PrayerTime::parse(prayer, &raw.time).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PrayerSchedule
// ═══════════════════════════════════════════════════════════════════════════

/// The five prayer boundaries of one local calendar day, in canonical order.
///
/// Construction guarantees exactly five entries ordered Fajr, Dhuhr, Asr,
/// Maghrib, Isha.  The computation is pure: identical (coordinate, date,
/// UTC-offset, angles) inputs always produce an identical schedule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrayerSchedule([PrayerTime; 5]);

impl PrayerSchedule {
    /// Compute the schedule with [`AngleSet::DEFAULT`].
    ///
    /// `when` supplies both the local calendar date and the UTC offset in
    /// effect on that date, so daylight-saving transitions are accounted for
    /// by the caller's time zone rather than by this crate.
    pub fn compute<Tz: TimeZone>(coordinate: Coordinate, when: &DateTime<Tz>) -> Self {
        Self::compute_with(coordinate, when, &AngleSet::DEFAULT)
    }

    /// Compute the schedule under an explicit calculation convention.
    pub fn compute_with<Tz: TimeZone>(
        coordinate: Coordinate,
        when: &DateTime<Tz>,
        angles: &AngleSet,
    ) -> Self {
        let day_of_year = when.date_naive().ordinal();
        let offset_hours = f64::from(when.offset().fix().local_minus_utc()) / 3_600.0;

        let declination = solar::solar_declination(day_of_year);
        let eot = solar::equation_of_time(day_of_year);

        // Apparent solar noon in local civil fractional hours.
        let noon =
            12.0 - coordinate.longitude.value() / 15.0 - eot.value() / 3_600.0 + offset_hours;

        // Clock hours between solar noon and the instant the sun stands at
        // the given altitude.
        let hours_at = |altitude: Degrees| -> f64 {
            solar::hour_angle(altitude, coordinate.latitude, declination).value() / 15.0
        };
        let depression = |angle: Degrees| Degrees::new(-angle.value());

        let fajr = noon - hours_at(depression(angles.fajr));
        let dhuhr = noon + angles.dhuhr_offset.value() / 3_600.0;
        let asr = noon
            + hours_at(solar::asr_altitude(
                coordinate.latitude,
                declination,
                angles.asr_shadow,
            ));
        let maghrib = noon + hours_at(depression(angles.horizon));
        let isha = noon + hours_at(depression(angles.isha));

        Self([
            PrayerTime::new(Prayer::Fajr, clock_time(fajr)),
            PrayerTime::new(Prayer::Dhuhr, clock_time(dhuhr)),
            PrayerTime::new(Prayer::Asr, clock_time(asr)),
            PrayerTime::new(Prayer::Maghrib, clock_time(maghrib)),
            PrayerTime::new(Prayer::Isha, clock_time(isha)),
        ])
    }

    /// The five entries in canonical order.
    #[inline]
    pub const fn times(&self) -> &[PrayerTime; 5] {
        &self.0
    }

    /// Slice view, for callers that work with the raw-sequence resolver.
    #[inline]
    pub fn as_slice(&self) -> &[PrayerTime] {
        &self.0
    }

    /// The boundary of a specific prayer.
    #[inline]
    pub fn get(&self, prayer: Prayer) -> PrayerTime {
        self.0[prayer as usize]
    }

    /// Iterate the entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &PrayerTime> {
        self.0.iter()
    }

    /// The next prayer strictly after `now`, wrapping to tomorrow's Fajr
    /// once all of today's prayers have passed.
    ///
    /// Infallible: the schedule is well-formed by construction.
    pub fn next<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> NextPrayer {
        countdown::next_from_times(&self.0, now.naive_local())
    }
}

impl Index<Prayer> for PrayerSchedule {
    type Output = PrayerTime;

    #[inline]
    fn index(&self, prayer: Prayer) -> &PrayerTime {
        &self.0[prayer as usize]
    }
}

impl From<PrayerSchedule> for [PrayerTime; 5] {
    #[inline]
    fn from(schedule: PrayerSchedule) -> Self {
        schedule.0
    }
}

impl fmt::Display for PrayerSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pt) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{pt}")?;
        }
        Ok(())
    }
}

/// Fractional local hours → minute-rounded clock time, wrapped into one day.
fn clock_time(hours: f64) -> NaiveTime {
    let minute_of_day = (hours * 60.0).round() as i64;
    let wrapped = minute_of_day.rem_euclid(24 * 60);
    NaiveTime::from_hms_opt((wrapped / 60) as u32, (wrapped % 60) as u32, 0)
        .expect("minute of day wrapped into [0, 1440)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn mecca() -> Coordinate {
        Coordinate::from_degrees(21.4225, 39.8262)
    }

    fn mecca_midmorning() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 15, 9, 0, 0)
            .unwrap()
    }

    fn minute_of_day(t: NaiveTime) -> i64 {
        i64::from(t.hour()) * 60 + i64::from(t.minute())
    }

    #[test]
    fn mecca_dhuhr_tracks_apparent_noon() {
        // Independent reference: apparent noon in Mecca on 2024-06-15 is
        // 12:21 AST (longitude −2h39m, E ≈ −0.4 min, UTC+3), so Dhuhr with
        // the +1 min offset lands at 12:22.
        let schedule = PrayerSchedule::compute(mecca(), &mecca_midmorning());
        let dhuhr = minute_of_day(schedule[Prayer::Dhuhr].time());
        assert!(
            (dhuhr - (12 * 60 + 22)).abs() <= 2,
            "Dhuhr at {}",
            schedule[Prayer::Dhuhr]
        );
    }

    #[test]
    fn mecca_reference_day_matches_published_times() {
        // Published 18°/17° times for Mecca, 2024-06-15 (AST): Fajr 04:13,
        // Asr 15:41, Maghrib 19:04, Isha 20:24.  Allow the ~1 min error of
        // the low-order solar approximations plus minute rounding.
        let schedule = PrayerSchedule::compute(mecca(), &mecca_midmorning());
        let expected = [
            (Prayer::Fajr, 4 * 60 + 13),
            (Prayer::Asr, 15 * 60 + 41),
            (Prayer::Maghrib, 19 * 60 + 4),
            (Prayer::Isha, 20 * 60 + 24),
        ];
        for (prayer, minutes) in expected {
            let got = minute_of_day(schedule[prayer].time());
            assert!(
                (got - minutes).abs() <= 4,
                "{prayer} at {}, expected ~{}:{:02}",
                schedule[prayer],
                minutes / 60,
                minutes % 60
            );
        }
    }

    #[test]
    fn schedule_is_deterministic() {
        let a = PrayerSchedule::compute(mecca(), &mecca_midmorning());
        let b = PrayerSchedule::compute(mecca(), &mecca_midmorning());
        assert_eq!(a, b);
    }

    #[test]
    fn schedule_is_strictly_ordered_in_mecca() {
        let schedule = PrayerSchedule::compute(mecca(), &mecca_midmorning());
        let minutes: Vec<i64> = schedule.iter().map(|pt| minute_of_day(pt.time())).collect();
        for pair in minutes.windows(2) {
            assert!(pair[0] < pair[1], "schedule not ordered: {schedule}");
        }
    }

    #[test]
    fn hanafi_asr_is_later() {
        let hanafi = AngleSet {
            asr_shadow: 2.0,
            ..AngleSet::DEFAULT
        };
        let majority = PrayerSchedule::compute(mecca(), &mecca_midmorning());
        let shifted = PrayerSchedule::compute_with(mecca(), &mecca_midmorning(), &hanafi);
        assert!(shifted[Prayer::Asr].time() > majority[Prayer::Asr].time());
    }

    #[test]
    fn polar_summer_still_yields_five_entries() {
        // Tromsø in June: 18° and 17° twilight never occur.  The clamped
        // geometry must still return a full, well-formed schedule.
        let tromso = Coordinate::from_degrees(69.65, 18.96);
        let when = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 21, 12, 0, 0)
            .unwrap();
        let schedule = PrayerSchedule::compute(tromso, &when);
        assert_eq!(schedule.times().len(), 5);
        for pt in schedule.iter() {
            assert!(pt.hhmm().len() == 5, "malformed clock string {}", pt);
        }
    }

    #[test]
    fn utc_offset_shifts_clock_times_only() {
        // Same absolute instant viewed from two offsets: the clock times
        // must differ by exactly the offset difference (modulo one day).
        let east3 = FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .unwrap();
        let east4 = east3.with_timezone(&FixedOffset::east_opt(4 * 3600).unwrap());

        let a = PrayerSchedule::compute(mecca(), &east3);
        let b = PrayerSchedule::compute(mecca(), &east4);
        for prayer in Prayer::ALL {
            let shift =
                (minute_of_day(b[prayer].time()) - minute_of_day(a[prayer].time())).rem_euclid(1440);
            assert_eq!(shift, 60, "{prayer} shifted by {shift} min");
        }
    }

    #[test]
    fn clock_time_wraps_both_directions() {
        assert_eq!(clock_time(24.3), NaiveTime::from_hms_opt(0, 18, 0).unwrap());
        assert_eq!(clock_time(-0.5), NaiveTime::from_hms_opt(23, 30, 0).unwrap());
        assert_eq!(clock_time(12.0), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn parse_accepts_well_formed_clock_strings() {
        let pt = PrayerTime::parse(Prayer::Fajr, "04:13").unwrap();
        assert_eq!(pt.prayer(), Prayer::Fajr);
        assert_eq!(pt.hhmm(), "04:13");
    }

    #[test]
    fn parse_rejects_malformed_clock_strings() {
        for bad in ["", "25:00", "12:60", "noon", "12-30"] {
            assert_eq!(
                PrayerTime::parse(Prayer::Isha, bad),
                Err(WaqtError::MalformedClockTime(bad.to_string())),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn prayer_names_roundtrip() {
        for prayer in Prayer::ALL {
            assert_eq!(Prayer::from_name(prayer.name()), Some(prayer));
        }
        assert_eq!(Prayer::from_name("maghrib"), Some(Prayer::Maghrib));
        assert_eq!(Prayer::from_name("Sunrise"), None);
    }

    #[test]
    fn display_renders_name_and_clock() {
        let pt = PrayerTime::parse(Prayer::Maghrib, "19:04").unwrap();
        assert_eq!(format!("{pt}"), "Maghrib 19:04");

        let schedule = PrayerSchedule::compute(mecca(), &mecca_midmorning());
        let rendered = format!("{schedule}");
        assert!(rendered.starts_with("Fajr "));
        assert!(rendered.contains("Isha "));
    }
}
