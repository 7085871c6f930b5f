// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Solar Geometry Kernel
//!
//! Low-order trigonometric approximations of the sun's apparent position,
//! sufficient for clock-minute prayer scheduling:
//!
//! - [`solar_declination`] — angle between the sun's rays and the equatorial
//!   plane, from the day of year.
//! - [`equation_of_time`] — apparent-solar minus mean-clock offset, from the
//!   day of year.
//! - [`hour_angle`] — angular displacement from solar noon at which the sun
//!   reaches a given altitude.
//! - [`asr_altitude`] — shadow-length altitude threshold for the afternoon
//!   prayer.
//!
//! ## Accuracy
//!
//! Both approximations are single-harmonic (declination) or three-term
//! Fourier (equation of time) fits.  They agree with rigorous ephemerides to
//! about one minute of clock time, which is the resolution of the schedule
//! anyway.  For sub-second solar work use a full VSOP87-class theory instead.
//!
//! ## Degenerate geometry
//!
//! At high latitudes the sun may never reach a requested altitude (polar day
//! and night).  [`hour_angle`] clamps the arc-cosine argument into [−1, 1]
//! and returns the boundary angle (0° or 180°) — a deliberate best-effort
//! policy, documented as an approximation rather than an exact event.
//!
//! ## Scientific References
//! * Spencer (1971): Fourier series representation of the position of the sun.
//! * Meeus (1998): *Astronomical Algorithms*, ch. 25 & 28.

use qtty::{Degrees, Seconds};
use std::f64::consts::TAU;

/// Mean obliquity of the ecliptic used by the declination approximation.
const MEAN_OBLIQUITY: Degrees = Degrees::new(23.44);

/// Equation-of-time Fourier coefficients, in minutes of clock time.
const EOT_SIN_2B_MIN: f64 = 9.87;
const EOT_COS_B_MIN: f64 = -7.53;
const EOT_SIN_B_MIN: f64 = -1.5;

/// Solar declination δ for a given day of year (1–366).
///
/// Single-harmonic approximation: `δ = 23.44° · sin(2π (284 + N) / 365)`.
/// Zero at the March equinox, +23.44° at the June solstice.
#[inline]
pub fn solar_declination(day_of_year: u32) -> Degrees {
    let phase = TAU * (284.0 + day_of_year as f64) / 365.0;
    Degrees::new(MEAN_OBLIQUITY.value() * phase.sin())
}

/// Equation of time E for a given day of year (1–366).
///
/// Positive when the sundial runs ahead of the clock.  Annual extrema are
/// about +16.4 min in early November and −14.2 min in mid-February.
#[inline]
pub fn equation_of_time(day_of_year: u32) -> Seconds {
    let b = TAU * (day_of_year as f64 - 81.0) / 364.0;
    let minutes =
        EOT_SIN_2B_MIN * (2.0 * b).sin() + EOT_COS_B_MIN * b.cos() + EOT_SIN_B_MIN * b.sin();
    Seconds::new(minutes * 60.0)
}

/// Hour angle at which the sun stands at `altitude` above the horizon
/// (negative altitudes are depressions below it), for an observer at
/// `latitude` with solar declination `declination`.
///
/// ```text
/// cos H = (sin(alt) − sin(lat)·sin(δ)) / (cos(lat)·cos(δ))
/// ```
///
/// The result is in [0°, 180°]; divide by 15 for clock hours from solar
/// noon.  When the geometry is unreachable (polar day/night) the cosine is
/// clamped and the boundary angle is returned instead of an error.
#[inline]
pub fn hour_angle(altitude: Degrees, latitude: Degrees, declination: Degrees) -> Degrees {
    let alt = altitude.value().to_radians();
    let lat = latitude.value().to_radians();
    let decl = declination.value().to_radians();

    let cos_h = (alt.sin() - lat.sin() * decl.sin()) / (lat.cos() * decl.cos());
    Degrees::new(cos_h.clamp(-1.0, 1.0).acos().to_degrees())
}

/// Altitude of the sun at the Asr boundary, from the shadow-length rule:
///
/// ```text
/// alt = acot(factor + tan(|lat − δ|))
/// ```
///
/// `shadow_factor` is 1 for the majority (Shafiʿi) convention and 2 for the
/// Hanafi convention.  When the observer's latitude equals the declination
/// (zero noon shadow) the factor-1 altitude is exactly 45°.
#[inline]
pub fn asr_altitude(latitude: Degrees, declination: Degrees, shadow_factor: f64) -> Degrees {
    let spread = (latitude.value() - declination.value()).abs().to_radians();
    let cot = shadow_factor + spread.tan();
    Degrees::new((1.0 / cot).atan().to_degrees())
}
