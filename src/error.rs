// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for contract violations.
//!
//! The astronomy itself never fails: degenerate polar geometry is handled by
//! clamping (see [`crate::solar::hour_angle`]).  Errors only arise when a
//! caller hands the resolver malformed input.

use thiserror::Error;

/// Invalid-input conditions reported by the resolver and parsers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaqtError {
    /// A prayer-time sequence did not contain exactly five entries.
    #[error("expected 5 prayer times, got {0}")]
    WrongScheduleLength(usize),

    /// A clock-time string could not be parsed as 24-hour "HH:MM".
    #[error("unparseable clock time {0:?}, expected 24-hour \"HH:MM\"")]
    MalformedClockTime(String),
}
