// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types for boxes on a pipe surface.
//!
//! Coordinate notes:
//! - `x`/`l` are the longitudinal start and length (meters along the pipe).
//! - `a`/`w` are the circumferential start and width in degrees; the axis
//!   wraps at 360°.
//! - Overlap semantics are exclusive on edges: touching boxes share no area
//!   and do not overlap.
//! - Areas are normalized to a unit radius: `radians(w) * l`.

#[doc = "Opaque box identifiers."]
pub mod ident;
#[doc = "Identified boxes that may wrap across the seam."]
pub mod pipe;
#[doc = "Non-wrapping rectangular regions."]
pub mod plain;

/// Full turn of the circumferential axis, in degrees.
pub const FULL_TURN: f64 = 360.0;

use crate::error::RegionError;

/// Validates the invariants shared by every box kind.
pub(crate) fn validate(x: f64, l: f64, a: f64, w: f64) -> Result<(), RegionError> {
    if !(x.is_finite() && l.is_finite() && a.is_finite() && w.is_finite()) {
        return Err(RegionError::NonFinite { x, l, a, w });
    }
    if x < 0.0 {
        return Err(RegionError::NegativeStart(x));
    }
    if l <= 0.0 {
        return Err(RegionError::NonPositiveLength(l));
    }
    if !(0.0..=FULL_TURN).contains(&a) {
        return Err(RegionError::StartOutOfRange(a));
    }
    if w <= 0.0 || w > FULL_TURN {
        return Err(RegionError::WidthOutOfRange(w));
    }
    Ok(())
}
