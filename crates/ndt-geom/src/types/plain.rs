// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;

use super::{validate, FULL_TURN};
use crate::error::RegionError;

/// Rectangular region of the pipe surface that does not cross the seam.
///
/// Invariants:
/// - `x >= 0`, `l > 0`, all fields finite.
/// - `0 <= a`, `0 < w <= 360` and `a + w <= 360`.
///
/// Equality is structural and exact (no tolerance).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlainRegion {
    x: f64,
    l: f64,
    a: f64,
    w: f64,
}

impl PlainRegion {
    /// Constructs a plain region, rejecting values that break the invariants.
    pub fn new(x: f64, l: f64, a: f64, w: f64) -> Result<Self, RegionError> {
        validate(x, l, a, w)?;
        if a + w > FULL_TURN {
            return Err(RegionError::CrossesSeam(a + w));
        }
        Ok(Self { x, l, a, w })
    }

    /// Builds a region from values already known to satisfy the invariants
    /// (decomposition pieces and intersections of valid regions).
    pub(crate) const fn from_parts(x: f64, l: f64, a: f64, w: f64) -> Self {
        Self { x, l, a, w }
    }

    /// Longitudinal start.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Longitudinal length.
    #[must_use]
    pub fn l(&self) -> f64 {
        self.l
    }

    /// Circumferential start in degrees.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Circumferential width in degrees.
    #[must_use]
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Longitudinal end (`x + l`), exclusive.
    #[must_use]
    pub fn end_x(&self) -> f64 {
        self.x + self.l
    }

    /// Circumferential end (`a + w`), exclusive; never above 360.
    #[must_use]
    pub fn end_a(&self) -> f64 {
        self.a + self.w
    }

    /// Area normalized on the pipe radius (area for a one meter radius).
    #[must_use]
    pub fn area(&self) -> f64 {
        self.w.to_radians() * self.l
    }

    /// Returns the region shared by `self` and `other`, if any.
    ///
    /// Both projections must intersect with positive measure; boxes that
    /// merely touch on an edge yield `None`. The operation is symmetric.
    #[must_use]
    pub fn overlap(&self, other: &Self) -> Option<Self> {
        if self.end_x() <= other.x || other.end_x() <= self.x {
            return None;
        }
        if self.end_a() <= other.a || other.end_a() <= self.a {
            return None;
        }
        let x = self.x.max(other.x);
        let l = self.end_x().min(other.end_x()) - x;
        let a = self.a.max(other.a);
        let w = self.end_a().min(other.end_a()) - a;
        Some(Self::from_parts(x, l, a, w))
    }
}

impl fmt::Display for PlainRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<PlainRegion [x={},l={},a={},w={}]>",
            self.x, self.l, self.a, self.w
        )
    }
}
