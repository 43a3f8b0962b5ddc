// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::Deref;

use super::ident::BoxId;
use super::plain::PlainRegion;
use super::{validate, FULL_TURN};
use crate::error::RegionError;

/// Box on the pipe surface whose circumferential span may cross the seam.
///
/// Invariants:
/// - `x >= 0`, `l > 0`, all fields finite.
/// - `0 <= a <= 360`, `0 < w <= 360`; `a + w` may exceed 360, in which case
///   the box wraps past 0°.
///
/// Boxes loaded from an inspection carry an id; boxes derived from an
/// overlap computation carry none.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PipeRegion {
    id: Option<BoxId>,
    x: f64,
    l: f64,
    a: f64,
    w: f64,
}

impl PipeRegion {
    /// Constructs an identified box.
    pub fn new(id: BoxId, x: f64, l: f64, a: f64, w: f64) -> Result<Self, RegionError> {
        Self::with_id(Some(id), x, l, a, w)
    }

    /// Constructs a box without source identity.
    pub fn anonymous(x: f64, l: f64, a: f64, w: f64) -> Result<Self, RegionError> {
        Self::with_id(None, x, l, a, w)
    }

    /// Constructs a box with an optional identity.
    pub fn with_id(
        id: Option<BoxId>,
        x: f64,
        l: f64,
        a: f64,
        w: f64,
    ) -> Result<Self, RegionError> {
        validate(x, l, a, w)?;
        Ok(Self { id, x, l, a, w })
    }

    /// Identity of the box, `None` for derived regions.
    #[must_use]
    pub fn id(&self) -> Option<BoxId> {
        self.id
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

    /// Unwrapped circumferential end (`a + w`); above 360 when the box wraps.
    #[must_use]
    pub fn end_a(&self) -> f64 {
        self.a + self.w
    }

    /// Returns `true` when the circumferential span crosses the seam.
    #[must_use]
    pub fn wraps(&self) -> bool {
        self.end_a() > FULL_TURN
    }

    /// Area normalized on the pipe radius.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.w.to_radians() * self.l
    }

    /// Decomposes the box into non-wrapping regions.
    ///
    /// A wrapping box yields the part past 0° first, then the part before the
    /// seam. A box starting exactly at 360° has no part before the seam and
    /// yields a single region.
    #[must_use]
    pub fn plain_regions(&self) -> PlainRegions {
        if !self.wraps() {
            return PlainRegions::one(PlainRegion::from_parts(self.x, self.l, self.a, self.w));
        }
        let wrapped = PlainRegion::from_parts(self.x, self.l, 0.0, self.end_a() - FULL_TURN);
        let before_seam = FULL_TURN - self.a;
        if before_seam > 0.0 {
            PlainRegions::two(
                wrapped,
                PlainRegion::from_parts(self.x, self.l, self.a, before_seam),
            )
        } else {
            PlainRegions::one(wrapped)
        }
    }

    /// Computes the overlap with `other` as non-wrapping regions.
    ///
    /// Pieces are emitted in the order `self` regions × `other` regions, so
    /// the result holds zero to three regions. The operation is symmetric.
    #[must_use]
    pub fn overlap(&self, other: &Self) -> Vec<PlainRegion> {
        let others = other.plain_regions();
        let mut out = Vec::new();
        for mine in self.plain_regions().iter() {
            out.extend(others.iter().filter_map(|theirs| mine.overlap(theirs)));
        }
        out
    }

    /// Computes the overlap with `other` as anonymous pipe regions, merging
    /// the pieces split by the seam back into one wrapping region.
    ///
    /// When more than one piece is found, the first starts at 0° and the last
    /// ends at 360°, the two are joined into a single wrapping region placed
    /// first; interior pieces follow unchanged.
    #[must_use]
    pub fn overlap_merged(&self, other: &Self) -> Vec<Self> {
        let pieces = self.overlap(other);
        let anonymous = |p: &PlainRegion| Self {
            id: None,
            x: p.x(),
            l: p.l(),
            a: p.a(),
            w: p.w(),
        };
        match pieces.as_slice() {
            [first, interior @ .., last] if starts_at_zero(first) && ends_at_seam(last) => {
                let joined = Self {
                    id: None,
                    x: first.x(),
                    l: first.l(),
                    a: last.a(),
                    w: last.w() + first.w(),
                };
                core::iter::once(joined)
                    .chain(interior.iter().map(anonymous))
                    .collect()
            }
            _ => pieces.iter().map(anonymous).collect(),
        }
    }
}

#[allow(clippy::float_cmp)]
fn starts_at_zero(region: &PlainRegion) -> bool {
    region.a() == 0.0
}

#[allow(clippy::float_cmp)]
fn ends_at_seam(region: &PlainRegion) -> bool {
    region.end_a() == FULL_TURN
}

impl fmt::Display for PipeRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "<PipeRegion [id={id},")?,
            None => f.write_str("<PipeRegion [id=none,")?,
        }
        write!(f, "x={},l={},a={},w={}]>", self.x, self.l, self.a, self.w)
    }
}

/// One or two non-wrapping regions produced by [`PipeRegion::plain_regions`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlainRegions {
    parts: [PlainRegion; 2],
    len: usize,
}

impl PlainRegions {
    const fn one(region: PlainRegion) -> Self {
        Self { parts: [region, region], len: 1 }
    }

    const fn two(wrapped: PlainRegion, before_seam: PlainRegion) -> Self {
        Self { parts: [wrapped, before_seam], len: 2 }
    }

    /// Returns the regions as a slice, wrapped part first.
    #[must_use]
    pub fn as_slice(&self) -> &[PlainRegion] {
        &self.parts[..self.len]
    }
}

impl Deref for PlainRegions {
    type Target = [PlainRegion];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}
