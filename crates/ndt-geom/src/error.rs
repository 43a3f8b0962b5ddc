// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// Reasons a box description is rejected at construction time.
///
/// Boxes are never clamped into range: a value outside the admissible domain
/// is a caller error and is surfaced immediately.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RegionError {
    /// One of `x`, `l`, `a`, `w` is NaN or infinite.
    #[error("box coordinates must be finite; got x={x}, l={l}, a={a}, w={w}")]
    NonFinite {
        /// Longitudinal start.
        x: f64,
        /// Longitudinal length.
        l: f64,
        /// Circumferential start (degrees).
        a: f64,
        /// Circumferential width (degrees).
        w: f64,
    },
    /// Longitudinal start before the pipe origin.
    #[error("box accepts x >= 0; got x={0}")]
    NegativeStart(f64),
    /// Zero or negative longitudinal length.
    #[error("box accepts l > 0; got l={0}")]
    NonPositiveLength(f64),
    /// Circumferential start outside `[0, 360]`.
    #[error("box accepts 0 <= a <= 360; got a={0}")]
    StartOutOfRange(f64),
    /// Circumferential width outside `(0, 360]`.
    #[error("box accepts 0 < w <= 360; got w={0}")]
    WidthOutOfRange(f64),
    /// A plain region may not cross the 0°/360° seam.
    #[error("plain region accepts a + w <= 360; got {0}")]
    CrossesSeam(f64),
}
