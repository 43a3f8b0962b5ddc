// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Collation of two inspections into overlapping box pairs.
//!
//! Ordering contract (applies to every input handed to the analyzer):
//! - Each inspection is sorted ascending by `(x, a)`.
//! - Ids are unique within one inspection.
//!
//! The analyzer relies on the longitudinal order to stop scanning old boxes
//! early; [`sort_by_position`] establishes it for loaders.

#[doc = "Sort-pruned overlap analyzer and its per-pair decision rule."]
pub mod analyzer;

use crate::types::pipe::PipeRegion;

/// Sorts boxes ascending by `(x, a)`, the order the analyzer expects.
///
/// The sort is stable, so boxes at the same position keep their input order.
pub fn sort_by_position(boxes: &mut [PipeRegion]) {
    boxes.sort_by(|p, q| p.x().total_cmp(&q.x()).then(p.a().total_cmp(&q.a())));
}

/// Returns `true` when `boxes` satisfy the analyzer ordering contract.
pub fn is_sorted_by_position(boxes: &[PipeRegion]) -> bool {
    boxes.is_sorted_by(|p, q| (p.x(), p.a()) <= (q.x(), q.a()))
}
