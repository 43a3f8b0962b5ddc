// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Geometry and collation core for pipe inspection data.

This crate provides:
- Circumferential boxes on a pipe surface (`PipeRegion`) and their
  non-wrapping decomposition (`PlainRegion`).
- Pairwise overlap computation across the 0°/360° seam.
- A collator (`Analyzer`) that compares an old and a new inspection and
  prunes candidate pairs using the `(x, a)` sort order of its inputs.
- The result model (`OverlapRecord`, `AnalysisResult`) and the report view
  (`report::sections`, `ReportSink`) handed to rendering adapters.

Design notes:
- Pure computation: no I/O, no formatting beyond `Display` summaries.
- Deterministic: results are stored in ordered maps keyed by box id.
- Invalid boxes are rejected at construction with `RegionError`.
"]

/// Sort-pruned collation of two inspections.
pub mod broad;
/// Error taxonomy for region construction.
pub mod error;
/// Report view consumed by rendering adapters.
pub mod report;
/// Overlap records and the aggregate analysis result.
pub mod result;
/// Foundational geometric types.
pub mod types;

pub use broad::analyzer::{AnalysisStats, Analyzer, Decision};
pub use broad::{is_sorted_by_position, sort_by_position};
pub use error::RegionError;
pub use report::{Match, Perspective, ReportSink, Section};
pub use result::{AnalysisResult, OverlapRecord};
pub use types::ident::BoxId;
pub use types::pipe::PipeRegion;
pub use types::plain::PlainRegion;
