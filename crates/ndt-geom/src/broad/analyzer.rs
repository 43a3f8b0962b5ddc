// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use tracing::{debug, trace};

use super::is_sorted_by_position;
use crate::result::{AnalysisResult, OverlapRecord};
use crate::types::pipe::PipeRegion;
use crate::types::plain::PlainRegion;
use crate::types::FULL_TURN;

/// What the scan over old boxes should do with one `(old, new)` pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The pair cannot overlap; move on to the next old box.
    Skip,
    /// No old box from here on can overlap the new box; end the scan.
    Stop,
    /// The pair may overlap; compute the intersection.
    Evaluate,
}

/// Counters collected during one analysis run.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Pairs whose intersection was computed.
    pub evaluated: usize,
    /// Pairs rejected without computing the intersection.
    pub skipped: usize,
    /// Scans over the old boxes cut short by a [`Decision::Stop`].
    pub stopped: usize,
    /// Pairs that produced an overlap record.
    pub recorded: usize,
}

/// Collates an old inspection against a new one.
///
/// Both inputs must be sorted ascending by `(x, a)` (see
/// [`super::sort_by_position`]). The analyzer does not sort: with unsorted
/// inputs the early stop may miss overlapping pairs.
///
/// Worst case stays `O(n·m)` (every box at the same `x`), but on typical
/// inspection data the scan for each new box ends as soon as the old boxes
/// start past its longitudinal end.
#[derive(Debug, Default)]
pub struct Analyzer {
    stats: AnalysisStats,
}

impl Analyzer {
    /// Creates an analyzer with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters accumulated by every run on this analyzer.
    pub fn stats(&self) -> AnalysisStats {
        self.stats
    }

    /// Runs a pruned analysis with a throwaway analyzer.
    ///
    /// Same contract as [`Analyzer::run`]: pairs involving a box without an
    /// id are never recorded.
    pub fn analyze(old: &[PipeRegion], new: &[PipeRegion]) -> AnalysisResult {
        Self::new().run(old, new)
    }

    /// Decides in constant time how the scan treats one `(old, new)` pair.
    ///
    /// Checks run in a fixed order: longitudinal miss with `old` behind,
    /// circumferential miss from `new`'s side, longitudinal miss with `old`
    /// ahead (the only stop), circumferential miss from `old`'s side.
    pub fn decide(old: &PipeRegion, new: &PipeRegion) -> Decision {
        if old.end_x() <= new.x() {
            // Later old boxes start at or after this one and may still reach.
            return Decision::Skip;
        }
        if misses_circumferentially(new, old) {
            return Decision::Skip;
        }
        if new.end_x() <= old.x() {
            return Decision::Stop;
        }
        if misses_circumferentially(old, new) {
            return Decision::Skip;
        }
        Decision::Evaluate
    }

    /// Collates `old` against `new`, pruning pairs via [`Analyzer::decide`].
    ///
    /// Returns new id → old id → record for every pair with a non-empty
    /// overlap. Boxes without an id (see [`PipeRegion::anonymous`]) cannot
    /// be keyed: their pairs are evaluated but never recorded.
    ///
    /// Percentages are clamped to `[0, 100]` and the record area never
    /// exceeds the area of either box.
    pub fn run(&mut self, old: &[PipeRegion], new: &[PipeRegion]) -> AnalysisResult {
        debug_assert!(is_sorted_by_position(old), "old boxes must be sorted by (x, a)");
        debug_assert!(is_sorted_by_position(new), "new boxes must be sorted by (x, a)");

        let mut run = AnalysisStats::default();
        let mut result = AnalysisResult::new();
        for new_box in new {
            for old_box in old {
                match Self::decide(old_box, new_box) {
                    Decision::Skip => {
                        run.skipped += 1;
                        continue;
                    }
                    Decision::Stop => {
                        run.stopped += 1;
                        break;
                    }
                    Decision::Evaluate => run.evaluated += 1,
                }
                if let Some(record) = collate(old_box, new_box) {
                    run.recorded += 1;
                    result.insert(record);
                }
            }
        }

        debug!(
            old = old.len(),
            new = new.len(),
            evaluated = run.evaluated,
            skipped = run.skipped,
            stopped = run.stopped,
            recorded = run.recorded,
            "collated inspections"
        );
        self.stats.evaluated += run.evaluated;
        self.stats.skipped += run.skipped;
        self.stats.stopped += run.stopped;
        self.stats.recorded += run.recorded;
        result
    }

    /// Collates every `(old, new)` pair without pruning.
    ///
    /// Reference baseline for the pruned scan; ordering of the inputs does
    /// not matter here.
    pub fn analyze_exhaustive(old: &[PipeRegion], new: &[PipeRegion]) -> AnalysisResult {
        let mut result = AnalysisResult::new();
        for new_box in new {
            for old_box in old {
                if let Some(record) = collate(old_box, new_box) {
                    result.insert(record);
                }
            }
        }
        result
    }
}

/// Returns `true` when `other` lies circumferentially outside `reference`
/// in a way decidable from `reference`'s start alone.
///
/// For a wrapping `reference` this is the gap between its wrapped end and its
/// start; otherwise it is `other` ending before `reference` starts.
fn misses_circumferentially(reference: &PipeRegion, other: &PipeRegion) -> bool {
    if reference.wraps() {
        other.a() >= reference.end_a() - FULL_TURN && other.end_a() <= reference.a()
    } else {
        other.end_a() <= reference.a()
    }
}

/// Builds the record for one pair, or `None` when the boxes do not overlap.
///
/// Identity-less boxes cannot be keyed and are never recorded.
fn collate(old: &PipeRegion, new: &PipeRegion) -> Option<OverlapRecord> {
    let (Some(id_old), Some(id_new)) = (old.id(), new.id()) else {
        trace!(old = %old, new = %new, "box without id; pair not recorded");
        return None;
    };
    let overlaps = old.overlap(new);
    if overlaps.is_empty() {
        return None;
    }
    // Seam pieces are summed in radians one by one; the sum may round past
    // the area of the box they tile.
    let summed: f64 = overlaps.iter().map(PlainRegion::area).sum();
    let area = summed.min(old.area()).min(new.area());
    let percent_new = (area / new.area() * 100.0).min(100.0);
    let percent_old = (area / old.area() * 100.0).min(100.0);
    trace!(%id_old, %id_new, percent_old, percent_new, "overlap");
    Some(OverlapRecord::new(id_old, id_new, overlaps, area, percent_old, percent_new))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::types::ident::BoxId;

    fn pipe(x: f64, l: f64, a: f64, w: f64) -> PipeRegion {
        PipeRegion::new(BoxId(1), x, l, a, w).unwrap()
    }

    #[test]
    fn old_behind_new_is_skipped() {
        let old = pipe(10.0, 40.0, 0.0, 20.0);
        let new = pipe(50.0, 40.0, 10.0, 20.0);
        assert_eq!(Analyzer::decide(&old, &new), Decision::Skip);
    }

    #[test]
    fn old_ahead_of_new_stops_the_scan() {
        let old = pipe(50.0, 40.0, 10.0, 20.0);
        let new = pipe(10.0, 40.0, 0.0, 20.0);
        assert_eq!(Analyzer::decide(&old, &new), Decision::Stop);
    }

    #[test]
    fn circumferential_misses_are_skipped_before_stopping() {
        // Ahead longitudinally, but the circumferential check from new's side
        // comes first.
        let old = pipe(50.0, 40.0, 0.0, 20.0);
        let new = pipe(10.0, 40.0, 30.0, 20.0);
        assert_eq!(Analyzer::decide(&old, &new), Decision::Skip);
    }

    #[test]
    fn old_in_the_gap_of_wrapping_new_is_skipped() {
        let old = pipe(320.0, 100.0, 160.0, 40.0);
        let new = pipe(270.0, 100.0, 200.0, 320.0);
        assert_eq!(Analyzer::decide(&old, &new), Decision::Skip);
    }

    #[test]
    fn new_in_the_gap_of_wrapping_old_is_skipped() {
        let old = pipe(270.0, 100.0, 200.0, 320.0);
        let new = pipe(320.0, 100.0, 160.0, 40.0);
        assert_eq!(Analyzer::decide(&old, &new), Decision::Skip);
    }

    #[test]
    fn overlapping_pair_is_evaluated() {
        let old = pipe(270.0, 100.0, 200.0, 320.0);
        let new = pipe(320.0, 100.0, 20.0, 40.0);
        assert_eq!(Analyzer::decide(&old, &new), Decision::Evaluate);
    }

    #[test]
    fn stats_accumulate_across_runs() {
        let old = [pipe(0.0, 10.0, 0.0, 10.0), pipe(100.0, 10.0, 0.0, 10.0)];
        let new = [pipe(0.0, 10.0, 5.0, 10.0)];
        let mut analyzer = Analyzer::new();
        let result = analyzer.run(&old, &new);
        assert_eq!(result.pair_count(), 1);
        analyzer.run(&old, &new);
        assert_eq!(
            analyzer.stats(),
            AnalysisStats { evaluated: 2, skipped: 0, stopped: 2, recorded: 2 }
        );
    }

    #[test]
    fn anonymous_boxes_are_evaluated_but_not_recorded() {
        let old = [PipeRegion::anonymous(0.0, 10.0, 0.0, 10.0).unwrap()];
        let new = [pipe(0.0, 10.0, 5.0, 10.0)];
        let mut analyzer = Analyzer::new();
        assert!(analyzer.run(&old, &new).is_empty());
        assert_eq!(analyzer.stats().evaluated, 1);
        assert_eq!(analyzer.stats().recorded, 0);
    }
}
