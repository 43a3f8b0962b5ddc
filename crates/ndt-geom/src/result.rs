// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use std::collections::btree_map::{self, BTreeMap};

use crate::types::ident::BoxId;
use crate::types::plain::PlainRegion;

/// How one new box overlaps one old box.
///
/// Percentages are relative to each box's own area and lie in `[0, 100]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OverlapRecord {
    id_old: BoxId,
    id_new: BoxId,
    overlaps: Vec<PlainRegion>,
    area: f64,
    percent_old: f64,
    percent_new: f64,
}

impl OverlapRecord {
    /// Creates a record; `overlaps` is owned exclusively by the record.
    ///
    /// `area` is the overlapped area, never larger than either box.
    pub fn new(
        id_old: BoxId,
        id_new: BoxId,
        overlaps: Vec<PlainRegion>,
        area: f64,
        percent_old: f64,
        percent_new: f64,
    ) -> Self {
        Self { id_old, id_new, overlaps, area, percent_old, percent_new }
    }

    /// Id of the old box.
    pub fn id_old(&self) -> BoxId {
        self.id_old
    }

    /// Id of the new box.
    pub fn id_new(&self) -> BoxId {
        self.id_new
    }

    /// Overlapping sub-regions, in decomposition order.
    pub fn overlaps(&self) -> &[PlainRegion] {
        &self.overlaps
    }

    /// Overlapped share of the old box area, in percent.
    pub fn percent_old(&self) -> f64 {
        self.percent_old
    }

    /// Overlapped share of the new box area, in percent.
    pub fn percent_new(&self) -> f64 {
        self.percent_new
    }

    /// Total overlapped area, normalized on the pipe radius.
    pub fn area(&self) -> f64 {
        self.area
    }
}

impl fmt::Display for OverlapRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<OverlapRecord [id_old={},id_new={},percent_old={},percent_new={}]>",
            self.id_old, self.id_new, self.percent_old, self.percent_new
        )
    }
}

/// Records keyed by the id of the box on the other side of the comparison.
pub type Matches = BTreeMap<BoxId, OverlapRecord>;

/// Outcome of collating two inspections: new id → old id → record.
///
/// A new id is present only when it overlaps at least one old box, so
/// `matches_for` returning `None` means "no overlap at all". Inner maps are
/// ordered by old id.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AnalysisResult {
    by_new: BTreeMap<BoxId, Matches>,
}

impl AnalysisResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under `(record.id_new, record.id_old)`, returning any
    /// record it replaces.
    pub fn insert(&mut self, record: OverlapRecord) -> Option<OverlapRecord> {
        self.by_new
            .entry(record.id_new)
            .or_default()
            .insert(record.id_old, record)
    }

    /// Overlaps of the new box `id_new`, or `None` when it overlaps nothing.
    pub fn matches_for(&self, id_new: BoxId) -> Option<&Matches> {
        self.by_new.get(&id_new)
    }

    /// The record for one `(new, old)` pair.
    pub fn get(&self, id_new: BoxId, id_old: BoxId) -> Option<&OverlapRecord> {
        self.by_new.get(&id_new)?.get(&id_old)
    }

    /// Returns `true` when `id_new` overlaps at least one old box.
    pub fn contains_new(&self, id_new: BoxId) -> bool {
        self.by_new.contains_key(&id_new)
    }

    /// Number of new boxes with at least one overlap.
    pub fn len(&self) -> usize {
        self.by_new.len()
    }

    /// Returns `true` when no pair overlaps.
    pub fn is_empty(&self) -> bool {
        self.by_new.is_empty()
    }

    /// Total number of overlapping `(new, old)` pairs.
    pub fn pair_count(&self) -> usize {
        self.by_new.values().map(BTreeMap::len).sum()
    }

    /// Iterates `(new id, matches)` in ascending new id order.
    pub fn iter(&self) -> btree_map::Iter<'_, BoxId, Matches> {
        self.by_new.iter()
    }

    /// Iterates every record, ordered by `(new id, old id)`.
    pub fn records(&self) -> impl Iterator<Item = &OverlapRecord> + '_ {
        self.by_new.values().flat_map(BTreeMap::values)
    }

    /// Re-keys the result by old id: old id → new id → record.
    pub fn transposed(&self) -> BTreeMap<BoxId, BTreeMap<BoxId, &OverlapRecord>> {
        let mut by_old: BTreeMap<BoxId, BTreeMap<BoxId, &OverlapRecord>> = BTreeMap::new();
        for record in self.records() {
            by_old
                .entry(record.id_old)
                .or_default()
                .insert(record.id_new, record);
        }
        by_old
    }
}

impl<'a> IntoIterator for &'a AnalysisResult {
    type Item = (&'a BoxId, &'a Matches);
    type IntoIter = btree_map::Iter<'a, BoxId, Matches>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn record(id_old: i64, id_new: i64) -> OverlapRecord {
        OverlapRecord::new(BoxId(id_old), BoxId(id_new), Vec::new(), 0.0, 25.0, 33.2)
    }

    #[test]
    fn display_summarizes_ids_and_percentages() {
        assert_eq!(
            record(1, 2).to_string(),
            "<OverlapRecord [id_old=1,id_new=2,percent_old=25,percent_new=33.2]>"
        );
    }

    #[test]
    fn absence_is_distinct_from_presence() {
        let mut result = AnalysisResult::new();
        assert!(result.matches_for(BoxId(2)).is_none());
        result.insert(record(1, 2));
        result.insert(record(7, 2));
        let matches = result.matches_for(BoxId(2)).unwrap();
        assert_eq!(matches.keys().copied().collect::<Vec<_>>(), vec![BoxId(1), BoxId(7)]);
        assert!(result.get(BoxId(2), BoxId(3)).is_none());
        assert!(result.matches_for(BoxId(1)).is_none());
        assert_eq!(result.len(), 1);
        assert_eq!(result.pair_count(), 2);
    }

    #[test]
    fn transposed_swaps_key_levels() {
        let mut result = AnalysisResult::new();
        result.insert(record(1, 2));
        result.insert(record(1, 3));
        result.insert(record(4, 3));
        let by_old = result.transposed();
        assert_eq!(by_old.len(), 2);
        assert_eq!(
            by_old[&BoxId(1)].keys().copied().collect::<Vec<_>>(),
            vec![BoxId(2), BoxId(3)]
        );
        assert_eq!(by_old[&BoxId(4)][&BoxId(3)].id_new(), BoxId(3));
    }
}
