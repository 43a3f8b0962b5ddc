// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Report view over an [`AnalysisResult`] and the port rendering adapters
//! implement to consume it.
//!
//! The core never formats a report. It groups the result per reference box
//! (new boxes by default, old boxes when reversed), resolves the ids on the
//! other side back to their boxes, and hands each group to a [`ReportSink`].

use std::collections::BTreeMap;

use tracing::warn;

use crate::result::{AnalysisResult, OverlapRecord};
use crate::types::ident::BoxId;
use crate::types::pipe::PipeRegion;

/// Which inspection the report is organized around.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Perspective {
    /// One section per new box, listing the old boxes it overlaps.
    #[default]
    New,
    /// One section per old box, listing the new boxes it overlaps.
    Old,
}

impl Perspective {
    /// Picks the perspective from a "reverse" toggle.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Self::Old
        } else {
            Self::New
        }
    }

    /// Label of the reference inspection (`"new"` or `"old"`).
    pub fn reference_label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Old => "old",
        }
    }

    /// Label of the inspection listed inside each section.
    pub fn other_label(self) -> &'static str {
        match self {
            Self::New => "old",
            Self::Old => "new",
        }
    }
}

/// One box on the other side overlapping the section's reference box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Match<'a> {
    /// Full description of the other box.
    pub other: &'a PipeRegion,
    /// Overlap between the reference box and `other`.
    pub record: &'a OverlapRecord,
}

/// All overlaps of one reference box.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Section<'a> {
    /// The reference box.
    pub reference: &'a PipeRegion,
    /// Overlapping boxes, ordered by their id.
    pub matches: Vec<Match<'a>>,
}

impl Section<'_> {
    /// Returns `true` when the reference box overlaps nothing.
    pub fn is_isolated(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Port implemented by report renderers (text, JSON, ...).
pub trait ReportSink {
    /// Error raised by the underlying output.
    type Error;

    /// Called once before the first section.
    fn begin(&mut self, _perspective: Perspective) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for every reference box, in input order.
    fn section(&mut self, perspective: Perspective, section: &Section<'_>) -> Result<(), Self::Error>;

    /// Called once after the last section.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Groups `result` into one section per reference box.
///
/// Reference boxes keep their input order; the matches of each section are
/// sorted by the id of the other box.
pub fn sections<'a>(
    result: &'a AnalysisResult,
    perspective: Perspective,
    old: &'a [PipeRegion],
    new: &'a [PipeRegion],
) -> Vec<Section<'a>> {
    let (reference, other) = match perspective {
        Perspective::New => (new, old),
        Perspective::Old => (old, new),
    };
    let lookup: BTreeMap<BoxId, &PipeRegion> =
        other.iter().filter_map(|b| Some((b.id()?, b))).collect();

    let resolve = |id: BoxId, record: &'a OverlapRecord| match lookup.get(&id) {
        Some(&other) => Some(Match { other, record }),
        None => {
            warn!(%id, side = perspective.other_label(), "overlap references an unknown box");
            None
        }
    };

    match perspective {
        Perspective::New => reference
            .iter()
            .map(|r| {
                let matches = r
                    .id()
                    .and_then(|id| result.matches_for(id))
                    .into_iter()
                    .flatten()
                    .filter_map(|(id, record)| resolve(*id, record))
                    .collect();
                Section { reference: r, matches }
            })
            .collect(),
        Perspective::Old => {
            let by_old = result.transposed();
            reference
                .iter()
                .map(|r| {
                    let matches = r
                        .id()
                        .and_then(|id| by_old.get(&id))
                        .into_iter()
                        .flatten()
                        .filter_map(|(id, record)| resolve(*id, *record))
                        .collect();
                    Section { reference: r, matches }
                })
                .collect()
        }
    }
}

/// Feeds every section of `result` to `sink`.
pub fn render_into<S: ReportSink>(
    sink: &mut S,
    result: &AnalysisResult,
    perspective: Perspective,
    old: &[PipeRegion],
    new: &[PipeRegion],
) -> Result<(), S::Error> {
    sink.begin(perspective)?;
    for section in sections(result, perspective, old, new) {
        sink.section(perspective, &section)?;
    }
    sink.finish()
}
