// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tab-separated inspection files.
//!
//! Layout: a header row `id	x	l	a	w`, then one box per row. Rows are
//! numbered from 1 starting after the header; blank rows are ignored but
//! still counted. Loaded boxes are sorted by `(x, a)`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ndt_geom::{sort_by_position, BoxId, PipeRegion, RegionError};
use thiserror::Error;
use tracing::debug;

/// Column names, in order, expected on the header row.
pub const HEADER: [&str; 5] = ["id", "x", "l", "a", "w"];

const DELIMITER: char = '\t';

/// Error type for loading an inspection.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The input holds no header row.
    #[error("missing header; expected {:?}", HEADER)]
    MissingHeader,
    /// The header row does not match [`HEADER`] exactly.
    #[error("invalid header; expected {:?}, got {found:?}", HEADER)]
    InvalidHeader {
        /// Header cells as found.
        found: Vec<String>,
    },
    /// A row does not hold exactly five columns.
    #[error("invalid data at row {row}: expected {} columns, got {found}", HEADER.len())]
    ColumnCount {
        /// 1-based data row.
        row: usize,
        /// Number of columns found.
        found: usize,
    },
    /// A column is not a number (or `id` is not an integer).
    #[error("invalid data at row {row}: columns must be numbers")]
    InvalidRow {
        /// 1-based data row.
        row: usize,
    },
    /// The numbers do not describe a valid box.
    #[error("invalid box at row {row}: {source}")]
    InvalidRegion {
        /// 1-based data row.
        row: usize,
        /// Violated box invariant.
        source: RegionError,
    },
    /// Two rows share the same id.
    #[error("duplicate box id {id} at row {row} (first seen at row {first})")]
    DuplicateId {
        /// Repeated id.
        id: BoxId,
        /// 1-based data row of the repetition.
        row: usize,
        /// 1-based data row where the id first appeared.
        first: usize,
    },
}

/// Reads and parses the inspection stored at `path`.
pub fn load(path: &Path) -> Result<Vec<PipeRegion>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let boxes = parse(&text)?;
    debug!(path = %path.display(), boxes = boxes.len(), "loaded inspection");
    Ok(boxes)
}

/// Parses an inspection from text, returning boxes sorted by `(x, a)`.
pub fn parse(text: &str) -> Result<Vec<PipeRegion>, LoadError> {
    let mut lines = text.lines();
    let header: Vec<&str> = lines.next().ok_or(LoadError::MissingHeader)?.split(DELIMITER).collect();
    if header != HEADER {
        return Err(LoadError::InvalidHeader {
            found: header.into_iter().map(str::to_owned).collect(),
        });
    }

    let mut seen: BTreeMap<BoxId, usize> = BTreeMap::new();
    let mut boxes = Vec::new();
    for (index, line) in lines.enumerate() {
        let row = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let region = parse_row(row, line)?;
        if let Some(id) = region.id() {
            if let Some(&first) = seen.get(&id) {
                return Err(LoadError::DuplicateId { id, row, first });
            }
            seen.insert(id, row);
        }
        boxes.push(region);
    }
    sort_by_position(&mut boxes);
    Ok(boxes)
}

fn parse_row(row: usize, line: &str) -> Result<PipeRegion, LoadError> {
    let cells: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
    let [id, x, l, a, w] = cells[..] else {
        return Err(LoadError::ColumnCount { row, found: cells.len() });
    };
    let id: i64 = id.parse().map_err(|_| LoadError::InvalidRow { row })?;
    let number = |cell: &str| cell.parse::<f64>().map_err(|_| LoadError::InvalidRow { row });
    let (x, l, a, w) = (number(x)?, number(l)?, number(a)?, number(w)?);
    PipeRegion::new(BoxId(id), x, l, a, w).map_err(|source| LoadError::InvalidRegion { row, source })
}
