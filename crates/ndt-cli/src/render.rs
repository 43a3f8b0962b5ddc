// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Report renderers plugged into [`ndt_geom::report::render_into`].

use std::io::{self, Write};

use ndt_geom::{Perspective, ReportSink, Section};
use owo_colors::{AnsiColors, OwoColorize};
use serde::Serialize;

/// Colourised, human-readable report.
///
/// Every reference box opens a section: red when it overlaps nothing, green
/// otherwise, followed by the numbered overlapping boxes (cyan) and their
/// percentages (yellow).
pub struct TextReport<W> {
    out: W,
    color: bool,
    precision: usize,
}

impl<W: Write> TextReport<W> {
    /// Creates a renderer writing to `out`.
    pub fn new(out: W, color: bool, precision: usize) -> Self {
        Self { out, color, precision }
    }

    /// Consumes the renderer and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str, color: AnsiColors) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{}", text.color(color))
        } else {
            writeln!(self.out, "{text}")
        }
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

impl<W: Write> ReportSink for TextReport<W> {
    type Error = io::Error;

    fn begin(&mut self, _perspective: Perspective) -> io::Result<()> {
        writeln!(self.out)
    }

    fn section(&mut self, perspective: Perspective, section: &Section<'_>) -> io::Result<()> {
        let label = capitalize(perspective.reference_label());
        let other = perspective.other_label();
        if section.is_isolated() {
            let text = format!("{label} box {} doesn't overlap {other} boxes!", section.reference);
            self.line(&text, AnsiColors::Red)?;
            return writeln!(self.out);
        }

        let count = section.matches.len();
        let noun = if count > 1 { "boxes" } else { "box" };
        let text = format!("{label} box {} overlaps {count} {other} {noun}:", section.reference);
        self.line(&text, AnsiColors::Green)?;
        writeln!(self.out)?;
        let precision = self.precision;
        for (i, m) in section.matches.iter().enumerate() {
            self.line(&format!("    {}. {}", i + 1, m.other), AnsiColors::Cyan)?;
            let text = format!(
                "    ----> percent overlap: new = {:.precision$} % - old = {:.precision$} %",
                m.record.percent_new(),
                m.record.percent_old(),
            );
            self.line(&text, AnsiColors::Yellow)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    perspective: Perspective,
    sections: &'a [serde_json::Value],
}

/// JSON report: `{ "perspective": ..., "sections": [...] }`.
pub struct JsonReport<W> {
    out: W,
    perspective: Perspective,
    sections: Vec<serde_json::Value>,
}

impl<W: Write> JsonReport<W> {
    /// Creates a renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out, perspective: Perspective::default(), sections: Vec::new() }
    }

    /// Consumes the renderer and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonReport<W> {
    type Error = io::Error;

    fn begin(&mut self, perspective: Perspective) -> io::Result<()> {
        self.perspective = perspective;
        self.sections.clear();
        Ok(())
    }

    fn section(&mut self, _perspective: Perspective, section: &Section<'_>) -> io::Result<()> {
        self.sections.push(serde_json::to_value(section)?);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        let document = JsonDocument { perspective: self.perspective, sections: &self.sections };
        serde_json::to_writer_pretty(&mut self.out, &document)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
