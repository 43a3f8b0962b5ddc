// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `ndtest`: compare two inspections of the same pipe.
//!
//! Both inspections are tab-separated files (see [`loader`]). Every box of the
//! newer inspection is matched against the boxes of the older one; the report
//! lists, per box, which boxes of the other inspection it overlaps and by how
//! much.
//!
//! ```text
//! ndtest --old 2019.tsv --new 2023.tsv [--reverse] [--format text|json]
//! ```

pub mod config;
pub mod loader;
pub mod render;

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use ndt_geom::report::render_into;
use ndt_geom::{Analyzer, Perspective};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{ColorChoice, Format, Overrides, ReportPrefs};
use crate::render::{JsonReport, TextReport};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "ndtest", version, about = "Compare two pipe inspections and report overlapping boxes")]
pub struct Cli {
    /// Older inspection (tab-separated: id, x, l, a, w)
    #[arg(long)]
    pub old: PathBuf,
    /// Newer inspection (tab-separated: id, x, l, a, w)
    #[arg(long)]
    pub new: PathBuf,
    /// Organize the report by old boxes instead of new ones
    #[arg(long)]
    pub reverse: bool,
    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<Format>,
    /// Colour policy for the text report
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,
    /// Decimal places for percentages
    #[arg(long)]
    pub precision: Option<usize>,
    /// JSON preferences file
    #[arg(long, env = "NDTEST_CONFIG")]
    pub config: Option<PathBuf>,
    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides { color: self.color, precision: self.precision, format: self.format }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks the level.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn ensure_file(path: &Path, flag: &str) -> Result<()> {
    if !path.is_file() {
        bail!("--{flag} arguments must be a valid file path");
    }
    Ok(())
}

fn use_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stdout().is_terminal(),
    }
}

/// Loads both inspections, analyzes them and writes the report to stdout.
pub fn run(cli: &Cli) -> Result<()> {
    let prefs = resolve_prefs(cli)?;
    debug!(?prefs, "report preferences");

    ensure_file(&cli.old, "old")?;
    ensure_file(&cli.new, "new")?;
    let old = loader::load(&cli.old)
        .with_context(|| format!("failed to load old inspection {}", cli.old.display()))?;
    let new = loader::load(&cli.new)
        .with_context(|| format!("failed to load new inspection {}", cli.new.display()))?;

    let mut analyzer = Analyzer::new();
    let result = analyzer.run(&old, &new);
    let stats = analyzer.stats();
    info!(
        old = old.len(),
        new = new.len(),
        evaluated = stats.evaluated,
        recorded = stats.recorded,
        "analysis complete"
    );

    let perspective = Perspective::from_reverse(cli.reverse);
    let stdout = io::stdout().lock();
    match prefs.format {
        Format::Text => {
            let mut report = TextReport::new(stdout, use_color(prefs.color), prefs.precision);
            render_into(&mut report, &result, perspective, &old, &new)?;
        }
        Format::Json => {
            let mut report = JsonReport::new(stdout);
            render_into(&mut report, &result, perspective, &old, &new)?;
        }
    }
    Ok(())
}

/// Parses the command line and runs the comparison.
pub fn entrypoint() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

/// The preferences file named by `cli` (if any) overlaid with its flags.
pub fn resolve_prefs(cli: &Cli) -> Result<ReportPrefs> {
    Ok(config::load(cli.config.as_deref())?.overlay(cli.overrides()))
}
