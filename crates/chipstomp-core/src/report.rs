//! Status lines for the external display.
//!
//! An effect reports its state as a short ordered list of
//! [`ReportLine`]s: one per tunable feature, plus optional informational
//! lines. Pixel placement and fonts belong to the display driver; this
//! module only carries label, value, unit and the "selected" highlight.
//!
//! Lines are pushed into a [`ReportSink`]. [`Report`] is a fixed-capacity,
//! `Copy` sink that can cross a lock-free queue from the audio context to the
//! display task without allocating.

use core::fmt;

use crate::feature::FeatureUnit;

/// Maximum number of lines a [`Report`] holds.
pub const MAX_REPORT_LINES: usize = 4;

/// One display line: `"<label> <value><unit>"`, optionally highlighted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportLine {
    /// Short label (e.g. `"Amp"`).
    pub label: &'static str,
    /// Value in display units.
    pub value: f32,
    /// Decimal places to print.
    pub decimals: u8,
    /// Unit suffix.
    pub unit: FeatureUnit,
    /// True if this line's feature is the one the encoder currently edits.
    pub selected: bool,
}

impl ReportLine {
    /// An informational line that never shows as selected.
    pub const fn info(label: &'static str, value: f32, unit: FeatureUnit) -> Self {
        Self {
            label,
            value,
            decimals: 0,
            unit,
            selected: false,
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.*}{}",
            self.label,
            usize::from(self.decimals),
            self.value,
            self.unit.suffix()
        )
    }
}

/// Receiver of report lines.
pub trait ReportSink {
    /// Accept the next line.
    fn line(&mut self, line: ReportLine);
}

/// Fixed-capacity report, filled by an effect's `report`.
///
/// Lines beyond [`MAX_REPORT_LINES`] are dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    /// Name of the reporting effect.
    pub effect: &'static str,
    /// Enabled flag of the reporting effect.
    pub enabled: bool,
    lines: [Option<ReportLine>; MAX_REPORT_LINES],
    len: usize,
}

impl Report {
    /// Create an empty report for `effect`.
    pub const fn new(effect: &'static str, enabled: bool) -> Self {
        Self {
            effect,
            enabled,
            lines: [None; MAX_REPORT_LINES],
            len: 0,
        }
    }

    /// Number of lines collected.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no lines were collected.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over the collected lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &ReportLine> {
        self.lines.iter().flatten()
    }

    /// The highlighted line, if any.
    pub fn selected(&self) -> Option<&ReportLine> {
        self.lines().find(|l| l.selected)
    }
}

impl ReportSink for Report {
    fn line(&mut self, line: ReportLine) {
        if self.len < MAX_REPORT_LINES {
            self.lines[self.len] = Some(line);
            self.len += 1;
        }
    }
}

#[cfg(feature = "std")]
impl ReportSink for Vec<ReportLine> {
    fn line(&mut self, line: ReportLine) {
        self.push(line);
    }
}
