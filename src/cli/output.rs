//! Output formatting
//!
//! Table output redraws in place; record output appends one JSON object per
//! cycle. Both build the whole frame in a `String` before anything is
//! written, so a failed cycle never leaves half a frame on screen.

use crate::domain::{MetricThresholds, Snapshot, Temperature, ThresholdBand, Thresholds};
use crate::error::Result;

use crossterm::cursor::{MoveDown, MoveUp};
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::Command;
use std::fmt::Write;

/// Column separator (U+2502)
const SEPARATOR: &str = "\u{2502}";

/// Blank line plus header line above the device rows
const HEADER_LINES: usize = 2;

/// Turns a snapshot into bytes for the terminal or a pipe
pub trait Renderer {
    /// Build one frame
    fn render(&mut self, snapshot: &Snapshot) -> Result<String>;

    /// Trailer written once when the loop stops, if anything
    fn finish(&mut self) -> Option<String> {
        None
    }
}

/// Color for a threshold band
pub fn band_color(band: ThresholdBand) -> Color {
    match band {
        ThresholdBand::Normal => Color::DarkGreen,
        ThresholdBand::Warn => Color::DarkYellow,
        ThresholdBand::Danger => Color::DarkRed,
    }
}

/// In-place, color-coded table
///
/// Lines end in `\r\n` because the terminal is in raw mode.
#[derive(Debug, Clone)]
pub struct TableRenderer {
    thresholds: MetricThresholds,
    marker: bool,
    drawn_lines: Option<usize>,
}

impl TableRenderer {
    pub fn new(thresholds: MetricThresholds) -> Self {
        Self {
            thresholds,
            marker: false,
            drawn_lines: None,
        }
    }

    fn cell(frame: &mut String, temp: Temperature, thresholds: &Thresholds) -> Result<()> {
        SetForegroundColor(band_color(thresholds.band(temp))).write_ansi(frame)?;
        write!(frame, "{:3}°C", temp.as_celsius())?;
        ResetColor.write_ansi(frame)?;
        Ok(())
    }
}

impl Renderer for TableRenderer {
    fn render(&mut self, snapshot: &Snapshot) -> Result<String> {
        let mut frame = String::new();

        // Alternating marker shows the table is still refreshing.
        let marker = if self.marker { "* " } else { "  " };
        self.marker = !self.marker;

        write!(
            frame,
            "\r\n{marker}{SEPARATOR}  CORE  {SEPARATOR}  JUNC  {SEPARATOR}  VRAM  {SEPARATOR}\r\n"
        )?;

        for sample in &snapshot.gpus {
            write!(frame, "{} {SEPARATOR} ", sample.index)?;
            Self::cell(&mut frame, sample.core, &self.thresholds.core)?;
            write!(frame, "  {SEPARATOR} ")?;
            Self::cell(&mut frame, sample.junction, &self.thresholds.junction)?;
            write!(frame, "  {SEPARATOR} ")?;
            Self::cell(&mut frame, sample.vram, &self.thresholds.vram)?;
            write!(frame, "  {SEPARATOR}\r\n")?;
        }

        let lines = snapshot.len() + HEADER_LINES;
        MoveUp(lines as u16).write_ansi(&mut frame)?;
        self.drawn_lines = Some(lines);

        Ok(frame)
    }

    fn finish(&mut self) -> Option<String> {
        let lines = self.drawn_lines.take()?;
        let mut trailer = String::new();
        MoveDown(lines as u16).write_ansi(&mut trailer).ok()?;
        trailer.push_str("\r\n");
        Some(trailer)
    }
}

/// One JSON object per line per cycle
#[derive(Debug, Clone, Default)]
pub struct RecordRenderer;

impl RecordRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for RecordRenderer {
    fn render(&mut self, snapshot: &Snapshot) -> Result<String> {
        let mut line = serde_json::to_string(snapshot)?;
        line.push('\n');
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sample;

    fn sample(index: u32, core: u32, junction: u32, vram: u32, at: i64) -> Sample {
        Sample::new(
            index,
            Temperature::new(core),
            Temperature::new(junction),
            Temperature::new(vram),
            at,
        )
    }

    fn two_device_snapshot() -> Snapshot {
        let t = 1_700_000_000;
        Snapshot::new(t, vec![sample(0, 45, 50, 30, t), sample(1, 60, 70, 40, t)])
    }

    #[test]
    fn test_record_lists_devices_in_order() {
        let line = RecordRenderer::new().render(&two_device_snapshot()).unwrap();
        assert_eq!(
            line,
            "{\"timestamp\":1700000000,\"gpus\":[\
             {\"index\":0,\"core\":45,\"junction\":50,\"vram\":30},\
             {\"index\":1,\"core\":60,\"junction\":70,\"vram\":40}]}\n"
        );
    }

    #[test]
    fn test_record_has_no_trailer() {
        let mut renderer = RecordRenderer::new();
        renderer.render(&two_device_snapshot()).unwrap();
        assert!(renderer.finish().is_none());
    }

    #[test]
    fn test_table_rows_and_cursor_rewind() {
        let mut renderer = TableRenderer::new(MetricThresholds::default());
        let frame = renderer.render(&two_device_snapshot()).unwrap();

        assert!(frame.starts_with("\r\n  │  CORE  │  JUNC  │  VRAM  │\r\n"));
        assert!(frame.contains("0 │ "));
        assert!(frame.contains(" 45°C"));
        assert!(frame.contains("1 │ "));
        assert!(frame.contains(" 70°C"));
        assert!(frame.ends_with("\x1b[4A"));
        assert_eq!(frame.matches("\r\n").count(), 4);
    }

    #[test]
    fn test_table_marker_alternates() {
        let mut renderer = TableRenderer::new(MetricThresholds::default());
        let snapshot = two_device_snapshot();
        let first = renderer.render(&snapshot).unwrap();
        let second = renderer.render(&snapshot).unwrap();
        let third = renderer.render(&snapshot).unwrap();

        assert!(first.starts_with("\r\n  │"));
        assert!(second.starts_with("\r\n* │"));
        assert!(third.starts_with("\r\n  │"));
    }

    #[test]
    fn test_table_colors_follow_bands() {
        let mut renderer = TableRenderer::new(MetricThresholds::default());
        let mut expected = String::new();
        SetForegroundColor(Color::DarkRed)
            .write_ansi(&mut expected)
            .unwrap();
        expected.push_str(" 85°C");

        let snapshot = Snapshot::new(0, vec![sample(0, 85, 10, 10, 0)]);
        let frame = renderer.render(&snapshot).unwrap();
        assert!(frame.contains(&expected));
    }

    #[test]
    fn test_band_colors_distinct() {
        assert_ne!(
            band_color(ThresholdBand::Normal),
            band_color(ThresholdBand::Warn)
        );
        assert_ne!(
            band_color(ThresholdBand::Warn),
            band_color(ThresholdBand::Danger)
        );
    }

    #[test]
    fn test_table_trailer_moves_below_frame_once() {
        let mut renderer = TableRenderer::new(MetricThresholds::default());
        assert!(renderer.finish().is_none());

        renderer.render(&two_device_snapshot()).unwrap();
        assert_eq!(renderer.finish().as_deref(), Some("\x1b[4B\r\n"));
        assert!(renderer.finish().is_none());
    }
}
