//! Terminal Rendering
//!
//! Plain text tiles and a horizontal ASCII bar chart. Each call writes a
//! fresh rendering of the region to the underlying writer.

use std::io::Write;

use super::{BarChart, ChartSink, RenderResult, TilePanel, TileSink};

/// Default width of the longest bar, in characters
const DEFAULT_BAR_WIDTH: usize = 40;

/// Sink writing human-readable text
pub struct TerminalSink<W: Write> {
    out: W,
    bar_width: usize,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }

    pub fn bar_width(mut self, width: usize) -> Self {
        self.bar_width = width.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn bar_len(&self, value: u64, max: u64) -> usize {
        if max == 0 {
            return 0;
        }
        // Non-zero counts always get at least one cell
        let len = (value as f64 / max as f64 * self.bar_width as f64).round() as usize;
        if value > 0 {
            len.max(1)
        } else {
            0
        }
    }
}

impl<W: Write> TileSink for TerminalSink<W> {
    fn replace_tiles(&mut self, panel: &TilePanel) -> RenderResult<()> {
        let label_width = panel
            .tiles
            .iter()
            .map(|t| t.label.chars().count())
            .max()
            .unwrap_or(0);

        for tile in &panel.tiles {
            writeln!(
                self.out,
                "{:<width$}  {}",
                tile.label,
                tile.value,
                width = label_width
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn tiles_unavailable(&mut self, message: &str) -> RenderResult<()> {
        writeln!(self.out, "! {}", message)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> ChartSink for TerminalSink<W> {
    fn replace_chart(&mut self, chart: &BarChart) -> RenderResult<()> {
        if chart.show_legend {
            writeln!(self.out, "{}", chart.dataset_label)?;
        }

        if chart.is_empty() {
            writeln!(self.out, "(no genres)")?;
            self.out.flush()?;
            return Ok(());
        }

        let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let max = chart.values.iter().copied().max().unwrap_or(0);

        for (label, value) in chart.labels.iter().zip(&chart.values) {
            let bar = "#".repeat(self.bar_len(*value, max));
            writeln!(
                self.out,
                "{:<width$}  {} {}",
                label,
                bar,
                value,
                width = label_width
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn chart_unavailable(&mut self, message: &str) -> RenderResult<()> {
        writeln!(self.out, "! {}", message)?;
        self.out.flush()?;
        Ok(())
    }
}
