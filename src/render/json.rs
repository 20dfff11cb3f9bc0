//! JSON Rendering

use std::io::Write;

use super::{BarChart, ChartSink, RenderResult, TilePanel, TileSink};

/// Sink writing one JSON document per render call
///
/// Tiles are written as the panel itself, charts as their Chart.js
/// configuration, placeholders as `{"error": "..."}`.
pub struct JsonSink<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, pretty: true }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_value<T: serde::Serialize>(&mut self, value: &T) -> RenderResult<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, value)?;
        } else {
            serde_json::to_writer(&mut self.out, value)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> TileSink for JsonSink<W> {
    fn replace_tiles(&mut self, panel: &TilePanel) -> RenderResult<()> {
        self.write_value(panel)
    }

    fn tiles_unavailable(&mut self, message: &str) -> RenderResult<()> {
        self.write_value(&serde_json::json!({ "error": message }))
    }
}

impl<W: Write> ChartSink for JsonSink<W> {
    fn replace_chart(&mut self, chart: &BarChart) -> RenderResult<()> {
        self.write_value(&chart.to_chart_js())
    }

    fn chart_unavailable(&mut self, message: &str) -> RenderResult<()> {
        self.write_value(&serde_json::json!({ "error": message }))
    }
}
