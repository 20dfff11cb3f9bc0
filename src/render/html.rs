//! HTML Rendering
//!
//! Markup for the browser version of the dashboard: a tile region, a chart
//! canvas driven by Chart.js, and a page that hosts both.

use super::{BarChart, ChartSink, RenderResult, TilePanel, TileSink};

/// Chart.js bundle loaded by standalone pages
const CHART_JS_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Escape text for use inside HTML elements and attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// One element of the page, identified by its `id`
///
/// Holds the inner markup of the element. Each render call replaces the
/// markup wholesale.
#[derive(Debug, Clone)]
pub struct HtmlRegion {
    id: String,
    markup: String,
}

impl HtmlRegion {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            markup: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current inner markup
    pub fn markup(&self) -> &str {
        &self.markup
    }

    fn placeholder(&mut self, message: &str) {
        self.markup = format!("<p class=\"placeholder\">{}</p>", escape_html(message));
    }
}

impl TileSink for HtmlRegion {
    fn replace_tiles(&mut self, panel: &TilePanel) -> RenderResult<()> {
        self.markup = panel
            .tiles
            .iter()
            .map(|tile| {
                format!(
                    "<div class=\"tile\"><div>{}</div><h2>{}</h2></div>",
                    escape_html(&tile.label),
                    escape_html(&tile.value)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        Ok(())
    }

    fn tiles_unavailable(&mut self, message: &str) -> RenderResult<()> {
        self.placeholder(message);
        Ok(())
    }
}

impl ChartSink for HtmlRegion {
    fn replace_chart(&mut self, chart: &BarChart) -> RenderResult<()> {
        // `</` would end the script element early
        let config = serde_json::to_string(&chart.to_chart_js())?.replace("</", "<\\/");
        let id = escape_html(&self.id);
        self.markup = format!(
            "<canvas id=\"{id}-canvas\"></canvas>\n<script>new Chart(document.getElementById(\"{id}-canvas\"), {config});</script>"
        );
        Ok(())
    }

    fn chart_unavailable(&mut self, message: &str) -> RenderResult<()> {
        self.placeholder(message);
        Ok(())
    }
}

/// Standalone dashboard document
#[derive(Debug, Clone)]
pub struct HtmlPage {
    title: String,
}

impl Default for HtmlPage {
    fn default() -> Self {
        Self::new("Catalog Analytics")
    }
}

impl HtmlPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Render a full document hosting the given regions
    pub fn render(&self, tiles: &HtmlRegion, chart: &HtmlRegion) -> String {
        let title = escape_html(&self.title);
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{chart_js}"></script>
<style>
  #{tiles_id} {{ display: flex; gap: 1rem; flex-wrap: wrap; }}
  .tile {{ border: 1px solid #ddd; border-radius: 8px; padding: 0.75rem 1rem; min-width: 9rem; }}
  .placeholder {{ color: #888; }}
</style>
</head>
<body>
<h1>{title}</h1>
<div id="{tiles_id}">
{tiles}
</div>
<div id="{chart_id}">
{chart}
</div>
</body>
</html>
"#,
            title = title,
            chart_js = CHART_JS_SRC,
            tiles_id = escape_html(tiles.id()),
            tiles = tiles.markup(),
            chart_id = escape_html(chart.id()),
            chart = chart.markup(),
        )
    }
}
