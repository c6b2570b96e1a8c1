//! Chart renderer: converts a chart into self-contained SVG output.
//!
//! The same render rules drive the single-tooth previews used by the
//! editor and the printable whole-chart document, which also embeds the
//! chart it was drawn from so the file can be loaded back.

mod constants;
pub mod geometry;
pub mod rules;
mod svg_builder;
mod tooth;

use serde::{Deserialize, Serialize};

use crate::chart::ChartState;
use crate::error::ChartError;
use crate::layout::{row_connections, Connection, ARCH_ROWS};
use crate::model::{Silhouette, ToothRecord};
use crate::taxonomy::Taxonomy;
use constants::*;
use geometry::ToothGeometry;
use rules::plan_tooth;
use svg_builder::{SvgBuilder, CHART_METADATA_ID};
use tooth::draw_tooth;

pub use rules::ToothRender;

// ═══════════════════════════════════════════════════════════════════════
// Options
// ═══════════════════════════════════════════════════════════════════════

/// Layout knobs for the printed chart. Missing fields take their defaults;
/// zero or negative sizes are treated as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Side (or diameter) of one tooth.
    pub tooth_size: f64,
    /// Horizontal space between neighbouring teeth.
    pub tooth_gap: f64,
    /// Vertical space between arch rows.
    pub row_gap: f64,
    pub margin: f64,
    /// Print the FDI number above each tooth.
    pub show_numbers: bool,
    /// Print recession and mobility under each tooth.
    pub show_measurements: bool,
    /// Embed the chart JSON so the document can be reloaded.
    pub embed_chart: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tooth_size: DEFAULT_TOOTH_SIZE,
            tooth_gap: DEFAULT_TOOTH_GAP,
            row_gap: DEFAULT_ROW_GAP,
            margin: DEFAULT_MARGIN,
            show_numbers: true,
            show_measurements: true,
            embed_chart: true,
        }
    }
}

impl RenderOptions {
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Default options with a different tooth size. `None` or a
    /// non-positive size keeps the default.
    pub fn with_tooth_size(tooth_size: Option<f64>) -> Self {
        Self {
            tooth_size: positive_or(tooth_size.unwrap_or(0.0), DEFAULT_TOOTH_SIZE),
            ..Self::default()
        }
    }

    fn normalized(&self) -> Self {
        Self {
            tooth_size: positive_or(self.tooth_size, DEFAULT_TOOTH_SIZE),
            tooth_gap: non_negative_or(self.tooth_gap, DEFAULT_TOOTH_GAP),
            row_gap: non_negative_or(self.row_gap, DEFAULT_ROW_GAP),
            margin: non_negative_or(self.margin, DEFAULT_MARGIN),
            ..self.clone()
        }
    }
}

fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { default }
}

fn non_negative_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 { value } else { default }
}

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render a single tooth into a complete SVG string.
///
/// `size` is the tooth side in user units; `None` (or 0.0 from FFI) uses
/// the default (40). The canvas leaves room for a prosthesis frame.
pub fn render_tooth_to_svg(
    record: &ToothRecord,
    silhouette: Silhouette,
    size: Option<f64>,
    connection: Connection,
    taxonomy: &Taxonomy,
) -> String {
    let size = positive_or(size.unwrap_or(0.0), DEFAULT_TOOTH_SIZE);
    let pad = size * FRAME_OVERHANG + FRAME_WIDTH;
    let extent = size + 2.0 * pad;

    let plan = plan_tooth(record, silhouette, connection, taxonomy);
    let geom = ToothGeometry::new(silhouette, size);

    let mut svg = SvgBuilder::new(extent, extent);
    draw_tooth(&mut svg, &plan, &geom, None, pad, pad);
    svg.build()
}

/// Render the whole chart as a printable arch diagram.
///
/// Rows run permanent upper, primary upper, primary lower, permanent lower;
/// each row is split at the midline with the patient's right on the left
/// of the page. Prosthesis runs are joined across neighbours, midline
/// included.
pub fn render_chart_to_svg(
    chart: &ChartState,
    taxonomy: &Taxonomy,
    options: &RenderOptions,
) -> Result<String, ChartError> {
    let opts = options.normalized();
    let size = opts.tooth_size;
    let gap = opts.tooth_gap;
    let pitch = size + gap;
    // the midline sits in an ordinary gap so prosthesis frames still meet across it
    let midline_gap = gap;

    let widest_side = ARCH_ROWS
        .iter()
        .map(|row| row.right.len().max(row.left.len()))
        .max()
        .unwrap_or(0) as f64;
    let side_width = (widest_side * pitch - gap).max(0.0);
    let page_width = 2.0 * opts.margin + 2.0 * side_width + midline_gap;
    let mid_x = page_width / 2.0;

    let label_height = if opts.show_numbers { LABEL_HEIGHT } else { 0.0 };
    let caption_height = if opts.show_measurements { CAPTION_HEIGHT } else { 0.0 };
    let row_height = label_height + size + caption_height;
    let rows = ARCH_ROWS.len() as f64;
    let page_height = 2.0 * opts.margin + rows * row_height + (rows - 1.0).max(0.0) * opts.row_gap;

    let mut svg = SvgBuilder::new(page_width, page_height);
    svg.rect("background", 0.0, 0.0, page_width, page_height, "white", "none", 0.0);

    if opts.embed_chart {
        svg.metadata(chart.to_json()?);
    }

    svg.line(
        "midline",
        mid_x,
        opts.margin,
        mid_x,
        page_height - opts.margin,
        MIDLINE_COLOR,
        MIDLINE_WIDTH,
        false,
    );

    let rect_geom = ToothGeometry::new(Silhouette::Rectangular, size);
    let circ_geom = ToothGeometry::new(Silhouette::Circular, size);

    for (r, row) in ARCH_ROWS.iter().enumerate() {
        let row_top = opts.margin + r as f64 * (row_height + opts.row_gap);
        let tooth_y = row_top + label_height;

        let teeth = row.teeth();
        let connections = row_connections(chart, &teeth);

        for (i, (id, connection)) in teeth.iter().zip(connections).enumerate() {
            let x = if i < row.right.len() {
                // patient's right runs toward the midline
                let from_mid = (row.right.len() - i) as f64;
                mid_x - midline_gap / 2.0 - from_mid * pitch + gap
            } else {
                let j = (i - row.right.len()) as f64;
                mid_x + midline_gap / 2.0 + j * pitch
            };

            let key = id.to_string();
            let record = chart.get(&key);
            let silhouette = id.silhouette();
            let geom = match silhouette {
                Silhouette::Rectangular => &rect_geom,
                Silhouette::Circular => &circ_geom,
            };
            let plan = plan_tooth(&record, silhouette, connection, taxonomy);
            draw_tooth(&mut svg, &plan, geom, Some(&key), x, tooth_y);

            let cx = x + size / 2.0;
            if opts.show_numbers {
                svg.text("tooth-number", cx, row_top + LABEL_HEIGHT / 2.0, &key, LABEL_HEIGHT * 0.8, "bold", LABEL_COLOR);
            }
            if opts.show_measurements {
                render_measurements(&mut svg, &record, cx, tooth_y + size);
            }
        }
    }

    Ok(svg.build())
}

/// Load the chart embedded in a document produced by [`render_chart_to_svg`].
pub fn chart_from_svg(svg: &str) -> Result<ChartState, ChartError> {
    let doc = roxmltree::Document::parse(svg)?;
    let node = doc
        .descendants()
        .find(|n| n.has_tag_name("metadata") && n.attribute("id") == Some(CHART_METADATA_ID))
        .ok_or(ChartError::MissingChartMetadata)?;
    ChartState::from_json(node.text().unwrap_or_default())
}

// ═══════════════════════════════════════════════════════════════════════
// Captions
// ═══════════════════════════════════════════════════════════════════════

fn render_measurements(svg: &mut SvgBuilder, record: &ToothRecord, cx: f64, top: f64) {
    let line = CAPTION_HEIGHT / 2.0;
    let font = line * 0.8;
    if let Some(ref recesion) = record.recesion {
        svg.text("caption caption-recesion", cx, top + line * 0.5, &format!("R: {recesion}"), font, "normal", CAPTION_COLOR);
    }
    if let Some(ref movilidad) = record.movilidad {
        svg.text("caption caption-movilidad", cx, top + line * 1.5, &format!("M: {movilidad}"), font, "normal", CAPTION_COLOR);
    }
}
