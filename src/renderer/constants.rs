//! Shared constants for the chart renderer (all in SVG user units).

// ── Page & margins ──────────────────────────────────────────────────
pub(super) const DEFAULT_TOOTH_SIZE: f64 = 40.0;
pub(super) const DEFAULT_TOOTH_GAP: f64 = 6.0; // horizontal space between teeth
pub(super) const DEFAULT_ROW_GAP: f64 = 34.0; // vertical space between arch rows
pub(super) const DEFAULT_MARGIN: f64 = 20.0;
pub(super) const LABEL_HEIGHT: f64 = 14.0; // tooth number above each tooth
pub(super) const CAPTION_HEIGHT: f64 = 24.0; // recession/mobility lines below

// ── Tooth proportions (fractions of the tooth size) ─────────────────
pub(super) const INNER_FRACTION: f64 = 0.5; // central zone side / diameter
pub(super) const CORONA_INSET: f64 = 0.04; // ring sits just inside the outline
pub(super) const FRAME_OVERHANG: f64 = 0.12; // prosthesis frame beyond the tooth
pub(super) const ENDO_SIZE: f64 = 0.22; // side of the root canal triangle
pub(super) const ZONE_MARK_FONT: f64 = 0.22;
pub(super) const IMPLANT_FONT: f64 = 0.7;

// ── Stroke widths ───────────────────────────────────────────────────
pub(super) const OUTLINE_WIDTH: f64 = 1.0;
pub(super) const CORONA_WIDTH: f64 = 2.5;
pub(super) const ENDO_WIDTH: f64 = 1.8;
pub(super) const STRIKE_WIDTH: f64 = 2.5;
pub(super) const FRAME_WIDTH: f64 = 2.0;
pub(super) const MIDLINE_WIDTH: f64 = 1.0;

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const NORMAL_FILL: &str = "#ffffff";
pub(super) const OUTLINE_COLOR: &str = "#333333";
pub(super) const ZONE_MARK_COLOR: &str = "#ffffff";
pub(super) const IMPLANT_COLOR: &str = "#2e7d32";
pub(super) const LABEL_COLOR: &str = "#1a1a1a";
pub(super) const CAPTION_COLOR: &str = "#555555";
pub(super) const MIDLINE_COLOR: &str = "#999999";
