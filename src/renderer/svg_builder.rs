//! SVG builder: accumulates SVG elements and produces the final string.

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

pub(super) struct SvgBuilder {
    pub(super) elements: Vec<String>,
    width: f64,
    height: f64,
    metadata: Option<String>,
}

/// `id` of the `<metadata>` element carrying the embedded chart.
pub(crate) const CHART_METADATA_ID: &str = "odontogram-chart";

impl SvgBuilder {
    pub(super) fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
            metadata: None,
        }
    }

    pub(super) fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}" style="font-family: 'Helvetica', 'Arial', sans-serif;">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        if let Some(ref json) = self.metadata {
            svg.push_str(&format!(
                r#"  <metadata id="{}">{}</metadata>"#,
                CHART_METADATA_ID,
                escape(json)
            ));
            svg.push('\n');
        }
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Embed the serialized chart so the document can be reloaded.
    pub(super) fn metadata(&mut self, json: String) {
        self.metadata = Some(json);
    }

    pub(super) fn open_group(&mut self, class: &str, tooth: Option<&str>, x: f64, y: f64) {
        let data = tooth
            .map(|id| format!(r#" data-tooth="{}""#, escape(id)))
            .unwrap_or_default();
        self.elements.push(format!(
            r#"<g class="{}"{} transform="translate({:.1},{:.1})">"#,
            class, data, x, y
        ));
    }

    pub(super) fn close_group(&mut self) {
        self.elements.push("</g>".to_string());
    }

    pub(super) fn line(&mut self, class: &str, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64, dashed: bool) {
        let dash = if dashed {
            format!(r#" stroke-dasharray="{:.1},{:.1}""#, width * 2.5, width * 1.5)
        } else {
            String::new()
        };
        self.elements.push(format!(
            r#"<line class="{}" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"{}/>"#,
            class, x1, y1, x2, y2, color, width, dash
        ));
    }

    pub(super) fn rect(&mut self, class: &str, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: &str, stroke_width: f64) {
        if stroke_width > 0.0 {
            self.elements.push(format!(
                r#"<rect class="{}" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" stroke="{}" stroke-width="{:.1}"/>"#,
                class, x, y, w, h, fill, stroke, stroke_width
            ));
        } else {
            self.elements.push(format!(
                r#"<rect class="{}" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                class, x, y, w, h, fill
            ));
        }
    }

    pub(super) fn circle(&mut self, class: &str, cx: f64, cy: f64, r: f64, fill: &str, stroke: &str, stroke_width: f64) {
        self.elements.push(format!(
            r#"<circle class="{}" cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="{}" stroke-width="{:.1}"/>"#,
            class, cx, cy, r, fill, stroke, stroke_width
        ));
    }

    pub(super) fn text(&mut self, class: &str, x: f64, y: f64, content: &str, size: f64, weight: &str, fill: &str) {
        self.elements.push(format!(
            r#"<text class="{}" x="{:.1}" y="{:.1}" font-size="{:.1}" font-weight="{}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            class, x, y, size, weight, fill, escape(content)
        ));
    }

    pub(super) fn path(&mut self, class: &str, d: &str, fill: &str, stroke: &str, stroke_width: f64) {
        self.elements.push(format!(
            r#"<path class="{}" d="{}" fill="{}" stroke="{}" stroke-width="{:.1}" stroke-linejoin="round"/>"#,
            class, d, fill, stroke, stroke_width
        ));
    }
}

/// Escape markup and drop characters XML 1.0 cannot carry (C0 controls
/// other than tab, LF and CR, and U+FFFE/U+FFFF).
fn escape(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            _ => out.push(c),
        }
    }
    out
}
