//! Tooth drawing: turns a [`ToothRender`] plan into SVG elements.

use super::constants::*;
use super::geometry::{Outline, Segment, ToothGeometry};
use super::rules::ToothRender;
use super::svg_builder::SvgBuilder;

/// Draw one tooth with its top-left corner at `(x, y)`.
///
/// Elements are emitted in paint order: zones, zone marks, crown ring,
/// root canal marker, strike, implant, prosthesis border.
pub(super) fn draw_tooth(
    svg: &mut SvgBuilder,
    plan: &ToothRender,
    geom: &ToothGeometry,
    tooth: Option<&str>,
    x: f64,
    y: f64,
) {
    let size = geom.size;
    svg.open_group("tooth", tooth, x, y);

    for zone in &plan.zones {
        let shape = geom.zone(zone.zone);
        let fill = zone.fill.as_deref().unwrap_or(NORMAL_FILL);
        svg.path(
            &format!("zone zone-{}", zone.zone.name()),
            &shape.path_data(),
            fill,
            OUTLINE_COLOR,
            OUTLINE_WIDTH,
        );
    }

    for zone in &plan.zones {
        if let Some(ref mark) = zone.mark {
            let anchor = geom.zone(zone.zone).anchor();
            svg.text("zone-mark", anchor.x, anchor.y, &mark.text, size * ZONE_MARK_FONT, "bold", &mark.color);
        }
    }

    if let Some(ref ring) = plan.corona {
        match geom.corona {
            Outline::Square { origin, side } => {
                svg.rect("corona", origin.x, origin.y, side, side, "none", &ring.color, CORONA_WIDTH);
            }
            Outline::Circle { center, radius } => {
                svg.circle("corona", center.x, center.y, radius, "none", &ring.color, CORONA_WIDTH);
            }
        }
    }

    if let Some(ref endo) = plan.endo {
        let [a, b, c] = geom.endo;
        let d = format!(
            "M{:.2},{:.2} L{:.2},{:.2} L{:.2},{:.2} Z",
            a.x, a.y, b.x, b.y, c.x, c.y
        );
        svg.path("endo", &d, "none", &endo.color, ENDO_WIDTH);
    }

    if let Some(ref strike) = plan.strike {
        for segment in &geom.strike {
            draw_segment(svg, "strike", segment, &strike.color, STRIKE_WIDTH, false);
        }
    }

    if let Some(ref implant) = plan.implant {
        svg.text("implant", geom.center.x, geom.center.y, "I", size * IMPLANT_FONT, "bold", &implant.color);
    }

    if let Some(ref border) = plan.prosthesis {
        let frame = &geom.frame;
        draw_segment(svg, "prosthesis prosthesis-top", &frame.top, &border.color, FRAME_WIDTH, border.dashed);
        draw_segment(svg, "prosthesis prosthesis-bottom", &frame.bottom, &border.color, FRAME_WIDTH, border.dashed);
        if border.left {
            draw_segment(svg, "prosthesis prosthesis-left", &frame.left, &border.color, FRAME_WIDTH, border.dashed);
        }
        if border.right {
            draw_segment(svg, "prosthesis prosthesis-right", &frame.right, &border.color, FRAME_WIDTH, border.dashed);
        }
    }

    svg.close_group();
}

fn draw_segment(svg: &mut SvgBuilder, class: &str, segment: &Segment, color: &str, width: f64, dashed: bool) {
    svg.line(class, segment.from.x, segment.from.y, segment.to.x, segment.to.y, color, width, dashed);
}
