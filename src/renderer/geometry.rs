//! Tooth geometry: the five zone shapes plus the supporting shapes used by
//! overlays, for either silhouette.
//!
//! Geometry depends only on the silhouette and the requested size. Shapes
//! are built once on the unit square and scaled uniformly.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

use glam::{dvec2, DVec2};

use crate::model::{Silhouette, Zone};
use super::constants::*;

/// Outline of one zone.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneShape {
    Polygon(Vec<DVec2>),
    /// Ring sector between two angles (radians, y axis pointing down).
    Wedge {
        center: DVec2,
        outer: f64,
        inner: f64,
        start: f64,
        end: f64,
    },
    Disc { center: DVec2, radius: f64 },
}

impl ZoneShape {
    fn scaled(&self, k: f64) -> Self {
        match self {
            ZoneShape::Polygon(points) => ZoneShape::Polygon(points.iter().map(|p| *p * k).collect()),
            ZoneShape::Wedge { center, outer, inner, start, end } => ZoneShape::Wedge {
                center: *center * k,
                outer: outer * k,
                inner: inner * k,
                start: *start,
                end: *end,
            },
            ZoneShape::Disc { center, radius } => ZoneShape::Disc {
                center: *center * k,
                radius: radius * k,
            },
        }
    }

    /// SVG path data for this shape.
    pub fn path_data(&self) -> String {
        match self {
            ZoneShape::Polygon(points) => {
                let mut d = String::new();
                for (i, p) in points.iter().enumerate() {
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    d.push_str(&format!("{}{:.2},{:.2} ", cmd, p.x, p.y));
                }
                d.push('Z');
                d
            }
            ZoneShape::Wedge { center, outer, inner, start, end } => {
                let o1 = polar(*center, *outer, *start);
                let o2 = polar(*center, *outer, *end);
                let i2 = polar(*center, *inner, *end);
                let i1 = polar(*center, *inner, *start);
                format!(
                    "M{:.2},{:.2} A{:.2},{:.2} 0 0 1 {:.2},{:.2} L{:.2},{:.2} A{:.2},{:.2} 0 0 0 {:.2},{:.2} Z",
                    o1.x, o1.y, outer, outer, o2.x, o2.y,
                    i2.x, i2.y, inner, inner, i1.x, i1.y,
                )
            }
            ZoneShape::Disc { center, radius } => format!(
                "M{:.2},{:.2} A{:.2},{:.2} 0 1 1 {:.2},{:.2} A{:.2},{:.2} 0 1 1 {:.2},{:.2} Z",
                center.x - radius, center.y,
                radius, radius, center.x + radius, center.y,
                radius, radius, center.x - radius, center.y,
            ),
        }
    }

    /// Point where a mark inside the zone is centred.
    pub fn anchor(&self) -> DVec2 {
        match self {
            ZoneShape::Polygon(points) => {
                points.iter().copied().sum::<DVec2>() / points.len().max(1) as f64
            }
            ZoneShape::Wedge { center, outer, inner, start, end } => {
                polar(*center, (outer + inner) / 2.0, (start + end) / 2.0)
            }
            ZoneShape::Disc { center, .. } => *center,
        }
    }
}

/// Outline used for the crown ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outline {
    Square { origin: DVec2, side: f64 },
    Circle { center: DVec2, radius: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: DVec2,
    pub to: DVec2,
}

impl Segment {
    fn new(from: DVec2, to: DVec2) -> Self {
        Self { from, to }
    }

    fn scaled(self, k: f64) -> Self {
        Self::new(self.from * k, self.to * k)
    }
}

/// The four edges of a prosthesis border, slightly outside the tooth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub top: Segment,
    pub bottom: Segment,
    pub left: Segment,
    pub right: Segment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToothGeometry {
    pub silhouette: Silhouette,
    pub size: f64,
    pub center: DVec2,
    pub zones: [(Zone, ZoneShape); 5],
    pub corona: Outline,
    pub strike: [Segment; 2],
    pub frame: Frame,
    /// Vertices of the root canal triangle.
    pub endo: [DVec2; 3],
}

impl ToothGeometry {
    pub fn new(silhouette: Silhouette, size: f64) -> Self {
        Self::unit(silhouette).scaled(size)
    }

    pub fn zone(&self, zone: Zone) -> &ZoneShape {
        // zones is built in Zone::ALL order
        &self.zones[Zone::ALL.iter().position(|z| *z == zone).unwrap_or(0)].1
    }

    fn unit(silhouette: Silhouette) -> Self {
        let c = dvec2(0.5, 0.5);
        let a = (1.0 - INNER_FRACTION) / 2.0;
        let b = 1.0 - a;

        let (zones, corona, strike) = match silhouette {
            Silhouette::Rectangular => {
                let zones = [
                    (Zone::Top, quad(dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(b, a), dvec2(a, a))),
                    (Zone::Bottom, quad(dvec2(a, b), dvec2(b, b), dvec2(1.0, 1.0), dvec2(0.0, 1.0))),
                    (Zone::Left, quad(dvec2(0.0, 0.0), dvec2(a, a), dvec2(a, b), dvec2(0.0, 1.0))),
                    (Zone::Right, quad(dvec2(1.0, 0.0), dvec2(1.0, 1.0), dvec2(b, b), dvec2(b, a))),
                    (Zone::Center, quad(dvec2(a, a), dvec2(b, a), dvec2(b, b), dvec2(a, b))),
                ];
                let corona = Outline::Square {
                    origin: dvec2(CORONA_INSET, CORONA_INSET),
                    side: 1.0 - 2.0 * CORONA_INSET,
                };
                let strike = [
                    Segment::new(dvec2(0.0, 0.0), dvec2(1.0, 1.0)),
                    Segment::new(dvec2(1.0, 0.0), dvec2(0.0, 1.0)),
                ];
                (zones, corona, strike)
            }
            Silhouette::Circular => {
                let outer = 0.5;
                let inner = INNER_FRACTION / 2.0;
                let wedge = |mid: f64| ZoneShape::Wedge {
                    center: c,
                    outer,
                    inner,
                    start: mid - FRAC_PI_4,
                    end: mid + FRAC_PI_4,
                };
                let zones = [
                    (Zone::Top, wedge(-2.0 * FRAC_PI_4)),
                    (Zone::Bottom, wedge(2.0 * FRAC_PI_4)),
                    (Zone::Left, wedge(4.0 * FRAC_PI_4)),
                    (Zone::Right, wedge(0.0)),
                    (Zone::Center, ZoneShape::Disc { center: c, radius: inner }),
                ];
                let corona = Outline::Circle { center: c, radius: outer - CORONA_INSET };
                let d = outer * FRAC_1_SQRT_2;
                let strike = [
                    Segment::new(c + dvec2(-d, -d), c + dvec2(d, d)),
                    Segment::new(c + dvec2(d, -d), c + dvec2(-d, d)),
                ];
                (zones, corona, strike)
            }
        };

        let o = FRAME_OVERHANG;
        let (lo, hi) = (-o, 1.0 + o);
        let frame = Frame {
            top: Segment::new(dvec2(lo, lo), dvec2(hi, lo)),
            bottom: Segment::new(dvec2(lo, hi), dvec2(hi, hi)),
            left: Segment::new(dvec2(lo, lo), dvec2(lo, hi)),
            right: Segment::new(dvec2(hi, lo), dvec2(hi, hi)),
        };

        let side = ENDO_SIZE;
        let h = side * 3f64.sqrt() / 2.0;
        let endo = [
            c + dvec2(0.0, -h * 2.0 / 3.0),
            c + dvec2(side / 2.0, h / 3.0),
            c + dvec2(-side / 2.0, h / 3.0),
        ];

        Self {
            silhouette,
            size: 1.0,
            center: c,
            zones,
            corona,
            strike,
            frame,
            endo,
        }
    }

    fn scaled(self, k: f64) -> Self {
        Self {
            silhouette: self.silhouette,
            size: self.size * k,
            center: self.center * k,
            zones: self.zones.map(|(zone, shape)| (zone, shape.scaled(k))),
            corona: match self.corona {
                Outline::Square { origin, side } => Outline::Square { origin: origin * k, side: side * k },
                Outline::Circle { center, radius } => Outline::Circle { center: center * k, radius: radius * k },
            },
            strike: self.strike.map(|s| s.scaled(k)),
            frame: Frame {
                top: self.frame.top.scaled(k),
                bottom: self.frame.bottom.scaled(k),
                left: self.frame.left.scaled(k),
                right: self.frame.right.scaled(k),
            },
            endo: self.endo.map(|p| p * k),
        }
    }
}

fn quad(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> ZoneShape {
    ZoneShape::Polygon(vec![p0, p1, p2, p3])
}

fn polar(center: DVec2, radius: f64, angle: f64) -> DVec2 {
    center + DVec2::from_angle(angle) * radius
}
