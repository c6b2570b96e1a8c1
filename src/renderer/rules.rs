//! Render rules: decide what a tooth looks like from its record.
//!
//! [`plan_tooth`] is pure: it reads a record and the injected taxonomy and
//! returns a [`ToothRender`] describing fills, marks and overlays. Drawing
//! that plan is left to [`super::tooth`], so the interactive views and the
//! print renderer share one set of rules.

use tracing::warn;

use crate::layout::Connection;
use crate::model::{Finding, FindingClass, ProsthesisKind, Progress, Silhouette, ToothRecord, Zone};
use crate::taxonomy::{Category, Taxonomy};
use super::constants::{IMPLANT_COLOR, ZONE_MARK_COLOR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRender {
    pub zone: Zone,
    /// `None` draws the zone in the normal (unfilled) color.
    pub fill: Option<String>,
    pub mark: Option<ZoneMark>,
}

/// Abbreviation centred in a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneMark {
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoronaRing {
    pub progress: Progress,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndoMarker {
    pub progress: Progress,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strike {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplantMarker {
    pub color: String,
}

/// Prosthesis border. `left`/`right` say whether that edge is drawn; they
/// are dropped where the run continues into a neighbour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProsthesisBorder {
    pub kind: ProsthesisKind,
    pub color: String,
    pub dashed: bool,
    pub left: bool,
    pub right: bool,
}

/// Everything needed to draw one tooth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToothRender {
    pub silhouette: Silhouette,
    pub zones: Vec<ZoneRender>,
    pub corona: Option<CoronaRing>,
    pub endo: Option<EndoMarker>,
    pub strike: Option<Strike>,
    pub implant: Option<ImplantMarker>,
    pub prosthesis: Option<ProsthesisBorder>,
}

impl ToothRender {
    pub fn zone(&self, zone: Zone) -> Option<&ZoneRender> {
        self.zones.iter().find(|z| z.zone == zone)
    }
}

/// Apply the render rules to one tooth.
///
/// `connection` comes from scanning the tooth's row neighbours
/// (see [`crate::layout::row_connections`]).
pub fn plan_tooth(
    record: &ToothRecord,
    silhouette: Silhouette,
    connection: Connection,
    taxonomy: &Taxonomy,
) -> ToothRender {
    let progress_color = |progress: Progress| {
        taxonomy
            .category_color(match progress {
                Progress::Needed => Category::Pathology,
                Progress::Done => Category::Treatment,
            })
            .to_string()
    };

    // Zone fills and marks. Crowns and root canals are drawn as overlays.
    let zones = Zone::ALL
        .into_iter()
        .map(|zone| {
            let Some(id) = record.zones.get(zone) else {
                return ZoneRender { zone, fill: None, mark: None };
            };
            let overlay = matches!(
                Finding::from_id(id).map(Finding::class),
                Some(FindingClass::Corona(_) | FindingClass::Endodontic(_))
            );
            if overlay {
                return ZoneRender { zone, fill: None, mark: None };
            }

            let Some(symbol) = taxonomy.get(id) else {
                warn!(finding = id, zone = zone.name(), "finding not in taxonomy, drawing plain zone");
                return ZoneRender { zone, fill: None, mark: None };
            };
            let mark = symbol.zone_mark.as_ref().map(|text| ZoneMark {
                text: text.clone(),
                color: ZONE_MARK_COLOR.to_string(),
            });
            ZoneRender {
                zone,
                fill: Some(symbol.color.clone()),
                mark,
            }
        })
        .collect();

    let corona = record.corona().map(|progress| CoronaRing {
        progress,
        color: progress_color(progress),
    });

    let endo = record.endodontics().map(|progress| EndoMarker {
        progress,
        color: progress_color(progress),
    });

    let mut strike = None;
    let mut implant = None;
    let mut prosthesis = None;
    match record.status_finding().map(Finding::class) {
        Some(FindingClass::Loss { extraction }) => {
            let category = if extraction { Category::Pathology } else { Category::Treatment };
            strike = Some(Strike {
                color: taxonomy.category_color(category).to_string(),
            });
        }
        Some(FindingClass::Implant) => {
            implant = Some(ImplantMarker {
                color: IMPLANT_COLOR.to_string(),
            });
        }
        Some(FindingClass::Prosthesis(kind)) => {
            prosthesis = Some(ProsthesisBorder {
                kind,
                color: taxonomy.category_color(Category::Treatment).to_string(),
                dashed: kind.is_dashed(),
                left: !connection.left,
                right: !connection.right,
            });
        }
        // Crowns were resolved above; surface findings have no whole-tooth look.
        Some(FindingClass::Corona(_) | FindingClass::Endodontic(_) | FindingClass::Surface) => {}
        None => {
            if let Some(status) = record.status.as_deref() {
                warn!(status, "unknown tooth status, drawing plain tooth");
            }
        }
    }

    ToothRender {
        silhouette,
        zones,
        corona,
        endo,
        strike,
        implant,
        prosthesis,
    }
}
