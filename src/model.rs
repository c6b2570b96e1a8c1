//! Data model for an odontogram chart.
//!
//! Every tooth is described by a [`ToothRecord`]: five surface zones, one
//! optional whole-tooth status and two free-text measurements. Records are
//! plain serde structures so the same shape travels between the record API,
//! the interactive views and the print renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ChartError;
use crate::layout;

// ═══════════════════════════════════════════════════════════════════════
// Teeth and zones
// ═══════════════════════════════════════════════════════════════════════

/// FDI tooth number: 11–48 for permanent teeth, 51–85 for primary teeth.
///
/// Only numbers listed in the chart layouts are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToothId(u8);

impl ToothId {
    pub fn new(number: u8) -> Option<Self> {
        layout::is_charted(number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn dentition(self) -> Dentition {
        if layout::PRIMARY_TEETH.contains(&self.0) {
            Dentition::Primary
        } else {
            Dentition::Permanent
        }
    }

    /// Primary teeth are drawn round, permanent teeth square.
    pub fn silhouette(self) -> Silhouette {
        match self.dentition() {
            Dentition::Permanent => Silhouette::Rectangular,
            Dentition::Primary => Silhouette::Circular,
        }
    }
}

impl fmt::Display for ToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ToothId {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(ToothId::new)
            .ok_or_else(|| ChartError::UnknownTooth(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dentition {
    Permanent,
    Primary,
}

/// The two tooth outlines the chart knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Silhouette {
    Rectangular,
    Circular,
}

/// One of the five markable regions of a tooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl Zone {
    pub const ALL: [Zone; 5] = [Zone::Top, Zone::Bottom, Zone::Left, Zone::Right, Zone::Center];

    pub fn name(self) -> &'static str {
        match self {
            Zone::Top => "top",
            Zone::Bottom => "bottom",
            Zone::Left => "left",
            Zone::Right => "right",
            Zone::Center => "center",
        }
    }
}

/// Finding id per zone. Empty zones are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<String>,
}

impl ZoneMap {
    pub fn get(&self, zone: Zone) -> Option<&str> {
        self.slot(zone).as_deref()
    }

    pub fn set(&mut self, zone: Zone, finding: Option<String>) {
        *self.slot_mut(zone) = finding;
    }

    /// Zones holding a finding, in [`Zone::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &str)> + '_ {
        Zone::ALL
            .into_iter()
            .filter_map(move |zone| self.get(zone).map(|id| (zone, id)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn slot(&self, zone: Zone) -> &Option<String> {
        match zone {
            Zone::Top => &self.top,
            Zone::Bottom => &self.bottom,
            Zone::Left => &self.left,
            Zone::Right => &self.right,
            Zone::Center => &self.center,
        }
    }

    fn slot_mut(&mut self, zone: Zone) -> &mut Option<String> {
        match zone {
            Zone::Top => &mut self.top,
            Zone::Bottom => &mut self.bottom,
            Zone::Left => &mut self.left,
            Zone::Right => &mut self.right,
            Zone::Center => &mut self.center,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Findings
// ═══════════════════════════════════════════════════════════════════════

/// Every finding id the chart understands.
///
/// Records store ids as strings so that ids written by newer or foreign
/// taxonomies survive a load/save cycle; [`Finding::from_id`] returns `None`
/// for those and they render as plain teeth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finding {
    Caries,
    SellanteNec,
    ExtraccionInd,
    Endodoncia,
    Obturacion,
    Sellante,
    PerdidaCaries,
    PerdidaOtra,
    EndodonciaReal,
    Corona,
    CoronaNec,
    Fija,
    Removible,
    ProtTotal,
    Ausente,
    Implante,
}

/// Whether a finding records pending work or work already done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Progress {
    Needed,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProsthesisKind {
    Fixed,
    Removable,
    Total,
}

impl ProsthesisKind {
    pub fn is_dashed(self) -> bool {
        matches!(self, ProsthesisKind::Removable)
    }
}

/// How a finding is drawn and which axis of the record it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingClass {
    /// Fills the zone it is placed on.
    Surface,
    /// Ring around the whole tooth.
    Corona(Progress),
    /// Single marker near the centre of the tooth.
    Endodontic(Progress),
    /// Tooth is gone or due to go; crossed out.
    Loss { extraction: bool },
    Implant,
    Prosthesis(ProsthesisKind),
}

impl Finding {
    pub const ALL: [Finding; 16] = [
        Finding::Caries,
        Finding::SellanteNec,
        Finding::ExtraccionInd,
        Finding::Endodoncia,
        Finding::Obturacion,
        Finding::Sellante,
        Finding::PerdidaCaries,
        Finding::PerdidaOtra,
        Finding::EndodonciaReal,
        Finding::Corona,
        Finding::CoronaNec,
        Finding::Fija,
        Finding::Removible,
        Finding::ProtTotal,
        Finding::Ausente,
        Finding::Implante,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Finding::Caries => "caries",
            Finding::SellanteNec => "sellante_nec",
            Finding::ExtraccionInd => "extraccion_ind",
            Finding::Endodoncia => "endodoncia",
            Finding::Obturacion => "obturacion",
            Finding::Sellante => "sellante",
            Finding::PerdidaCaries => "perdida_caries",
            Finding::PerdidaOtra => "perdida_otra",
            Finding::EndodonciaReal => "endodoncia_real",
            Finding::Corona => "corona",
            Finding::CoronaNec => "corona_nec",
            Finding::Fija => "fija",
            Finding::Removible => "removible",
            Finding::ProtTotal => "prot_total",
            Finding::Ausente => "ausente",
            Finding::Implante => "implante",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Finding::ALL.into_iter().find(|f| f.id() == id)
    }

    pub fn class(self) -> FindingClass {
        match self {
            Finding::Caries | Finding::SellanteNec | Finding::Obturacion | Finding::Sellante => {
                FindingClass::Surface
            }
            Finding::Endodoncia => FindingClass::Endodontic(Progress::Needed),
            Finding::EndodonciaReal => FindingClass::Endodontic(Progress::Done),
            Finding::Corona => FindingClass::Corona(Progress::Done),
            Finding::CoronaNec => FindingClass::Corona(Progress::Needed),
            Finding::ExtraccionInd => FindingClass::Loss { extraction: true },
            Finding::PerdidaCaries | Finding::PerdidaOtra | Finding::Ausente => {
                FindingClass::Loss { extraction: false }
            }
            Finding::Implante => FindingClass::Implant,
            Finding::Fija => FindingClass::Prosthesis(ProsthesisKind::Fixed),
            Finding::Removible => FindingClass::Prosthesis(ProsthesisKind::Removable),
            Finding::ProtTotal => FindingClass::Prosthesis(ProsthesisKind::Total),
        }
    }

    /// Findings that always describe the whole tooth and are stored in
    /// `status`, whatever the user dropped them on.
    pub fn is_whole_tooth(self) -> bool {
        matches!(
            self.class(),
            FindingClass::Loss { .. } | FindingClass::Implant | FindingClass::Prosthesis(_)
        )
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Where a finding was aimed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Zone(Zone),
    Tooth,
}

/// Where a finding ended up in the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Status,
    Zone(Zone),
}

// ═══════════════════════════════════════════════════════════════════════
// Tooth record
// ═══════════════════════════════════════════════════════════════════════

/// State of a single tooth as stored in the chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToothRecord {
    #[serde(default, skip_serializing_if = "ZoneMap::is_empty")]
    pub zones: ZoneMap,
    /// Whole-tooth finding id; at most one at a time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Crown flag kept apart from `status` by older records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corona: Option<String>,
    /// Gingival recession in mm, as typed by the clinician.
    #[serde(default, deserialize_with = "text_field", skip_serializing_if = "Option::is_none")]
    pub recesion: Option<String>,
    /// Mobility grade, as typed by the clinician.
    #[serde(default, deserialize_with = "text_field", skip_serializing_if = "Option::is_none")]
    pub movilidad: Option<String>,
}

impl ToothRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self == &ToothRecord::default()
    }

    /// Record a finding. Whole-tooth findings replace `status` and never
    /// touch zones; surface findings replace the target zone and never touch
    /// `status`. A crown aimed at the whole tooth becomes the status.
    ///
    /// Returns `None` when a surface finding is aimed at the whole tooth,
    /// which has no zone to land on.
    pub fn apply_finding(&mut self, finding: Finding, target: Target) -> Option<Placement> {
        let id = finding.id().to_string();
        match (finding.is_whole_tooth(), target) {
            (true, _) => {
                self.status = Some(id);
                Some(Placement::Status)
            }
            (false, Target::Zone(zone)) => {
                self.zones.set(zone, Some(id));
                Some(Placement::Zone(zone))
            }
            (false, Target::Tooth) => match finding.class() {
                FindingClass::Corona(_) => {
                    self.status = Some(id);
                    Some(Placement::Status)
                }
                _ => None,
            },
        }
    }

    pub fn status_finding(&self) -> Option<Finding> {
        self.status.as_deref().and_then(Finding::from_id)
    }

    /// Crown overlay for this tooth. The status wins over the separate crown
    /// flag, which wins over crowns recorded on a zone.
    pub fn corona(&self) -> Option<Progress> {
        let zone_ids = self.zones.iter().map(|(_, id)| id);
        self.status
            .as_deref()
            .into_iter()
            .chain(self.corona.as_deref())
            .chain(zone_ids)
            .find_map(|id| match Finding::from_id(id)?.class() {
                FindingClass::Corona(progress) => Some(progress),
                _ => None,
            })
    }

    /// Drop every crown: the separate flag and crowns recorded on a zone.
    /// A crown status is left to the caller.
    pub fn remove_crowns(&mut self) {
        self.corona = None;
        for zone in Zone::ALL {
            let crowned = self
                .zones
                .get(zone)
                .and_then(Finding::from_id)
                .is_some_and(|f| matches!(f.class(), FindingClass::Corona(_)));
            if crowned {
                self.zones.set(zone, None);
            }
        }
    }

    /// Root canal marker for this tooth. Pending treatment on any zone wins
    /// over treatment already done.
    pub fn endodontics(&self) -> Option<Progress> {
        let mut found = None;
        for (_, id) in self.zones.iter() {
            match Finding::from_id(id).map(Finding::class) {
                Some(FindingClass::Endodontic(Progress::Needed)) => return Some(Progress::Needed),
                Some(FindingClass::Endodontic(Progress::Done)) => found = Some(Progress::Done),
                _ => {}
            }
        }
        found
    }
}

/// Accept free text or a bare JSON number for the measurement fields.
fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
    }))
}
