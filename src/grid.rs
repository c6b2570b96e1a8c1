//! Whole-chart views.
//!
//! [`ArchView`] lays teeth out as the two arches and hands a clicked tooth
//! to the [`Editor`]. [`QuadrantListView`] lists each quadrant tooth by
//! tooth, with a brush for quick zone marking and a small status menu.
//! Both read the chart through [`ChartState::get`] and write through the
//! same [`ChartSession`] calls, so either view reflects the other's edits.

use tracing::debug;

use crate::chart::{ChartSession, ChartState, ToothField};
use crate::editor::Editor;
use crate::error::EditorError;
use crate::layout::{row_connections, Connection, ARCH_ROWS, QUADRANTS};
use crate::model::{Finding, Placement, Silhouette, Target, ToothId, ToothRecord, Zone};
use crate::renderer::{render_tooth_to_svg, rules::plan_tooth, ToothRender};
use crate::taxonomy::Taxonomy;

// ═══════════════════════════════════════════════════════════════════════
// Cells
// ═══════════════════════════════════════════════════════════════════════

/// One tooth as shown in a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToothCell {
    pub id: ToothId,
    pub silhouette: Silhouette,
    pub record: ToothRecord,
    pub render: ToothRender,
    pub connection: Connection,
}

impl ToothCell {
    fn new(chart: &ChartState, id: ToothId, connection: Connection, taxonomy: &Taxonomy) -> Self {
        let record = chart.get(&id.to_string());
        let silhouette = id.silhouette();
        let render = plan_tooth(&record, silhouette, connection, taxonomy);
        Self {
            id,
            silhouette,
            record,
            render,
            connection,
        }
    }

    /// Draw this cell at `size` (default 40).
    pub fn to_svg(&self, size: Option<f64>, taxonomy: &Taxonomy) -> String {
        render_tooth_to_svg(&self.record, self.silhouette, size, self.connection, taxonomy)
    }
}

fn edit_measurement(session: &mut ChartSession<'_>, tooth: ToothId, field: ToothField, value: &str) {
    session.set_field(tooth.to_string(), field, value);
}

// ═══════════════════════════════════════════════════════════════════════
// Arch layout
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchRowView {
    pub label: &'static str,
    /// Patient's right half, outermost tooth first.
    pub right: Vec<ToothCell>,
    /// Patient's left half, midline tooth first.
    pub left: Vec<ToothCell>,
}

#[derive(Debug, Clone, Copy)]
pub struct ArchView<'t> {
    taxonomy: &'t Taxonomy,
}

impl<'t> ArchView<'t> {
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// The four arch rows with prosthesis runs joined across each row.
    pub fn rows(&self, chart: &ChartState) -> Vec<ArchRowView> {
        ARCH_ROWS
            .iter()
            .map(|row| {
                let teeth = row.teeth();
                let connections = row_connections(chart, &teeth);
                let mut cells: Vec<ToothCell> = teeth
                    .into_iter()
                    .zip(connections)
                    .map(|(id, connection)| ToothCell::new(chart, id, connection, self.taxonomy))
                    .collect();
                let left = cells.split_off(row.right.len());
                ArchRowView {
                    label: row.label,
                    right: cells,
                    left,
                }
            })
            .collect()
    }

    /// A click on a tooth opens it in the editor.
    pub fn click_tooth(&self, editor: &mut Editor<'_>, tooth: ToothId, chart: &ChartState) -> Result<(), EditorError> {
        editor.open(&tooth.to_string(), chart)
    }

    pub fn set_recesion(&self, session: &mut ChartSession<'_>, tooth: ToothId, value: &str) {
        edit_measurement(session, tooth, ToothField::Recesion, value);
    }

    pub fn set_movilidad(&self, session: &mut ChartSession<'_>, tooth: ToothId, value: &str) {
        edit_measurement(session, tooth, ToothField::Movilidad, value);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Quadrant list layout
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadrantSection {
    pub number: u8,
    pub label: &'static str,
    pub rows: Vec<ToothCell>,
}

/// Entries of the quick status menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusChoice {
    Normal,
    Ausente,
    Implante,
    Corona,
}

impl StatusChoice {
    pub const ALL: [StatusChoice; 4] = [
        StatusChoice::Normal,
        StatusChoice::Ausente,
        StatusChoice::Implante,
        StatusChoice::Corona,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusChoice::Normal => "Normal",
            StatusChoice::Ausente => "Ausente",
            StatusChoice::Implante => "Implante",
            StatusChoice::Corona => "Corona",
        }
    }

    /// The finding written as status; `None` for normal.
    pub fn finding(self) -> Option<Finding> {
        match self {
            StatusChoice::Normal => None,
            StatusChoice::Ausente => Some(Finding::Ausente),
            StatusChoice::Implante => Some(Finding::Implante),
            StatusChoice::Corona => Some(Finding::Corona),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuadrantListView<'t> {
    taxonomy: &'t Taxonomy,
    brush: Option<Finding>,
}

impl<'t> QuadrantListView<'t> {
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        Self { taxonomy, brush: None }
    }

    /// All eight quadrants, permanent first. Rows stack vertically, so
    /// prosthesis borders are never joined here.
    pub fn quadrants(&self, chart: &ChartState) -> Vec<QuadrantSection> {
        QUADRANTS
            .iter()
            .map(|quadrant| QuadrantSection {
                number: quadrant.number,
                label: quadrant.label,
                rows: quadrant
                    .teeth()
                    .map(|id| ToothCell::new(chart, id, Connection::default(), self.taxonomy))
                    .collect(),
            })
            .collect()
    }

    pub fn brush(&self) -> Option<Finding> {
        self.brush
    }

    /// Pick the symbol zone clicks will apply, or `None` to stop marking.
    pub fn set_brush(&mut self, id: Option<&str>) -> Result<(), EditorError> {
        self.brush = match id {
            None => None,
            Some(id) => Some(
                self.taxonomy
                    .contains(id)
                    .then(|| Finding::from_id(id))
                    .flatten()
                    .ok_or_else(|| EditorError::UnknownSymbol(id.to_string()))?,
            ),
        };
        Ok(())
    }

    /// Apply the brush to one zone of `tooth`. Without a brush nothing
    /// changes and no notification is sent.
    pub fn click_zone(&self, session: &mut ChartSession<'_>, tooth: ToothId, zone: Zone) -> Option<Placement> {
        let finding = self.brush?;
        debug!(tooth = %tooth, %finding, zone = zone.name(), "brushing zone");
        session.update(tooth.to_string(), |record| record.apply_finding(finding, Target::Zone(zone)))
    }

    pub fn status_choices(&self) -> [StatusChoice; 4] {
        StatusChoice::ALL
    }

    /// Apply a status menu choice. Normal clears the status and every crown,
    /// so no crown ring is left; other zone findings stay.
    pub fn set_status(&self, session: &mut ChartSession<'_>, tooth: ToothId, choice: StatusChoice) {
        debug!(tooth = %tooth, ?choice, "quick status");
        session.update(tooth.to_string(), |record| match choice.finding() {
            None => {
                record.status = None;
                record.remove_crowns();
            }
            Some(finding) => {
                record.apply_finding(finding, Target::Tooth);
            }
        });
    }

    pub fn set_recesion(&self, session: &mut ChartSession<'_>, tooth: ToothId, value: &str) {
        edit_measurement(session, tooth, ToothField::Recesion, value);
    }

    pub fn set_movilidad(&self, session: &mut ChartSession<'_>, tooth: ToothId, value: &str) {
        edit_measurement(session, tooth, ToothField::Movilidad, value);
    }
}
