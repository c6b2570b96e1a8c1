//! Single-tooth editor.
//!
//! Opening a tooth copies its record into a draft. Clicks (select a symbol,
//! then click a zone or the tooth) and drops (release a symbol over a zone
//! or the tooth) both end in [`ToothRecord::apply_finding`] on the draft.
//! Nothing reaches the chart until [`Editor::confirm`]; [`Editor::cancel`]
//! throws the draft away.

use tracing::debug;

use crate::chart::{ChartSession, ChartState};
use crate::error::EditorError;
use crate::layout::Connection;
use crate::model::{Finding, Placement, Target, ToothId, ToothRecord, Zone};
use crate::renderer::{render_tooth_to_svg, rules::plan_tooth, ToothRender};
use crate::taxonomy::{Category, Symbol, Taxonomy};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Draft {
    tooth: ToothId,
    record: ToothRecord,
    selected: Option<Finding>,
}

/// Editor state machine: idle, or editing exactly one tooth.
#[derive(Debug, Clone)]
pub struct Editor<'t> {
    taxonomy: &'t Taxonomy,
    draft: Option<Draft>,
}

impl<'t> Editor<'t> {
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        Self { taxonomy, draft: None }
    }

    pub fn taxonomy(&self) -> &'t Taxonomy {
        self.taxonomy
    }

    // ── Session lifecycle ───────────────────────────────────────────────

    /// Start editing `tooth`, seeding the draft from `chart`.
    pub fn open(&mut self, tooth: &str, chart: &ChartState) -> Result<(), EditorError> {
        if let Some(ref draft) = self.draft {
            return Err(EditorError::AlreadyEditing(draft.tooth.to_string()));
        }
        let id: ToothId = tooth
            .parse()
            .map_err(|_| EditorError::UnknownTooth(tooth.to_string()))?;
        debug!(tooth = %id, "opening tooth editor");
        self.draft = Some(Draft {
            tooth: id,
            record: chart.get(&id.to_string()),
            selected: None,
        });
        Ok(())
    }

    /// Write the draft into the chart and go back to idle.
    pub fn confirm(&mut self, session: &mut ChartSession<'_>) -> Result<ToothId, EditorError> {
        let draft = self.draft.take().ok_or(EditorError::NotEditing)?;
        debug!(tooth = %draft.tooth, "committing tooth draft");
        session.set(draft.tooth.to_string(), draft.record);
        Ok(draft.tooth)
    }

    /// Discard the draft. Returns `false` if nothing was open.
    pub fn cancel(&mut self) -> bool {
        match self.draft.take() {
            Some(draft) => {
                debug!(tooth = %draft.tooth, "discarding tooth draft");
                true
            }
            None => false,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn tooth(&self) -> Option<ToothId> {
        self.draft.as_ref().map(|d| d.tooth)
    }

    pub fn draft(&self) -> Option<&ToothRecord> {
        self.draft.as_ref().map(|d| &d.record)
    }

    pub fn selected(&self) -> Option<Finding> {
        self.draft.as_ref().and_then(|d| d.selected)
    }

    // ── Symbol input ────────────────────────────────────────────────────

    /// Press a palette button. Pressing the selected symbol again clears
    /// the selection. Returns the selection after the press.
    pub fn select_symbol(&mut self, id: &str) -> Result<Option<Finding>, EditorError> {
        let finding = self.resolve(id)?;
        let draft = self.draft_mut()?;
        draft.selected = if draft.selected == Some(finding) { None } else { Some(finding) };
        debug!(symbol = id, selected = ?draft.selected, "palette selection");
        Ok(draft.selected)
    }

    /// Click a zone with the selected symbol. Without a selection this
    /// does nothing.
    pub fn click_zone(&mut self, zone: Zone) -> Result<Option<Placement>, EditorError> {
        self.click(Target::Zone(zone))
    }

    /// Click the whole tooth with the selected symbol. Only whole-tooth
    /// findings and crowns land here.
    pub fn click_tooth(&mut self) -> Result<Option<Placement>, EditorError> {
        self.click(Target::Tooth)
    }

    /// Drop a dragged symbol on `target`. Applies regardless of the current
    /// selection, then selects the dropped symbol.
    pub fn drop_symbol(&mut self, id: &str, target: Target) -> Result<Option<Placement>, EditorError> {
        let finding = self.resolve(id)?;
        let draft = self.draft_mut()?;
        draft.selected = Some(finding);
        Ok(apply(draft, finding, target))
    }

    fn click(&mut self, target: Target) -> Result<Option<Placement>, EditorError> {
        let draft = self.draft_mut()?;
        let selected = draft.selected;
        Ok(match selected {
            Some(finding) => apply(draft, finding, target),
            None => None,
        })
    }

    // ── Draft fields ────────────────────────────────────────────────────

    /// Reset the draft to an empty record. The chart is untouched.
    pub fn clear(&mut self) -> Result<(), EditorError> {
        let draft = self.draft_mut()?;
        debug!(tooth = %draft.tooth, "clearing tooth draft");
        draft.record = ToothRecord::new();
        Ok(())
    }

    /// Store recession text verbatim; an empty string clears it.
    pub fn set_recesion(&mut self, value: &str) -> Result<(), EditorError> {
        self.draft_mut()?.record.recesion = text(value);
        Ok(())
    }

    /// Store mobility text verbatim; an empty string clears it.
    pub fn set_movilidad(&mut self, value: &str) -> Result<(), EditorError> {
        self.draft_mut()?.record.movilidad = text(value);
        Ok(())
    }

    // ── Presentation ────────────────────────────────────────────────────

    /// Palette buttons grouped by category, pathology first.
    pub fn palette(&self) -> [(Category, Vec<&'t Symbol>); 2] {
        [Category::Pathology, Category::Treatment]
            .map(|category| (category, self.taxonomy.in_category(category).collect()))
    }

    /// Render plan for the draft as it stands.
    pub fn preview(&self) -> Option<ToothRender> {
        let draft = self.draft.as_ref()?;
        Some(plan_tooth(&draft.record, draft.tooth.silhouette(), Connection::default(), self.taxonomy))
    }

    /// The draft drawn as SVG at `size` (default 40).
    pub fn preview_svg(&self, size: Option<f64>) -> Option<String> {
        let draft = self.draft.as_ref()?;
        Some(render_tooth_to_svg(
            &draft.record,
            draft.tooth.silhouette(),
            size,
            Connection::default(),
            self.taxonomy,
        ))
    }

    fn draft_mut(&mut self) -> Result<&mut Draft, EditorError> {
        self.draft.as_mut().ok_or(EditorError::NotEditing)
    }

    /// Only ids that are both in the injected table and known findings can
    /// be placed.
    fn resolve(&self, id: &str) -> Result<Finding, EditorError> {
        if !self.taxonomy.contains(id) {
            return Err(EditorError::UnknownSymbol(id.to_string()));
        }
        Finding::from_id(id).ok_or_else(|| EditorError::UnknownSymbol(id.to_string()))
    }
}

fn apply(draft: &mut Draft, finding: Finding, target: Target) -> Option<Placement> {
    let placement = draft.record.apply_finding(finding, target);
    debug!(tooth = %draft.tooth, %finding, ?target, ?placement, "applied finding to draft");
    placement
}

fn text(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_editor_rejects_input() {
        let taxonomy = Taxonomy::standard();
        let mut editor = Editor::new(&taxonomy);
        assert_eq!(editor.click_zone(Zone::Top), Err(EditorError::NotEditing));
        assert_eq!(editor.clear(), Err(EditorError::NotEditing));
        assert!(!editor.cancel());
    }

    #[test]
    fn second_open_is_refused() {
        let taxonomy = Taxonomy::standard();
        let chart = ChartState::new();
        let mut editor = Editor::new(&taxonomy);
        editor.open("16", &chart).unwrap();
        assert_eq!(editor.open("17", &chart), Err(EditorError::AlreadyEditing("16".into())));
        assert_eq!(editor.tooth().map(ToothId::number), Some(16));
    }

    #[test]
    fn open_rejects_uncharted_ids() {
        let taxonomy = Taxonomy::standard();
        let mut editor = Editor::new(&taxonomy);
        assert_eq!(
            editor.open("19", &ChartState::new()),
            Err(EditorError::UnknownTooth("19".into()))
        );
        assert!(!editor.is_editing());
    }

    #[test]
    fn palette_button_toggles() {
        let taxonomy = Taxonomy::standard();
        let mut editor = Editor::new(&taxonomy);
        editor.open("21", &ChartState::new()).unwrap();
        assert_eq!(editor.select_symbol("caries"), Ok(Some(Finding::Caries)));
        assert_eq!(editor.select_symbol("obturacion"), Ok(Some(Finding::Obturacion)));
        assert_eq!(editor.select_symbol("obturacion"), Ok(None));
        assert_eq!(
            editor.select_symbol("fluorosis"),
            Err(EditorError::UnknownSymbol("fluorosis".into()))
        );
    }

    #[test]
    fn click_without_selection_is_noop() {
        let taxonomy = Taxonomy::standard();
        let mut editor = Editor::new(&taxonomy);
        editor.open("21", &ChartState::new()).unwrap();
        assert_eq!(editor.click_zone(Zone::Center), Ok(None));
        assert!(editor.draft().unwrap().is_empty());
    }

    #[test]
    fn drop_selects_symbol() {
        let taxonomy = Taxonomy::standard();
        let mut editor = Editor::new(&taxonomy);
        editor.open("21", &ChartState::new()).unwrap();
        editor.drop_symbol("sellante", Target::Zone(Zone::Center)).unwrap();
        assert_eq!(editor.selected(), Some(Finding::Sellante));
    }

    #[test]
    fn palette_groups_by_category() {
        let taxonomy = Taxonomy::standard();
        let editor = Editor::new(&taxonomy);
        let [(first, pathology), (second, treatment)] = editor.palette();
        assert_eq!(first, Category::Pathology);
        assert_eq!(second, Category::Treatment);
        assert_eq!(pathology.len(), 4);
        assert_eq!(treatment.len(), 9);
    }

    #[test]
    fn preview_follows_draft() {
        let taxonomy = Taxonomy::standard();
        let mut editor = Editor::new(&taxonomy);
        assert!(editor.preview().is_none());
        editor.open("55", &ChartState::new()).unwrap();
        editor.drop_symbol("removible", Target::Tooth).unwrap();
        let plan = editor.preview().unwrap();
        assert!(plan.prosthesis.unwrap().dashed);
        assert_eq!(plan.silhouette, crate::model::Silhouette::Circular);
        assert!(editor.preview_svg(None).unwrap().contains("prosthesis-left"));
    }
}
