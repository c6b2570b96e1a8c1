//! Chart state: tooth id → [`ToothRecord`].
//!
//! The store enforces nothing beyond its shape. Consistency rules live in
//! [`ToothRecord::apply_finding`] and are applied by the editor and the grid
//! views before they write here, so the map can be persisted and rendered
//! exactly as it is.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChartError;
use crate::model::ToothRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartState {
    teeth: BTreeMap<String, ToothRecord>,
}

/// Record fields that can be written one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToothField {
    Status,
    Corona,
    Recesion,
    Movilidad,
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chart stored by the record API.
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ChartError> {
        Ok(serde_json::to_string(self)?)
    }

    /// The record for `id`, or an empty record if the tooth was never charted.
    pub fn get(&self, id: &str) -> ToothRecord {
        self.teeth.get(id).cloned().unwrap_or_default()
    }

    pub fn record(&self, id: &str) -> Option<&ToothRecord> {
        self.teeth.get(id)
    }

    /// Replace the whole record for `id`.
    pub fn set(&mut self, id: impl Into<String>, record: ToothRecord) {
        self.teeth.insert(id.into(), record);
    }

    /// Overwrite a single field, leaving the rest of the record untouched.
    /// Text is stored verbatim; an empty string clears the field.
    pub fn set_field(&mut self, id: impl Into<String>, field: ToothField, value: &str) {
        let record = self.teeth.entry(id.into()).or_default();
        let value = (!value.is_empty()).then(|| value.to_string());
        match field {
            ToothField::Status => record.status = value,
            ToothField::Corona => record.corona = value,
            ToothField::Recesion => record.recesion = value,
            ToothField::Movilidad => record.movilidad = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ToothRecord)> + '_ {
        self.teeth.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.teeth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teeth.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ChartSession
// ═══════════════════════════════════════════════════════════════════════

/// A chart owned by one editing session.
///
/// Every mutation hands the complete updated chart to `on_change`; the host
/// is expected to replace its copy wholesale.
pub struct ChartSession<'a> {
    state: ChartState,
    on_change: Box<dyn FnMut(&ChartState) + 'a>,
}

impl<'a> ChartSession<'a> {
    pub fn new(state: ChartState, on_change: impl FnMut(&ChartState) + 'a) -> Self {
        Self {
            state,
            on_change: Box::new(on_change),
        }
    }

    /// A session nobody listens to, e.g. for batch rendering.
    pub fn detached(state: ChartState) -> Self {
        Self::new(state, |_| {})
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn set(&mut self, id: impl Into<String>, record: ToothRecord) {
        let id = id.into();
        debug!(tooth = %id, "replacing tooth record");
        self.state.set(id, record);
        self.notify();
    }

    pub fn set_field(&mut self, id: impl Into<String>, field: ToothField, value: &str) {
        let id = id.into();
        debug!(tooth = %id, ?field, value, "updating tooth field");
        self.state.set_field(id, field, value);
        self.notify();
    }

    /// Edit a record in place and notify once.
    pub fn update<R>(&mut self, id: impl Into<String>, edit: impl FnOnce(&mut ToothRecord) -> R) -> R {
        let id = id.into();
        let mut record = self.state.get(&id);
        let result = edit(&mut record);
        self.set(id, record);
        result
    }

    pub fn into_state(self) -> ChartState {
        self.state
    }

    fn notify(&mut self) {
        (self.on_change)(&self.state);
    }
}

impl fmt::Debug for ChartSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartSession")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
