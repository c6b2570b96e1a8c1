//! Catalog of the symbols a clinician can place on the chart.
//!
//! The table is read-only once built and is handed by reference to the
//! renderer and the editor, so a localized or recolored table can replace
//! [`Taxonomy::standard`] without touching either.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::model::Finding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pathology,
    Treatment,
}

/// A selectable finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: String,
    pub label: String,
    pub category: Category,
    pub color: String,
    /// Short literal shown on the palette button.
    pub glyph: String,
    /// Abbreviation drawn inside a zone carrying this finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_mark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub pathology_color: String,
    pub treatment_color: String,
    pub symbols: Vec<Symbol>,
}

pub const PATHOLOGY_COLOR: &str = "#d32f2f";
pub const TREATMENT_COLOR: &str = "#1565c0";

impl Taxonomy {
    /// The 4 pathology and 9 treatment findings of the standard chart.
    pub fn standard() -> Self {
        use Category::*;

        #[rustfmt::skip]
        let entries: [(Finding, &str, Category, &str, Option<&str>); 13] = [
            (Finding::Caries,         "Caries",                    Pathology, "●", None),
            (Finding::SellanteNec,    "Sellante necesario",        Pathology, "S", Some("S")),
            (Finding::ExtraccionInd,  "Extracción indicada",       Pathology, "X", None),
            (Finding::Endodoncia,     "Endodoncia necesaria",      Pathology, "▲", None),
            (Finding::Obturacion,     "Obturación",                Treatment, "●", None),
            (Finding::Sellante,       "Sellante realizado",        Treatment, "S", Some("S")),
            (Finding::PerdidaCaries,  "Pérdida por caries",        Treatment, "X", None),
            (Finding::PerdidaOtra,    "Pérdida por otra causa",    Treatment, "—", Some("PO")),
            (Finding::EndodonciaReal, "Endodoncia realizada",      Treatment, "▲", None),
            (Finding::Corona,         "Corona",                    Treatment, "○", None),
            (Finding::Fija,           "Prótesis fija",             Treatment, "[—]", Some("PF")),
            (Finding::Removible,      "Prótesis removible",        Treatment, "[- -]", Some("PR")),
            (Finding::ProtTotal,      "Prótesis total",            Treatment, "[==]", Some("PT")),
        ];

        let symbols = entries
            .into_iter()
            .map(|(finding, label, category, glyph, zone_mark)| Symbol {
                id: finding.id().to_string(),
                label: label.to_string(),
                category,
                color: match category {
                    Pathology => PATHOLOGY_COLOR.to_string(),
                    Treatment => TREATMENT_COLOR.to_string(),
                },
                glyph: glyph.to_string(),
                zone_mark: zone_mark.map(str::to_string),
            })
            .collect();

        Self {
            pathology_color: PATHOLOGY_COLOR.to_string(),
            treatment_color: TREATMENT_COLOR.to_string(),
            symbols,
        }
    }

    /// Load an alternate table, e.g. with localized labels.
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, id: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn color_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|s| s.color.as_str())
    }

    pub fn category_color(&self, category: Category) -> &str {
        match category {
            Category::Pathology => &self.pathology_color,
            Category::Treatment => &self.treatment_color,
        }
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Symbol> + '_ {
        self.symbols.iter().filter(move |s| s.category == category)
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_partitions() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(taxonomy.in_category(Category::Pathology).count(), 4);
        assert_eq!(taxonomy.in_category(Category::Treatment).count(), 9);
        for symbol in &taxonomy.symbols {
            assert!(Finding::from_id(&symbol.id).is_some(), "{} is not a known finding", symbol.id);
        }
    }

    #[test]
    fn unknown_id_has_no_color() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(taxonomy.color_of("caries"), Some(PATHOLOGY_COLOR));
        assert_eq!(taxonomy.color_of("ausente"), None);
        assert_eq!(taxonomy.color_of("fluorosis"), None);
    }

    #[test]
    fn relabelled_table_loads_from_json() {
        let mut table = Taxonomy::standard();
        table.symbols[0].label = "Decay".into();
        let json = serde_json::to_string(&table).unwrap();
        let loaded = Taxonomy::from_json(&json).unwrap();
        assert_eq!(loaded.get("caries").unwrap().label, "Decay");
    }
}
