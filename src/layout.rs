//! Fixed FDI layouts shared by the grid views and the print renderer.
//!
//! Rows list teeth in the order they are drawn from the viewer's left to
//! right, i.e. the patient's right side first.

use crate::chart::ChartState;
use crate::model::{Finding, FindingClass, ToothId};

// ── Quadrants ───────────────────────────────────────────────────────
pub const UPPER_RIGHT: [u8; 8] = [18, 17, 16, 15, 14, 13, 12, 11];
pub const UPPER_LEFT: [u8; 8] = [21, 22, 23, 24, 25, 26, 27, 28];
pub const LOWER_LEFT: [u8; 8] = [31, 32, 33, 34, 35, 36, 37, 38];
pub const LOWER_RIGHT: [u8; 8] = [48, 47, 46, 45, 44, 43, 42, 41];

pub const UPPER_RIGHT_PRIMARY: [u8; 5] = [55, 54, 53, 52, 51];
pub const UPPER_LEFT_PRIMARY: [u8; 5] = [61, 62, 63, 64, 65];
pub const LOWER_LEFT_PRIMARY: [u8; 5] = [71, 72, 73, 74, 75];
pub const LOWER_RIGHT_PRIMARY: [u8; 5] = [85, 84, 83, 82, 81];

#[rustfmt::skip]
pub const PERMANENT_TEETH: [u8; 32] = [
    18, 17, 16, 15, 14, 13, 12, 11,
    21, 22, 23, 24, 25, 26, 27, 28,
    31, 32, 33, 34, 35, 36, 37, 38,
    48, 47, 46, 45, 44, 43, 42, 41,
];

#[rustfmt::skip]
pub const PRIMARY_TEETH: [u8; 20] = [
    55, 54, 53, 52, 51,
    61, 62, 63, 64, 65,
    71, 72, 73, 74, 75,
    85, 84, 83, 82, 81,
];

pub fn is_charted(number: u8) -> bool {
    PERMANENT_TEETH.contains(&number) || PRIMARY_TEETH.contains(&number)
}

/// A labelled quadrant for the list view.
#[derive(Debug, Clone, Copy)]
pub struct Quadrant {
    pub number: u8,
    pub label: &'static str,
    pub teeth: &'static [u8],
}

impl Quadrant {
    pub fn teeth(&self) -> impl Iterator<Item = ToothId> + '_ {
        self.teeth.iter().filter_map(|&n| ToothId::new(n))
    }
}

pub const QUADRANTS: [Quadrant; 8] = [
    Quadrant { number: 1, label: "Superior derecho", teeth: &UPPER_RIGHT },
    Quadrant { number: 2, label: "Superior izquierdo", teeth: &UPPER_LEFT },
    Quadrant { number: 3, label: "Inferior izquierdo", teeth: &LOWER_LEFT },
    Quadrant { number: 4, label: "Inferior derecho", teeth: &LOWER_RIGHT },
    Quadrant { number: 5, label: "Temporal superior derecho", teeth: &UPPER_RIGHT_PRIMARY },
    Quadrant { number: 6, label: "Temporal superior izquierdo", teeth: &UPPER_LEFT_PRIMARY },
    Quadrant { number: 7, label: "Temporal inferior izquierdo", teeth: &LOWER_LEFT_PRIMARY },
    Quadrant { number: 8, label: "Temporal inferior derecho", teeth: &LOWER_RIGHT_PRIMARY },
];

/// One horizontal row of the arch ("horseshoe") layout, split at the midline.
#[derive(Debug, Clone, Copy)]
pub struct ArchRow {
    pub label: &'static str,
    pub right: &'static [u8],
    pub left: &'static [u8],
}

impl ArchRow {
    /// All teeth of the row, viewer's left to right.
    pub fn teeth(&self) -> Vec<ToothId> {
        self.right
            .iter()
            .chain(self.left)
            .filter_map(|&n| ToothId::new(n))
            .collect()
    }
}

pub const ARCH_ROWS: [ArchRow; 4] = [
    ArchRow { label: "Superior", right: &UPPER_RIGHT, left: &UPPER_LEFT },
    ArchRow { label: "Temporal superior", right: &UPPER_RIGHT_PRIMARY, left: &UPPER_LEFT_PRIMARY },
    ArchRow { label: "Temporal inferior", right: &LOWER_RIGHT_PRIMARY, left: &LOWER_LEFT_PRIMARY },
    ArchRow { label: "Inferior", right: &LOWER_RIGHT, left: &LOWER_LEFT },
];

// ═══════════════════════════════════════════════════════════════════════
// Prosthesis runs
// ═══════════════════════════════════════════════════════════════════════

/// Which horizontal neighbours share this tooth's prosthesis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Connection {
    pub left: bool,
    pub right: bool,
}

/// Scan a row for runs of teeth carrying the same prosthesis status.
///
/// Teeth without a prosthesis status, or with a status the chart does not
/// know, are never connected.
pub fn row_connections(chart: &ChartState, row: &[ToothId]) -> Vec<Connection> {
    let kinds: Vec<Option<&str>> = row
        .iter()
        .map(|id| {
            let status = chart.record(&id.to_string())?.status.as_deref()?;
            let finding = Finding::from_id(status)?;
            matches!(finding.class(), FindingClass::Prosthesis(_)).then_some(status)
        })
        .collect();

    (0..row.len())
        .map(|i| match kinds[i] {
            None => Connection::default(),
            Some(kind) => Connection {
                left: i > 0 && kinds[i - 1] == Some(kind),
                right: i + 1 < kinds.len() && kinds[i + 1] == Some(kind),
            },
        })
        .collect()
}
