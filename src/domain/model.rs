use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Projection variant, each with its own growth-rate assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Baseline,
    Optimistic,
    Pessimistic,
}

impl Scenario {
    /// Plotting order.
    pub const ALL: [Scenario; 3] = [Scenario::Baseline, Scenario::Optimistic, Scenario::Pessimistic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Baseline => "baseline",
            Scenario::Optimistic => "optimistic",
            Scenario::Pessimistic => "pessimistic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Baseline => "Baseline",
            Scenario::Optimistic => "Optimistic",
            Scenario::Pessimistic => "Pessimistic",
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Scenario::Baseline => Rgb(0x1f, 0x77, 0xb4),
            Scenario::Optimistic => Rgb(0x2c, 0xa0, 0x2c),
            Scenario::Pessimistic => Rgb(0xd6, 0x27, 0x28),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a workforce projection table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub profession: String,
    pub scenario: Scenario,
    pub year: i32,
    pub total_registrants: f64,
}

/// A projection row with its financial-year label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    #[serde(flatten)]
    pub record: ProjectionRecord,
    pub financial_year: String,
}

/// Profession name to projection table.
pub type ProjectionSet<R> = BTreeMap<String, Vec<R>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PharmacyCount {
    pub financial_year: String,
    pub total: u64,
}

impl fmt::Display for PharmacyCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total number of pharmacies in {}: {}",
            self.financial_year, self.total
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

// Chart description handed to a `ChartBackend`. Sizes are in inches and
// points, the backend decides how that maps to pixels.

#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub title: String,
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub panels: Vec<PanelSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Inclusive x limits.
    pub x_limits: (i32, i32),
    pub ticks: Vec<Tick>,
    /// Requested tick label angle in degrees. The PNG backend can only turn
    /// text by quarter turns, so any nonzero angle is drawn at 90°.
    pub tick_rotation_deg: f64,
    pub grid_alpha: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: i32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub label: String,
    pub color: Rgb,
    pub points: Vec<(i32, f64)>,
    pub line_width: u32,
    pub marker_size: u32,
}
