use crate::core::financial_year::financial_year;
use crate::domain::model::{
    AnnotatedRecord, FigureSpec, PanelSpec, ProjectionSet, Scenario, SeriesSpec, Tick,
};
use crate::domain::ports::{ChartBackend, Storage};
use crate::utils::error::{ReportError, Result};
use crate::utils::paths;
use std::collections::HashSet;
use std::path::PathBuf;

pub const CHART_FILE_NAME: &str = "workforce_projection_chart.png";
pub const CHART_DPI: u32 = 300;

const FIGURE_WIDTH_IN: f64 = 12.0;
const PANEL_HEIGHT_IN: f64 = 6.0;
const TICK_ROTATION_DEG: f64 = 45.0;
const GRID_ALPHA: f64 = 0.3;
const LINE_WIDTH: u32 = 2;
const MARKER_SIZE: u32 = 4;

/// Projection window and output location for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub start_year: i32,
    pub duration: u32,
    /// Defaults to the project root.
    pub output_dir: Option<PathBuf>,
}

impl ChartConfig {
    pub fn end_year(&self) -> i32 {
        self.start_year.saturating_add_unsigned(self.duration)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(paths::project_root)
    }
}

pub struct ChartRenderer<B: ChartBackend> {
    backend: B,
}

impl<B: ChartBackend> ChartRenderer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Draws one panel per profession and writes the PNG, returning its path.
    ///
    /// Professions are taken in first-seen order over the tables concatenated
    /// in map order. An empty mapping is a `ConfigError`. The output directory
    /// is created through `storage`, and an existing chart is overwritten.
    pub async fn render<S: Storage>(
        &mut self,
        storage: &S,
        projections: &ProjectionSet<AnnotatedRecord>,
        config: &ChartConfig,
    ) -> Result<PathBuf> {
        let rows: Vec<&AnnotatedRecord> = projections.values().flatten().collect();
        let professions = distinct_professions(&rows);
        if professions.is_empty() {
            return Err(ReportError::ConfigError {
                message: "no professions to chart: projection mapping is empty".to_string(),
            });
        }

        let figure = build_figure(&professions, config);
        tracing::debug!(
            panels = figure.panels.len(),
            title = %figure.title,
            "Creating chart figure"
        );
        self.backend.create_figure(&figure)?;

        for (panel, profession) in professions.iter().enumerate() {
            for scenario in Scenario::ALL {
                let series = build_series(&rows, profession, scenario);
                tracing::debug!(
                    profession = %profession,
                    scenario = %scenario,
                    points = series.points.len(),
                    "Plotting series"
                );
                self.backend.plot_series(panel, &series)?;
            }
        }

        let output_dir = storage.ensure_dir(&config.output_dir()).await?;
        let output_path = output_dir.join(CHART_FILE_NAME);
        self.backend.save(&output_path)?;

        tracing::info!("📈 Chart saved to {}", output_path.display());
        Ok(output_path)
    }
}

fn distinct_professions<'a>(rows: &[&'a AnnotatedRecord]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|row| row.record.profession.as_str())
        .filter(|profession| seen.insert(*profession))
        .collect()
}

fn build_figure(professions: &[&str], config: &ChartConfig) -> FigureSpec {
    let start_year = config.start_year;
    let end_year = config.end_year();

    let ticks: Vec<Tick> = (start_year..=end_year)
        .map(|year| Tick {
            position: year,
            label: financial_year(year),
        })
        .collect();

    let panels = professions
        .iter()
        .map(|profession| PanelSpec {
            title: format!("{} Workforce Projection - England", profession),
            x_label: "Financial Year".to_string(),
            y_label: "Number of Registrants".to_string(),
            x_limits: (start_year.saturating_sub(1), end_year.saturating_add(1)),
            ticks: ticks.clone(),
            tick_rotation_deg: TICK_ROTATION_DEG,
            grid_alpha: GRID_ALPHA,
        })
        .collect();

    FigureSpec {
        title: format!(
            "{}-Year Workforce Projection - England ({} to {})",
            config.duration,
            financial_year(start_year),
            financial_year(end_year)
        ),
        width_in: FIGURE_WIDTH_IN,
        height_in: PANEL_HEIGHT_IN * professions.len() as f64,
        dpi: CHART_DPI,
        panels,
    }
}

fn build_series(rows: &[&AnnotatedRecord], profession: &str, scenario: Scenario) -> SeriesSpec {
    let points = rows
        .iter()
        .map(|row| &row.record)
        .filter(|record| record.profession == profession && record.scenario == scenario)
        .map(|record| (record.year, record.total_registrants))
        .collect();

    SeriesSpec {
        label: scenario.label().to_string(),
        color: scenario.color(),
        points,
        line_width: LINE_WIDTH,
        marker_size: MARKER_SIZE,
    }
}
