use crate::core::annotate::{annotate_set, group_by_profession};
use crate::core::chart::{ChartConfig, ChartRenderer};
use crate::core::{
    AnnotatedRecord, ChartBackend, ConfigProvider, Pipeline, ProjectionRecord, ProjectionSet,
    Storage,
};
use crate::utils::error::{ReportError, Result};
use tokio::sync::Mutex;

/// Reads projection rows from CSV, labels them with financial years and
/// charts them.
pub struct ProjectionPipeline<S: Storage, C: ConfigProvider, B: ChartBackend> {
    storage: S,
    config: C,
    renderer: Mutex<ChartRenderer<B>>,
}

impl<S: Storage, C: ConfigProvider, B: ChartBackend> ProjectionPipeline<S, C, B> {
    pub fn new(storage: S, config: C, backend: B) -> Self {
        Self {
            storage,
            config,
            renderer: Mutex::new(ChartRenderer::new(backend)),
        }
    }

    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig {
            start_year: self.config.start_year(),
            duration: self.config.duration(),
            output_dir: self.config.output_dir(),
        }
    }
}

/// Parses `profession,scenario,year,total_registrants` rows; other columns are ignored.
pub fn parse_projection_csv(data: &[u8]) -> Result<Vec<ProjectionRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let records = reader
        .deserialize::<ProjectionRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if let Some(bad) = records.iter().find(|r| !r.total_registrants.is_finite()) {
        return Err(ReportError::ProcessingError {
            message: format!(
                "total_registrants for {} ({}, {}) is not a finite number",
                bad.profession, bad.scenario, bad.year
            ),
        });
    }
    Ok(records)
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, B: ChartBackend> Pipeline for ProjectionPipeline<S, C, B> {
    type Extracted = ProjectionSet<ProjectionRecord>;
    type Transformed = ProjectionSet<AnnotatedRecord>;

    async fn extract(&self) -> Result<ProjectionSet<ProjectionRecord>> {
        let input = self.config.projection_input();
        tracing::debug!("Reading projections from: {}", input);

        let data = self.storage.read_file(input).await?;
        let records = parse_projection_csv(&data)?;
        let projections = group_by_profession(records);

        tracing::info!(
            rows = projections.values().map(Vec::len).sum::<usize>(),
            professions = projections.len(),
            "Loaded projection tables"
        );
        Ok(projections)
    }

    async fn transform(
        &self,
        data: ProjectionSet<ProjectionRecord>,
    ) -> Result<ProjectionSet<AnnotatedRecord>> {
        Ok(annotate_set(&data))
    }

    async fn load(&self, result: ProjectionSet<AnnotatedRecord>) -> Result<String> {
        let chart_config = self.chart_config();
        let mut renderer = self.renderer.lock().await;
        let path = renderer
            .render(&self.storage, &result, &chart_config)
            .await?;
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Scenario;

    #[test]
    fn test_parse_projection_csv() {
        let csv = "profession,scenario,year,total_registrants\n\
                   Nurse,baseline,2025,1000\n\
                   Nurse, optimistic ,2026,1100.5\n";

        let records = parse_projection_csv(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].scenario, Scenario::Optimistic);
        assert_eq!(records[1].total_registrants, 1100.5);
    }

    #[test]
    fn test_parse_ignores_extra_columns() {
        let csv = "profession,scenario,year,total_registrants,financial_year,growth_rate\n\
                   Doctor,pessimistic,2030,250,2030/31,0.01\n";

        let records = parse_projection_csv(csv.as_bytes()).unwrap();

        assert_eq!(records[0].profession, "Doctor");
        assert_eq!(records[0].year, 2030);
    }

    #[test]
    fn test_parse_rejects_unknown_scenario() {
        let csv = "profession,scenario,year,total_registrants\nNurse,stretch,2025,1\n";
        assert!(matches!(
            parse_projection_csv(csv.as_bytes()),
            Err(ReportError::CsvError(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_finite_registrants() {
        for total in ["NaN", "inf", "-inf"] {
            let csv = format!(
                "profession,scenario,year,total_registrants\nNurse,baseline,2025,{}\n",
                total
            );
            assert!(matches!(
                parse_projection_csv(csv.as_bytes()),
                Err(ReportError::ProcessingError { .. })
            ));
        }
    }

    #[test]
    fn test_parse_rejects_missing_registrants() {
        let csv = "profession,scenario,year,total_registrants\nNurse,baseline,2025,\n";
        assert!(parse_projection_csv(csv.as_bytes()).is_err());
    }
}
