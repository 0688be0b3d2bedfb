use anyhow::Result;
use nhs_insights::adapters::recording_backend::RecordingBackend;
use nhs_insights::config::toml_config::TomlConfig;
use nhs_insights::core::chart::CHART_FILE_NAME;
use nhs_insights::{EtlEngine, LocalStorage, ProjectionPipeline, ReportError};
use std::fmt::Write as _;
use std::path::Path;
use tempfile::TempDir;

fn write_projections(dir: &Path, professions: &[&str], start_year: i32, duration: i32) -> Result<()> {
    let mut csv = String::from("profession,scenario,year,total_registrants\n");
    for (i, profession) in professions.iter().enumerate() {
        for (s, scenario) in ["baseline", "optimistic", "pessimistic"].iter().enumerate() {
            for offset in 0..=duration {
                let total = 10_000.0 * (i + 1) as f64 * (1.0 + 0.01 * (s + 1) as f64 * offset as f64);
                writeln!(csv, "{},{},{},{:.1}", profession, scenario, start_year + offset, total)?;
            }
        }
    }
    std::fs::write(dir.join("projections.csv"), csv)?;
    Ok(())
}

fn config_for(output_dir: &Path) -> Result<TomlConfig> {
    Ok(TomlConfig::from_toml_str(&format!(
        r#"
[projection]
input = "projections.csv"
start_year = 2025
duration = 5
output_dir = "{}"
"#,
        output_dir.to_str().unwrap().replace('\\', "/")
    ))?)
}

#[tokio::test]
async fn test_nurse_and_doctor_chart() -> Result<()> {
    let dir = TempDir::new()?;
    let output_dir = dir.path().join("out").join("charts");
    write_projections(dir.path(), &["Nurse", "Doctor"], 2025, 5)?;

    let backend = RecordingBackend::new();
    let pipeline = ProjectionPipeline::new(
        LocalStorage::new(dir.path()),
        config_for(&output_dir)?,
        backend.clone(),
    );
    let output = EtlEngine::new(pipeline).run().await?;

    assert_eq!(output, output_dir.join(CHART_FILE_NAME).display().to_string());
    assert!(output_dir.is_dir());

    let recording = backend.snapshot();
    let figure = recording.figure.clone().expect("figure created");
    assert_eq!(figure.panels.len(), 2);
    assert_eq!(
        figure.title,
        "5-Year Workforce Projection - England (2025/26 to 2030/31)"
    );
    for (panel_index, panel) in figure.panels.iter().enumerate() {
        assert_eq!(recording.legend_entries(panel_index), 3);
        let labels: Vec<_> = panel.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            ["2025/26", "2026/27", "2027/28", "2028/29", "2029/30", "2030/31"]
        );
        assert_eq!(panel.x_limits, (2024, 2031));
    }
    for series in recording.series.values().flatten() {
        assert_eq!(series.points.len(), 6);
    }
    Ok(())
}

#[tokio::test]
async fn test_empty_projection_file_is_config_error() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.path().join("projections.csv"),
        "profession,scenario,year,total_registrants\n",
    )?;
    let output_dir = dir.path().join("out");

    let pipeline = ProjectionPipeline::new(
        LocalStorage::new(dir.path()),
        config_for(&output_dir)?,
        RecordingBackend::new(),
    );
    let result = EtlEngine::new(pipeline).run().await;

    assert!(matches!(result, Err(ReportError::ConfigError { .. })));
    assert!(!output_dir.exists());
    Ok(())
}

#[tokio::test]
async fn test_missing_projection_file_is_io_error() -> Result<()> {
    let dir = TempDir::new()?;
    let pipeline = ProjectionPipeline::new(
        LocalStorage::new(dir.path()),
        config_for(&dir.path().join("out"))?,
        RecordingBackend::new(),
    );

    let result = EtlEngine::new(pipeline).run().await;

    assert!(matches!(result, Err(ReportError::IoError(_))));
    Ok(())
}

#[tokio::test]
async fn test_bundled_config_and_sample_data() -> Result<()> {
    let root = nhs_insights::utils::paths::project_root();
    let mut config = TomlConfig::from_file(root.join("nhs-insights.toml"))?;
    nhs_insights::utils::validation::Validate::validate(&config)?;

    let out = TempDir::new()?;
    config.projection.output_dir = Some(out.path().to_string_lossy().into_owned());

    let backend = RecordingBackend::new();
    let pipeline = ProjectionPipeline::new(LocalStorage::new(&root), config, backend.clone());
    EtlEngine::new(pipeline).run().await?;

    let figure = backend.snapshot().figure.expect("figure created");
    let titles: Vec<_> = figure.panels.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Doctor Workforce Projection - England",
            "Nurse Workforce Projection - England",
            "Pharmacist Workforce Projection - England",
        ]
    );
    Ok(())
}
