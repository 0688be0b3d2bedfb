use crate::domain::model::{FigureSpec, SeriesSpec};
use crate::domain::ports::ChartBackend;
use crate::utils::error::{ReportError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub figure: Option<FigureSpec>,
    pub series: BTreeMap<usize, Vec<SeriesSpec>>,
    pub saved_to: Vec<PathBuf>,
}

impl Recording {
    pub fn legend_entries(&self, panel: usize) -> usize {
        self.series.get(&panel).map_or(0, Vec::len)
    }
}

/// Headless backend that only records what it was asked to draw.
///
/// Clones share the same recording, so a test can keep a handle after
/// handing the backend to a renderer.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    recording: Arc<Mutex<Recording>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Recording {
        match self.recording.lock() {
            Ok(recording) => recording.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn with_recording<T>(&self, f: impl FnOnce(&mut Recording) -> Result<T>) -> Result<T> {
        let mut recording = self.recording.lock().map_err(|_| ReportError::ChartError {
            message: "recording lock poisoned".to_string(),
        })?;
        f(&mut recording)
    }
}

impl ChartBackend for RecordingBackend {
    fn create_figure(&mut self, figure: &FigureSpec) -> Result<()> {
        self.with_recording(|recording| {
            recording.figure = Some(figure.clone());
            recording.series.clear();
            Ok(())
        })
    }

    fn plot_series(&mut self, panel: usize, series: &SeriesSpec) -> Result<()> {
        self.with_recording(|recording| {
            let panels = recording.figure.as_ref().map_or(0, |f| f.panels.len());
            if panel >= panels {
                return Err(ReportError::ChartError {
                    message: format!("panel {} out of range ({} panels)", panel, panels),
                });
            }
            recording.series.entry(panel).or_default().push(series.clone());
            Ok(())
        })
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        self.with_recording(|recording| {
            recording.saved_to.push(path.to_path_buf());
            Ok(())
        })
    }
}
