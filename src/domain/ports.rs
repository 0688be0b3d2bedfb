use crate::domain::model::{FigureSpec, SeriesSpec};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// Creates the directory and any missing parents, returning the resolved path.
    fn ensure_dir(&self, path: &Path) -> impl std::future::Future<Output = Result<PathBuf>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn resource_id(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn projection_input(&self) -> &str;
    fn start_year(&self) -> i32;
    fn duration(&self) -> u32;
    fn output_dir(&self) -> Option<PathBuf>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Extracted: Send;
    type Transformed: Send;

    async fn extract(&self) -> Result<Self::Extracted>;
    async fn transform(&self, data: Self::Extracted) -> Result<Self::Transformed>;
    /// Returns a human-readable description of what was produced.
    async fn load(&self, result: Self::Transformed) -> Result<String>;
}

/// Minimal drawing surface used by the chart renderer.
pub trait ChartBackend: Send {
    fn create_figure(&mut self, figure: &FigureSpec) -> Result<()>;
    fn plot_series(&mut self, panel: usize, series: &SeriesSpec) -> Result<()>;
    fn save(&mut self, path: &Path) -> Result<()>;
}
