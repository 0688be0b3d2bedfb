pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, PlottersBackend, RecordingBackend};
pub use app::pipelines::{PharmacyCountPipeline, ProjectionPipeline};
pub use config::TomlConfig;
pub use core::chart::{ChartConfig, ChartRenderer};
pub use core::etl::EtlEngine;
pub use utils::error::{ReportError, Result};
