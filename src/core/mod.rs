pub mod annotate;
pub mod chart;
pub mod etl;
pub mod financial_year;

pub use crate::domain::model::{
    AnnotatedRecord, PharmacyCount, ProjectionRecord, ProjectionSet, Scenario,
};
pub use crate::domain::ports::{ChartBackend, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
