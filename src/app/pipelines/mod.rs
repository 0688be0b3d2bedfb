pub mod pharmacy_pipeline;
pub mod projection_pipeline;

pub use pharmacy_pipeline::PharmacyCountPipeline;
pub use projection_pipeline::ProjectionPipeline;
