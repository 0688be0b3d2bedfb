// Adapters layer: concrete implementations of the domain ports.

pub mod plotters_backend;
pub mod recording_backend;
pub mod storage;

pub use plotters_backend::PlottersBackend;
pub use recording_backend::RecordingBackend;
pub use storage::LocalStorage;
