use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a pipeline's extract, transform and load stages in order.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting run");

        tracing::debug!("Extracting data...");
        let raw_data = self.pipeline.extract().await?;
        self.monitor.log_stage("extract");

        tracing::debug!("Transforming data...");
        let transformed = self.pipeline.transform(raw_data).await?;
        self.monitor.log_stage("transform");

        tracing::debug!("Loading data...");
        let output = self.pipeline.load(transformed).await?;
        self.monitor.log_stage("load");

        self.monitor.log_summary();
        tracing::info!("Run finished: {}", output);
        Ok(output)
    }
}
