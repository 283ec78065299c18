use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives one extract → filter → load pass.
pub struct MatchEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> MatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting lens match pipeline");

        let catalog = self.pipeline.extract().await?;
        tracing::info!("Loaded {} catalog entries", catalog.len());
        self.monitor.log_stats("extract");

        let result = self.pipeline.transform(catalog).await?;
        tracing::info!(
            "Matched {} of {} lenses",
            result.matched.len(),
            result.total_considered
        );
        self.monitor.log_stats("filter");

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Results written to: {}", output_path);
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
