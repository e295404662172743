use tokio::{
    task::JoinHandle,
    time::{Duration, interval},
};

use crate::app_context::AppContext;
use crate::engine::metric_summaries;

pub(super) fn start_summary_job(app_context: AppContext) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(app_context.config.summary.interval_secs));
        // The first tick of a tokio interval completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            for (metric_id, summary) in metric_summaries(&app_context.engine).await {
                tracing::info!(
                    target: "summary",
                    module = "summary",
                    metric = metric_id.as_str(),
                    samples = summary.sample_count,
                    min = summary.min,
                    max = summary.max,
                    mean = summary.mean,
                    normal = summary.normal_samples,
                    warning = summary.warning_samples,
                    critical = summary.critical_samples,
                    "metric_summary"
                );
            }
        }
    })
}
