use tokio::task::JoinHandle;

use crate::app_context::AppContext;

mod config_reload;
mod summary;
mod tick;

pub struct BackgroundJobs {
    tick: JoinHandle<()>,
    auxiliary: Vec<JoinHandle<()>>,
}

pub fn start_background_jobs(app_context: AppContext) -> BackgroundJobs {
    let tick = tick::start_tick_job(app_context.clone());
    let mut auxiliary = vec![config_reload::start_config_hot_reload_job(
        app_context.clone(),
    )];

    if app_context.config.summary.enabled {
        auxiliary.push(summary::start_summary_job(app_context));
    }

    BackgroundJobs { tick, auxiliary }
}

impl BackgroundJobs {
    /// Waits for the tick job to observe the shutdown signal, then stops the
    /// auxiliary jobs.
    pub async fn join(self) {
        if let Err(error) = self.tick.await {
            log::error!("tick_job_failed error={}", error);
        }
        for handle in self.auxiliary {
            handle.abort();
        }
    }
}
