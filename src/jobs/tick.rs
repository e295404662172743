use chrono::Utc;
use tokio::{
    task::JoinHandle,
    time::{Duration, sleep},
};

use crate::app_context::AppContext;
use crate::engine::{refresh_interval, run_tick};

/// Single periodic driver. Ticks never overlap: the next wait only starts once
/// the previous tick has been applied, and an interval change restarts the
/// pending wait with the new interval instead of adding a second schedule.
pub(super) fn start_tick_job(app_context: AppContext) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut shutdown = app_context.shutdown.clone();
        let mut previous_tick = None;

        loop {
            if *shutdown.borrow() {
                break;
            }

            let now = Utc::now();
            let interval = refresh_interval(&app_context.engine).await;
            if let Some(previous) = previous_tick {
                let elapsed_ms = now.signed_duration_since(previous).num_milliseconds().max(0);
                let threshold_ms = (interval.as_millis() * 2) as i64;
                if elapsed_ms > threshold_ms {
                    log::warn!(
                        "tick_loop_delayed elapsed_ms={} threshold_ms={}",
                        elapsed_ms,
                        threshold_ms
                    );
                }
            }
            previous_tick = Some(now);

            run_tick(
                &app_context.engine,
                now,
                app_context.alert_sink.as_ref(),
                app_context.display_sink.as_ref(),
            )
            .await;

            if !wait_for_next_tick(&app_context, &mut shutdown).await {
                break;
            }
        }

        log::info!("tick_job_stopped");
    })
}

/// Returns false once shutdown has been requested.
async fn wait_for_next_tick(
    app_context: &AppContext,
    shutdown: &mut tokio::sync::watch::Receiver<bool>,
) -> bool {
    loop {
        let interval: Duration = refresh_interval(&app_context.engine).await;
        tokio::select! {
            _ = sleep(interval) => return true,
            _ = app_context.runtime_update_notify.notified() => {
                log::info!(
                    "refresh_interval_change_applied previous_wait_ms={}",
                    interval.as_millis()
                );
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    return false;
                }
            }
        }
    }
}
