use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
    event::{ModifyKind, RenameMode},
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::app_context::AppContext;
use crate::config::{RuntimeConfig, load_config};
use crate::engine::SyncReport;

async fn apply_runtime_reload_from_path(
    app_context: &AppContext,
    config_path: &str,
) -> Result<(RuntimeConfig, SyncReport), String> {
    let new_config = load_config(config_path).map_err(|error| error.to_string())?;
    let runtime_config = RuntimeConfig::from_config(&new_config).map_err(|error| error.to_string())?;
    let report = app_context
        .update_runtime_config(runtime_config.clone())
        .await
        .map_err(|error| error.to_string())?;
    Ok((runtime_config, report))
}

/// Directory to watch and file name to match. Editors that save by renaming
/// a temp file over the config replace its inode, so the watch sits on the
/// parent directory instead of the file.
fn watch_target(config_path: &Path) -> Option<(PathBuf, OsString)> {
    let file_name = config_path.file_name()?.to_os_string();
    let dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Some((dir, file_name))
}

/// Whether `event` leaves a new version of the config file in place.
fn touches_config(event: &Event, file_name: &OsString) -> bool {
    let names_config =
        |path: &PathBuf| path.file_name().is_some_and(|name| name == file_name.as_os_str());

    match event.kind {
        // Renamed away: nothing to load until something takes its place.
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => false,
        // Both ends of a rename: only the destination matters.
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            event.paths.get(1).is_some_and(names_config)
        }
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Any => {
            event.paths.iter().any(names_config)
        }
        _ => false,
    }
}

async fn run_reload_loop(
    app_context: AppContext,
    file_name: OsString,
    mut events: UnboundedReceiver<notify::Result<Event>>,
) {
    while let Some(event_result) = events.recv().await {
        let event = match event_result {
            Ok(event) => event,
            Err(error) => {
                log::warn!("config_watch_error error={}", error);
                continue;
            }
        };
        if !touches_config(&event, &file_name) {
            continue;
        }
        // A single save often arrives as several events; one reload covers them.
        while events.try_recv().is_ok() {}

        match apply_runtime_reload_from_path(&app_context, app_context.config_path.as_str()).await {
            Ok((runtime_config, report)) => {
                log::info!(
                    "config_hot_reload_applied refresh_interval_ms={} metrics={} added={} removed={} retuned={} rebuilt={} alerts={}",
                    runtime_config.settings.refresh_interval_ms,
                    runtime_config.metrics.len(),
                    report.added.join(","),
                    report.removed.join(","),
                    report.retuned.join(","),
                    report.rebuilt.join(","),
                    report.alerts.len(),
                );
            }
            Err(error) => {
                log::warn!("config_hot_reload_rejected error={}", error);
            }
        }
    }
}

pub(super) fn start_config_hot_reload_job(app_context: AppContext) -> JoinHandle<()> {
    tokio::spawn(async move {
        let Some((watch_dir, file_name)) = watch_target(Path::new(&app_context.config_path)) else {
            log::warn!(
                "config hot-reload disabled: {} does not name a file",
                app_context.config_path
            );
            return;
        };

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let mut watcher = match RecommendedWatcher::new(
            move |result: notify::Result<Event>| {
                let _ = tx.send(result);
            },
            NotifyConfig::default(),
        ) {
            Ok(watcher) => watcher,
            Err(error) => {
                log::warn!("config hot-reload disabled: watcher init failed: {}", error);
                return;
            }
        };
        if let Err(error) = watcher.watch(&watch_dir, RecursiveMode::NonRecursive) {
            log::warn!(
                "config hot-reload disabled: failed to watch {}: {}",
                watch_dir.display(),
                error
            );
            return;
        }

        // The watcher stops when dropped, so it lives as long as the loop.
        run_reload_loop(app_context, file_name, rx).await;
        drop(watcher);
    })
}
