use plantsim::app_context::AppContext;
use plantsim::config::load_config_or_default;
use plantsim::jobs::start_background_jobs;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

const DEFAULT_CONFIG_PATH: &str = "plantsim.toml";
const CONFIG_PATH_ENV: &str = "PLANTSIM_CONFIG";

#[tokio::main]
async fn main() {
    init_json_logging();

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match load_config_or_default(&config_path) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return;
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let app_context = match AppContext::new(config, config_path.as_str(), shutdown_rx) {
        Ok(app_context) => app_context,
        Err(error) => {
            log::error!("Engine initialization failed: {}", error);
            return;
        }
    };

    log::info!(
        "plantsim_starting config_path={} profile={} refresh_interval_ms={} history_capacity={} alert_capacity={} seeded={}",
        config_path,
        app_context.config.profile,
        app_context.config.refresh_interval_ms,
        app_context.config.history_capacity,
        app_context.config.alert_capacity,
        app_context.config.seed.is_some(),
    );

    let jobs = start_background_jobs(app_context);

    if let Err(error) = tokio::signal::ctrl_c().await {
        log::error!("shutdown signal listener failed: {}", error);
    }
    log::info!("plantsim_shutdown_requested");

    if shutdown_tx.send(true).is_err() {
        log::warn!("shutdown signal had no listeners");
    }
    jobs.join().await;
    log::info!("plantsim_stopped");
}
