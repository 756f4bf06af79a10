use sysmonitor::{
    arguments::{get_config_path, get_listen_override, is_help_requested, print_help},
    collectors::SysinfoSource,
    config::load_config_from_path,
    logger::{self, LogTag},
    shutdown::{install_shutdown_handlers, ShutdownSignal},
    webserver::{self, state::AppState, ws::{start_producers, WsHub}},
};

/// Main entry point for sysmonitor
///
/// Starts the sampler and the webserver, then waits for Ctrl+C. Shutdown
/// order: stop accepting viewers, cancel sessions, stop the sampler.
#[tokio::main]
async fn main() {
    logger::init();

    if is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::info(LogTag::System, "🚀 sysmonitor starting up...");

    let config_path = get_config_path();
    let config = match load_config_from_path(&config_path) {
        Ok(config) => config,
        Err(e) => {
            logger::error(LogTag::Config, &format!("❌ {}", e));
            std::process::exit(1);
        }
    };

    if !config.logging.file_path.is_empty() {
        if let Err(e) = logger::enable_file_logging(&config.logging.file_path) {
            logger::warning(
                LogTag::System,
                &format!(
                    "Could not open log file '{}': {}",
                    config.logging.file_path, e
                ),
            );
        }
    }

    let listen = get_listen_override().unwrap_or_else(|| config.listen_address());

    let shutdown = ShutdownSignal::new();
    if let Err(e) = install_shutdown_handlers(&shutdown) {
        logger::warning(
            LogTag::System,
            &format!("Could not install Ctrl+C handler: {}", e),
        );
    }

    let hub = WsHub::new(config.hub.subscriber_buffer);
    let sampler = start_producers(
        hub.clone(),
        SysinfoSource::new(&config.sampler.disk_mount_point),
        config.sample_interval(),
        shutdown.clone(),
    );

    let state = AppState::new(hub, shutdown.clone(), config.write_timeout());
    let result = webserver::start_server(&listen, &config.server.static_dir, state).await;

    // Server exit (clean or not) ends everything else too
    shutdown.trigger();
    if let Err(e) = sampler.await {
        logger::warning(LogTag::Sampler, &format!("Sampler task failed: {}", e));
    }

    match result {
        Ok(()) => {
            logger::info(LogTag::System, "✅ sysmonitor stopped");
            logger::flush();
        }
        Err(e) => {
            logger::error(LogTag::Webserver, &format!("❌ {}", e));
            logger::flush();
            std::process::exit(1);
        }
    }
}
