//! ids-dash - terminal dashboard for the IDS backend.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use ids_dashboard_client::api::client::{ApiClient, Backend};
use ids_dashboard_client::api::types::ControlAction;
use ids_dashboard_client::config::DashboardConfig;
use ids_dashboard_client::constants;
use ids_dashboard_client::control::CommandDispatcher;
use ids_dashboard_client::notify::SurfaceNotifier;
use ids_dashboard_client::poll::Poller;
use ids_dashboard_client::ui::chart::BarChart;
use ids_dashboard_client::ui::render::Renderer;
use ids_dashboard_client::ui::surface::{Bindings, Surface};
use ids_dashboard_client::ui::term::TerminalSurface;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::from_env();
    log::info!("IDS dashboard client starting...");
    log::info!("  Server: {}", config.server_url);
    log::info!("  Poll interval: {} ms", config.poll_interval.as_millis());

    let backend: Arc<dyn Backend> =
        Arc::new(ApiClient::new(&config).context("failed to build HTTP client")?);

    // Bind render targets once, up front. A missing required slot is a
    // startup failure; a missing chart would only disable the distribution
    // panel.
    let surface: Arc<dyn Surface> = Arc::new(TerminalSurface::new());
    let chart = Arc::new(BarChart::new(Arc::clone(&surface)));
    let bindings =
        Bindings::bind(Arc::clone(&surface), Some(chart)).context("render target binding failed")?;
    let renderer = Arc::new(Renderer::new(bindings));
    renderer.render_startup();

    // Startup health probe; unreachable is fine, the poller will keep trying.
    match backend.health().await {
        Ok(health) => log::info!(
            "Backend healthy: status={}, model_loaded={}, monitoring_available={}",
            health.status,
            health.model_loaded,
            health.monitoring_available
        ),
        Err(e) => log::warn!("Backend not reachable yet: {}", e),
    }

    // Live clock.
    {
        let renderer = Arc::clone(&renderer);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(constants::CLOCK_INTERVAL);
            loop {
                ticker.tick().await;
                renderer.render_clock(chrono::Local::now());
            }
        });
    }

    let poller = Poller::new(Arc::clone(&backend), Arc::clone(&renderer), &config);
    poller.start();

    let notifier = Arc::new(SurfaceNotifier::new(Arc::clone(&surface)));
    let dispatcher = CommandDispatcher::new(backend, Arc::clone(&renderer), poller.clone(), notifier);

    run_command_loop(&poller, &dispatcher).await;

    poller.stop();
    log::info!("IDS dashboard client stopped");
    Ok(())
}

/// Read commands from stdin until EOF or `quit`. These stand in for the
/// dashboard's buttons and file picker.
async fn run_command_loop(poller: &Poller, dispatcher: &CommandDispatcher) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("start") => dispatcher.send_control(ControlAction::Start).await,
            Some("stop") => dispatcher.send_control(ControlAction::Stop).await,
            Some("upload") => match parts.next() {
                Some(path) => dispatcher.upload_file(&PathBuf::from(path)).await,
                None => log::warn!("usage: upload <path>"),
            },
            Some("refresh") => poller.run_once().await,
            Some("pause") => poller.stop(),
            Some("resume") => poller.start(),
            Some("quit") | Some("exit") => break,
            Some(other) => log::warn!("unknown command: {}", other),
            None => {}
        }
    }
}
