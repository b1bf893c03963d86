use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use rover_host::camera::NoCamera;
use rover_host::config::{HostConfig, Mode};
use rover_host::dashboard::{Dashboard, DashboardSettings};
use rover_host::dual_slider::DualSlider;
use rover_host::input::{InputEvent, parse_line};
use rover_host::link::{DryRunLink, HttpLink, VehicleLink};

fn init_tracing() {
    // Default INFO; allow override via RUST_LOG
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .compact()
        .try_init();
}

/// Forward parsed stdin lines to the controller until EOF.
fn spawn_stdin_reader(tx: mpsc::Sender<InputEvent>) -> JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
            match parse_line(&line) {
                Some(event) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => warn!("Unrecognised input: {:?}", line.trim()),
            }
        }
        Ok(())
    })
}

async fn run_session<L: VehicleLink>(
    cfg: &HostConfig,
    mode: Mode,
    link: L,
    inputs: mpsc::Receiver<InputEvent>,
) {
    match mode {
        Mode::Dashboard => {
            info!("Keyboard: w/a/s/d or arrow key codes to move, x or Space to stop");
            info!("Commands: speed N, set N, preset N, estop, camera, status, sensors");
            let rng = match cfg.rng_seed() {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let dashboard =
                Dashboard::new(link, DashboardSettings::from_config(cfg), rng, NoCamera);
            let dashboard = dashboard.run(inputs).await;
            info!(
                "Final state: {} at {}",
                dashboard.direction_label(),
                dashboard.speed_text()
            );
        }
        Mode::DualSlider => {
            info!("Commands: left N, right N (-100..100), stop");
            let sliders = DualSlider::new(link, cfg.motor_settle());
            let sliders = sliders.run(inputs).await;
            info!("Final sliders: {:?}", sliders.shown());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Load config file
    let cfg = HostConfig::load_default().unwrap_or_default();
    let mode = std::env::args()
        .nth(1)
        .and_then(|arg| Mode::from_arg(&arg))
        .unwrap_or_else(|| cfg.mode());

    info!(
        "Rover host - {:?} (controller={}, dry_run={})",
        mode,
        cfg.base_url(),
        cfg.dry_run()
    );

    let (tx, rx) = mpsc::channel(32);
    let reader = spawn_stdin_reader(tx);

    let session = async {
        if cfg.dry_run() {
            let link = DryRunLink::new();
            run_session(&cfg, mode, link.clone(), rx).await;
            info!("Dry run sent {} command(s)", link.sent().len());
        } else {
            run_session(&cfg, mode, HttpLink::new(cfg.base_url()), rx).await;
        }
    };

    tokio::select! {
        _ = session => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            // A blocked stdin read would hold runtime shutdown until Enter
            std::process::exit(0);
        }
    }

    reader.await.context("stdin reader panicked")??;
    Ok(())
}
