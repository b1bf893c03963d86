use serde::Deserialize;
use std::{env, fs, path::PathBuf};
use tokio::time::Duration;
use tracing::{error, info};

use crate::gate::ObstacleGate;

/// Which front end to run.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Dashboard,
    DualSlider,
}

impl Mode {
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "dashboard" => Some(Mode::Dashboard),
            "dual-slider" | "dual" => Some(Mode::DualSlider),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct DashboardSection {
    pub speed_settle_ms: Option<u64>,    // default: 100
    pub sensor_interval_ms: Option<u64>, // default: 2000
    pub status_interval_ms: Option<u64>, // default: 5000
    pub block_cm: Option<u8>,            // default: 10
    pub auto_stop_cm: Option<u8>,        // default: 5
    pub initial_speed: Option<u8>,       // default: 50
    pub presets: Option<Vec<u8>>,        // default: [25, 50, 75, 100]
    pub rng_seed: Option<u64>,           // unseeded when absent
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct DualSliderSection {
    pub settle_ms: Option<u64>, // default: 50
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct HostConfig {
    pub base_url: Option<String>, // e.g. "http://192.168.4.1"
    pub mode: Option<Mode>,
    pub dry_run: Option<bool>, // default: false
    #[serde(default)]
    pub dashboard: DashboardSection,
    #[serde(default)]
    pub dual_slider: DualSliderSection,
}

impl HostConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://192.168.4.1";

    pub fn load_default() -> Option<Self> {
        // Priority: ROVER_HOST_CONFIG env var, then ./rover-host.toml if exists
        if let Ok(p) = env::var("ROVER_HOST_CONFIG") {
            return Self::from_path(PathBuf::from(p));
        }
        let cwd = env::current_dir().ok()?;
        let p = cwd.join("rover-host.toml");
        if p.exists() {
            return Self::from_path(p);
        }
        None
    }

    fn from_path(path: PathBuf) -> Option<Self> {
        match fs::read_to_string(&path) {
            Ok(s) => match Self::parse(&s) {
                Ok(cfg) => {
                    info!("Loaded config from {}", path.display());
                    Some(cfg)
                }
                Err(e) => {
                    error!("Failed to parse config (TOML) {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                error!("Failed to read config {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(Self::DEFAULT_BASE_URL)
    }
    pub fn mode(&self) -> Mode { self.mode.unwrap_or_default() }
    pub fn dry_run(&self) -> bool { self.dry_run.unwrap_or(false) }

    pub fn speed_settle(&self) -> Duration {
        Duration::from_millis(self.dashboard.speed_settle_ms.unwrap_or(100))
    }
    pub fn sensor_interval(&self) -> Duration {
        Duration::from_millis(self.dashboard.sensor_interval_ms.unwrap_or(2000))
    }
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.dashboard.status_interval_ms.unwrap_or(5000))
    }
    pub fn gate(&self) -> ObstacleGate {
        let default = ObstacleGate::default();
        ObstacleGate {
            block_cm: self.dashboard.block_cm.unwrap_or(default.block_cm),
            auto_stop_cm: self.dashboard.auto_stop_cm.unwrap_or(default.auto_stop_cm),
        }
    }
    pub fn initial_speed(&self) -> u8 { self.dashboard.initial_speed.unwrap_or(50).min(100) }
    pub fn presets(&self) -> Vec<u8> {
        self.dashboard
            .presets
            .clone()
            .unwrap_or_else(|| vec![25, 50, 75, 100])
    }
    pub fn rng_seed(&self) -> Option<u64> { self.dashboard.rng_seed }

    pub fn motor_settle(&self) -> Duration {
        Duration::from_millis(self.dual_slider.settle_ms.unwrap_or(50))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = HostConfig::parse("").unwrap();
        assert_eq!(cfg.base_url(), "http://192.168.4.1");
        assert_eq!(cfg.mode(), Mode::Dashboard);
        assert!(!cfg.dry_run());
        assert_eq!(cfg.speed_settle(), Duration::from_millis(100));
        assert_eq!(cfg.motor_settle(), Duration::from_millis(50));
        assert_eq!(cfg.sensor_interval(), Duration::from_secs(2));
        assert_eq!(cfg.status_interval(), Duration::from_secs(5));
        assert_eq!(cfg.gate(), ObstacleGate::default());
        assert_eq!(cfg.initial_speed(), 50);
        assert_eq!(cfg.presets(), vec![25, 50, 75, 100]);
    }

    #[test]
    fn sections_override_defaults() {
        let cfg = HostConfig::parse(
            r#"
            base_url = "http://rover.local"
            mode = "dual-slider"
            dry_run = true

            [dashboard]
            block_cm = 15
            presets = [10, 90]

            [dual_slider]
            settle_ms = 80
            "#,
        )
        .unwrap();
        assert_eq!(cfg.base_url(), "http://rover.local");
        assert_eq!(cfg.mode(), Mode::DualSlider);
        assert!(cfg.dry_run());
        assert_eq!(cfg.gate().block_cm, 15);
        assert_eq!(cfg.gate().auto_stop_cm, 5);
        assert_eq!(cfg.presets(), vec![10, 90]);
        assert_eq!(cfg.motor_settle(), Duration::from_millis(80));
    }

    #[test]
    fn mode_from_cli_argument() {
        assert_eq!(Mode::from_arg("dual"), Some(Mode::DualSlider));
        assert_eq!(Mode::from_arg("dashboard"), Some(Mode::Dashboard));
        assert_eq!(Mode::from_arg("--help"), None);
    }
}
