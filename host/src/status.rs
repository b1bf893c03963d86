//! Battery and signal readout derived from the controller's `/status`.

use std::fmt;

use rand::Rng;
use rover_protocol::{Command, StatusReport};
use tracing::{error, warn};

use crate::error::LinkError;
use crate::link::VehicleLink;

/// Shown when the controller reports no (or zero) uptime.
pub const DEFAULT_BATTERY_PERCENT: i64 = 68;

/// Battery estimate from uptime: one percent per minute.
///
/// Not clamped; a long uptime yields a negative figure.
pub fn battery_percent(uptime_s: Option<u64>) -> i64 {
    match uptime_s {
        Some(uptime) if uptime != 0 => 100 - (uptime / 60) as i64,
        _ => DEFAULT_BATTERY_PERCENT,
    }
}

/// Signal quality bucket for an RSSI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalQuality {
    Excellent,
    Good,
    Fair,
    Weak,
    NoSignal,
}

impl SignalQuality {
    pub fn from_rssi(rssi_db: i32) -> Self {
        match rssi_db {
            r if r >= -50 => SignalQuality::Excellent,
            r if r >= -60 => SignalQuality::Good,
            r if r >= -70 => SignalQuality::Fair,
            r if r >= -80 => SignalQuality::Weak,
            _ => SignalQuality::NoSignal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SignalQuality::Excellent => "Excellent",
            SignalQuality::Good => "Good",
            SignalQuality::Fair => "Fair",
            SignalQuality::Weak => "Weak",
            SignalQuality::NoSignal => "No Signal",
        }
    }

    /// Hex colour the label is drawn in.
    pub fn color(self) -> &'static str {
        match self {
            SignalQuality::Excellent => "#28a745",
            SignalQuality::Good => "#ffc107",
            SignalQuality::Fair => "#fd7e14",
            SignalQuality::Weak => "#dc3545",
            SignalQuality::NoSignal => "#6c757d",
        }
    }
}

impl fmt::Display for SignalQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the status strip currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusDisplay {
    pub battery_text: Option<String>,
    pub signal_text: Option<String>,
    pub signal_quality: Option<SignalQuality>,
}

impl StatusDisplay {
    /// Apply a report. Missing fields leave the previous text in place.
    pub fn apply(&mut self, report: &StatusReport) {
        self.battery_text = Some(format!("🔋 {}%", battery_percent(report.uptime)));
        match report.signal {
            Some(rssi) => {
                self.signal_text = Some(format!("{rssi} dB"));
                self.signal_quality = Some(SignalQuality::from_rssi(rssi));
            }
            None => warn!(target: "rover_host::status", "status report carried no signal field"),
        }
    }
}

/// Parse a `/status` body.
pub fn parse_status(body: &str) -> Result<StatusReport, LinkError> {
    Ok(serde_json::from_str(body)?)
}

/// Request and parse `/status`.
pub async fn fetch_status<L: VehicleLink>(link: &L) -> Result<StatusReport, LinkError> {
    let body = link.send(Command::Status).await?;
    parse_status(&body)
}

/// One-shot status query; failures are logged and yield `None`.
pub async fn system_status<L: VehicleLink>(link: &L) -> Option<StatusReport> {
    match fetch_status(link).await {
        Ok(report) => Some(report),
        Err(e) => {
            error!(target: "rover_host::status", "Failed to fetch status: {}", e);
            None
        }
    }
}

/// Offline battery figure: 68% minus up to 4, never below 10.
pub fn simulated_battery_level<R: Rng>(rng: &mut R) -> u8 {
    let variation = rng.random_range(0u8..5);
    68u8.saturating_sub(variation).max(10)
}

/// Offline RSSI figure around -42 dB.
pub fn simulated_signal_strength<R: Rng>(rng: &mut R) -> i32 {
    -42 + rng.random_range(-5..5)
}
