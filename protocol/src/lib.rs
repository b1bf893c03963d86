#![cfg_attr(not(test), no_std)]

//! Request vocabulary understood by the rover's HTTP vehicle controller.
//!
//! Every command is a bodiless `GET`; [`Command`] renders to the request path
//! (including the query string) through `Display`.

use core::fmt::{self, Write};

use heapless::String;
use serde::{Deserialize, Serialize};

/// Longest rendered path is `/motors?left=-100&right=-100` (28 bytes).
pub const PATH_CAPACITY: usize = 32;

/// Discrete movement intent. `Stop` doubles as the "no movement" state.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    Stop,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Stop => "stop",
        }
    }

    pub fn is_stop(self) -> bool {
        self == Direction::Stop
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speed percentage, always within 0..=100.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct Speed(u8);

impl Speed {
    pub const MAX: u8 = 100;

    /// Rejects anything outside 0..=100.
    pub fn new(percent: i32) -> Option<Self> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= Self::MAX)
            .map(Speed)
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Speed {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Speed::new(value as i32).ok_or("speed out of range 0..=100")
    }
}

impl From<Speed> for u8 {
    fn from(speed: Speed) -> u8 {
        speed.0
    }
}

/// Which motor a slider drives.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Signed power for both motors. Components are always sent together.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Default)]
pub struct MotorPair {
    pub left: i8,
    pub right: i8,
}

impl MotorPair {
    pub const LIMIT: i32 = 100;

    /// Builds a pair, clamping each component into -100..=100.
    pub fn clamped(left: i32, right: i32) -> Self {
        Self {
            left: clamp_power(left),
            right: clamp_power(right),
        }
    }

    pub fn get(&self, side: Side) -> i8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Returns a copy with one side replaced (clamped).
    pub fn with(self, side: Side, value: i32) -> Self {
        let value = clamp_power(value);
        match side {
            Side::Left => Self { left: value, ..self },
            Side::Right => Self { right: value, ..self },
        }
    }
}

/// Clamp a raw slider value into the motor power range.
pub fn clamp_power(value: i32) -> i8 {
    value.clamp(-MotorPair::LIMIT, MotorPair::LIMIT) as i8
}

/// One request to the vehicle controller.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// `/up`, `/down`, `/left`, `/right` or `/stop`
    Drive(Direction),
    /// `/speed?value=N`
    Speed(Speed),
    /// `/motors?left=L&right=R`
    Motors(MotorPair),
    /// `/status`, answered with a JSON [`StatusReport`]
    Status,
    /// `/restart`
    Restart,
}

impl Command {
    pub const STOP: Command = Command::Drive(Direction::Stop);

    /// Request path as a fixed-capacity string.
    pub fn path(&self) -> String<PATH_CAPACITY> {
        let mut out = String::new();
        // Every variant fits in PATH_CAPACITY.
        let _ = write!(out, "{self}");
        out
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Drive(direction) => write!(f, "/{direction}"),
            Command::Speed(speed) => write!(f, "/speed?value={}", speed.percent()),
            Command::Motors(pair) => {
                write!(f, "/motors?left={}&right={}", pair.left, pair.right)
            }
            Command::Status => f.write_str("/status"),
            Command::Restart => f.write_str("/restart"),
        }
    }
}

/// `/status` body of the single-motor dashboard firmware.
///
/// All fields are optional so a partial payload still parses.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(default)]
pub struct StatusReport {
    /// Seconds since the controller booted.
    pub uptime: Option<u64>,
    /// Wi-Fi RSSI in dB.
    pub signal: Option<i32>,
    pub direction: Option<String<16>>,
    pub speed: Option<u8>,
    pub rpm: Option<f32>,
    pub encoder: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_paths() {
        assert_eq!(Command::Drive(Direction::Up).path().as_str(), "/up");
        assert_eq!(Command::Drive(Direction::Right).path().as_str(), "/right");
        assert_eq!(Command::STOP.path().as_str(), "/stop");
        assert_eq!(Command::Status.path().as_str(), "/status");
        assert_eq!(Command::Restart.path().as_str(), "/restart");
    }

    #[test]
    fn speed_rejects_out_of_range() {
        assert!(Speed::new(150).is_none());
        assert!(Speed::new(-1).is_none());
        assert_eq!(Speed::new(100).map(Speed::percent), Some(100));
        assert_eq!(Speed::new(0).map(Speed::percent), Some(0));
    }

    #[test]
    fn speed_path_carries_value() {
        let speed = Speed::new(42).unwrap();
        assert_eq!(Command::Speed(speed).to_string(), "/speed?value=42");
    }

    #[test]
    fn motor_pair_clamps_and_renders_both_sides() {
        let pair = MotorPair::clamped(-250, 130);
        assert_eq!(pair, MotorPair { left: -100, right: 100 });
        assert_eq!(
            Command::Motors(pair).path().as_str(),
            "/motors?left=-100&right=100"
        );
    }

    #[test]
    fn with_replaces_one_side_only() {
        let pair = MotorPair::default().with(Side::Left, 75).with(Side::Right, -300);
        assert_eq!(pair.get(Side::Left), 75);
        assert_eq!(pair.get(Side::Right), -100);
    }

    #[test]
    fn status_report_tolerates_missing_and_extra_fields() {
        let report: StatusReport =
            serde_json::from_str(r#"{"uptime":120,"signal":-61,"extra":true}"#).unwrap();
        assert_eq!(report.uptime, Some(120));
        assert_eq!(report.signal, Some(-61));
        assert!(report.direction.is_none());

        let full: StatusReport = serde_json::from_str(
            r#"{"direction":"Forward","speed":50,"rpm":12.5,"encoder":-3,"signal":-40,"uptime":7}"#,
        )
        .unwrap();
        assert_eq!(full.direction.as_deref(), Some("Forward"));
        assert_eq!(full.speed, Some(50));
    }
}
