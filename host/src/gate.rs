//! Obstacle gating and auto-stop thresholds.

use rover_protocol::Direction;

use crate::sensors::{Sensor, SensorReadings};

/// Sensor that must be clear before moving in `direction`.
pub fn facing_sensor(direction: Direction) -> Option<Sensor> {
    match direction {
        Direction::Up => Some(Sensor::Front),
        Direction::Down => Some(Sensor::Back),
        Direction::Left => Some(Sensor::Left),
        Direction::Right => Some(Sensor::Right),
        Direction::Stop => None,
    }
}

/// Pure function of the current readings; holds no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleGate {
    /// Moves toward a sensor at or below this distance are refused.
    pub block_cm: u8,
    /// Any sensor at or below this distance forces a stop.
    pub auto_stop_cm: u8,
}

impl Default for ObstacleGate {
    fn default() -> Self {
        Self {
            block_cm: 10,
            auto_stop_cm: 5,
        }
    }
}

impl ObstacleGate {
    pub fn is_blocked(&self, direction: Direction, readings: &SensorReadings) -> bool {
        facing_sensor(direction).is_some_and(|s| readings.get(s) <= self.block_cm)
    }

    /// True when `active` is a move and some sensor is inside the auto-stop range.
    pub fn requires_auto_stop(&self, active: Direction, readings: &SensorReadings) -> bool {
        !active.is_stop() && readings.iter().any(|(_, d)| d <= self.auto_stop_cm)
    }
}
