//! Simulated proximity sensors.
//!
//! Four ultrasonic-style readings in centimetres, advanced by a bounded random
//! walk with the occasional simulated obstacle.

use std::fmt;

use rand::Rng;

/// Sensor positions around the chassis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sensor {
    Front,
    Left,
    Right,
    Back,
}

impl Sensor {
    pub const ALL: [Sensor; 4] = [Sensor::Front, Sensor::Left, Sensor::Right, Sensor::Back];

    fn index(self) -> usize {
        match self {
            Sensor::Front => 0,
            Sensor::Left => 1,
            Sensor::Right => 2,
            Sensor::Back => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sensor::Front => "front",
            Sensor::Left => "left",
            Sensor::Right => "right",
            Sensor::Back => "back",
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display bucket for a distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorLevel {
    Safe,
    Warning,
    Danger,
}

impl SensorLevel {
    pub const DANGER_CM: u8 = 20;
    pub const WARNING_CM: u8 = 30;

    pub fn from_distance(distance_cm: u8) -> Self {
        if distance_cm <= Self::DANGER_CM {
            SensorLevel::Danger
        } else if distance_cm <= Self::WARNING_CM {
            SensorLevel::Warning
        } else {
            SensorLevel::Safe
        }
    }
}

/// One reading per sensor, in centimetres.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorReadings([u8; 4]);

impl Default for SensorReadings {
    fn default() -> Self {
        Self::new(27, 16, 33, 33)
    }
}

impl SensorReadings {
    pub fn new(front: u8, left: u8, right: u8, back: u8) -> Self {
        Self([front, left, right, back])
    }

    pub fn get(&self, sensor: Sensor) -> u8 {
        self.0[sensor.index()]
    }

    pub fn set(&mut self, sensor: Sensor, distance_cm: u8) {
        self.0[sensor.index()] = distance_cm;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Sensor, u8)> + '_ {
        Sensor::ALL.into_iter().map(|s| (s, self.get(s)))
    }

    pub fn min(&self) -> u8 {
        self.0.iter().copied().min().unwrap_or(u8::MAX)
    }
}

impl fmt::Display for SensorReadings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "front={}cm left={}cm right={}cm back={}cm",
            self.get(Sensor::Front),
            self.get(Sensor::Left),
            self.get(Sensor::Right),
            self.get(Sensor::Back)
        )
    }
}

/// Random-walk generator for [`SensorReadings`].
#[derive(Debug, Clone)]
pub struct SensorSimulator<R> {
    rng: R,
    current: SensorReadings,
}

impl<R: Rng> SensorSimulator<R> {
    pub const MIN_CM: u8 = 10;
    pub const MAX_CM: u8 = 50;
    /// Largest per-tick change in either direction.
    pub const MAX_STEP_CM: f64 = 5.0;
    pub const OBSTACLE_PROBABILITY: f64 = 0.1;

    pub fn new(rng: R, initial: SensorReadings) -> Self {
        Self {
            rng,
            current: initial,
        }
    }

    pub fn current(&self) -> SensorReadings {
        self.current
    }

    /// Next value for one sensor given its previous reading.
    pub fn next_distance(&mut self, previous: u8) -> u8 {
        let raw = if self.rng.random_bool(Self::OBSTACLE_PROBABILITY) {
            if self.rng.random_bool(0.5) {
                // close obstacle
                f64::from(self.rng.random_range(8u8..=22))
            } else {
                // far obstacle
                f64::from(self.rng.random_range(30u8..=49))
            }
        } else {
            let delta = self.rng.random_range(-Self::MAX_STEP_CM..=Self::MAX_STEP_CM);
            f64::from(previous) + delta
        };
        raw.clamp(f64::from(Self::MIN_CM), f64::from(Self::MAX_CM))
            .round() as u8
    }

    /// Advance every sensor from `from`; the result becomes the new state.
    pub fn step_from(&mut self, from: &SensorReadings) -> SensorReadings {
        let mut next = *from;
        for sensor in Sensor::ALL {
            let distance = self.next_distance(from.get(sensor));
            next.set(sensor, distance);
        }
        self.current = next;
        next
    }
}

impl<R: Rng> Iterator for SensorSimulator<R> {
    type Item = SensorReadings;

    fn next(&mut self) -> Option<SensorReadings> {
        let from = self.current;
        Some(self.step_from(&from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn readings_stay_in_bounds() {
        let sim = SensorSimulator::new(StdRng::seed_from_u64(7), SensorReadings::default());
        for readings in sim.take(10_000) {
            for (sensor, d) in readings.iter() {
                assert!((10..=50).contains(&d), "{sensor} out of range: {d}");
            }
        }
    }

    #[test]
    fn walk_starts_from_out_of_range_values_and_recovers() {
        let mut sim = SensorSimulator::new(StdRng::seed_from_u64(1), SensorReadings::default());
        let next = sim.step_from(&SensorReadings::new(0, 3, 200, 55));
        for (_, d) in next.iter() {
            assert!((10..=50).contains(&d));
        }
    }

    #[test]
    fn walk_moves_at_most_five_without_obstacles() {
        let mut sim = SensorSimulator::new(StdRng::seed_from_u64(99), SensorReadings::default());
        let mut jumps = 0;
        let mut prev = sim.current();
        for _ in 0..2_000 {
            let next = sim.next().unwrap();
            for sensor in Sensor::ALL {
                let diff = (i16::from(next.get(sensor)) - i16::from(prev.get(sensor))).abs();
                if diff > 5 {
                    jumps += 1;
                }
            }
            prev = next;
        }
        // Only simulated obstacles (10% per sensor per tick) may jump further.
        assert!(jumps > 0);
        assert!(jumps < 2_000 * 4 / 5);
    }

    #[test]
    fn state_carries_forward() {
        let mut sim = SensorSimulator::new(StdRng::seed_from_u64(3), SensorReadings::default());
        let first = sim.next().unwrap();
        assert_eq!(sim.current(), first);
    }

    #[test]
    fn levels_follow_distance_buckets() {
        assert_eq!(SensorLevel::from_distance(20), SensorLevel::Danger);
        assert_eq!(SensorLevel::from_distance(21), SensorLevel::Warning);
        assert_eq!(SensorLevel::from_distance(30), SensorLevel::Warning);
        assert_eq!(SensorLevel::from_distance(31), SensorLevel::Safe);
    }

    #[test]
    fn initial_readings() {
        let r = SensorReadings::default();
        assert_eq!(r.get(Sensor::Front), 27);
        assert_eq!(r.get(Sensor::Left), 16);
        assert_eq!(r.get(Sensor::Right), 33);
        assert_eq!(r.get(Sensor::Back), 33);
        assert_eq!(r.min(), 16);
    }
}
