//! Dashboard front end: direction buttons, speed slider with presets,
//! simulated proximity sensors, camera preview and status strip.

use rand::Rng;
use rover_protocol::{Command, Direction, Speed, StatusReport};
use tokio::sync::mpsc;
use tokio::time::{self, Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::camera::{CameraPreview, CameraSource, PreviewState};
use crate::config::HostConfig;
use crate::debounce::{Debouncer, sleep_until_deadline};
use crate::gate::ObstacleGate;
use crate::input::{Action, ControlSurface, InputEvent, SliderField};
use crate::link::{VehicleLink, dispatch};
use crate::notice::{NoticeKind, Notices};
use crate::sensors::{Sensor, SensorLevel, SensorReadings, SensorSimulator};
use crate::status::{StatusDisplay, fetch_status, system_status};

/// Timings and thresholds for one dashboard session.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub speed_settle: Duration,
    pub sensor_interval: Duration,
    pub status_interval: Duration,
    pub gate: ObstacleGate,
    pub initial_speed: u8,
    pub presets: Vec<u8>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self::from_config(&HostConfig::default())
    }
}

impl DashboardSettings {
    pub fn from_config(cfg: &HostConfig) -> Self {
        Self {
            speed_settle: cfg.speed_settle(),
            sensor_interval: cfg.sensor_interval(),
            status_interval: cfg.status_interval(),
            gate: cfg.gate(),
            initial_speed: cfg.initial_speed(),
            presets: cfg.presets(),
        }
    }
}

/// Result of a direction press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Sent,
    Blocked,
}

/// Human label for the active direction.
pub fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "Up",
        Direction::Down => "Down",
        Direction::Left => "Left",
        Direction::Right => "Right",
        Direction::Stop => "Stopped",
    }
}

pub struct Dashboard<L, R, C> {
    link: L,
    settings: DashboardSettings,
    direction: Direction,
    speed: u8,
    slider: u8,
    speed_debounce: Debouncer<Speed>,
    readings: SensorReadings,
    simulator: SensorSimulator<R>,
    notices: Notices,
    status: StatusDisplay,
    camera: CameraPreview<C>,
}

impl<L, R, C> Dashboard<L, R, C>
where
    L: VehicleLink,
    R: Rng,
    C: CameraSource,
{
    pub fn new(link: L, settings: DashboardSettings, rng: R, camera: C) -> Self {
        let readings = SensorReadings::default();
        Self {
            link,
            speed: settings.initial_speed,
            slider: settings.initial_speed,
            speed_debounce: Debouncer::new(settings.speed_settle),
            direction: Direction::Stop,
            simulator: SensorSimulator::new(rng, readings),
            readings,
            notices: Notices::default(),
            status: StatusDisplay::default(),
            camera: CameraPreview::new(camera),
            settings,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn direction_label(&self) -> &'static str {
        direction_label(self.direction)
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn speed_text(&self) -> String {
        format!("{}%", self.speed)
    }

    /// Position of the speed slider (may run ahead of `speed` while settling).
    pub fn slider(&self) -> u8 {
        self.slider
    }

    /// Preset button matching the current speed, if any.
    pub fn active_preset(&self) -> Option<u8> {
        self.settings.presets.iter().copied().find(|p| *p == self.speed)
    }

    pub fn readings(&self) -> SensorReadings {
        self.readings
    }

    pub fn sensor_level(&self, sensor: Sensor) -> SensorLevel {
        SensorLevel::from_distance(self.readings.get(sensor))
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn status_display(&self) -> &StatusDisplay {
        &self.status
    }

    pub fn camera_state(&self) -> PreviewState {
        self.camera.state()
    }

    pub fn is_blocked(&self, direction: Direction) -> bool {
        self.settings.gate.is_blocked(direction, &self.readings)
    }

    /// Gate, record and send one direction intent.
    pub fn handle_movement(&mut self, direction: Direction, now: Instant) -> MoveOutcome {
        if self.is_blocked(direction) {
            self.notices.raise(NoticeKind::Obstacle(direction), now);
            return MoveOutcome::Blocked;
        }

        self.direction = direction;
        dispatch(&self.link, Command::Drive(direction));
        info!(
            "Movement: {} at {}% speed",
            direction.as_str().to_uppercase(),
            self.speed
        );
        MoveOutcome::Sent
    }

    /// Slider moved; the speed is sent once the slider settles.
    pub fn slide_speed(&mut self, value: i32, now: Instant) {
        let Some(speed) = Speed::new(value) else {
            debug!("slider value {} outside 0..=100 ignored", value);
            return;
        };
        self.slider = speed.percent();
        self.speed_debounce.schedule(speed, now);
    }

    /// Apply a speed immediately and send it.
    pub fn update_speed(&mut self, speed: Speed) {
        self.speed = speed.percent();
        info!("Speed updated to: {}%", self.speed);
        let command = Command::Speed(speed);
        debug!("Sending speed: {} URL: {}", self.speed, command);
        dispatch(&self.link, command);
    }

    /// Programmatic setter. Returns false (and does nothing) outside 0..=100.
    pub fn set_speed(&mut self, value: i32) -> bool {
        match Speed::new(value) {
            Some(speed) => {
                self.slider = speed.percent();
                self.update_speed(speed);
                true
            }
            None => false,
        }
    }

    pub fn press_preset(&mut self, preset: u8) -> bool {
        if !self.settings.presets.contains(&preset) {
            warn!("No preset button for {}%", preset);
            return false;
        }
        self.set_speed(i32::from(preset))
    }

    pub fn emergency_stop(&mut self, now: Instant) {
        self.handle_movement(Direction::Stop, now);
        warn!("Emergency stop activated!");
    }

    /// Store one sensor value and re-check the auto-stop condition.
    pub fn update_sensor(&mut self, sensor: Sensor, distance_cm: u8, now: Instant) {
        self.readings.set(sensor, distance_cm);
        debug!(
            "{} sensor {}cm ({:?})",
            sensor,
            distance_cm,
            SensorLevel::from_distance(distance_cm)
        );
        self.check_auto_stop(now);
    }

    /// One simulation tick: every sensor advances and is applied in turn.
    pub fn sensor_tick(&mut self, now: Instant) {
        let next = self.simulator.step_from(&self.readings);
        for (sensor, distance) in next.iter() {
            self.update_sensor(sensor, distance, now);
        }
    }

    fn check_auto_stop(&mut self, now: Instant) {
        if self
            .settings
            .gate
            .requires_auto_stop(self.direction, &self.readings)
        {
            self.direction = Direction::Stop;
            self.notices.raise(NoticeKind::AutoStop, now);
        }
    }

    pub fn apply_status(&mut self, report: &StatusReport) {
        self.status.apply(report);
        debug!("Status strip: {:?}", self.status);
    }

    pub fn toggle_camera(&mut self) -> PreviewState {
        self.camera.toggle()
    }

    /// Earliest instant something is due: the speed slider or a notice.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.speed_debounce.deadline(), self.notices.next_expiry()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn on_deadline(&mut self, now: Instant) {
        if let Some(speed) = self.speed_debounce.take_due(now) {
            self.update_speed(speed);
        }
        self.notices.expire(now);
    }

    fn log_sensors(&self) {
        for (sensor, distance) in self.readings.iter() {
            info!(
                "{:>5}: {:>2}cm {:?}",
                sensor,
                distance,
                SensorLevel::from_distance(distance)
            );
        }
    }

    fn query_status(&self) {
        let link = self.link.clone();
        tokio::spawn(async move {
            if let Some(report) = system_status(&link).await {
                info!("System status: {:?}", report);
            }
        });
    }

    fn poll_status(&self, results: &mpsc::Sender<StatusReport>) {
        let link = self.link.clone();
        let results = results.clone();
        tokio::spawn(async move {
            match fetch_status(&link).await {
                Ok(report) => {
                    let _ = results.send(report).await;
                }
                Err(e) => error!("Failed to update system stats: {}", e),
            }
        });
    }

    /// Drive the dashboard until the input channel closes.
    ///
    /// Returns the controller so its final state can be inspected.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<InputEvent>) -> Self {
        let (status_tx, mut status_rx) = mpsc::channel::<StatusReport>(4);
        let start = Instant::now();
        let mut sensor_tick =
            time::interval_at(start + self.settings.sensor_interval, self.settings.sensor_interval);
        let mut status_poll =
            time::interval_at(start + self.settings.status_interval, self.settings.status_interval);

        info!("Dashboard ready: {}, speed {}", self.direction_label(), self.speed_text());
        loop {
            let deadline = self.next_deadline();
            tokio::select! {
                event = inputs.recv() => match event {
                    Some(event) => self.handle_input(event, Instant::now()),
                    None => break,
                },
                _ = sensor_tick.tick() => self.sensor_tick(Instant::now()),
                _ = status_poll.tick() => self.poll_status(&status_tx),
                Some(report) = status_rx.recv() => self.apply_status(&report),
                _ = sleep_until_deadline(deadline) => self.on_deadline(Instant::now()),
            }
        }
        info!("Dashboard input closed");
        self
    }
}

impl<L, R, C> ControlSurface for Dashboard<L, R, C>
where
    L: VehicleLink,
    R: Rng,
    C: CameraSource,
{
    fn on_direction_press(&mut self, direction: Direction, now: Instant) {
        self.handle_movement(direction, now);
    }

    fn on_slider_change(&mut self, field: SliderField, value: i32, now: Instant) {
        match field {
            SliderField::Speed => self.slide_speed(value, now),
            SliderField::Motor(side) => debug!("Dashboard has no {:?} motor slider", side),
        }
    }

    fn on_stop(&mut self, now: Instant) {
        self.handle_movement(Direction::Stop, now);
    }

    fn on_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Preset(preset) => {
                self.press_preset(preset);
            }
            Action::SetSpeed(value) => {
                if !self.set_speed(value) {
                    warn!("Speed {} rejected, expected 0..=100", value);
                }
            }
            Action::EmergencyStop => self.emergency_stop(now),
            Action::ToggleCamera => {
                self.toggle_camera();
            }
            Action::QueryStatus => self.query_status(),
            Action::ShowSensors => self.log_sensors(),
        }
    }
}
