//! Tank-style front end: one power slider per motor plus a hard stop.

use rover_protocol::{Command, Direction, MotorPair, Side, clamp_power};
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tracing::{debug, info};

use crate::debounce::{Debouncer, sleep_until_deadline};
use crate::input::{Action, ControlSurface, InputEvent, SliderField};
use crate::link::{VehicleLink, dispatch};

/// Slider detents, in percent.
pub const SLIDER_STEP: i32 = 25;

/// Map a vertical touch inside a slider track to a stepped power value.
///
/// The top of the track is +100, the bottom -100.
pub fn touch_to_power(touch_y: f32, track_top: f32, track_bottom: f32) -> i8 {
    let height = track_bottom - track_top;
    if height <= 0.0 {
        return 0;
    }
    let y = touch_y.clamp(track_top, track_bottom);
    let fraction = (y - track_top) / height;
    let value = ((1.0 - fraction) * 200.0 - 100.0).round() as i32;
    let stepped = (value as f32 / SLIDER_STEP as f32).round() as i32 * SLIDER_STEP;
    clamp_power(stepped)
}

pub struct DualSlider<L> {
    link: L,
    /// Slider positions; the next `/motors` request carries both.
    shown: MotorPair,
    debounce: Debouncer<MotorPair>,
}

impl<L: VehicleLink> DualSlider<L> {
    pub fn new(link: L, settle: Duration) -> Self {
        Self {
            link,
            shown: MotorPair::default(),
            debounce: Debouncer::new(settle),
        }
    }

    pub fn shown(&self) -> MotorPair {
        self.shown
    }

    /// Pair waiting for the settle window to close.
    pub fn pending(&self) -> Option<MotorPair> {
        self.debounce.pending().copied()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Record a new slider value and restart the settle timer.
    pub fn update_motor(&mut self, side: Side, value: i32, now: Instant) {
        self.shown = self.shown.with(side, value);
        self.debounce.schedule(self.shown, now);
    }

    /// Touch drag on one slider's track.
    pub fn touch(
        &mut self,
        side: Side,
        touch_y: f32,
        track_top: f32,
        track_bottom: f32,
        now: Instant,
    ) {
        let power = touch_to_power(touch_y, track_top, track_bottom);
        self.update_motor(side, i32::from(power), now);
    }

    /// Send the settled pair, if its deadline has passed.
    pub fn on_deadline(&mut self, now: Instant) {
        if let Some(pair) = self.debounce.take_due(now) {
            dispatch(&self.link, Command::Motors(pair));
            info!("Motors: L{}% R{}%", pair.left, pair.right);
        }
    }

    /// Zero both sliders and send `/stop`.
    ///
    /// A pair still settling is left alone and fires on its own deadline.
    pub fn stop(&mut self) {
        self.shown = MotorPair::default();
        dispatch(&self.link, Command::STOP);
        info!("Motors stopped");
    }

    /// Drive the sliders until the input channel closes.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<InputEvent>) -> Self {
        info!("Dual-slider ready");
        loop {
            let deadline = self.next_deadline();
            tokio::select! {
                event = inputs.recv() => match event {
                    Some(event) => self.handle_input(event, Instant::now()),
                    None => break,
                },
                _ = sleep_until_deadline(deadline) => self.on_deadline(Instant::now()),
            }
        }
        info!("Dual-slider input closed");
        self
    }
}

impl<L: VehicleLink> ControlSurface for DualSlider<L> {
    fn on_direction_press(&mut self, direction: Direction, _now: Instant) {
        if direction.is_stop() {
            self.stop();
        } else {
            debug!("No direction buttons on the dual-slider; {} ignored", direction);
        }
    }

    fn on_slider_change(&mut self, field: SliderField, value: i32, now: Instant) {
        match field {
            SliderField::Motor(side) => self.update_motor(side, value, now),
            SliderField::Speed => debug!("No speed slider on the dual-slider"),
        }
    }

    fn on_stop(&mut self, _now: Instant) {
        self.stop();
    }

    fn on_action(&mut self, action: Action, _now: Instant) {
        match action {
            Action::EmergencyStop => self.stop(),
            other => debug!("{:?} not available on the dual-slider", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::DryRunLink;

    #[test]
    fn touch_snaps_to_steps() {
        // Track from y=100 (top) to y=300 (bottom)
        assert_eq!(touch_to_power(100.0, 100.0, 300.0), 100);
        assert_eq!(touch_to_power(300.0, 100.0, 300.0), -100);
        assert_eq!(touch_to_power(200.0, 100.0, 300.0), 0);
        assert_eq!(touch_to_power(160.0, 100.0, 300.0), 50); // raw 40
        assert_eq!(touch_to_power(230.0, 100.0, 300.0), -25); // raw -30
        // Outside the track clamps to the ends
        assert_eq!(touch_to_power(0.0, 100.0, 300.0), 100);
        assert_eq!(touch_to_power(900.0, 100.0, 300.0), -100);
        assert_eq!(touch_to_power(150.0, 100.0, 100.0), 0);
    }

    #[tokio::test]
    async fn both_sides_sent_together_after_settling() {
        let link = DryRunLink::new();
        let mut sliders = DualSlider::new(link.clone(), Duration::from_millis(50));
        let t0 = Instant::now();
        sliders.update_motor(Side::Left, 30, t0);
        sliders.update_motor(Side::Right, -40, t0 + Duration::from_millis(20));
        sliders.update_motor(Side::Left, 75, t0 + Duration::from_millis(40));

        sliders.on_deadline(t0 + Duration::from_millis(60));
        assert!(link.sent().is_empty());

        sliders.on_deadline(t0 + Duration::from_millis(90));
        assert_eq!(
            link.sent(),
            vec![Command::Motors(MotorPair { left: 75, right: -40 })]
        );
    }

    #[tokio::test]
    async fn touch_updates_only_that_side() {
        let link = DryRunLink::new();
        let mut sliders = DualSlider::new(link.clone(), Duration::from_millis(50));
        let t0 = Instant::now();
        sliders.touch(Side::Right, 110.0, 100.0, 300.0, t0);
        assert_eq!(sliders.shown(), MotorPair { left: 0, right: 100 });
        assert_eq!(sliders.next_deadline(), Some(t0 + Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn values_are_clamped() {
        let link = DryRunLink::new();
        let mut sliders = DualSlider::new(link.clone(), Duration::from_millis(50));
        let t0 = Instant::now();
        sliders.update_motor(Side::Right, 400, t0);
        assert_eq!(sliders.shown().right, 100);
        sliders.on_deadline(t0 + Duration::from_millis(50));
        assert_eq!(
            link.sent(),
            vec![Command::Motors(MotorPair { left: 0, right: 100 })]
        );
    }

    #[tokio::test]
    async fn stop_zeroes_display_and_leaves_pending_pair() {
        let link = DryRunLink::new();
        let mut sliders = DualSlider::new(link.clone(), Duration::from_millis(50));
        let t0 = Instant::now();
        sliders.update_motor(Side::Left, 80, t0);
        sliders.update_motor(Side::Right, 80, t0 + Duration::from_millis(10));
        sliders.stop();
        assert_eq!(sliders.shown(), MotorPair::default());
        assert_eq!(sliders.pending(), Some(MotorPair { left: 80, right: 80 }));
        assert_eq!(sliders.next_deadline(), Some(t0 + Duration::from_millis(60)));
        assert_eq!(link.sent(), vec![Command::STOP]);

        sliders.on_deadline(t0 + Duration::from_millis(200));
        assert_eq!(
            link.sent(),
            vec![
                Command::STOP,
                Command::Motors(MotorPair { left: 80, right: 80 }),
            ]
        );
        sliders.on_deadline(t0 + Duration::from_secs(1));
        assert_eq!(link.sent().len(), 2);
    }
}
