//! Operator input, independent of whatever draws the controls.

use rover_protocol::{Direction, Side};
use tokio::time::Instant;
use tracing::debug;

/// Which slider moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderField {
    /// Dashboard speed slider, 0..=100
    Speed,
    /// Dual-slider motor power, -100..=100
    Motor(Side),
}

/// Controls that only some surfaces have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Preset speed button
    Preset(u8),
    /// Programmatic speed setter; out-of-range values are ignored
    SetSpeed(i32),
    EmergencyStop,
    ToggleCamera,
    QueryStatus,
    ShowSensors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Direction),
    Slide(SliderField, i32),
    Stop,
    Action(Action),
}

/// What a controller exposes to the input layer.
pub trait ControlSurface {
    fn on_direction_press(&mut self, direction: Direction, now: Instant);
    fn on_slider_change(&mut self, field: SliderField, value: i32, now: Instant);
    fn on_stop(&mut self, now: Instant);

    fn on_action(&mut self, action: Action, _now: Instant) {
        debug!(target: "rover_host::input", "{:?} not supported by this surface", action);
    }

    fn handle_input(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Press(direction) => self.on_direction_press(direction, now),
            InputEvent::Slide(field, value) => self.on_slider_change(field, value, now),
            InputEvent::Stop => self.on_stop(now),
            InputEvent::Action(action) => self.on_action(action, now),
        }
    }
}

/// Keyboard code (`KeyboardEvent.code` naming) to movement.
pub fn direction_for_key(code: &str) -> Option<Direction> {
    match code {
        "ArrowUp" | "KeyW" => Some(Direction::Up),
        "ArrowDown" | "KeyS" => Some(Direction::Down),
        "ArrowLeft" | "KeyA" => Some(Direction::Left),
        "ArrowRight" | "KeyD" => Some(Direction::Right),
        "Space" | "KeyX" => Some(Direction::Stop),
        _ => None,
    }
}

/// Parse one terminal line into an input event.
///
/// Accepts WASD/X, direction words, key codes, and `<name> <value>` for
/// sliders (`speed`, `left`, `right`), `set` and `preset`.
pub fn parse_line(line: &str) -> Option<InputEvent> {
    let mut words = line.split_whitespace();
    let head = words.next()?;
    let arg = words.next().map(str::parse::<i32>);

    let event = match (head.to_ascii_lowercase().as_str(), arg) {
        ("w" | "up", None) => InputEvent::Press(Direction::Up),
        ("s" | "down", None) => InputEvent::Press(Direction::Down),
        ("a" | "left", None) => InputEvent::Press(Direction::Left),
        ("d" | "right", None) => InputEvent::Press(Direction::Right),
        ("x" | "stop", None) => InputEvent::Stop,
        ("speed", Some(Ok(v))) => InputEvent::Slide(SliderField::Speed, v),
        ("left", Some(Ok(v))) => InputEvent::Slide(SliderField::Motor(Side::Left), v),
        ("right", Some(Ok(v))) => InputEvent::Slide(SliderField::Motor(Side::Right), v),
        ("set", Some(Ok(v))) => InputEvent::Action(Action::SetSpeed(v)),
        ("preset", Some(Ok(v))) => InputEvent::Action(Action::Preset(u8::try_from(v).ok()?)),
        ("estop", None) => InputEvent::Action(Action::EmergencyStop),
        ("camera", None) => InputEvent::Action(Action::ToggleCamera),
        ("status", None) => InputEvent::Action(Action::QueryStatus),
        ("sensors", None) => InputEvent::Action(Action::ShowSensors),
        (_, None) => match direction_for_key(head)? {
            Direction::Stop => InputEvent::Stop,
            direction => InputEvent::Press(direction),
        },
        _ => return None,
    };
    Some(event)
}
