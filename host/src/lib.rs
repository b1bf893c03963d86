//! Host-side teleoperation for the rover's HTTP vehicle controller.
//!
//! Two front ends share the plumbing in this crate:
//! - [`dashboard::Dashboard`]: direction buttons, debounced speed slider,
//!   simulated proximity sensors with obstacle gating and auto-stop, status strip
//! - [`dual_slider::DualSlider`]: per-motor power sliders debounced into one
//!   `/motors` request
//!
//! Both are driven through [`input::ControlSurface`] and talk to the vehicle
//! through a [`link::VehicleLink`].

pub mod camera;
pub mod config;
pub mod dashboard;
pub mod debounce;
pub mod dual_slider;
pub mod error;
pub mod gate;
pub mod input;
pub mod link;
pub mod notice;
pub mod sensors;
pub mod status;

pub use rover_protocol as protocol;
