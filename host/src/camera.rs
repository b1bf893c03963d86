//! Camera preview toggle.
//!
//! Capture itself lives behind [`CameraSource`]; the preview only tracks
//! whether a live feed or the placeholder image is showing.

use tracing::{error, info};

use crate::error::CameraError;

pub trait CameraSource {
    fn start(&mut self) -> Result<(), CameraError>;
    fn stop(&mut self);
}

/// Host without a capture device; every start fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCamera;

impl CameraSource for NoCamera {
    fn start(&mut self) -> Result<(), CameraError> {
        Err(CameraError::Unavailable)
    }

    fn stop(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    Live,
    Placeholder,
}

pub struct CameraPreview<C> {
    source: C,
    state: PreviewState,
}

impl<C: CameraSource> CameraPreview<C> {
    /// Starts with the camera off.
    pub fn new(source: C) -> Self {
        Self {
            source,
            state: PreviewState::Placeholder,
        }
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    pub fn toggle(&mut self) -> PreviewState {
        match self.state {
            PreviewState::Live => self.stop(),
            PreviewState::Placeholder => self.start(),
        }
        self.state
    }

    fn start(&mut self) {
        match self.source.start() {
            Ok(()) => {
                info!(target: "rover_host::camera", "Camera on");
                self.state = PreviewState::Live;
            }
            Err(e) => {
                error!(target: "rover_host::camera", "Camera error: {}", e);
                self.state = PreviewState::Placeholder;
            }
        }
    }

    fn stop(&mut self) {
        self.source.stop();
        info!(target: "rover_host::camera", "Camera off");
        self.state = PreviewState::Placeholder;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeCamera {
        deny: bool,
        running: bool,
    }

    impl CameraSource for FakeCamera {
        fn start(&mut self) -> Result<(), CameraError> {
            if self.deny {
                return Err(CameraError::PermissionDenied);
            }
            self.running = true;
            Ok(())
        }

        fn stop(&mut self) {
            self.running = false;
        }
    }

    #[test]
    fn toggles_between_live_and_placeholder() {
        let mut preview = CameraPreview::new(FakeCamera::default());
        assert_eq!(preview.state(), PreviewState::Placeholder);
        assert_eq!(preview.toggle(), PreviewState::Live);
        assert!(preview.source.running);
        assert_eq!(preview.toggle(), PreviewState::Placeholder);
        assert!(!preview.source.running);
    }

    #[test]
    fn failure_falls_back_to_placeholder() {
        let mut preview = CameraPreview::new(FakeCamera {
            deny: true,
            ..Default::default()
        });
        assert_eq!(preview.toggle(), PreviewState::Placeholder);
        let mut none = CameraPreview::new(NoCamera);
        assert_eq!(none.toggle(), PreviewState::Placeholder);
    }
}
