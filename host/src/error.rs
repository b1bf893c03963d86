//! Error types for the rover host

/// Failure of a single request to the vehicle controller.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Connection refused, DNS failure, reset, ...
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The controller answered with a non-2xx status
    #[error("{url} answered {status} {status_text}")]
    Status {
        url: String,
        status: u16,
        status_text: String,
    },

    /// `/status` body was not the expected JSON
    #[error("malformed status payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Camera capture could not be started.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("no capture device available")]
    Unavailable,

    #[error("camera permission denied")]
    PermissionDenied,

    #[error("camera error: {0}")]
    Other(String),
}
