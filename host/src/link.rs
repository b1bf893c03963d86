//! Transport to the vehicle controller.
//!
//! Requests are fire-and-forget: [`dispatch`] spawns the request and only logs
//! the outcome. Nothing is retried and there is no timeout.

use std::future::Future;
use std::sync::{Arc, Mutex};

use rover_protocol::Command;
use tracing::{debug, error, info};

use crate::error::LinkError;

/// Anything that can deliver a [`Command`] and hand back the response body.
///
/// `send` is called synchronously when a command is dispatched; the returned
/// future is what gets spawned.
pub trait VehicleLink: Clone + Send + Sync + 'static {
    fn send(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<String, LinkError>> + Send + 'static;
}

/// HTTP GET over `ehttp`.
#[derive(Clone, Debug)]
pub struct HttpLink {
    base_url: Arc<str>,
}

impl HttpLink {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    pub fn url_for(&self, command: &Command) -> String {
        format!("{}{}", self.base_url, command)
    }
}

impl VehicleLink for HttpLink {
    fn send(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<String, LinkError>> + Send + 'static {
        let url = self.url_for(&command);
        async move {
            let request = ehttp::Request::get(&url);
            let response = ehttp::fetch_async(request)
                .await
                .map_err(|reason| LinkError::Transport {
                    url: url.clone(),
                    reason,
                })?;
            if !response.ok {
                return Err(LinkError::Status {
                    url,
                    status: response.status,
                    status_text: response.status_text,
                });
            }
            Ok(response.text().unwrap_or_default().to_owned())
        }
    }
}

/// Records commands instead of sending them.
///
/// Answers every command with a fixed body; `/status` gets `status_body`.
#[derive(Clone, Debug, Default)]
pub struct DryRunLink {
    sent: Arc<Mutex<Vec<Command>>>,
    status_body: Arc<Mutex<String>>,
}

impl DryRunLink {
    pub fn new() -> Self {
        Self {
            sent: Arc::default(),
            status_body: Arc::new(Mutex::new(r#"{"uptime":0,"signal":-42}"#.to_owned())),
        }
    }

    /// Body returned for subsequent `/status` requests.
    pub fn set_status_body(&self, body: impl Into<String>) {
        if let Ok(mut slot) = self.status_body.lock() {
            *slot = body.into();
        }
    }

    /// Snapshot of everything sent so far, oldest first.
    pub fn sent(&self) -> Vec<Command> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Sent commands other than `/status` polls.
    pub fn sent_actions(&self) -> Vec<Command> {
        self.sent()
            .into_iter()
            .filter(|c| *c != Command::Status)
            .collect()
    }
}

impl VehicleLink for DryRunLink {
    fn send(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<String, LinkError>> + Send + 'static {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(command);
        }
        let body = match command {
            Command::Status => self
                .status_body
                .lock()
                .map(|b| b.clone())
                .unwrap_or_default(),
            other => format!("dry-run {other}"),
        };
        debug!(target: "rover_host::link", "dry run: {}", command);
        async move { Ok(body) }
    }
}

/// Send `command` without waiting for the answer; the outcome is only logged.
pub fn dispatch<L: VehicleLink>(link: &L, command: Command) {
    let request = link.send(command);
    tokio::spawn(async move {
        match request.await {
            Ok(body) => {
                info!(target: "rover_host::link", "Vehicle response to {}: {}", command, body)
            }
            Err(e) => error!(target: "rover_host::link", "Command {} failed: {}", command, e),
        }
    });
}
