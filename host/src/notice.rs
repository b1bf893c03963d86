//! Transient operator notices (obstacle warning, auto-stop).

use rover_protocol::Direction;
use tokio::time::{Duration, Instant};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// A move was refused by the obstacle gate.
    Obstacle(Direction),
    /// The controller forced a stop.
    AutoStop,
}

impl NoticeKind {
    pub fn lifetime(self) -> Duration {
        match self {
            NoticeKind::Obstacle(_) => Duration::from_secs(3),
            NoticeKind::AutoStop => Duration::from_secs(4),
        }
    }

    pub fn message(self) -> String {
        match self {
            NoticeKind::Obstacle(direction) => {
                format!("⚠️ Cannot move {direction}: Obstacle detected!")
            }
            NoticeKind::AutoStop => "🛑 Auto-stop activated: Obstacle too close!".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Visible notices, each dismissed on its own timer.
#[derive(Debug, Default, Clone)]
pub struct Notices {
    active: Vec<Notice>,
}

impl Notices {
    pub fn raise(&mut self, kind: NoticeKind, now: Instant) {
        let message = kind.message();
        warn!(target: "rover_host::notice", "{}", message);
        self.active.push(Notice {
            kind,
            message,
            expires_at: now + kind.lifetime(),
        });
    }

    /// Drop every notice whose lifetime has ended.
    pub fn expire(&mut self, now: Instant) {
        self.active.retain(|n| n.expires_at > now);
    }

    pub fn next_expiry(&self) -> Option<Instant> {
        self.active.iter().map(|n| n.expires_at).min()
    }

    pub fn active(&self) -> &[Notice] {
        &self.active
    }

    pub fn contains(&self, kind: NoticeKind) -> bool {
        self.active.iter().any(|n| n.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_expire_independently() {
        let t0 = Instant::now();
        let mut notices = Notices::default();
        notices.raise(NoticeKind::Obstacle(Direction::Up), t0);
        notices.raise(NoticeKind::AutoStop, t0);
        assert_eq!(notices.next_expiry(), Some(t0 + Duration::from_secs(3)));

        notices.expire(t0 + Duration::from_secs(3));
        assert!(!notices.contains(NoticeKind::Obstacle(Direction::Up)));
        assert!(notices.contains(NoticeKind::AutoStop));

        notices.expire(t0 + Duration::from_secs(4));
        assert!(notices.active().is_empty());
        assert_eq!(notices.next_expiry(), None);
    }

    #[test]
    fn obstacle_message_names_direction() {
        assert_eq!(
            NoticeKind::Obstacle(Direction::Left).message(),
            "⚠️ Cannot move left: Obstacle detected!"
        );
    }
}
