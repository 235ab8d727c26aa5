//! UI event bus.
//!
//! Stores publish transient notifications and navigation signals here;
//! presentation subscribes. Delivery is best-effort: events published
//! before any subscriber exists are dropped, and a slow subscriber may
//! observe `Lagged` on the broadcast receiver.

use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Error,
}

/// A transient, non-blocking notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
}

/// Events the stores emit toward presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Notify(Notification),
    /// Navigate to the detail view of the given job.
    NavigateToJob(String),
}

/// Broadcast fan-out of [`UiEvent`]s.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<UiEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }

    pub fn notify(&self, level: NotifyLevel, message: impl Into<String>) {
        self.publish(UiEvent::Notify(Notification {
            level,
            message: message.into(),
        }));
    }

    pub fn navigate_to_job(&self, job_id: impl Into<String>) {
        self.publish(UiEvent::NavigateToJob(job_id.into()));
    }

    fn publish(&self, event: UiEvent) {
        // No subscriber yet is fine; the event is simply dropped.
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
