//! State containers and their composition.
//!
//! Two cooperating stores mediate between presentation and the REST API:
//! the session store owns identity, the job store owns the job collection
//! and consumes the session's profile id through an explicit watch
//! subscription. [`AppStores::start`] builds them once, in that order, and
//! hands back explicit handles; there is no ambient global state.

use std::sync::Arc;

use crate::api::JobBoardApi;

pub mod events;
pub mod jobs;
pub mod session;

pub use events::{EventBus, Notification, NotifyLevel, UiEvent};
pub use jobs::{JobStore, JobsState};
pub use session::{SessionState, SessionStore};

/// Handles to the started state containers.
pub struct AppStores {
    pub session: Arc<SessionStore>,
    pub jobs: Arc<JobStore>,
    pub events: EventBus,
}

impl AppStores {
    /// Construct and start the stores.
    ///
    /// Order is fixed: the session store is built first, the job store
    /// registers on its profile-id watch. Startup then runs the one
    /// unconditional auth check, the initial public job listing, and
    /// spawns the task that keeps `user_jobs` in sync with the profile id.
    pub async fn start(api: Arc<dyn JobBoardApi>) -> Self {
        let events = EventBus::new();
        let session = SessionStore::new(Arc::clone(&api));
        let jobs = JobStore::new(api, session.profile_id_watch(), events.clone());

        session.initialize().await;
        jobs.list_jobs().await;

        let sync_jobs = Arc::clone(&jobs);
        let mut profile_ids = session.profile_id_watch();
        tokio::spawn(async move {
            loop {
                // Handles the value already present after initialize() on
                // the first pass, then waits for changes.
                let current = profile_ids.borrow_and_update().clone();
                if let Some(profile_id) = current {
                    sync_jobs.list_user_jobs(&profile_id).await;
                }
                if profile_ids.changed().await.is_err() {
                    break;
                }
            }
        });

        Self {
            session,
            jobs,
            events,
        }
    }

    /// Subscribe to store-emitted UI events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<UiEvent> {
        self.events.subscribe()
    }
}
