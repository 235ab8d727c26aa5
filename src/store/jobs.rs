//! Job collection store: CRUD and search over job postings, kept
//! consistent with the session store's current profile.
//!
//! Two cached views share the store: `jobs` (the general listing, which a
//! search replaces rather than merges) and `user_jobs` (postings owned by
//! the current profile). Each view carries a request generation counter so
//! a superseded in-flight fetch cannot overwrite a later result; in-flight
//! HTTP is not cancelled, stale responses are discarded on arrival.
//!
//! Error policy: user-initiated mutations (create/like/apply/delete)
//! surface a transient notification on the event bus; background reads
//! (list/search) fail silently aside from a log line, leaving previous
//! valid or empty state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{RwLock, watch};

use crate::api::types::{Job, JobDraft, SearchQuery};
use crate::api::JobBoardApi;
use crate::store::events::{EventBus, NotifyLevel};

/// Snapshot of the job collection.
#[derive(Debug, Clone, Default)]
pub struct JobsState {
    /// General listing, newest first. A search replaces this sequence.
    pub jobs: Vec<Job>,
    /// Jobs owned by the current profile.
    pub user_jobs: Vec<Job>,
    /// The search currently shaping `jobs`, if any.
    pub last_search: Option<SearchQuery>,
    /// True strictly while a fetch for this store is in flight. One flag is
    /// shared by all operations of the store.
    pub loading: bool,
}

/// Monotonic request generation for one cache slot.
struct Generation(AtomicU64);

impl Generation {
    fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Claim a token for a fetch that is about to suspend.
    fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True while no later fetch or local write has claimed the slot.
    fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }

    /// Invalidate any fetch still in flight (after a local write).
    fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Owns the set of visible jobs and the current user's subset.
pub struct JobStore {
    api: Arc<dyn JobBoardApi>,
    events: EventBus,
    state: RwLock<JobsState>,
    profile_ids: watch::Receiver<Option<String>>,
    jobs_gen: Generation,
    user_jobs_gen: Generation,
}

impl JobStore {
    /// Create the store. `profile_ids` is the session store's watch channel;
    /// the current value is read at operation time and the composition layer
    /// drives [`Self::list_user_jobs`] from its changes.
    pub fn new(
        api: Arc<dyn JobBoardApi>,
        profile_ids: watch::Receiver<Option<String>>,
        events: EventBus,
    ) -> Arc<Self> {
        Arc::new(Self {
            api,
            events,
            state: RwLock::new(JobsState::default()),
            profile_ids,
            jobs_gen: Generation::new(),
            user_jobs_gen: Generation::new(),
        })
    }

    fn profile_id(&self) -> Option<String> {
        self.profile_ids.borrow().clone()
    }

    async fn set_loading(&self, loading: bool) {
        self.state.write().await.loading = loading;
    }

    /// Fetch the full collection, replacing `jobs` and clearing any active
    /// search. Background read: failures are logged, never surfaced.
    pub async fn list_jobs(&self) {
        self.load_jobs(None).await;
    }

    /// Search the collection with the non-empty criteria of `query`,
    /// replacing `jobs`. An all-empty query requests the unfiltered
    /// collection and is observably identical to [`Self::list_jobs`].
    pub async fn search_jobs(&self, query: SearchQuery) {
        if query.is_empty() {
            self.load_jobs(None).await;
        } else {
            self.load_jobs(Some(query)).await;
        }
    }

    /// Shared fetch path for the `jobs` slot. `query: None` is the full
    /// listing; `Some` is a search. Records `last_search` accordingly.
    async fn load_jobs(&self, query: Option<SearchQuery>) {
        let token = self.jobs_gen.begin();
        self.set_loading(true).await;

        let result = match &query {
            Some(q) => self.api.search_jobs(q).await,
            None => self.api.list_jobs().await,
        };

        match result {
            Ok(jobs) => {
                if self.jobs_gen.is_current(token) {
                    let mut state = self.state.write().await;
                    state.jobs = jobs;
                    state.last_search = query;
                } else {
                    tracing::debug!(operation = "list_jobs", "discarding superseded response");
                }
            }
            Err(e) => {
                tracing::warn!(operation = "list_jobs", error = %e, "job listing failed");
            }
        }

        self.set_loading(false).await;
    }

    /// Fetch the jobs owned by `user_id`, replacing `user_jobs`. Driven by
    /// the composition layer whenever the profile id changes.
    pub async fn list_user_jobs(&self, user_id: &str) {
        let token = self.user_jobs_gen.begin();
        self.set_loading(true).await;

        match self.api.list_user_jobs(user_id).await {
            Ok(jobs) => {
                if self.user_jobs_gen.is_current(token) {
                    self.state.write().await.user_jobs = jobs;
                } else {
                    tracing::debug!(
                        operation = "list_user_jobs",
                        "discarding superseded response"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(operation = "list_user_jobs", user_id, error = %e, "user job listing failed");
            }
        }

        self.set_loading(false).await;
    }

    /// Submit a new job posting.
    ///
    /// On success the created job is prepended to both views, the personal
    /// view is re-fetched to reconcile server-derived fields, the full
    /// listing is refreshed, and a navigation event for the new job's
    /// detail route is emitted. On failure state is unchanged and a failure
    /// notification is published.
    pub async fn create_job(&self, draft: &JobDraft) -> Option<Job> {
        self.set_loading(true).await;
        let result = self.api.create_job(draft).await;
        self.set_loading(false).await;

        match result {
            Ok(job) => {
                let profile_id = self.profile_id();
                {
                    let mut state = self.state.write().await;
                    state.jobs.insert(0, job.clone());
                    self.jobs_gen.invalidate();
                    if profile_id.is_some() {
                        state.user_jobs.insert(0, job.clone());
                        self.user_jobs_gen.invalidate();
                    }
                }

                if let Some(profile_id) = &profile_id {
                    self.list_user_jobs(profile_id).await;
                }
                self.list_jobs().await;

                self.events.notify(NotifyLevel::Success, "Job posted");
                self.events.navigate_to_job(&job.id);
                Some(job)
            }
            Err(e) => {
                tracing::warn!(operation = "create_job", error = %e, "job creation failed");
                self.events
                    .notify(NotifyLevel::Error, "Failed to post job");
                None
            }
        }
    }

    /// Fetch a single job for a detail view. Does not touch the cached
    /// views.
    pub async fn get_job(&self, id: &str) -> Option<Job> {
        self.set_loading(true).await;
        let result = self.api.get_job(id).await;
        self.set_loading(false).await;

        match result {
            Ok(job) => Some(job),
            Err(e) => {
                tracing::warn!(operation = "get_job", id, error = %e, "job fetch failed");
                None
            }
        }
    }

    /// Toggle the current user's like on a job. On success the current view
    /// is re-fetched so like counts in lists stay current.
    pub async fn like_job(&self, id: &str) {
        self.set_loading(true).await;
        let result = self.api.like_job(id).await;
        self.set_loading(false).await;

        match result {
            Ok(()) => {
                self.refresh_current_view().await;
            }
            Err(e) => {
                tracing::warn!(operation = "like_job", id, error = %e, "like failed");
                self.events
                    .notify(NotifyLevel::Error, "Failed to like job");
            }
        }
    }

    /// Apply the current user to a job. On success the current view is
    /// re-fetched so application state in lists stays current.
    pub async fn apply_to_job(&self, id: &str) {
        self.set_loading(true).await;
        let result = self.api.apply_to_job(id).await;
        self.set_loading(false).await;

        match result {
            Ok(()) => {
                self.refresh_current_view().await;
            }
            Err(e) => {
                tracing::warn!(operation = "apply_to_job", id, error = %e, "application failed");
                self.events
                    .notify(NotifyLevel::Error, "Failed to apply to job");
            }
        }
    }

    /// Delete a job by id.
    ///
    /// On success the id is dropped from both cached views without a round
    /// trip, and an active search is explicitly re-run so the id cannot
    /// reappear from a cached result. On failure state is unchanged.
    pub async fn delete_job(&self, id: &str) {
        self.set_loading(true).await;
        let result = self.api.delete_job(id).await;
        self.set_loading(false).await;

        match result {
            Ok(()) => {
                let search_active = {
                    let mut state = self.state.write().await;
                    state.jobs.retain(|job| job.id != id);
                    state.user_jobs.retain(|job| job.id != id);
                    self.jobs_gen.invalidate();
                    self.user_jobs_gen.invalidate();
                    state.last_search.is_some()
                };
                if search_active {
                    self.refresh_current_view().await;
                }
                self.events.notify(NotifyLevel::Success, "Job deleted");
            }
            Err(e) => {
                tracing::warn!(operation = "delete_job", id, error = %e, "deletion failed");
                self.events
                    .notify(NotifyLevel::Error, "Failed to delete job");
            }
        }
    }

    /// Re-fetch whatever currently shapes `jobs`: the active search if one
    /// is recorded, else the full listing.
    async fn refresh_current_view(&self) {
        let query = self.state.read().await.last_search.clone();
        self.load_jobs(query).await;
    }

    pub async fn snapshot(&self) -> JobsState {
        self.state.read().await.clone()
    }

    pub async fn jobs(&self) -> Vec<Job> {
        self.state.read().await.jobs.clone()
    }

    pub async fn user_jobs(&self) -> Vec<Job> {
        self.state.read().await.user_jobs.clone()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }
}
