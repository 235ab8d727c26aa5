//! Session store: single source of truth for who is using the app.
//!
//! One auth check runs at startup; once the check reports an authenticated
//! identity, the application profile is fetched exactly once per distinct
//! subject id. The resolved profile id is published on a watch channel that
//! the job store subscribes to.

use std::sync::{Arc, Mutex};

use tokio::sync::{RwLock, watch};

use crate::api::types::{Identity, Profile};
use crate::api::JobBoardApi;

/// Snapshot of session state.
///
/// Invariant: `profile` is only populated when `is_authenticated` is true
/// and `identity` is present.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub identity: Option<Identity>,
    pub profile: Option<Profile>,
    pub loading: bool,
}

/// Owns authentication status and the current user's profile.
pub struct SessionStore {
    api: Arc<dyn JobBoardApi>,
    state: RwLock<SessionState>,
    /// Subject id the profile was last fetched for. Guards the
    /// once-per-transition fetch rule; never held across an await.
    fetched_for: Mutex<Option<String>>,
    profile_id_tx: watch::Sender<Option<String>>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn JobBoardApi>) -> Arc<Self> {
        let (profile_id_tx, _) = watch::channel(None);
        Arc::new(Self {
            api,
            state: RwLock::new(SessionState::default()),
            fetched_for: Mutex::new(None),
            profile_id_tx,
        })
    }

    /// Run the startup auth check.
    ///
    /// Sets `is_authenticated` and `identity` from the response and, when
    /// the session is live, fetches the profile for the reported subject.
    /// On transport failure the session stays unauthenticated; the
    /// condition is logged and not retried.
    pub async fn initialize(&self) {
        self.state.write().await.loading = true;

        match self.api.check_auth().await {
            Ok(check) => {
                let identity = check.user.clone();
                {
                    let mut state = self.state.write().await;
                    state.is_authenticated = check.is_authenticated;
                    state.identity = check.user;
                    state.loading = false;
                }
                if check.is_authenticated {
                    if let Some(identity) = identity {
                        self.sync_profile(&identity.sub).await;
                    }
                }
            }
            Err(e) => {
                tracing::warn!(operation = "check_auth", error = %e, "auth check failed");
                self.state.write().await.loading = false;
            }
        }
    }

    /// Fetch the profile for `sub` unless it was already fetched for the
    /// same subject. A repeated auth check that reports the same identity
    /// triggers no additional fetch.
    async fn sync_profile(&self, sub: &str) {
        {
            let mut fetched = self.fetched_for.lock().unwrap_or_else(|e| e.into_inner());
            if fetched.as_deref() == Some(sub) {
                return;
            }
            *fetched = Some(sub.to_string());
        }
        self.fetch_profile(sub).await;
    }

    /// Fetch the application profile for an identity subject id.
    ///
    /// On success replaces `profile` and publishes its id to subscribers;
    /// on failure the previous profile is left untouched. Also exposed for
    /// manual refresh after profile edits.
    pub async fn fetch_profile(&self, sub: &str) {
        match self.api.get_profile(sub).await {
            Ok(profile) => {
                let profile_id = profile.id.clone();
                self.state.write().await.profile = Some(profile);
                {
                    let mut fetched = self.fetched_for.lock().unwrap_or_else(|e| e.into_inner());
                    *fetched = Some(sub.to_string());
                }
                self.profile_id_tx.send_if_modified(|current| {
                    if current.as_deref() == Some(profile_id.as_str()) {
                        false
                    } else {
                        *current = Some(profile_id.clone());
                        true
                    }
                });
            }
            Err(e) => {
                tracing::warn!(operation = "get_profile", sub, error = %e, "profile fetch failed");
            }
        }
    }

    /// Watch channel carrying the current profile id.
    ///
    /// This is the subscription seam the job store registers on instead of
    /// re-deriving per-user state on every read.
    pub fn profile_id_watch(&self) -> watch::Receiver<Option<String>> {
        self.profile_id_tx.subscribe()
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.state.read().await.identity.clone()
    }

    pub async fn profile(&self) -> Option<Profile> {
        self.state.read().await.profile.clone()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::api::types::{AuthCheck, Job, JobDraft, SearchQuery};
    use crate::error::ApiError;

    /// Auth-focused double: profile fetches are counted, job endpoints are
    /// never reached from this store.
    struct AuthApi {
        check: Result<AuthCheck, ()>,
        profile_calls: AtomicUsize,
    }

    impl AuthApi {
        fn new(check: Result<AuthCheck, ()>) -> Arc<Self> {
            Arc::new(Self {
                check,
                profile_calls: AtomicUsize::new(0),
            })
        }
    }

    fn connection_lost() -> ApiError {
        ApiError::Connection {
            url: "http://localhost:8000".to_string(),
            reason: "connection refused".to_string(),
        }
    }

    #[async_trait]
    impl JobBoardApi for AuthApi {
        async fn check_auth(&self) -> Result<AuthCheck, ApiError> {
            self.check.clone().map_err(|_| connection_lost())
        }

        async fn get_profile(&self, sub: &str) -> Result<Profile, ApiError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Profile {
                id: format!("profile-{sub}"),
                auth0_id: sub.to_string(),
                ..Default::default()
            })
        }

        async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
            unreachable!("session store never lists jobs")
        }

        async fn create_job(&self, _draft: &JobDraft) -> Result<Job, ApiError> {
            unreachable!()
        }

        async fn list_user_jobs(&self, _user_id: &str) -> Result<Vec<Job>, ApiError> {
            unreachable!()
        }

        async fn search_jobs(&self, _query: &SearchQuery) -> Result<Vec<Job>, ApiError> {
            unreachable!()
        }

        async fn get_job(&self, _id: &str) -> Result<Job, ApiError> {
            unreachable!()
        }

        async fn like_job(&self, _id: &str) -> Result<(), ApiError> {
            unreachable!()
        }

        async fn apply_to_job(&self, _id: &str) -> Result<(), ApiError> {
            unreachable!()
        }

        async fn delete_job(&self, _id: &str) -> Result<(), ApiError> {
            unreachable!()
        }
    }

    fn authed(sub: &str) -> AuthCheck {
        AuthCheck {
            is_authenticated: true,
            user: Some(Identity {
                sub: sub.to_string(),
                name: None,
                email: None,
                picture: None,
            }),
        }
    }

    #[tokio::test]
    async fn unauthenticated_check_never_fetches_profile() {
        let api = AuthApi::new(Ok(AuthCheck::default()));
        let store = SessionStore::new(api.clone());

        store.initialize().await;

        let state = store.snapshot().await;
        assert!(!state.is_authenticated);
        assert!(state.profile.is_none());
        assert_eq!(api.profile_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn authenticated_check_fetches_profile_once() {
        let api = AuthApi::new(Ok(authed("u1")));
        let store = SessionStore::new(api.clone());

        store.initialize().await;

        let state = store.snapshot().await;
        assert!(state.is_authenticated);
        assert_eq!(state.profile.as_ref().unwrap().id, "profile-u1");
        assert_eq!(api.profile_calls.load(Ordering::SeqCst), 1);

        // Same identity again: no additional fetch.
        store.initialize().await;
        assert_eq!(api.profile_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transport_failure_leaves_session_unauthenticated() {
        let api = AuthApi::new(Err(()));
        let store = SessionStore::new(api.clone());

        store.initialize().await;

        let state = store.snapshot().await;
        assert!(!state.is_authenticated);
        assert!(!state.loading);
        assert_eq!(api.profile_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn profile_id_is_published_to_watchers() {
        let api = AuthApi::new(Ok(authed("u1")));
        let store = SessionStore::new(api);
        let rx = store.profile_id_watch();

        store.initialize().await;
        assert_eq!(rx.borrow().as_deref(), Some("profile-u1"));
    }

    #[tokio::test]
    async fn manual_refresh_replaces_profile() {
        let api = AuthApi::new(Ok(authed("u1")));
        let store = SessionStore::new(api.clone());
        store.initialize().await;

        store.fetch_profile("u1").await;
        assert_eq!(api.profile_calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.profile().await.unwrap().id, "profile-u1");
    }
}
