//! Transport client for the job-board REST API.
//!
//! [`JobBoardApi`] is the seam between the stores and the network: one
//! method per collaborator endpoint, implemented over HTTP by [`HttpApi`]
//! and by in-memory doubles in tests. Stores never build requests
//! themselves.

use async_trait::async_trait;

use crate::error::ApiError;

mod http;
pub mod types;

pub use http::HttpApi;
pub use types::{AuthCheck, CreatedBy, Identity, Job, JobDraft, Profile, SearchQuery};

/// The job-board collaborator contract: REST over HTTP with a credentialed
/// cookie session, JSON bodies, base path `/api/v1`.
#[async_trait]
pub trait JobBoardApi: Send + Sync {
    /// GET `/api/v1/check-auth`
    async fn check_auth(&self) -> Result<AuthCheck, ApiError>;

    /// GET `/api/v1/user/{sub}`
    async fn get_profile(&self, sub: &str) -> Result<Profile, ApiError>;

    /// GET `/api/v1/jobs`
    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError>;

    /// POST `/api/v1/jobs`
    async fn create_job(&self, draft: &JobDraft) -> Result<Job, ApiError>;

    /// GET `/api/v1/jobs/user/{user_id}`
    async fn list_user_jobs(&self, user_id: &str) -> Result<Vec<Job>, ApiError>;

    /// GET `/api/v1/jobs/search` with the query's non-empty criteria.
    async fn search_jobs(&self, query: &SearchQuery) -> Result<Vec<Job>, ApiError>;

    /// GET `/api/v1/jobs/{id}`
    async fn get_job(&self, id: &str) -> Result<Job, ApiError>;

    /// PUT `/api/v1/jobs/like/{id}`
    async fn like_job(&self, id: &str) -> Result<(), ApiError>;

    /// PUT `/api/v1/jobs/apply/{id}`
    async fn apply_to_job(&self, id: &str) -> Result<(), ApiError>;

    /// DELETE `/api/v1/jobs/{id}`
    async fn delete_job(&self, id: &str) -> Result<(), ApiError>;
}
