//! Wire types for the job-board REST API.
//!
//! The server is the source of truth for all of these; beyond `_id` and the
//! owner reference the client treats job records as opaque payload. Every
//! collection/optional field carries `#[serde(default)]` so empty or partial
//! responses decode to defaults instead of failing.

use serde::{Deserialize, Serialize};

/// Response of the session check endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCheck {
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<Identity>,
}

/// External auth-provider user record.
///
/// `sub` is the subject id; it keys the application [`Profile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Application user record, keyed by the identity subject id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub auth0_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Owner reference on a job: the server sends either the bare profile id or
/// an embedded (populated) profile record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatedBy {
    Id(String),
    Profile(Box<Profile>),
}

impl CreatedBy {
    /// Profile id of the owner, whichever form the server sent.
    pub fn id(&self) -> &str {
        match self {
            CreatedBy::Id(id) => id,
            CreatedBy::Profile(profile) => &profile.id,
        }
    }
}

impl Default for CreatedBy {
    fn default() -> Self {
        CreatedBy::Id(String::new())
    }
}

/// A job posting as stored on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: u64,
    #[serde(default)]
    pub salary_type: String,
    #[serde(default)]
    pub negotiable: bool,
    #[serde(default)]
    pub job_type: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Profile ids of users who liked this job.
    #[serde(default)]
    pub likes: Vec<String>,
    /// Profile ids of users who applied.
    #[serde(default)]
    pub applicants: Vec<String>,
    #[serde(default)]
    pub created_by: CreatedBy,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Job {
    /// Profile id of the job's owner.
    pub fn owner_id(&self) -> &str {
        self.created_by.id()
    }
}

/// Client-composed payload for creating a job.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: u64,
    pub salary_type: String,
    pub negotiable: bool,
    pub job_type: Vec<String>,
    pub tags: Vec<String>,
    pub skills: Vec<String>,
}

/// Search criteria for the job collection. All three are optional; blank
/// strings count as omitted and are never sent as empty-string filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub tags: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
}

impl SearchQuery {
    /// Build a query, normalizing blank criteria to omitted.
    pub fn new(
        tags: Option<impl Into<String>>,
        location: Option<impl Into<String>>,
        title: Option<impl Into<String>>,
    ) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.trim().is_empty())
        }
        Self {
            tags: clean(tags.map(Into::into)),
            location: clean(location.map(Into::into)),
            title: clean(title.map(Into::into)),
        }
    }

    /// True when no criterion is set; an empty search means the unfiltered
    /// collection.
    pub fn is_empty(&self) -> bool {
        self.tags.is_none() && self.location.is_none() && self.title.is_none()
    }

    /// The non-empty criteria as query parameters.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(tags) = &self.tags {
            params.push(("tags", tags.as_str()));
        }
        if let Some(location) = &self.location {
            params.push(("location", location.as_str()));
        }
        if let Some(title) = &self.title {
            params.push(("title", title.as_str()));
        }
        params
    }
}
