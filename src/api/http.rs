//! HTTP implementation of the job-board API contract.
//!
//! A single `reqwest::Client` with a cookie store carries the session: the
//! server authenticates by cookie, so no per-call auth header is attached.
//! The base URL and timeout come from [`ApiConfig`] once at startup.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::api::types::{AuthCheck, Job, JobDraft, Profile, SearchQuery};
use crate::api::JobBoardApi;
use crate::config::ApiConfig;
use crate::error::ApiError;

/// HTTP client for the job-board API.
#[derive(Debug)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Build the client from transport configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        url::Url::parse(&config.base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ApiError::ClientBuild {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    fn connection_error(&self, err: reqwest::Error) -> ApiError {
        ApiError::Connection {
            url: self.base_url.clone(),
            reason: err.to_string(),
        }
    }

    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        resp.json().await.map_err(|e| ApiError::Decode {
            reason: e.to_string(),
        })
    }

    /// For endpoints that return only an acknowledgement; the body is
    /// discarded either way.
    async fn read_ack(resp: reqwest::Response) -> Result<(), ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl JobBoardApi for HttpApi {
    async fn check_auth(&self) -> Result<AuthCheck, ApiError> {
        let resp = self
            .client
            .get(self.url("check-auth"))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::read_json(resp).await
    }

    async fn get_profile(&self, sub: &str) -> Result<Profile, ApiError> {
        let resp = self
            .client
            .get(self.url(&format!("user/{sub}")))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::read_json(resp).await
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let resp = self
            .client
            .get(self.url("jobs"))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::read_json(resp).await
    }

    async fn create_job(&self, draft: &JobDraft) -> Result<Job, ApiError> {
        let resp = self
            .client
            .post(self.url("jobs"))
            .json(draft)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::read_json(resp).await
    }

    async fn list_user_jobs(&self, user_id: &str) -> Result<Vec<Job>, ApiError> {
        let resp = self
            .client
            .get(self.url(&format!("jobs/user/{user_id}")))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::read_json(resp).await
    }

    async fn search_jobs(&self, query: &SearchQuery) -> Result<Vec<Job>, ApiError> {
        let resp = self
            .client
            .get(self.url("jobs/search"))
            .query(&query.params())
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::read_json(resp).await
    }

    async fn get_job(&self, id: &str) -> Result<Job, ApiError> {
        let resp = self
            .client
            .get(self.url(&format!("jobs/{id}")))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::read_json(resp).await
    }

    async fn like_job(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .put(self.url(&format!("jobs/like/{id}")))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::read_ack(resp).await
    }

    async fn apply_to_job(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .put(self.url(&format!("jobs/apply/{id}")))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::read_ack(resp).await
    }

    async fn delete_job(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(self.url(&format!("jobs/{id}")))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        Self::read_ack(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpApi {
        HttpApi::new(&ApiConfig {
            base_url: base.to_string(),
            timeout: None,
        })
        .unwrap()
    }

    #[test]
    fn url_construction_trims_trailing_slash() {
        let api = api("http://localhost:8000/");
        assert_eq!(api.url("jobs"), "http://localhost:8000/api/v1/jobs");
        assert_eq!(
            api.url("jobs/like/j1"),
            "http://localhost:8000/api/v1/jobs/like/j1"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = HttpApi::new(&ApiConfig {
            base_url: "not a url".to_string(),
            timeout: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }
}
