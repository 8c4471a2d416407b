//! HTTP-backed directory provider.
//!
//! Talks to the workspace directory service over JSON: one endpoint for the
//! group listing, one for remote contact search. Transport and decode
//! failures surface as `HandoverError::Provider`; the layers above absorb
//! them into empty results.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use handover_core::directory::{ContactRecord, GroupDirectory, GroupRecord};
use handover_core::error::{HandoverError, Result};
use handover_core::item::{Item, normalize_contacts};
use handover_core::search::ContactSearch;

use crate::config::DirectoryConfig;

/// Client for the directory service.
pub struct HttpDirectoryClient {
    http: reqwest::Client,
    config: DirectoryConfig,
}

/// Response body of `GET /groups`.
#[derive(Debug, Deserialize)]
struct GroupsResponse {
    #[serde(default)]
    groups: Vec<GroupRecord>,
}

/// Response body of `GET /contacts/search`.
#[derive(Debug, Deserialize)]
struct ContactSearchResponse {
    #[serde(default)]
    contacts: Vec<ContactRecord>,
}

impl HttpDirectoryClient {
    /// Builds a client from the given configuration.
    pub fn new(config: DirectoryConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| HandoverError::provider(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl GroupDirectory for HttpDirectoryClient {
    async fn fetch_groups(&self) -> Result<Vec<GroupRecord>> {
        let response = self
            .authorize(self.http.get(self.endpoint("groups")))
            .send()
            .await
            .map_err(|e| HandoverError::provider(format!("group fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| HandoverError::provider(format!("group fetch failed: {e}")))?;

        let body: GroupsResponse = response
            .json()
            .await
            .map_err(|e| HandoverError::provider(format!("group listing decode failed: {e}")))?;

        tracing::debug!(groups = body.groups.len(), "fetched group listing");
        Ok(body.groups)
    }
}

#[async_trait]
impl ContactSearch for HttpDirectoryClient {
    async fn search(&self, keyword: &str) -> Result<Vec<Item>> {
        let response = self
            .authorize(
                self.http
                    .get(self.endpoint("contacts/search"))
                    .query(&[("q", keyword)]),
            )
            .send()
            .await
            .map_err(|e| HandoverError::provider(format!("contact search failed: {e}")))?
            .error_for_status()
            .map_err(|e| HandoverError::provider(format!("contact search failed: {e}")))?;

        let body: ContactSearchResponse = response
            .json()
            .await
            .map_err(|e| HandoverError::provider(format!("contact search decode failed: {e}")))?;

        tracing::debug!(
            keyword,
            contacts = body.contacts.len(),
            "remote contact search returned"
        );
        Ok(normalize_contacts(&body.contacts))
    }
}
