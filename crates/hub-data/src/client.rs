//! HTTP client for the Policy Hub REST API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use hub_catalog::docs::{DocPage, DocsPage};
use hub_catalog::policy::{validate_policy_name, validate_version};
use hub_catalog::search::{query::keys, ApiResponse, FilterState, Pagination};
use hub_catalog::Policy;

use crate::api::{PolicyApi, PolicyPage};
use crate::error::FetchError;
use crate::timeout::TimeoutConfig;

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Policy Hub API client over reqwest.
#[derive(Debug, Clone)]
pub struct HttpPolicyClient {
    client: Client,
    base_url: Url,
    timeout: TimeoutConfig,
}

impl HttpPolicyClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, timeout: TimeoutConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .connect_timeout(timeout.connect)
            .timeout(timeout.total)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from path segments and query parameters.
    pub fn endpoint(&self, segments: &[&str], params: &[(String, String)]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<ApiResponse<T>, FetchError> {
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        decode_envelope(status, &url, &body)
    }

    async fn get_optional<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, FetchError> {
        match self.get::<T>(url).await {
            Ok(envelope) => Ok(envelope.into_data()),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_page(&self, url: Url, page_size: u32) -> Result<PolicyPage, FetchError> {
        let envelope = self.get::<Vec<Policy>>(url).await?;
        let pagination = envelope.pagination().copied();
        let items = envelope.into_data().unwrap_or_default();
        let pagination = pagination
            .unwrap_or_else(|| Pagination::new(1, page_size, items.len() as u32));
        Ok(PolicyPage { items, pagination })
    }

    async fn get_list(&self, segments: &[&str]) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint(segments, &[])?;
        Ok(self.get::<Vec<String>>(url).await?.into_data().unwrap_or_default())
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout.total)
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// Turn a raw response into an envelope or the error it reports.
fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    url: &Url,
    body: &[u8],
) -> Result<ApiResponse<T>, FetchError> {
    let http_error = || FetchError::Http {
        status: status.as_u16(),
        url: url.to_string(),
    };

    let envelope = match serde_json::from_slice::<ApiResponse<T>>(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => return Err(http_error()),
        Err(e) => return Err(e.into()),
    };

    if !envelope.success || !status.is_success() {
        return Err(match envelope.error {
            Some(error) => FetchError::Api {
                code: error.code,
                message: error.message,
            },
            None => http_error(),
        });
    }

    Ok(envelope)
}

#[async_trait]
impl PolicyApi for HttpPolicyClient {
    async fn list_policies(&self, filters: &FilterState) -> Result<PolicyPage, FetchError> {
        let url = self.endpoint(&["policies"], &filters.to_request_params())?;
        self.get_page(url, filters.page_size).await
    }

    async fn get_latest_version(&self, name: &str) -> Result<Option<Policy>, FetchError> {
        validate_policy_name(name)?;
        let url = self.endpoint(&["policies", name, "versions", "latest"], &[])?;
        self.get_optional(url).await
    }

    async fn get_policy_version(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<Policy>, FetchError> {
        validate_policy_name(name)?;
        validate_version(version)?;
        let url = self.endpoint(&["policies", name, "versions", version], &[])?;
        self.get_optional(url).await
    }

    async fn list_policy_versions(
        &self,
        name: &str,
        page_size: u32,
    ) -> Result<PolicyPage, FetchError> {
        validate_policy_name(name)?;
        let params = vec![
            (keys::PAGE.to_string(), "1".to_string()),
            (keys::PAGE_SIZE.to_string(), page_size.to_string()),
        ];
        let url = self.endpoint(&["policies", name, "versions"], &params)?;
        match self.get_page(url, page_size).await {
            Err(e) if e.is_not_found() => Ok(PolicyPage::empty(page_size)),
            other => other,
        }
    }

    async fn get_all_docs(&self, name: &str, version: &str) -> Result<Vec<DocsPage>, FetchError> {
        validate_policy_name(name)?;
        validate_version(version)?;
        let url = self.endpoint(&["policies", name, "versions", version, "docs"], &[])?;
        Ok(self.get_optional(url).await?.unwrap_or_default())
    }

    async fn get_single_doc(
        &self,
        name: &str,
        version: &str,
        page: DocPage,
    ) -> Result<Option<DocsPage>, FetchError> {
        validate_policy_name(name)?;
        validate_version(version)?;
        let url = self.endpoint(
            &["policies", name, "versions", version, "docs", page.as_str()],
            &[],
        )?;
        self.get_optional(url).await
    }

    async fn list_categories(&self) -> Result<Vec<String>, FetchError> {
        self.get_list(&["policies", "categories"]).await
    }

    async fn list_providers(&self) -> Result<Vec<String>, FetchError> {
        self.get_list(&["policies", "providers"]).await
    }

    async fn list_platforms(&self) -> Result<Vec<String>, FetchError> {
        self.get_list(&["policies", "platforms"]).await
    }
}
