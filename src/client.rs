use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ClientConfig, DEFAULT_API_VERSION, DEFAULT_DATASET};
use crate::errors::{Result, SanityError};
use crate::models::{query_payload, query_result_from_value, QueryResult};

const PROJECT_ID_ENV: &str = "SANITY_PROJECT_ID";

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use sanity_query::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> sanity_query::Result<()> {
/// let client = ClientBuilder::new()
///     .project_id("abc123")
///     .dataset("staging")
///     .api_version("v2023-05-03")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    project_id: Option<String>,
    api_version: String,
    api_key: Option<String>,
    dataset: String,
    timeout: Option<Duration>,
    query_url: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            project_id: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: None,
            dataset: DEFAULT_DATASET.to_string(),
            timeout: None,
            query_url: None,
        }
    }

    /// Set the project id. Falls back to `SANITY_PROJECT_ID` at build time if unset.
    pub fn project_id(mut self, id: impl Into<String>) -> Self {
        self.project_id = Some(id.into());
        self
    }

    /// Set the dated API version (defaults to `v2021-10-21`).
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Store an API key on the config. Queries are sent without it.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the dataset to query (defaults to `production`).
    pub fn dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    /// Set the HTTP request timeout. Unset means reqwest's default.
    pub fn timeout(mut self, d: Duration) -> Self {
        self.timeout = Some(d);
        self
    }

    /// Post queries to `url` instead of the CDN endpoint.
    ///
    /// [`Client::cdn_base_url`] keeps reporting the derived URL.
    pub fn query_url(mut self, url: impl Into<String>) -> Self {
        self.query_url = Some(url.into());
        self
    }

    /// Build the [`Client`].
    ///
    /// If no project id was set via [`project_id`](Self::project_id), the
    /// builder reads the `SANITY_PROJECT_ID` environment variable.
    ///
    /// Returns [`SanityError::InvalidArgument`] if no project id is available.
    pub fn build(self) -> Result<Client> {
        let project_id = self
            .project_id
            .or_else(|| std::env::var(PROJECT_ID_ENV).ok())
            .ok_or_else(|| SanityError::InvalidArgument {
                message: "project id is required. Pass it to ClientBuilder::project_id() \
                          or set the SANITY_PROJECT_ID environment variable."
                    .into(),
            })?;

        let mut http = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http.build()?;

        Ok(Client {
            config: ClientConfig::with_parts(
                project_id,
                self.api_version,
                self.api_key,
                self.dataset,
            ),
            http,
            query_url: self.query_url,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Sanity query API.
///
/// Holds only immutable configuration, so a `&Client` can be shared freely
/// between tasks.
///
/// # Example
///
/// ```no_run
/// use sanity_query::Client;
/// use serde_json::json;
///
/// # async fn example() -> sanity_query::Result<()> {
/// let client = Client::new("abc123")?;
///
/// let params = json!({ "type": "post" });
/// let result = client.execute_query("*[_type == $type]", Some(&params)).await?;
/// println!("{:?}", result.result);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    http: reqwest::Client,
    query_url: Option<String>,
}

impl Client {
    /// Create a client for `project_id` with the default API version and dataset.
    ///
    /// For customization, use [`ClientBuilder`] instead.
    pub fn new(project_id: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().project_id(project_id).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// See [`ClientConfig::base_url`].
    pub fn base_url(&self) -> String {
        self.config.base_url()
    }

    /// See [`ClientConfig::cdn_base_url`].
    pub fn cdn_base_url(&self) -> String {
        self.config.cdn_base_url()
    }

    /// Run a query against the CDN endpoint.
    ///
    /// `params`, when given, must be a JSON object; it is sent as the query's
    /// parameters unless empty.
    ///
    /// # Errors
    ///
    /// - [`SanityError::InvalidArgument`] if `params` is not an object or null.
    ///   Nothing is sent in that case.
    /// - [`SanityError::QueryFailed`] if the API answers with status 400 or above.
    /// - [`SanityError::RemoteQuery`] if the body carries an `error` value.
    /// - [`SanityError::Http`] / [`SanityError::Decode`] on transport or JSON failures.
    pub async fn execute_query(&self, query: &str, params: Option<&Value>) -> Result<QueryResult> {
        let payload = query_payload(query, params)?;
        let url = self.query_url.clone().unwrap_or_else(|| self.cdn_base_url());

        debug!("Sanity query to {}", url);

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status >= 400 {
            warn!(status, "Sanity query failed");
            return Err(SanityError::QueryFailed {
                status_code: status,
            });
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        debug!(status, "Sanity query answered");

        query_result_from_value(body).inspect_err(|err| {
            if let SanityError::RemoteQuery { error } = err {
                warn!(%error, "Sanity reported a query error");
            }
        })
    }

    /// Like [`execute_query`](Self::execute_query) with typed parameters.
    ///
    /// `params` must serialize to a JSON object.
    pub async fn query_with<P: Serialize + ?Sized>(
        &self,
        query: &str,
        params: &P,
    ) -> Result<QueryResult> {
        let params = serde_json::to_value(params)?;
        self.execute_query(query, Some(&params)).await
    }

    /// Run a query and decode its `result` into `T`.
    ///
    /// A missing result decodes from `null`, so `Option<T>` targets yield `None`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        query: &str,
        params: Option<&Value>,
    ) -> Result<T> {
        let result = self.execute_query(query, params).await?;
        Ok(serde_json::from_value(result.result.unwrap_or(Value::Null))?)
    }
}
