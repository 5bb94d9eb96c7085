pub(crate) const API_HOST: &str = "sanity.io";
pub(crate) const DEFAULT_API_VERSION: &str = "v2021-10-21";
pub(crate) const DEFAULT_DATASET: &str = "production";

/// Subdomain segment of the uncached API.
const DIRECT_SEGMENT: &str = "api";
/// Subdomain segment of the CDN-fronted API.
const CDN_SEGMENT: &str = "apicdn";

/// Project coordinates a [`Client`](crate::Client) queries against.
///
/// Built once by [`ClientBuilder`](crate::ClientBuilder) and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    project_id: String,
    api_version: String,
    api_key: Option<String>,
    dataset: String,
}

impl ClientConfig {
    /// Config for `project_id` with the default API version and dataset.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: None,
            dataset: DEFAULT_DATASET.to_string(),
        }
    }

    pub(crate) fn with_parts(
        project_id: String,
        api_version: String,
        api_key: Option<String>,
        dataset: String,
    ) -> Self {
        Self {
            project_id,
            api_version,
            api_key,
            dataset,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// e.g. "v2021-10-21".
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Stored for callers; never sent with queries.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Query endpoint on the uncached API.
    pub fn base_url(&self) -> String {
        self.build_url(DIRECT_SEGMENT)
    }

    /// Query endpoint on the CDN. All queries are sent here.
    pub fn cdn_base_url(&self) -> String {
        self.build_url(CDN_SEGMENT)
    }

    fn build_url(&self, segment: &str) -> String {
        format!(
            "https://{}.{}.{}/{}/data/query/{}",
            self.project_id, segment, API_HOST, self.api_version, self.dataset
        )
    }
}
