use crate::credentials::Credential;
use crate::error::Result;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde_json::Value;
use std::future::Future;

/// Raw outcome of one GET: the status code and the JSON body, if it parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Authenticated read-only access to the host API.
///
/// `Err` is reserved for transport problems (DNS, TLS, connection reset);
/// any HTTP status, success or not, comes back as an [`ApiResponse`].
pub trait HostApi: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = Result<ApiResponse>> + Send;
}

#[derive(Clone)]
pub struct GitHubClient {
    octo: Octocrab,
}

impl GitHubClient {
    pub fn new(credential: &Credential, base_url: &str) -> Result<Self> {
        let octo = Octocrab::builder()
            .personal_token(credential.expose().to_string())
            .base_uri(base_url)?
            .add_retry_config(RetryConfig::None)
            .build()?;

        Ok(Self { octo })
    }
}

impl HostApi for GitHubClient {
    async fn get(&self, path: &str) -> Result<ApiResponse> {
        let response = self.octo._get(path).await?;
        let status = response.status().as_u16();
        let text = self.octo.body_to_string(response).await?;
        let body = serde_json::from_str(&text).ok();
        tracing::debug!(path, status, "github request");
        Ok(ApiResponse { status, body })
    }
}
