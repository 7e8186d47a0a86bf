//! Weir management client
//!
//! A small, type-safe HTTP client for the cloud resource-management plane.
//!
//! Two clients share one authenticated transport:
//! - [`ResourceManagementClient`] for resource groups
//! - [`DataFactoryClient`] for factories, linked services, datasets, pipelines and runs
//!
//! Both are bundled in [`ManagementClients`], which implements the
//! [`ManagementApi`] trait the orchestrator is written against.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use weir_client::{ManagementClients, ServicePrincipalCredential};
//! use weir_core::domain::secret::SecureString;
//! use weir_core::dto::resource::CreateResourceGroup;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let credential = Arc::new(ServicePrincipalCredential::new(
//!         "client-id",
//!         SecureString::new("client-secret"),
//!         "tenant-id",
//!     ));
//!     let clients = ManagementClients::new("subscription-id", credential);
//!
//!     let group = clients
//!         .resources
//!         .create_or_update_resource_group("my-group", &CreateResourceGroup::new("eastus"))
//!         .await?;
//!
//!     println!("Resource group: {:?}", group.id);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
mod datasets;
pub mod error;
mod factories;
mod linked_services;
mod pipelines;
mod resource_groups;
mod runs;

// Re-export commonly used types
pub use api::ManagementApi;
pub use auth::{AccessToken, ServicePrincipalCredential};
pub use error::{ClientError, Result};

use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Public-cloud management endpoint
pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

/// API version for resource groups
pub const RESOURCES_API_VERSION: &str = "2021-04-01";

/// API version for the data factory provider
pub const DATA_FACTORY_API_VERSION: &str = "2018-06-01";

/// Authenticated transport scoped to one subscription
#[derive(Debug, Clone)]
pub struct ManagementClient {
    /// Base URL of the management plane (e.g., "https://management.azure.com")
    base_url: String,
    /// Subscription every request is scoped to
    subscription_id: String,
    /// Token source shared by all clients
    credential: Arc<ServicePrincipalCredential>,
    /// HTTP client instance
    client: Client,
}

impl ManagementClient {
    /// Create a client for the public cloud
    pub fn new(
        subscription_id: impl Into<String>,
        credential: Arc<ServicePrincipalCredential>,
    ) -> Self {
        Self::with_client(
            DEFAULT_MANAGEMENT_ENDPOINT,
            subscription_id,
            credential,
            Client::new(),
        )
    }

    /// Create a client with a custom endpoint and HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        subscription_id: impl Into<String>,
        credential: Arc<ServicePrincipalCredential>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            subscription_id: subscription_id.into(),
            credential,
            client,
        }
    }

    /// Get the base URL of the management plane
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the subscription this client is scoped to
    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// Acquire a token now, so a rejected principal fails before any resource call
    pub async fn authenticate(&self) -> Result<()> {
        self.credential.token().await.map(|_| ())
    }

    /// Absolute URL for a path below the subscription
    fn url(&self, path: &str) -> String {
        format!(
            "{}/subscriptions/{}{}",
            self.base_url, self.subscription_id, path
        )
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, api_version: &str) -> Result<T> {
        self.send::<(), T>(Method::GET, path, api_version, None).await
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        api_version: &str,
        body: &B,
    ) -> Result<T> {
        self.send(Method::PUT, path, api_version, Some(body)).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        api_version: &str,
        body: &B,
    ) -> Result<T> {
        self.send(Method::POST, path, api_version, Some(body)).await
    }

    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        api_version: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let token = self.credential.token().await?;
        let request_id = Uuid::new_v4();

        debug!(%method, path, %request_id, "Sending management request");

        let mut request = self
            .client
            .request(method, self.url(path))
            .query(&[("api-version", api_version)])
            .bearer_auth(token.token.expose())
            .header("x-ms-client-request-id", request_id.to_string());

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::from_body(status.as_u16(), &error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Client for resource groups
#[derive(Debug, Clone)]
pub struct ResourceManagementClient {
    inner: ManagementClient,
}

impl ResourceManagementClient {
    pub fn new(inner: ManagementClient) -> Self {
        Self { inner }
    }
}

/// Client for the data factory provider
#[derive(Debug, Clone)]
pub struct DataFactoryClient {
    inner: ManagementClient,
}

impl DataFactoryClient {
    pub fn new(inner: ManagementClient) -> Self {
        Self { inner }
    }

    /// Path of a factory below the subscription
    fn factory_path(group: &str, factory: &str) -> String {
        format!(
            "/resourceGroups/{}/providers/Microsoft.DataFactory/factories/{}",
            group, factory
        )
    }
}

/// Resource and data factory clients sharing one credential
#[derive(Debug, Clone)]
pub struct ManagementClients {
    pub resources: ResourceManagementClient,
    pub data_factory: DataFactoryClient,
}

impl ManagementClients {
    /// Create both clients against the public cloud
    pub fn new(
        subscription_id: impl Into<String>,
        credential: Arc<ServicePrincipalCredential>,
    ) -> Self {
        Self::from_transport(ManagementClient::new(subscription_id, credential))
    }

    /// Create both clients from an already configured transport
    pub fn from_transport(transport: ManagementClient) -> Self {
        Self {
            resources: ResourceManagementClient::new(transport.clone()),
            data_factory: DataFactoryClient::new(transport),
        }
    }
}
