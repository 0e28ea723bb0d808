//! Jellyfin API client
//!
//! Provides a typed HTTP client for the Jellyfin REST API. Handles the token
//! and content-negotiation headers, URL joining, status checking and JSON
//! decoding.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jellyinvite_core::domain::ServerConfig;
//! use jellyinvite_jellyfin::client::JellyfinClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::new("http://media.local:8096", "api-key")?;
//! let client = JellyfinClient::new(config)?;
//! for user in client.list_users().await? {
//!     println!("{} ({})", user.name, user.id);
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use jellyinvite_core::domain::{
    ImageRequest, RemoteLibrary, RemoteUser, ServerConfig, ServiceError, UserId, UserPolicy,
};

/// The only status code treated as success
pub const SUCCESS_STATUS: StatusCode = StatusCode::OK;

/// Fixed timeout applied to every request
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API key
const TOKEN_HEADER: &str = "X-Emby-Token";

/// Accept header asking Jellyfin for PascalCase JSON
const ACCEPT_JSON: &str = "application/json, profile=\"PascalCase\"";

// ============================================================================
// Jellyfin API request/response types
// ============================================================================

/// Response from `Library/MediaFolders`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MediaFoldersResponse {
    /// The folders, absent or null when the server has none to report
    #[serde(default)]
    items: Option<Vec<RemoteLibrary>>,
}

/// Body of `Users/New`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct NewUserRequest<'a> {
    name: &'a str,
    password: &'a str,
}

// ============================================================================
// JellyfinClient
// ============================================================================

/// HTTP client for Jellyfin API calls
///
/// Wraps `reqwest::Client` with the server's base URL and API key. Requests
/// are issued one at a time and never retried.
#[derive(Debug, Clone)]
pub struct JellyfinClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL and API key
    config: ServerConfig,
    /// Status code accepted as success
    success_status: StatusCode,
}

impl JellyfinClient {
    /// Creates a new client for the given server
    ///
    /// # Errors
    /// Returns `Transport` if the HTTP client cannot be built
    pub fn new(config: ServerConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(transport_error)?;
        Ok(Self {
            client,
            config,
            success_status: SUCCESS_STATUS,
        })
    }

    /// Overrides the status code accepted as success
    pub fn with_success_status(mut self, status: StatusCode) -> Self {
        self.success_status = status;
        self
    }

    /// Returns the server settings this client was built with
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path relative to the base URL (leading `/` optional)
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.config.endpoint(path))
            .header(TOKEN_HEADER, self.config.api_key())
            .header(reqwest::header::ACCEPT, ACCEPT_JSON)
    }

    /// Sends a request and rejects any status other than the success status
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ServiceError> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Jellyfin response");
        if status != self.success_status {
            return Err(ServiceError::RemoteApi {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    // ========================================================================
    // Transport helpers
    // ========================================================================

    /// `GET` returning parsed JSON
    pub async fn get(&self, path: &str) -> Result<Value, ServiceError> {
        debug!(path, "GET");
        let response = self.send(self.request(Method::GET, path)).await?;
        read_json(response).await
    }

    /// `GET` returning the raw response, for non-JSON content
    ///
    /// # Arguments
    /// * `query` - Query parameters appended to the URL
    pub async fn get_raw<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response, ServiceError> {
        debug!(path, "GET (raw)");
        self.send(self.request(Method::GET, path).query(query)).await
    }

    /// `POST` with a JSON body, returning parsed JSON
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ServiceError> {
        debug!(path, "POST");
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        read_json(response).await
    }

    /// `DELETE` returning parsed JSON
    pub async fn delete(&self, path: &str) -> Result<Value, ServiceError> {
        debug!(path, "DELETE");
        let response = self.send(self.request(Method::DELETE, path)).await?;
        read_json(response).await
    }

    // ========================================================================
    // Resource operations
    // ========================================================================

    /// Lists media folders from `Library/MediaFolders`
    ///
    /// # Errors
    /// `NotFound` if the response has no `Items`
    pub async fn list_libraries(&self) -> Result<Vec<RemoteLibrary>, ServiceError> {
        let body: MediaFoldersResponse = decode(self.get("Library/MediaFolders").await?)?;
        body.items
            .ok_or_else(|| ServiceError::NotFound("Libraries not found".to_string()))
    }

    /// Lists every user account
    pub async fn list_users(&self) -> Result<Vec<RemoteUser>, ServiceError> {
        decode(self.get("Users").await?)
    }

    /// Retrieves a single user account
    pub async fn get_user(&self, user_id: &UserId) -> Result<RemoteUser, ServiceError> {
        decode(self.get(&user_path(user_id, "")).await?)
    }

    /// Retrieves the policy attached to a user account
    ///
    /// # Errors
    /// `NotFound` if the user object has no `Policy`
    pub async fn get_user_policy(&self, user_id: &UserId) -> Result<UserPolicy, ServiceError> {
        let user = self.get_user(user_id).await?;
        user.policy
            .ok_or_else(|| ServiceError::NotFound("User policy not found".to_string()))
    }

    /// Deletes a user account
    pub async fn delete_user(&self, user_id: &UserId) -> Result<(), ServiceError> {
        self.delete(&user_path(user_id, "Delete")).await?;
        Ok(())
    }

    /// Creates an account from a name and password
    pub async fn create_user(&self, name: &str, password: &str) -> Result<RemoteUser, ServiceError> {
        let body = NewUserRequest { name, password };
        decode(self.post("Users/New", &body).await?)
    }

    /// Replaces a user's policy, returning the server's answer
    pub async fn update_user_policy(
        &self,
        user_id: &UserId,
        policy: &UserPolicy,
    ) -> Result<Value, ServiceError> {
        self.post(&user_path(user_id, "Policy"), policy).await
    }

    /// Downloads a user's primary image
    pub async fn get_profile_image(
        &self,
        user_id: &UserId,
        request: &ImageRequest,
    ) -> Result<Vec<u8>, ServiceError> {
        let query = [
            ("maxHeight", request.max_height.to_string()),
            ("maxWidth", request.max_width.to_string()),
            ("quality", request.quality.to_string()),
        ];
        let response = self
            .get_raw(&user_path(user_id, "Images/Primary"), &query)
            .await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
    }
}

/// `Users/{id}` followed by `rest`, with the id percent-encoded as a single
/// path segment
fn user_path(user_id: &UserId, rest: &str) -> String {
    let id = urlencoding::encode(user_id.as_str());
    if rest.is_empty() {
        format!("Users/{id}")
    } else {
        format!("Users/{id}/{rest}")
    }
}

// ============================================================================
// Decoding helpers
// ============================================================================

/// Reads a response body as JSON. An empty body is `null`.
async fn read_json(response: Response) -> Result<Value, ServiceError> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes)
        .map_err(|e| ServiceError::Transport(format!("Invalid JSON response: {e}")))
}

/// Converts a JSON value into a typed response
fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ServiceError> {
    serde_json::from_value(value)
        .map_err(|e| ServiceError::Transport(format!("Unexpected response shape: {e}")))
}

pub(crate) fn transport_error(err: reqwest::Error) -> ServiceError {
    ServiceError::Transport(err.to_string())
}
