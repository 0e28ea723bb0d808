//! Generated-avatar client
//!
//! Renders initials through a ui-avatars compatible service. Used only when
//! the media server cannot supply a profile picture.

use reqwest::{Client, StatusCode};
use tracing::debug;

use jellyinvite_core::config::DEFAULT_AVATAR_BASE_URL;
use jellyinvite_core::domain::{AvatarRequest, ServiceError};
use jellyinvite_core::ports::IAvatarService;

use crate::client::{transport_error, REQUEST_TIMEOUT, SUCCESS_STATUS};

/// HTTP client for the avatar service
#[derive(Debug, Clone)]
pub struct UiAvatarsClient {
    client: Client,
    base_url: String,
    success_status: StatusCode,
}

impl UiAvatarsClient {
    /// Creates a client for the avatar service at `base_url`
    ///
    /// # Errors
    /// Returns `Transport` if the HTTP client cannot be built
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(transport_error)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            success_status: SUCCESS_STATUS,
        })
    }

    /// Creates a client for the public ui-avatars.com service
    pub fn public() -> Result<Self, ServiceError> {
        Self::new(DEFAULT_AVATAR_BASE_URL)
    }

    /// Overrides the status code accepted as success
    pub fn with_success_status(mut self, status: StatusCode) -> Self {
        self.success_status = status;
        self
    }

    /// Returns the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the avatar described by `request`
    pub async fn fetch(&self, request: &AvatarRequest) -> Result<Vec<u8>, ServiceError> {
        let mut query = vec![
            ("uppercase", "true".to_string()),
            ("name", request.name.clone()),
            ("length", request.length.to_string()),
        ];
        if let Some(font_size) = request.font_size {
            query.push(("font-size", font_size.to_string()));
        }

        debug!(name = %request.name, "Fetching generated avatar");
        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status != self.success_status {
            return Err(ServiceError::RemoteApi {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl IAvatarService for UiAvatarsClient {
    async fn generate(&self, request: &AvatarRequest) -> anyhow::Result<Vec<u8>> {
        Ok(self.fetch(request).await?)
    }
}
