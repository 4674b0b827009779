// Gateway module for the remote service - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod admin;
mod auth;
mod categories;
mod client;
mod comments;
mod error;
mod result;
mod warnings;

// Public re-exports - the ONLY way to access the service
pub use admin::AdminApi;
pub use auth::AuthApi;
pub use categories::CategoriesApi;
pub use client::ApiClient;
pub use comments::CommentsApi;
pub use error::{ApiError, ErrorBody, ErrorKind};
pub use result::ApiResult;
pub use warnings::WarningsApi;

use anyhow::Result;

use crate::app::ApiConfig;

/// Client-side entry point to the scam-warning service, grouped by resource
///
/// Every operation returns an [`ApiResult`]; none of them fails past its own
/// boundary.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: ApiClient,
}

impl Gateway {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self::from_client(ApiClient::new(
            &config.base_url,
            config.timeout(),
        )?))
    }

    pub fn from_client(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi {
            client: &self.client,
        }
    }

    pub fn warnings(&self) -> WarningsApi<'_> {
        WarningsApi {
            client: &self.client,
        }
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi {
            client: &self.client,
        }
    }

    pub fn comments(&self) -> CommentsApi<'_> {
        CommentsApi {
            client: &self.client,
        }
    }

    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi {
            client: &self.client,
        }
    }
}
