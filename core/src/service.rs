//! Challenge fetch service.
//!
//! Adapts the generic endpoint machinery to the one thing the app needs:
//! the list of available challenge filters.

use tracing::{info, warn};

use crate::api::SurvivalChallengeApi;
use crate::client::execute;
use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{ApiResponse, ChallengeEntity};

/// Fetches challenge filters through a `Transport`.
///
/// Holds no state between calls; each `fetch_challenges` builds a fresh
/// descriptor and performs one independent request.
#[derive(Debug, Clone)]
pub struct ApiService<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl ApiService<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> ApiService<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Fetch every challenge filter, in server order.
    ///
    /// # Errors
    ///
    /// Propagates any `execute` failure unchanged, and returns
    /// `ApiError::NoData` when the envelope decodes without `data`.
    pub fn fetch_challenges(&self) -> Result<Vec<ChallengeEntity>> {
        let endpoint = SurvivalChallengeApi::new(&self.config);
        let response = execute(&endpoint, &self.transport).inspect_err(|e| {
            warn!(code = e.code(), error = %e, "fetching challenges failed");
        })?;
        unwrap_data(response)
    }
}

impl<T> ApiService<T> {
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The request `fetch_challenges` would send, for hosts doing their own I/O.
    pub fn build_fetch_challenges(&self) -> Result<HttpRequest> {
        SurvivalChallengeApi::new(&self.config).build_request()
    }

    /// Interpret a response to [`build_fetch_challenges`](Self::build_fetch_challenges)
    /// exactly as `fetch_challenges` would.
    pub fn parse_fetch_challenges(&self, response: HttpResponse) -> Result<Vec<ChallengeEntity>> {
        let envelope = SurvivalChallengeApi::new(&self.config).parse_response(response)?;
        unwrap_data(envelope)
    }
}

fn unwrap_data(response: ApiResponse<Vec<ChallengeEntity>>) -> Result<Vec<ChallengeEntity>> {
    let Some(challenges) = response.data else {
        warn!(status = ?response.status, message = ?response.message, "challenge response carried no data");
        return Err(ApiError::NoData);
    };
    info!(count = challenges.len(), "fetched challenges");
    Ok(challenges)
}
