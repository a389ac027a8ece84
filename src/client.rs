//! HTTP client for the remote calculation service.
//!
//! Exactly one POST per submission. No retry and no timeout are configured;
//! the service's own behavior governs both (an explicit non-goal here).

use crate::errors::ClientError;
use crate::types::{ApiEnvelope, BirthInput, CalculationResult};

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001/api/calculate";

/// Issues the calculation request and unwraps the response envelope.
#[derive(Debug, Clone)]
pub struct CalculationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for CalculationClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl CalculationClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the six input fields as JSON and return the parsed payload.
    ///
    /// Non-2xx statuses, connection failures, and undecodable bodies all map
    /// to errors whose display text is the generic service-unavailable
    /// message; a `success:false` envelope surfaces the service's error
    /// string verbatim.
    pub async fn submit(&self, input: &BirthInput) -> Result<CalculationResult, ClientError> {
        crate::log::debug!(endpoint = %self.endpoint, "submitting calculation request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&input.to_request())
            .send()
            .await
            .map_err(|source| ClientError::Transport { source })?;

        let status = response.status();
        if !status.is_success() {
            crate::log::warn!(status = %status, "calculation service returned error status");
            return Err(ClientError::Status { status });
        }

        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|source| ClientError::MalformedResponse { source })?;

        unwrap_envelope(envelope)
    }
}

/// Resolve the success/error branches of the response envelope.
fn unwrap_envelope(envelope: ApiEnvelope) -> Result<CalculationResult, ClientError> {
    if !envelope.success {
        return Err(ClientError::Service {
            message: envelope
                .error
                .unwrap_or_else(|| "Calculation failed".to_string()),
        });
    }
    envelope.data.ok_or(ClientError::EmptyPayload)
}
