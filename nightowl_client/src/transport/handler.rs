use async_trait::async_trait;
use nightowl_core::helpers::dto::{Endpoints, backend_url};
use nightowl_core::schedule::dto::{ErrorBody, ScheduleRequest, ScheduleResponse};
use nightowl_core::schedule::error::GenerationError;
use reqwest::Client;
use serde_json::Value;

/// Carries one schedule request to the generation endpoint.
#[async_trait]
pub trait ScheduleTransport: Send + Sync {
    async fn generate(
        &self,
        request: &ScheduleRequest,
    ) -> Result<ScheduleResponse, GenerationError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    backend_url: String,
}

impl HttpTransport {
    pub fn new(backend_url: &str) -> Self {
        let client = Client::builder()
            .user_agent(concat!("nightowl/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            backend_url: backend_url.to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(&backend_url())
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }
}

fn transport_failure(status: Option<u16>, message: impl Into<String>) -> GenerationError {
    GenerationError::TransportFailure {
        status,
        message: message.into(),
    }
}

#[async_trait]
impl ScheduleTransport for HttpTransport {
    async fn generate(
        &self,
        request: &ScheduleRequest,
    ) -> Result<ScheduleResponse, GenerationError> {
        let response = self
            .client
            .post(Endpoints::GenerateSchedule.url(&self.backend_url))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| transport_failure(None, e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());

            log::warn!("Schedule request failed with {}: {}", status, message);

            return Err(transport_failure(Some(status.as_u16()), message));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| transport_failure(Some(status.as_u16()), e.to_string()))?;

        Ok(ScheduleResponse::from_value(&value))
    }
}
