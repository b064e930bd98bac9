//! Remote chat-completion client for the analysis service

use crate::config::ServiceConfig;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication rejected (status {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Rate limited by completion service: {message}")]
    RateLimit { message: String },

    #[error("Completion service error (status {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Unexpected completion service response (status {status}): {message}")]
    Unknown { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    Network,
    Auth,
    RateLimit,
    ServerError,
    Unknown,
}

impl ServiceError {
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            ServiceError::Network(_) => ServiceErrorKind::Network,
            ServiceError::Auth { .. } => ServiceErrorKind::Auth,
            ServiceError::RateLimit { .. } => ServiceErrorKind::RateLimit,
            ServiceError::ServerError { .. } => ServiceErrorKind::ServerError,
            ServiceError::Unknown { .. } => ServiceErrorKind::Unknown,
        }
    }

    fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ServiceError::Auth { status, message },
            429 => ServiceError::RateLimit { message },
            s if s >= 500 => ServiceError::ServerError { status, message },
            _ => ServiceError::Unknown { status, message },
        }
    }
}

/// Seam for the completion call so the pipeline can run against a test double.
pub trait CompletionBackend {
    fn complete(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = std::result::Result<String, ServiceError>> + Send;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// HTTP client for the chat-completion endpoint.
///
/// Issues exactly one request per `complete` call and never retries; retry
/// policy belongs to whoever drives the pipeline. The request asks the service
/// for a single JSON object (`response_format: json_object`) and hands the raw
/// body text back uninterpreted.
pub struct AnalysisClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnalysisClient {
    pub fn new(service: &ServiceConfig, api_key: String) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(service.timeout_secs))
            .build()
            .map_err(|e| {
                crate::error::ResumeLensError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: service.endpoint.clone(),
            api_key,
            model: service.model.clone(),
            max_tokens: service.max_tokens,
            temperature: service.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionBackend for AnalysisClient {
    async fn complete(&self, prompt: &str) -> std::result::Result<String, ServiceError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        debug!("Requesting analysis completion from {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Completion service returned {}: {}", status, message);
            return Err(ServiceError::from_status(status.as_u16(), message));
        }

        let body: CompletionResponse = response.json().await.map_err(|e| ServiceError::Unknown {
            status: status.as_u16(),
            message: format!("Failed to decode completion envelope: {}", e),
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ServiceError::Unknown {
                status: status.as_u16(),
                message: "Completion contained no choices".to_string(),
            })?;

        debug!("Completion received ({} chars)", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServiceError::from_status(401, String::new()).kind(),
            ServiceErrorKind::Auth
        );
        assert_eq!(
            ServiceError::from_status(403, String::new()).kind(),
            ServiceErrorKind::Auth
        );
        assert_eq!(
            ServiceError::from_status(429, String::new()).kind(),
            ServiceErrorKind::RateLimit
        );
        assert_eq!(
            ServiceError::from_status(500, String::new()).kind(),
            ServiceErrorKind::ServerError
        );
        assert_eq!(
            ServiceError::from_status(503, String::new()).kind(),
            ServiceErrorKind::ServerError
        );
        assert_eq!(
            ServiceError::from_status(404, String::new()).kind(),
            ServiceErrorKind::Unknown
        );
    }

    #[test]
    fn test_request_wire_shape() {
        let request = CompletionRequest {
            model: "test-model",
            messages: vec![ChatMessage {
                role: "user",
                content: "analyze this",
            }],
            max_tokens: 256,
            temperature: 0.2,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(encoded["model"], "test-model");
        assert_eq!(encoded["messages"][0]["role"], "user");
        assert_eq!(encoded["response_format"]["type"], "json_object");
    }
}
