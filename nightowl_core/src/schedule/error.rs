use thiserror::Error;

use crate::ai::handler::ModelError;

pub const INTERNAL_SERVER_ERROR: u16 = 500;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Please enter at least one task")]
    EmptyTaskList,
    #[error("Missing GOOGLE_API_KEY")]
    ServiceNotConfigured,
    #[error("No text returned from the model")]
    EmptyGeneration,
    #[error("Model returned malformed JSON: {source}")]
    MalformedGeneration {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to generate schedule: {message}")]
    TransportFailure {
        status: Option<u16>,
        message: String,
    },
}

impl GenerationError {
    /// Status the generation endpoint answers with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            GenerationError::EmptyTaskList => 400,
            GenerationError::TransportFailure {
                status: Some(status),
                ..
            } if (400..500).contains(status) => *status,
            _ => INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::EmptyTaskList => "EmptyTaskList",
            GenerationError::ServiceNotConfigured => "ServiceNotConfigured",
            GenerationError::EmptyGeneration => "EmptyGeneration",
            GenerationError::MalformedGeneration { .. } => "MalformedGeneration",
            GenerationError::TransportFailure { .. } => "TransportFailure",
        }
    }

    /// Text for the single transient notification a user sees.
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationError::EmptyTaskList => "Please enter at least one task",
            GenerationError::TransportFailure {
                status: Some(INTERNAL_SERVER_ERROR),
                ..
            } => "The night sky is cloudy. Please check your Gemini API Key.",
            _ => "Failed to generate schedule",
        }
    }

    /// Raw model output kept for diagnostics. Never part of a user-facing message.
    pub fn raw_generation(&self) -> Option<&str> {
        match self {
            GenerationError::MalformedGeneration { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl From<ModelError> for GenerationError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::MissingApiKey => GenerationError::ServiceNotConfigured,
            other => GenerationError::TransportFailure {
                status: None,
                message: other.to_string(),
            },
        }
    }
}
