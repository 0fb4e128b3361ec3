use crate::types::ProviderId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Provider {id} not found")]
    ProviderNotFound { id: ProviderId },

    #[error("Provider {id} is locked; unlock it before editing")]
    ProviderLocked { id: ProviderId },

    #[error("Provider {id} cannot be locked: {reason}")]
    InvalidLock { id: ProviderId, reason: String },

    #[error("Invalid patients-per-hour rate {rate} for provider {id}")]
    InvalidRate { id: ProviderId, rate: f64 },

    #[error("No provider id left above {highest}")]
    ProviderIdsExhausted { highest: ProviderId },

    #[error("Invalid time '{input}': expected HH:MM on a 24-hour clock")]
    InvalidTime { input: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DeskResult<T> = Result<T, DeskError>;
