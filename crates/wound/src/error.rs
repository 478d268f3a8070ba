use thiserror::Error;

#[derive(Error, Debug)]
pub enum WoundError {
    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Not enough assessments in history: need {needed}, have {available}")]
    InsufficientHistory { needed: usize, available: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Enrichment unavailable: {0}")]
    EnrichmentUnavailable(String),

    #[error("Manager state lock poisoned")]
    LockPoisoned,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WoundError>;
