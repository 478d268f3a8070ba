use image::Rgb;
use crate::{
    enrichment::RemoteClassification,
    error::Result,
    types::TissueCategory,
};

/// Trait for per-pixel wound classification
pub trait PixelClassifier: Send + Sync {
    /// Whether the pixel belongs to the wound region
    fn is_wound_pixel(&self, pixel: &Rgb<u8>) -> bool;

    /// Tissue category of a wound pixel
    fn classify(&self, pixel: &Rgb<u8>) -> TissueCategory;
}

/// Source of the cosmetic variation added to the confidence score
pub trait ConfidenceJitter: Send + Sync {
    /// Return a value in `0..=max`
    fn jitter(&self, max: u8) -> u8;
}

/// External classifier that may refine a locally computed assessment
pub trait ClassificationProvider: Send + Sync {
    fn classify_image(&self, encoded_image: &[u8]) -> Result<RemoteClassification>;
}
