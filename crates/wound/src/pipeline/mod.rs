pub mod builder;

use std::path::Path;

use chrono::Utc;
use image::{DynamicImage, RgbImage};
use thiserror::Error;
use tracing::{debug, info, warn};
use crate::{
    algorithms::{
        aggregate_region, classify_risk, classify_stage, describe_features, extract_outline,
        health_score, synthesize, ClinicalSignals, RegionAnalysis,
    },
    config::EngineConfig,
    traits::{ClassificationProvider, ConfidenceJitter, PixelClassifier},
    types::AssessmentRecord,
};

/// Why the neutral default record was returned instead of a computed one
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FallbackReason {
    #[error("image could not be decoded: {0}")]
    DecodeFailed(String),
    #[error("no wound region detected")]
    NoWoundDetected,
}

/// Result of one analysis, keeping track of whether the fallback was used
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Assessed(AssessmentRecord),
    Fallback {
        reason: FallbackReason,
        record: AssessmentRecord,
    },
}

impl AnalysisOutcome {
    fn fallback(reason: FallbackReason) -> Self {
        warn!("Using default analysis: {}", reason);
        Self::Fallback {
            reason,
            record: AssessmentRecord::default_analysis(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn record(&self) -> &AssessmentRecord {
        match self {
            Self::Assessed(record) | Self::Fallback { record, .. } => record,
        }
    }

    pub fn into_record(self) -> AssessmentRecord {
        match self {
            Self::Assessed(record) | Self::Fallback { record, .. } => record,
        }
    }
}

/// Image-to-assessment pipeline.
///
/// Every call allocates its own mask and counters, so a pipeline can be shared
/// between threads without locking.
pub struct AssessmentPipeline {
    config: EngineConfig,
    classifier: Box<dyn PixelClassifier>,
    jitter: Box<dyn ConfidenceJitter>,
}

impl AssessmentPipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    pub fn new(
        config: EngineConfig,
        classifier: Box<dyn PixelClassifier>,
        jitter: Box<dyn ConfidenceJitter>,
    ) -> Self {
        Self {
            config,
            classifier,
            jitter,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full analysis, reporting whether the fallback was taken
    pub fn evaluate(&self, image: &RgbImage) -> AnalysisOutcome {
        match aggregate_region(image, self.classifier.as_ref()) {
            Some(region) => AnalysisOutcome::Assessed(self.assess(region)),
            None => AnalysisOutcome::fallback(FallbackReason::NoWoundDetected),
        }
    }

    /// Analyze a decoded RGB image
    pub fn analyze(&self, image: &RgbImage) -> AssessmentRecord {
        self.evaluate(image).into_record()
    }

    pub fn analyze_dynamic(&self, image: &DynamicImage) -> AssessmentRecord {
        self.analyze(&image.to_rgb8())
    }

    /// Decode and analyze an encoded image (PNG, JPEG, TIFF)
    pub fn evaluate_bytes(&self, bytes: &[u8]) -> AnalysisOutcome {
        match image::load_from_memory(bytes) {
            Ok(decoded) => self.evaluate(&decoded.to_rgb8()),
            Err(e) => AnalysisOutcome::fallback(FallbackReason::DecodeFailed(e.to_string())),
        }
    }

    pub fn analyze_bytes(&self, bytes: &[u8]) -> AssessmentRecord {
        self.evaluate_bytes(bytes).into_record()
    }

    /// Read and decode an image file, then analyze it.
    ///
    /// Reading and decoding run off the async executor; the analysis itself
    /// runs to completion without suspending.
    pub async fn evaluate_path<P: AsRef<Path>>(&self, path: P) -> AnalysisOutcome {
        let path = path.as_ref();
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return AnalysisOutcome::fallback(FallbackReason::DecodeFailed(format!(
                    "{}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await;
        match decoded {
            Ok(Ok(image)) => self.evaluate(&image.to_rgb8()),
            Ok(Err(e)) => AnalysisOutcome::fallback(FallbackReason::DecodeFailed(e.to_string())),
            Err(e) => AnalysisOutcome::fallback(FallbackReason::DecodeFailed(e.to_string())),
        }
    }

    pub async fn analyze_path<P: AsRef<Path>>(&self, path: P) -> AssessmentRecord {
        self.evaluate_path(path).await.into_record()
    }

    /// Analyze locally, then merge an external classification when one is available.
    ///
    /// A failing provider leaves the local record untouched.
    pub fn analyze_with_enrichment(
        &self,
        bytes: &[u8],
        provider: &dyn ClassificationProvider,
    ) -> AssessmentRecord {
        let mut record = self.analyze_bytes(bytes);
        match provider.classify_image(bytes) {
            Ok(remote) => record.apply_classification(&remote),
            Err(e) => warn!("Ignoring classification enrichment: {}", e),
        }
        record
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: outline extraction {}, confidence cap {}, max jitter {}",
            if self.config.outline.enabled { "on" } else { "off" },
            self.config.confidence.cap,
            self.config.confidence.max_jitter
        )
    }

    fn assess(&self, region: RegionAnalysis) -> AssessmentRecord {
        let RegionAnalysis { mask, geometry, counts } = region;

        let metrics = synthesize(
            &counts,
            &geometry,
            &self.config.discharge,
            &self.config.confidence,
            self.jitter.as_ref(),
        );

        let signals = ClinicalSignals {
            tissue: metrics.tissue,
            redness: metrics.redness,
            swelling: metrics.swelling,
            edge_quality: metrics.edge_quality,
            discharge: metrics.discharge,
        };

        let healing_stage = classify_stage(&signals);
        let risk_level = classify_risk(&signals);
        let overall_health = health_score(&signals, &self.config.scoring);

        let outline = if self.config.outline.enabled {
            extract_outline(&mask, self.config.outline.simplification_tolerance)
        } else {
            None
        };
        debug!(has_outline = outline.is_some(), "outline extraction finished");

        let mut record = AssessmentRecord {
            overall_health,
            redness_level: metrics.redness,
            swelling_level: metrics.swelling,
            discharge_detected: false,
            discharge_type: metrics.discharge,
            wound_size: geometry.wound_size(),
            tissue_color: metrics.tissue,
            edge_quality: metrics.edge_quality,
            healing_stage,
            risk_level,
            confidence: metrics.confidence,
            detected_features: describe_features(&metrics),
            timestamp: Utc::now(),
            outline,
        };
        record.set_discharge(metrics.discharge);

        info!(
            health = record.overall_health,
            stage = %record.healing_stage,
            risk = %record.risk_level,
            area = record.wound_size.area,
            "wound assessment complete"
        );

        record
    }
}

impl Default for AssessmentPipeline {
    fn default() -> Self {
        Self::builder().build()
    }
}
