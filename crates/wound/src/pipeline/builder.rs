use crate::{
    algorithms::{HeuristicPixelClassifier, NoJitter, RandomJitter},
    config::EngineConfig,
    pipeline::AssessmentPipeline,
    traits::{ConfidenceJitter, PixelClassifier},
};

/// Builder for creating assessment pipelines with a fluent API
pub struct PipelineBuilder {
    config: EngineConfig,
    classifier: Option<Box<dyn PixelClassifier>>,
    jitter: Option<Box<dyn ConfidenceJitter>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            classifier: None,
            jitter: None,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the pixel classifier (replaces any existing one)
    pub fn with_classifier<C>(mut self, classifier: C) -> Self
    where
        C: PixelClassifier + 'static,
    {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Set the confidence jitter source (replaces any existing one)
    pub fn with_jitter<J>(mut self, jitter: J) -> Self
    where
        J: ConfidenceJitter + 'static,
    {
        self.jitter = Some(Box::new(jitter));
        self
    }

    /// Add up to `confidence.max_jitter` points of random variation to confidence
    pub fn with_random_jitter(self) -> Self {
        self.with_jitter(RandomJitter)
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> AssessmentPipeline {
        let classifier = self.classifier
            .unwrap_or_else(|| Box::new(HeuristicPixelClassifier));

        let jitter = self.jitter
            .unwrap_or_else(|| Box::new(NoJitter));

        AssessmentPipeline::new(self.config, classifier, jitter)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
