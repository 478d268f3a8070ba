use std::sync::Arc;

use image::RgbImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};
use tracing::info;
use crate::{
    comparison::{Comparator, ComparisonRecord},
    error::{Result, WoundError},
    pipeline::AssessmentPipeline,
    recommendations::{self, CareRecommendation},
    types::{AssessmentRecord, PatientAnswers},
};

#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "type", content = "params")]
#[strum(serialize_all = "snake_case")]
pub enum AssessmentCommand {
    /// Analyze the loaded image and append the result to the history
    #[serde(rename = "analyze_wound")]
    AnalyzeWound,

    /// Compare the two most recent assessments
    #[serde(rename = "compare_with_previous")]
    CompareWithPrevious {
        #[schemars(range(min = 1, max = 365))]
        days_between: u32,
    },

    /// Generate care recommendations for the most recent assessment
    #[serde(rename = "recommend_care")]
    RecommendCare {
        #[serde(default)]
        answers: PatientAnswers,
    },
}

impl AssessmentCommand {
    /// Get the JSON schema for all commands
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AssessmentCommand)
    }

    /// Get a list of all available command names
    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    /// Get a description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Self::AnalyzeWound => "Analyze the loaded wound photograph and record the assessment",
            Self::CompareWithPrevious { .. } => "Compare the latest assessment with the one before it",
            Self::RecommendCare { .. } => "Generate prioritized care instructions for the latest assessment",
        }
    }

    /// Get parameter requirements for the command
    pub fn parameters_info(&self) -> Vec<(&'static str, &'static str, bool)> {
        match self {
            Self::AnalyzeWound => vec![],
            Self::CompareWithPrevious { .. } => vec![
                ("days_between", "Days elapsed between the two scans (at least 1)", true)
            ],
            Self::RecommendCare { .. } => vec![
                ("answers", "Patient-reported pain, discharge, fever, spreading redness and dressing status", false)
            ],
        }
    }
}

/// Output of an executed command
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CommandOutcome {
    Assessment(AssessmentRecord),
    Comparison(ComparisonRecord),
    Recommendations(Vec<CareRecommendation>),
}

/// Holds the loaded image and an in-memory history of assessments, newest last
#[derive(Clone)]
pub struct AssessmentManager {
    image: Option<RgbImage>,
    pipeline: Arc<AssessmentPipeline>,
    comparator: Comparator,
    history: Vec<AssessmentRecord>,
}

impl AssessmentManager {
    pub fn new() -> Self {
        Self::with_pipeline(AssessmentPipeline::default())
    }

    /// Create a new manager with a custom pipeline
    pub fn with_pipeline(pipeline: AssessmentPipeline) -> Self {
        let comparator = Comparator::new(pipeline.config().comparison.clone());
        Self {
            image: None,
            pipeline: Arc::new(pipeline),
            comparator,
            history: Vec::new(),
        }
    }

    /// Load a wound photograph from file
    ///
    /// A failed load clears the current image, so a later analysis cannot run on a stale photograph.
    pub fn load_image(&mut self, path: &str) -> Result<()> {
        self.image = None;
        let img = image::open(path)?;
        self.image = Some(img.to_rgb8());
        Ok(())
    }

    /// Load a wound photograph from memory
    pub fn load_image_from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.image = None;
        let img = image::load_from_memory(bytes)?;
        self.image = Some(img.to_rgb8());
        Ok(())
    }

    /// Set the image directly
    pub fn set_image(&mut self, image: RgbImage) {
        self.image = Some(image);
    }

    /// Add an assessment produced elsewhere, e.g. restored from storage
    pub fn push_assessment(&mut self, record: AssessmentRecord) {
        self.history.push(record);
    }

    pub fn history(&self) -> &[AssessmentRecord] {
        &self.history
    }

    pub fn latest(&self) -> Option<&AssessmentRecord> {
        self.history.last()
    }

    pub fn execute(&mut self, command: AssessmentCommand) -> Result<CommandOutcome> {
        match command {
            AssessmentCommand::AnalyzeWound => {
                let image = self.image.as_ref().ok_or(WoundError::NoImageLoaded)?;
                let record = self.pipeline.analyze(image);
                self.history.push(record.clone());
                info!(history_len = self.history.len(), "stored assessment");
                Ok(CommandOutcome::Assessment(record))
            }
            AssessmentCommand::CompareWithPrevious { days_between } => {
                let [.., previous, current] = self.history.as_slice() else {
                    return Err(WoundError::InsufficientHistory {
                        needed: 2,
                        available: self.history.len(),
                    });
                };
                Ok(CommandOutcome::Comparison(
                    self.comparator.compare(current, previous, days_between),
                ))
            }
            AssessmentCommand::RecommendCare { answers } => {
                let latest = self.latest().ok_or(WoundError::InsufficientHistory {
                    needed: 1,
                    available: 0,
                })?;
                Ok(CommandOutcome::Recommendations(recommendations::generate(
                    latest, &answers, None,
                )))
            }
        }
    }
}

impl Default for AssessmentManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::Trend;
    use image::Rgb;

    fn wound_image() -> RgbImage {
        let mut img = RgbImage::from_pixel(20, 20, Rgb([20, 60, 200]));
        for y in 5..15 {
            for x in 5..15 {
                img.put_pixel(x, y, Rgb([230, 140, 140]));
            }
        }
        img
    }

    #[test]
    fn test_analyze_without_image_fails() {
        let mut manager = AssessmentManager::new();
        assert!(matches!(
            manager.execute(AssessmentCommand::AnalyzeWound),
            Err(WoundError::NoImageLoaded)
        ));
    }

    #[test]
    fn test_compare_needs_two_assessments() {
        let mut manager = AssessmentManager::new();
        manager.set_image(wound_image());
        manager.execute(AssessmentCommand::AnalyzeWound).expect("analysis");

        let result = manager.execute(AssessmentCommand::CompareWithPrevious { days_between: 1 });
        assert!(matches!(
            result,
            Err(WoundError::InsufficientHistory { needed: 2, available: 1 })
        ));

        manager.execute(AssessmentCommand::AnalyzeWound).expect("analysis");
        match manager.execute(AssessmentCommand::CompareWithPrevious { days_between: 3 }) {
            Ok(CommandOutcome::Comparison(c)) => {
                assert_eq!(c.improvement, 0);
                assert_eq!(c.trend, Trend::Stable);
                assert_eq!(c.days_between, 3);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_failed_load_clears_previous_image() {
        let mut manager = AssessmentManager::new();
        manager.set_image(wound_image());
        manager.execute(AssessmentCommand::AnalyzeWound).expect("analysis");

        assert!(manager.load_image_from_bytes(b"not an image").is_err());
        assert!(matches!(
            manager.execute(AssessmentCommand::AnalyzeWound),
            Err(WoundError::NoImageLoaded)
        ));
        assert_eq!(manager.history().len(), 1);

        assert!(manager.load_image("/nonexistent/wound.png").is_err());
        assert!(matches!(
            manager.execute(AssessmentCommand::AnalyzeWound),
            Err(WoundError::NoImageLoaded)
        ));
    }

    #[test]
    fn test_recommend_uses_latest() {
        let mut manager = AssessmentManager::new();
        let mut critical = AssessmentRecord::default_analysis();
        critical.risk_level = crate::types::RiskLevel::Critical;
        manager.push_assessment(AssessmentRecord::default_analysis());
        manager.push_assessment(critical);

        match manager.execute(AssessmentCommand::RecommendCare { answers: PatientAnswers::default() }) {
            Ok(CommandOutcome::Recommendations(list)) => {
                assert_eq!(list[0].priority, crate::recommendations::CarePriority::Urgent);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_command_metadata() {
        assert_eq!(
            AssessmentCommand::command_names(),
            &["analyze_wound", "compare_with_previous", "recommend_care"]
        );
        let json = serde_json::to_value(AssessmentCommand::CompareWithPrevious { days_between: 2 }).unwrap();
        assert_eq!(json["type"], "compare_with_previous");
        assert_eq!(json["params"]["days_between"], 2);
        assert!(AssessmentCommand::schema().schema.subschemas.is_some());
    }
}
