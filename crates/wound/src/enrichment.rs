//! Optional external refinements merged into a local assessment.
//!
//! Enrichment is best-effort: a payload only overwrites the fields it carries,
//! and a missing payload leaves the record exactly as the engine produced it.

use std::collections::HashMap;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::{
    algorithms::health_from_severity,
    recommendations::CareCategory,
    types::{AssessmentRecord, DischargeType, HealingStage, RiskLevel, TissueComposition},
};

/// Fields an external classifier may supply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteClassification {
    pub redness_level: Option<u8>,
    pub discharge_type: Option<DischargeType>,
    pub edge_quality: Option<u8>,
    pub tissue_color: Option<TissueComposition>,
    pub risk_level: Option<RiskLevel>,
    pub healing_stage: Option<HealingStage>,
    pub confidence: Option<u8>,
    pub detected_features: Vec<String>,
}

/// Output of an external recommendation service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteRecommendation {
    /// Free-form risk label, e.g. "infected"
    pub risk_label: Option<String>,
    /// Severity on a 0-300 scale
    pub severity_score: Option<u16>,
    /// Whole-list replacements for the steps of a care category
    pub step_overrides: HashMap<CareCategory, Vec<String>>,
}

impl RemoteRecommendation {
    pub fn risk_level(&self) -> Option<RiskLevel> {
        let label = self.risk_label.as_deref()?.trim();
        match RiskLevel::from_str(label) {
            Ok(level) => Some(level),
            Err(_) => {
                warn!("Ignoring unknown remote risk label '{}'", label);
                None
            }
        }
    }
}

impl AssessmentRecord {
    /// Overwrite the fields carried by an external classification
    pub fn apply_classification(&mut self, remote: &RemoteClassification) {
        if let Some(redness) = remote.redness_level {
            self.redness_level = redness.min(100);
        }
        if let Some(discharge) = remote.discharge_type {
            self.set_discharge(discharge);
        }
        if let Some(edge) = remote.edge_quality {
            self.edge_quality = edge.min(100);
        }
        if let Some(tissue) = remote.tissue_color {
            self.tissue_color = tissue.clamped();
        }
        if let Some(risk) = remote.risk_level {
            self.risk_level = risk;
        }
        if let Some(stage) = remote.healing_stage {
            self.healing_stage = stage;
        }
        if let Some(confidence) = remote.confidence {
            self.confidence = confidence.min(100);
        }
        self.detected_features.extend(remote.detected_features.iter().cloned());
        debug!("merged remote classification into assessment");
    }

    /// Apply the risk label and severity of an external recommendation
    pub fn apply_recommendation(&mut self, remote: &RemoteRecommendation) {
        if let Some(risk) = remote.risk_level() {
            self.risk_level = risk;
        }
        if let Some(severity) = remote.severity_score {
            self.overall_health = health_from_severity(severity);
        }
    }
}
