//! Tunable constants for the assessment engine.
//!
//! An [`EngineConfig`] is built once and handed to the pipeline; nothing in the
//! engine reads configuration from global state.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringWeights,
    pub discharge: DischargeThresholds,
    pub confidence: ConfidenceSettings,
    pub outline: OutlineSettings,
    pub comparison: ComparisonSettings,
}

/// Weights of the health penalty formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringWeights {
    pub redness: f64,
    pub swelling: f64,
    pub edge: f64,
    pub black: f64,
    pub yellow: f64,
    /// Only applied when no black tissue is present
    pub pink_bonus: f64,
    pub yellow_discharge_penalty: f64,
    pub green_discharge_penalty: f64,
    pub bloody_discharge_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            redness: 0.4,
            swelling: 0.3,
            edge: 0.3,
            black: 3.0,
            yellow: 1.0,
            pink_bonus: 0.1,
            yellow_discharge_penalty: 25.0,
            green_discharge_penalty: 50.0,
            bloody_discharge_penalty: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DischargeThresholds {
    /// Yellow pixel ratio above which discharge is yellow
    pub strong_yellow_ratio: f64,
    /// Yellow pixel ratio above which clear discharge is assumed
    pub weak_yellow_ratio: f64,
    pub yellow_percent: u8,
    pub white_percent: u8,
    pub green_yellow_percent: u8,
    pub green_white_percent: u8,
}

impl Default for DischargeThresholds {
    fn default() -> Self {
        Self {
            strong_yellow_ratio: 0.3,
            weak_yellow_ratio: 0.1,
            yellow_percent: 30,
            white_percent: 40,
            green_yellow_percent: 15,
            green_white_percent: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ConfidenceSettings {
    pub base: u8,
    /// Added when the wound covers a plausible share of the frame
    pub coverage_bonus: u8,
    pub min_coverage: f64,
    pub max_coverage: f64,
    pub edge_bonus: u8,
    pub edge_threshold: u8,
    pub cap: u8,
    pub max_jitter: u8,
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        Self {
            base: 70,
            coverage_bonus: 15,
            min_coverage: 0.1,
            max_coverage: 0.6,
            edge_bonus: 10,
            edge_threshold: 50,
            cap: 95,
            max_jitter: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutlineSettings {
    pub enabled: bool,
    /// Douglas-Peucker tolerance in pixels
    pub simplification_tolerance: f32,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            simplification_tolerance: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonSettings {
    /// Expected improvement in percent per day
    pub expected_daily_improvement: f64,
    pub trend_threshold: f64,
    pub redness_alert_delta: i32,
    pub slow_healing_rate: i32,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            expected_daily_improvement: 3.0,
            trend_threshold: 10.0,
            redness_alert_delta: 15,
            slow_healing_rate: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "scoring": { "redness": 0.5 } }"#).unwrap();
        assert_eq!(config.scoring.redness, 0.5);
        assert_eq!(config.scoring.swelling, 0.3);
        assert_eq!(config.confidence.cap, 95);
        assert!(config.outline.enabled);
    }
}
