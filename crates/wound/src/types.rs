use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Coarse tissue class assigned to a single wound pixel
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TissueCategory {
    /// Granulation tissue
    Red,
    /// Epithelial tissue
    Pink,
    /// Slough
    Yellow,
    /// Necrotic tissue
    Black,
    /// Macerated tissue
    White,
    None,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DischargeType {
    #[default]
    None,
    Clear,
    Yellow,
    Green,
    Bloody,
}

impl DischargeType {
    /// Yellow and green discharge are treated as signs of infection
    pub fn is_purulent(self) -> bool {
        matches!(self, Self::Yellow | Self::Green)
    }
}

/// Clinical healing phase, ordered from earliest to latest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HealingStage {
    Hemostasis = 1,
    Inflammatory = 2,
    Proliferative = 3,
    Maturation = 4,
}

impl HealingStage {
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Risk level, ordered by severity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RiskLevel {
    #[default]
    Normal,
    Warning,
    Infected,
    Critical,
}

/// Percentage of tissue-bearing pixels in each category.
///
/// Each value is rounded independently, so the five fields need not add up to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TissueComposition {
    pub red: u8,
    pub pink: u8,
    pub yellow: u8,
    pub black: u8,
    pub white: u8,
}

impl TissueComposition {
    /// Copy with every percentage limited to 100
    pub fn clamped(self) -> Self {
        Self {
            red: self.red.min(100),
            pink: self.pink.min(100),
            yellow: self.yellow.min(100),
            black: self.black.min(100),
            white: self.white.min(100),
        }
    }
}

/// Wound geometry in pixel units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct WoundSize {
    pub width: u32,
    pub height: u32,
    pub area: u32,
    pub perimeter: u32,
}

/// Simplified outer contour of the largest wound region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WoundOutline {
    pub points: Vec<[f32; 2]>,
    pub centroid: [f32; 2],
    pub polygon_area: f32,
}

/// Structured result of one image analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub overall_health: u8,
    pub redness_level: u8,
    pub swelling_level: u8,
    pub discharge_detected: bool,
    pub discharge_type: DischargeType,
    pub wound_size: WoundSize,
    pub tissue_color: TissueComposition,
    pub edge_quality: u8,
    pub healing_stage: HealingStage,
    pub risk_level: RiskLevel,
    pub confidence: u8,
    pub detected_features: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<WoundOutline>,
}

impl AssessmentRecord {
    /// Neutral record returned when no wound region can be assessed
    pub fn default_analysis() -> Self {
        Self {
            overall_health: 75,
            redness_level: 35,
            swelling_level: 25,
            discharge_detected: false,
            discharge_type: DischargeType::None,
            wound_size: WoundSize::default(),
            tissue_color: TissueComposition {
                red: 30,
                pink: 50,
                yellow: 10,
                black: 0,
                white: 10,
            },
            edge_quality: 65,
            healing_stage: HealingStage::Proliferative,
            risk_level: RiskLevel::Normal,
            confidence: 82,
            detected_features: vec![
                "No distinct wound region detected; showing baseline assessment".to_string(),
            ],
            timestamp: Utc::now(),
            outline: None,
        }
    }

    /// Set the discharge type, keeping `discharge_detected` in step with it
    pub fn set_discharge(&mut self, discharge_type: DischargeType) {
        self.discharge_type = discharge_type;
        self.discharge_detected = discharge_type != DischargeType::None;
    }

    /// Check the range and discharge invariants of the record
    pub fn is_consistent(&self) -> bool {
        let in_range = [
            self.overall_health,
            self.redness_level,
            self.swelling_level,
            self.edge_quality,
            self.confidence,
            self.tissue_color.red,
            self.tissue_color.pink,
            self.tissue_color.yellow,
            self.tissue_color.black,
            self.tissue_color.white,
        ]
        .iter()
        .all(|&v| v <= 100);

        in_range && self.discharge_detected == (self.discharge_type != DischargeType::None)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PainLevel {
    #[default]
    None,
    Mild,
    Moderate,
    Severe,
}

/// Answers reported by the patient alongside a scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientAnswers {
    pub days_since_event: u32,
    pub pain_level: PainLevel,
    pub discharge_type: DischargeType,
    pub fever: bool,
    pub spreading_redness: bool,
    pub dressing_changed: bool,
}

impl Default for PatientAnswers {
    fn default() -> Self {
        Self {
            days_since_event: 0,
            pain_level: PainLevel::None,
            discharge_type: DischargeType::None,
            fever: false,
            spreading_redness: false,
            dressing_changed: true,
        }
    }
}
