use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::info;
use crate::{
    config::ComparisonSettings,
    types::{AssessmentRecord, DischargeType, RiskLevel},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
    Critical,
}

/// Difference between two assessments of the same wound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRecord {
    pub days_between: u32,
    /// Positive when redness went down
    pub redness_change: i32,
    /// Percent of the previous area; positive when the wound shrank
    pub size_change: f64,
    pub edge_healing_change: i32,
    pub health_change: i32,
    pub improvement: i32,
    pub trend: Trend,
    /// Actual improvement as a percentage of the expected improvement
    pub healing_rate: i32,
    pub discharge_change: String,
    pub next_scan: String,
    pub stage_regressed: bool,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Comparator {
    settings: ComparisonSettings,
}

impl Comparator {
    pub fn new(settings: ComparisonSettings) -> Self {
        Self { settings }
    }

    /// Compare `current` against `previous`; `days_between` is clamped to at least 1
    pub fn compare(
        &self,
        current: &AssessmentRecord,
        previous: &AssessmentRecord,
        days_between: u32,
    ) -> ComparisonRecord {
        let days_between = days_between.max(1);

        let redness_change = previous.redness_level as i32 - current.redness_level as i32;
        let size_change = size_change(previous.wound_size.area, current.wound_size.area);
        let edge_healing_change = current.edge_quality as i32 - previous.edge_quality as i32;
        let health_change = current.overall_health as i32 - previous.overall_health as i32;

        let improvement = (0.3 * redness_change as f64
            + 0.3 * size_change
            + 0.2 * edge_healing_change as f64
            + 0.2 * health_change as f64)
            .round() as i32;

        let threshold = self.settings.trend_threshold;
        let trend = if current.risk_level == RiskLevel::Critical {
            Trend::Critical
        } else if improvement as f64 > threshold {
            Trend::Improving
        } else if (improvement as f64) < -threshold {
            Trend::Declining
        } else {
            Trend::Stable
        };

        let expected = self.settings.expected_daily_improvement * days_between as f64;
        let healing_rate = (100.0 * improvement as f64 / expected).round() as i32;

        let stage_regressed = current.healing_stage < previous.healing_stage;

        let mut record = ComparisonRecord {
            days_between,
            redness_change,
            size_change,
            edge_healing_change,
            health_change,
            improvement,
            trend,
            healing_rate,
            discharge_change: discharge_change(current, previous),
            next_scan: next_scan(trend, current.risk_level).to_string(),
            stage_regressed,
            warnings: Vec::new(),
            recommendations: Vec::new(),
        };
        self.collect_alerts(current, previous, &mut record);

        info!(
            trend = %record.trend,
            improvement = record.improvement,
            healing_rate = record.healing_rate,
            "compared assessments over {} day(s)",
            days_between
        );

        record
    }

    /// Each check appends independently; none suppresses another
    fn collect_alerts(
        &self,
        current: &AssessmentRecord,
        previous: &AssessmentRecord,
        record: &mut ComparisonRecord,
    ) {
        let warnings = &mut record.warnings;
        let recommendations = &mut record.recommendations;

        match record.trend {
            Trend::Critical => {
                warnings.push("Critical wound status: seek medical attention immediately".to_string());
                recommendations.push("Contact your healthcare provider or emergency services now".to_string());
            }
            Trend::Declining => {
                warnings.push("The wound appears to be getting worse since the last scan".to_string());
                recommendations.push("Contact your healthcare provider within 24 hours".to_string());
            }
            Trend::Improving => {
                recommendations.push("Healing is progressing well; continue the current care routine".to_string());
            }
            Trend::Stable => {
                recommendations.push("The wound is stable; keep up current care and monitor daily".to_string());
            }
        }

        let alert_delta = self.settings.redness_alert_delta;
        if record.redness_change < -alert_delta {
            warnings.push(format!(
                "Redness increased by {} points since the last scan",
                -record.redness_change
            ));
        } else if record.redness_change > alert_delta {
            recommendations.push("Redness has clearly decreased; inflammation is settling".to_string());
        }

        if record.size_change < 0.0 {
            warnings.push(format!(
                "Wound area grew by {:.0}%; the wound may be reopening",
                -record.size_change
            ));
            recommendations.push("Have the wound edges checked by a clinician".to_string());
        }

        if !previous.discharge_detected && current.discharge_detected {
            warnings.push(format!("New {} discharge appeared since the last scan", current.discharge_type));
        }

        if current.discharge_type.is_purulent() {
            warnings.push(format!(
                "{} discharge may indicate infection",
                if current.discharge_type == DischargeType::Green { "Green" } else { "Yellow" }
            ));
            recommendations.push("Ask your healthcare provider about a possible infection".to_string());
        }

        if record.healing_rate < self.settings.slow_healing_rate {
            recommendations.push(format!(
                "Healing is at {}% of the expected pace; review nutrition, rest and dressing routine",
                record.healing_rate
            ));
        }

        if record.stage_regressed {
            warnings.push(format!(
                "Healing stage went back from {} to {}",
                previous.healing_stage, current.healing_stage
            ));
        }
    }
}

/// Percentage shrinkage relative to the previous area; zero when there was no previous area
fn size_change(previous_area: u32, current_area: u32) -> f64 {
    if previous_area == 0 {
        return 0.0;
    }
    100.0 * (previous_area as f64 - current_area as f64) / previous_area as f64
}

fn discharge_change(current: &AssessmentRecord, previous: &AssessmentRecord) -> String {
    if current.discharge_type == previous.discharge_type {
        "No change".to_string()
    } else if previous.discharge_detected && !current.discharge_detected {
        "Discharge resolved".to_string()
    } else if current.discharge_type.is_purulent() {
        format!("Worsened: now {} discharge", current.discharge_type)
    } else {
        format!("Changed from {} to {}", previous.discharge_type, current.discharge_type)
    }
}

fn next_scan(trend: Trend, risk: RiskLevel) -> &'static str {
    match trend {
        Trend::Critical => "Immediately after medical consultation",
        Trend::Declining => "In 12 hours",
        Trend::Improving if risk == RiskLevel::Normal => "In 48 hours",
        _ => "In 24 hours",
    }
}
