//! Care recommendations generated from an assessment and the patient's answers.
//!
//! Each category comes from a template in [`catalog`]. An external payload may
//! replace the steps of any category; the replacement substitutes the whole
//! list rather than merging with the local steps.

pub mod catalog;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;
use crate::{
    enrichment::RemoteRecommendation,
    types::{AssessmentRecord, PatientAnswers},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CareCategory {
    Cleaning,
    Dressing,
    Nutrition,
    Pain,
    WarningSigns,
    Activity,
    StageCare,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CarePriority {
    Urgent,
    High,
    Medium,
    Low,
}

impl CarePriority {
    /// Sort rank, most pressing first
    pub fn rank(self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CareRecommendation {
    pub category: CareCategory,
    pub priority: CarePriority,
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

/// Stable sort by priority; equal priorities keep their relative order
pub fn sort_by_priority(recommendations: &mut [CareRecommendation]) {
    recommendations.sort_by_key(|rec| rec.priority.rank());
}

/// Build the recommendation list for an assessment
pub fn generate(
    assessment: &AssessmentRecord,
    answers: &PatientAnswers,
    remote: Option<&RemoteRecommendation>,
) -> Vec<CareRecommendation> {
    let mut recommendations = vec![
        catalog::cleaning(assessment, answers),
        catalog::dressing(assessment, answers),
        catalog::nutrition(assessment, answers),
    ];
    recommendations.extend(catalog::pain(assessment, answers));
    recommendations.push(catalog::warning_signs(assessment, answers));
    recommendations.push(catalog::activity(assessment, answers));
    recommendations.push(catalog::stage_care(assessment, answers));

    if let Some(remote) = remote {
        for rec in &mut recommendations {
            if let Some(steps) = remote.step_overrides.get(&rec.category) {
                debug!(category = %rec.category, "replacing steps from remote payload");
                rec.steps = steps.clone();
            }
        }
    }

    sort_by_priority(&mut recommendations);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DischargeType, PainLevel, RiskLevel};
    use std::collections::HashMap;

    fn rec(title: &str, priority: CarePriority) -> CareRecommendation {
        CareRecommendation {
            category: CareCategory::Cleaning,
            priority,
            title: title.to_string(),
            description: String::new(),
            steps: Vec::new(),
            warnings: Vec::new(),
            frequency: None,
        }
    }

    #[test]
    fn test_priority_sort_is_stable() {
        let mut list = vec![
            rec("a", CarePriority::Medium),
            rec("b", CarePriority::Urgent),
            rec("c", CarePriority::Low),
            rec("d", CarePriority::High),
            rec("e", CarePriority::Medium),
            rec("f", CarePriority::Urgent),
        ];
        sort_by_priority(&mut list);
        let titles: Vec<&str> = list.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "f", "d", "a", "e", "c"]);
    }

    #[test]
    fn test_pain_category_only_when_reported() {
        let assessment = AssessmentRecord::default_analysis();
        let answers = PatientAnswers::default();
        let list = generate(&assessment, &answers, None);
        assert!(list.iter().all(|r| r.category != CareCategory::Pain));
        assert_eq!(list.len(), 6);

        let answers = PatientAnswers { pain_level: PainLevel::Moderate, ..Default::default() };
        let list = generate(&assessment, &answers, None);
        assert!(list.iter().any(|r| r.category == CareCategory::Pain));
        assert_eq!(list.len(), 7);
    }

    #[test]
    fn test_output_is_sorted() {
        let mut assessment = AssessmentRecord::default_analysis();
        assessment.risk_level = RiskLevel::Critical;
        assessment.set_discharge(DischargeType::Green);
        let answers = PatientAnswers { fever: true, pain_level: PainLevel::Severe, ..Default::default() };

        let list = generate(&assessment, &answers, None);
        assert_eq!(list[0].priority, CarePriority::Urgent);
        assert_eq!(list[0].category, CareCategory::WarningSigns);
        let ranks: Vec<u8> = list.iter().map(|r| r.priority.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);
    }

    #[test]
    fn test_remote_steps_replace_whole_list() {
        let assessment = AssessmentRecord::default_analysis();
        let answers = PatientAnswers::default();
        let mut overrides = HashMap::new();
        overrides.insert(CareCategory::Cleaning, vec!["Rinse with saline".to_string()]);
        let remote = RemoteRecommendation { step_overrides: overrides, ..Default::default() };

        let list = generate(&assessment, &answers, Some(&remote));
        let cleaning = list.iter().find(|r| r.category == CareCategory::Cleaning).unwrap();
        assert_eq!(cleaning.steps, vec!["Rinse with saline".to_string()]);

        let local = generate(&assessment, &answers, None);
        let dressing = |l: &[CareRecommendation]| {
            l.iter().find(|r| r.category == CareCategory::Dressing).unwrap().steps.clone()
        };
        assert_eq!(dressing(&list), dressing(&local));
    }
}
