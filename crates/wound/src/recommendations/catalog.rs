use crate::{
    recommendations::{CareCategory, CarePriority, CareRecommendation},
    types::{AssessmentRecord, DischargeType, HealingStage, PainLevel, PatientAnswers, RiskLevel},
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Discharge seen in the image, escalated by what the patient reports
fn effective_discharge(assessment: &AssessmentRecord, answers: &PatientAnswers) -> DischargeType {
    if answers.discharge_type.is_purulent() && !assessment.discharge_type.is_purulent() {
        answers.discharge_type
    } else if assessment.discharge_type == DischargeType::None {
        answers.discharge_type
    } else {
        assessment.discharge_type
    }
}

pub fn cleaning(assessment: &AssessmentRecord, _answers: &PatientAnswers) -> CareRecommendation {
    let frequency = match assessment.risk_level {
        RiskLevel::Warning | RiskLevel::Infected | RiskLevel::Critical => "Twice daily",
        RiskLevel::Normal => "Once daily",
    };
    let priority = if assessment.risk_level >= RiskLevel::Infected {
        CarePriority::High
    } else {
        CarePriority::Medium
    };

    let mut steps = strings(&[
        "Wash your hands thoroughly with soap and water",
        "Gently rinse the wound with sterile saline or clean lukewarm water",
        "Pat the surrounding skin dry with clean gauze",
    ]);
    if assessment.discharge_detected {
        steps.push("Lift away loose discharge from the wound surface without scrubbing".to_string());
    }
    if assessment.tissue_color.yellow > 20 || assessment.tissue_color.black > 0 {
        steps.push("Leave yellow or dark tissue in place for a clinician to assess".to_string());
    }

    CareRecommendation {
        category: CareCategory::Cleaning,
        priority,
        title: "Wound cleaning".to_string(),
        description: "Keep the wound clean to prevent infection and support healing".to_string(),
        steps,
        warnings: strings(&["Do not use hydrogen peroxide or alcohol on the open wound"]),
        frequency: Some(frequency.to_string()),
    }
}

pub fn dressing(assessment: &AssessmentRecord, answers: &PatientAnswers) -> CareRecommendation {
    let discharge = effective_discharge(assessment, answers);
    let severe = discharge.is_purulent() || assessment.risk_level >= RiskLevel::Infected;

    let frequency = if severe {
        "Every 12 hours or when soaked through"
    } else if discharge != DischargeType::None {
        "Daily"
    } else {
        "Every 2-3 days or when dirty"
    };

    let priority = if severe || !answers.dressing_changed {
        CarePriority::High
    } else {
        CarePriority::Medium
    };

    let mut steps = strings(&["Remove the old dressing gently, moistening it if it sticks"]);
    steps.push(
        match discharge {
            DischargeType::Yellow | DischargeType::Green => {
                "Apply a highly absorbent foam or alginate dressing"
            }
            DischargeType::Clear => "Apply a non-adherent absorbent pad",
            DischargeType::Bloody => {
                "Press gently with clean gauze until bleeding stops, then apply a non-adherent pad"
            }
            DischargeType::None => "Apply a breathable non-adherent dressing",
        }
        .to_string(),
    );
    steps.push("Secure the edges without wrapping too tightly".to_string());

    let mut warnings = Vec::new();
    if !answers.dressing_changed {
        warnings.push("The dressing has not been changed recently; replace it today".to_string());
    }
    if assessment.tissue_color.white > 20 {
        warnings.push("The skin around the wound looks waterlogged; keep the edges dry".to_string());
    }

    CareRecommendation {
        category: CareCategory::Dressing,
        priority,
        title: "Dressing changes".to_string(),
        description: "Choose and change the dressing according to the amount of discharge".to_string(),
        steps,
        warnings,
        frequency: Some(frequency.to_string()),
    }
}

pub fn nutrition(assessment: &AssessmentRecord, _answers: &PatientAnswers) -> CareRecommendation {
    let struggling = assessment.overall_health < 50
        || (assessment.healing_stage == HealingStage::Inflammatory && assessment.tissue_color.yellow > 20);

    CareRecommendation {
        category: CareCategory::Nutrition,
        priority: if struggling { CarePriority::Medium } else { CarePriority::Low },
        title: "Nutrition for healing".to_string(),
        description: "Protein, vitamins and fluids supply what new tissue needs".to_string(),
        steps: strings(&[
            "Include a source of protein in every meal",
            "Eat fruit and vegetables rich in vitamin C",
            "Drink at least 8 glasses of water a day",
            "Add zinc-rich foods such as nuts, seeds or whole grains",
        ]),
        warnings: Vec::new(),
        frequency: Some("Daily".to_string()),
    }
}

pub fn pain(_assessment: &AssessmentRecord, answers: &PatientAnswers) -> Option<CareRecommendation> {
    let priority = match answers.pain_level {
        PainLevel::None => return None,
        PainLevel::Mild => CarePriority::Low,
        PainLevel::Moderate => CarePriority::Medium,
        PainLevel::Severe => CarePriority::High,
    };

    let mut steps = strings(&[
        "Take over-the-counter pain relief as directed on the label",
        "Keep the area elevated and avoid pressure on it",
    ]);
    if answers.pain_level != PainLevel::Mild {
        steps.push("Take pain relief 30 minutes before dressing changes".to_string());
    }

    let warnings = if answers.pain_level == PainLevel::Severe {
        strings(&["Severe or increasing pain can signal infection; contact your clinician"])
    } else {
        Vec::new()
    };

    Some(CareRecommendation {
        category: CareCategory::Pain,
        priority,
        title: "Pain management".to_string(),
        description: format!("You reported {} pain", answers.pain_level),
        steps,
        warnings,
        frequency: Some("As needed".to_string()),
    })
}

pub fn warning_signs(assessment: &AssessmentRecord, answers: &PatientAnswers) -> CareRecommendation {
    let priority = if assessment.risk_level == RiskLevel::Critical || answers.fever || answers.spreading_redness {
        CarePriority::Urgent
    } else {
        match assessment.risk_level {
            RiskLevel::Infected => CarePriority::High,
            RiskLevel::Warning => CarePriority::Medium,
            _ => CarePriority::Low,
        }
    };

    let mut warnings = Vec::new();
    if assessment.risk_level == RiskLevel::Critical {
        warnings.push("Your wound shows signs that need medical attention now".to_string());
    }
    if answers.fever {
        warnings.push("Fever with a wound can mean the infection is spreading; seek care today".to_string());
    }
    if answers.spreading_redness {
        warnings.push("Spreading redness may indicate cellulitis; seek care today".to_string());
    }
    if assessment.discharge_type.is_purulent() || answers.discharge_type.is_purulent() {
        warnings.push("Yellow or green discharge may indicate infection".to_string());
    }

    CareRecommendation {
        category: CareCategory::WarningSigns,
        priority,
        title: "Warning signs to watch".to_string(),
        description: "Contact a healthcare provider if any of these appear".to_string(),
        steps: strings(&[
            "Redness spreading beyond the wound edges",
            "Increasing warmth, swelling or pain",
            "Pus or a bad smell from the wound",
            "Fever of 38°C (100.4°F) or higher",
            "Red streaks leading away from the wound",
        ]),
        warnings,
        frequency: None,
    }
}

pub fn activity(assessment: &AssessmentRecord, answers: &PatientAnswers) -> CareRecommendation {
    let mut steps = Vec::new();
    if answers.days_since_event < 3 {
        steps.push("Rest the area for the first few days".to_string());
    }
    if assessment.swelling_level > 50 {
        steps.push("Elevate the affected area above heart level to reduce swelling".to_string());
    }
    steps.extend(strings(&[
        "Avoid movements that stretch or rub the wound",
        "Keep the wound dry when bathing; cover it or take short showers",
    ]));
    if assessment.healing_stage >= HealingStage::Proliferative {
        steps.push("Gradually return to normal activity as comfort allows".to_string());
    }

    CareRecommendation {
        category: CareCategory::Activity,
        priority: if assessment.swelling_level > 50 { CarePriority::Medium } else { CarePriority::Low },
        title: "Activity and rest".to_string(),
        description: "Protect the wound from strain while it heals".to_string(),
        steps,
        warnings: strings(&["Avoid swimming pools, baths and hot tubs until the wound has closed"]),
        frequency: None,
    }
}

pub fn stage_care(assessment: &AssessmentRecord, _answers: &PatientAnswers) -> CareRecommendation {
    let (title, description, steps) = match assessment.healing_stage {
        HealingStage::Hemostasis => (
            "Early wound care",
            "The wound is still closing off; focus on stopping bleeding",
            strings(&[
                "Apply steady pressure with clean gauze if bleeding",
                "Keep the wound covered and still",
            ]),
        ),
        HealingStage::Inflammatory => (
            "Inflammatory phase care",
            "Some redness and swelling are expected in this phase",
            strings(&[
                "Check the wound daily for changes in redness or discharge",
                "Keep the wound clean and covered",
                "Take a new scan in 24 hours to track progress",
            ]),
        ),
        HealingStage::Proliferative => (
            "Supporting new tissue",
            "New tissue is forming; a moist, protected environment helps",
            strings(&[
                "Keep the wound bed moist but not wet",
                "Protect fragile new tissue during dressing changes",
            ]),
        ),
        HealingStage::Maturation => (
            "Scar care",
            "The wound is closing; protect and condition the new skin",
            strings(&[
                "Moisturise the healed skin daily",
                "Protect the area from sun exposure",
                "Massage the scar gently once it is fully closed",
            ]),
        ),
    };

    let priority = if assessment.healing_stage == HealingStage::Inflammatory
        && (assessment.tissue_color.black > 5 || assessment.tissue_color.yellow > 20)
    {
        CarePriority::High
    } else {
        CarePriority::Medium
    };

    CareRecommendation {
        category: CareCategory::StageCare,
        priority,
        title: title.to_string(),
        description: description.to_string(),
        steps,
        warnings: Vec::new(),
        frequency: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaning_frequency_follows_risk() {
        let mut assessment = AssessmentRecord::default_analysis();
        let answers = PatientAnswers::default();
        assert_eq!(cleaning(&assessment, &answers).frequency.as_deref(), Some("Once daily"));

        assessment.risk_level = RiskLevel::Warning;
        let rec = cleaning(&assessment, &answers);
        assert_eq!(rec.frequency.as_deref(), Some("Twice daily"));
        assert_eq!(rec.priority, CarePriority::Medium);

        assessment.risk_level = RiskLevel::Infected;
        assert_eq!(cleaning(&assessment, &answers).priority, CarePriority::High);
    }

    #[test]
    fn test_dressing_frequency_escalates() {
        let mut assessment = AssessmentRecord::default_analysis();
        let mut answers = PatientAnswers::default();
        assert_eq!(
            dressing(&assessment, &answers).frequency.as_deref(),
            Some("Every 2-3 days or when dirty")
        );

        assessment.set_discharge(DischargeType::Clear);
        assert_eq!(dressing(&assessment, &answers).frequency.as_deref(), Some("Daily"));

        answers.discharge_type = DischargeType::Green;
        let rec = dressing(&assessment, &answers);
        assert_eq!(rec.frequency.as_deref(), Some("Every 12 hours or when soaked through"));
        assert_eq!(rec.priority, CarePriority::High);
    }

    #[test]
    fn test_unchanged_dressing_raises_priority() {
        let assessment = AssessmentRecord::default_analysis();
        let answers = PatientAnswers { dressing_changed: false, ..Default::default() };
        let rec = dressing(&assessment, &answers);
        assert_eq!(rec.priority, CarePriority::High);
        assert_eq!(rec.warnings.len(), 1);
    }

    #[test]
    fn test_pain_priority_by_level() {
        let assessment = AssessmentRecord::default_analysis();
        let level = |pain_level| {
            pain(&assessment, &PatientAnswers { pain_level, ..Default::default() }).map(|r| r.priority)
        };
        assert_eq!(level(PainLevel::None), None);
        assert_eq!(level(PainLevel::Mild), Some(CarePriority::Low));
        assert_eq!(level(PainLevel::Moderate), Some(CarePriority::Medium));
        assert_eq!(level(PainLevel::Severe), Some(CarePriority::High));
    }

    #[test]
    fn test_warning_signs_urgent_on_fever() {
        let assessment = AssessmentRecord::default_analysis();
        let answers = PatientAnswers { fever: true, ..Default::default() };
        let rec = warning_signs(&assessment, &answers);
        assert_eq!(rec.priority, CarePriority::Urgent);
        assert_eq!(rec.warnings.len(), 1);

        let rec = warning_signs(&assessment, &PatientAnswers::default());
        assert_eq!(rec.priority, CarePriority::Low);
    }

    #[test]
    fn test_stage_care_matches_stage() {
        let mut assessment = AssessmentRecord::default_analysis();
        assessment.healing_stage = HealingStage::Maturation;
        let rec = stage_care(&assessment, &PatientAnswers::default());
        assert_eq!(rec.title, "Scar care");

        assessment.healing_stage = HealingStage::Inflammatory;
        assessment.tissue_color.yellow = 30;
        assert_eq!(stage_care(&assessment, &PatientAnswers::default()).priority, CarePriority::High);
    }
}
