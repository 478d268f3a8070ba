//! Ordered rule lists mapping synthesized metrics to a healing stage and a
//! risk level. Each list is evaluated top to bottom and the first matching
//! rule decides; later rules never override earlier ones.

use tracing::debug;
use crate::types::{DischargeType, HealingStage, RiskLevel, TissueComposition};

/// Inputs shared by the stage and risk rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClinicalSignals {
    pub tissue: TissueComposition,
    pub redness: u8,
    pub swelling: u8,
    pub edge_quality: u8,
    pub discharge: DischargeType,
}

pub struct Rule<T> {
    pub name: &'static str,
    pub applies: fn(&ClinicalSignals) -> bool,
    pub outcome: T,
}

pub const STAGE_RULES: &[Rule<HealingStage>] = &[
    Rule {
        name: "necrosis_or_slough",
        applies: |s| s.tissue.black > 5 || s.tissue.yellow > 20,
        outcome: HealingStage::Inflammatory,
    },
    Rule {
        name: "epithelialised",
        applies: |s| s.tissue.pink > 70 && s.redness < 20 && s.edge_quality > 85,
        outcome: HealingStage::Maturation,
    },
    Rule {
        name: "granulating",
        applies: |s| (s.tissue.red > 20 || s.tissue.pink > 30) && s.edge_quality > 60,
        outcome: HealingStage::Proliferative,
    },
    Rule {
        name: "inflamed",
        applies: |s| s.redness > 40 || s.tissue.red > 30,
        outcome: HealingStage::Inflammatory,
    },
];

pub const RISK_RULES: &[Rule<RiskLevel>] = &[
    Rule {
        name: "critical",
        applies: |s| {
            s.tissue.black > 5
                || (s.discharge == DischargeType::Green && s.redness > 60)
                || (s.discharge == DischargeType::Yellow && s.redness > 80)
        },
        outcome: RiskLevel::Critical,
    },
    Rule {
        name: "infected",
        applies: |s| s.discharge.is_purulent() || s.tissue.yellow > 40,
        outcome: RiskLevel::Infected,
    },
    Rule {
        name: "warning",
        applies: |s| s.redness > 50 || s.swelling > 50 || s.tissue.yellow > 20,
        outcome: RiskLevel::Warning,
    },
];

fn first_match<T: Copy>(rules: &[Rule<T>], signals: &ClinicalSignals, default: T) -> T {
    match rules.iter().find(|rule| (rule.applies)(signals)) {
        Some(rule) => {
            debug!(rule = rule.name, "clinical rule matched");
            rule.outcome
        }
        None => default,
    }
}

pub fn classify_stage(signals: &ClinicalSignals) -> HealingStage {
    first_match(STAGE_RULES, signals, HealingStage::Inflammatory)
}

pub fn classify_risk(signals: &ClinicalSignals) -> RiskLevel {
    first_match(RISK_RULES, signals, RiskLevel::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(tissue: TissueComposition, redness: u8, edge_quality: u8) -> ClinicalSignals {
        ClinicalSignals {
            tissue,
            redness,
            swelling: 0,
            edge_quality,
            discharge: DischargeType::None,
        }
    }

    #[test]
    fn test_slough_preempts_maturation() {
        let s = signals(TissueComposition { yellow: 25, pink: 80, ..Default::default() }, 10, 95);
        assert_eq!(classify_stage(&s), HealingStage::Inflammatory);
    }

    #[test]
    fn test_maturation() {
        let s = signals(TissueComposition { pink: 80, ..Default::default() }, 10, 95);
        assert_eq!(classify_stage(&s), HealingStage::Maturation);
    }

    #[test]
    fn test_proliferative_below_slough_threshold() {
        let s = signals(TissueComposition { yellow: 10, pink: 50, ..Default::default() }, 15, 90);
        assert_eq!(classify_stage(&s), HealingStage::Proliferative);
        assert_eq!(classify_risk(&s), RiskLevel::Normal);
    }

    #[test]
    fn test_inflamed_and_default_stage() {
        let s = signals(TissueComposition { red: 35, ..Default::default() }, 10, 40);
        assert_eq!(classify_stage(&s), HealingStage::Inflammatory);

        let s = signals(TissueComposition::default(), 0, 40);
        assert_eq!(classify_stage(&s), HealingStage::Inflammatory);
    }

    #[test]
    fn test_black_tissue_is_always_critical() {
        let s = ClinicalSignals {
            tissue: TissueComposition { black: 6, pink: 94, ..Default::default() },
            redness: 0,
            swelling: 0,
            edge_quality: 100,
            discharge: DischargeType::None,
        };
        assert_eq!(classify_risk(&s), RiskLevel::Critical);
    }

    #[test]
    fn test_discharge_risk_levels() {
        let mut s = signals(TissueComposition::default(), 70, 80);
        s.discharge = DischargeType::Green;
        assert_eq!(classify_risk(&s), RiskLevel::Critical);

        s.discharge = DischargeType::Yellow;
        assert_eq!(classify_risk(&s), RiskLevel::Infected);

        s.redness = 81;
        assert_eq!(classify_risk(&s), RiskLevel::Critical);

        s.discharge = DischargeType::Clear;
        assert_eq!(classify_risk(&s), RiskLevel::Warning);
    }

    #[test]
    fn test_warning_from_swelling() {
        let mut s = signals(TissueComposition::default(), 10, 80);
        s.swelling = 55;
        assert_eq!(classify_risk(&s), RiskLevel::Warning);
    }
}
