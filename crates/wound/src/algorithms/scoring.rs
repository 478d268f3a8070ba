use crate::{
    algorithms::staging::ClinicalSignals,
    config::ScoringWeights,
    types::DischargeType,
};

/// Weighted-penalty health score, clamped to 0-100
pub fn health_score(signals: &ClinicalSignals, weights: &ScoringWeights) -> u8 {
    let tissue = &signals.tissue;

    let mut health = 100.0
        - weights.redness * signals.redness as f64
        - weights.swelling * signals.swelling as f64
        - weights.edge * (100.0 - signals.edge_quality as f64)
        - weights.black * tissue.black as f64
        - weights.yellow * tissue.yellow as f64;

    // Pink tissue must not offset necrosis
    if tissue.black == 0 {
        health += weights.pink_bonus * tissue.pink as f64;
    }

    health -= match signals.discharge {
        DischargeType::Yellow => weights.yellow_discharge_penalty,
        DischargeType::Green => weights.green_discharge_penalty,
        DischargeType::Bloody => weights.bloody_discharge_penalty,
        DischargeType::None | DischargeType::Clear => 0.0,
    };

    health.clamp(0.0, 100.0).round() as u8
}

/// Health implied by an external severity score on a 0-300 scale
pub fn health_from_severity(severity: u16) -> u8 {
    let severity = severity.min(300) as f64;
    (100.0 - (severity / 3.0).round()).clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TissueComposition;

    fn signals(tissue: TissueComposition, discharge: DischargeType) -> ClinicalSignals {
        ClinicalSignals {
            tissue,
            redness: 20,
            swelling: 10,
            edge_quality: 80,
            discharge,
        }
    }

    #[test]
    fn test_formula() {
        let weights = ScoringWeights::default();
        let tissue = TissueComposition { red: 40, pink: 50, yellow: 10, ..Default::default() };
        // 100 - 8 - 3 - 6 - 0 - 10 + 5 = 78
        assert_eq!(health_score(&signals(tissue, DischargeType::None), &weights), 78);
    }

    #[test]
    fn test_yellow_discharge_penalty() {
        let weights = ScoringWeights::default();
        let tissue = TissueComposition { pink: 60, yellow: 35, ..Default::default() };
        let clean = health_score(&signals(tissue, DischargeType::None), &weights);
        let discharging = health_score(&signals(tissue, DischargeType::Yellow), &weights);
        assert_eq!(clean - discharging, 25);
    }

    #[test]
    fn test_pink_bonus_suppressed_by_necrosis() {
        let weights = ScoringWeights::default();
        let with_black = TissueComposition { pink: 90, black: 1, ..Default::default() };
        let without_black = TissueComposition { pink: 90, ..Default::default() };
        let a = health_score(&signals(with_black, DischargeType::None), &weights);
        let b = health_score(&signals(without_black, DischargeType::None), &weights);
        // 3 points for the black tissue plus the 9 point bonus
        assert_eq!(b - a, 12);
    }

    #[test]
    fn test_clamped_to_range() {
        let weights = ScoringWeights::default();
        let dire = ClinicalSignals {
            tissue: TissueComposition { black: 60, yellow: 40, ..Default::default() },
            redness: 100,
            swelling: 100,
            edge_quality: 0,
            discharge: DischargeType::Green,
        };
        assert_eq!(health_score(&dire, &weights), 0);

        let pristine = ClinicalSignals {
            tissue: TissueComposition { pink: 100, ..Default::default() },
            redness: 0,
            swelling: 0,
            edge_quality: 100,
            discharge: DischargeType::None,
        };
        assert_eq!(health_score(&pristine, &weights), 100);
    }

    #[test]
    fn test_health_from_severity() {
        assert_eq!(health_from_severity(0), 100);
        assert_eq!(health_from_severity(150), 50);
        assert_eq!(health_from_severity(300), 0);
        assert_eq!(health_from_severity(1000), 0);
    }
}
