use rand::Rng;
use crate::{
    algorithms::region::{PixelCounts, RegionGeometry},
    config::{ConfidenceSettings, DischargeThresholds},
    traits::ConfidenceJitter,
    types::{DischargeType, TissueComposition},
};

/// Public metrics derived from pixel counts and the boundary mask
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedMetrics {
    pub tissue: TissueComposition,
    pub redness: u8,
    pub swelling: u8,
    pub discharge: DischargeType,
    pub edge_quality: u8,
    pub confidence: u8,
}

/// Tissue percentages over the tissue-bearing pixel count
pub fn tissue_composition(counts: &PixelCounts) -> TissueComposition {
    let total = counts.tissue_pixels().max(1) as f64;
    let percent = |count: u32| (100.0 * count as f64 / total).round() as u8;

    TissueComposition {
        red: percent(counts.red),
        pink: percent(counts.pink),
        yellow: percent(counts.yellow),
        black: percent(counts.black),
        white: percent(counts.white),
    }
}

pub fn redness_level(counts: &PixelCounts) -> u8 {
    let wound = counts.wound_pixels.max(1) as f64;
    (200.0 * counts.red_intensity / wound).round().clamp(0.0, 100.0) as u8
}

pub fn swelling_level(counts: &PixelCounts) -> u8 {
    let wound = counts.wound_pixels.max(1) as f64;
    (150.0 * counts.swelling_indicators as f64 / wound).round().min(100.0) as u8
}

/// Infer discharge from the yellow pixel ratio and the tissue mix
pub fn detect_discharge(
    counts: &PixelCounts,
    tissue: &TissueComposition,
    thresholds: &DischargeThresholds,
) -> DischargeType {
    let yellow_ratio = counts.yellow as f64 / counts.wound_pixels.max(1) as f64;

    let rules: [(bool, DischargeType); 4] = [
        (
            yellow_ratio > thresholds.strong_yellow_ratio || tissue.yellow > thresholds.yellow_percent,
            DischargeType::Yellow,
        ),
        (tissue.white > thresholds.white_percent, DischargeType::Clear),
        (
            tissue.yellow > thresholds.green_yellow_percent && tissue.white > thresholds.green_white_percent,
            DischargeType::Green,
        ),
        (yellow_ratio > thresholds.weak_yellow_ratio, DischargeType::Clear),
    ];

    rules
        .into_iter()
        .find(|(matched, _)| *matched)
        .map(|(_, discharge)| discharge)
        .unwrap_or(DischargeType::None)
}

pub fn confidence_score(
    counts: &PixelCounts,
    edge_quality: u8,
    settings: &ConfidenceSettings,
    jitter: &dyn ConfidenceJitter,
) -> u8 {
    let coverage = counts.wound_pixels as f64 / counts.total_pixels.max(1) as f64;
    let mut score = settings.base as u32;

    if coverage > settings.min_coverage && coverage < settings.max_coverage {
        score += settings.coverage_bonus as u32;
    }
    if edge_quality > settings.edge_threshold {
        score += settings.edge_bonus as u32;
    }
    score += jitter.jitter(settings.max_jitter).min(settings.max_jitter) as u32;

    score.min(settings.cap as u32).min(100) as u8
}

pub fn synthesize(
    counts: &PixelCounts,
    geometry: &RegionGeometry,
    discharge_thresholds: &DischargeThresholds,
    confidence_settings: &ConfidenceSettings,
    jitter: &dyn ConfidenceJitter,
) -> SynthesizedMetrics {
    let tissue = tissue_composition(counts);
    SynthesizedMetrics {
        tissue,
        redness: redness_level(counts),
        swelling: swelling_level(counts),
        discharge: detect_discharge(counts, &tissue, discharge_thresholds),
        edge_quality: geometry.edge_quality,
        confidence: confidence_score(counts, geometry.edge_quality, confidence_settings, jitter),
    }
}

/// Human-readable findings, in a fixed order
pub fn describe_features(metrics: &SynthesizedMetrics) -> Vec<String> {
    let tissue = &metrics.tissue;
    let mut features = Vec::new();

    if tissue.red > 20 {
        features.push(format!("Granulation tissue present ({}%)", tissue.red));
    }
    if tissue.pink > 30 {
        features.push(format!("Epithelial tissue forming ({}%)", tissue.pink));
    }
    if tissue.yellow > 10 {
        features.push(format!("Slough detected ({}%)", tissue.yellow));
    }
    if tissue.black > 0 {
        features.push(format!("Necrotic tissue detected ({}%)", tissue.black));
    }
    if tissue.white > 20 {
        features.push(format!("Possible maceration ({}% white tissue)", tissue.white));
    }
    if metrics.redness > 50 {
        features.push("Elevated redness around the wound".to_string());
    }
    if metrics.swelling > 50 {
        features.push("Visible swelling".to_string());
    }
    if metrics.discharge != DischargeType::None {
        let name: &'static str = metrics.discharge.into();
        features.push(format!("{} discharge detected", capitalize(name)));
    }
    if metrics.edge_quality > 70 {
        features.push("Well-defined wound edges".to_string());
    } else if metrics.edge_quality < 40 {
        features.push("Irregular wound edges".to_string());
    }

    features
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Deterministic jitter source
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl ConfidenceJitter for NoJitter {
    fn jitter(&self, _max: u8) -> u8 {
        0
    }
}

/// Uniform jitter drawn from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl ConfidenceJitter for RandomJitter {
    fn jitter(&self, max: u8) -> u8 {
        rand::thread_rng().gen_range(0..=max)
    }
}
