use image::Rgb;
use crate::{traits::PixelClassifier, types::TissueCategory};

/// Colour-threshold classifier for wound photographs
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPixelClassifier;

impl PixelClassifier for HeuristicPixelClassifier {
    fn is_wound_pixel(&self, pixel: &Rgb<u8>) -> bool {
        let (r, g, b) = channels(pixel);
        is_skin_tone(r, g, b)
            || (r > 100 && g < 150 && b < 150)
            || (r > 180 && g > 100 && b > 100 && r > g)
            || (r > 150 && g > 150 && b < 100)
            || (r < 80 && g < 80 && b < 80)
            || (r > 200 && g > 200 && b > 200)
    }

    fn classify(&self, pixel: &Rgb<u8>) -> TissueCategory {
        let (r, g, b) = channels(pixel);

        // First match wins; the order is part of the contract.
        if r > 150 && g < 100 && b < 100 && r - g > 50 {
            TissueCategory::Red
        } else if r > 180 && g > 100 && g < 180 && b > 100 && b < 180 && r > g && r > b {
            TissueCategory::Pink
        } else if r > 180 && g > 150 && b < 120 && (r - g).abs() < 50 {
            TissueCategory::Yellow
        } else if r < 60 && g < 60 && b < 60 {
            TissueCategory::Black
        } else if r > 220 && g > 220 && b > 200 && (r - g).abs() < 30 {
            TissueCategory::White
        } else {
            TissueCategory::None
        }
    }
}

/// Bright pixel with little red/blue separation, read as oedema
pub fn is_swelling_indicator(pixel: &Rgb<u8>) -> bool {
    let (r, g, b) = channels(pixel);
    r > 200 && g > 150 && b > 150 && r - b < 60
}

fn is_skin_tone(r: i32, g: i32, b: i32) -> bool {
    r > g && r > b && r > 60 && g > 40 && b > 20 && (r - g).abs() < 100
}

fn channels(pixel: &Rgb<u8>) -> (i32, i32, i32) {
    let [r, g, b] = pixel.0;
    (r as i32, g as i32, b as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIFIER: HeuristicPixelClassifier = HeuristicPixelClassifier;

    #[test]
    fn test_tissue_categories() {
        assert_eq!(CLASSIFIER.classify(&Rgb([200, 50, 50])), TissueCategory::Red);
        assert_eq!(CLASSIFIER.classify(&Rgb([230, 140, 140])), TissueCategory::Pink);
        assert_eq!(CLASSIFIER.classify(&Rgb([200, 190, 60])), TissueCategory::Yellow);
        assert_eq!(CLASSIFIER.classify(&Rgb([30, 30, 30])), TissueCategory::Black);
        assert_eq!(CLASSIFIER.classify(&Rgb([240, 240, 230])), TissueCategory::White);
        assert_eq!(CLASSIFIER.classify(&Rgb([180, 120, 90])), TissueCategory::None);
    }

    #[test]
    fn test_red_rule_requires_channel_gap() {
        // r - g == 50 is not strictly greater than 50
        assert_ne!(CLASSIFIER.classify(&Rgb([160, 110, 50])), TissueCategory::Red);
        assert_eq!(CLASSIFIER.classify(&Rgb([160, 99, 50])), TissueCategory::Red);
    }

    #[test]
    fn test_wound_predicate() {
        assert!(CLASSIFIER.is_wound_pixel(&Rgb([180, 120, 90])));
        assert!(CLASSIFIER.is_wound_pixel(&Rgb([200, 50, 50])));
        assert!(CLASSIFIER.is_wound_pixel(&Rgb([30, 30, 30])));
        assert!(CLASSIFIER.is_wound_pixel(&Rgb([240, 240, 230])));
        assert!(!CLASSIFIER.is_wound_pixel(&Rgb([20, 60, 200])));
        assert!(!CLASSIFIER.is_wound_pixel(&Rgb([30, 160, 40])));
    }

    #[test]
    fn test_swelling_indicator() {
        assert!(is_swelling_indicator(&Rgb([240, 240, 230])));
        assert!(is_swelling_indicator(&Rgb([230, 190, 190])));
        assert!(!is_swelling_indicator(&Rgb([230, 140, 140])));
        assert!(!is_swelling_indicator(&Rgb([255, 200, 160])));
    }
}
