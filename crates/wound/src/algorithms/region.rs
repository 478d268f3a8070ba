use image::{GrayImage, Luma, RgbImage};
use tracing::debug;
use crate::{
    algorithms::classification::is_swelling_indicator,
    traits::PixelClassifier,
    types::{TissueCategory, WoundSize},
};

/// Dense per-analysis grid marking wound-pixel membership
#[derive(Debug, Clone)]
pub struct BoundaryMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl BoundaryMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set(&mut self, x: u32, y: u32) {
        let index = self.index(x, y);
        self.cells[index] = true;
    }

    /// Out-of-bounds coordinates read as unmasked
    pub fn is_set(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.cells[self.index(x as u32, y as u32)]
    }

    pub fn area(&self) -> u32 {
        self.cells.iter().filter(|&&cell| cell).count() as u32
    }

    /// Number of masked 4-neighbours of a cell
    pub fn masked_neighbors(&self, x: u32, y: u32) -> u8 {
        let (x, y) = (x as i64, y as i64);
        [(x, y - 1), (x, y + 1), (x - 1, y), (x + 1, y)]
            .iter()
            .filter(|&&(nx, ny)| self.is_set(nx, ny))
            .count() as u8
    }

    /// Sum of exposed cell faces over all masked cells.
    ///
    /// Counts every unmasked 4-neighbour, so diagonal staircases score higher
    /// than a geometric perimeter would. It measures edge exposure.
    pub fn perimeter(&self) -> u32 {
        self.masked_cells()
            .map(|(x, y)| 4 - self.masked_neighbors(x, y) as u32)
            .sum()
    }

    /// Share of boundary cells that keep at least two masked neighbours, 0-100
    pub fn edge_quality(&self) -> u8 {
        let mut boundary = 0u32;
        let mut smooth = 0u32;

        for (x, y) in self.masked_cells() {
            let neighbors = self.masked_neighbors(x, y);
            if neighbors < 4 {
                boundary += 1;
                if neighbors >= 2 {
                    smooth += 1;
                }
            }
        }

        if boundary == 0 {
            return 50;
        }
        (100.0 * smooth as f64 / boundary as f64).round() as u8
    }

    /// Binary image with masked cells at 255, for contour tracing
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.cells[self.index(x, y)] {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        })
    }

    fn masked_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell)
            .map(move |(i, _)| ((i as u32) % width, (i as u32) / width))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Per-category and per-indicator pixel counts gathered in one pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixelCounts {
    pub total_pixels: u32,
    pub wound_pixels: u32,
    pub red: u32,
    pub pink: u32,
    pub yellow: u32,
    pub black: u32,
    pub white: u32,
    /// Sum of (red - green) / 255 over red-classified pixels
    pub red_intensity: f64,
    pub swelling_indicators: u32,
}

impl PixelCounts {
    /// Pixels assigned to one of the five tissue categories
    pub fn tissue_pixels(&self) -> u32 {
        self.red + self.pink + self.yellow + self.black + self.white
    }

    fn record(&mut self, category: TissueCategory, pixel: &image::Rgb<u8>) {
        match category {
            TissueCategory::Red => {
                self.red += 1;
                self.red_intensity += (pixel[0] as f64 - pixel[1] as f64) / 255.0;
            }
            TissueCategory::Pink => self.pink += 1,
            TissueCategory::Yellow => self.yellow += 1,
            TissueCategory::Black => self.black += 1,
            TissueCategory::White => self.white += 1,
            TissueCategory::None => {}
        }
    }
}

/// Bounding box and boundary-derived measurements of the wound region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionGeometry {
    pub min_col: u32,
    pub max_col: u32,
    pub min_row: u32,
    pub max_row: u32,
    pub area: u32,
    pub perimeter: u32,
    pub edge_quality: u8,
}

impl RegionGeometry {
    pub fn wound_size(&self) -> WoundSize {
        WoundSize {
            width: self.max_col - self.min_col,
            height: self.max_row - self.min_row,
            area: self.area,
            perimeter: self.perimeter,
        }
    }
}

/// Everything extracted from one pass over the image
#[derive(Debug, Clone)]
pub struct RegionAnalysis {
    pub mask: BoundaryMask,
    pub geometry: RegionGeometry,
    pub counts: PixelCounts,
}

/// Classify every pixel and aggregate the wound region.
///
/// Returns `None` when no pixel qualifies as a wound pixel.
pub fn aggregate_region<C>(image: &RgbImage, classifier: &C) -> Option<RegionAnalysis>
where
    C: PixelClassifier + ?Sized,
{
    let (width, height) = image.dimensions();
    let mut mask = BoundaryMask::new(width, height);
    let mut counts = PixelCounts {
        total_pixels: width * height,
        ..Default::default()
    };

    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if !classifier.is_wound_pixel(pixel) {
            continue;
        }

        mask.set(x, y);
        counts.wound_pixels += 1;
        if is_swelling_indicator(pixel) {
            counts.swelling_indicators += 1;
        }
        counts.record(classifier.classify(pixel), pixel);

        bounds = Some(match bounds {
            None => (x, x, y, y),
            Some((min_col, max_col, min_row, max_row)) => (
                min_col.min(x),
                max_col.max(x),
                min_row.min(y),
                max_row.max(y),
            ),
        });
    }

    let (min_col, max_col, min_row, max_row) = bounds?;

    let geometry = RegionGeometry {
        min_col,
        max_col,
        min_row,
        max_row,
        area: counts.wound_pixels,
        perimeter: mask.perimeter(),
        edge_quality: mask.edge_quality(),
    };

    debug!(
        wound_pixels = counts.wound_pixels,
        tissue_pixels = counts.tissue_pixels(),
        perimeter = geometry.perimeter,
        edge_quality = geometry.edge_quality,
        "aggregated wound region"
    );

    Some(RegionAnalysis { mask, geometry, counts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::HeuristicPixelClassifier;
    use image::Rgb;

    const BACKGROUND: Rgb<u8> = Rgb([20, 60, 200]);

    fn block_image(size: u32, x0: u32, y0: u32, side: u32, color: Rgb<u8>) -> RgbImage {
        let mut img = RgbImage::from_pixel(size, size, BACKGROUND);
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                img.put_pixel(x, y, color);
            }
        }
        img
    }

    #[test]
    fn test_square_geometry() {
        let img = block_image(40, 10, 10, 10, Rgb([200, 50, 50]));
        let analysis = aggregate_region(&img, &HeuristicPixelClassifier).expect("wound present");

        let size = analysis.geometry.wound_size();
        assert_eq!(size.width, 9);
        assert_eq!(size.height, 9);
        assert_eq!(size.area, 100);
        assert_eq!(size.perimeter, 40);
        assert_eq!(analysis.geometry.edge_quality, 100);
        assert_eq!(analysis.counts.red, 100);
        assert_eq!(analysis.counts.total_pixels, 1600);
    }

    #[test]
    fn test_empty_mask_yields_none() {
        let img = RgbImage::from_pixel(16, 16, BACKGROUND);
        assert!(aggregate_region(&img, &HeuristicPixelClassifier).is_none());
    }

    #[test]
    fn test_isolated_pixels_have_rough_edges() {
        let mut mask = BoundaryMask::new(10, 10);
        mask.set(1, 1);
        mask.set(5, 5);
        assert_eq!(mask.area(), 2);
        assert_eq!(mask.perimeter(), 8);
        assert_eq!(mask.edge_quality(), 0);
    }

    #[test]
    fn test_out_of_bounds_counts_as_unmasked() {
        let mut mask = BoundaryMask::new(2, 1);
        mask.set(0, 0);
        mask.set(1, 0);
        assert_eq!(mask.masked_neighbors(0, 0), 1);
        assert_eq!(mask.perimeter(), 6);
        assert!(!mask.is_set(-1, 0));
        assert!(!mask.is_set(2, 0));
    }

    #[test]
    fn test_line_edge_quality() {
        // A 1x5 strip: two ends with one neighbour, three middles with two
        let mut mask = BoundaryMask::new(7, 3);
        for x in 1..6 {
            mask.set(x, 1);
        }
        assert_eq!(mask.edge_quality(), 60);
    }

    #[test]
    fn test_uncategorised_wound_pixels_are_not_tissue() {
        let img = block_image(20, 5, 5, 4, Rgb([180, 120, 90]));
        let analysis = aggregate_region(&img, &HeuristicPixelClassifier).expect("wound present");
        assert_eq!(analysis.counts.wound_pixels, 16);
        assert_eq!(analysis.counts.tissue_pixels(), 0);
    }

    #[test]
    fn test_gray_image_export() {
        let mut mask = BoundaryMask::new(3, 3);
        mask.set(1, 1);
        let gray = mask.to_gray_image();
        assert_eq!(gray.get_pixel(1, 1)[0], 255);
        assert_eq!(gray.get_pixel(0, 0)[0], 0);
    }
}
