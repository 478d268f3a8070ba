use geo_types::{Coord, LineString, Polygon};
use imageproc::contours::BorderType;
use crate::{algorithms::region::BoundaryMask, types::WoundOutline};

/// Trace the largest outer contour of the mask and simplify it.
///
/// Returns `None` when the mask has no contour with at least three points.
pub fn extract_outline(mask: &BoundaryMask, tolerance: f32) -> Option<WoundOutline> {
    use geo::{Area, Centroid, Simplify};

    let binary = mask.to_gray_image();
    let contours = imageproc::contours::find_contours::<i32>(&binary);

    let polygon = contours
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.points.len() >= 3)
        .map(|contour| {
            let coords: Vec<Coord<f32>> = contour
                .points
                .iter()
                .map(|p| Coord { x: p.x as f32, y: p.y as f32 })
                .collect();
            Polygon::new(LineString::new(coords), vec![])
        })
        .max_by(|a, b| {
            a.unsigned_area()
                .partial_cmp(&b.unsigned_area())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let simplified = polygon.exterior().simplify(&tolerance);
    let points: Vec<[f32; 2]> = simplified.coords().map(|c| [c.x, c.y]).collect();

    let centroid = polygon
        .centroid()
        .map(|c| [c.x(), c.y()])
        .unwrap_or_else(|| points.first().copied().unwrap_or([0.0, 0.0]));

    Some(WoundOutline {
        points,
        centroid,
        polygon_area: polygon.unsigned_area(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_outline() {
        let mut mask = BoundaryMask::new(30, 30);
        for y in 10..20 {
            for x in 5..25 {
                mask.set(x, y);
            }
        }

        let outline = extract_outline(&mask, 1.0).expect("outline present");
        assert!(outline.points.len() >= 4);
        assert!((outline.centroid[0] - 14.5).abs() < 1.0);
        assert!((outline.centroid[1] - 14.5).abs() < 1.0);
        // Contour runs through pixel centres, so the polygon is 19 x 9
        assert!((outline.polygon_area - 171.0).abs() < 1.0);
    }

    #[test]
    fn test_single_pixel_has_no_outline() {
        let mut mask = BoundaryMask::new(5, 5);
        mask.set(2, 2);
        assert!(extract_outline(&mask, 1.0).is_none());
    }
}
