//! Tests for per-value spatial arrangement detection

#[cfg(test)]
mod tests {
    use crate::fixture;
    use gridrule::detection::spatial::{DiagonalDirection, SpatialFinding, detect_spatial};
    use gridrule::grid::Cell;

    // Tests a main diagonal is both linear and diagonal
    // Verified by requiring a different sign for positive diagonals
    #[test]
    fn test_positive_diagonal() {
        let grid = fixture(&[&[2, 0, 0], &[0, 2, 0], &[0, 0, 2]]);
        let findings = detect_spatial(&grid).findings;

        assert!(findings.contains(&SpatialFinding::LinearArrangement {
            value: 2,
            direction: (1, 1),
            count: 3,
        }));
        assert!(findings.contains(&SpatialFinding::DiagonalPattern {
            value: 2,
            direction: DiagonalDirection::Positive,
            count: 3,
        }));
    }

    // Tests an anti-diagonal has a negative slope
    #[test]
    fn test_negative_diagonal() {
        let grid = fixture(&[&[0, 0, 4], &[0, 4, 0], &[4, 0, 0]]);
        let findings = detect_spatial(&grid).findings;
        assert!(findings.contains(&SpatialFinding::DiagonalPattern {
            value: 4,
            direction: DiagonalDirection::Negative,
            count: 3,
        }));
    }

    // Tests a filled block is a rectangle and a horizontal run is linear
    // Verified by comparing cell count against the bounding-box perimeter
    #[test]
    fn test_rectangle() {
        let grid = fixture(&[&[0, 0, 0], &[0, 7, 7], &[0, 7, 7]]);
        let findings = detect_spatial(&grid).findings;
        assert!(findings.contains(&SpatialFinding::RectangularArrangement {
            value: 7,
            dimensions: (2, 2),
            position: Cell::new(1, 1),
        }));
        assert!(
            !findings
                .iter()
                .any(|f| matches!(f, SpatialFinding::LinearArrangement { .. }))
        );
    }

    // Tests background and single cells are ignored
    #[test]
    fn test_ignores_background_and_singletons() {
        let grid = fixture(&[&[0, 0], &[0, 3]]);
        assert!(detect_spatial(&grid).is_empty());
    }

    // Tests regularity of lines and rectangles
    #[test]
    fn test_regularity() {
        let line = SpatialFinding::LinearArrangement {
            value: 1,
            direction: (0, 1),
            count: 4,
        };
        assert!((line.regularity() - 0.75).abs() < 1e-9);

        let rectangle = SpatialFinding::RectangularArrangement {
            value: 1,
            dimensions: (2, 4),
            position: Cell::new(0, 0),
        };
        assert!((rectangle.regularity() - 0.5).abs() < 1e-9);
        assert_eq!(rectangle.value(), 1);
        assert_eq!(rectangle.subtype(), "rectangular_arrangement");
    }
}
