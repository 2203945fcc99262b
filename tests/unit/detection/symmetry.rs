//! Tests for reflection and rotational symmetry detection

#[cfg(test)]
mod tests {
    use crate::fixture;
    use gridrule::detection::symmetry::{SymmetryFinding, detect_symmetry};

    // Tests a fully symmetric grid reports every symmetry
    // Verified by dropping the quarter-turn check
    #[test]
    fn test_fully_symmetric_grid() {
        let grid = fixture(&[&[1, 1], &[1, 1]]);
        let result = detect_symmetry(&grid);

        assert!(result.found);
        assert_eq!(
            result.findings,
            vec![
                SymmetryFinding::HorizontalReflection { position: 1 },
                SymmetryFinding::VerticalReflection { position: 1 },
                SymmetryFinding::Rotational { order: 2 },
                SymmetryFinding::Rotational { order: 4 },
            ]
        );
    }

    // Tests a left-right mirror without a top-bottom mirror
    // Verified by comparing the halves without flipping
    #[test]
    fn test_vertical_reflection_only() {
        let grid = fixture(&[&[1, 2, 2, 1], &[3, 4, 4, 3]]);
        let findings = detect_symmetry(&grid).findings;

        assert!(findings.contains(&SymmetryFinding::VerticalReflection { position: 2 }));
        assert!(
            !findings
                .iter()
                .any(|f| matches!(f, SymmetryFinding::HorizontalReflection { .. }))
        );
    }

    // Tests odd dimensions never report a reflection
    #[test]
    fn test_odd_dimensions_skip_reflection() {
        let grid = fixture(&[&[1, 0, 1], &[0, 1, 0], &[1, 0, 1]]);
        let findings = detect_symmetry(&grid).findings;

        assert!(findings.iter().all(|f| matches!(f, SymmetryFinding::Rotational { .. })));
        assert_eq!(findings.len(), 2);
    }

    // Tests an asymmetric grid reports nothing
    #[test]
    fn test_asymmetric_grid() {
        let grid = fixture(&[&[1, 2], &[3, 4]]);
        let result = detect_symmetry(&grid);
        assert!(!result.found);
        assert!(result.is_empty());
    }

    // Tests subtype names for rotational findings
    #[test]
    fn test_subtypes() {
        assert_eq!(SymmetryFinding::Rotational { order: 2 }.subtype(), "rotational_180");
        assert_eq!(SymmetryFinding::Rotational { order: 4 }.subtype(), "rotational_90");
        assert_eq!(
            SymmetryFinding::HorizontalReflection { position: 1 }.subtype(),
            "horizontal_reflection"
        );
    }
}
