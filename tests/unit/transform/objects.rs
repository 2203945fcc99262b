//! Tests for object transform classification

#[cfg(test)]
mod tests {
    use crate::fixture;
    use gridrule::grid::geometry::{FlipAxis, Rotation};
    use gridrule::transform::objects::{
        ObjectTransform, analyze_object_transforms, classify_object_transform,
    };

    // Tests identical subgrids
    #[test]
    fn test_identical() {
        let subgrid = fixture(&[&[1, 1]]);
        assert_eq!(classify_object_transform(&subgrid, &subgrid), ObjectTransform::None);
    }

    // Tests a recolored footprint is a value change
    // Verified by comparing values instead of occupancy masks
    #[test]
    fn test_value_change() {
        let input = fixture(&[&[3, 3], &[3, 0]]);
        let output = fixture(&[&[8, 8], &[8, 0]]);
        assert_eq!(
            classify_object_transform(&input, &output),
            ObjectTransform::ValueChange { from: 3, to: 8 }
        );
    }

    // Tests an integer multiple of the dimensions is a scale
    #[test]
    fn test_scale() {
        let input = fixture(&[&[2]]);
        let output = fixture(&[&[2, 2], &[2, 2]]);
        assert_eq!(
            classify_object_transform(&input, &output),
            ObjectTransform::Scale { factor: 2 }
        );
    }

    // Tests rotations are checked on the footprint, counter-clockwise
    // Verified by rotating clockwise
    #[test]
    fn test_rotation() {
        let input = fixture(&[&[4, 4, 4], &[4, 0, 0]]);
        let output = fixture(&[&[4, 0], &[4, 0], &[4, 4]]);
        assert_eq!(
            classify_object_transform(&input, &output),
            ObjectTransform::Rotation {
                degrees: Rotation::Quarter
            }
        );
    }

    // Tests a mirrored footprint that no rotation explains is a flip
    #[test]
    fn test_flip() {
        let input = fixture(&[&[1, 1, 0], &[0, 1, 1]]);
        let output = fixture(&[&[0, 1, 1], &[1, 1, 0]]);
        assert_eq!(
            classify_object_transform(&input, &output),
            ObjectTransform::Flip {
                axis: FlipAxis::Horizontal
            }
        );
    }

    // Tests unrelated footprints are complex and have no application
    #[test]
    fn test_complex() {
        let input = fixture(&[&[1, 1, 1]]);
        let output = fixture(&[&[1, 0], &[1, 1]]);
        let transform = classify_object_transform(&input, &output);
        assert_eq!(transform, ObjectTransform::Complex);
        assert_eq!(transform.apply(&input), None);
    }

    // Tests every non-complex candidate is kept per input object
    // Verified by stopping at the first candidate
    #[test]
    fn test_analysis_keeps_alternatives() {
        let input = fixture(&[&[1, 0, 0], &[0, 0, 0], &[0, 0, 0]]);
        let output = fixture(&[&[2, 0, 3], &[0, 0, 0], &[0, 0, 0]]);
        let analysis = analyze_object_transforms(&input, &output);

        assert_eq!(analysis.count_change, 1);
        let mapping = analysis.mappings.first().unwrap();
        assert_eq!(mapping.matches.len(), 2);
        assert_eq!(mapping.agreed_transform(), None);
    }

    // Tests complex candidates are left out of the analysis
    // Verified by recording every classified candidate
    #[test]
    fn test_analysis_skips_complex() {
        let input = fixture(&[&[1, 1, 1], &[0, 0, 0], &[0, 0, 0], &[0, 0, 0]]);
        let output = fixture(&[&[5, 5, 5], &[0, 0, 0], &[2, 0, 0], &[2, 2, 0]]);
        let analysis = analyze_object_transforms(&input, &output);

        assert_eq!(analysis.mappings.len(), 1);
        let mapping = analysis.mappings.first().unwrap();
        assert_eq!(mapping.matches.len(), 1);
        assert!(mapping.matches.iter().all(|m| m.transform != ObjectTransform::Complex));
        assert_eq!(
            mapping.agreed_transform(),
            Some(ObjectTransform::ValueChange { from: 1, to: 5 })
        );

        let unrelated =
            analyze_object_transforms(&fixture(&[&[1, 1, 1]]), &fixture(&[&[1, 0], &[1, 1]]));
        assert!(unrelated.mappings.is_empty());
    }

    // Tests a single consistent candidate is the agreed transform
    #[test]
    fn test_agreed_transform() {
        let input = fixture(&[&[1, 1, 0], &[0, 0, 0]]);
        let output = fixture(&[&[0, 0, 0], &[0, 5, 5]]);
        let analysis = analyze_object_transforms(&input, &output);

        assert_eq!(analysis.count_change, 0);
        let mapping = analysis.mappings.first().unwrap();
        assert_eq!(
            mapping.agreed_transform(),
            Some(ObjectTransform::ValueChange { from: 1, to: 5 })
        );
    }

    // Tests value changes keep the footprint
    #[test]
    fn test_apply_value_change() {
        let subgrid = fixture(&[&[3, 0], &[3, 3]]);
        let changed = ObjectTransform::ValueChange { from: 3, to: 6 }
            .apply(&subgrid)
            .unwrap();
        assert_eq!(changed, fixture(&[&[6, 0], &[6, 6]]));
        assert_eq!(ObjectTransform::Scale { factor: 2 }.kind(), "scale");
    }
}
