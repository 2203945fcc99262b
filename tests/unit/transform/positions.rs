//! Tests for relative position changes between matched objects

#[cfg(test)]
mod tests {
    use crate::fixture;
    use gridrule::grid::objects::extract_objects;
    use gridrule::transform::matcher::AttributeScoreMatcher;
    use gridrule::transform::positions::{Displacement, relative_position_changes};
    use std::f64::consts::FRAC_PI_2;

    // Tests displacement components use columns for dx and rows for dy
    // Verified by swapping the center components
    #[test]
    fn test_displacement_components() {
        let displacement = Displacement::between((1.0, 1.0), (4.0, 5.0));
        assert!((displacement.dx - 4.0).abs() < 1e-9);
        assert!((displacement.dy - 3.0).abs() < 1e-9);
        assert!((displacement.distance - 5.0).abs() < 1e-9);

        let down = Displacement::between((0.0, 0.0), (2.0, 0.0));
        assert!((down.angle - FRAC_PI_2).abs() < 1e-9);
    }

    // Tests a pair moving apart is recorded
    // Verified by comparing only distances
    #[test]
    fn test_records_changed_pair() {
        let input = fixture(&[&[1, 0, 2, 0, 0]]);
        let output = fixture(&[&[1, 0, 0, 0, 2]]);
        let changes = relative_position_changes(
            &extract_objects(&input),
            &extract_objects(&output),
            &AttributeScoreMatcher,
        );

        assert_eq!(changes.len(), 1);
        let change = changes.first().unwrap();
        assert_eq!(change.objects, (1, 2));
        assert!((change.from.dx - 2.0).abs() < 1e-9);
        assert!((change.to.dx - 4.0).abs() < 1e-9);
    }

    // Tests a pair translated together is not recorded
    #[test]
    fn test_ignores_joint_translation() {
        let input = fixture(&[&[1, 2, 0, 0]]);
        let output = fixture(&[&[0, 0, 1, 2]]);
        let changes = relative_position_changes(
            &extract_objects(&input),
            &extract_objects(&output),
            &AttributeScoreMatcher,
        );
        assert!(changes.is_empty());
    }

    // Tests differing or single object counts skip the analysis
    // Verified by removing the count guard
    #[test]
    fn test_requires_equal_counts() {
        let input = fixture(&[&[1, 0, 2]]);
        let output = fixture(&[&[1, 2, 3]]);
        let changes = relative_position_changes(
            &extract_objects(&input),
            &extract_objects(&output),
            &AttributeScoreMatcher,
        );
        assert!(changes.is_empty());

        let single = extract_objects(&fixture(&[&[1, 0]]));
        assert!(relative_position_changes(&single, &single, &AttributeScoreMatcher).is_empty());
    }
}
