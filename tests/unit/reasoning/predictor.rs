//! Tests for staged hypothesis application

#[cfg(test)]
mod tests {
    use crate::fixture;
    use gridrule::grid::geometry::{PositionCategory, Rotation};
    use gridrule::reasoning::consistency::{ConsistentHypothesis, PositionDelta};
    use gridrule::reasoning::predict;
    use gridrule::transform::{GlobalTransform, ObjectTransform, ValueMapping};
    use std::collections::BTreeMap;

    // Tests an empty hypothesis leaves the input unchanged
    #[test]
    fn test_empty_hypothesis_is_identity() {
        let input = fixture(&[&[3, 1], &[4, 1]]);
        assert_eq!(predict(&input, &ConsistentHypothesis::default()), input);
    }

    // Tests direct mappings are applied simultaneously
    // Verified by applying mappings one value at a time
    #[test]
    fn test_simultaneous_swap() {
        let hypothesis = ConsistentHypothesis {
            value_mappings: BTreeMap::from([
                (0, ValueMapping::Direct { to: 1 }),
                (1, ValueMapping::Direct { to: 0 }),
            ]),
            ..ConsistentHypothesis::default()
        };
        let input = fixture(&[&[0, 1], &[1, 1]]);
        assert_eq!(predict(&input, &hypothesis), fixture(&[&[1, 0], &[0, 0]]));
    }

    // Tests conditional mappings use the cell's border category
    #[test]
    fn test_conditional_mapping() {
        let conditions = BTreeMap::from([
            (PositionCategory::Corner, 2),
            (PositionCategory::Edge, 3),
        ]);
        let hypothesis = ConsistentHypothesis {
            value_mappings: BTreeMap::from([(5, ValueMapping::Conditional { conditions })]),
            ..ConsistentHypothesis::default()
        };
        let input = fixture(&[&[5, 5, 5], &[5, 5, 5], &[5, 5, 5]]);
        assert_eq!(
            predict(&input, &hypothesis),
            fixture(&[&[2, 3, 2], &[3, 5, 3], &[2, 3, 2]])
        );
    }

    // Tests conditional mappings see the values direct mappings produced
    // Verified by rewriting every mapping in a single pass
    #[test]
    fn test_direct_then_conditional() {
        let conditions = BTreeMap::from([
            (PositionCategory::Corner, 5),
            (PositionCategory::Edge, 2),
            (PositionCategory::Interior, 2),
        ]);
        let hypothesis = ConsistentHypothesis {
            value_mappings: BTreeMap::from([
                (1, ValueMapping::Direct { to: 2 }),
                (2, ValueMapping::Conditional { conditions }),
            ]),
            ..ConsistentHypothesis::default()
        };
        let input = fixture(&[&[1, 0, 0], &[0, 0, 0], &[0, 0, 0]]);
        assert_eq!(
            predict(&input, &hypothesis),
            fixture(&[&[5, 0, 0], &[0, 0, 0], &[0, 0, 0]])
        );
    }

    // Tests the global transform runs before value mappings
    // Verified by mapping before rotating
    #[test]
    fn test_global_then_mapping() {
        let hypothesis = ConsistentHypothesis {
            global_transform: Some(GlobalTransform::Rotation {
                degrees: Rotation::Quarter,
            }),
            value_mappings: BTreeMap::from([(1, ValueMapping::Direct { to: 7 })]),
            ..ConsistentHypothesis::default()
        };
        let input = fixture(&[&[1, 2], &[0, 0]]);
        assert_eq!(predict(&input, &hypothesis), fixture(&[&[2, 0], &[7, 0]]));
    }

    // Tests object rewrites apply only when the result fits the bounding box
    // Verified by writing scaled subgrids regardless of size
    #[test]
    fn test_object_rewrites() {
        let recolor = ConsistentHypothesis {
            object_transforms: BTreeMap::from([(1, ObjectTransform::ValueChange { from: 1, to: 6 })]),
            ..ConsistentHypothesis::default()
        };
        let input = fixture(&[&[1, 1, 0], &[0, 0, 2]]);
        assert_eq!(predict(&input, &recolor), fixture(&[&[6, 6, 0], &[0, 0, 2]]));

        let scale = ConsistentHypothesis {
            object_transforms: BTreeMap::from([(1, ObjectTransform::Scale { factor: 2 })]),
            ..ConsistentHypothesis::default()
        };
        assert_eq!(predict(&input, &scale), input);
    }

    // Tests a relative position change moves the second value's cells
    // Verified by shifting by the target delta instead of the difference
    #[test]
    fn test_position_correction() {
        let hypothesis = ConsistentHypothesis {
            relative_positions: vec![PositionDelta {
                objects: (1, 2),
                from: (0, 2),
                to: (0, 4),
            }],
            ..ConsistentHypothesis::default()
        };
        let input = fixture(&[&[1, 2, 0, 0, 0]]);
        assert_eq!(predict(&input, &hypothesis), fixture(&[&[1, 0, 0, 0, 2]]));
    }

    // Tests translated cells falling off the grid are discarded
    // Verified by clamping shifted coordinates to column 0
    #[test]
    fn test_position_correction_clips_at_border() {
        let hypothesis = ConsistentHypothesis {
            relative_positions: vec![PositionDelta {
                objects: (1, 2),
                from: (0, -2),
                to: (0, -3),
            }],
            ..ConsistentHypothesis::default()
        };
        let input = fixture(&[&[2, 2, 1, 0, 0]]);
        assert_eq!(predict(&input, &hypothesis), fixture(&[&[2, 0, 1, 0, 0]]));
    }
}
