//! Tests for hierarchy construction across the four levels

#[cfg(test)]
mod tests {
    use crate::fixture;
    use gridrule::detection::progression::{Line, ProgressionFinding};
    use gridrule::detection::repetition::{RepeatDirection, RepetitionFinding};
    use gridrule::detection::spatial::SpatialFinding;
    use gridrule::detection::symmetry::SymmetryFinding;
    use gridrule::detection::{DetectionResult, GridPatterns, detect_all};
    use std::collections::BTreeSet;
    use gridrule::hierarchy::pattern::PropertyValue;
    use gridrule::hierarchy::{PatternHierarchy, PatternKind, PatternLevel};
    use gridrule::transform::TransformationAnalyzer;

    fn repetition(repetitions: usize) -> RepetitionFinding {
        RepetitionFinding {
            direction: RepeatDirection::Horizontal,
            block: vec![vec![1]],
            block_size: (1, 1),
            repetitions,
        }
    }

    fn three_families() -> GridPatterns {
        GridPatterns {
            symmetry: DetectionResult::new(vec![SymmetryFinding::Rotational { order: 2 }]),
            progression: DetectionResult::new(vec![ProgressionFinding::Arithmetic {
                line: Line::Row(0),
                difference: 1,
            }]),
            repetition: DetectionResult::new(vec![repetition(2)]),
            spatial: DetectionResult::default(),
        }
    }

    // Tests atomic confidences per family
    // Verified by applying the repetition boost at two repetitions
    #[test]
    fn test_atomic_confidences() {
        let patterns = GridPatterns {
            symmetry: DetectionResult::new(vec![SymmetryFinding::Rotational { order: 2 }]),
            progression: DetectionResult::new(vec![
                ProgressionFinding::Arithmetic {
                    line: Line::Row(0),
                    difference: 0,
                },
                ProgressionFinding::Geometric {
                    line: Line::Row(0),
                    ratio: 1.0,
                },
            ]),
            repetition: DetectionResult::new(vec![repetition(3), repetition(2)]),
            spatial: DetectionResult::new(vec![SpatialFinding::LinearArrangement {
                value: 1,
                direction: (0, 1),
                count: 4,
            }]),
        };
        let levels = PatternHierarchy::new().analyze(&patterns, None);
        let confidences: Vec<f64> = levels.atomic.iter().map(|p| p.confidence).collect();
        let expected = [0.8, 0.8, 0.5, 0.7, 0.5, 0.725];

        assert_eq!(confidences.len(), expected.len());
        for (actual, expected) in confidences.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
        }
    }

    // Tests every cross-family pair becomes a composite and same-family pairs never do
    // Verified by removing the family check
    #[test]
    fn test_composites() {
        let mut patterns = three_families();
        patterns.symmetry = DetectionResult::new(vec![
            SymmetryFinding::Rotational { order: 2 },
            SymmetryFinding::Rotational { order: 4 },
        ]);
        let levels = PatternHierarchy::new().analyze(&patterns, None);

        assert_eq!(levels.atomic.len(), 4);
        // Two symmetry patterns times two others, plus progression with repetition
        assert_eq!(levels.composite.len(), 5);
        for composite in &levels.composite {
            let [first, second] = composite.sub_patterns.as_slice() else {
                panic!("composites have exactly two members");
            };
            assert_ne!(first.family(), second.family());
            let expected = first.confidence.min(second.confidence) * 0.9;
            assert!((composite.confidence - expected).abs() < 1e-9);
        }
    }

    // Tests shared keys with different values block composition
    #[test]
    fn test_conflicting_shared_property() {
        let patterns = GridPatterns {
            symmetry: DetectionResult::new(vec![SymmetryFinding::VerticalReflection { position: 1 }]),
            spatial: DetectionResult::new(vec![SpatialFinding::RectangularArrangement {
                value: 2,
                dimensions: (1, 2),
                position: gridrule::grid::Cell::new(0, 0),
            }]),
            ..GridPatterns::default()
        };
        let levels = PatternHierarchy::new().analyze(&patterns, None);
        assert_eq!(levels.atomic.len(), 2);
        assert!(levels.composite.is_empty());
    }

    // Tests composites sharing members group into one structural pattern
    // Verified by keeping singleton groups
    #[test]
    fn test_structural_grouping() {
        let levels = PatternHierarchy::new().analyze(&three_families(), None);

        assert_eq!(levels.composite.len(), 3);
        assert_eq!(levels.structural.len(), 1);
        let structural = levels.structural.first().unwrap();
        assert_eq!(structural.sub_patterns.len(), 3);
        assert_eq!(structural.level(), PatternLevel::Structural);

        let PatternKind::Structural(summary) = &structural.kind else {
            panic!("structural pattern expected");
        };
        assert_eq!(summary.pattern_types.len(), 3);
        assert!(summary.shared_properties.contains_key("relationship"));
        assert!(!summary.shared_properties.contains_key("components"));

        let mean = levels.composite.iter().map(|p| p.confidence).sum::<f64>() / 3.0;
        assert!(structural.confidence > 0.0 && structural.confidence < mean);
    }

    // Tests meta patterns from conditional mappings and object transforms
    #[test]
    fn test_meta_patterns() {
        let input = fixture(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]);
        let output = fixture(&[&[2, 3, 2], &[3, 4, 3], &[2, 3, 2]]);
        let analysis = TransformationAnalyzer::new().analyze(&input, &output);
        let levels = PatternHierarchy::new().analyze(&GridPatterns::default(), Some(&analysis));

        let conditional: Vec<_> = levels
            .meta
            .iter()
            .filter(|p| p.type_name() == "meta_conditional_mapping")
            .collect();
        assert_eq!(conditional.len(), 1);
        let pattern = conditional.first().unwrap();
        assert!((pattern.confidence - 0.8).abs() < 1e-9);
        assert_eq!(pattern.properties().get("value"), Some(&PropertyValue::Int(1)));
    }

    // Tests ids stay unique and patterns accumulate across calls
    // Verified by resetting the id counter per call
    #[test]
    fn test_accumulation() {
        let mut hierarchy = PatternHierarchy::new();
        let first = hierarchy.analyze(&three_families(), None);
        let second = hierarchy.analyze(&three_families(), None);

        assert_eq!(hierarchy.levels().len(), first.len() + second.len());
        let mut ids: Vec<usize> = hierarchy.levels().patterns().map(|p| p.id).collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert_eq!(
            hierarchy.levels().level(PatternLevel::Atomic).len(),
            first.atomic.len() * 2
        );
        assert!(!hierarchy.into_levels().is_empty());
    }

    // Tests structural groups over many composites are disjoint
    // Verified by letting a composite join every group it relates to
    #[test]
    fn test_structural_groups_disjoint() {
        let mut rows = vec![vec![0_u8; 8]; 8];
        if let Some(cell) = rows.get_mut(3).and_then(|row| row.get_mut(5)) {
            *cell = 4;
        }
        let grid = gridrule::grid::Grid::new(rows).unwrap();
        let levels = PatternHierarchy::new().analyze(&detect_all(&grid), None);
        assert!(levels.composite.len() > 10);

        let mut seen = BTreeSet::new();
        for structural in &levels.structural {
            assert!(structural.sub_patterns.len() > 1);
            for member in &structural.sub_patterns {
                assert!(seen.insert(member.id), "composite {} grouped twice", member.id);
            }
        }
        assert!(seen.len() <= levels.composite.len());
    }
}
