//! Four-level pattern hierarchy construction
//!
//! One [`PatternHierarchy`] lives for the analysis of one task. Each call to
//! [`PatternHierarchy::analyze`] promotes a grid's detector findings through
//! the atomic, composite and structural levels, derives meta patterns from
//! the pair's transformation analysis, and both accumulates and returns the
//! new patterns.

use serde::Serialize;
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

use crate::detection::GridPatterns;
use crate::detection::progression::ProgressionFinding;
use crate::hierarchy::pattern::{
    CompositeRelation, Dependency, GroupSummary, Interaction, MetaObservation, Pattern,
    PatternKind, PatternLevel, Properties,
};
use crate::io::configuration::{
    BASE_CONFIDENCE, COMPOSITE_DAMPING, META_CONDITIONAL_CONFIDENCE, META_OBJECT_CONFIDENCE,
    PROGRESSION_BOOST, REPETITION_BOOST, REPETITION_BOOST_THRESHOLD, SPATIAL_REGULARITY_WEIGHT,
    SYMMETRY_CONFIDENCE,
};
use crate::transform::analyzer::TransformationAnalysis;
use crate::transform::mapping::ValueMapping;

/// Patterns produced by one analysis, per level
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HierarchyLevels {
    /// One pattern per detector finding
    pub atomic: Vec<Pattern>,
    /// Compatible atomic pairs
    pub composite: Vec<Pattern>,
    /// Groups of related composites
    pub structural: Vec<Pattern>,
    /// Observations about the transformation
    pub meta: Vec<Pattern>,
}

impl HierarchyLevels {
    /// Total pattern count
    pub fn len(&self) -> usize {
        self.atomic.len() + self.composite.len() + self.structural.len() + self.meta.len()
    }

    /// Check whether no pattern was produced
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every pattern, level by level
    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.atomic
            .iter()
            .chain(&self.composite)
            .chain(&self.structural)
            .chain(&self.meta)
    }

    /// Patterns at one level
    pub fn level(&self, level: PatternLevel) -> &[Pattern] {
        match level {
            PatternLevel::Atomic => &self.atomic,
            PatternLevel::Composite => &self.composite,
            PatternLevel::Structural => &self.structural,
            PatternLevel::Meta => &self.meta,
        }
    }

    fn extend(&mut self, other: &Self) {
        self.atomic.extend(other.atomic.iter().cloned());
        self.composite.extend(other.composite.iter().cloned());
        self.structural.extend(other.structural.iter().cloned());
        self.meta.extend(other.meta.iter().cloned());
    }
}

/// Task-scoped accumulator of patterns at every level
#[derive(Debug, Clone, Default)]
pub struct PatternHierarchy {
    levels: HierarchyLevels,
    next_id: usize,
}

impl PatternHierarchy {
    /// Empty hierarchy
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything accumulated so far
    pub const fn levels(&self) -> &HierarchyLevels {
        &self.levels
    }

    /// Consume the hierarchy, returning the accumulated levels
    pub fn into_levels(self) -> HierarchyLevels {
        self.levels
    }

    /// Promote one grid's findings and one pair's transformation data
    pub fn analyze(
        &mut self,
        patterns: &GridPatterns,
        transformation: Option<&TransformationAnalysis>,
    ) -> HierarchyLevels {
        let atomic = self.atomic_patterns(patterns);
        let composite = self.composite_patterns(&atomic);
        let structural = self.structural_patterns(&composite);
        let meta = transformation.map_or_else(Vec::new, |analysis| self.meta_patterns(analysis));

        let found = HierarchyLevels {
            atomic,
            composite,
            structural,
            meta,
        };
        debug!(
            atomic = found.atomic.len(),
            composite = found.composite.len(),
            structural = found.structural.len(),
            meta = found.meta.len(),
            "hierarchy levels built"
        );
        self.levels.extend(&found);
        found
    }

    fn make(&mut self, kind: PatternKind, confidence: f64, sub_patterns: Vec<Pattern>) -> Pattern {
        let id = self.next_id;
        self.next_id += 1;
        Pattern {
            id,
            kind,
            confidence: confidence.clamp(0.0, 1.0),
            sub_patterns,
        }
    }

    fn atomic_patterns(&mut self, patterns: &GridPatterns) -> Vec<Pattern> {
        let mut atomic = Vec::with_capacity(patterns.finding_count());
        for finding in &patterns.symmetry.findings {
            atomic.push(self.make(
                PatternKind::Symmetry(finding.clone()),
                SYMMETRY_CONFIDENCE,
                Vec::new(),
            ));
        }
        for finding in &patterns.progression.findings {
            let confidence = match finding {
                ProgressionFinding::Arithmetic { .. } => BASE_CONFIDENCE + PROGRESSION_BOOST,
                ProgressionFinding::Geometric { .. } => BASE_CONFIDENCE,
            };
            atomic.push(self.make(
                PatternKind::Progression(finding.clone()),
                confidence,
                Vec::new(),
            ));
        }
        for finding in &patterns.repetition.findings {
            let confidence = if finding.repetitions > REPETITION_BOOST_THRESHOLD {
                BASE_CONFIDENCE + REPETITION_BOOST
            } else {
                BASE_CONFIDENCE
            };
            atomic.push(self.make(
                PatternKind::Repetition(finding.clone()),
                confidence,
                Vec::new(),
            ));
        }
        for finding in &patterns.spatial.findings {
            let confidence = finding
                .regularity()
                .mul_add(SPATIAL_REGULARITY_WEIGHT, BASE_CONFIDENCE);
            atomic.push(self.make(PatternKind::Spatial(finding.clone()), confidence, Vec::new()));
        }
        atomic
    }

    fn composite_patterns(&mut self, atomic: &[Pattern]) -> Vec<Pattern> {
        let mut composites = Vec::new();
        for (index, first) in atomic.iter().enumerate() {
            for second in atomic.iter().skip(index + 1) {
                let first_props = first.properties();
                let second_props = second.properties();
                if !compatible(first, &first_props, second, &second_props) {
                    continue;
                }
                let relation = CompositeRelation {
                    components: [first.type_name(), second.type_name()],
                    interaction: interaction(&first_props, &second_props),
                    dependency: dependency(first, &first_props, second, &second_props),
                };
                let confidence = first.confidence.min(second.confidence) * COMPOSITE_DAMPING;
                composites.push(self.make(
                    PatternKind::Composite(relation),
                    confidence,
                    vec![first.clone(), second.clone()],
                ));
            }
        }
        composites
    }

    fn structural_patterns(&mut self, composites: &[Pattern]) -> Vec<Pattern> {
        group_related(composites)
            .into_iter()
            .filter(|group| group.len() > 1)
            .map(|group| {
                let members: Vec<Pattern> = group
                    .iter()
                    .filter_map(|&index| composites.get(index).cloned())
                    .collect();
                let summary = summarize_group(&members);
                let confidence = group_confidence(&members);
                self.make(PatternKind::Structural(summary), confidence, members)
            })
            .collect()
    }

    fn meta_patterns(&mut self, analysis: &TransformationAnalysis) -> Vec<Pattern> {
        let mut meta = Vec::new();
        for (&value, mapping) in &analysis.value_mappings {
            if let ValueMapping::Conditional { conditions } = mapping {
                let observation = MetaObservation::ConditionalMapping {
                    value,
                    conditions: conditions.clone(),
                };
                meta.push(self.make(
                    PatternKind::Meta(observation),
                    META_CONDITIONAL_CONFIDENCE,
                    Vec::new(),
                ));
            }
        }
        for mapping in &analysis.object_transforms.mappings {
            let transforms: BTreeSet<_> = mapping.matches.iter().map(|m| m.transform).collect();
            let observation = MetaObservation::ObjectTransform {
                value: mapping.input.value,
                size: mapping.input.size(),
                transforms: transforms.into_iter().collect(),
            };
            meta.push(self.make(
                PatternKind::Meta(observation),
                META_OBJECT_CONFIDENCE,
                Vec::new(),
            ));
        }
        meta
    }
}

// Different families, and every shared property key holds the same value
fn compatible(
    first: &Pattern,
    first_props: &Properties,
    second: &Pattern,
    second_props: &Properties,
) -> bool {
    first.family() != second.family()
        && first_props
            .iter()
            .all(|(key, value)| second_props.get(key).is_none_or(|other| other == value))
}

fn interaction(first: &Properties, second: &Properties) -> Interaction {
    if let (Some(a), Some(b)) = (first.get("position"), second.get("position")) {
        return if a == b {
            Interaction::Overlapping
        } else {
            Interaction::Separate
        };
    }
    if let (Some(a), Some(b)) = (first.get("value"), second.get("value")) {
        return if a == b {
            Interaction::SameValue
        } else {
            Interaction::DifferentValues
        };
    }
    Interaction::Independent
}

fn dependency(
    first: &Pattern,
    first_props: &Properties,
    second: &Pattern,
    second_props: &Properties,
) -> Dependency {
    let second_name = second.type_name();
    if first_props.values().any(|value| value.mentions(&second_name)) {
        return Dependency::FirstDependsOnSecond;
    }
    let first_name = first.type_name();
    if second_props.values().any(|value| value.mentions(&first_name)) {
        return Dependency::SecondDependsOnFirst;
    }
    Dependency::Independent
}

// Two composites are related when they share a sub-pattern or any property value
fn related(first: (&Pattern, &Properties), second: (&Pattern, &Properties)) -> bool {
    let shares_sub_pattern = first
        .0
        .sub_patterns
        .iter()
        .any(|a| second.0.sub_patterns.iter().any(|b| a.id == b.id));
    shares_sub_pattern
        || first
            .1
            .values()
            .any(|value| second.1.values().any(|other| other == value))
}

// Transitive closure over `related`, seeded in input order; every pattern is
// visited once and its properties are built once
fn group_related(patterns: &[Pattern]) -> Vec<Vec<usize>> {
    let properties: Vec<Properties> = patterns.iter().map(Pattern::properties).collect();
    let entries: Vec<(&Pattern, &Properties)> = patterns.iter().zip(&properties).collect();
    let mut grouped = vec![false; entries.len()];
    let mut groups = Vec::new();

    for seed in 0..entries.len() {
        if grouped.get(seed).copied().unwrap_or(true) {
            continue;
        }
        if let Some(flag) = grouped.get_mut(seed) {
            *flag = true;
        }

        let mut group = Vec::new();
        let mut queue = VecDeque::from([seed]);
        while let Some(current) = queue.pop_front() {
            group.push(current);
            let Some(&entry) = entries.get(current) else {
                continue;
            };
            for (index, &candidate) in entries.iter().enumerate() {
                let unvisited = grouped.get(index).is_some_and(|&flag| !flag);
                if unvisited && related(entry, candidate) {
                    if let Some(flag) = grouped.get_mut(index) {
                        *flag = true;
                    }
                    queue.push_back(index);
                }
            }
        }
        group.sort_unstable();
        groups.push(group);
    }
    groups
}

fn summarize_group(members: &[Pattern]) -> GroupSummary {
    let pattern_types = members.iter().map(Pattern::type_name).collect();
    let all_props: Vec<Properties> = members.iter().map(Pattern::properties).collect();

    let shared_properties = all_props.first().map_or_else(Properties::new, |first| {
        first
            .iter()
            .filter(|(key, value)| {
                all_props
                    .iter()
                    .all(|props| props.get(*key).is_some_and(|other| other == *value))
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    });

    GroupSummary {
        pattern_types,
        shared_properties,
    }
}

// Mean confidence, weighted by key overlap and penalized by group size
fn group_confidence(members: &[Pattern]) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    let mean = members.iter().map(|p| p.confidence).sum::<f64>() / members.len() as f64;

    let key_sets: Vec<BTreeSet<String>> = members
        .iter()
        .map(|p| p.properties().into_keys().collect())
        .collect();
    let all_keys: BTreeSet<&String> = key_sets.iter().flatten().collect();
    let shared_keys = all_keys
        .iter()
        .filter(|key| key_sets.iter().all(|set| set.contains(**key)))
        .count();
    let ratio = if all_keys.is_empty() {
        0.0
    } else {
        shared_keys as f64 / all_keys.len() as f64
    };

    let size_factor = 1.0 / (1.0 + (members.len() as f64).ln());
    (mean * 0.5f64.mul_add(ratio, 0.5) * size_factor).min(1.0)
}
