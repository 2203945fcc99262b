//! Generalization over groups of structurally similar patterns

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::hierarchy::pattern::{Pattern, Properties, PropertyValue};
use crate::io::configuration::{
    ABSTRACTION_CONSTRAINT_WEIGHT, ABSTRACTION_DIVERSITY_WEIGHT, ABSTRACTION_VARIABLE_WEIGHT,
    RELATION_EPSILON,
};

/// Arithmetic operation relating two variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `second = first + value`
    Add,
    /// `second = first * value`
    Multiply,
}

/// Constant relation between two variables across every instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Relation {
    /// Operation applied to the first variable
    pub operation: Operation,
    /// Constant operand
    pub value: f64,
}

/// Restriction on the values variables take
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
    /// A numeric variable stays within observed bounds
    Range {
        /// Variable name
        variable: String,
        /// Smallest observed value
        min: f64,
        /// Largest observed value
        max: f64,
    },
    /// Two numeric variables are related by a constant
    Relationship {
        /// Variable names, first then second
        variables: (String, String),
        /// Relations holding in every instance
        relations: Vec<Relation>,
    },
}

/// Template generalizing a group of concrete patterns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbstractPattern {
    /// `abstract_<family>`, or `abstract_mixed` when families differ
    pub template_type: String,
    /// Common property keys that take more than one value, with those values
    pub variables: BTreeMap<String, Vec<PropertyValue>>,
    /// Constraints on the variables
    pub constraints: Vec<Constraint>,
    /// Concrete patterns generalized
    pub instantiations: Vec<Pattern>,
    /// 0 for fully concrete, 1 for fully abstract
    pub abstraction_level: f64,
}

/// Group similar patterns and extract one abstraction per group
///
/// Patterns are similar when they share a level and sub-pattern count and at
/// least half of the smaller property key set. Groups are gathered around a
/// seed in input order; only groups with more than one member and at least one
/// common property yield an abstraction.
pub fn find_abstractions<'a>(
    patterns: impl IntoIterator<Item = &'a Pattern>,
) -> Vec<AbstractPattern> {
    let candidates: Vec<(&Pattern, Properties)> = patterns
        .into_iter()
        .map(|pattern| (pattern, pattern.properties()))
        .collect();

    group_similar(&candidates)
        .iter()
        .filter_map(|group| {
            let members: Vec<&(&Pattern, Properties)> =
                group.iter().filter_map(|&index| candidates.get(index)).collect();
            abstract_group(&members)
        })
        .collect()
}

fn similar(first: &(&Pattern, Properties), second: &(&Pattern, Properties)) -> bool {
    if first.0.level() != second.0.level()
        || first.0.sub_patterns.len() != second.0.sub_patterns.len()
    {
        return false;
    }
    let shared = first.1.keys().filter(|key| second.1.contains_key(*key)).count();
    let smaller = first.1.len().min(second.1.len());
    shared as f64 >= smaller as f64 * 0.5
}

fn group_similar(candidates: &[(&Pattern, Properties)]) -> Vec<Vec<usize>> {
    let mut taken = vec![false; candidates.len()];
    let mut groups = Vec::new();

    for (seed, seed_candidate) in candidates.iter().enumerate() {
        if taken.get(seed).copied().unwrap_or(true) {
            continue;
        }
        let mut group = vec![seed];
        for (index, candidate) in candidates.iter().enumerate().skip(seed + 1) {
            let free = taken.get(index).is_some_and(|&flag| !flag);
            if free && similar(seed_candidate, candidate) {
                group.push(index);
            }
        }
        for &index in &group {
            if let Some(flag) = taken.get_mut(index) {
                *flag = true;
            }
        }
        if group.len() > 1 {
            groups.push(group);
        }
    }
    groups
}

fn abstract_group(members: &[&(&Pattern, Properties)]) -> Option<AbstractPattern> {
    let (_, first_props) = members.first()?;
    let common: Vec<&String> = first_props
        .keys()
        .filter(|key| members.iter().all(|(_, props)| props.contains_key(*key)))
        .collect();
    if common.is_empty() {
        return None;
    }

    let mut variables: BTreeMap<String, Vec<PropertyValue>> = BTreeMap::new();
    for key in common {
        let mut values: Vec<PropertyValue> = Vec::new();
        for (_, props) in members {
            if let Some(value) = props.get(key).filter(|value| !values.contains(value)) {
                values.push(value.clone());
            }
        }
        if values.len() > 1 {
            variables.insert(key.clone(), values);
        }
    }

    let constraints = constraints(members, &variables);
    let abstraction_level =
        abstraction_level(members, first_props.len(), &variables, &constraints);

    let families: BTreeSet<&str> = members.iter().map(|(pattern, _)| pattern.family()).collect();
    let template_type = match (families.len(), families.first()) {
        (1, Some(family)) => format!("abstract_{family}"),
        _ => "abstract_mixed".to_string(),
    };

    Some(AbstractPattern {
        template_type,
        variables,
        constraints,
        instantiations: members.iter().map(|(pattern, _)| (*pattern).clone()).collect(),
        abstraction_level,
    })
}

fn constraints(
    members: &[&(&Pattern, Properties)],
    variables: &BTreeMap<String, Vec<PropertyValue>>,
) -> Vec<Constraint> {
    let mut constraints = Vec::new();

    for (name, values) in variables {
        let numbers: Option<Vec<f64>> = values.iter().map(PropertyValue::as_number).collect();
        if let Some(numbers) = numbers {
            let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
            let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            constraints.push(Constraint::Range {
                variable: name.clone(),
                min,
                max,
            });
        }
    }

    let names: Vec<&String> = variables.keys().collect();
    for (index, first) in names.iter().enumerate() {
        for second in names.iter().skip(index + 1) {
            let relations = relations_between(members, first, second);
            if !relations.is_empty() {
                constraints.push(Constraint::Relationship {
                    variables: ((*first).clone(), (*second).clone()),
                    relations,
                });
            }
        }
    }
    constraints
}

// Constant difference or ratio between two numeric properties across members
fn relations_between(
    members: &[&(&Pattern, Properties)],
    first: &str,
    second: &str,
) -> Vec<Relation> {
    let pairs: Option<Vec<(f64, f64)>> = members
        .iter()
        .map(|(_, props)| {
            let a = props.get(first)?.as_number()?;
            let b = props.get(second)?.as_number()?;
            Some((a, b))
        })
        .collect();
    let Some(pairs) = pairs else {
        return Vec::new();
    };

    let mut relations = Vec::new();
    let differences: Vec<f64> = pairs.iter().map(|(a, b)| b - a).collect();
    if let Some(value) = constant(&differences) {
        relations.push(Relation {
            operation: Operation::Add,
            value,
        });
    }
    let ratios: Vec<f64> = pairs
        .iter()
        .filter(|(a, _)| a.abs() > RELATION_EPSILON)
        .map(|(a, b)| b / a)
        .collect();
    if let Some(value) = constant(&ratios) {
        relations.push(Relation {
            operation: Operation::Multiply,
            value,
        });
    }
    relations
}

fn constant(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;
    values
        .iter()
        .all(|value| (value - first).abs() < RELATION_EPSILON)
        .then_some(first)
}

fn abstraction_level(
    members: &[&(&Pattern, Properties)],
    property_count: usize,
    variables: &BTreeMap<String, Vec<PropertyValue>>,
    constraints: &[Constraint],
) -> f64 {
    let var_ratio = if property_count == 0 {
        0.0
    } else {
        variables.len() as f64 / property_count as f64
    };

    let max_constraints = variables.len() * variables.len().saturating_sub(1) / 2;
    let constraint_ratio = if max_constraints == 0 {
        1.0
    } else {
        (constraints.len() as f64 / max_constraints as f64).min(1.0)
    };

    let types: BTreeSet<String> = members
        .iter()
        .map(|(pattern, _)| pattern.type_name())
        .collect();
    let diversity = if members.len() > 1 {
        (types.len() as f64 - 1.0) / members.len() as f64
    } else {
        0.0
    };

    let unconstrained = ABSTRACTION_CONSTRAINT_WEIGHT * (1.0 - constraint_ratio);
    let level = ABSTRACTION_DIVERSITY_WEIGHT.mul_add(
        diversity,
        ABSTRACTION_VARIABLE_WEIGHT.mul_add(var_ratio, unconstrained),
    );
    level.clamp(0.0, 1.0)
}
