//! Pattern values for the four-level hierarchy
//!
//! Each [`Pattern`] carries a typed [`PatternKind`] payload. The string-keyed
//! [`Pattern::properties`] view is derived from that payload on demand and is
//! what the composite, structural and abstraction stages compare; it is also
//! the `properties` object in the JSON form.

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::detection::progression::ProgressionFinding;
use crate::detection::repetition::RepetitionFinding;
use crate::detection::spatial::{DiagonalDirection, SpatialFinding};
use crate::detection::symmetry::SymmetryFinding;
use crate::grid::Value;
use crate::grid::geometry::PositionCategory;
use crate::transform::objects::ObjectTransform;

/// Hierarchy level, from raw regularities to patterns about transformations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternLevel {
    /// One detector finding
    Atomic,
    /// Two compatible atomic patterns
    Composite,
    /// A group of related composites
    Structural,
    /// Derived from transformation analysis
    Meta,
}

impl fmt::Display for PatternLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic => write!(f, "ATOMIC"),
            Self::Composite => write!(f, "COMPOSITE"),
            Self::Structural => write!(f, "STRUCTURAL"),
            Self::Meta => write!(f, "META"),
        }
    }
}

/// One value in the property view of a pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Integer
    Int(i64),
    /// Real number
    Float(f64),
    /// Label
    Text(String),
    /// Coordinate, dimensions or vector
    Pair(i64, i64),
    /// Ordered values
    List(Vec<PropertyValue>),
    /// Nested keyed values
    Record(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Numeric value, for integers and reals
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Check whether `needle` occurs in any text inside this value
    pub fn mentions(&self, needle: &str) -> bool {
        match self {
            Self::Text(text) => text.contains(needle),
            Self::List(items) => items.iter().any(|item| item.mentions(needle)),
            Self::Record(fields) => fields.values().any(|field| field.mentions(needle)),
            Self::Int(_) | Self::Float(_) | Self::Pair(..) => false,
        }
    }
}

impl From<usize> for PropertyValue {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Property view of a pattern
pub type Properties = BTreeMap<String, PropertyValue>;

/// How the two members of a composite interact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// Both have a position and it is the same
    Overlapping,
    /// Both have a position and they differ
    Separate,
    /// Both concern the same value
    SameValue,
    /// Both concern a value and they differ
    DifferentValues,
    /// No shared position or value
    Independent,
}

impl Interaction {
    /// Snake-case label
    pub const fn name(self) -> &'static str {
        match self {
            Self::Overlapping => "overlapping",
            Self::Separate => "separate",
            Self::SameValue => "same_value",
            Self::DifferentValues => "different_values",
            Self::Independent => "independent",
        }
    }
}

/// Whether one composite member refers to the other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dependency {
    /// The first member's properties name the second's type
    FirstDependsOnSecond,
    /// The second member's properties name the first's type
    SecondDependsOnFirst,
    /// Neither refers to the other
    Independent,
}

impl Dependency {
    /// Snake-case label
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstDependsOnSecond => "first_depends_on_second",
            Self::SecondDependsOnFirst => "second_depends_on_first",
            Self::Independent => "independent",
        }
    }
}

/// Relation between the two atomic members of a composite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeRelation {
    /// Type names of the two members
    pub components: [String; 2],
    /// Interaction kind
    pub interaction: Interaction,
    /// Dependency direction
    pub dependency: Dependency,
}

/// Summary of a group of related composites
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    /// Type names of every member
    pub pattern_types: Vec<String>,
    /// Properties every member holds with the same value
    pub shared_properties: Properties,
}

/// Observation about how a transformation behaves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaObservation {
    /// A value whose output depends on its border position
    ConditionalMapping {
        /// Input value
        value: Value,
        /// Output value per category
        conditions: BTreeMap<PositionCategory, Value>,
    },
    /// The transforms one input object undergoes
    ObjectTransform {
        /// Value of the input object
        value: Value,
        /// Size of the input object
        size: usize,
        /// Distinct candidate transforms
        transforms: Vec<ObjectTransform>,
    },
}

/// Typed payload of a pattern, one variant per family
#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    /// Reflection or rotational symmetry
    Symmetry(SymmetryFinding),
    /// Row or column progression
    Progression(ProgressionFinding),
    /// Block tiling
    Repetition(RepetitionFinding),
    /// Per-value arrangement
    Spatial(SpatialFinding),
    /// Pair of compatible atomic patterns
    Composite(CompositeRelation),
    /// Group of related composites
    Structural(GroupSummary),
    /// Transformation-level observation
    Meta(MetaObservation),
}

impl PatternKind {
    /// Family name, the first segment of the type name
    pub const fn family(&self) -> &'static str {
        match self {
            Self::Symmetry(_) => "symmetry",
            Self::Progression(_) => "progression",
            Self::Repetition(_) => "repetition",
            Self::Spatial(_) => "spatial",
            Self::Composite(_) => "composite",
            Self::Structural(_) => "structural",
            Self::Meta(_) => "meta",
        }
    }

    /// Level this kind of pattern lives on
    pub const fn level(&self) -> PatternLevel {
        match self {
            Self::Symmetry(_) | Self::Progression(_) | Self::Repetition(_) | Self::Spatial(_) => {
                PatternLevel::Atomic
            }
            Self::Composite(_) => PatternLevel::Composite,
            Self::Structural(_) => PatternLevel::Structural,
            Self::Meta(_) => PatternLevel::Meta,
        }
    }

    /// Full type name, `{family}_{subtype}`
    pub fn type_name(&self) -> String {
        let subtype = match self {
            Self::Symmetry(finding) => finding.subtype(),
            Self::Progression(finding) => finding.subtype().to_string(),
            Self::Repetition(finding) => finding.subtype().to_string(),
            Self::Spatial(finding) => finding.subtype().to_string(),
            Self::Composite(relation) => relation.components.join("_"),
            Self::Structural(_) => "pattern_group".to_string(),
            Self::Meta(MetaObservation::ConditionalMapping { .. }) => {
                "conditional_mapping".to_string()
            }
            Self::Meta(MetaObservation::ObjectTransform { .. }) => "object_transform".to_string(),
        };
        format!("{}_{subtype}", self.family())
    }

    /// Derived string-keyed property view
    pub fn properties(&self) -> Properties {
        let mut properties = Properties::new();
        let mut put = |key: &str, value: PropertyValue| {
            properties.insert(key.to_string(), value);
        };

        match self {
            Self::Symmetry(finding) => match finding {
                SymmetryFinding::HorizontalReflection { position }
                | SymmetryFinding::VerticalReflection { position } => {
                    put("position", (*position).into());
                }
                SymmetryFinding::Rotational { order } => put("order", (*order).into()),
            },
            Self::Progression(finding) => {
                put("line", PropertyValue::Text(finding.line().to_string()));
                match finding {
                    ProgressionFinding::Arithmetic { difference, .. } => {
                        put("difference", PropertyValue::Int(i64::from(*difference)));
                    }
                    ProgressionFinding::Geometric { ratio, .. } => {
                        put("ratio", PropertyValue::Float(*ratio));
                    }
                }
            }
            Self::Repetition(finding) => {
                put("block", block_property(&finding.block));
                put("block_size", pair(finding.block_size.0, finding.block_size.1));
                put("repetitions", finding.repetitions.into());
            }
            Self::Spatial(finding) => {
                put("value", finding.value().into());
                match finding {
                    SpatialFinding::LinearArrangement {
                        direction, count, ..
                    } => {
                        put("direction", PropertyValue::Pair(direction.0, direction.1));
                        put("count", (*count).into());
                    }
                    SpatialFinding::DiagonalPattern {
                        direction, count, ..
                    } => {
                        let label = match direction {
                            DiagonalDirection::Positive => "positive",
                            DiagonalDirection::Negative => "negative",
                        };
                        put("direction", label.into());
                        put("count", (*count).into());
                    }
                    SpatialFinding::RectangularArrangement {
                        dimensions,
                        position,
                        ..
                    } => {
                        put("dimensions", pair(dimensions.0, dimensions.1));
                        put("position", pair(position.row, position.col));
                    }
                }
                put("regularity", PropertyValue::Float(finding.regularity()));
            }
            Self::Composite(relation) => {
                put(
                    "components",
                    PropertyValue::List(
                        relation
                            .components
                            .iter()
                            .map(|name| PropertyValue::Text(name.clone()))
                            .collect(),
                    ),
                );
                let mut record = Properties::new();
                record.insert("type".to_string(), "co-occurrence".into());
                record.insert(
                    "interaction".to_string(),
                    relation.interaction.name().into(),
                );
                record.insert("dependency".to_string(), relation.dependency.name().into());
                put("relationship", PropertyValue::Record(record));
            }
            Self::Structural(summary) => {
                put("type", "pattern_group".into());
                put(
                    "pattern_types",
                    PropertyValue::List(
                        summary
                            .pattern_types
                            .iter()
                            .map(|name| PropertyValue::Text(name.clone()))
                            .collect(),
                    ),
                );
                put(
                    "shared_properties",
                    PropertyValue::Record(summary.shared_properties.clone()),
                );
            }
            Self::Meta(MetaObservation::ConditionalMapping { value, conditions }) => {
                put("value", (*value).into());
                put(
                    "conditions",
                    PropertyValue::Record(
                        conditions
                            .iter()
                            .map(|(category, out)| (category.name().to_string(), (*out).into()))
                            .collect(),
                    ),
                );
            }
            Self::Meta(MetaObservation::ObjectTransform {
                value,
                size,
                transforms,
            }) => {
                put("value", (*value).into());
                put("size", (*size).into());
                put(
                    "transforms",
                    PropertyValue::List(transforms.iter().map(transform_property).collect()),
                );
            }
        }
        properties
    }
}

fn pair(first: usize, second: usize) -> PropertyValue {
    PropertyValue::Pair(first as i64, second as i64)
}

fn block_property(block: &[Vec<Value>]) -> PropertyValue {
    PropertyValue::List(
        block
            .iter()
            .map(|row| PropertyValue::List(row.iter().map(|&v| v.into()).collect()))
            .collect(),
    )
}

fn transform_property(transform: &ObjectTransform) -> PropertyValue {
    let mut record = Properties::new();
    record.insert("type".to_string(), transform.kind().into());
    match *transform {
        ObjectTransform::ValueChange { from, to } => {
            record.insert("from".to_string(), from.into());
            record.insert("to".to_string(), to.into());
        }
        ObjectTransform::Scale { factor } => {
            record.insert("factor".to_string(), factor.into());
        }
        ObjectTransform::Rotation { degrees } => {
            record.insert(
                "degrees".to_string(),
                PropertyValue::Int(i64::from(degrees.degrees())),
            );
        }
        ObjectTransform::Flip { axis } => {
            record.insert("axis".to_string(), PropertyValue::Text(axis.to_string()));
        }
        ObjectTransform::None | ObjectTransform::Complex => {}
    }
    PropertyValue::Record(record)
}

/// A detected regularity with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    /// Identifier, unique within one hierarchy
    pub id: usize,
    /// Typed payload
    pub kind: PatternKind,
    /// Prioritization signal in [0, 1]
    pub confidence: f64,
    /// Patterns this one was built from (empty for atomic patterns)
    pub sub_patterns: Vec<Pattern>,
}

impl Pattern {
    /// Hierarchy level
    pub const fn level(&self) -> PatternLevel {
        self.kind.level()
    }

    /// Full type name
    pub fn type_name(&self) -> String {
        self.kind.type_name()
    }

    /// Family name
    pub const fn family(&self) -> &'static str {
        self.kind.family()
    }

    /// Derived property view
    pub fn properties(&self) -> Properties {
        self.kind.properties()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Pattern", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.type_name())?;
        state.serialize_field("level", &self.level())?;
        state.serialize_field("properties", &self.properties())?;
        state.serialize_field("confidence", &self.confidence)?;
        state.serialize_field("sub_patterns", &self.sub_patterns)?;
        state.end()
    }
}
