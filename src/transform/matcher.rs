//! Pluggable correspondence between input and output objects
//!
//! The default [`AttributeScoreMatcher`] is greedy: when several candidates
//! share value, size and dimensions the first one wins, which can pair the
//! wrong objects. Callers needing a stricter assignment supply their own
//! [`ObjectMatcher`].

use crate::grid::Object;

/// Chooses the output object corresponding to an input object
pub trait ObjectMatcher {
    /// Best candidate for `object`, or `None` if nothing corresponds
    fn find_match<'a>(&self, object: &Object, candidates: &'a [Object]) -> Option<&'a Object>;
}

/// Scores candidates by how many of value, size and dimensions agree
///
/// The highest strictly positive score wins; ties keep the first candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeScoreMatcher;

impl AttributeScoreMatcher {
    /// Number of agreeing attributes between two objects (0 to 3)
    pub fn score(object: &Object, candidate: &Object) -> usize {
        usize::from(object.value == candidate.value)
            + usize::from(object.size() == candidate.size())
            + usize::from(object.dimensions() == candidate.dimensions())
    }
}

impl ObjectMatcher for AttributeScoreMatcher {
    fn find_match<'a>(&self, object: &Object, candidates: &'a [Object]) -> Option<&'a Object> {
        let mut best: Option<(&Object, usize)> = None;
        for candidate in candidates {
            let score = Self::score(object, candidate);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((candidate, score));
            }
        }
        best.map(|(candidate, _)| candidate)
    }
}
