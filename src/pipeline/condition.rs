//! Condition vocabulary and condition-ordered sorting.

use crate::listing::VehicleRow;

/// Display order of listing conditions, best first.
pub const CONDITION_ORDER: [&str; 6] = ["new", "like new", "excellent", "good", "fair", "salvage"];

/// An ordered list of known conditions.
///
/// A condition's rank is its position in the list. Conditions the vocabulary
/// does not know all share the rank one past the last entry, so they sort after
/// every known condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionVocabulary {
    labels: Vec<String>,
}

impl Default for ConditionVocabulary {
    fn default() -> Self {
        Self::new(CONDITION_ORDER)
    }
}

impl ConditionVocabulary {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn rank(&self, condition: &str) -> usize {
        self.labels
            .iter()
            .position(|l| l == condition)
            .unwrap_or(self.labels.len())
    }

    /// Group-by key for `condition`: ordered by rank, then by label so that
    /// unknown conditions still group and sort deterministically.
    pub fn key(&self, condition: &str) -> ConditionKey {
        ConditionKey {
            rank: self.rank(condition),
            label: condition.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConditionKey {
    rank: usize,
    label: String,
}

impl ConditionKey {
    pub fn into_label(self) -> String {
        self.label
    }
}

/// Stable-sorts rows by condition rank. Rows with an unknown condition end up
/// last, in their original relative order.
pub fn order_by_condition(mut rows: Vec<VehicleRow>, vocabulary: &ConditionVocabulary) -> Vec<VehicleRow> {
    rows.sort_by_key(|row| vocabulary.rank(&row.condition));
    rows
}
