//! Answer Set Value Object
//!
//! The answers a participant has entered so far, keyed by field id.
//! A missing key means the field was never answered (or was cleared).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::FieldId;

/// Answers of one registration session, iterated in ascending field id order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<FieldId, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: FieldId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    /// Store an answer, returning the previous one
    pub fn set(&mut self, id: FieldId, value: impl Into<String>) -> Option<String> {
        self.0.insert(id, value.into())
    }

    pub fn remove(&mut self, id: FieldId) -> Option<String> {
        self.0.remove(&id)
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.0.contains_key(&id)
    }

    /// True when the answer is absent, empty or whitespace only
    pub fn is_blank(&self, id: FieldId) -> bool {
        self.get(id).map_or(true, |v| v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.0.iter().map(|(id, v)| (*id, v.as_str()))
    }
}

impl<V: Into<String>> FromIterator<(FieldId, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (FieldId, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, v)| (id, v.into())).collect())
    }
}
