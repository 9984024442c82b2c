//! Query-string assembly for list filters.

use crate::dates::{self, DateParam};

pub type QueryPairs = Vec<(&'static str, String)>;

/// Collects `(key, value)` pairs from optional filter fields. Absent fields
/// emit nothing; order of insertion is the order on the wire.
#[derive(Debug, Default)]
pub(crate) struct QueryBuilder {
    pairs: QueryPairs,
}

impl QueryBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn value<V: ToString>(mut self, key: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    pub(crate) fn flag(self, key: &'static str, value: Option<bool>) -> Self {
        self.value(key, value.map(|v| if v { "true" } else { "false" }))
    }

    pub(crate) fn timestamp(self, key: &'static str, value: Option<&DateParam>) -> Self {
        self.value(key, value.map(dates::to_timestamp))
    }

    pub(crate) fn date(self, key: &'static str, value: Option<&DateParam>) -> Self {
        self.value(key, value.map(dates::to_date))
    }

    pub(crate) fn build(self) -> QueryPairs {
        self.pairs
    }
}
