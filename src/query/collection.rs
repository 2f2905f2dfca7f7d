use super::condition::{Condition, all_hold};
use crate::context::DataContext;
use crate::node::Collection;
use crate::template::parse_date;
use chrono::{DateTime, FixedOffset};
use itertools::Itertools;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortDescriptor {
    #[serde(alias = "keyPath")]
    pub path: String,
    #[serde(default = "ascending_by_default")]
    pub ascending: bool,
}

fn ascending_by_default() -> bool {
    true
}

impl SortDescriptor {
    pub fn ascending(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ascending: true,
        }
    }

    pub fn descending(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ascending: false,
        }
    }
}

/// Pagination window: `show` items starting at the 1-based `start_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Limit {
    pub show: usize,
    pub start_at: usize,
}

impl Default for Limit {
    fn default() -> Self {
        Self {
            show: 100,
            start_at: 1,
        }
    }
}

impl Limit {
    fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        if self.start_at == 0 {
            return Vec::new();
        }
        items
            .into_iter()
            .skip(self.start_at - 1)
            .take(self.show)
            .collect()
    }
}

/// Filters, sorts and paginates `items`.
///
/// Each item is bound as the `data` namespace while its filters and sort keys
/// are evaluated; `url` and `user` come from `ctx`. Filters are a conjunction,
/// the sort is stable, and the limit applies last. A missing limit means
/// [`Limit::default`].
pub fn query_collection<'a>(
    items: &'a [JsonValue],
    filters: &[Condition],
    sort_descriptors: &[SortDescriptor],
    limit: Option<&Limit>,
    ctx: &DataContext<'_>,
) -> Vec<&'a JsonValue> {
    let filtered = items
        .iter()
        .filter(|item| all_hold(filters, &ctx.with_data(item)));

    let sorted: Vec<&JsonValue> = if sort_descriptors.is_empty() {
        filtered.collect()
    } else {
        filtered
            .map(|item| (sort_keys(item, sort_descriptors, ctx), item))
            .sorted_by(|(left, _), (right, _)| compare_keys(left, right, sort_descriptors))
            .map(|(_, item)| item)
            .collect()
    };

    limit.copied().unwrap_or_default().apply(sorted)
}

/// A sort key ordered first by kind, then by value within the kind:
/// missing < bool < number < date string < other string.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Missing,
    Bool(bool),
    Number(f64),
    Date(DateTime<FixedOffset>),
    Text(String),
}

impl SortKey {
    /// Null, arrays and objects have no ordering and sort with missing keys.
    fn from_value(value: Option<&JsonValue>) -> Self {
        match value {
            Some(JsonValue::Bool(flag)) => SortKey::Bool(*flag),
            Some(JsonValue::Number(number)) => number
                .as_f64()
                .map_or(SortKey::Missing, SortKey::Number),
            Some(JsonValue::String(text)) => match parse_date(text) {
                Ok(date) => SortKey::Date(date),
                Err(_) => SortKey::Text(text.clone()),
            },
            _ => SortKey::Missing,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Bool(_) => 1,
            SortKey::Number(_) => 2,
            SortKey::Date(_) => 3,
            SortKey::Text(_) => 4,
        }
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Bool(l), SortKey::Bool(r)) => l.cmp(r),
            (SortKey::Number(l), SortKey::Number(r)) => l.total_cmp(r),
            (SortKey::Date(l), SortKey::Date(r)) => l.cmp(r),
            (SortKey::Text(l), SortKey::Text(r)) => l.cmp(r),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn sort_keys(
    item: &JsonValue,
    sort_descriptors: &[SortDescriptor],
    ctx: &DataContext<'_>,
) -> Vec<SortKey> {
    let ctx = ctx.with_data(item);
    sort_descriptors
        .iter()
        .map(|descriptor| SortKey::from_value(ctx.resolve_path(&descriptor.path).as_deref()))
        .collect()
}

fn compare_keys(left: &[SortKey], right: &[SortKey], sort_descriptors: &[SortDescriptor]) -> Ordering {
    for ((left, right), descriptor) in left.iter().zip(right).zip(sort_descriptors) {
        let ordering = left.total_cmp(right);
        let ordering = if descriptor.ascending {
            ordering
        } else {
            ordering.reverse()
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

impl Collection {
    /// Resolves this collection's `keyPath` to an array and runs its own
    /// filters, sort descriptors and limit over it. A path that does not
    /// resolve to an array yields no items.
    pub fn items(&self, ctx: &DataContext<'_>) -> Vec<JsonValue> {
        let Some(value) = ctx.resolve_path(&self.key_path) else {
            tracing::debug!(key_path = %self.key_path, "collection key path did not resolve");
            return Vec::new();
        };
        let Some(items) = value.as_array() else {
            return Vec::new();
        };
        query_collection(
            items,
            &self.filters,
            &self.sort_descriptors,
            self.limit.as_ref(),
            ctx,
        )
        .into_iter()
        .cloned()
        .collect()
    }
}
