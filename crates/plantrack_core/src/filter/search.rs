//! Free-text search overlay applied after the cascade.

use crate::model::record::Filterable;

/// Keeps items where any of `keys` contains `query`, case-insensitively.
///
/// A blank query keeps every item. Input order is preserved.
pub fn search_records<'a, T, I>(items: I, query: &str, keys: &[&str]) -> Vec<&'a T>
where
    T: Filterable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.into_iter().collect();
    }

    items
        .into_iter()
        .filter(|item| {
            keys.iter().any(|key| {
                item.field_text(key)
                    .is_some_and(|value| value.to_lowercase().contains(&needle))
            })
        })
        .collect()
}
