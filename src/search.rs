//! Client-side item filters.
//!
//! Two distinct rules are kept on purpose: the home list matches names only,
//! the search screen matches names or ids.

use crate::data::Item;

/// `lowered_needle` must already be lowercase.
fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// Items whose name contains `query`, ignoring case.
///
/// An empty query matches every item.
pub fn filter_by_name(items: &[Item], query: &str) -> Vec<Item> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| contains_ignore_case(&item.name, &needle))
        .cloned()
        .collect()
}

/// Items whose name or decimal id contains `query`, ignoring case.
///
/// A blank query returns the whole list.
pub fn filter_by_name_or_id(items: &[Item], query: &str) -> Vec<Item> {
    if query.trim().is_empty() {
        return items.to_vec();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            contains_ignore_case(&item.name, &needle) || item.id.to_string().contains(query)
        })
        .cloned()
        .collect()
}
