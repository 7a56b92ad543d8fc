//! Free-text catalog search.

use std::borrow::Cow;

use crate::product::Product;

/// Products whose description contains `query`, ignoring case.
///
/// An empty query returns the catalog itself (borrowed, not copied). Matching
/// is a plain substring test with no tokenizing or ranking; relative order is
/// preserved.
pub fn filter<'a>(catalog: &'a [Product], query: &str) -> Cow<'a, [Product]> {
    if query.is_empty() {
        return Cow::Borrowed(catalog);
    }

    let needle = query.to_lowercase();
    Cow::Owned(
        catalog
            .iter()
            .filter(|product| product.description().to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}
