//! Category grouping and product filtering.
//!
//! Pure view-state derivation over in-memory lists. Grouping keys off the
//! category *name* string, not the identifier, matching how products
//! reference categories on the wire; fragile under category renames.

use crate::models::{Category, Product};

/// Bucket name for products whose category matches no known category.
pub const CATCH_ALL: &str = "Other";

/// A display bucket: a category name and the products under it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub name: &'a str,
    pub products: Vec<&'a Product>,
}

/// Bucket products by category name.
///
/// - Bucket order follows the input category list, with [`CATCH_ALL`] last.
/// - Product order within a bucket follows the input product list.
/// - Every product lands in exactly one bucket.
/// - Buckets that end up empty are dropped from the result.
#[must_use]
pub fn group_by_category<'a>(
    products: &'a [Product],
    categories: &'a [Category],
) -> Vec<CategoryGroup<'a>> {
    let mut groups: Vec<CategoryGroup<'a>> = categories
        .iter()
        .map(|category| CategoryGroup {
            name: category.name.as_str(),
            products: Vec::new(),
        })
        .collect();
    let mut catch_all = CategoryGroup {
        name: CATCH_ALL,
        products: Vec::new(),
    };

    for product in products {
        match groups
            .iter_mut()
            .find(|group| group.name == product.category)
        {
            Some(group) => group.products.push(product),
            None => catch_all.products.push(product),
        }
    }

    groups.push(catch_all);
    groups.retain(|group| !group.products.is_empty());
    groups
}

/// Per-category product counts for the categories overview.
///
/// Counts exact name matches only; uncategorized products are not counted.
#[must_use]
pub fn count_by_category<'a>(
    products: &[Product],
    categories: &'a [Category],
) -> Vec<(&'a str, usize)> {
    categories
        .iter()
        .map(|category| {
            let count = products
                .iter()
                .filter(|product| product.category == category.name)
                .count();
            (category.name.as_str(), count)
        })
        .collect()
}

/// Filter products by search text and category name.
///
/// Search is a case-insensitive substring match against name OR
/// description; category is an exact name match. Both filters compose by
/// logical AND. `None` (or an empty search string) means "no filter".
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    search: Option<&str>,
    category: Option<&str>,
) -> Vec<&'a Product> {
    let needle = search
        .map(str::to_lowercase)
        .filter(|needle| !needle.is_empty());

    products
        .iter()
        .filter(|product| {
            needle.as_deref().is_none_or(|needle| {
                product.name.to_lowercase().contains(needle)
                    || product.description.to_lowercase().contains(needle)
            })
        })
        .filter(|product| category.is_none_or(|category| product.category == category))
        .collect()
}
