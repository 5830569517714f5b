//! Facet Summaries
//!
//! Facet lists shown alongside a product listing, computed over the collections, variant colors,
//! designers and categories that match the listing's filters.

use std::cmp::Reverse;

use rustc_hash::{FxHashMap, FxHashSet};

/// Facet-relevant fields of a matching collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionFacts {
    /// Collection name.
    pub name: String,

    /// Season label.
    pub season: Option<String>,

    /// Collection year.
    pub year: Option<i32>,

    /// Order type, such as pre-order or in-stock.
    pub order_type: Option<String>,
}

/// A season label paired with its year. Collections without a year report `0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeasonYear {
    /// Season label.
    pub season: String,

    /// Year, `0` when unknown.
    pub year: i32,
}

/// A designer with products in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DesignerFacet {
    /// Designer name.
    pub name: String,

    /// Designer slug.
    pub slug: String,
}

/// A vertical with the categories of the listing's products under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerticalFacet {
    /// Vertical name.
    pub name: String,

    /// Category names, in input order.
    pub categories: Vec<String>,
}

/// Every facet list for a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSummaries {
    /// Matching collections, newest first.
    pub collections: Vec<CollectionFacts>,

    /// Distinct variant color names.
    pub colors: Vec<String>,

    /// Distinct collection order types.
    pub order_types: Vec<String>,

    /// Distinct seasons, newest year first.
    pub seasons: Vec<SeasonYear>,

    /// Distinct designers.
    pub designers: Vec<DesignerFacet>,

    /// Verticals and their categories.
    pub category_tree: Vec<VerticalFacet>,
}

impl FacetSummaries {
    /// Build facet lists from matching rows, each list in first-seen order except seasons.
    ///
    /// `collections` is expected newest first.
    pub fn from_rows(
        collections: Vec<CollectionFacts>,
        colors: impl IntoIterator<Item = String>,
        designers: impl IntoIterator<Item = DesignerFacet>,
    ) -> Self {
        Self {
            colors: distinct(colors),
            order_types: order_types(&collections),
            seasons: seasons(&collections),
            designers: distinct(designers),
            collections,
            category_tree: Vec::new(),
        }
    }

    /// Attach the category tree built from (vertical, category) pairs.
    #[must_use]
    pub fn with_category_tree(
        mut self,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.category_tree = category_tree(pairs);

        self
    }
}

/// Group (vertical, category) pairs into a tree, keeping the first-seen order of verticals and of
/// categories within each vertical. Repeated pairs appear once.
pub fn category_tree(pairs: impl IntoIterator<Item = (String, String)>) -> Vec<VerticalFacet> {
    let mut tree: Vec<VerticalFacet> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for (vertical, category) in distinct(pairs) {
        let position = *index.entry(vertical.clone()).or_insert_with(|| {
            tree.push(VerticalFacet {
                name: vertical,
                categories: Vec::new(),
            });

            tree.len() - 1
        });

        if let Some(branch) = tree.get_mut(position) {
            branch.categories.push(category);
        }
    }

    tree
}

/// Remove duplicates, keeping the first occurrence of each value.
pub fn distinct<T>(values: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Clone + Eq + std::hash::Hash,
{
    let mut seen = FxHashSet::default();

    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Distinct non-blank order types in encounter order.
pub fn order_types(collections: &[CollectionFacts]) -> Vec<String> {
    distinct(
        collections
            .iter()
            .filter_map(|collection| collection.order_type.as_deref())
            .filter(|order_type| !order_type.trim().is_empty())
            .map(str::to_string),
    )
}

/// Distinct (season, year) pairs sorted by year descending.
///
/// The sort is stable, so pairs sharing a year keep encounter order.
pub fn seasons(collections: &[CollectionFacts]) -> Vec<SeasonYear> {
    let mut seasons = distinct(collections.iter().filter_map(|collection| {
        collection.season.as_ref().map(|season| SeasonYear {
            season: season.clone(),
            year: collection.year.unwrap_or(0),
        })
    }));

    seasons.sort_by_key(|season| Reverse(season.year));

    seasons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(season: Option<&str>, year: Option<i32>, order_type: Option<&str>) -> CollectionFacts {
        CollectionFacts {
            name: format!("{season:?} {year:?}"),
            season: season.map(str::to_string),
            year,
            order_type: order_type.map(str::to_string),
        }
    }

    #[test]
    fn seasons_are_distinct_and_newest_first() {
        let collections = [
            collection(Some("FW"), Some(2023), None),
            collection(Some("SS"), Some(2025), None),
            collection(Some("Resort"), Some(2024), None),
            collection(Some("FW"), Some(2025), None),
            collection(Some("SS"), Some(2025), None),
        ];

        let seasons: Vec<(String, i32)> = seasons(&collections)
            .into_iter()
            .map(|season| (season.season, season.year))
            .collect();

        assert_eq!(
            seasons,
            vec![
                ("SS".to_string(), 2025),
                ("FW".to_string(), 2025),
                ("Resort".to_string(), 2024),
                ("FW".to_string(), 2023),
            ]
        );
    }

    #[test]
    fn seasons_without_year_report_zero_and_sort_last() {
        let collections = [
            collection(Some("Capsule"), None, None),
            collection(Some("SS"), Some(2024), None),
            collection(None, Some(2026), None),
        ];

        let seasons = seasons(&collections);

        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons.last().map(|season| season.year), Some(0));
    }

    #[test]
    fn order_types_keep_encounter_order() {
        let collections = [
            collection(None, None, Some("in-stock")),
            collection(None, None, Some("pre-order")),
            collection(None, None, Some("in-stock")),
            collection(None, None, Some("")),
            collection(None, None, None),
        ];

        assert_eq!(order_types(&collections), vec!["in-stock", "pre-order"]);
    }

    #[test]
    fn category_tree_groups_categories_under_verticals() {
        let pairs = [
            ("Women", "Outerwear"),
            ("Men", "Shoes"),
            ("Women", "Knitwear"),
            ("Women", "Outerwear"),
            ("Men", "Outerwear"),
        ]
        .map(|(vertical, category)| (vertical.to_string(), category.to_string()));

        let tree = category_tree(pairs);

        assert_eq!(
            tree,
            vec![
                VerticalFacet {
                    name: "Women".to_string(),
                    categories: vec!["Outerwear".to_string(), "Knitwear".to_string()],
                },
                VerticalFacet {
                    name: "Men".to_string(),
                    categories: vec!["Shoes".to_string(), "Outerwear".to_string()],
                },
            ]
        );
    }

    #[test]
    fn from_rows_dedupes_colors_and_designers() {
        let atelier = DesignerFacet {
            name: "Atelier".to_string(),
            slug: "atelier".to_string(),
        };

        let summaries = FacetSummaries::from_rows(
            Vec::new(),
            ["Black", "Navy", "Black"].map(str::to_string),
            [atelier.clone(), atelier.clone()],
        );

        assert_eq!(summaries.colors, vec!["Black", "Navy"]);
        assert_eq!(summaries.designers, vec![atelier]);
        assert!(summaries.seasons.is_empty());
        assert!(summaries.order_types.is_empty());
        assert!(summaries.category_tree.is_empty());
    }
}
