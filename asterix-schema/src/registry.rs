//! `CategoryRegistry` (spec §4.7, component C7): an immutable, in-memory
//! lookup from (category, edition) to validated schema, built once by
//! [`crate::loader::load_all`] and then shared read-only across decodes.

use std::collections::HashMap;

use crate::model::Category;

#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: HashMap<u8, Category>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        CategoryRegistry { categories: HashMap::new() }
    }

    /// Builds a registry from already-validated categories. Later entries
    /// for the same category id replace earlier ones; callers that care
    /// should check [`Self::list_categories`] beforehand.
    pub fn from_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut map = HashMap::new();
        for category in categories {
            map.insert(category.id, category);
        }
        CategoryRegistry { categories: map }
    }

    /// Looks up a category by id, without selecting an edition.
    pub fn get(&self, category: u8) -> Option<&Category> {
        self.categories.get(&category)
    }

    /// Looks up one (category, edition) pair directly.
    pub fn get_specific(&self, category: u8, edition_tag: &str) -> Option<&crate::model::Edition> {
        self.categories.get(&category)?.edition(edition_tag)
    }

    /// Every category id currently registered, in ascending order.
    pub fn list_categories(&self) -> Vec<u8> {
        let mut ids: Vec<u8> = self.categories.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
