//! ListQuery - filtering and ordering of a counting list
//!
//! Pure read-side operation: text match against name/barcode/location,
//! optional exact category filter, then a stable sort placing pending
//! items before counted before reviewed (ties keep original order).

use crate::entities::CountItem;

/// Filter criteria for a counting list view
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    text: Option<String>,
    category: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring filter over name, barcode and location
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.text = Some(text);
        }
        self
    }

    /// Exact category filter
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn matches(&self, item: &CountItem) -> bool {
        if let Some(category) = &self.category {
            if !item.is_in_category(category) {
                return false;
            }
        }
        match &self.text {
            Some(text) => item.matches_text(text),
            None => true,
        }
    }

    /// Apply the filter and the status ordering; no side effects
    pub fn apply<'a>(&self, items: &'a [CountItem]) -> Vec<&'a CountItem> {
        let mut selected: Vec<&CountItem> =
            items.iter().filter(|item| self.matches(item)).collect();
        // sort_by_key is stable, so ties keep their original order
        selected.sort_by_key(|item| item.status());
        selected
    }
}
