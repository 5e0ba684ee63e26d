//! Store configuration.
//!
//! # Invariants
//! - `default_page_size` and `visible_page_window` are at least 1.

use crate::storage::STORAGE_KEY;

const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_VISIBLE_PAGE_WINDOW: usize = 5;

/// Tunables for one `EmployeeStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Storage key holding the JSON array of employees.
    pub storage_key: String,
    /// Page size used by callers that do not pick one.
    pub default_page_size: usize,
    /// Number of page links shown around the current page.
    pub visible_page_window: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            visible_page_window: DEFAULT_VISIBLE_PAGE_WINDOW,
        }
    }
}

impl StoreConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size.max(1);
        self
    }

    pub fn with_visible_page_window(mut self, window: usize) -> Self {
        self.visible_page_window = window.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;

    #[test]
    fn defaults_match_list_view() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "employees");
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.visible_page_window, 5);
    }

    #[test]
    fn builders_clamp_zero_to_one() {
        let config = StoreConfig::default()
            .with_default_page_size(0)
            .with_visible_page_window(0);
        assert_eq!(config.default_page_size, 1);
        assert_eq!(config.visible_page_window, 1);
    }
}
