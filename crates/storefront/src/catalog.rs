//! The menu catalog.
//!
//! The catalog is a static, immutable list of sellable items, loaded once at
//! startup and never mutated at runtime. A built-in menu is compiled into the
//! binary; operators can point `FOODEXPRESS_CATALOG` at a JSON file to
//! replace it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use food_express_core::{MenuItemId, Money};

/// The built-in menu, used when no catalog file is configured.
const BUILTIN_MENU: &str = include_str!("../data/menu.json");

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    /// The catalog file is not valid JSON.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// The catalog violates an invariant (duplicate ids, negative price, ...).
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// A single sellable item on the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique positive identifier.
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    /// Non-negative unit price.
    pub price: Money,
    /// Free-form category label (e.g. "Dessert", "Mains").
    pub category: String,
    /// Image URI shown on the menu and in the cart.
    pub image: String,
}

/// Price band options offered by the menu filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    /// Price within `[low, high]`, inclusive.
    Between(Money, Money),
    /// Price at or above the given amount.
    AtLeast(Money),
}

impl PriceBand {
    /// Parse a filter value such as `"0-10"`, `"10-20"` or `"20+"`.
    ///
    /// Returns `None` for `"all"`, empty, or unparseable input, which the
    /// caller treats as "no price filter".
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value == "all" {
            return None;
        }

        if let Some(min) = value.strip_suffix('+') {
            let min = min.parse::<i64>().ok()?;
            return Some(Self::AtLeast(Money::from_units(min)));
        }

        let (low, high) = value.split_once('-')?;
        let low = low.parse::<i64>().ok()?;
        let high = high.parse::<i64>().ok()?;
        Some(Self::Between(
            Money::from_units(low),
            Money::from_units(high),
        ))
    }

    /// Whether a price falls inside the band.
    #[must_use]
    pub fn matches(&self, price: Money) -> bool {
        match *self {
            Self::Between(low, high) => price >= low && price <= high,
            Self::AtLeast(min) => price >= min,
        }
    }
}

/// Filter criteria for the menu page.
#[derive(Debug, Default, Clone)]
pub struct MenuFilter {
    /// Case-insensitive substring match against name or description.
    pub search: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Price band.
    pub price: Option<PriceBand>,
}

/// The immutable menu catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Build a catalog from a list of items, validating invariants.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` on duplicate ids, non-positive ids,
    /// or negative prices.
    pub fn from_items(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for item in &items {
            if item.id.as_i64() <= 0 {
                return Err(CatalogError::Invalid(format!(
                    "menu item '{}' has non-positive id {}",
                    item.name, item.id
                )));
            }
            if !seen.insert(item.id) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate menu item id {}",
                    item.id
                )));
            }
            if item.price.is_negative() {
                return Err(CatalogError::Invalid(format!(
                    "menu item '{}' has a negative price",
                    item.name
                )));
            }
        }

        Ok(Self { items })
    }

    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let items: Vec<MenuItem> = serde_json::from_str(&raw)?;
        Self::from_items(items)
    }

    /// Build the compiled-in default catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded menu is malformed; covered by a unit
    /// test so this cannot fail in a released binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        let items: Vec<MenuItem> = serde_json::from_str(BUILTIN_MENU)?;
        Self::from_items(items)
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items, in catalog order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Distinct categories, in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.items
            .iter()
            .map(|item| item.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Items matching all criteria of the filter.
    #[must_use]
    pub fn filter(&self, filter: &MenuFilter) -> Vec<&MenuItem> {
        let search = filter.search.as_deref().map(str::to_lowercase);

        self.items
            .iter()
            .filter(|item| {
                let matches_search = search.as_deref().is_none_or(|q| {
                    item.name.to_lowercase().contains(q)
                        || item.description.to_lowercase().contains(q)
                });
                let matches_category = filter
                    .category
                    .as_deref()
                    .is_none_or(|c| item.category == c);
                let matches_price = filter.price.is_none_or(|band| band.matches(item.price));

                matches_search && matches_category && matches_price
            })
            .collect()
    }
}
