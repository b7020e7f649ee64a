/// Static menu catalog
///
/// The menu is a read-only table of categories and items. It is parsed once
/// at startup, either from the table embedded in the binary
/// (`data/menu.json`) or from a JSON file of the same shape supplied by the
/// operator.
///
/// # Format
///
/// ```json
/// {
///   "categories": [
///     {
///       "name": "Small Treats",
///       "items": [
///         { "id": 24, "name": "Cup Cakes", "description": "...", "price": 40, "image": "cupcakes.jpg" }
///       ]
///     }
///   ]
/// }
/// ```
///
/// # Example
///
/// ```
/// use bakery_shared::catalog::Catalog;
///
/// let catalog = Catalog::embedded().unwrap();
/// let cake = catalog.find_item(1).unwrap();
/// assert_eq!(cake.name, "Chocolate Cake");
/// ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Built-in menu table
const EMBEDDED_MENU: &str = include_str!("../data/menu.json");

/// Error type for catalog loading
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Menu file could not be read
    #[error("Failed to read menu file: {0}")]
    Io(#[from] std::io::Error),

    /// Menu JSON is malformed
    #[error("Failed to parse menu: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two items share an id
    #[error("Duplicate menu item id: {0}")]
    DuplicateId(u32),

    /// Item has a negative price
    #[error("Menu item {0} has a negative price")]
    NegativePrice(u32),
}

/// A purchasable menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    pub description: String,

    /// Unit price in whole currency units
    pub price: i64,

    /// Image filename under the static assets directory
    pub image: String,

    /// Add-ons (photo print, fondant, ...) modify a cake rather than stand alone
    #[serde(default)]
    pub is_addon: bool,
}

/// A named group of menu items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub name: String,

    #[serde(rename = "menu_items", alias = "items")]
    pub items: Vec<MenuItem>,
}

/// The full menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<MenuCategory>,
}

impl Catalog {
    /// Parses the menu embedded in the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_MENU)
    }

    /// Loads the menu from `path`, or the embedded menu when `path` is `None`
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading menu from file");
                let raw = std::fs::read_to_string(path)?;
                Self::from_json(&raw)?
            }
            None => Self::embedded()?,
        };

        info!(
            categories = catalog.categories.len(),
            items = catalog.items().count(),
            "Menu catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses and validates a menu document
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(raw)?;

        let mut seen = HashSet::new();
        for item in catalog.items() {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
            if item.price < 0 {
                return Err(CatalogError::NegativePrice(item.id));
            }
        }

        Ok(catalog)
    }

    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    /// Iterates every item across all categories, in menu order
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    pub fn find_item(&self, id: u32) -> Option<&MenuItem> {
        self.items().find(|item| item.id == id)
    }

    /// Items flagged as add-ons
    pub fn addons(&self) -> impl Iterator<Item = &MenuItem> {
        self.items().filter(|item| item.is_addon)
    }
}
