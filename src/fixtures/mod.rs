//! Fixtures
//!
//! YAML product catalogs and shopping lists, laid out as
//! `<base>/products/<set>.yml` and `<base>/lists/<set>.yml`.

use std::{fs, path::PathBuf};

use rusty_money::iso::{BRL, Currency};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    items::Item,
    list::{ListError, ShoppingList},
    products::{Product, ProductCatalog},
};

pub mod lists;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Quantity that is not a number
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Barcode not found in the product catalog
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// List entry with neither a name nor a barcode (entry index)
    #[error("List entry {0} has neither a name nor a barcode")]
    MissingName(usize),

    /// No items loaded
    #[error("No items loaded; cannot create shopping list")]
    NoItems,

    /// Not enough items in fixture
    #[error("Not enough items in fixture, available: {available}, requested: {requested}")]
    NotEnoughItems {
        /// Number of items defined in the fixture
        available: usize,
        /// Number of items requested
        requested: usize,
    },

    /// Shopping list creation error
    #[error("Failed to create shopping list: {0}")]
    List(#[from] ListError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products loaded so far, keyed by barcode
    catalog: ProductCatalog,

    /// List entries in fixture order
    items: Vec<Item>,

    /// Currency of the loaded list
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: ProductCatalog::new(),
            items: Vec::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file into the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.products_path(name);
        let contents = fs::read_to_string(&file_path)?;
        let fixture: products::ProductsFixture = serde_norway::from_str(&contents)?;

        let count = fixture.products.len();

        for (barcode, product_fixture) in fixture.products {
            self.catalog.insert(product_fixture.into_product(barcode));
        }

        info!(path = %file_path.display(), count, "loaded products");

        Ok(self)
    }

    /// Load a shopping list from a YAML fixture file
    ///
    /// Barcode entries resolve against the products loaded so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, the currency is
    /// unknown, or an entry cannot be turned into an item.
    pub fn load_list(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("lists").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: lists::ListFixture = serde_norway::from_str(&contents)?;

        let currency = match fixture.currency.as_deref() {
            Some(code) => products::parse_currency(code)?,
            None => BRL,
        };

        let offset = self.items.len();

        for (idx, entry) in fixture.items.into_iter().enumerate() {
            let item = entry.into_item(offset + idx, &self.catalog)?;

            self.items.push(item);
        }

        self.currency = Some(currency);

        info!(
            path = %file_path.display(),
            count = self.items.len() - offset,
            currency = currency.iso_alpha_code,
            "loaded shopping list"
        );

        Ok(self)
    }

    /// Load a complete fixture set (catalog and list with the same name)
    ///
    /// The product catalog is optional; a set may consist of a list alone.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        if fixture.products_path(name).exists() {
            fixture.load_products(name)?;
        } else {
            debug!(set = name, "no product catalog for fixture set");
        }

        fixture.load_list(name)?;

        Ok(fixture)
    }

    /// Get a product by barcode
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, barcode: &str) -> Result<&Product, FixtureError> {
        self.catalog
            .lookup(barcode)
            .ok_or_else(|| FixtureError::ProductNotFound(barcode.to_string()))
    }

    /// Get the product catalog
    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Get all items
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Get the list currency, BRL until a list is loaded
    pub fn currency(&self) -> &'static Currency {
        self.currency.unwrap_or(BRL)
    }

    /// Create a shopping list from the loaded items
    ///
    /// # Errors
    ///
    /// Returns an error if no items are loaded, more items are requested than
    /// exist, or an item fails list validation.
    pub fn shopping_list(&self, n: Option<usize>) -> Result<ShoppingList, FixtureError> {
        if self.items.is_empty() {
            return Err(FixtureError::NoItems);
        }

        if let Some(n) = n
            && n > self.items.len()
        {
            return Err(FixtureError::NotEnoughItems {
                requested: n,
                available: self.items.len(),
            });
        }

        let items = self
            .items
            .iter()
            .take(n.unwrap_or(self.items.len()))
            .cloned();

        Ok(ShoppingList::with_items(items, self.currency())?)
    }

    fn products_path(&self, name: &str) -> PathBuf {
        self.base_path.join("products").join(format!("{name}.yml"))
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
