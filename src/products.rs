//! Products
//!
//! A catalog of known products keyed by barcode, used to fill in shopping
//! list entries from a scanned or typed code.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::{
    items::Item,
    list::sort_key,
    markets::MarketMap,
    prices::UnitPrice,
    units::Unit,
};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product barcode
    pub barcode: String,

    /// Product name
    pub name: String,

    /// Unit of measure
    pub unit: Unit,

    /// Product category
    pub category: String,

    /// Unit price per market
    pub prices: MarketMap<UnitPrice>,
}

impl Product {
    /// Builds a shopping list entry for `quantity` units of this product.
    pub fn to_item(&self, id: impl Into<String>, quantity: Decimal) -> Item {
        Item::new(id, self.name.clone(), quantity)
            .with_unit(self.unit)
            .with_category(self.category.clone())
            .with_prices(self.prices)
            .with_barcode(self.barcode.clone())
    }
}

/// Products indexed by barcode.
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: SlotMap<ProductKey, Product>,
    barcodes: FxHashMap<String, ProductKey>,
}

impl ProductCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product, replacing any product with the same barcode.
    ///
    /// The barcode is stored trimmed, matching [`ProductCatalog::lookup`].
    pub fn insert(&mut self, mut product: Product) -> ProductKey {
        product.barcode = product.barcode.trim().to_string();

        if let Some(key) = self.barcodes.get(&product.barcode).copied()
            && let Some(existing) = self.products.get_mut(key)
        {
            *existing = product;
            return key;
        }

        let barcode = product.barcode.clone();
        let key = self.products.insert(product);
        self.barcodes.insert(barcode, key);

        key
    }

    /// Find a product by barcode.
    pub fn lookup(&self, barcode: &str) -> Option<&Product> {
        self.barcodes
            .get(barcode.trim())
            .and_then(|key| self.products.get(*key))
    }

    /// Remove a product by barcode, returning it if it was present.
    pub fn remove(&mut self, barcode: &str) -> Option<Product> {
        let key = self.barcodes.remove(barcode.trim())?;

        self.products.remove(key)
    }

    /// Get a product by key.
    pub fn get(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Iterate every product.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Iterate every product ordered by name, ignoring case and accents.
    /// Equal names fall back to barcode order.
    pub fn by_name(&self) -> impl Iterator<Item = &Product> {
        let mut products: Vec<&Product> = self.products.values().collect();

        products.sort_by_cached_key(|product| (sort_key(&product.name), product.barcode.clone()));

        products.into_iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
