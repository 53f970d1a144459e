//! Shopping list

use std::cmp::Reverse;

use clap::ValueEnum;
use rustc_hash::FxHashSet;
use rusty_money::iso::{self, Currency};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::items::{Item, ItemError};

/// Errors related to shopping list edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    /// The item failed validation.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Another item already uses this identifier.
    #[error("an item with id {0} is already in the list")]
    DuplicateId(String),

    /// No item has this identifier.
    #[error("item {0} not found")]
    ItemNotFound(String),
}

/// Field a list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Insertion order
    #[default]
    None,

    /// Item name
    Name,

    /// Item category
    Category,
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending
    #[default]
    Asc,

    /// Descending
    Desc,
}

/// An ordered collection of items sharing one currency.
///
/// Every item in the list has passed [`Item::validate`], so the pricing
/// engine can rely on positive quantities.
#[derive(Debug, Clone)]
pub struct ShoppingList {
    items: Vec<Item>,
    currency: &'static Currency,
}

impl Default for ShoppingList {
    fn default() -> Self {
        Self::new(iso::BRL)
    }
}

impl ShoppingList {
    /// Create a new empty list.
    pub fn new(currency: &'static Currency) -> Self {
        ShoppingList {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new list with the given items.
    ///
    /// # Errors
    ///
    /// Returns a [`ListError`] if an item is invalid or two items share an id.
    pub fn with_items(
        items: impl IntoIterator<Item = Item>,
        currency: &'static Currency,
    ) -> Result<Self, ListError> {
        let mut list = Self::new(currency);
        list.add_all(items)?;

        Ok(list)
    }

    /// Append an item.
    ///
    /// # Errors
    ///
    /// Returns a [`ListError`] if the item is invalid or its id is taken.
    pub fn add(&mut self, item: Item) -> Result<(), ListError> {
        item.validate()?;

        if self.position(item.id()).is_some() {
            return Err(ListError::DuplicateId(item.id().to_string()));
        }

        debug!(id = item.id(), name = item.name(), "adding item");

        self.items.push(item);

        Ok(())
    }

    /// Append several items at once.
    ///
    /// Either every item is added or, on error, the list is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`ListError`] if any item is invalid or its id is taken,
    /// including by another item in the same batch.
    pub fn add_all(&mut self, items: impl IntoIterator<Item = Item>) -> Result<(), ListError> {
        let batch: Vec<Item> = items.into_iter().collect();

        {
            let mut ids: FxHashSet<&str> = self.items.iter().map(Item::id).collect();

            for item in &batch {
                item.validate()?;

                if !ids.insert(item.id()) {
                    return Err(ListError::DuplicateId(item.id().to_string()));
                }
            }
        }

        debug!(count = batch.len(), "adding items");

        self.items.extend(batch);

        Ok(())
    }

    /// Replace the item with the same id, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns a [`ListError`] if the item is invalid or not in the list.
    pub fn update(&mut self, item: Item) -> Result<(), ListError> {
        item.validate()?;

        let slot = self
            .items
            .iter_mut()
            .find(|existing| existing.id() == item.id())
            .ok_or_else(|| ListError::ItemNotFound(item.id().to_string()))?;

        debug!(id = item.id(), "updating item");

        *slot = item;

        Ok(())
    }

    /// Remove and return the item with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::ItemNotFound`] if no item has that id.
    pub fn remove(&mut self, id: &str) -> Result<Item, ListError> {
        let idx = self
            .position(id)
            .ok_or_else(|| ListError::ItemNotFound(id.to_string()))?;

        debug!(id, "removing item");

        Ok(self.items.remove(idx))
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        debug!(count = self.items.len(), "clearing list");

        self.items.clear();
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// The items in insertion order; the snapshot handed to the pricing engine.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate the items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// The items ordered for display.
    ///
    /// Names and categories compare by [`sort_key`], ignoring case and
    /// accents. The sort is stable: items with equal keys keep insertion order
    /// in both directions.
    pub fn sorted(&self, key: SortKey, direction: SortDirection) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.iter().collect();

        let key_of = |item: &Item| match key {
            SortKey::None => String::new(),
            SortKey::Name => sort_key(item.name()),
            SortKey::Category => sort_key(item.category()),
        };

        match direction {
            SortDirection::Asc => items.sort_by_cached_key(|item| key_of(item)),
            SortDirection::Desc => items.sort_by_cached_key(|item| Reverse(key_of(item))),
        }

        items
    }

    /// Get the number of items in the list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the list.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

/// Collation key for display ordering: accents stripped, lowercased.
///
/// "Água" sorts with the A's rather than after "Zebra".
pub fn sort_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
