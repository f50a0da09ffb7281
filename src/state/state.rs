//! # Screen state snapshot.
//!
//! [`State`] holds everything the product list needs to display. It is never mutated
//! in place: the [`reduce`](crate::reduce) function builds a new value for every event
//! and the control publishes it as `Arc<State>`, so older snapshots stay valid for
//! whoever still holds them.
//!
//! [`InitValues`] is the partial overlay carried by an `init` event.

use std::sync::Arc;

use super::product::{Product, ProductId};

/// Title shown before anything set one.
pub const DEFAULT_PAGE_TITLE: &str = "?";

/// Immutable snapshot of the product list screen.
///
/// ### Fields
/// - `page_title`: static display title
/// - `error`: last reported failure message (empty = no error)
/// - `products`: last successfully fetched catalog (shared, cheap to clone)
/// - `selected_product_id`: highlighted item (`None` = no selection)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub page_title: String,
    pub error: String,
    pub products: Arc<[Product]>,
    pub selected_product_id: Option<ProductId>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            page_title: DEFAULT_PAGE_TITLE.to_string(),
            error: String::new(),
            products: Arc::from(Vec::<Product>::new()),
            selected_product_id: None,
        }
    }
}

impl State {
    /// True if a failure message is currently displayed.
    #[inline]
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Returns the selected product if it is part of the current catalog.
    pub fn selected_product(&self) -> Option<&Product> {
        let id = self.selected_product_id?;
        self.products.iter().find(|p| p.id == id)
    }
}

/// Partial state carried by an `init` event.
///
/// Fields left as `None` keep their default value. `selected_product_id` is doubly
/// optional: `Some(None)` explicitly requests "no selection".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitValues {
    pub page_title: Option<String>,
    pub error: Option<String>,
    pub products: Option<Vec<Product>>,
    pub selected_product_id: Option<Option<ProductId>>,
}

impl InitValues {
    #[inline]
    pub fn with_page_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = Some(title.into());
        self
    }

    #[inline]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    #[inline]
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = Some(products);
        self
    }

    #[inline]
    pub fn with_selected(mut self, id: Option<ProductId>) -> Self {
        self.selected_product_id = Some(id);
        self
    }

    /// Applies the present fields on top of `base`.
    pub(crate) fn overlay(self, base: State) -> State {
        State {
            page_title: self.page_title.unwrap_or(base.page_title),
            error: self.error.unwrap_or(base.error),
            products: self.products.map(Arc::from).unwrap_or(base.products),
            selected_product_id: self
                .selected_product_id
                .unwrap_or(base.selected_product_id),
        }
    }
}
