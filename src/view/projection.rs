//! # State → display record.
//!
//! ```text
//! State { page_title, error, products, selected_product_id }
//!   └──► ProductListView { page_title, error, products: [ProductView { .., is_active }] }
//! ```
//!
//! `is_active` is true for the product whose id equals the selection. With no
//! selection every row is inactive.

use crate::state::{Product, ProductId, State};

/// One row of the product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub is_active: bool,
}

impl ProductView {
    fn project(product: &Product, selected: Option<ProductId>) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            is_active: selected == Some(product.id),
        }
    }

    /// CSS class for the row (`"active"` or none).
    pub fn class_name(&self) -> Option<&'static str> {
        self.is_active.then_some("active")
    }
}

/// Everything the list template renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListView {
    pub page_title: String,
    pub error: String,
    pub products: Vec<ProductView>,
}

impl From<&State> for ProductListView {
    fn from(state: &State) -> Self {
        Self {
            page_title: state.page_title.clone(),
            error: state.error.clone(),
            products: state
                .products
                .iter()
                .map(|p| ProductView::project(p, state.selected_product_id))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_selected_row_is_active() {
        let state = State {
            page_title: "Products".into(),
            products: vec![
                Product::new(1, "Widget", "Tools"),
                Product::new(2, "Gadget", "Tools"),
            ]
            .into(),
            selected_product_id: Some(ProductId::new(2)),
            ..State::default()
        };
        let view = ProductListView::from(&state);

        assert_eq!(view.page_title, "Products");
        let active: Vec<_> = view.products.iter().map(|p| p.is_active).collect();
        assert_eq!(active, vec![false, true]);
        assert_eq!(view.products[1].class_name(), Some("active"));
        assert_eq!(view.products[0].class_name(), None);
    }

    #[test]
    fn test_no_selection_means_no_active_row() {
        let state = State {
            products: vec![Product::new(0, "Zero", "Misc")].into(),
            ..State::default()
        };
        let view = ProductListView::from(&state);
        assert!(!view.products[0].is_active);
        assert_eq!(view.error, "");
    }
}
