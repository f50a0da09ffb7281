//! # Reducer: `(State, Event) -> State`.
//!
//! The only code path that produces a [`State`]. It is pure and total:
//! - each known event replaces exactly one field and copies the rest;
//! - `Init` resets to [`State::default`] and overlays the supplied fields;
//! - `Ignored` returns an equal state.
//!
//! There is no error channel; every event yields a state.

use crate::events::Event;

use super::state::State;

/// Folds one event onto `state`, returning the next snapshot.
pub fn reduce(state: &State, event: Event) -> State {
    match event {
        Event::Init(values) => values.overlay(State::default()),
        Event::PageTitle(page_title) => State {
            page_title,
            ..state.clone()
        },
        Event::Error(error) => State {
            error,
            ..state.clone()
        },
        Event::Products(products) => State {
            products: products.into(),
            ..state.clone()
        },
        Event::SelectedProductId(selected_product_id) => State {
            selected_product_id,
            ..state.clone()
        },
        Event::Ignored { .. } => state.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Value;
    use crate::state::{InitValues, Product, ProductId};

    fn populated() -> State {
        State {
            page_title: "Products".into(),
            error: "stale".into(),
            products: vec![
                Product::new(1, "Widget", "Tools"),
                Product::new(2, "Gadget", "Tools"),
            ]
            .into(),
            selected_product_id: Some(ProductId::new(2)),
        }
    }

    #[test]
    fn test_unknown_kind_is_identity() {
        let s = populated();
        for kind in ["", "products_", "PAGETITLE", "reset"] {
            let ev = Event::from_parts(kind, Value::from("x"));
            assert_eq!(reduce(&s, ev), s, "kind {kind:?} changed the state");
        }
        assert_eq!(reduce(&State::default(), Event::ignored("nope")), State::default());
    }

    #[test]
    fn test_mismatched_payload_is_identity() {
        let s = populated();
        let ev = Event::from_parts("products", Value::from("not a list"));
        assert_eq!(reduce(&s, ev), s);
    }

    #[test]
    fn test_page_title_leaves_other_fields() {
        let s = populated();
        let next = reduce(&s, Event::PageTitle("Catalog".into()));
        assert_eq!(next.page_title, "Catalog");
        assert_eq!(next.products, s.products);
        assert_eq!(next.error, s.error);
        assert_eq!(next.selected_product_id, s.selected_product_id);
    }

    #[test]
    fn test_each_kind_replaces_its_field() {
        let s = State::default();

        let s = reduce(&s, Event::Error("boom".into()));
        assert_eq!(s.error, "boom");

        let s = reduce(&s, Event::Products(vec![Product::new(9, "Bolt", "Parts")]));
        assert_eq!(s.products.len(), 1);
        assert_eq!(s.error, "boom");

        let s = reduce(&s, Event::SelectedProductId(Some(ProductId::new(9))));
        assert_eq!(s.selected_product_id, Some(ProductId::new(9)));
        assert_eq!(s.selected_product().map(|p| p.name.as_str()), Some("Bolt"));

        let s = reduce(&s, Event::SelectedProductId(None));
        assert_eq!(s.selected_product_id, None);
    }

    #[test]
    fn test_init_is_idempotent() {
        let init = Event::Init(
            InitValues::default()
                .with_page_title("Products")
                .with_selected(Some(ProductId::new(1))),
        );
        let once = reduce(&State::default(), init.clone());
        let twice = reduce(&once, init);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_init_resets_unspecified_fields() {
        let next = reduce(
            &populated(),
            Event::Init(InitValues::default().with_page_title("Fresh")),
        );
        assert_eq!(next.page_title, "Fresh");
        assert_eq!(next.error, "");
        assert!(next.products.is_empty());
        assert_eq!(next.selected_product_id, None);
    }

    #[test]
    fn test_previous_snapshot_is_untouched() {
        let before = populated();
        let kept = before.clone();
        let _after = reduce(&before, Event::Error(String::new()));
        assert_eq!(before, kept);
    }
}
