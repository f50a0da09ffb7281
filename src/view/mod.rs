//! Display projection of the reduced state.
//!
//! - [`ProductListView`], [`ProductView`]: display records with the `is_active` flag

mod projection;

pub use projection::{ProductListView, ProductView};
