//! State data model and the pure reducer.
//!
//! ## Contents
//! - [`Product`], [`ProductId`] catalog entities
//! - [`State`], [`InitValues`] immutable screen snapshot and `init` overlay
//! - [`reduce`] the fold function applied by the control's event loop

mod product;
mod reducer;
#[allow(clippy::module_inception)]
mod state;

pub use product::{Product, ProductId};
pub use reducer::reduce;
pub use state::{DEFAULT_PAGE_TITLE, InitValues, State};
