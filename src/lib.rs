//! # listvisor
//!
//! **Listvisor** is the state kernel of a product list with deep-linkable selection:
//! an event-sourced reducer with a feedback-controlled side-effect actuator.
//!
//! Several independent asynchronous inputs (catalog fetch, route parameters, a sibling
//! view's selection, manual calls) are merged into one ordered event stream, folded
//! into immutable [`State`] snapshots, and the snapshots drive an external effect
//! (navigation + peer sync) that can never feed itself back into an endless loop.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//!   │CatalogProvid.│  │ RouteParams  │  │SelectionSync │  │ Control::send│
//!   │ (fetch once) │  │ (deep links) │  │   (peers)    │  │ (manual port)│
//!   └──────┬───────┘  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘
//!          │ products/error  │ selectedId      │ selectedId      │ any kind
//!          ▼                 ▼                 ▼                 ▼
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                    Bus (mpsc, single ordered lane)                    │
//! └───────────────────────────────────┬───────────────────────────────────┘
//!                                     ▼
//!                     fold loop: state = reduce(&state, event)
//!                                     │
//!                     ┌───────────────┴────────────────┐
//!                     ▼                                ▼
//!          output (watch, replays latest)      FeedbackActuator
//!                     │                     (dedup on selected id; no bus handle)
//!                     ▼                                │
//!           ProductListView stream          Navigator / SelectionSync
//!                                                      │
//!                          echo of a pushed id ◄───────┘ (dropped by the source echo guard)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Control::builder(cfg) ─► build() ─► Uninitialized
//!     start(token) ─► Running: publish pageTitle, spawn fold loop + sources + actuator
//!     token.cancel() ─► Cancelled: stages exit, no more states, no more effects
//!     stopped().await ─► every stage joined (bounded by cfg.grace)
//! ```
//!
//! ## Features
//! | Area            | Description                                               | Key types                                  |
//! |-----------------|-----------------------------------------------------------|--------------------------------------------|
//! | **Reducer**     | Pure, total fold of events onto immutable state.          | [`reduce`], [`State`], [`Event`]           |
//! | **Control**     | Bus + fold loop + actuator behind `start`/`send`/`output`.| [`Control`], [`ControlBuilder`], [`Phase`] |
//! | **Sources**     | Catalog, route and peer adapters with failure isolation.  | [`CatalogProvider`], [`RouteParams`]       |
//! | **Effects**     | De-duplicated, open-loop navigation and peer sync.        | [`FeedbackActuator`], [`Navigator`]        |
//! | **Collaborators**| Watch-backed route cell and selection hub.               | [`RouteChannel`], [`SelectionHub`]         |
//! | **View**        | Display projection with the active row flag.              | [`ProductListView`]                        |
//! | **Errors**      | Typed errors for façade misuse and catalog failures.      | [`ControlError`], [`FetchError`]           |
//! | **Configuration**| Title, fetch-failure policy, shutdown grace.             | [`ControlConfig`]                          |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use listvisor::{CatalogFn, Control, ControlConfig, FetchError, Product, ProductId, RouteChannel, SelectionHub};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // The URL already points at product 2.
//!     let route = Arc::new(RouteChannel::deep_link(ProductId::new(2)));
//!     let hub = SelectionHub::new();
//!
//!     let control = Control::builder(ControlConfig::default())
//!         .with_catalog(CatalogFn::arc(|| async {
//!             Ok::<_, FetchError>(vec![
//!                 Product::new(1, "Widget", "Tools"),
//!                 Product::new(2, "Gadget", "Tools"),
//!             ])
//!         }))
//!         .with_route(route.clone())
//!         .with_navigator(route.clone())
//!         .with_selection(Arc::new(hub.handle()))
//!         .build();
//!
//!     let token = CancellationToken::new();
//!     control.start(token.clone())?;
//!
//!     let mut output = control.output();
//!     output
//!         .wait_for(|s| s.products.len() == 2 && s.selected_product_id == Some(ProductId::new(2)))
//!         .await?;
//!
//!     token.cancel();
//!     control.stopped().await?;
//!     Ok(())
//! }
//! ```
mod actuator;
mod config;
mod control;
mod error;
mod events;
mod sources;
mod state;
mod view;

// ---- Public re-exports ----

pub use actuator::{FeedbackActuator, Navigator};
pub use config::{ControlConfig, DEFAULT_TITLE};
pub use control::{Control, ControlBuilder, Phase};
pub use error::{ControlError, FetchError};
pub use events::{Envelope, Event, EventKind, Source, Value};
pub use sources::{
    CatalogFn, CatalogProvider, CatalogRef, RouteChannel, RouteParams, SelectionHandle,
    SelectionHub, SelectionSync, parse_product_id,
};
pub use state::{DEFAULT_PAGE_TITLE, InitValues, Product, ProductId, State, reduce};
pub use view::{ProductListView, ProductView};
