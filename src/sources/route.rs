//! # Route parameter source (deep links).
//!
//! [`RouteParams`] exposes the raw `id` path parameter of the current URL. Each value
//! is parsed with [`parse_product_id`] and published as `selectedProductId`; a missing
//! or malformed parameter becomes `None`, never an error.
//!
//! [`RouteChannel`] is an in-memory implementation: a `watch` cell holding the
//! current parameter. New streams start with the current value, so opening the
//! control on `/products/2` selects product `2` exactly as a click would. It is also a
//! [`Navigator`], which closes the URL loop:
//!
//! ```text
//! actuator ── navigate_to_product(2) ──► RouteChannel ("2")
//!                                              │
//!                      (echo of 2 → dropped by EchoGuard) ◄── route::run ┘
//! ```

use std::future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;

use crate::actuator::Navigator;
use crate::events::{Bus, Event, Source};
use crate::state::ProductId;

use super::echo::EchoGuard;

/// Stream of the currently addressed product id, as raw path parameter text.
pub trait RouteParams: Send + Sync + 'static {
    /// Returns a stream that yields the current parameter first, then every change.
    fn product_id_params(&self) -> BoxStream<'static, Option<String>>;
}

/// Parses a raw route parameter into a selection.
///
/// Missing, empty or non-numeric parameters resolve to `None`.
///
/// # Example
/// ```
/// use listvisor::{ProductId, parse_product_id};
///
/// assert_eq!(parse_product_id(Some("2")), Some(ProductId::new(2)));
/// assert_eq!(parse_product_id(Some("two")), None);
/// assert_eq!(parse_product_id(None), None);
/// ```
pub fn parse_product_id(raw: Option<&str>) -> Option<ProductId> {
    raw?.parse().ok()
}

/// Watch-backed route parameter cell.
#[derive(Clone, Debug)]
pub struct RouteChannel {
    tx: Arc<watch::Sender<Option<String>>>,
}

impl RouteChannel {
    /// Creates a channel addressing `initial` (`None` = list without selection).
    pub fn new(initial: Option<String>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Creates a channel that starts on the deep link for `id`.
    pub fn deep_link(id: ProductId) -> Self {
        Self::new(Some(id.to_string()))
    }

    /// Replaces the current parameter. Returns `false` if it was already `param`.
    pub fn set(&self, param: Option<String>) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == param {
                false
            } else {
                *current = param;
                true
            }
        })
    }

    /// Returns the current parameter.
    pub fn current(&self) -> Option<String> {
        self.tx.borrow().clone()
    }
}

impl Default for RouteChannel {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RouteParams for RouteChannel {
    fn product_id_params(&self) -> BoxStream<'static, Option<String>> {
        WatchStream::new(self.tx.subscribe()).boxed()
    }
}

#[async_trait]
impl Navigator for RouteChannel {
    async fn navigate_to_product(&self, id: ProductId) {
        self.set(Some(id.to_string()));
    }
}

/// Publishes `selectedProductId` for every route parameter until cancelled.
///
/// Parameters the actuator navigated to itself are dropped by `echo`.
pub(crate) async fn run(
    route: Arc<dyn RouteParams>,
    bus: Bus,
    token: CancellationToken,
    echo: Arc<EchoGuard>,
) {
    let events = route
        .product_id_params()
        .map(|raw| parse_product_id(raw.as_deref()))
        .filter(move |id| future::ready(echo.admit(*id)))
        .map(Event::SelectedProductId);
    super::pipe(Source::Route, events, bus, token).await;
}
