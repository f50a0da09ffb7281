//! # Catalog source.
//!
//! Runs one [`CatalogProvider::fetch_products`] and publishes its outcome:
//!
//! ```text
//! Ok(products)  ──► products(products)
//! Err(e)        ──► error(e.to_string())
//!                   [selectedProductId(None)]   (if clear_selection_on_fetch_error)
//! ```
//!
//! ## Rules
//! - A failed fetch never stops the bus or other sources.
//! - The fetch runs in its own task; cancellation **detaches** it instead of aborting
//!   it, and the late result is dropped.
//! - A panicking provider is reported as [`FetchError::Aborted`].

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::events::{Bus, Event, Source};
use crate::state::Product;

/// # Asynchronous product catalog.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use listvisor::{CatalogProvider, FetchError, Product};
///
/// struct Fixed;
///
/// #[async_trait]
/// impl CatalogProvider for Fixed {
///     async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
///         Ok(vec![Product::new(1, "Widget", "Tools")])
///     }
/// }
/// ```
#[async_trait]
pub trait CatalogProvider: Send + Sync + 'static {
    /// Fetches the full ordered catalog.
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError>;
}

/// Shared handle to a catalog provider.
pub type CatalogRef = Arc<dyn CatalogProvider>;

/// Function-backed catalog.
///
/// Wraps a closure that *creates* a new fetch future per call.
///
/// ## Example
/// ```rust
/// use listvisor::{CatalogFn, CatalogRef, FetchError, Product};
///
/// let catalog: CatalogRef = CatalogFn::arc(|| async {
///     Ok::<_, FetchError>(vec![Product::new(1, "Widget", "Tools")])
/// });
/// # let _ = catalog;
/// ```
pub struct CatalogFn<F> {
    f: F,
}

impl<F> CatalogFn<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the catalog and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> CatalogProvider for CatalogFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<Product>, FetchError>> + Send + 'static,
{
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        (self.f)().await
    }
}

/// Maps one fetch outcome to the events the catalog source publishes.
pub(crate) fn outcome_events(
    outcome: Result<Vec<Product>, FetchError>,
    clear_selection_on_error: bool,
) -> Vec<Event> {
    match outcome {
        Ok(products) => vec![Event::Products(products)],
        Err(e) if clear_selection_on_error => {
            vec![Event::Error(e.to_string()), Event::SelectedProductId(None)]
        }
        Err(e) => vec![Event::Error(e.to_string())],
    }
}

/// Fetches once and publishes the outcome, unless `token` fires first.
pub(crate) async fn run(
    catalog: CatalogRef,
    bus: Bus,
    token: CancellationToken,
    clear_selection_on_error: bool,
) {
    let fetch = tokio::spawn(async move { catalog.fetch_products().await });

    let outcome = tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("catalog fetch detached by cancellation");
            return;
        }
        joined = fetch => joined.unwrap_or_else(|e| Err(FetchError::Aborted { reason: e.to_string() })),
    };

    if let Err(e) = &outcome {
        warn!(label = e.as_label(), error = %e, "catalog fetch failed");
    }

    for event in outcome_events(outcome, clear_selection_on_error) {
        if token.is_cancelled() || !bus.publish(Source::Catalog, event) {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_maps_to_products() {
        let products = vec![Product::new(1, "Widget", "Tools")];
        assert_eq!(
            outcome_events(Ok(products.clone()), true),
            vec![Event::Products(products)]
        );
    }

    #[test]
    fn test_failure_keeps_selection_by_default() {
        assert_eq!(
            outcome_events(Err(FetchError::transport("network down")), false),
            vec![Event::Error("network down".into())]
        );
    }

    #[test]
    fn test_failure_can_clear_selection() {
        assert_eq!(
            outcome_events(Err(FetchError::transport("network down")), true),
            vec![
                Event::Error("network down".into()),
                Event::SelectedProductId(None)
            ]
        );
    }

    #[tokio::test]
    async fn test_panicking_provider_becomes_error_event() {
        let catalog: CatalogRef = CatalogFn::arc(|| async {
            if true {
                panic!("provider exploded");
            }
            Ok::<_, FetchError>(Vec::<Product>::new())
        });
        let (bus, mut rx) = Bus::new();
        run(catalog, bus, CancellationToken::new(), false).await;

        let env = rx.recv().await.expect("an error event");
        assert_eq!(env.source, Source::Catalog);
        match env.event {
            Event::Error(msg) => assert!(msg.starts_with("catalog fetch aborted"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancelled_fetch_publishes_nothing() {
        let catalog: CatalogRef = CatalogFn::arc(|| async {
            std::future::pending::<()>().await;
            Ok::<_, FetchError>(Vec::<Product>::new())
        });
        let (bus, mut rx) = Bus::new();
        let token = CancellationToken::new();
        token.cancel();
        run(catalog, bus, token, false).await;
        assert!(rx.try_recv().is_err());
    }
}
