//! # Peer selection: shared selection between sibling views.
//!
//! [`SelectionSync`] is the collaborator contract: a stream of externally changed
//! selections plus a way to publish this control's selection to peers.
//!
//! [`SelectionHub`] is the in-crate implementation. It owns the single source of truth
//! (a `watch` cell); every consumer gets a [`SelectionHandle`] that can only
//! **subscribe** and **publish**. Nobody mutates a shared field directly.
//!
//! ```text
//!              ┌──────────── SelectionHub (watch cell) ────────────┐
//!              │                                                   │
//!   handle A: publish(id) / subscribe()          handle B: publish(id) / subscribe()
//!   (this control)                               (sibling detail view)
//! ```
//!
//! ## Rules
//! - Publishing the current value is a no-op, so an actuator echo does not wake peers.
//! - `None` values in the peer stream are dropped before they reach the bus.

use std::future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event, Source};
use crate::state::ProductId;

use super::echo::EchoGuard;

/// Selection synchronization contract.
#[async_trait]
pub trait SelectionSync: Send + Sync + 'static {
    /// Stream of selections made elsewhere (current value first).
    fn changes(&self) -> BoxStream<'static, Option<ProductId>>;

    /// Publishes this component's selection to peers.
    async fn set_selection(&self, id: ProductId);
}

/// Owner of the shared selection.
#[derive(Debug)]
pub struct SelectionHub {
    tx: Arc<watch::Sender<Option<ProductId>>>,
}

impl SelectionHub {
    /// Creates a hub with no selection.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Returns a subscribe/publish capability for one consumer.
    pub fn handle(&self) -> SelectionHandle {
        SelectionHandle {
            tx: Arc::clone(&self.tx),
        }
    }

    /// Returns the current shared selection.
    pub fn current(&self) -> Option<ProductId> {
        *self.tx.borrow()
    }
}

impl Default for SelectionHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Consumer-side capability of a [`SelectionHub`].
#[derive(Clone, Debug)]
pub struct SelectionHandle {
    tx: Arc<watch::Sender<Option<ProductId>>>,
}

impl SelectionHandle {
    /// Read subscription; the receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<Option<ProductId>> {
        self.tx.subscribe()
    }

    /// Publishes `id`. Returns `false` if it was already the shared selection.
    pub fn publish(&self, id: Option<ProductId>) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == id {
                false
            } else {
                *current = id;
                true
            }
        })
    }
}

#[async_trait]
impl SelectionSync for SelectionHandle {
    fn changes(&self) -> BoxStream<'static, Option<ProductId>> {
        WatchStream::new(self.subscribe()).boxed()
    }

    async fn set_selection(&self, id: ProductId) {
        self.publish(Some(id));
    }
}

/// Publishes `selectedProductId` for every present peer selection until cancelled.
///
/// Selections the actuator published itself are dropped by `echo`.
pub(crate) async fn run(
    selection: Arc<dyn SelectionSync>,
    bus: Bus,
    token: CancellationToken,
    echo: Arc<EchoGuard>,
) {
    let events = selection.changes().filter_map(move |id| {
        let admitted = id.filter(|id| echo.admit(Some(*id)));
        future::ready(admitted.map(|id| Event::SelectedProductId(Some(id))))
    });
    super::pipe(Source::Peer, events, bus, token).await;
}
