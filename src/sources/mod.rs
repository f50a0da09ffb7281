//! Event sources: adapters from external collaborators onto the bus.
//!
//! ## Architecture
//! ```text
//! CatalogProvider ──► catalog::run ──► products | error [+ selectedProductId(None)] ─┐
//! RouteParams     ──► route::run   ──► selectedProductId(parse(param))               ├──► Bus
//! SelectionSync   ──► selection::run ─► selectedProductId(id)   (None dropped)       ┘
//! ```
//!
//! Every source runs as its own task under the control's cancellation token and stops
//! on whichever comes first: the token fires, its input ends, or the bus closes.
//! Failures are absorbed here; nothing a source does can stop another source.
//!
//! The route and peer sources read through an `EchoGuard` shared with the
//! feedback actuator, so the actuator's own pushes never come back as new selections.

pub(crate) mod catalog;
pub(crate) mod echo;
pub(crate) mod route;
pub(crate) mod selection;

use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::events::{Bus, Event, Source};

pub use catalog::{CatalogFn, CatalogProvider, CatalogRef};
pub use route::{RouteChannel, RouteParams, parse_product_id};
pub use selection::{SelectionHandle, SelectionHub, SelectionSync};

/// Forwards `events` onto the bus under `source` until the stream ends, the bus closes
/// or `token` fires.
pub(crate) async fn pipe<S>(source: Source, events: S, bus: Bus, token: CancellationToken)
where
    S: Stream<Item = Event> + Send,
{
    let mut events = std::pin::pin!(events);
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            next = events.next() => match next {
                Some(event) => {
                    if !bus.publish(source, event) {
                        break;
                    }
                }
                None => break,
            },
        }
    }
    debug!(source = source.as_label(), closed = bus.is_closed(), "source stopped");
}
