//! # Event bus: ordered merge of every producer.
//!
//! [`Bus`] is a thin wrapper around an unbounded [`tokio::sync::mpsc`] channel. All
//! producers (manual port, catalog, route, peer selection) hold a clone of the sender;
//! the control's fold loop owns the only receiver. This single channel is the point
//! where concurrent producers are linearized.
//!
//! ## Architecture
//! ```text
//! Publishers (many):                 Consumer (one):
//!   Control::send ──┐
//!   catalog       ──┼──────► Bus ───────► fold loop ──► reduce() ──► output
//!   route         ──┤   (mpsc, unbounded)
//!   peer          ──┘
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never waits; the channel is unbounded.
//! - **Per-source FIFO**: envelopes sent from one task arrive in send order.
//! - **No persistence**: once the receiver is dropped, publishing returns `false`.

use tokio::sync::mpsc;

use super::event::{Envelope, Event, Source};

/// Multi-producer handle to the control's event stream.
///
/// ### Properties
/// - **Non-blocking**: `publish()` returns immediately.
/// - **Cloneable**: cheap to clone (internally holds an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl Bus {
    /// Creates a bus and the receiver the fold loop drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Wraps `event` in an [`Envelope`] and enqueues it.
    ///
    /// Returns `false` if the consumer is gone; the event is dropped in that case.
    pub fn publish(&self, source: Source, event: Event) -> bool {
        self.tx.send(Envelope::new(source, event)).is_ok()
    }

    /// True once the receiving side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ProductId;

    fn select(id: u32) -> Event {
        Event::SelectedProductId(Some(ProductId::new(id)))
    }

    #[tokio::test]
    async fn test_per_source_order_is_preserved() {
        let (bus, mut rx) = Bus::new();
        let route = bus.clone();
        let peer = bus.clone();

        let a = tokio::spawn(async move {
            for id in 0..50 {
                route.publish(Source::Route, select(id));
                tokio::task::yield_now().await;
            }
        });
        let b = tokio::spawn(async move {
            for id in 100..150 {
                peer.publish(Source::Peer, select(id));
                tokio::task::yield_now().await;
            }
        });
        a.await.unwrap();
        b.await.unwrap();
        drop(bus);

        let mut route_ids = Vec::new();
        let mut peer_ids = Vec::new();
        let mut last_seq = None;
        while let Some(env) = rx.recv().await {
            if let Some(prev) = last_seq {
                assert!(env.seq > prev, "sequence went backwards");
            }
            last_seq = Some(env.seq);

            let Event::SelectedProductId(Some(id)) = &env.event else {
                panic!("unexpected event {:?}", env.event);
            };
            match env.source {
                Source::Route => route_ids.push(id.get()),
                Source::Peer => peer_ids.push(id.get()),
                other => panic!("unexpected source {other:?}"),
            }
        }
        assert_eq!(route_ids, (0..50).collect::<Vec<_>>());
        assert_eq!(peer_ids, (100..150).collect::<Vec<_>>());
    }

    #[test]
    fn test_publish_after_receiver_dropped() {
        let (bus, rx) = Bus::new();
        assert!(bus.publish(Source::Manual, Event::Error("x".into())));
        drop(rx);
        assert!(bus.is_closed());
        assert!(!bus.publish(Source::Manual, Event::Error("y".into())));
    }
}
