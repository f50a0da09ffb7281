//! # Events folded into the screen state.
//!
//! [`Event`] is a closed sum type over the known kinds, each carrying its own payload.
//! [`EventKind`] names those kinds with the string keys used by the manual input port
//! (`pageTitle`, `error`, `products`, `selectedProductId`, `init`).
//!
//! The string-keyed port goes through [`Event::from_parts`]: an unknown key, or a
//! [`Value`] that does not fit the key, becomes [`Event::Ignored`], which the reducer
//! treats as identity.
//!
//! On the bus every event travels inside an [`Envelope`] that records where it came
//! from ([`Source`]) and when.
//!
//! ## Ordering guarantees
//! Each envelope has a globally unique sequence number (`seq`) that increases
//! monotonically at publish time. Envelopes from one source keep their relative order;
//! nothing is promised across sources.
//!
//! ## Example
//! ```rust
//! use listvisor::{Event, EventKind, ProductId, Value};
//!
//! let ev = Event::from_parts("selectedProductId", Value::from(ProductId::new(3)));
//! assert_eq!(ev, Event::SelectedProductId(Some(ProductId::new(3))));
//! assert_eq!(ev.kind(), Some(EventKind::SelectedProductId));
//!
//! let unknown = Event::from_parts("reset", Value::from("now"));
//! assert!(unknown.is_ignored());
//! assert_eq!(unknown.kind_str(), "reset");
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::state::{InitValues, Product, ProductId};

/// Global sequence counter for envelope ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Known event kinds and their string keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `pageTitle`: replaces the display title.
    PageTitle,
    /// `error`: replaces the failure message.
    Error,
    /// `products`: replaces the catalog.
    Products,
    /// `selectedProductId`: replaces the selection.
    SelectedProductId,
    /// `init`: resets to defaults, then overlays the given fields.
    Init,
}

impl EventKind {
    /// Returns the string key of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PageTitle => "pageTitle",
            EventKind::Error => "error",
            EventKind::Products => "products",
            EventKind::SelectedProductId => "selectedProductId",
            EventKind::Init => "init",
        }
    }

    /// Looks up a kind by its exact string key.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "pageTitle" => Some(EventKind::PageTitle),
            "error" => Some(EventKind::Error),
            "products" => Some(EventKind::Products),
            "selectedProductId" => Some(EventKind::SelectedProductId),
            "init" => Some(EventKind::Init),
            _ => None,
        }
    }
}

/// Untyped payload accepted by the string-keyed input port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Products(Vec<Product>),
    ProductId(Option<ProductId>),
    Init(InitValues),
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<Product>> for Value {
    fn from(v: Vec<Product>) -> Self {
        Value::Products(v)
    }
}

impl From<ProductId> for Value {
    fn from(v: ProductId) -> Self {
        Value::ProductId(Some(v))
    }
}

impl From<Option<ProductId>> for Value {
    fn from(v: Option<ProductId>) -> Self {
        Value::ProductId(v)
    }
}

impl From<InitValues> for Value {
    fn from(v: InitValues) -> Self {
        Value::Init(v)
    }
}

/// One state-relevant occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PageTitle(String),
    Error(String),
    Products(Vec<Product>),
    SelectedProductId(Option<ProductId>),
    Init(InitValues),
    /// Unrecognised key or payload of the wrong shape; folds to the same state.
    Ignored { kind: Arc<str> },
}

impl Event {
    /// Builds an event from a string key and an untyped payload.
    pub fn from_parts(kind: &str, value: Value) -> Self {
        match (EventKind::parse(kind), value) {
            (Some(EventKind::PageTitle), Value::Text(v)) => Event::PageTitle(v),
            (Some(EventKind::Error), Value::Text(v)) => Event::Error(v),
            (Some(EventKind::Products), Value::Products(v)) => Event::Products(v),
            (Some(EventKind::SelectedProductId), Value::ProductId(v)) => {
                Event::SelectedProductId(v)
            }
            (Some(EventKind::Init), Value::Init(v)) => Event::Init(v),
            _ => Event::ignored(kind),
        }
    }

    /// Creates an [`Event::Ignored`] for `kind`.
    #[inline]
    pub fn ignored(kind: impl Into<Arc<str>>) -> Self {
        Event::Ignored { kind: kind.into() }
    }

    /// Returns the kind, or `None` for ignored events.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Event::PageTitle(_) => Some(EventKind::PageTitle),
            Event::Error(_) => Some(EventKind::Error),
            Event::Products(_) => Some(EventKind::Products),
            Event::SelectedProductId(_) => Some(EventKind::SelectedProductId),
            Event::Init(_) => Some(EventKind::Init),
            Event::Ignored { .. } => None,
        }
    }

    /// Returns the string key this event was sent with.
    pub fn kind_str(&self) -> &str {
        match self {
            Event::Ignored { kind } => &**kind,
            other => other.kind().map(|k| k.as_str()).unwrap_or_default(),
        }
    }

    #[inline]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Event::Ignored { .. })
    }
}

/// Origin of an event on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Injected through [`Control::send`](crate::Control::send) or `dispatch`.
    Manual,
    /// Catalog fetch outcome.
    Catalog,
    /// Route parameter change (deep link).
    Route,
    /// Selection made by a sibling view.
    Peer,
}

impl Source {
    /// Returns a short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Source::Manual => "manual",
            Source::Catalog => "catalog",
            Source::Route => "route",
            Source::Peer => "peer",
        }
    }
}

/// Event plus delivery metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - `source`: which producer published it
#[derive(Debug, Clone)]
pub struct Envelope {
    pub seq: u64,
    pub at: SystemTime,
    pub source: Source,
    pub event: Event,
}

impl Envelope {
    /// Wraps `event` with the next sequence number and current timestamp.
    pub fn new(source: Source, event: Event) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            source,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_keys_round_trip() {
        for kind in [
            EventKind::PageTitle,
            EventKind::Error,
            EventKind::Products,
            EventKind::SelectedProductId,
            EventKind::Init,
        ] {
            assert_eq!(EventKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_from_parts_maps_known_kinds() {
        assert_eq!(
            Event::from_parts("pageTitle", "Products".into()),
            Event::PageTitle("Products".into())
        );
        assert_eq!(
            Event::from_parts("selectedProductId", Value::ProductId(None)),
            Event::SelectedProductId(None)
        );
        assert_eq!(
            Event::from_parts("init", InitValues::default().into()),
            Event::Init(InitValues::default())
        );
    }

    #[test]
    fn test_from_parts_keeps_unknown_key() {
        let ev = Event::from_parts("selected", ProductId::new(1).into());
        assert_eq!(ev, Event::ignored("selected"));
        assert_eq!(ev.kind(), None);
        assert_eq!(ev.kind_str(), "selected");
    }

    #[test]
    fn test_envelope_seq_increases() {
        let a = Envelope::new(Source::Manual, Event::Error(String::new()));
        let b = Envelope::new(Source::Peer, Event::Error(String::new()));
        assert!(b.seq > a.seq);
    }
}
