//! Control events: types and the ordered bus.
//!
//! This module groups the event **data model** and the **bus** that merges every
//! producer into the single stream consumed by the reducer.
//!
//! ## Contents
//! - [`Event`], [`EventKind`], [`Value`] tagged messages and the string-keyed payload
//! - [`Envelope`], [`Source`] delivery metadata
//! - [`Bus`] thin wrapper over `tokio::sync::mpsc`
//!
//! ## Quick reference
//! - **Publishers**: `Control::send`/`dispatch`, catalog source, route source,
//!   peer-selection source.
//! - **Consumer**: the fold loop inside `Control` (one per instance).
//! - **Not a publisher**: the feedback actuator; it never receives a [`Bus`] handle.

mod bus;
mod event;

pub(crate) use bus::Bus;
pub use event::{Envelope, Event, EventKind, Source, Value};
