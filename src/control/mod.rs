//! The control façade: bus + reducer + feedback actuator behind one handle.
//!
//! ## Architecture
//! ```text
//!   send/dispatch ──┐
//!   catalog ────────┤
//!   route ──────────┼──► Bus ──► fold loop: state = reduce(&state, event)
//!   peer ───────────┘                         │
//!                                  ┌──────────┴───────────┐
//!                                  ▼                      ▼
//!                      output (watch, replay-latest)   ordered feed
//!                                  │                      │
//!                         views / subscribers      FeedbackActuator
//!                                                  (navigate + set_selection,
//!                                                   emits nothing)
//! ```
//!
//! ## Lifecycle
//! See [`Phase`]. `start` moves to `Running`, the cancellation token moves to
//! `Cancelled`; there is no way back.

mod builder;
mod core;
mod phase;

pub use builder::ControlBuilder;
pub use self::core::Control;
pub use phase::Phase;
