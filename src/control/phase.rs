//! # Control lifecycle.
//!
//! ```text
//! Uninitialized ── start(token) ──► Running ── token.cancel() ──► Cancelled (terminal)
//! ```

/// Lifecycle phase of a [`Control`](crate::Control).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built, `start` not called yet. `send` is rejected with `NotStarted`.
    Uninitialized,
    /// Consuming events.
    Running,
    /// Cancellation token fired. `send` is rejected with `Cancelled`.
    Cancelled,
}

impl Phase {
    /// Returns a short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Phase::Uninitialized => "uninitialized",
            Phase::Running => "running",
            Phase::Cancelled => "cancelled",
        }
    }
}
