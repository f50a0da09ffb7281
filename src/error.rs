//! Error types used by the control and its collaborators.
//!
//! This module defines two enums:
//!
//! - [`ControlError`]: misuse of the [`Control`](crate::Control) façade (wrong phase,
//!   shutdown overrun).
//! - [`FetchError`]: failure reported by a [`CatalogProvider`](crate::CatalogProvider).
//!
//! Neither reaches the reducer: fetch failures are turned into `error` events at the
//! source boundary, and façade errors are returned to the caller only.

use std::time::Duration;
use thiserror::Error;

/// # Errors returned by the control façade.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// `send`/`dispatch` called before [`Control::start`](crate::Control::start).
    #[error("control not started")]
    NotStarted,

    /// `start` called more than once.
    #[error("control already started")]
    AlreadyStarted,

    /// The cancellation token fired; the control accepts no more events.
    #[error("control cancelled")]
    Cancelled,

    /// Stages did not exit within the configured grace period after cancellation.
    #[error("stages still running after {grace:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },
}

impl ControlError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use listvisor::ControlError;
    ///
    /// assert_eq!(ControlError::Cancelled.as_label(), "control_cancelled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ControlError::NotStarted => "control_not_started",
            ControlError::AlreadyStarted => "control_already_started",
            ControlError::Cancelled => "control_cancelled",
            ControlError::GraceExceeded { .. } => "control_grace_exceeded",
        }
    }
}

/// # Errors produced by a catalog fetch.
///
/// The `Display` form of [`FetchError::Transport`] is the bare message: it is what ends
/// up in [`State::error`](crate::State::error).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure, described by the provider.
    #[error("{message}")]
    Transport {
        /// Human-readable description shown to the user.
        message: String,
    },

    /// The fetch task panicked before producing a result.
    #[error("catalog fetch aborted: {reason}")]
    Aborted {
        /// Panic or join failure description.
        reason: String,
    },
}

impl FetchError {
    /// Shorthand for [`FetchError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Transport {
            message: message.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use listvisor::FetchError;
    ///
    /// let err = FetchError::transport("network down");
    /// assert_eq!(err.as_label(), "fetch_transport");
    /// assert_eq!(err.to_string(), "network down");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "fetch_transport",
            FetchError::Aborted { .. } => "fetch_aborted",
        }
    }
}
