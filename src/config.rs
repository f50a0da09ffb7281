//! # Control configuration.
//!
//! Provides [`ControlConfig`], the settings handed to
//! [`Control::builder`](crate::Control::builder).
//!
//! ## Sentinel values
//! - `grace = 0s` → [`Control::stopped`](crate::Control::stopped) waits without bound

use std::time::Duration;

/// Title published as the first event after `start`.
pub const DEFAULT_TITLE: &str = "Products";

/// Settings for one [`Control`](crate::Control) instance.
///
/// ## Field semantics
/// - `page_title`: published as a `pageTitle` event right after `start`
/// - `clear_selection_on_fetch_error`: on catalog failure also publish
///   `selectedProductId(None)` after the `error` event
/// - `grace`: maximum wait in `stopped()` for stages to exit (`0s` = unbounded)
#[derive(Clone, Debug)]
pub struct ControlConfig {
    /// Display title set on start.
    pub page_title: String,

    /// Whether a failed catalog fetch also drops the current selection.
    ///
    /// - `false` (default): the selection survives; only `error` changes
    /// - `true`: the selection is cleared, so no stale item stays highlighted
    pub clear_selection_on_fetch_error: bool,

    /// Maximum time [`Control::stopped`](crate::Control::stopped) waits after
    /// cancellation.
    pub grace: Duration,
}

impl ControlConfig {
    /// Returns the shutdown grace period as an `Option`.
    ///
    /// - `None` → wait without bound
    /// - `Some(d)` → give up after `d`
    #[inline]
    pub fn grace_limit(&self) -> Option<Duration> {
        if self.grace == Duration::ZERO {
            None
        } else {
            Some(self.grace)
        }
    }
}

impl Default for ControlConfig {
    /// Default configuration:
    ///
    /// - `page_title = "Products"`
    /// - `clear_selection_on_fetch_error = false`
    /// - `grace = 5s`
    fn default() -> Self {
        Self {
            page_title: DEFAULT_TITLE.to_string(),
            clear_selection_on_fetch_error: false,
            grace: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_grace_is_unbounded() {
        let cfg = ControlConfig {
            grace: Duration::ZERO,
            ..ControlConfig::default()
        };
        assert_eq!(cfg.grace_limit(), None);
        assert_eq!(
            ControlConfig::default().grace_limit(),
            Some(Duration::from_secs(5))
        );
    }
}
