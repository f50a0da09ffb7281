//! # Echo suppression for collaborators the actuator writes back to.
//!
//! The route and the peer selection are both **inputs** and **effect targets**. Every id
//! the actuator pushes into them comes back through their stream. With several
//! selections in flight, those echoes arrive late:
//!
//! ```text
//! state:   5 ─► 6
//! pushes:  5, 6            (route "5", route "6")
//! stream:  "5", "6"        (arrive after the state is already 6)
//! ```
//!
//! Without a guard, the late `"5"` looks like a real 6 → 5 change and the actuator fires
//! again, forever. [`EchoGuard`] sits between one collaborator and its source task:
//!
//! - [`expect`](EchoGuard::expect) is called by the actuator **before** each push.
//! - [`admit`](EchoGuard::admit) is called by the source for each value it reads.
//!   A value matching an outstanding push is an echo: it is dropped together with every
//!   older outstanding push (watch-backed collaborators coalesce).
//!   Any other value is a genuine change: it passes and the outstanding pushes are
//!   forgotten.
//! - A push of the value the collaborator already holds is not recorded, since no echo
//!   will follow.

use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::debug;

use crate::events::Source;
use crate::state::ProductId;

/// Outstanding pushes kept per collaborator; older ones are forgotten first.
const MAX_PENDING: usize = 32;

#[derive(Default)]
struct Pending {
    sent: VecDeque<ProductId>,
    last_seen: Option<ProductId>,
}

/// Tracks the actuator's outstanding pushes to one collaborator.
pub(crate) struct EchoGuard {
    source: Source,
    pending: Mutex<Pending>,
}

impl EchoGuard {
    pub(crate) fn new(source: Source) -> Self {
        Self {
            source,
            pending: Mutex::new(Pending::default()),
        }
    }

    /// Records that `id` is about to be pushed to the collaborator.
    pub(crate) fn expect(&self, id: ProductId) {
        let Ok(mut p) = self.pending.lock() else {
            return;
        };
        if p.sent.is_empty() && p.last_seen == Some(id) {
            return;
        }
        if p.sent.len() == MAX_PENDING {
            p.sent.pop_front();
        }
        p.sent.push_back(id);
    }

    /// Returns `true` if `id`, read from the collaborator, is a genuine change.
    pub(crate) fn admit(&self, id: Option<ProductId>) -> bool {
        let Ok(mut p) = self.pending.lock() else {
            return true;
        };
        p.last_seen = id;

        let echo = id.and_then(|id| p.sent.iter().position(|sent| *sent == id));
        match echo {
            Some(pos) => {
                p.sent.drain(..=pos);
                debug!(source = self.source.as_label(), product = ?id, "echo suppressed");
                false
            }
            None => {
                p.sent.clear();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ProductId {
        ProductId::new(n)
    }

    #[test]
    fn test_late_echoes_are_dropped_in_order() {
        let guard = EchoGuard::new(Source::Route);
        guard.expect(id(5));
        guard.expect(id(6));

        assert!(!guard.admit(Some(id(5))));
        assert!(!guard.admit(Some(id(6))));
        // Nothing outstanding: the user navigating back to 5 is real.
        assert!(guard.admit(Some(id(5))));
    }

    #[test]
    fn test_coalesced_echo_clears_older_pushes() {
        let guard = EchoGuard::new(Source::Peer);
        guard.expect(id(5));
        guard.expect(id(6));
        guard.expect(id(7));

        assert!(!guard.admit(Some(id(7))));
        assert!(guard.admit(Some(id(5))));
    }

    #[test]
    fn test_push_of_held_value_is_not_recorded() {
        let guard = EchoGuard::new(Source::Route);
        // Deep link: the route delivered 2 and the actuator pushes 2 back.
        assert!(guard.admit(Some(id(2))));
        guard.expect(id(2));

        guard.expect(id(4));
        assert!(!guard.admit(Some(id(4))));
        assert!(guard.admit(Some(id(2))));
    }

    #[test]
    fn test_genuine_change_forgets_outstanding_pushes() {
        let guard = EchoGuard::new(Source::Route);
        guard.expect(id(5));

        assert!(guard.admit(None));
        assert!(guard.admit(Some(id(9))));
        assert!(guard.admit(Some(id(5))));
    }

    #[test]
    fn test_pending_is_bounded() {
        let guard = EchoGuard::new(Source::Peer);
        for n in 0..(MAX_PENDING as u32 + 1) {
            guard.expect(id(n));
        }
        // The oldest push fell out and reads as a genuine change.
        assert!(guard.admit(Some(id(0))));
    }
}
