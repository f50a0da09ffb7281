//! # Feedback actuator: state-driven side effects without re-entry.
//!
//! The actuator watches the reduced state and, whenever `selected_product_id` changes
//! to a present id, asks the [`Navigator`] to update the URL and the
//! [`SelectionSync`] to inform peers.
//!
//! ## Loop
//! ```text
//!  Bus ──► reduce ──► State ──► FeedbackActuator ──► navigate / set_selection
//!   ▲                                 │                        │
//!   │                          (emits nothing)                 ▼
//!   └──────────── route / peer source ◄──────────── external collaborator echo
//! ```
//!
//! The actuator holds no `Bus` handle, so it cannot publish. The only way back is the
//! external echo. Before each push the actuator registers the id with the target's
//! `EchoGuard`, and the matching source drops the echo, even when it arrives after
//! the state has already moved on. An echo that does get through carries the **same**
//! id, so the resulting state fails the de-duplication check below.
//!
//! ## Rules
//! - De-duplication is on `selected_product_id` only, not full-state equality: every
//!   event yields a new state, and unrelated ones must not re-fire effects.
//! - A change to `None` updates the de-duplication key but triggers nothing.
//! - Effects run in order: navigation first, then peer sync.
//! - After cancellation no effect is started.
//! - A panicking collaborator is caught and logged; the actuator keeps running.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::sources::SelectionSync;
use crate::sources::echo::EchoGuard;
use crate::state::{ProductId, State};

use super::navigator::Navigator;

/// Open-loop tap over the state stream.
pub struct FeedbackActuator {
    navigator: Option<Arc<dyn Navigator>>,
    selection: Option<Arc<dyn SelectionSync>>,
    /// Selection of the previously observed state (`None` = nothing observed yet).
    last: Option<Option<ProductId>>,
    route_echo: Option<Arc<EchoGuard>>,
    peer_echo: Option<Arc<EchoGuard>>,
}

impl FeedbackActuator {
    /// Creates an actuator with the given (optional) collaborators.
    pub fn new(
        navigator: Option<Arc<dyn Navigator>>,
        selection: Option<Arc<dyn SelectionSync>>,
    ) -> Self {
        Self {
            navigator,
            selection,
            last: None,
            route_echo: None,
            peer_echo: None,
        }
    }

    /// Registers every navigation with `route` and every peer push with `peer`.
    pub(crate) fn with_echo_guards(
        mut self,
        route: Option<Arc<EchoGuard>>,
        peer: Option<Arc<EchoGuard>>,
    ) -> Self {
        self.route_echo = route;
        self.peer_echo = peer;
        self
    }

    /// Records `state` and returns the id to actuate, if any.
    ///
    /// ```text
    /// observe(id=None)  → None        (first state, nothing selected)
    /// observe(id=5)     → Some(5)
    /// observe(id=5)     → None        (unchanged)
    /// observe(id=None)  → None        (cleared)
    /// observe(id=5)     → Some(5)     (changed again)
    /// ```
    pub fn observe(&mut self, state: &State) -> Option<ProductId> {
        let id = state.selected_product_id;
        if self.last == Some(id) {
            return None;
        }
        self.last = Some(id);
        id
    }

    /// Consumes `states` in order until the feed closes or `token` fires.
    pub(crate) async fn run(
        mut self,
        mut states: mpsc::UnboundedReceiver<Arc<State>>,
        token: CancellationToken,
    ) {
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                next = states.recv() => {
                    let Some(state) = next else { break };
                    if let Some(id) = self.observe(&state) {
                        self.actuate(id, &token).await;
                    }
                }
            }
        }
    }

    async fn actuate(&self, id: ProductId, token: &CancellationToken) {
        if let Some(nav) = &self.navigator {
            if token.is_cancelled() {
                return;
            }
            if let Some(echo) = &self.route_echo {
                echo.expect(id);
            }
            info!(product = %id, "navigating to product");
            let fut = nav.navigate_to_product(id);
            if let Err(panic_err) = AssertUnwindSafe(fut).catch_unwind().await {
                error!(product = %id, "navigator panicked: {:?}", panic_err);
            }
        }
        if let Some(sync) = &self.selection {
            if token.is_cancelled() {
                return;
            }
            if let Some(echo) = &self.peer_echo {
                echo.expect(id);
            }
            info!(product = %id, "publishing selection to peers");
            let fut = sync.set_selection(id);
            if let Err(panic_err) = AssertUnwindSafe(fut).catch_unwind().await {
                error!(product = %id, "selection sync panicked: {:?}", panic_err);
            }
        }
    }
}
