use std::sync::{Arc, Mutex, OnceLock};

use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, error, warn};

use crate::{
    actuator::{FeedbackActuator, Navigator},
    config::ControlConfig,
    error::ControlError,
    events::{Bus, Envelope, Event, EventKind, Source, Value},
    sources::{self, CatalogRef, RouteParams, SelectionSync, echo::EchoGuard},
    state::{ProductId, State, reduce},
    view::ProductListView,
};

use super::{builder::ControlBuilder, phase::Phase};

/// External collaborators wired by the builder.
#[derive(Default)]
pub(crate) struct Collaborators {
    pub(crate) catalog: Option<CatalogRef>,
    pub(crate) route: Option<Arc<dyn RouteParams>>,
    pub(crate) selection: Option<Arc<dyn SelectionSync>>,
    pub(crate) navigator: Option<Arc<dyn Navigator>>,
}

/// Owns the bus, the fold loop and the feedback actuator of one product list.
///
/// - input: [`send`](Control::send) / [`dispatch`](Control::dispatch) plus the wired sources
/// - output: [`output`](Control::output), a replay-latest `watch` of `Arc<State>`
///
/// Dropping the last handle stops every stage, as if the token had been cancelled.
pub struct Control {
    cfg: ControlConfig,
    collaborators: Collaborators,
    bus: Bus,

    // Taken by `start`; `None` afterwards.
    inbox: Mutex<Option<mpsc::UnboundedReceiver<Envelope>>>,
    output: Arc<watch::Sender<Arc<State>>>,

    token: OnceLock<CancellationToken>,
    // Cancels the child token the stages run under when the control is dropped.
    teardown: OnceLock<DropGuard>,
    stopped: CancellationToken,
}

impl Control {
    /// Returns a builder for wiring collaborators.
    pub fn builder(cfg: ControlConfig) -> ControlBuilder {
        ControlBuilder::new(cfg)
    }

    pub(crate) fn new(cfg: ControlConfig, collaborators: Collaborators) -> Arc<Self> {
        let (bus, inbox) = Bus::new();
        let (output, _rx) = watch::channel(Arc::new(State::default()));

        Arc::new(Self {
            cfg,
            collaborators,
            bus,
            inbox: Mutex::new(Some(inbox)),
            output: Arc::new(output),
            token: OnceLock::new(),
            teardown: OnceLock::new(),
            stopped: CancellationToken::new(),
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        match self.token.get() {
            None => Phase::Uninitialized,
            Some(token) if token.is_cancelled() => Phase::Cancelled,
            Some(_) => Phase::Running,
        }
    }

    /// Starts consuming events (spawns in background; needs a Tokio runtime).
    ///
    /// Publishes `pageTitle(cfg.page_title)` first, then spawns the fold loop, one task
    /// per wired source and the feedback actuator. Everything stops when `token` is
    /// cancelled or the control is dropped; after that no state is emitted and no
    /// effect runs.
    pub fn start(&self, token: CancellationToken) -> Result<(), ControlError> {
        let inbox = self
            .inbox
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
            .ok_or(ControlError::AlreadyStarted)?;
        self.token
            .set(token.clone())
            .map_err(|_| ControlError::AlreadyStarted)?;

        let run = token.child_token();
        let _ = self.teardown.set(run.clone().drop_guard());

        self.bus.publish(
            Source::Manual,
            Event::PageTitle(self.cfg.page_title.clone()),
        );

        let (feed, states) = mpsc::unbounded_channel::<Arc<State>>();
        let mut stages = JoinSet::new();
        self.spawn_stages(&mut stages, states, &run);

        tokio::spawn(fold(
            inbox,
            Arc::clone(&self.output),
            feed,
            stages,
            run,
            self.stopped.clone(),
        ));
        Ok(())
    }

    /// Injects an event through the string-keyed port.
    ///
    /// Unknown kinds and mismatched payloads are accepted and folded as no-ops.
    /// Never blocks.
    pub fn send(&self, kind: &str, value: impl Into<Value>) -> Result<(), ControlError> {
        self.dispatch(Event::from_parts(kind, value.into()))
    }

    /// Injects a typed event. Never blocks.
    ///
    /// ### Errors
    /// - [`ControlError::NotStarted`] before [`start`](Control::start)
    /// - [`ControlError::Cancelled`] once the token fired
    pub fn dispatch(&self, event: Event) -> Result<(), ControlError> {
        match self.phase() {
            Phase::Uninitialized => {
                warn!(kind = event.kind_str(), "event rejected: control not started");
                Err(ControlError::NotStarted)
            }
            Phase::Cancelled => {
                debug!(kind = event.kind_str(), "event rejected: control cancelled");
                Err(ControlError::Cancelled)
            }
            Phase::Running => {
                if self.bus.publish(Source::Manual, event) {
                    Ok(())
                } else {
                    Err(ControlError::Cancelled)
                }
            }
        }
    }

    /// Selects a product; shorthand for `send("selectedProductId", id)`.
    pub fn select_product(&self, id: impl Into<ProductId>) -> Result<(), ControlError> {
        let id: ProductId = id.into();
        self.send(EventKind::SelectedProductId.as_str(), Some(id))
    }

    /// Subscribes to the state output. The receiver starts at the latest state.
    pub fn output(&self) -> watch::Receiver<Arc<State>> {
        self.output.subscribe()
    }

    /// Latest state snapshot.
    pub fn state(&self) -> Arc<State> {
        Arc::clone(&self.output.borrow())
    }

    /// Stream of states: the latest one first, then every update.
    pub fn states(&self) -> BoxStream<'static, Arc<State>> {
        WatchStream::new(self.output()).boxed()
    }

    /// Stream of display records projected from [`states`](Control::states).
    pub fn views(&self) -> BoxStream<'static, ProductListView> {
        self.states()
            .map(|state| ProductListView::from(state.as_ref()))
            .boxed()
    }

    /// Waits until every stage exited after cancellation.
    ///
    /// Bounded by [`ControlConfig::grace`] (`0s` = unbounded).
    pub async fn stopped(&self) -> Result<(), ControlError> {
        if self.token.get().is_none() {
            return Err(ControlError::NotStarted);
        }
        match self.cfg.grace_limit() {
            None => {
                self.stopped.cancelled().await;
                Ok(())
            }
            Some(grace) => tokio::time::timeout(grace, self.stopped.cancelled())
                .await
                .map_err(|_| ControlError::GraceExceeded { grace }),
        }
    }

    /// Spawns one task per wired source plus the actuator.
    ///
    /// The actuator gets the ordered state feed and **no** bus handle. It shares one
    /// echo guard with each source it writes back to.
    fn spawn_stages(
        &self,
        stages: &mut JoinSet<()>,
        states: mpsc::UnboundedReceiver<Arc<State>>,
        token: &CancellationToken,
    ) {
        let c = &self.collaborators;
        let route_echo = c
            .route
            .as_ref()
            .map(|_| Arc::new(EchoGuard::new(Source::Route)));
        let peer_echo = c
            .selection
            .as_ref()
            .map(|_| Arc::new(EchoGuard::new(Source::Peer)));

        if let Some(catalog) = &c.catalog {
            stages.spawn(sources::catalog::run(
                Arc::clone(catalog),
                self.bus.clone(),
                token.clone(),
                self.cfg.clear_selection_on_fetch_error,
            ));
        }
        if let (Some(route), Some(echo)) = (&c.route, &route_echo) {
            stages.spawn(sources::route::run(
                Arc::clone(route),
                self.bus.clone(),
                token.clone(),
                Arc::clone(echo),
            ));
        }
        if let (Some(selection), Some(echo)) = (&c.selection, &peer_echo) {
            stages.spawn(sources::selection::run(
                Arc::clone(selection),
                self.bus.clone(),
                token.clone(),
                Arc::clone(echo),
            ));
        }

        let actuator = FeedbackActuator::new(c.navigator.clone(), c.selection.clone())
            .with_echo_guards(route_echo, peer_echo);
        stages.spawn(actuator.run(states, token.clone()));
    }
}

/// Fold loop: one event at a time, in bus order.
///
/// Holds no handle to the [`Control`], so dropping the control cancels `token` and
/// ends the loop.
async fn fold(
    mut inbox: mpsc::UnboundedReceiver<Envelope>,
    output: Arc<watch::Sender<Arc<State>>>,
    feed: mpsc::UnboundedSender<Arc<State>>,
    mut stages: JoinSet<()>,
    token: CancellationToken,
    stopped: CancellationToken,
) {
    let mut state = Arc::clone(&output.borrow());
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,

            next = inbox.recv() => {
                let Some(env) = next else { break };
                let kind = env.event.kind_str().to_owned();
                if env.event.is_ignored() {
                    debug!(seq = env.seq, source = env.source.as_label(), %kind, "ignored event");
                    continue;
                }
                debug!(seq = env.seq, source = env.source.as_label(), %kind, "reducing event");

                let next = Arc::new(reduce(&state, env.event));
                // A cancel landing between this check and `send_replace` still lets
                // this one state out on a multi-thread runtime; no effect follows it.
                if token.is_cancelled() {
                    break;
                }
                state = next;
                output.send_replace(Arc::clone(&state));
                if token.is_cancelled() {
                    break;
                }
                let _ = feed.send(Arc::clone(&state));
            }
        }
    }

    inbox.close();
    drop(feed);
    while let Some(joined) = stages.join_next().await {
        if let Err(e) = joined {
            error!("stage exited abnormally: {e}");
        }
    }
    debug!("control stopped");
    stopped.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::sources::RouteChannel;

    fn bare() -> Arc<Control> {
        Control::builder(ControlConfig::default()).build()
    }

    #[tokio::test]
    async fn test_send_before_start_is_rejected() {
        let control = bare();
        assert_eq!(control.phase(), Phase::Uninitialized);
        assert_eq!(
            control.send("pageTitle", "early"),
            Err(ControlError::NotStarted)
        );
        assert_eq!(control.stopped().await, Err(ControlError::NotStarted));
        assert_eq!(*control.state(), State::default());
    }

    #[tokio::test]
    async fn test_second_start_is_rejected() {
        let control = bare();
        let token = CancellationToken::new();
        assert_eq!(control.start(token.clone()), Ok(()));
        assert_eq!(control.phase(), Phase::Running);
        assert_eq!(
            control.start(CancellationToken::new()),
            Err(ControlError::AlreadyStarted)
        );
        token.cancel();
        control.stopped().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_publishes_configured_title() {
        let control = Control::builder(ControlConfig {
            page_title: "Catalog".into(),
            ..ControlConfig::default()
        })
        .build();
        control.start(CancellationToken::new()).unwrap();

        let mut rx = control.output();
        let state = tokio::time::timeout(
            Duration::from_secs(1),
            rx.wait_for(|s| s.page_title == "Catalog"),
        )
        .await
        .expect("title not published")
        .map(|s| Arc::clone(&s))
        .unwrap();
        assert_eq!(state.selected_product_id, None);
    }

    #[tokio::test]
    async fn test_cancelled_phase_rejects_events() {
        let control = bare();
        let token = CancellationToken::new();
        control.start(token.clone()).unwrap();
        token.cancel();

        assert_eq!(control.phase(), Phase::Cancelled);
        assert_eq!(control.select_product(1), Err(ControlError::Cancelled));
        control.stopped().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_times_out_while_running() {
        let control = Control::builder(ControlConfig {
            grace: Duration::from_millis(10),
            ..ControlConfig::default()
        })
        .build();
        control.start(CancellationToken::new()).unwrap();
        assert_eq!(
            control.stopped().await,
            Err(ControlError::GraceExceeded {
                grace: Duration::from_millis(10)
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_control_stops_stages() {
        let route = Arc::new(RouteChannel::default());
        let control = Control::builder(ControlConfig::default())
            .with_route(route.clone())
            .with_navigator(route.clone())
            .build();
        let weak = Arc::downgrade(&control);
        control.start(CancellationToken::new()).unwrap();
        let mut output = control.output();

        drop(control);
        assert!(weak.upgrade().is_none());

        // The fold loop owns the last output sender; the channel closes once it exits.
        let closed = tokio::time::timeout(Duration::from_secs(1), async {
            while output.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok(), "fold loop still running after drop");
    }
}
