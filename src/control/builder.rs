use std::sync::Arc;

use crate::{
    actuator::Navigator,
    config::ControlConfig,
    sources::{CatalogRef, RouteParams, SelectionSync},
};

use super::core::{Collaborators, Control};

/// Builder for wiring a [`Control`] to its collaborators.
///
/// Every collaborator is optional: a missing source contributes no events, a missing
/// effect target is simply not called.
pub struct ControlBuilder {
    cfg: ControlConfig,
    collaborators: Collaborators,
}

impl ControlBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: ControlConfig) -> Self {
        Self {
            cfg,
            collaborators: Collaborators::default(),
        }
    }

    /// Sets the catalog fetched once on start.
    pub fn with_catalog(mut self, catalog: CatalogRef) -> Self {
        self.collaborators.catalog = Some(catalog);
        self
    }

    /// Sets the route parameter source (deep links).
    pub fn with_route(mut self, route: Arc<dyn RouteParams>) -> Self {
        self.collaborators.route = Some(route);
        self
    }

    /// Sets the peer selection collaborator.
    ///
    /// It is used both as a source (peer changes) and as an effect target
    /// (`set_selection` on local changes).
    pub fn with_selection(mut self, selection: Arc<dyn SelectionSync>) -> Self {
        self.collaborators.selection = Some(selection);
        self
    }

    /// Sets the navigation collaborator driven by the feedback actuator.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.collaborators.navigator = Some(navigator);
        self
    }

    /// Builds the control in the `Uninitialized` phase.
    pub fn build(self) -> Arc<Control> {
        Control::new(self.cfg, self.collaborators)
    }
}
