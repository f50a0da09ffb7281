//! Side-effect stage driven by reduced state.
//!
//! - [`FeedbackActuator`]: de-duplicated, open-loop tap that performs navigation and
//!   peer synchronization on selection changes.
//! - [`Navigator`]: URL navigation collaborator.

mod feedback;
mod navigator;

pub use feedback::FeedbackActuator;
pub use navigator::Navigator;
