//! Sprig Events - Scoped observers and components
//!
//! Observer registries for component and node targets, the `Component`
//! capability traits, scope-preserving iteration helpers, and the custom
//! component registry.

mod component;
mod custom;
mod emitter;
mod iter;
mod node_events;
mod view;

pub use component::{Component, fire, listen, unlisten};
pub use custom::{ComponentFactory, ComponentRegistry};
pub use emitter::{Emitter, EventCallback, ListenerToken, Scope};
pub use iter::Scoped;
pub use node_events::{NodeEvent, NodeEvents, NodeListenerToken};
pub use view::{Mount, View};

/// Custom component errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    /// Name does not follow custom-component naming rules
    #[error("invalid component name: {0}")]
    InvalidName(String),

    #[error("component already defined: {0}")]
    AlreadyDefined(String),

    #[error("component not defined: {0}")]
    NotDefined(String),

    #[error(transparent)]
    Build(#[from] sprig_build::BuildError),
}
