//! Node Events
//!
//! Listener registry for node targets, kept outside the tree. Dispatch
//! starts at the target and bubbles through its ancestors, delivering a
//! mutable [`NodeEvent`] supporting `stop_propagation` and
//! `prevent_default`. Listener callbacks run under the subscriber scope
//! remembered at listen time, exactly like component listeners.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use sprig_build::Value;
use sprig_dom::{DomTree, NodeId};

use crate::Scope;

/// Event delivered to node listeners
#[derive(Debug, Clone)]
pub struct NodeEvent {
    pub name: String,
    pub target: NodeId,
    pub current_target: NodeId,
    pub detail: Vec<Value>,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl NodeEvent {
    /// Create an event with explicit `bubbles`/`cancelable` flags
    pub fn new(
        name: &str,
        target: NodeId,
        detail: Vec<Value>,
        bubbles: bool,
        cancelable: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            target,
            current_target: target,
            detail,
            bubbles,
            cancelable,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Mark the default action as prevented
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop the event from bubbling past the current node
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Handle for removing a node registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeListenerToken {
    node: NodeId,
    event: String,
    id: u64,
}

type NodeCallback = Box<dyn FnMut(&mut dyn Any, &mut NodeEvent)>;

struct NodeRegistration {
    id: u64,
    scope: Scope,
    callback: NodeCallback,
}

/// Listener registry for node targets
#[derive(Default)]
pub struct NodeEvents {
    listeners: HashMap<(NodeId, String), Vec<NodeRegistration>>,
}

fn next_node_token_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

impl NodeEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `subscriber` to `event` on `node`
    pub fn listen<S, F>(
        &mut self,
        node: NodeId,
        event: &str,
        subscriber: &Rc<RefCell<S>>,
        mut callback: F,
    ) -> NodeListenerToken
    where
        S: Any,
        F: FnMut(&mut S, &mut NodeEvent) + 'static,
    {
        let scope: Scope = subscriber.clone();
        let wrapped: NodeCallback = Box::new(move |scope_any, event| {
            if let Some(scope) = scope_any.downcast_mut::<S>() {
                callback(scope, event);
            }
        });

        let id = next_node_token_id();
        self.listeners
            .entry((node, event.to_string()))
            .or_default()
            .push(NodeRegistration { id, scope, callback: wrapped });
        NodeListenerToken {
            node,
            event: event.to_string(),
            id,
        }
    }

    /// Remove the registration behind `token`
    pub fn unlisten(&mut self, token: NodeListenerToken) -> bool {
        let Some(registrations) = self.listeners.get_mut(&(token.node, token.event)) else {
            return false;
        };
        let before = registrations.len();
        registrations.retain(|r| r.id != token.id);
        registrations.len() != before
    }

    /// Number of registrations for `event` on `node`
    pub fn listener_count(&self, node: NodeId, event: &str) -> usize {
        self.listeners
            .get(&(node, event.to_string()))
            .map_or(0, |r| r.len())
    }

    /// Fire a bubbling, cancelable `event` at `target`
    ///
    /// Listeners at the same node all run even if one stops propagation;
    /// stopping only prevents the walk from reaching further ancestors.
    /// Returns the delivered event so callers can inspect its flags.
    pub fn fire(
        &mut self,
        tree: &DomTree,
        target: NodeId,
        event: &str,
        detail: Vec<Value>,
    ) -> NodeEvent {
        self.fire_with(tree, target, event, detail, true, true)
    }

    /// Fire `event` at `target` with explicit `bubbles`/`cancelable` flags
    ///
    /// A non-bubbling event only runs listeners on the target itself; a
    /// non-cancelable event ignores `prevent_default`.
    pub fn fire_with(
        &mut self,
        tree: &DomTree,
        target: NodeId,
        event: &str,
        detail: Vec<Value>,
        bubbles: bool,
        cancelable: bool,
    ) -> NodeEvent {
        let mut node_event = NodeEvent::new(event, target, detail, bubbles, cancelable);
        let mut current = target;
        loop {
            node_event.current_target = current;
            self.dispatch_at(current, event, &mut node_event);
            if node_event.propagation_stopped || !node_event.bubbles {
                break;
            }
            match tree.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        node_event
    }

    fn dispatch_at(&mut self, node: NodeId, event: &str, node_event: &mut NodeEvent) {
        let Some(registrations) = self.listeners.get_mut(&(node, event.to_string())) else {
            return;
        };
        trace!(event, listeners = registrations.len(), "dispatching at node");
        for registration in registrations.iter_mut() {
            let mut scope = registration.scope.borrow_mut();
            (registration.callback)(&mut *scope, node_event);
        }
    }
}
