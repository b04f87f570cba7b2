//! Observer Registry
//!
//! Per-event listener lists, lazily created, dispatched synchronously in
//! insertion order. Each registration remembers the subscriber's scope at
//! listen time and the callback always runs under that scope, not under
//! whatever is active when the event fires.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use sprig_build::Value;

/// Shared subscriber state remembered at listen time
pub type Scope = Rc<RefCell<dyn Any>>;

/// Callback invoked with its remembered scope and the fire-time detail
pub type EventCallback = Box<dyn FnMut(&mut dyn Any, &[Value])>;

type SharedCallback = Rc<RefCell<EventCallback>>;

/// Handle for removing a registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerToken {
    event: String,
    id: u64,
}

struct Registration {
    id: u64,
    scope: Scope,
    callback: SharedCallback,
}

/// Delivery postponed because its scope was still borrowed further up the
/// dispatch stack
struct Deferred {
    scope: Scope,
    callback: SharedCallback,
    detail: Vec<Value>,
}

thread_local! {
    static DISPATCH_DEPTH: Cell<usize> = const { Cell::new(0) };
    static DEFERRED: RefCell<Vec<Deferred>> = const { RefCell::new(Vec::new()) };
}

/// Ordered per-event listener registry
#[derive(Default)]
pub struct Emitter {
    listeners: HashMap<String, Vec<Registration>>,
}

fn next_token_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration for `event`
    pub fn listen(&mut self, event: &str, scope: Scope, callback: EventCallback) -> ListenerToken {
        let id = next_token_id();
        self.listeners
            .entry(event.to_string())
            .or_default()
            .push(Registration {
                id,
                scope,
                callback: Rc::new(RefCell::new(callback)),
            });
        ListenerToken {
            event: event.to_string(),
            id,
        }
    }

    /// Remove the registration behind `token`
    ///
    /// Returns whether a registration was removed; the relative order of
    /// the survivors is preserved.
    pub fn unlisten(&mut self, token: ListenerToken) -> bool {
        let Some(registrations) = self.listeners.get_mut(&token.event) else {
            return false;
        };
        let before = registrations.len();
        registrations.retain(|r| r.id != token.id);
        registrations.len() != before
    }

    /// Fire `event`, invoking every registration in insertion order
    ///
    /// Each callback runs with its own remembered scope borrowed mutably.
    /// A cascaded fire whose delivery targets a scope still borrowed by an
    /// outer callback is not an error: that delivery is deferred and runs
    /// once the outermost dispatch completes. No registrations is a silent
    /// no-op.
    pub fn fire(&mut self, event: &str, detail: &[Value]) {
        let Some(registrations) = self.listeners.get(event) else {
            return;
        };
        trace!(event, listeners = registrations.len(), "dispatching");
        let deliveries: Vec<(Scope, SharedCallback)> = registrations
            .iter()
            .map(|r| (Rc::clone(&r.scope), Rc::clone(&r.callback)))
            .collect();

        DISPATCH_DEPTH.with(|depth| depth.set(depth.get() + 1));
        for (scope, callback) in &deliveries {
            deliver(scope, callback, detail);
        }
        DISPATCH_DEPTH.with(|depth| depth.set(depth.get() - 1));
        if DISPATCH_DEPTH.with(|depth| depth.get()) == 0 {
            run_deferred();
        }
    }

    /// Number of registrations for `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, |r| r.len())
    }

    /// Append every registration of `other`, keeping their order
    pub(crate) fn merge(&mut self, other: Emitter) {
        for (event, registrations) in other.listeners {
            self.listeners.entry(event).or_default().extend(registrations);
        }
    }
}

// Borrows the scope and the callback slot only for the duration of the user
// call. A failed borrow means something further up the dispatch stack still
// holds it, so the delivery is queued instead of panicking.
fn deliver(scope: &Scope, callback: &SharedCallback, detail: &[Value]) {
    let Ok(mut scope_ref) = scope.try_borrow_mut() else {
        defer(scope, callback, detail);
        return;
    };
    let Ok(mut callback_ref) = callback.try_borrow_mut() else {
        defer(scope, callback, detail);
        return;
    };
    let callback: &mut EventCallback = &mut *callback_ref;
    callback(&mut *scope_ref, detail);
}

fn defer(scope: &Scope, callback: &SharedCallback, detail: &[Value]) {
    trace!("delivery deferred, scope busy");
    DEFERRED.with(|deferred| {
        deferred.borrow_mut().push(Deferred {
            scope: Rc::clone(scope),
            callback: Rc::clone(callback),
            detail: detail.to_vec(),
        });
    });
}

// Runs once the dispatch stack unwinds to the top level. A delivery that is
// still contended at that point (the caller fired from inside its own scope
// borrow) stays queued for the next top-level fire; the batch size check
// stops that case from spinning.
fn run_deferred() {
    loop {
        let batch: Vec<Deferred> = DEFERRED.with(|deferred| deferred.take());
        if batch.is_empty() {
            return;
        }
        let size = batch.len();
        for item in batch {
            deliver(&item.scope, &item.callback, &item.detail);
        }
        if DEFERRED.with(|deferred| deferred.borrow().len()) >= size {
            return;
        }
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (event, registrations) in &self.listeners {
            map.entry(event, &registrations.len());
        }
        map.finish()
    }
}
