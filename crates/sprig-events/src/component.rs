//! Components
//!
//! The capability bundle for observable application objects: a trait over
//! an embedded [`Emitter`] instead of prototype copying. Implementors get
//! `listen`/`fire`/`unlisten` and the [`Scoped`] iteration helpers.
//!
//! [`Scoped`]: crate::Scoped

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use sprig_build::Value;

use crate::{Emitter, EventCallback, ListenerToken, Scope};

/// Observable capability bundle
///
/// Embed an [`Emitter`] field and expose it through the two accessors:
///
/// ```
/// use sprig_events::{Component, Emitter};
///
/// #[derive(Default)]
/// struct Counter {
///     count: u32,
///     emitter: Emitter,
/// }
///
/// impl Component for Counter {
///     fn emitter(&self) -> &Emitter { &self.emitter }
///     fn emitter_mut(&mut self) -> &mut Emitter { &mut self.emitter }
/// }
/// ```
pub trait Component: Any {
    fn emitter(&self) -> &Emitter;
    fn emitter_mut(&mut self) -> &mut Emitter;
}

/// Subscribe `subscriber` to `event` on `observed`
///
/// The callback always runs with `subscriber` borrowed mutably as its
/// scope, no matter who fires the event.
pub fn listen<O, S, F>(
    observed: &Rc<RefCell<O>>,
    event: &str,
    subscriber: &Rc<RefCell<S>>,
    mut callback: F,
) -> ListenerToken
where
    O: Component,
    S: Any,
    F: FnMut(&mut S, &[Value]) + 'static,
{
    let scope: Scope = subscriber.clone();
    let wrapped: EventCallback = Box::new(move |scope_any, detail| {
        if let Some(scope) = scope_any.downcast_mut::<S>() {
            callback(scope, detail);
        }
    });
    observed.borrow_mut().emitter_mut().listen(event, scope, wrapped)
}

/// Fire `event` on `observed`, forwarding `detail` to every listener
///
/// The emitter is swapped out of the cell for the duration of the
/// dispatch, so callbacks may borrow the observed component (including
/// self-subscription) and may register new listeners while the dispatch
/// runs. Listeners added mid-dispatch do not see the in-flight event.
/// A callback may itself fire events on other components; a cascaded
/// delivery into a scope the outer callback still holds is deferred and
/// runs after the outermost dispatch completes.
pub fn fire<O: Component>(observed: &Rc<RefCell<O>>, event: &str, detail: &[Value]) {
    let mut emitter = std::mem::take(observed.borrow_mut().emitter_mut());
    emitter.fire(event, detail);

    let mut observed = observed.borrow_mut();
    let added = std::mem::replace(observed.emitter_mut(), emitter);
    observed.emitter_mut().merge(added);
}

/// Remove a registration made through [`listen`]
pub fn unlisten<O: Component>(observed: &Rc<RefCell<O>>, token: ListenerToken) -> bool {
    observed.borrow_mut().emitter_mut().unlisten(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Model {
        items: Vec<String>,
        emitter: Emitter,
    }

    impl Component for Model {
        fn emitter(&self) -> &Emitter {
            &self.emitter
        }
        fn emitter_mut(&mut self) -> &mut Emitter {
            &mut self.emitter
        }
    }

    #[derive(Default)]
    struct Widget {
        rendered: Vec<String>,
        emitter: Emitter,
    }

    impl Component for Widget {
        fn emitter(&self) -> &Emitter {
            &self.emitter
        }
        fn emitter_mut(&mut self) -> &mut Emitter {
            &mut self.emitter
        }
    }

    #[test]
    fn test_listener_runs_under_subscriber_scope() {
        let model = Rc::new(RefCell::new(Model::default()));
        let widget = Rc::new(RefCell::new(Widget::default()));

        let _ = listen(&model, "added", &widget, |widget, detail| {
            if let Some(Value::Text(name)) = detail.first() {
                widget.rendered.push(name.clone());
            }
        });

        model.borrow_mut().items.push("milk".to_string());
        fire(&model, "added", &[Value::from("milk")]);

        assert_eq!(widget.borrow().rendered, vec!["milk".to_string()]);
    }

    #[test]
    fn test_two_listeners_in_order() {
        let model = Rc::new(RefCell::new(Model::default()));
        let first = Rc::new(RefCell::new(Widget::default()));
        let second = Rc::new(RefCell::new(Widget::default()));
        let order = Rc::new(RefCell::new(Vec::new()));

        let order1 = order.clone();
        let _ = listen(&model, "x", &first, move |_, _| order1.borrow_mut().push(1));
        let order2 = order.clone();
        let _ = listen(&model, "x", &second, move |_, _| order2.borrow_mut().push(2));

        fire(&model, "x", &[]);
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_self_subscription() {
        let model = Rc::new(RefCell::new(Model::default()));

        let _ = listen(&model, "added", &model, |model, detail| {
            if let Some(Value::Text(name)) = detail.first() {
                model.items.push(name.clone());
            }
        });

        fire(&model, "added", &[Value::from("eggs")]);
        assert_eq!(model.borrow().items, vec!["eggs".to_string()]);
    }

    #[test]
    fn test_cascaded_fire_reaching_shared_subscriber() {
        let source = Rc::new(RefCell::new(Model::default()));
        let relay = Rc::new(RefCell::new(Model::default()));
        let widget = Rc::new(RefCell::new(Widget::default()));

        // the widget listens on both components; its "changed" callback
        // fires "refresh" while the widget scope is still borrowed
        let relay2 = relay.clone();
        let _ = listen(&source, "changed", &widget, move |widget, _| {
            widget.rendered.push("changed".to_string());
            fire(&relay2, "refresh", &[]);
        });
        let _ = listen(&relay, "refresh", &widget, |widget, _| {
            widget.rendered.push("refresh".to_string());
        });

        fire(&source, "changed", &[]);

        assert_eq!(widget.borrow().rendered, vec!["changed", "refresh"]);
    }

    #[test]
    fn test_listen_during_dispatch_misses_in_flight_event() {
        let model = Rc::new(RefCell::new(Model::default()));
        let widget = Rc::new(RefCell::new(Widget::default()));
        let count = Rc::new(RefCell::new(0));

        let model2 = model.clone();
        let widget2 = widget.clone();
        let count2 = count.clone();
        let _ = listen(&model, "x", &widget, move |_, _| {
            let count3 = count2.clone();
            let _ = listen(&model2, "x", &widget2, move |_, _| {
                *count3.borrow_mut() += 1;
            });
        });

        fire(&model, "x", &[]);
        assert_eq!(*count.borrow(), 0);
        fire(&model, "x", &[]);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_unlisten_component_target() {
        let model = Rc::new(RefCell::new(Model::default()));
        let widget = Rc::new(RefCell::new(Widget::default()));

        let token = listen(&model, "x", &widget, |widget, _| {
            widget.rendered.push("hit".to_string());
        });
        assert!(unlisten(&model, token));

        fire(&model, "x", &[]);
        assert!(widget.borrow().rendered.is_empty());
    }
}
