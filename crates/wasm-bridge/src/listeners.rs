//! DOM event listeners for a binding table

use page_fx_interaction::{Binding, BindingTable, BindingTarget};
use page_fx_shared::{EventKind, InputEvent, Point};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent, MouseEvent};

use crate::dom::Dom;
use crate::instance_manager::InstanceManager;

type ListenerClosure = Closure<dyn FnMut(Event)>;

/// An attached listener; detached on drop
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: ListenerClosure,
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
            .ok();
    }
}

/// Attach one listener per binding, routing events to the page instance
pub fn attach_all(dom: &Dom, table: &BindingTable, instance_id: Uuid) -> Vec<Listener> {
    table
        .iter()
        .filter_map(|binding| attach(dom, binding, instance_id))
        .collect()
}

fn attach(dom: &Dom, binding: &Binding, instance_id: Uuid) -> Option<Listener> {
    let target: EventTarget = match binding.target {
        BindingTarget::Element(id) => dom.get(id)?.clone().into(),
        BindingTarget::Window => dom.window().clone().into(),
        BindingTarget::Document => dom.document().clone().into(),
    };

    let handler = binding.handler;
    let kind = binding.kind;
    let closure = Closure::wrap(Box::new(move |event: Event| {
        InstanceManager::with_instance_mut(&instance_id, |instance| {
            instance.dispatch(&handler, kind, &event);
        });
    }) as Box<dyn FnMut(Event)>);

    let event = kind.dom_name();
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("Failed to attach {event} listener: {err:?}");
        return None;
    }

    Some(Listener {
        target,
        event,
        closure,
    })
}

/// Extract what the controllers need from a DOM event
pub fn input_event(dom: &Dom, kind: EventKind, event: &Event) -> InputEvent {
    let mut input = InputEvent::default();

    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        input.pointer = Some(Point::new(
            f64::from(mouse.client_x()),
            f64::from(mouse.client_y()),
        ));
    }
    if let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() {
        input.key = Some(keyboard.key());
    }
    if kind == EventKind::Click {
        let target = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok());
        input.target_path = dom.path_of(target);
    }

    input
}
