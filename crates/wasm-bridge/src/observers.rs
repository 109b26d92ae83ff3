//! IntersectionObserver wiring for the declared observation groups

use std::collections::HashMap;

use page_fx_interaction::Observation;
use page_fx_shared::{ElementId, ObserverGroup};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::Dom;
use crate::instance_manager::InstanceManager;

type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct GroupObserver {
    observer: IntersectionObserver,
    _callback: ObserverClosure,
}

/// Observers of one page, disconnected on drop
#[derive(Default)]
pub struct Observers {
    groups: HashMap<ObserverGroup, GroupObserver>,
}

/// A decoded observer entry
pub struct Crossing {
    pub group: ObserverGroup,
    pub element: ElementId,
    pub ratio: f64,
    pub is_intersecting: bool,
}

impl Observers {
    /// Whether the host implements `IntersectionObserver`
    pub fn supported(dom: &Dom) -> bool {
        js_sys::Reflect::has(dom.window(), &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false)
    }

    pub fn create(dom: &Dom, observations: &[Observation], instance_id: Uuid) -> Self {
        let mut observers = Self::default();
        for observation in observations {
            match observe(dom, observation, instance_id) {
                Ok(observer) => {
                    observers.groups.insert(observation.group, observer);
                }
                Err(err) => log::warn!("Could not observe {:?}: {err:?}", observation.group),
            }
        }
        observers
    }

    pub fn unobserve(&self, dom: &Dom, group: ObserverGroup, element: ElementId) {
        if let (Some(group), Some(element)) = (self.groups.get(&group), dom.get(element)) {
            group.observer.unobserve(element);
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Drop for Observers {
    fn drop(&mut self) {
        for group in self.groups.values() {
            group.observer.disconnect();
        }
    }
}

fn observe(dom: &Dom, observation: &Observation, instance_id: Uuid) -> Result<GroupObserver, JsValue> {
    let group = observation.group;
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        InstanceManager::with_instance_mut(&instance_id, |instance| {
            let crossings: Vec<Crossing> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    Some(Crossing {
                        group,
                        element: instance.dom().lookup(&entry.target())?,
                        ratio: entry.intersection_ratio(),
                        is_intersecting: entry.is_intersecting(),
                    })
                })
                .collect();
            instance.on_crossings(crossings);
        });
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(observation.threshold));
    if let Some(margin) = &observation.root_margin {
        options.set_root_margin(margin);
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for element in observation.elements.iter().filter_map(|id| dom.get(*id)) {
        observer.observe(element);
    }

    Ok(GroupObserver {
        observer,
        _callback: callback,
    })
}
