//! Instance management for mounted pages
//! Thread-local registry keeping each page, its listeners and observers alive

use std::cell::RefCell;
use std::collections::HashMap;

use page_fx_config::PageFxConfig;
use page_fx_interaction::{Handler, PageController};
use page_fx_shared::{Deferred, Effect, EventKind, PageFxError, PageFxResult};
use uuid::Uuid;
use web_sys::Event;

use crate::discovery::discover;
use crate::dom::Dom;
use crate::listeners::{attach_all, input_event, Listener};
use crate::observers::{Crossing, Observers};
use crate::scheduler::Scheduler;

/// One mounted page with all its associated state
pub struct PageInstance {
    id: Uuid,
    controller: PageController,
    dom: Dom,
    scheduler: Scheduler,
    observers: Observers,
    listeners: Vec<Listener>,
}

impl PageInstance {
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn config(&self) -> &PageFxConfig {
        self.controller.config()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Route a DOM event to its handler and apply the result
    pub fn dispatch(&mut self, handler: &Handler, kind: EventKind, event: &Event) {
        let input = input_event(&self.dom, kind, event);
        let effects = self.controller.handle(handler, &input, &self.dom);
        self.apply(effects, Some(event));
    }

    pub fn on_crossings(&mut self, crossings: Vec<Crossing>) {
        for crossing in crossings {
            let effects = self.controller.on_intersection(
                crossing.group,
                crossing.element,
                crossing.ratio,
                crossing.is_intersecting,
                &self.dom,
            );
            self.apply(effects, None);
        }
    }

    /// A scheduled callback fired
    pub fn run_deferred(&mut self, task: Deferred, generation: u64) {
        if !self.scheduler.claim(task, generation) {
            return;
        }
        let effects = self.controller.run_deferred(task, &self.dom);
        self.apply(effects, None);
    }

    fn apply(&mut self, effects: Vec<Effect>, event: Option<&Event>) {
        for effect in effects {
            if self.dom.apply_mutation(&effect) {
                continue;
            }
            match effect {
                Effect::ScrollTo { top, smooth } => {
                    let options = web_sys::ScrollToOptions::new();
                    options.set_top(top);
                    if smooth {
                        options.set_behavior(web_sys::ScrollBehavior::Smooth);
                    }
                    self.dom.window().scroll_to_with_scroll_to_options(&options);
                }
                Effect::PreventDefault => {
                    if let Some(event) = event {
                        event.prevent_default();
                    }
                }
                Effect::Unobserve { group, element } => {
                    self.observers.unobserve(&self.dom, group, element);
                }
                Effect::Defer { task, when } => {
                    self.scheduler.schedule(self.dom.window(), self.id, task, when);
                }
                other => log::debug!("Unhandled effect {other:?}"),
            }
        }
    }
}

// Thread-local storage for page instances
thread_local! {
    static PAGE_INSTANCES: RefCell<HashMap<Uuid, PageInstance>> = RefCell::new(HashMap::new());
}

/// Manages page instances without global mutable state
pub struct InstanceManager;

impl InstanceManager {
    /// Discover the page, build its controllers, attach listeners and
    /// observers, apply the initial effects. Returns the new instance id.
    pub fn create_instance(config: PageFxConfig) -> PageFxResult<Uuid> {
        let id = Uuid::new_v4();
        let scope = id.simple().to_string();
        let mut dom = Dom::new(&scope[..8])?;

        let layout = discover(&mut dom, &config);
        let mut controller = PageController::new(config, layout)?;

        let observers_supported = Observers::supported(&dom);
        let observers = if observers_supported {
            Observers::create(&dom, &controller.observations(), id)
        } else {
            Observers::default()
        };
        let listeners = attach_all(&dom, &controller.bindings(), id);
        let initial = controller.mount(&dom, observers_supported);

        let mut instance = PageInstance {
            id,
            controller,
            dom,
            scheduler: Scheduler::new(),
            observers,
            listeners,
        };
        instance.apply(initial, None);

        log::info!(
            "Page {id} mounted with {} listeners",
            instance.listener_count()
        );

        let rejected = PAGE_INSTANCES.with(|instances| match instances.try_borrow_mut() {
            Ok(mut instances) => {
                instances.insert(id, instance);
                None
            }
            Err(_) => Some(instance),
        });
        match rejected {
            None => Ok(id),
            Some(instance) => {
                instance.dom.release();
                Err(PageFxError::JsInterop {
                    message: "cannot mount while a page is dispatching".to_string(),
                })
            }
        }
    }

    /// Get a reference to a page instance
    pub fn with_instance<F, R>(id: &Uuid, f: F) -> Option<R>
    where
        F: FnOnce(&PageInstance) -> R,
    {
        PAGE_INSTANCES.with(|instances| match instances.try_borrow() {
            Ok(instances) => instances.get(id).map(f),
            Err(_) => {
                log::debug!("Page instances busy, skipping read of {id}");
                None
            }
        })
    }

    /// Get a mutable reference to a page instance. Re-entrant calls (an
    /// effect synchronously dispatching another bound event) are dropped.
    pub fn with_instance_mut<F, R>(id: &Uuid, f: F) -> Option<R>
    where
        F: FnOnce(&mut PageInstance) -> R,
    {
        PAGE_INSTANCES.with(|instances| match instances.try_borrow_mut() {
            Ok(mut instances) => instances.get_mut(id).map(f),
            Err(_) => {
                log::debug!("Page instances busy, dropping re-entrant event for {id}");
                None
            }
        })
    }

    pub fn instance_exists(id: &Uuid) -> bool {
        PAGE_INSTANCES.with(|instances| {
            instances
                .try_borrow()
                .map(|instances| instances.contains_key(id))
                .unwrap_or(false)
        })
    }

    /// Remove an instance; dropping it detaches listeners and observers.
    /// Refused while the registry is busy dispatching.
    pub fn remove_instance(id: &Uuid) -> bool {
        let removed = PAGE_INSTANCES.with(|instances| match instances.try_borrow_mut() {
            Ok(mut instances) => instances.remove(id),
            Err(_) => {
                log::debug!("Page instances busy, cannot unmount {id}");
                None
            }
        });
        match removed {
            Some(mut instance) => {
                instance.scheduler.clear();
                instance.dom.release();
                true
            }
            None => false,
        }
    }
}
