//! Keyed animation-frame and timer scheduling
//!
//! One pending callback per [`Deferred`] key. Scheduling a key again bumps its
//! generation; a callback whose generation is stale when it fires is dropped
//! without running, so only the last schedule of a key takes effect.

use std::collections::HashMap;

use page_fx_shared::{Deferred, When};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::instance_manager::InstanceManager;

#[derive(Default)]
pub struct Scheduler {
    generations: HashMap<Deferred, u64>,
    pending: HashMap<Deferred, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` for the page instance `instance_id`
    pub fn schedule(&mut self, window: &web_sys::Window, instance_id: Uuid, task: Deferred, when: When) {
        let generation = self.generations.entry(task).or_insert(0);
        *generation += 1;
        let generation = *generation;
        self.pending.insert(task, generation);

        let callback = Closure::once_into_js(move || {
            InstanceManager::with_instance_mut(&instance_id, |instance| {
                instance.run_deferred(task, generation);
            });
        });

        let scheduled = match when {
            When::NextFrame => window
                .request_animation_frame(callback.unchecked_ref())
                .map(|_| ()),
            When::AfterMs(delay) => window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    i32::try_from(delay).unwrap_or(i32::MAX),
                )
                .map(|_| ()),
        };

        if let Err(err) = scheduled {
            log::warn!("Failed to schedule {task:?}: {err:?}");
            self.pending.remove(&task);
        }
    }

    /// Claim a fired callback. Returns `false` for superseded generations.
    pub fn claim(&mut self, task: Deferred, generation: u64) -> bool {
        match self.pending.get(&task) {
            Some(current) if *current == generation => {
                self.pending.remove(&task);
                true
            }
            _ => false,
        }
    }

    /// Forget every pending task; their callbacks become no-ops
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
