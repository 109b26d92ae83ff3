//! WASM bridge for page-fx
//! Binds the DOM-free controllers to a live document: discovers elements,
//! forwards events and observer entries, applies the resulting effects

use page_fx_config::{ConfigFormat, ConfigParser, PageFxConfig, PresetManager};
use page_fx_shared::{PageFxError, PageFxResult};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod discovery;
pub mod dom;
pub mod instance_manager;
pub mod listeners;
pub mod observers;
pub mod scheduler;

use instance_manager::InstanceManager;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second module instance on the same page finds the logger already set
    let _ = console_log::init_with_level(log::Level::Trace);
}

/// Mount the default configuration once the document has been parsed
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| PageFxError::HostUnavailable {
        object: "window".to_string(),
    })?;
    let document = window.document().ok_or_else(|| PageFxError::HostUnavailable {
        object: "document".to_string(),
    })?;

    if document.ready_state() == "loading" {
        let callback = Closure::once_into_js(move || {
            if let Err(err) = mount_default() {
                log::error!("Failed to mount page effects: {err}");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
    } else {
        mount_default()?;
    }
    Ok(())
}

fn mount_default() -> PageFxResult<Uuid> {
    mount_page(PageFxConfig::default())
}

fn mount_page(config: PageFxConfig) -> PageFxResult<Uuid> {
    if let Ok(level) = config.logging.level.parse::<log::LevelFilter>() {
        log::set_max_level(level);
    }
    InstanceManager::create_instance(config)
}

#[wasm_bindgen]
pub struct PageFx {
    instance_id: Option<Uuid>,
}

impl Default for PageFx {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PageFx {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PageFx {
        PageFx { instance_id: None }
    }

    /// Mount with a JSON configuration document
    #[wasm_bindgen]
    pub fn mount(&mut self, config_json: &str) -> Result<(), JsValue> {
        let config = ConfigParser::parse_string(config_json, ConfigFormat::Json)
            .map_err(PageFxError::from)?;
        self.mount_config(config)
    }

    /// Mount with a configuration object; `null` or `undefined` selects the defaults
    #[wasm_bindgen]
    pub fn mount_with(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config = if config.is_null() || config.is_undefined() {
            PageFxConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| PageFxError::InvalidConfig {
                message: e.to_string(),
                field: None,
            })?
        };
        self.mount_config(config)
    }

    /// Mount the default configuration with only the named diagram presets
    #[wasm_bindgen]
    pub fn mount_presets(&mut self, names: Vec<String>) -> Result<(), JsValue> {
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let config = PresetManager::new()
            .config_with(&names)
            .map_err(PageFxError::from)?;
        self.mount_config(config)
    }

    /// Detach every listener and observer and drop pending callbacks
    #[wasm_bindgen]
    pub fn unmount(&mut self) -> bool {
        match self.instance_id.take() {
            Some(id) => InstanceManager::remove_instance(&id),
            None => false,
        }
    }

    #[wasm_bindgen]
    pub fn is_mounted(&self) -> bool {
        self.instance_id
            .map(|id| InstanceManager::instance_exists(&id))
            .unwrap_or(false)
    }

    /// The active configuration as JSON
    #[wasm_bindgen]
    pub fn config_json(&self) -> Result<String, JsValue> {
        let id = self.instance_id.ok_or_else(|| PageFxError::InstanceNotFound {
            id: "unmounted".to_string(),
        })?;
        let json = InstanceManager::with_instance(&id, |instance| {
            serde_json::to_string(instance.config())
        })
        .ok_or_else(|| PageFxError::InstanceNotFound { id: id.to_string() })?
        .map_err(PageFxError::from)?;
        Ok(json)
    }

    #[wasm_bindgen]
    pub fn preset_names(&self) -> js_sys::Array {
        PresetManager::new()
            .list_presets_by_name()
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }
}

impl PageFx {
    fn mount_config(&mut self, config: PageFxConfig) -> Result<(), JsValue> {
        self.unmount();
        self.instance_id = Some(mount_page(config)?);
        Ok(())
    }
}
