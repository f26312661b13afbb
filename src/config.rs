use wasm_bindgen::JsValue;
use web_sys::Storage;

const BASE_URL_KEY: &str = "apiBaseUrl";

/// Origin-scoped persistence for the one piece of client configuration:
/// the API base URL last used for a load.
pub struct ConfigStore {
    storage: Storage,
}

impl ConfigStore {
    pub fn new() -> Result<ConfigStore, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let storage = window
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("localStorage not available"))?;
        Ok(ConfigStore { storage })
    }

    /// Absent storage is a normal empty result, not a failure.
    pub fn base_url(&self) -> Option<String> {
        self.storage.get_item(BASE_URL_KEY).ok().flatten()
    }

    /// Overwrites unconditionally; survives reloads and browser restarts
    /// for the same origin.
    pub fn set_base_url(&self, value: &str) {
        if let Err(e) = self.storage.set_item(BASE_URL_KEY, value) {
            tracing::warn!("Failed to persist base URL: {:?}", e);
        }
    }
}
