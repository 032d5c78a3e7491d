//! Local persistence for the last submitted calculation request.
//!
//! Web builds use `localStorage`; native builds keep one JSON file per key in
//! the platform data directory. Every failure here is non-fatal: a broken or
//! missing cache behaves exactly like an empty one.

use std::cell::RefCell;
use std::collections::HashMap;

use api::CalculationRequest;

/// Raw string storage keyed by name.
pub trait PayloadBackend {
    fn read(&self, key: &str) -> Result<Option<String>, String>;
    fn write(&self, key: &str, value: &str) -> Result<(), String>;
}

/// Platform storage: `localStorage` on the web, a data-dir file elsewhere.
#[derive(Debug, Clone, Default)]
pub struct LocalBackend {
    #[cfg(not(target_arch = "wasm32"))]
    dir: Option<std::path::PathBuf>,
}

impl LocalBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores files under `dir` instead of the platform data directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn in_dir(dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn path_for(&self, key: &str) -> Result<std::path::PathBuf, String> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => crate::core::platform::data_dir()?,
        };
        Ok(dir.join(format!("{key}.json")))
    }
}

#[cfg(target_arch = "wasm32")]
impl PayloadBackend for LocalBackend {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        local_storage()?
            .get_item(key)
            .map_err(|_| "localStorage read failed".to_string())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| "localStorage write failed".to_string())
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .ok_or("window unavailable")?
        .local_storage()
        .map_err(|_| "localStorage blocked".to_string())?
        .ok_or_else(|| "localStorage unavailable".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
impl PayloadBackend for LocalBackend {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("{}: {err}", path.display())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| err.to_string())?;
        }
        std::fs::write(&path, value).map_err(|err| format!("{}: {err}", path.display()))
    }
}

/// Process-local storage, used by tests and as a last resort.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
}

impl PayloadBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Session-owned cache of the last request sent to the calculation service.
///
/// Created once per session and handed to whoever needs it; there is no
/// global instance.
pub struct LastRequestCache {
    key: String,
    backend: Box<dyn PayloadBackend>,
}

impl LastRequestCache {
    pub fn new(key: impl Into<String>, backend: impl PayloadBackend + 'static) -> Self {
        Self {
            key: key.into(),
            backend: Box::new(backend),
        }
    }

    pub fn local(key: impl Into<String>) -> Self {
        Self::new(key, LocalBackend::new())
    }

    pub fn in_memory(key: impl Into<String>) -> Self {
        Self::new(key, MemoryBackend::default())
    }

    /// Last stored request, or `None` when absent, unreadable or corrupt.
    pub fn load(&self) -> Option<CalculationRequest> {
        let raw = match self.backend.read(&self.key) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::debug!(key = %self.key, %err, "request cache read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(request) => Some(request),
            Err(err) => {
                tracing::debug!(key = %self.key, %err, "ignoring corrupt request cache");
                None
            }
        }
    }

    /// Persists `request`; failures are logged and otherwise ignored.
    pub fn store(&self, request: &CalculationRequest) {
        let serialized = match serde_json::to_string(request) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::debug!(%err, "request cache serialisation failed");
                return;
            }
        };
        if let Err(err) = self.backend.write(&self.key, &serialized) {
            tracing::debug!(key = %self.key, %err, "request cache write failed");
        }
    }
}

impl std::fmt::Debug for LastRequestCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastRequestCache")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::UseTypeArea;

    struct BrokenBackend;

    impl PayloadBackend for BrokenBackend {
        fn read(&self, _key: &str) -> Result<Option<String>, String> {
            Err("disk on fire".into())
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), String> {
            Err("disk on fire".into())
        }
    }

    fn request() -> CalculationRequest {
        CalculationRequest {
            building_name: "Main St".into(),
            use_types: vec![UseTypeArea {
                use_type: "Office".into(),
                area: 50_000.0,
            }],
            gas: 12.5,
            ..Default::default()
        }
    }

    #[test]
    fn store_then_load_returns_request() {
        let cache = LastRequestCache::in_memory("lastPayload");
        assert!(cache.load().is_none());
        cache.store(&request());
        assert_eq!(cache.load(), Some(request()));
    }

    #[test]
    fn corrupt_contents_behave_as_empty() {
        let backend = MemoryBackend::default();
        backend.write("lastPayload", "{not json").unwrap();
        let cache = LastRequestCache::new("lastPayload", backend);
        assert!(cache.load().is_none());
    }

    #[test]
    fn backend_failures_are_swallowed() {
        let cache = LastRequestCache::new("lastPayload", BrokenBackend);
        cache.store(&request());
        assert!(cache.load().is_none());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn local_backend_round_trips_through_files() {
        let dir = std::env::temp_dir().join(format!("ll97-cache-test-{}", std::process::id()));
        let cache = LastRequestCache::new("lastPayload", LocalBackend::in_dir(&dir));
        cache.store(&request());

        let raw = std::fs::read_to_string(dir.join("lastPayload.json")).unwrap();
        assert!(raw.contains("\"buildingName\":\"Main St\""));
        assert_eq!(cache.load(), Some(request()));

        std::fs::remove_dir_all(&dir).ok();
    }
}
