//! LocalStorage access (WASM) with native no-op stubs
//!
//! All persistence in the game goes through these string get/set helpers,
//! so the save layer itself stays platform-agnostic and testable.

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Read a string value from LocalStorage.
#[cfg(target_arch = "wasm32")]
pub fn get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

/// Write a string value to LocalStorage. Returns false if storage is
/// unavailable or the write was rejected (quota, private mode).
#[cfg(target_arch = "wasm32")]
pub fn set(key: &str, value: &str) -> bool {
    match local_storage() {
        Some(storage) => storage.set_item(key, value).is_ok(),
        None => false,
    }
}

/// Remove a key from LocalStorage.
#[cfg(target_arch = "wasm32")]
pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn get(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set(_key: &str, _value: &str) -> bool {
    false
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove(_key: &str) {
    // No-op for native
}
