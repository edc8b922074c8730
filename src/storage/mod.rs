use crate::models::SessionUser;
use serde::{Deserialize, Serialize};

pub(crate) const TOKEN_KEY: &str = "corkboard_token";
pub(crate) const USER_KEY: &str = "corkboard_user";

/// The outer shell writes the session snapshot on login; we only read it
/// back. Kept symmetric anyway so wasm tests can exercise the round-trip.
pub(crate) fn save_user_to_storage(user: &SessionUser) {
    save_json_to_storage(USER_KEY, user);
}

pub(crate) fn load_user_from_storage() -> Option<SessionUser> {
    load_json_from_storage::<SessionUser>(USER_KEY)
}

pub(crate) fn load_token_from_storage() -> Option<String> {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
    storage.get_item(TOKEN_KEY).ok().flatten()
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(key, &json);
        }
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` +
// wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn session_user_storage_roundtrip() {
        let user = SessionUser {
            user_id: "u-1".to_string(),
            email: "u@example.com".to_string(),
            name: "u".to_string(),
        };
        save_user_to_storage(&user);

        let loaded = load_user_from_storage().expect("should load user from localStorage");
        assert_eq!(loaded, user);
    }

    #[wasm_bindgen_test]
    fn missing_token_loads_as_none() {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(TOKEN_KEY);
        }
        assert!(load_token_from_storage().is_none());
    }
}
