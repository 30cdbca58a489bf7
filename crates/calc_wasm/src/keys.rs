//! Keymap loading from JS values.

use calc_core::keymap::{Binding, Keymap};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// `undefined`/`null` selects the built-in table; anything else must be an array of
/// `{combo, label, command}` objects.
pub(crate) fn keymap_from_js(bindings: JsValue) -> Result<Keymap, JsValue> {
    if bindings.is_undefined() || bindings.is_null() {
        return Ok(Keymap::default());
    }
    let bindings: Vec<Binding> = from_value(bindings)
        .map_err(|e| JsValue::from_str(&format!("Invalid key bindings: {}", e)))?;
    Keymap::from_bindings(bindings).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn bindings_to_js(keymap: &Keymap) -> Result<JsValue, JsValue> {
    to_value(keymap.bindings())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
