//! Session wrapper exported to JS.

use crate::keys::{bindings_to_js, keymap_from_js};
use calc_core::dispatcher::{CalcState, Command};
use calc_core::keymap::{KeyChord, Keymap};
use calc_core::queue::CommandQueue;
use calc_core::CommandError;
use js_sys::Float64Array;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmCalculator {
    state: CalcState,
    keymap: Keymap,
    queue: CommandQueue,
}

fn to_js_error(err: CommandError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

impl WasmCalculator {
    fn apply_pending(&mut self) {
        let state = std::mem::take(&mut self.state);
        self.state = self.queue.drain(state);
    }
}

#[wasm_bindgen]
impl WasmCalculator {
    /// `bindings` is optional; omit it to use the default key table.
    #[wasm_bindgen(constructor)]
    pub fn new(bindings: JsValue) -> Result<WasmCalculator, JsValue> {
        console_error_panic_hook::set_once();

        Ok(WasmCalculator {
            state: CalcState::new(),
            keymap: keymap_from_js(bindings)?,
            queue: CommandQueue::new(),
        })
    }

    /// Queues the command bound to `combo` (e.g. `"shift+escape"`) without applying it.
    pub fn enqueue_key(&mut self, combo: &str) -> Result<(), JsValue> {
        let command = self.keymap.resolve(combo).map_err(to_js_error)?;
        self.queue.push(command);
        Ok(())
    }

    /// Queues a keyboard event, as reported by `KeyboardEvent`.
    pub fn enqueue_key_event(
        &mut self,
        key: &str,
        ctrl: bool,
        alt: bool,
        shift: bool,
        meta: bool,
    ) -> Result<(), JsValue> {
        let chord = KeyChord::from_event(key, ctrl, alt, shift, meta);
        let command = self.keymap.resolve_chord(&chord).map_err(to_js_error)?;
        self.queue.push(command);
        Ok(())
    }

    /// Queues a command by name (`"Digit4"`, `"Submit"`, `"Mul"`, ...).
    pub fn enqueue_command(&mut self, name: &str) -> Result<(), JsValue> {
        let command: Command = name.parse().map_err(to_js_error)?;
        self.queue.push(command);
        Ok(())
    }

    /// Queues new content of the editable input field.
    pub fn enqueue_edit(&mut self, text: &str) {
        self.queue.push_edit(text);
    }

    /// Applies everything queued, in arrival order.
    pub fn flush(&mut self) {
        self.apply_pending();
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn press_key(&mut self, combo: &str) -> Result<(), JsValue> {
        self.enqueue_key(combo)?;
        self.apply_pending();
        Ok(())
    }

    pub fn command(&mut self, name: &str) -> Result<(), JsValue> {
        self.enqueue_command(name)?;
        self.apply_pending();
        Ok(())
    }

    pub fn edit(&mut self, text: &str) {
        self.enqueue_edit(text);
        self.apply_pending();
    }

    pub fn input(&self) -> String {
        self.state.input.as_str().to_string()
    }

    /// Stack entries as `[{value, label}, ...]`, bottom first.
    pub fn stack(&self) -> Result<JsValue, JsValue> {
        to_value(self.state.stack.entries())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn stack_values(&self) -> Float64Array {
        let values: Vec<f64> = self.state.stack.entries().iter().map(|e| e.value).collect();
        Float64Array::from(values.as_slice())
    }

    pub fn stack_len(&self) -> usize {
        self.state.stack.len()
    }

    /// The binding table, for the help overlay.
    pub fn bindings(&self) -> Result<JsValue, JsValue> {
        bindings_to_js(&self.keymap)
    }
}
