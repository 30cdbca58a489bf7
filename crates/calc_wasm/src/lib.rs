//! Browser bridge for the Calc page.
//!
//! The page holds a single [`WasmCalculator`] and re-reads `input()` and `stack()`
//! after every call to re-render. All state changes go through this type.

mod calculator;
mod keys;

pub use calculator::WasmCalculator;
