//! WebAssembly bindings for the board generator.
//!
//! This module exposes board generation to JavaScript through wasm-bindgen.
//! Only compiled with the `wasm` feature.

use wasm_bindgen::prelude::*;

use crate::generator::generate;
use crate::options::{GenerationOptions, DEFAULT_ATTEMPTS};

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Generate a board from JSON options and return it as JSON.
///
/// Empty options use the defaults; a missing `attempts` uses `DEFAULT_ATTEMPTS`.
#[wasm_bindgen(js_name = generateBoard)]
pub fn generate_board(options_json: &str, attempts: Option<u32>) -> Result<String, JsValue> {
    let options = parse_options(options_json).map_err(|e| JsValue::from_str(&e))?;
    let attempts = attempts.map_or(DEFAULT_ATTEMPTS, |a| a as usize);

    let candidate = generate(&options, attempts).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&candidate).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Default options as JSON, for populating a settings form
#[wasm_bindgen(js_name = defaultOptions)]
pub fn default_options() -> String {
    serde_json::to_string(&GenerationOptions::default()).unwrap_or_else(|_| "{}".to_string())
}

fn parse_options(options_json: &str) -> Result<GenerationOptions, String> {
    if options_json.trim().is_empty() {
        return Ok(GenerationOptions::default());
    }
    serde_json::from_str(options_json).map_err(|e| format!("Invalid options: {}", e))
}
