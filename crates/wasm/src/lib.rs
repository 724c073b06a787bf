//! wasm-bindgen bindings for the `soundmeter` crate.

mod sound_meter;
pub use sound_meter::SoundMeter;

use wasm_bindgen::prelude::*;

// Panics show up in the browser console instead of as `unreachable`
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Buffer size the browser demo uses for its script processor.
#[wasm_bindgen]
pub fn default_capacity() -> usize {
    soundmeter::config::DEFAULT_CAPACITY
}
