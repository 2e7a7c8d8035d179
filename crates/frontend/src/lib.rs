pub mod domain;
pub mod shared;
pub mod system;

use wasm_bindgen::prelude::wasm_bindgen;

/// Console logging via the `log` crate plus readable panics.
pub fn init_logging() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}

#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
    log::info!("radio compliance client v{} started", env!("CARGO_PKG_VERSION"));
}
