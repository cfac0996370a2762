mod analyzer;
mod api;
mod app;
mod components;
mod config;
mod models;
mod pages;
mod session;
mod state;
mod storage;
mod util;

#[cfg(test)]
mod fake_backend;

pub use app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) fails harmlessly.
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("sentiment-app starting, api at {}", config::EnvConfig::new().api_url);
    mount_to_body(App);
}
