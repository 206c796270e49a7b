pub mod binding;
pub mod component;
pub mod dom;
pub mod js_api;
pub mod platform;
pub mod schedule;

pub use binding::{bind, SharedController};
pub use component::TabcordionGroup;
pub use js_api::{bind_all, tabcordions, Tabcordion};

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}
