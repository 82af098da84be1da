/// CloudWatch Log Opener - Chrome Extension for CloudWatch console deep links
/// Built with Rust + WASM + Yew

pub mod command;
pub mod deep_link;
pub mod escape;
pub mod log_data;
pub mod storage;
pub mod suggestions;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the console-URL check for JavaScript access
#[wasm_bindgen]
pub fn is_cloudwatch_url(url: &str) -> bool {
    deep_link::is_cloudwatch_url(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::Options>::new().render();
}
