//! Donate dApp - Leptos front end for the Donate contract
//!
//! Connects the injected browser wallet, shows the contract's public fields, and
//! forwards donate / set-limit / set-receiver clicks to the bridge in `shared`.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

mod app;
mod components;
mod pages;
mod services;
mod state;
mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    log::info!("Donate dApp starting");

    hide_loading_screen();

    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the static loading screen from index.html once the wasm module is running.
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document available, leaving loading screen");
        return;
    };

    let Some(loading_element) = document.get_element_by_id(utils::constants::LOADING_ELEMENT_ID) else {
        log::debug!("loading element not found");
        return;
    };

    if let Some(html_element) = loading_element.dyn_ref::<HtmlElement>() {
        if let Err(e) = html_element.class_list().add_1("hidden") {
            log::warn!("failed to add 'hidden' class: {:?}", e);
        }
    }

    // Also set display:none in case the stylesheet has not loaded
    if let Err(e) = loading_element.set_attribute("style", "display: none !important;") {
        log::warn!("failed to hide loading screen: {:?}", e);
    }
}
