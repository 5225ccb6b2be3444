//! Navigation Bar Component

use leptos::prelude::*;
use shared::truncate_address;

use crate::state::bridge::use_bridge_context;
use crate::utils::constants::APP_TITLE;

#[component]
pub fn Navbar() -> impl IntoView {
    let state = use_bridge_context().state;

    let account = move || {
        state.with(|s| {
            s.connection
                .account()
                .map(|a| truncate_address(&a.to_string()))
        })
    };

    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <a href="/" class="nav-link-clean">
                    <span class="nav-title">{APP_TITLE}</span>
                </a>
                <span class="nav-account" style="font-family: monospace;">{account}</span>
            </div>
        </nav>
    }
}
