//! Donate Page - contract fields, wallet connection and the three contract writes

use leptos::prelude::*;
use shared::bridge::FormField;
use shared::Address;

use crate::state::bridge::use_bridge_context;
use crate::utils::constants::{
    CURRENCY_SYMBOL, DISCONNECT_LABEL, DONATE_LABEL, DONATION_AMOUNT_PLACEHOLDER, PENDING_NOTICE,
    PROPOSED_LIMIT_PLACEHOLDER, PROPOSED_RECEIVER_PLACEHOLDER, SET_LIMIT_LABEL, SET_RECEIVER_LABEL,
};

fn display_address(address: Option<Address>) -> String {
    address.map(|a| a.to_string()).unwrap_or_default()
}

#[component]
pub fn DonatePage() -> impl IntoView {
    let ctx = use_bridge_context();
    let state = ctx.state;

    // Initial read, independent of the wallet connection
    ctx.spawn(|bridge| async move { bridge.load_contract_data().await });

    let contract_address = ctx.contract_address();

    let on_connect = move |_| ctx.spawn(|bridge| async move { bridge.connect().await });
    let on_donate = move |_| ctx.spawn(|bridge| async move { bridge.donate().await });
    let on_set_limit = move |_| ctx.spawn(|bridge| async move { bridge.set_limit().await });
    let on_set_receiver = move |_| ctx.spawn(|bridge| async move { bridge.set_receiver().await });
    let on_disconnect = move |_| ctx.disconnect();

    view! {
        <div class="app-container" style="display: flex; justify-content: center; min-height: calc(100vh - 60px);">
            <div class="card" style="width: 100%; max-width: 640px; padding: var(--spacing-xl);">
                <h3>"Contract Address: " {contract_address}</h3>
                <h3>"Contract Owner: " {move || state.with(|s| display_address(s.views.owner))}</h3>
                <h3>"Connected Wallet: " {move || state.with(|s| display_address(s.connection.account()))}</h3>
                <h3>"Donate to: " {move || state.with(|s| display_address(s.views.receiver))}</h3>
                <h3>
                    "Donation Limit: "
                    {move || state.with(|s| s.views.limit_display())}
                    " " {CURRENCY_SYMBOL}
                </h3>

                <button class="btn" style="width: 100%; margin-bottom: var(--spacing-lg);" on:click=on_connect>
                    {move || state.with(|s| s.connect_label())}
                </button>

                <FormRow
                    field=FormField::DonationAmount
                    placeholder=DONATION_AMOUNT_PLACEHOLDER
                    label=DONATE_LABEL
                    on_submit=on_donate
                />
                <FormRow
                    field=FormField::ProposedLimit
                    placeholder=PROPOSED_LIMIT_PLACEHOLDER
                    label=SET_LIMIT_LABEL
                    on_submit=on_set_limit
                />
                <FormRow
                    field=FormField::ProposedReceiver
                    placeholder=PROPOSED_RECEIVER_PLACEHOLDER
                    label=SET_RECEIVER_LABEL
                    on_submit=on_set_receiver
                />

                <Show when=move || state.with(|s| s.connection.is_connected())>
                    <button
                        class="btn"
                        style="width: 100%; background: var(--bg-error); margin-top: var(--spacing-lg);"
                        on:click=on_disconnect
                    >
                        {DISCONNECT_LABEL}
                    </button>
                </Show>

                <Show when=move || state.with(|s| s.is_busy())>
                    <p style="text-align: center; color: var(--text-secondary); margin-top: var(--spacing-md);">
                        {PENDING_NOTICE}
                    </p>
                </Show>

                {move || {
                    state.with(|s| s.error_message.clone()).map(|message| {
                        view! {
                            <div class="error-message" style="margin-top: var(--spacing-lg); padding: var(--spacing-md); background: var(--bg-error); border-radius: var(--border-radius);">
                                <p style="color: #ffffff; margin: 0; word-break: break-word;">{message}</p>
                            </div>
                        }
                    })
                }}
            </div>
        </div>
    }
}

/// Text input bound to one form field, with the button that submits it.
#[component]
fn FormRow<F>(
    field: FormField,
    placeholder: &'static str,
    label: &'static str,
    on_submit: F,
) -> impl IntoView
where
    F: Fn(leptos::ev::MouseEvent) + 'static,
{
    let ctx = use_bridge_context();
    let state = ctx.state;

    view! {
        <div style="display: flex; gap: var(--spacing-sm); margin-bottom: var(--spacing-md);">
            <input
                type="text"
                style="flex: 1;"
                placeholder=placeholder
                prop:value=move || state.with(|s| s.form.get(field).to_string())
                on:input=move |ev| ctx.set_input(field, event_target_value(&ev))
            />
            <button class="btn" on:click=on_submit>
                {label}
            </button>
        </div>
    }
}
