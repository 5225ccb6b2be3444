//! Injected Ethereum Provider via wasm-bindgen
//!
//! JavaScript interop for the EIP-1193 object wallets such as MetaMask inject as
//! `window.ethereum`. Detection is by presence only; there is no version negotiation.

use async_trait::async_trait;
use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use serde_json::Value;
use shared::rpc::{Eip1193, RpcError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

// ============================================================================
// PROVIDER DETECTION (JavaScript Interop)
// ============================================================================

#[wasm_bindgen(inline_js = "
export function injectedEthereum() {
    if (typeof window === 'undefined' || typeof window.ethereum === 'undefined') {
        return null;
    }
    return window.ethereum;
}
")]
extern "C" {
    /// The injected provider object, or null when no wallet extension is installed
    fn injectedEthereum() -> Option<JsValue>;
}

// ============================================================================
// EIP-1193 PROVIDER
// ============================================================================

/// `{ method, params }` as passed to `ethereum.request`.
#[derive(Serialize)]
struct RequestArguments<'a> {
    method: &'a str,
    params: &'a Value,
}

/// The wallet provider injected into the page.
#[derive(Clone)]
pub struct InjectedProvider {
    ethereum: JsValue,
}

impl InjectedProvider {
    /// `None` when no wallet is installed.
    pub fn detect() -> Option<Self> {
        injectedEthereum()
            .filter(|ethereum| !ethereum.is_null() && !ethereum.is_undefined())
            .map(|ethereum| Self { ethereum })
    }

    pub fn is_metamask(&self) -> bool {
        Reflect::get(&self.ethereum, &JsValue::from_str("isMetaMask"))
            .map(|flag| flag.is_truthy())
            .unwrap_or(false)
    }

    fn request_fn(&self) -> Result<Function, RpcError> {
        Reflect::get(&self.ethereum, &JsValue::from_str("request"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| RpcError::internal("injected provider has no request method"))
    }
}

#[async_trait(?Send)]
impl Eip1193 for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        // JSON round trip keeps params as plain objects; wallets reject JS Maps
        let args = <JsValue as JsValueSerdeExt>::from_serde(&RequestArguments {
            method,
            params: &params,
        })
        .map_err(|e| RpcError::internal(format!("failed to encode {} request: {}", method, e)))?;

        let promise = self
            .request_fn()?
            .call1(&self.ethereum, &args)
            .map_err(rpc_error_from_js)?
            .dyn_into::<Promise>()
            .map_err(|_| RpcError::internal("ethereum.request did not return a promise"))?;

        let result = JsFuture::from(promise).await.map_err(rpc_error_from_js)?;
        if result.is_null() || result.is_undefined() {
            return Ok(Value::Null);
        }

        result
            .into_serde::<Value>()
            .map_err(|e| RpcError::internal(format!("failed to decode {} response: {}", method, e)))
    }

    async fn delay(&self, ms: u32) {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}

/// Read `{ code, message, data }` off a rejected promise value.
fn rpc_error_from_js(value: JsValue) -> RpcError {
    match serde_wasm_bindgen::from_value::<RpcError>(value.clone()) {
        Ok(err) if !err.message.is_empty() => err,
        _ => RpcError::internal(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        ),
    }
}
