//! JSON-RPC payload shape helpers.
//!
//! The incoming payload is kept as a `serde_json::Value` throughout rather than deserialised into
//! a rigid struct: the call object's key set, the presence of `params[1]`/`params[2]`, and the
//! legacy call-object-at-top-level shape all vary by caller, and the rewriter's job is to produce
//! a payload that differs from the input in exactly three places. Manipulating the `Value` in
//! place keeps every untouched field byte-identical to what the caller sent.

use serde_json::{Map, Value};

/// The only keys a call object may carry.
const ALLOWED_CALL_KEYS: [&str; 3] = ["to", "data", "from"];

/// A payload's call object, block tag, and state-override positions, borrowed from the original
/// `Value`. `None` for a position means the caller omitted it.
pub struct PayloadShape<'a> {
    /// The call object (`params[0]`, or the payload itself for the legacy top-level shape).
    pub call: &'a Map<String, Value>,
    /// `params[1]`, the block tag.
    pub block_tag: Option<&'a Value>,
    /// `params[2]`, the state overrides.
    pub overrides: Option<&'a Value>,
}

/// Reads `payload.method`, if present as a string.
pub fn method(payload: &Value) -> Option<&str> {
    payload.get("method").and_then(Value::as_str)
}

/// Splits `payload` into its call object, block tag, and overrides, supporting both the
/// `{method, params: [call, block, overrides]}` envelope and the legacy shape where the call
/// object's fields sit directly alongside `method` at the top level.
pub fn shape(payload: &Value) -> Option<PayloadShape<'_>> {
    let obj = payload.as_object()?;
    match obj.get("params") {
        Some(Value::Array(params)) => {
            let call = params.first()?.as_object()?;
            Some(PayloadShape { call, block_tag: params.get(1), overrides: params.get(2) })
        }
        Some(_) => None,
        None => Some(PayloadShape { call: obj, block_tag: None, overrides: None }),
    }
}

/// Whether `call`'s keys are a subset of `{to, data, from}`, ignoring `method` (which sits
/// alongside the call object's own fields in the legacy top-level shape).
pub fn has_only_allowed_call_keys(call: &Map<String, Value>) -> bool {
    call.keys().all(|key| key == "method" || ALLOWED_CALL_KEYS.contains(&key.as_str()))
}

/// Extracts `call.to` and `call.data` as strings, if both are present and `data` is non-empty.
pub fn call_to_and_data(call: &Map<String, Value>) -> Option<(&str, &str)> {
    let to = call.get("to")?.as_str()?;
    let data = call.get("data")?.as_str()?;
    if data.is_empty() || data == "0x" {
        return None;
    }
    Some((to, data))
}

/// Whether every key in `overrides` case-insensitively equals `allowed_address_hex`.
pub fn overrides_only_key_is(overrides: &Value, allowed_address_hex: &str) -> bool {
    match overrides.as_object() {
        Some(map) => map.keys().all(|key| key.trim_start_matches("0x").eq_ignore_ascii_case(allowed_address_hex)),
        None => false,
    }
}
