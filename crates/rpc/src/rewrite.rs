//! `compress_call`: the crate's single public entry point.

use alloy_primitives::Address;
use codecs::{cd_compress, cd_forwarder_template, flz_compress, flz_forwarder_template};
use serde_json::{Map, Value};
use synth::synthesise;

use crate::algorithm::{select, Algorithm, Selection};
use crate::config::{DECOMPRESSOR_ADDRESS, MULTICALL3_ADDRESS};
use crate::eligibility::{self, EligibleCall};
use crate::error::{Ineligibility, RewriteError};

fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// One rewrite's bytecode and calldata, before being spliced into the output payload.
struct Rewrite {
    algorithm: Algorithm,
    bytecode: Vec<u8>,
    rewritten_calldata: Vec<u8>,
}

fn build_rewrite(algorithm: Algorithm, to: Address, data: &[u8]) -> Rewrite {
    match algorithm {
        Algorithm::Jit => {
            let bytecode = synthesise(data);
            let rewritten_calldata = to.into_word().to_vec();
            Rewrite { algorithm, bytecode, rewritten_calldata }
        }
        Algorithm::Flz => {
            let bytecode = flz_forwarder_template()
                .with_target(to.into_word()[12..32].try_into().expect("word tail is 20 bytes"));
            let rewritten_calldata = flz_compress(data);
            Rewrite { algorithm, bytecode, rewritten_calldata }
        }
        Algorithm::Cd => {
            let bytecode = cd_forwarder_template()
                .with_target(to.into_word()[12..32].try_into().expect("word tail is 20 bytes"));
            let rewritten_calldata = cd_compress(data);
            Rewrite { algorithm, bytecode, rewritten_calldata }
        }
    }
}

fn choose_rewrite(hint: Option<Algorithm>, to: Address, data: &[u8], data_hex_len: usize) -> Rewrite {
    if let Some(algorithm) = hint {
        return build_rewrite(algorithm, to, data);
    }
    match select(data_hex_len) {
        Selection::Jit => build_rewrite(Algorithm::Jit, to, data),
        Selection::CompareFlzAndCd => {
            let flz = build_rewrite(Algorithm::Flz, to, data);
            let cd = build_rewrite(Algorithm::Cd, to, data);
            if flz.bytecode.len() + flz.rewritten_calldata.len() <= cd.bytecode.len() + cd.rewritten_calldata.len() {
                flz
            } else {
                cd
            }
        }
    }
}

/// Splices `rewrite` into a clone of `payload`, normalising the legacy top-level call shape into
/// the canonical `{method, params: [call, block, overrides]}` envelope along the way — the state
/// override this rewrite depends on has nowhere else to live.
fn splice(payload: &Value, rewrite: &Rewrite) -> Value {
    let mut out = payload.as_object().cloned().unwrap_or_default();

    let mut params = match out.remove("params") {
        Some(Value::Array(params)) => params,
        _ => {
            let mut call = Map::new();
            for key in ["to", "data", "from"] {
                if let Some(value) = out.remove(key) {
                    call.insert(key.to_string(), value);
                }
            }
            vec![Value::Object(call)]
        }
    };

    let mut call = params.first().and_then(Value::as_object).cloned().unwrap_or_default();
    call.insert("to".to_string(), Value::String(DECOMPRESSOR_ADDRESS.to_string()));
    call.insert("data".to_string(), Value::String(format!("0x{}", hex::encode(&rewrite.rewritten_calldata))));
    if params.is_empty() {
        params.push(Value::Object(call));
    } else {
        params[0] = Value::Object(call);
    }

    match params.get(1) {
        Some(Value::Null) | None => {
            if params.len() < 2 {
                params.push(Value::String("latest".to_string()));
            } else {
                params[1] = Value::String("latest".to_string());
            }
        }
        Some(_) => {}
    }

    let mut overrides = params.get(2).and_then(Value::as_object).cloned().unwrap_or_default();
    let mut entry = Map::new();
    entry.insert("code".to_string(), Value::String(format!("0x{}", hex::encode(&rewrite.bytecode))));
    overrides.insert(DECOMPRESSOR_ADDRESS.to_string(), Value::Object(entry));
    if params.len() < 3 {
        params.push(Value::Object(overrides));
    } else {
        params[2] = Value::Object(overrides);
    }

    out.insert("params".to_string(), Value::Array(params));
    Value::Object(out)
}

/// Inspects `payload`, validates eligibility, selects among JIT/FLZ/CD (or honours `hint` if
/// given), and returns either `payload` unchanged or a rewritten payload that targets the fixed
/// decompressor address.
///
/// # Errors
/// Returns [`RewriteError`] when a field that cleared the structural eligibility gates (`to`,
/// `data`, or an override key) isn't valid hex — a caller bug, distinct from ordinary
/// ineligibility.
#[tracing::instrument(skip(payload), fields(hint = ?hint))]
pub fn compress_call(payload: &Value, hint: Option<Algorithm>) -> Result<Value, RewriteError> {
    let EligibleCall { to_hex, data_hex } = match eligibility::check(payload) {
        Ok(eligible) => eligible,
        Err(reason) => {
            tracing::debug!(%reason, "payload ineligible for rewrite");
            return Ok(payload.clone());
        }
    };

    let to = to_hex
        .parse::<Address>()
        .map_err(|_| RewriteError::MalformedTo(to_hex.to_string()))?;
    let data = hex::decode(strip_0x(data_hex)).map_err(|_| RewriteError::MalformedData(data_hex.to_string()))?;
    let data_hex_len = strip_0x(data_hex).len();

    let rewrite = choose_rewrite(hint, to, &data, data_hex_len);
    let total_len = rewrite.bytecode.len() + rewrite.rewritten_calldata.len();
    tracing::info!(algorithm = ?rewrite.algorithm, original_len = data.len(), rewritten_len = total_len, "selected rewrite");

    if total_len >= data.len() {
        tracing::warn!(reason = %Ineligibility::NotBeneficial, "discarding rewrite");
        return Ok(payload.clone());
    }

    Ok(splice(payload, &rewrite))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eligible_payload(data_hex: &str) -> Value {
        json!({
            "method": "eth_call",
            "params": [
                { "to": "0x1111111111111111111111111111111111111111", "data": data_hex },
                "latest",
            ],
        })
    }

    #[test]
    fn below_threshold_passes_through_unchanged() {
        let data_hex = format!("0x{}", "00".repeat(100));
        let payload = eligible_payload(&data_hex);
        let out = compress_call(&payload, None).unwrap();
        assert_eq!(out, payload);
    }

    #[test]
    fn non_eth_call_method_passes_through_unchanged() {
        let mut payload = eligible_payload(&format!("0x{}", "ab".repeat(600)));
        payload["method"] = json!("eth_sendTransaction");
        let out = compress_call(&payload, None).unwrap();
        assert_eq!(out, payload);
    }

    #[test]
    fn non_latest_block_passes_through_unchanged() {
        let mut payload = eligible_payload(&format!("0x{}", "ab".repeat(600)));
        payload["params"][1] = json!("0x123456");
        let out = compress_call(&payload, None).unwrap();
        assert_eq!(out, payload);
    }

    #[test]
    fn decompressor_address_override_is_rejected() {
        let mut payload = eligible_payload(&format!("0x{}", "ab".repeat(600)));
        payload["params"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "0x00000000000000000000000000000000000000e0": { "code": "0x1234" } }));
        let out = compress_call(&payload, None).unwrap();
        assert_eq!(out, payload);
    }

    #[test]
    fn jit_hint_rewrites_eligible_payload() {
        let payload = eligible_payload(&format!("0x{}", "ab".repeat(600)));
        let out = compress_call(&payload, Some(Algorithm::Jit)).unwrap();
        assert_ne!(out, payload);
        let rewritten_to = out["params"][0]["to"].as_str().unwrap();
        assert_eq!(rewritten_to.to_lowercase(), DECOMPRESSOR_ADDRESS.to_string().to_lowercase());
        let overrides = out["params"][2].as_object().unwrap();
        assert_eq!(overrides.len(), 1);
    }

    #[test]
    fn preserves_existing_multicall_override_entry() {
        let mut payload = eligible_payload(&format!("0x{}", "ab".repeat(600)));
        payload["params"].as_array_mut().unwrap().push(json!({
            "0xca11bde05977b3631167028862be2a173976ca11": { "balance": "0x1" }
        }));
        let out = compress_call(&payload, Some(Algorithm::Jit)).unwrap();
        let overrides = out["params"][2].as_object().unwrap();
        assert_eq!(overrides.len(), 2);
        assert!(overrides.contains_key("0xca11bde05977b3631167028862be2a173976ca11"));
    }

    #[test]
    fn malformed_to_is_an_error_not_ineligibility() {
        let mut payload = eligible_payload(&format!("0x{}", "ab".repeat(600)));
        payload["params"][0]["to"] = json!("not-hex");
        assert!(compress_call(&payload, None).is_err());
    }
}
