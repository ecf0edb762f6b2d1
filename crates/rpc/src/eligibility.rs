//! Structural eligibility gates. Every failure here is a normal "nothing to do" outcome, not an
//! error — hex validity of fields that passed these gates is checked later, in [`crate::rewrite`],
//! where a failure there is a caller bug rather than ineligibility.

use serde_json::Value;

use crate::config::{MIN_ELIGIBLE_HEX_LEN, MULTICALL3_ADDRESS};
use crate::error::Ineligibility;
use crate::payload::{self, PayloadShape};

/// A payload's call object, verified to have exactly the allowed keys, a non-empty `data`, and a
/// `data` long enough to be worth rewriting.
pub struct EligibleCall<'a> {
    /// `call.to`, unparsed.
    pub to_hex: &'a str,
    /// `call.data`, unparsed.
    pub data_hex: &'a str,
}

/// Runs every structural gate from this crate's eligibility policy, short-circuiting on the first
/// failure.
pub fn check<'a>(payload: &'a Value) -> Result<EligibleCall<'a>, Ineligibility> {
    if let Some(method) = payload::method(payload) {
        if method != "eth_call" {
            return Err(Ineligibility::NotEthCall);
        }
    }

    let PayloadShape { call, block_tag, overrides } =
        payload::shape(payload).ok_or(Ineligibility::MalformedPayload)?;

    if let Some(block_tag) = block_tag {
        if block_tag.as_str() != Some("latest") {
            return Err(Ineligibility::NotLatestBlock);
        }
    }

    if let Some(overrides) = overrides {
        let multicall_hex = MULTICALL3_ADDRESS.to_string();
        if !payload::overrides_only_key_is(overrides, multicall_hex.trim_start_matches("0x")) {
            return Err(Ineligibility::ConflictingOverride);
        }
    }

    if !payload::has_only_allowed_call_keys(call) {
        return Err(Ineligibility::UnexpectedCallField);
    }

    let (to_hex, data_hex) = payload::call_to_and_data(call).ok_or(Ineligibility::MissingCallFields)?;

    let hex_len = data_hex.trim_start_matches("0x").len();
    if hex_len < MIN_ELIGIBLE_HEX_LEN {
        return Err(Ineligibility::BelowSizeThreshold);
    }

    Ok(EligibleCall { to_hex, data_hex })
}
