//! Error taxonomy and the non-error ineligibility enum.

use thiserror::Error;

/// A payload that cleared the structural eligibility gates but carries a field that claims to be
/// hex and isn't. This is a caller bug, not a legitimate "nothing to do here" case, so it's
/// surfaced as `Err` rather than folded into [`Ineligibility`].
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The call object's `to` field is present but not valid 20-byte hex.
    #[error("call object `to` is not a valid 20-byte hex address: {0}")]
    MalformedTo(String),
    /// The call object's `data` field is present but not valid hex.
    #[error("call object `data` is not valid hex: {0}")]
    MalformedData(String),
}

/// Why a payload passed through `compress_call` unchanged. Logged at `debug` and otherwise
/// discardable by the caller — ineligibility is a normal control path, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    /// `method` is present and isn't `eth_call`.
    NotEthCall,
    /// `params[1]` is present and isn't `"latest"`.
    NotLatestBlock,
    /// `params[2]` contains a key other than the Multicall3 address.
    ConflictingOverride,
    /// The call object is missing `to`, is missing `data`, or has `data` of length zero.
    MissingCallFields,
    /// The call object carries a key outside `{to, data, from}`.
    UnexpectedCallField,
    /// `len(data_hex)` is below [`crate::config::MIN_ELIGIBLE_HEX_LEN`].
    BelowSizeThreshold,
    /// The payload is structurally malformed (not an object, missing `params`, wrong arity).
    MalformedPayload,
    /// The chosen rewrite would not have shrunk the request, so it was discarded.
    NotBeneficial,
}

impl std::fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::NotEthCall => "method is not eth_call",
            Self::NotLatestBlock => "block tag is not latest",
            Self::ConflictingOverride => "state override conflicts with the decompressor slot",
            Self::MissingCallFields => "call object is missing to/data",
            Self::UnexpectedCallField => "call object has unexpected fields",
            Self::BelowSizeThreshold => "calldata is below the rewrite size threshold",
            Self::MalformedPayload => "payload is not a well-formed eth_call request",
            Self::NotBeneficial => "rewrite would not have shrunk the request",
        };
        f.write_str(reason)
    }
}
