//! The whole selection policy's numeric knobs, gathered in one place rather than scattered as
//! magic numbers through the rewriter.

use alloy_primitives::Address;

/// The address at which the synthesised (or forwarder) bytecode is installed via state override.
/// Its last byte is `0xe0` so it can be synthesised from a bare `ADDRESS` opcode.
pub const DECOMPRESSOR_ADDRESS: Address = Address::new([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xe0,
]);

/// The only override key tolerated alongside the decompressor's, matching Multicall3's
/// well-known deployment address across EVM chains.
pub const MULTICALL3_ADDRESS: Address = Address::new([
    0xca, 0x11, 0xbd, 0xe0, 0x59, 0x77, 0xb3, 0x63, 0x11, 0x67, 0x02, 0x88, 0x62, 0xbe, 0x2a, 0x17, 0x39, 0x76, 0xca,
    0x11,
]);

/// Minimum `data` length, in hex characters, for a call to be eligible for rewriting at all.
pub const MIN_ELIGIBLE_HEX_LEN: usize = 1150;

/// Below this hex length, JIT synthesis is chosen outright (FLZ/CD overhead isn't worth paying).
pub const JIT_LOWER_BOUND_HEX_LEN: usize = 3000;

/// At or above this hex length, JIT synthesis is chosen outright (bytecode size advantage over
/// compressed-forwarding widens enough that comparing FLZ/CD isn't worth the extra work).
pub const JIT_UPPER_BOUND_HEX_LEN: usize = 8000;
