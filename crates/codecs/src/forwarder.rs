//! Forwarder bytecode templates paired with the FLZ and CD codecs.
//!
//! Each template decompresses its own calldata in-EVM (replaying the matching codec's wire
//! format byte by byte into a scratch memory region) before forwarding the reconstructed bytes to
//! the spliced target address and relaying whatever that sub-call returns. This mirrors what the
//! JIT path's synthesised bytecode does for [`crate::flz_compress`]/[`crate::cd_compress`]'s
//! counterpart on the `jitcc_synth` side: a caller must never be able to tell, from the outside,
//! which algorithm a rewrite picked.
//!
//! Both decoder loops are built with [`crate::decoder_asm::Asm`] rather than hand-assembled byte
//! arrays, since their jump offsets depend on the exact length of a loop body that, unlike the
//! old passthrough template, is no longer a handful of straight-line opcodes.

use asm::Mnemonic;

use crate::decoder_asm::Asm;

/// Byte offset, within every template built here, of the read cursor into calldata.
const READ_POS: u64 = 0x00;
/// Byte offset of the write cursor into the output region.
const WRITE_POS: u64 = 0x20;
/// Byte offset of the generic scratch counter (a literal run's remaining length, or a literal
/// span's byte count).
const COUNT: u64 = 0x40;

/// A forwarder template's bytecode, paired with the byte offset of its `PUSH20` address operand
/// so a caller can splice in the actual forwarding target.
pub struct ForwarderTemplate {
    bytecode: Vec<u8>,
    address_operand_offset: usize,
}

impl ForwarderTemplate {
    /// Splices `target` into this template's `PUSH20` operand, returning deployable bytecode.
    #[must_use]
    pub fn with_target(&self, target: [u8; 20]) -> Vec<u8> {
        let mut bytecode = self.bytecode.clone();
        let start = self.address_operand_offset;
        bytecode[start..start + 20].copy_from_slice(&target);
        bytecode
    }
}

/// Appends the shared `CALL`-and-relay trailer: forwards `mem[out_base..write_pos]` to the
/// (not-yet-spliced) target address and relays the sub-call's return data verbatim.
fn emit_call_trailer(asm: &mut Asm, out_base: u64) {
    asm.push(0, 0); // retSize
    asm.push(0, 0); // retOffset
    asm.push(1, out_base);
    asm.mload(WRITE_POS);
    asm.op(Mnemonic::SUB); // argsSize = write_pos - out_base
    asm.push(1, out_base); // argsOffset
    asm.push(0, 0); // value
    asm.push_address_placeholder();
    asm.op(Mnemonic::GAS);
    asm.op(Mnemonic::CALL);
    asm.op(Mnemonic::POP); // discard success flag, matching the JIT echo trailer's own disregard of it
    asm.op(Mnemonic::RETURNDATASIZE);
    asm.push(0, 0);
    asm.push(0, 0);
    asm.op(Mnemonic::RETURNDATACOPY);
    asm.op(Mnemonic::RETURNDATASIZE);
    asm.push(0, 0);
    asm.op(Mnemonic::RETURN);
}

/// Appends `read_pos = 0; write_pos = out_base`.
fn emit_init(asm: &mut Asm, out_base: u64) {
    asm.push(0, 0);
    asm.mstore(READ_POS);
    asm.push(1, out_base);
    asm.mstore(WRITE_POS);
}

/// Appends the shared loop-head bound check: jumps to `done` once `read_pos >= CALLDATASIZE`.
fn emit_bounds_check(asm: &mut Asm) {
    asm.op(Mnemonic::CALLDATASIZE);
    asm.mload(READ_POS);
    asm.op(Mnemonic::LT); // read_pos < calldatasize
    asm.op(Mnemonic::ISZERO);
    asm.push_label("done");
    asm.op(Mnemonic::JUMPI);
}

/// Builds the CD (run-length) decoder: a tag byte of `0` is a literal-span escape (`count` byte,
/// then `count` literal bytes); a tag byte `n > 0` is a run of `n` repeats of the following byte.
fn cd_decoder() -> (Vec<u8>, usize) {
    const BYTE_VAL: u64 = 0x60;
    const OUT_BASE: u64 = 0x80;

    let mut asm = Asm::new();
    emit_init(&mut asm, OUT_BASE);

    asm.label("loop");
    emit_bounds_check(&mut asm);

    asm.mload(READ_POS);
    asm.op(Mnemonic::CALLDATALOAD);
    asm.push(1, 248);
    asm.op(Mnemonic::SHR); // stack: [tag]

    asm.op(Mnemonic::DUP1);
    asm.op(Mnemonic::ISZERO);
    asm.push_label("literal");
    asm.op(Mnemonic::JUMPI); // stack: [tag]

    // --- run branch ---
    asm.mstore(COUNT); // mem[COUNT] = run_len = tag
    asm.mload(READ_POS);
    asm.push(1, 1);
    asm.op(Mnemonic::ADD);
    asm.op(Mnemonic::CALLDATALOAD);
    asm.push(1, 248);
    asm.op(Mnemonic::SHR);
    asm.mstore(BYTE_VAL);

    asm.label("run_loop");
    asm.mload(COUNT);
    asm.op(Mnemonic::ISZERO);
    asm.push_label("run_done");
    asm.op(Mnemonic::JUMPI);

    asm.mload(BYTE_VAL);
    asm.mload(WRITE_POS);
    asm.op(Mnemonic::MSTORE8);

    asm.mload(WRITE_POS);
    asm.push(1, 1);
    asm.op(Mnemonic::ADD);
    asm.mstore(WRITE_POS);

    asm.push(1, 1);
    asm.mload(COUNT);
    asm.op(Mnemonic::SUB);
    asm.mstore(COUNT);

    asm.push_label("run_loop");
    asm.op(Mnemonic::JUMP);

    asm.label("run_done");
    asm.mload(READ_POS);
    asm.push(1, 2);
    asm.op(Mnemonic::ADD);
    asm.mstore(READ_POS);
    asm.push_label("loop");
    asm.op(Mnemonic::JUMP);

    // --- literal branch ---
    asm.label("literal");
    asm.op(Mnemonic::POP); // discard tag, known zero

    asm.mload(READ_POS);
    asm.push(1, 1);
    asm.op(Mnemonic::ADD);
    asm.op(Mnemonic::CALLDATALOAD);
    asm.push(1, 248);
    asm.op(Mnemonic::SHR);
    asm.mstore(COUNT);

    asm.mload(COUNT); // size
    asm.mload(READ_POS);
    asm.push(1, 2);
    asm.op(Mnemonic::ADD); // offset = read_pos + 2
    asm.mload(WRITE_POS); // destOffset
    asm.op(Mnemonic::CALLDATACOPY);

    asm.mload(WRITE_POS);
    asm.mload(COUNT);
    asm.op(Mnemonic::ADD);
    asm.mstore(WRITE_POS);

    asm.mload(READ_POS);
    asm.push(1, 2);
    asm.op(Mnemonic::ADD);
    asm.mload(COUNT);
    asm.op(Mnemonic::ADD);
    asm.mstore(READ_POS);

    asm.push_label("loop");
    asm.op(Mnemonic::JUMP);

    asm.label("done");
    emit_call_trailer(&mut asm, OUT_BASE);

    asm.finish()
}

/// Builds the FLZ (LZ77) decoder: a tag byte with its top bit clear is a literal run of `tag &
/// 0x1F` bytes; a tag byte with its top bit set is a match of `(tag & 0x7F) + 3` bytes copied,
/// byte by byte (to correctly replay overlapping self-references), from `offset` bytes back in
/// the output already produced.
fn flz_decoder() -> (Vec<u8>, usize) {
    const OFFSET: u64 = 0x60;
    const SRC_BASE: u64 = 0x80;
    const OUT_BASE: u64 = 0xA0;

    let mut asm = Asm::new();
    emit_init(&mut asm, OUT_BASE);

    asm.label("loop");
    emit_bounds_check(&mut asm);

    asm.mload(READ_POS);
    asm.op(Mnemonic::CALLDATALOAD);
    asm.push(1, 248);
    asm.op(Mnemonic::SHR); // stack: [tag]

    asm.op(Mnemonic::DUP1);
    asm.push(1, 0x80);
    asm.op(Mnemonic::AND);
    asm.op(Mnemonic::ISZERO);
    asm.push_label("literal");
    asm.op(Mnemonic::JUMPI); // stack: [tag]

    // --- match branch ---
    asm.push(1, 0x7F);
    asm.op(Mnemonic::AND);
    asm.push(1, 3);
    asm.op(Mnemonic::ADD);
    asm.mstore(COUNT); // len = (tag & 0x7F) + 3

    asm.mload(READ_POS);
    asm.push(1, 1);
    asm.op(Mnemonic::ADD);
    asm.op(Mnemonic::CALLDATALOAD);
    asm.push(1, 240);
    asm.op(Mnemonic::SHR);
    asm.mstore(OFFSET);

    asm.mload(OFFSET);
    asm.mload(WRITE_POS);
    asm.op(Mnemonic::SUB); // src_base = write_pos - offset
    asm.mstore(SRC_BASE);

    asm.label("match_loop");
    asm.mload(COUNT);
    asm.op(Mnemonic::ISZERO);
    asm.push_label("match_done");
    asm.op(Mnemonic::JUMPI);

    // mem[src_base..] may itself have just been written this same loop, so re-reading it on
    // every iteration (instead of bulk-copying) replays overlapping matches correctly.
    asm.mload(SRC_BASE);
    asm.op(Mnemonic::MLOAD);
    asm.push(1, 248);
    asm.op(Mnemonic::SHR);
    asm.mload(WRITE_POS);
    asm.op(Mnemonic::MSTORE8);

    asm.mload(SRC_BASE);
    asm.push(1, 1);
    asm.op(Mnemonic::ADD);
    asm.mstore(SRC_BASE);

    asm.mload(WRITE_POS);
    asm.push(1, 1);
    asm.op(Mnemonic::ADD);
    asm.mstore(WRITE_POS);

    asm.push(1, 1);
    asm.mload(COUNT);
    asm.op(Mnemonic::SUB);
    asm.mstore(COUNT);

    asm.push_label("match_loop");
    asm.op(Mnemonic::JUMP);

    asm.label("match_done");
    asm.mload(READ_POS);
    asm.push(1, 3);
    asm.op(Mnemonic::ADD);
    asm.mstore(READ_POS);
    asm.push_label("loop");
    asm.op(Mnemonic::JUMP);

    // --- literal branch ---
    asm.label("literal");
    asm.push(1, 0x1F);
    asm.op(Mnemonic::AND);
    asm.mstore(COUNT); // count = tag & 0x1F

    asm.mload(COUNT); // size
    asm.mload(READ_POS);
    asm.push(1, 1);
    asm.op(Mnemonic::ADD); // offset = read_pos + 1
    asm.mload(WRITE_POS); // destOffset
    asm.op(Mnemonic::CALLDATACOPY);

    asm.mload(WRITE_POS);
    asm.mload(COUNT);
    asm.op(Mnemonic::ADD);
    asm.mstore(WRITE_POS);

    asm.mload(READ_POS);
    asm.push(1, 1);
    asm.op(Mnemonic::ADD);
    asm.mload(COUNT);
    asm.op(Mnemonic::ADD);
    asm.mstore(READ_POS);

    asm.push_label("loop");
    asm.op(Mnemonic::JUMP);

    asm.label("done");
    emit_call_trailer(&mut asm, OUT_BASE);

    asm.finish()
}

/// The forwarder template paired with [`crate::flz_compress`].
#[must_use]
pub fn flz_forwarder_template() -> ForwarderTemplate {
    let (bytecode, address_operand_offset) = flz_decoder();
    ForwarderTemplate { bytecode, address_operand_offset }
}

/// The forwarder template paired with [`crate::cd_compress`].
#[must_use]
pub fn cd_forwarder_template() -> ForwarderTemplate {
    let (bytecode, address_operand_offset) = cd_decoder();
    ForwarderTemplate { bytecode, address_operand_offset }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splices_target_address_into_flz_template() {
        let target = [0xAAu8; 20];
        let bytecode = flz_forwarder_template().with_target(target);
        assert!(bytecode.windows(20).any(|w| w == target));
    }

    #[test]
    fn splices_target_address_into_cd_template() {
        let target = [0x11u8; 20];
        let bytecode = cd_forwarder_template().with_target(target);
        assert!(bytecode.windows(20).any(|w| w == target));
    }

    #[test]
    fn flz_and_cd_templates_differ() {
        let flz = flz_forwarder_template().with_target([0; 20]);
        let cd = cd_forwarder_template().with_target([0; 20]);
        assert_ne!(flz, cd);
    }
}
