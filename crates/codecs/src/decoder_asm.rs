//! A tiny two-pass label assembler for the forwarder templates' in-EVM decompression loops.
//!
//! The forwarder bytecode needs forward and backward jumps (loop heads, branch targets) whose
//! exact byte offsets depend on the length of everything emitted before them. Rather than
//! hand-counting offsets, this assembler lets [`crate::forwarder`] emit named labels and jumps to
//! them, then resolves every jump's 2-byte destination operand in a single patch-up pass once the
//! full byte length is known — the same two-pass shape `jitcc_synth`'s planner/codegen split
//! uses, just with labels instead of a `Plan`.

use std::collections::HashMap;

use asm::Mnemonic;

/// Builds bytecode incrementally, deferring jump-destination resolution until [`Asm::finish`].
#[derive(Default)]
pub struct Asm {
    code: Vec<u8>,
    labels: HashMap<&'static str, usize>,
    fixups: Vec<(usize, &'static str)>,
    address_operand_offset: Option<usize>,
}

impl Asm {
    /// Starts an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bare opcode.
    pub fn op(&mut self, mnemonic: Mnemonic) -> &mut Self {
        self.code.push(mnemonic as u8);
        self
    }

    /// Appends `PUSHk <value>` for a value that fits in `width` bytes (`width <= 8`), `PUSH0` when
    /// `width == 0`. Wider immediates go through [`Asm::push_address_placeholder`] instead.
    pub fn push(&mut self, width: u8, value: u64) -> &mut Self {
        self.code.push(Mnemonic::push_for_len(width) as u8);
        self.code.extend_from_slice(&value.to_be_bytes()[8 - usize::from(width)..]);
        self
    }

    /// Marks the current position as `name`, emitting a `JUMPDEST`.
    pub fn label(&mut self, name: &'static str) -> &mut Self {
        self.labels.insert(name, self.code.len());
        self.op(Mnemonic::JUMPDEST)
    }

    /// Appends `PUSH2 <offset of name>`, to be resolved once every label has been placed.
    pub fn push_label(&mut self, name: &'static str) -> &mut Self {
        self.code.push(Mnemonic::PUSH2 as u8);
        self.fixups.push((self.code.len(), name));
        self.code.extend_from_slice(&[0, 0]);
        self
    }

    /// Appends `PUSHk <offset> MLOAD`, loading the word at a fixed memory offset.
    pub fn mload(&mut self, offset: u64) -> &mut Self {
        self.push(1, offset).op(Mnemonic::MLOAD)
    }

    /// Appends `PUSHk <offset> MSTORE`, storing whatever word is on top of the stack to a fixed
    /// memory offset.
    pub fn mstore(&mut self, offset: u64) -> &mut Self {
        self.push(1, offset).op(Mnemonic::MSTORE)
    }

    /// Appends `PUSH20 <20 zero bytes>` and records the operand's offset for later splicing of a
    /// forwarding target address.
    ///
    /// # Panics
    /// Panics if called more than once on the same assembler.
    pub fn push_address_placeholder(&mut self) -> &mut Self {
        assert!(self.address_operand_offset.is_none(), "address placeholder already emitted");
        self.code.push(Mnemonic::PUSH20 as u8);
        self.address_operand_offset = Some(self.code.len());
        self.code.extend_from_slice(&[0; 20]);
        self
    }

    /// Resolves every deferred jump label and returns the finished bytecode alongside the byte
    /// offset of the 20-byte address operand recorded by [`Asm::push_address_placeholder`].
    ///
    /// # Panics
    /// Panics if a [`Asm::push_label`] target was never [`Asm::label`]led, or if
    /// [`Asm::push_address_placeholder`] was never called.
    pub fn finish(mut self) -> (Vec<u8>, usize) {
        for (operand_offset, name) in &self.fixups {
            let target = *self.labels.get(name).unwrap_or_else(|| panic!("undefined label {name:?}"));
            let bytes = (target as u16).to_be_bytes();
            self.code[*operand_offset] = bytes[0];
            self.code[*operand_offset + 1] = bytes[1];
        }
        let address_operand_offset = self.address_operand_offset.expect("address placeholder never emitted");
        (self.code, address_operand_offset)
    }
}
