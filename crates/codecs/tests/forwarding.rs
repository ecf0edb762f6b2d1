//! Integration coverage spanning more than one module of this crate: a forwarder template
//! spliced with a target address, decompressing real compressed calldata *in-EVM* before
//! forwarding it — not just a host-side byte check of the spliced address.

use codecs::{cd_compress, cd_forwarder_template, flz_compress, flz_forwarder_template};

const TARGET: [u8; 20] = [0x11; 20];

/// A minimal from-scratch interpreter covering exactly the opcodes the forwarder templates emit.
/// Not a general EVM — just enough to drive a decoder loop and its trailing `CALL` the way a real
/// EVM would, so these tests exercise the actual decompression bytecode rather than asserting
/// properties about it from the host side.
struct Stepper {
    code: Vec<u8>,
    pc: usize,
    stack: Vec<u128>,
    memory: Vec<u8>,
    calldata: Vec<u8>,
    returndata: Vec<u8>,
}

impl Stepper {
    fn new(code: Vec<u8>, calldata: Vec<u8>) -> Self {
        Self { code, pc: 0, stack: Vec::new(), memory: Vec::new(), calldata, returndata: Vec::new() }
    }

    fn pop(&mut self) -> u128 {
        self.stack.pop().expect("stack underflow in test stepper")
    }

    fn pop_usize(&mut self) -> usize {
        self.pop().try_into().expect("value too wide for test stepper's memory model")
    }

    fn ensure_memory(&mut self, end: usize) {
        if self.memory.len() < end {
            self.memory.resize(end, 0);
        }
    }

    fn mload(&mut self, offset: usize) -> u128 {
        self.ensure_memory(offset + 32);
        let mut buf = [0u8; 16];
        buf.copy_from_slice(&self.memory[offset + 16..offset + 32]);
        u128::from_be_bytes(buf)
    }

    /// Runs `code` against `calldata`, calling back into `target` whenever the stepper hits
    /// `CALL`, and returns whatever the contract `RETURN`s.
    fn run(&mut self, target: &dyn Fn(&[u8]) -> Vec<u8>) -> Vec<u8> {
        loop {
            let op = self.code[self.pc];
            self.pc += 1;
            match op {
                0x00 => return Vec::new(), // STOP
                0x50 => {
                    self.pop();
                } // POP
                0x01 => {
                    let a = self.pop();
                    let b = self.pop();
                    self.stack.push(a.wrapping_add(b));
                }
                0x03 => {
                    let a = self.pop();
                    let b = self.pop();
                    self.stack.push(a.wrapping_sub(b));
                }
                0x10 => {
                    // LT
                    let a = self.pop();
                    let b = self.pop();
                    self.stack.push(u128::from(a < b));
                }
                0x15 => {
                    // ISZERO
                    let a = self.pop();
                    self.stack.push(u128::from(a == 0));
                }
                0x16 => {
                    // AND
                    let a = self.pop();
                    let b = self.pop();
                    self.stack.push(a & b);
                }
                0x1C => {
                    // SHR
                    let shift = self.pop();
                    let value = self.pop();
                    self.stack.push(if shift >= 128 { 0 } else { value >> shift });
                }
                0x35 => {
                    // CALLDATALOAD
                    let offset = self.pop_usize();
                    let mut word = [0u8; 32];
                    for (i, slot) in word.iter_mut().enumerate() {
                        if let Some(&b) = self.calldata.get(offset + i) {
                            *slot = b;
                        }
                    }
                    let mut buf = [0u8; 16];
                    buf.copy_from_slice(&word[16..32]);
                    self.stack.push(u128::from_be_bytes(buf));
                    assert!(word[..16].iter().all(|&b| b == 0), "test stepper only models values below 2^128");
                }
                0x36 => self.stack.push(self.calldata.len() as u128), // CALLDATASIZE
                0x37 => {
                    // CALLDATACOPY
                    let dest = self.pop_usize();
                    let offset = self.pop_usize();
                    let size = self.pop_usize();
                    self.ensure_memory(dest + size);
                    for i in 0..size {
                        self.memory[dest + i] = self.calldata.get(offset + i).copied().unwrap_or(0);
                    }
                }
                0x3D => self.stack.push(self.returndata.len() as u128), // RETURNDATASIZE
                0x3E => {
                    // RETURNDATACOPY
                    let dest = self.pop_usize();
                    let offset = self.pop_usize();
                    let size = self.pop_usize();
                    self.ensure_memory(dest + size);
                    self.memory[dest..dest + size].copy_from_slice(&self.returndata[offset..offset + size]);
                }
                0x51 => {
                    // MLOAD
                    let offset = self.pop_usize();
                    self.stack.push(self.mload(offset));
                }
                0x52 => {
                    // MSTORE — value is a u128; store it right-aligned in the 32-byte word.
                    let offset = self.pop_usize();
                    let value = self.pop();
                    self.ensure_memory(offset + 32);
                    self.memory[offset..offset + 16].fill(0);
                    self.memory[offset + 16..offset + 32].copy_from_slice(&value.to_be_bytes());
                }
                0x53 => {
                    // MSTORE8
                    let offset = self.pop_usize();
                    let value = self.pop();
                    self.ensure_memory(offset + 1);
                    self.memory[offset] = value.to_be_bytes()[15];
                }
                0x56 => {
                    // JUMP
                    self.pc = self.pop_usize();
                }
                0x57 => {
                    // JUMPI
                    let dest = self.pop_usize();
                    let cond = self.pop();
                    if cond != 0 {
                        self.pc = dest;
                    }
                }
                0x5A => self.stack.push(1_000_000), // GAS
                0x5B => {}                            // JUMPDEST
                0x5F => self.stack.push(0),           // PUSH0
                0x60..=0x7F => {
                    // PUSH1..PUSH32
                    let n = usize::from(op - 0x5F);
                    let mut word = [0u8; 32];
                    word[32 - n..].copy_from_slice(&self.code[self.pc..self.pc + n]);
                    self.pc += n;
                    assert!(word[..16].iter().all(|&b| b == 0), "test stepper only models values below 2^128");
                    let mut buf = [0u8; 16];
                    buf.copy_from_slice(&word[16..32]);
                    self.stack.push(u128::from_be_bytes(buf));
                }
                0x80 => {
                    // DUP1
                    let value = *self.stack.last().expect("stack underflow in test stepper");
                    self.stack.push(value);
                }
                0xF1 => {
                    // CALL
                    let _gas = self.pop();
                    let _addr = self.pop();
                    let _value = self.pop();
                    let args_offset = self.pop_usize();
                    let args_size = self.pop_usize();
                    let _ret_offset = self.pop();
                    let _ret_size = self.pop();
                    self.ensure_memory(args_offset + args_size);
                    let call_input = self.memory[args_offset..args_offset + args_size].to_vec();
                    self.returndata = target(&call_input);
                    self.stack.push(1); // success
                }
                0xF3 => {
                    // RETURN
                    let offset = self.pop_usize();
                    let size = self.pop_usize();
                    self.ensure_memory(offset + size);
                    return self.memory[offset..offset + size].to_vec();
                }
                other => panic!("test stepper hit unmodelled opcode 0x{other:02x}"),
            }
        }
    }
}

/// Decompresses `compressed` by actually executing `bytecode` against it, with an echo target
/// that just hands back whatever decompressed calldata it forwarded.
fn run_forwarder(bytecode: Vec<u8>, compressed: Vec<u8>) -> Vec<u8> {
    let mut stepper = Stepper::new(bytecode, compressed);
    stepper.run(&|input| input.to_vec())
}

#[test]
fn flz_forwarder_decompresses_in_evm() {
    let bytecode = flz_forwarder_template().with_target(TARGET);
    assert!(bytecode.windows(20).any(|w| w == TARGET));

    let data = b"hello hello hello hello hello world".repeat(4);
    let compressed = flz_compress(&data);
    assert!(compressed.len() < data.len());
    assert_eq!(run_forwarder(bytecode, compressed), data);
}

#[test]
fn flz_forwarder_decompresses_literal_only_calldata() {
    let bytecode = flz_forwarder_template().with_target(TARGET);
    let data: Vec<u8> = (0u8..=40).collect();
    let compressed = flz_compress(&data);
    assert_eq!(run_forwarder(bytecode, compressed), data);
}

#[test]
fn cd_forwarder_decompresses_in_evm() {
    let bytecode = cd_forwarder_template().with_target(TARGET);
    assert!(bytecode.windows(20).any(|w| w == TARGET));

    let mut data = vec![0u8; 200];
    data.extend(std::iter::repeat(0xAB).take(200));
    let compressed = cd_compress(&data);
    assert!(compressed.len() < data.len());
    assert_eq!(run_forwarder(bytecode, compressed), data);
}

#[test]
fn cd_forwarder_decompresses_mixed_runs_and_literals() {
    let bytecode = cd_forwarder_template().with_target(TARGET);
    let mut data = vec![1, 2, 3];
    data.extend(std::iter::repeat(9u8).take(10));
    data.extend([4, 5, 6, 7]);
    let compressed = cd_compress(&data);
    assert_eq!(run_forwarder(bytecode, compressed), data);
}
