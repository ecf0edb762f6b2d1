//! The portable intermediate form produced by the word planner and replayed by the code
//! generator.
//!
//! A [`Plan`] deliberately records *requests* ("push this 256-bit value", "push this literal byte
//! run", "emit this opcode") rather than resolved bytes: replaying the same plan against a
//! differently-seeded stack (as the second pass does, after pre-seeding reusable constants) can
//! legally choose different encodings for the same request, which is exactly how pre-seeding pays
//! for itself.

use asm::Mnemonic;

use crate::word::Word;

/// One request in a [`Plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    /// Push a 256-bit value, letting the emitter pick the cheapest encoding available at replay
    /// time (`DUPn`, an environment alias, a NOT/SUB/SIGNEXTEND/SHIFT-complement identity, or a
    /// plain literal).
    Num(Word),
    /// Push an exact literal byte run with a single `PUSHk` (`PUSH0` if empty), bypassing the
    /// peephole search. Used for the tail of a word that is cheapest emitted verbatim.
    Bytes(Vec<u8>),
    /// Emit a bare opcode with no immediate.
    Op(Mnemonic),
}

/// An ordered sequence of [`PlanStep`]s describing how to reconstruct a calldata buffer in
/// memory, independent of which constants end up pre-seeded on the stack.
pub type Plan = Vec<PlanStep>;
