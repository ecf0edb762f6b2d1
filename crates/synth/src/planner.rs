//! Word planner: the first pass over the padded input buffer.
//!
//! Walks the buffer 32 bytes at a time, picks the cheapest construction strategy for each word
//! under the byte-count cost model, and records a language-neutral [`Plan`]. Running the planner
//! also exercises the [`Emitter`] for real, which is how the word-reuse cache and the pre-seed
//! frequency/order statistics get populated.

use std::collections::HashMap;

use asm::Mnemonic;

use crate::emitter::Emitter;
use crate::hardconst::{self, PushOp};
use crate::plan::{Plan, PlanStep};
use crate::word::{Word, WORD_BYTES};

/// Number of leading zero bytes that right-align the 4-byte ABI selector inside the first word.
pub const SELECTOR_PADDING: usize = 28;

/// Reserved constants the pre-seed list never includes (each already cheap to reconstruct, or
/// present unconditionally via the fixed pre-seed bookends).
const RESERVED_CONSTANTS: [u64; 4] = [0, 1, 32, 0xE0];

/// Maximum number of values carried into the pre-seed list.
const PRESEED_LIMIT: usize = 15;

/// A maximal run of non-zero bytes within a word, `[start, end]` inclusive, 0-indexed.
#[derive(Debug, Clone, Copy)]
struct Segment {
    start: usize,
    end: usize,
}

impl Segment {
    fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Finds the maximal non-zero byte runs within a 32-byte word.
fn segments(word: &[u8; WORD_BYTES]) -> Vec<Segment> {
    let mut segs = Vec::new();
    let mut i = 0;
    while i < WORD_BYTES {
        if word[i] == 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < WORD_BYTES && word[i] != 0 {
            i += 1;
        }
        segs.push(Segment { start, end: i - 1 });
    }
    segs
}

/// One of the five candidate strategies the planner can choose per word.
enum Strategy {
    Literal { tail: Vec<u8> },
    ShlOr { segments: Vec<Segment> },
    WordReuse { first_base: u32 },
    Mstore8 { segments: Vec<Segment> },
    Peephole,
}

/// Pads `D` with the 28-byte selector alignment prefix and rounds the result up to a multiple of
/// 32 bytes.
fn padded_buffer(data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SELECTOR_PADDING + data.len() + WORD_BYTES);
    buf.extend(std::iter::repeat(0u8).take(SELECTOR_PADDING));
    buf.extend_from_slice(data);
    let rem = buf.len() % WORD_BYTES;
    if rem != 0 {
        buf.extend(std::iter::repeat(0u8).take(WORD_BYTES - rem));
    }
    buf
}

/// Cost of the `SHL`/`OR` segment-assembly strategy.
fn shl_or_cost(segs: &[Segment]) -> u32 {
    segs.iter()
        .enumerate()
        .map(|(i, seg)| {
            let mut cost = 1 + seg.len() as u32;
            if WORD_BYTES - 1 - seg.end > 0 {
                cost += 3; // PUSH1 <shift>; SHL
            }
            if i > 0 {
                cost += 1; // OR
            }
            cost
        })
        .sum()
}

/// Cost of the per-byte `MSTORE8` strategy, following the idealised `3 * segments` model: one
/// byte-value push, implicitly reusing an already-live offset, plus the `MSTORE8` itself.
fn mstore8_cost(segs: &[Segment]) -> u32 {
    3 * segs.len() as u32
}

/// Output of the first pass: the plan to replay, plus the pre-seed list derived from its
/// frequency statistics.
pub struct PlannerOutput {
    /// The recorded plan, including the trailing CALL-setup pushes.
    pub plan: Plan,
    /// Values to pre-seed onto the stack before replaying the plan.
    pub preseed: Vec<Word>,
}

/// Runs the first pass over `data`, producing a plan and pre-seed list.
#[must_use]
pub fn plan(data: &[u8]) -> PlannerOutput {
    let buffer = padded_buffer(data);
    let mut emitter = Emitter::new();
    let mut steps = Plan::new();
    let mut first_base: HashMap<Word, u32> = HashMap::new();

    for (word_index, chunk) in buffer.chunks_exact(WORD_BYTES).enumerate() {
        let base = (word_index * WORD_BYTES) as u32;
        let mut bytes = [0u8; WORD_BYTES];
        bytes.copy_from_slice(chunk);
        let word = Word::from_be_bytes(bytes);

        if word.is_zero() {
            continue;
        }

        let segs = segments(&bytes);
        let strategy = choose_strategy(&word, &segs, &first_base, &emitter);
        emit_strategy(&mut emitter, &mut steps, &word, base, strategy);

        first_base.entry(word).or_insert(base);
    }

    // Trailer pushed by the planner (outside the word loop): retSize, retOffset, argsSize,
    // argsOffset, matching the CALL signature the fixed trailer bytes expect.
    steps.push(PlanStep::Num(Word::ZERO));
    steps.push(PlanStep::Num(Word::ZERO));
    steps.push(PlanStep::Num(Word::from(data.len() as u64)));
    steps.push(PlanStep::Num(Word::from(SELECTOR_PADDING as u64)));
    emitter.emit_push_int(Word::ZERO);
    emitter.emit_push_int(Word::ZERO);
    emitter.emit_push_int(Word::from(data.len() as u64));
    emitter.emit_push_int(Word::from(SELECTOR_PADDING as u64));

    let preseed = select_preseed(&emitter);

    PlannerOutput { plan: steps, preseed }
}

/// Picks the minimum-cost strategy for one word, preferring (on ties) LITERAL, then WORD REUSE,
/// then `SHL`/`OR`, then `MSTORE8`, then the peephole families, matching the tie-break order.
fn choose_strategy(
    word: &Word,
    segs: &[Segment],
    first_base: &HashMap<Word, u32>,
    emitter: &Emitter,
) -> Strategy {
    let first_nonzero = word.first_nonzero_index();
    let tail = word.tail_from(first_nonzero).to_vec();
    let literal_cost = 1 + tail.len() as u32;
    let mut best_cost = literal_cost;
    let mut best = Strategy::Literal { tail: tail.clone() };

    if let Some(&reuse_base) = first_base.get(word) {
        if hardconst::literal_cost(word) > 8 {
            let reuse_value_cost = hardconst::literal_cost(&Word::from(reuse_base)) + 1; // + MLOAD
            if reuse_value_cost < best_cost {
                best_cost = reuse_value_cost;
                best = Strategy::WordReuse { first_base: reuse_base };
            }
        }
    }

    if !segs.is_empty() {
        let cost = shl_or_cost(segs);
        if cost < best_cost {
            best_cost = cost;
            best = Strategy::ShlOr { segments: segs.to_vec() };
        }
    }

    if segs.iter().all(|s| s.len() == 1) && !segs.is_empty() {
        let cost = mstore8_cost(segs);
        if cost < best_cost {
            best_cost = cost;
            best = Strategy::Mstore8 { segments: segs.to_vec() };
        }
    }

    let peephole_ops = hardconst::encode_push(*word, emitter.stack(), emitter.memory().high_water_mark());
    let peephole_cost = crate::hardconst::sequence_cost(&peephole_ops);
    if peephole_cost < best_cost {
        best = Strategy::Peephole;
    }

    best
}

/// Appends the plan steps for the chosen strategy and replays them through the live emitter.
fn emit_strategy(emitter: &mut Emitter, steps: &mut Plan, word: &Word, base: u32, strategy: Strategy) {
    match strategy {
        Strategy::Literal { tail } => {
            steps.push(PlanStep::Bytes(tail.clone()));
            emitter.emit_push_bytes(&tail);
            finish_word(emitter, steps, base);
        }
        Strategy::ShlOr { segments } => {
            for (i, seg) in segments.iter().enumerate() {
                let seg_bytes = word.as_bytes()[seg.start..=seg.end].to_vec();
                steps.push(PlanStep::Bytes(seg_bytes.clone()));
                emitter.emit_push_bytes(&seg_bytes);

                let shift = (WORD_BYTES - 1 - seg.end) * 8;
                if shift > 0 {
                    steps.push(PlanStep::Num(Word::from(shift as u64)));
                    steps.push(PlanStep::Op(Mnemonic::SHL));
                    emitter.emit_push_int(Word::from(shift as u64));
                    emitter.emit_op(Mnemonic::SHL);
                }
                if i > 0 {
                    steps.push(PlanStep::Op(Mnemonic::OR));
                    emitter.emit_op(Mnemonic::OR);
                }
            }
            finish_word(emitter, steps, base);
        }
        Strategy::WordReuse { first_base } => {
            steps.push(PlanStep::Num(Word::from(first_base)));
            steps.push(PlanStep::Op(Mnemonic::MLOAD));
            emitter.emit_push_int(Word::from(first_base));
            emitter.emit_op(Mnemonic::MLOAD);
            finish_word(emitter, steps, base);
        }
        Strategy::Mstore8 { segments } => {
            for seg in &segments {
                let byte = word.as_bytes()[seg.start];
                let offset = base + seg.start as u32;
                steps.push(PlanStep::Num(Word::from(u64::from(byte))));
                steps.push(PlanStep::Num(Word::from(offset)));
                steps.push(PlanStep::Op(Mnemonic::MSTORE8));
                emitter.emit_push_int(Word::from(u64::from(byte)));
                emitter.emit_push_int(Word::from(offset));
                emitter.emit_op(Mnemonic::MSTORE8);
            }
        }
        Strategy::Peephole => {
            steps.push(PlanStep::Num(*word));
            emitter.emit_push_int(*word);
            finish_word(emitter, steps, base);
        }
    }
}

/// Appends and replays the common `push_int(base); MSTORE` suffix shared by every strategy
/// except `MSTORE8`.
fn finish_word(emitter: &mut Emitter, steps: &mut Plan, base: u32) {
    steps.push(PlanStep::Num(Word::from(base)));
    steps.push(PlanStep::Op(Mnemonic::MSTORE));
    emitter.emit_push_int(Word::from(base));
    emitter.emit_op(Mnemonic::MSTORE);
}

/// Derives the pre-seed list from the first pass's frequency and push-order statistics: values
/// with frequency > 1, excluding the reserved constants, sorted by first-appearance order
/// descending (most-recently-first-seen first), filtered to values that fit in 16 push bytes,
/// truncated to the top 15.
fn select_preseed(emitter: &Emitter) -> Vec<Word> {
    let reserved: Vec<Word> = RESERVED_CONSTANTS.iter().map(|&v| Word::from(v)).collect();

    let mut candidates: Vec<(Word, u64)> = emitter
        .frequencies()
        .iter()
        .filter(|&(_, &count)| count > 1)
        .filter(|&(value, _)| !reserved.contains(value))
        .filter(|&(value, _)| value.to_u128().is_some())
        .map(|(value, _)| (*value, emitter.first_seen_order().get(value).copied().unwrap_or(0)))
        .collect();

    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates.truncate(PRESEED_LIMIT);
    candidates.into_iter().map(|(value, _)| value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_word_emits_nothing() {
        let output = plan(&vec![0u8; 1000]);
        // Only the four CALL-setup pushes (retSize/retOffset/argsSize/argsOffset) should appear;
        // no MSTOREs, since every data word is zero.
        assert!(!output.plan.iter().any(|step| matches!(step, PlanStep::Op(Mnemonic::MSTORE))));
    }

    #[test]
    fn nonzero_word_finishes_with_mstore() {
        let data = vec![0xAB; 100];
        let output = plan(&data);
        assert!(output.plan.iter().any(|step| matches!(step, PlanStep::Op(Mnemonic::MSTORE))));
    }

    #[test]
    fn preseed_excludes_reserved_constants() {
        // A value repeated often enough to be a pre-seed candidate, interleaved with non-zero
        // padding so it recurs across multiple words.
        let mut data = Vec::new();
        for _ in 0..20 {
            data.extend_from_slice(&[0x11; 20]);
            data.extend_from_slice(&[0u8; 4]);
        }
        let output = plan(&data);
        assert!(output.preseed.len() <= PRESEED_LIMIT);
        assert!(!output.preseed.contains(&Word::ZERO));
        assert!(!output.preseed.contains(&Word::ONE));
    }

    #[test]
    fn segments_finds_maximal_runs() {
        let mut word = [0u8; WORD_BYTES];
        word[5] = 1;
        word[6] = 2;
        word[20] = 3;
        let segs = segments(&word);
        assert_eq!(segs.len(), 2);
        assert_eq!((segs[0].start, segs[0].end), (5, 6));
        assert_eq!((segs[1].start, segs[1].end), (20, 20));
    }
}
