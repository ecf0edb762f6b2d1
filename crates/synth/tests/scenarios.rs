//! Scenario-level properties of [`synth::synthesise`] that don't fit naturally inside the
//! roundtrip suite in `src/lib.rs`: bytecode size behaviour across specific calldata shapes named
//! in the payload rewriter's own test scenarios, and a monotonicity sanity check on the planner's
//! preference for reused words over fresh literals.

use synth::synthesise;

/// All-zero calldata is the cheapest case: every word is already implicit memory zero, so the
/// synthesised bytecode should be far smaller than the input it reconstructs.
#[test]
fn all_zero_calldata_synthesises_to_minimal_bytecode() {
    let data = vec![0u8; 1000];
    let bytecode = synthesise(&data);
    assert!(bytecode.len() < 200, "expected a small constant-size contract, got {} bytes", bytecode.len());
}

/// A single repeated non-zero byte (`0xab` x 600) should benefit from word reuse: after the first
/// occurrence, every later occurrence of the same word costs only a `DUP`, so total bytecode size
/// should stay well under one byte of bytecode per byte of input.
#[test]
fn repeated_byte_calldata_benefits_from_word_reuse() {
    let data = vec![0xABu8; 600];
    let bytecode = synthesise(&data);
    assert!(bytecode.len() < data.len(), "bytecode ({} bytes) should be smaller than input ({} bytes)", bytecode.len(), data.len());
}

/// Growing the input by repeating the same word should grow the bytecode sub-linearly once the
/// word has already been pre-seeded or reused once, since later repeats cost a constant few bytes
/// each rather than a fresh literal encoding.
#[test]
fn bytecode_growth_is_sublinear_for_repeated_words() {
    let small = vec![0x42u8; 320];
    let large = vec![0x42u8; 3200];
    let small_len = synthesise(&small).len();
    let large_len = synthesise(&large).len();
    assert!(large_len < small_len * 10, "expected sub-linear growth, got {small_len} -> {large_len} for a 10x input increase");
}

/// Sparse, mostly-zero calldata with a handful of scattered non-zero bytes should still produce
/// bytecode much smaller than the input, exercising the zero-segment-skipping behaviour of the
/// word planner at a larger scale than the inline roundtrip suite covers.
#[test]
fn sparse_calldata_at_scale_compresses_well() {
    let mut data = vec![0u8; 4096];
    for i in (0..4096).step_by(97) {
        data[i] = 0xFF;
    }
    let bytecode = synthesise(&data);
    assert!(bytecode.len() < data.len() / 2);
}
