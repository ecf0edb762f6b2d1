//! A byte-oriented run-length codec over `(run_length, byte)` pairs.
//!
//! A run is only emitted when it is strictly shorter than encoding the same bytes as literals
//! (that is, runs of 3 or more identical bytes); everything else is folded into literal spans
//! tagged with a zero-length-run escape followed by a literal count.

use crate::CodecError;

/// Shortest run worth encoding as a `(run_length, byte)` pair instead of literal bytes.
const MIN_RUN_LEN: usize = 3;
/// Longest run (or literal span) a single count byte can describe.
const MAX_COUNT: usize = 255;

fn flush_literals(out: &mut Vec<u8>, literals: &[u8]) {
    for chunk in literals.chunks(MAX_COUNT) {
        out.push(0); // zero-length-run escape
        out.push(chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
}

/// Compresses `data` using the calldata run-length encoding described in [the module docs](self).
#[must_use]
pub fn cd_compress(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut literals = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let byte = data[pos];
        let mut run_len = 1;
        while pos + run_len < data.len() && data[pos + run_len] == byte && run_len < MAX_COUNT {
            run_len += 1;
        }

        if run_len >= MIN_RUN_LEN {
            flush_literals(&mut out, &literals);
            literals.clear();
            out.push(run_len as u8);
            out.push(byte);
        } else {
            literals.extend(std::iter::repeat(byte).take(run_len));
        }
        pos += run_len;
    }

    flush_literals(&mut out, &literals);
    out
}

/// Decompresses a stream produced by [`cd_compress`].
///
/// # Errors
/// Returns [`CodecError::Truncated`] if the stream ends mid-pair or mid-literal-span.
pub fn cd_decompress(compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < compressed.len() {
        let run_length = compressed[pos];
        pos += 1;
        if run_length == 0 {
            let count = usize::from(*compressed.get(pos).ok_or(CodecError::Truncated)?);
            pos += 1;
            let end = pos + count;
            let chunk = compressed.get(pos..end).ok_or(CodecError::Truncated)?;
            out.extend_from_slice(chunk);
            pos = end;
        } else {
            let byte = *compressed.get(pos).ok_or(CodecError::Truncated)?;
            pos += 1;
            out.extend(std::iter::repeat(byte).take(usize::from(run_length)));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_long_runs() {
        let data = vec![0xABu8; 600];
        let compressed = cd_compress(&data);
        assert!(compressed.len() < data.len());
        assert_eq!(cd_decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn roundtrips_mixed_runs_and_literals() {
        let mut data = vec![1, 2, 3];
        data.extend(std::iter::repeat(9u8).take(10));
        data.extend([4, 5, 6, 7]);
        let compressed = cd_compress(&data);
        assert_eq!(cd_decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn short_runs_stay_literal() {
        let data = vec![1, 1, 2, 2, 3, 3];
        let compressed = cd_compress(&data);
        // No byte in this input repeats 3+ times, so every run-length tag must be the escape.
        assert!(compressed.chunks(2).all(|pair| pair[0] == 0) || compressed[0] == 0);
        assert_eq!(cd_decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn decompress_rejects_truncated_literal_span() {
        assert!(cd_decompress(&[0, 5, 1, 2]).is_err());
    }
}
