//! A minimal LZ77-family compressor in the spirit of FastLZ.
//!
//! A rolling 3-byte hash table indexes prior positions; matches of length >= 3 within a bounded
//! backward window are emitted as `(offset, length)` back-references, and unmatched bytes are
//! emitted as literal runs.

use std::collections::HashMap;

use crate::CodecError;

/// Longest literal run a single tag byte can describe.
const MAX_LITERAL_RUN: usize = 31;
/// Shortest match worth emitting a back-reference for.
const MIN_MATCH_LEN: usize = 3;
/// Longest match a single tag byte can describe.
const MAX_MATCH_LEN: usize = 34;
/// Largest backward distance a 2-byte offset can address.
const MAX_OFFSET: usize = u16::MAX as usize;

fn hash3(bytes: &[u8]) -> u32 {
    u32::from(bytes[0]) | (u32::from(bytes[1]) << 8) | (u32::from(bytes[2]) << 16)
}

fn match_len(data: &[u8], a: usize, b: usize) -> usize {
    let mut len = 0;
    while b + len < data.len() && len < MAX_MATCH_LEN && data[a + len] == data[b + len] {
        len += 1;
    }
    len
}

fn flush_literals(out: &mut Vec<u8>, literals: &[u8]) {
    for chunk in literals.chunks(MAX_LITERAL_RUN) {
        out.push(chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
}

/// Compresses `data` using the FastLZ-style literal/match encoding described in [the module
/// docs](self).
#[must_use]
pub fn flz_compress(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut table: HashMap<u32, usize> = HashMap::new();
    let mut literals = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        if pos + MIN_MATCH_LEN <= data.len() {
            let hash = hash3(&data[pos..pos + 3]);
            if let Some(&candidate) = table.get(&hash) {
                let offset = pos - candidate;
                if offset <= MAX_OFFSET {
                    let len = match_len(data, candidate, pos);
                    if len >= MIN_MATCH_LEN {
                        flush_literals(&mut out, &literals);
                        literals.clear();
                        out.push(0x80 | (len - MIN_MATCH_LEN) as u8);
                        out.extend_from_slice(&(offset as u16).to_be_bytes());
                        table.insert(hash, pos);
                        pos += len;
                        continue;
                    }
                }
            }
            table.insert(hash, pos);
        }
        literals.push(data[pos]);
        pos += 1;
    }

    flush_literals(&mut out, &literals);
    out
}

/// Decompresses a stream produced by [`flz_compress`].
///
/// # Errors
/// Returns [`CodecError::Truncated`] if the stream ends mid-literal, mid-offset, or a match
/// references data before the start of the output.
pub fn flz_decompress(compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < compressed.len() {
        let tag = compressed[pos];
        pos += 1;
        if tag & 0x80 == 0 {
            let len = usize::from(tag & 0x1F);
            let end = pos + len;
            let chunk = compressed.get(pos..end).ok_or(CodecError::Truncated)?;
            out.extend_from_slice(chunk);
            pos = end;
        } else {
            let len = usize::from(tag & 0x7F) + MIN_MATCH_LEN;
            let offset_bytes = compressed.get(pos..pos + 2).ok_or(CodecError::Truncated)?;
            let offset = usize::from(u16::from_be_bytes([offset_bytes[0], offset_bytes[1]]));
            pos += 2;
            let start = out.len().checked_sub(offset).ok_or(CodecError::Truncated)?;
            for i in 0..len {
                let byte = out[start + i];
                out.push(byte);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_repetitive_data() {
        let data = b"abcabcabcabcabcabcabcabcabcabcabc".to_vec();
        let compressed = flz_compress(&data);
        assert!(compressed.len() < data.len());
        assert_eq!(flz_decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn roundtrips_incompressible_data() {
        let data: Vec<u8> = (0u8..=255).collect();
        let compressed = flz_compress(&data);
        assert_eq!(flz_decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn roundtrips_empty_input() {
        assert_eq!(flz_decompress(&flz_compress(&[])).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decompress_rejects_truncated_match_offset() {
        assert!(flz_decompress(&[0x80]).is_err());
    }
}
