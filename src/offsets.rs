//! Offset tables: a compact index of where each tuple in a batch starts.
//!
//! The first entry is always the absolute offset `0` — a batch's first
//! tuple always starts immediately after its prefix — so it is never
//! stored, only ever reconstructed. The count field is the number of
//! *remaining* entries (`offsets.len() - 1`), and only those remaining
//! entries are written, each as its delta from the previous entry,
//! varint-encoded. `encode_offsets` requires `offsets` to be non-empty with
//! `offsets[0] == 0`, mirroring the one precondition every caller already
//! has to satisfy to produce a valid table in the first place.

use crate::buffer::{Reader, Writer};
use crate::error::{CodecError, Result};
use crate::varint;

/// Encodes `offsets` (non-empty, sorted ascending, `offsets[0] == 0`) as
/// `varint(offsets.len() - 1)` followed by that many delta-varints between
/// consecutive entries.
pub fn encode_offsets(offsets: &[usize]) -> Vec<u8> {
    let mut w = Writer::new();
    let n = offsets.len() - 1;
    varint::encode(&mut w, n as u64);
    let mut prev = offsets[0] as u64;
    for &o in &offsets[1..] {
        let o = o as u64;
        varint::encode(&mut w, o - prev);
        prev = o;
    }
    w.finalize()
}

/// Decodes an offset table written by [`encode_offsets`], returning the
/// offsets (always starting with `0`) and the number of bytes consumed.
pub fn decode_offsets(bytes: &[u8]) -> Result<(Vec<usize>, usize)> {
    let mut r = Reader::new(bytes);
    let n = varint::decode(&mut r)? as usize;
    let mut out = Vec::with_capacity(n + 1);
    out.push(0usize);
    let mut acc = 0u64;
    for _ in 0..n {
        let delta = varint::decode(&mut r)?;
        acc = acc.checked_add(delta).ok_or(CodecError::OffsetOverflow)?;
        out.push(acc as usize);
    }
    Ok((out, r.position()))
}
