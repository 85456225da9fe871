//! Order-preserving unsigned 64-bit varint codec.
//!
//! A value is encoded as a lead byte selecting a range, followed by 0–8
//! big-endian continuation bytes. The encoder always picks the shortest
//! representable form, which is what makes `decode(encode(v)) == v` unique
//! and what makes lexicographic comparison of encodings agree with numeric
//! comparison of `v`. The range breakpoints below are load-bearing: they are
//! part of the on-wire contract and must never change.

use crate::buffer::{Reader, Writer};
use crate::error::{CodecError, Result};

const R1_MAX: u64 = 240;
const R2_MAX: u64 = 2_287;
const R3_MAX: u64 = 67_823;
const R4_MAX: u64 = 0x00ff_ffff;
const R5_MAX: u64 = 0xffff_ffff;
const R6_MAX: u64 = 0x00ff_ffff_ffff;
const R7_MAX: u64 = 0xffff_ffff_ffff;
const R8_MAX: u64 = 0x00ff_ffff_ffff_ffff;

/// Appends the shortest-form encoding of `v` to `w`.
pub fn encode(w: &mut Writer, v: u64) {
    if v <= R1_MAX {
        w.put_byte(v as u8);
    } else if v <= R2_MAX {
        let x = v - 240;
        w.put_byte(241 + (x >> 8) as u8);
        w.put_byte((x & 0xff) as u8);
    } else if v <= R3_MAX {
        let x = v - 2288;
        w.put_byte(249);
        w.put_byte((x >> 8) as u8);
        w.put_byte((x & 0xff) as u8);
    } else if v <= R4_MAX {
        w.put_byte(250);
        put_be(w, v, 3);
    } else if v <= R5_MAX {
        w.put_byte(251);
        put_be(w, v, 4);
    } else if v <= R6_MAX {
        w.put_byte(252);
        put_be(w, v, 5);
    } else if v <= R7_MAX {
        w.put_byte(253);
        put_be(w, v, 6);
    } else if v <= R8_MAX {
        w.put_byte(254);
        put_be(w, v, 7);
    } else {
        w.put_byte(255);
        put_be(w, v, 8);
    }
}

fn put_be(w: &mut Writer, v: u64, n: u8) {
    for i in (0..n).rev() {
        w.put_byte((v >> (8 * i as u32)) as u8);
    }
}

fn get_be(r: &mut Reader, n: usize) -> Result<u64> {
    let bytes = r.get_bytes(n)?;
    let mut v: u64 = 0;
    for &b in bytes {
        v = (v << 8) | u64::from(b);
    }
    Ok(v)
}

/// Decodes one varint from `r`, returning the value.
pub fn decode(r: &mut Reader) -> Result<u64> {
    let lead = r.get_byte()?;
    match lead {
        0..=240 => Ok(u64::from(lead)),
        241..=248 => {
            let p = r.get_byte()?;
            Ok(240 + 256 * u64::from(lead - 241) + u64::from(p))
        }
        249 => {
            let v = get_be(r, 2)?;
            Ok(2288 + v)
        }
        250 => get_be(r, 3),
        251 => get_be(r, 4),
        252 => get_be(r, 5),
        253 => get_be(r, 6),
        254 => get_be(r, 7),
        255 => get_be(r, 8),
    }
}

/// Appends the bit-complemented encoding of `v`. Used for the magnitude of
/// negative signed integers and negative timestamps: complementing every
/// byte of an order-preserving encoding reverses its sort order, which is
/// exactly what's needed so that larger magnitudes (more negative values)
/// sort before smaller ones.
pub fn encode_complemented(w: &mut Writer, v: u64) {
    let mut tmp = Writer::new();
    encode(&mut tmp, v);
    for b in tmp.finalize() {
        w.put_byte(!b);
    }
}

/// Inverse of [`encode_complemented`].
pub fn decode_complemented(r: &mut Reader) -> Result<u64> {
    let lead = !r.get_byte()?;
    match lead {
        0..=240 => Ok(u64::from(lead)),
        241..=248 => {
            let p = !r.get_byte()?;
            Ok(240 + 256 * u64::from(lead - 241) + u64::from(p))
        }
        249 => {
            let b0 = !r.get_byte()?;
            let b1 = !r.get_byte()?;
            Ok(2288 + (u64::from(b0) << 8 | u64::from(b1)))
        }
        250..=255 => {
            let n = usize::from(lead - 250 + 3);
            let mut v: u64 = 0;
            for _ in 0..n {
                let b = !r.get_byte()?;
                v = (v << 8) | u64::from(b);
            }
            Ok(v)
        }
    }
}

/// Length in bytes of the shortest encoding of `v`, including the lead byte.
pub fn encoded_len(v: u64) -> usize {
    if v <= R1_MAX {
        1
    } else if v <= R2_MAX {
        2
    } else if v <= R3_MAX {
        3
    } else if v <= R4_MAX {
        4
    } else if v <= R5_MAX {
        5
    } else if v <= R6_MAX {
        6
    } else if v <= R7_MAX {
        7
    } else if v <= R8_MAX {
        8
    } else {
        9
    }
}

/// Decodes a varint from a bare byte slice (used by [`crate::decode_offsets`]
/// and tests), returning the value and bytes consumed.
pub fn decode_from_slice(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut r = Reader::new(bytes);
    let v = decode(&mut r)?;
    Ok((v, r.position()))
}
