//! Order-preserving tuple codec.
//!
//! Encodes typed tuples of values into byte strings whose lexicographic
//! order matches the tuples' natural order, making them usable directly as
//! keys in any byte-string-keyed store (an `sled`/`rocksdb`-style KV engine,
//! a B-tree, a sorted log). See [`Element`] for the supported value kinds
//! and [`Packable`] for the shapes `pack`/`unpacks` accept.
//!
//! ```
//! use ordkey::{pack, unpack, Element};
//!
//! let bytes = pack(b"", vec![Element::Int(7), Element::Text("b".into())]).unwrap();
//! let back = unpack(b"", &bytes).unwrap().unwrap();
//! assert_eq!(back, vec![Element::Int(7), Element::Text("b".into())]);
//! ```

mod batch;
mod buffer;
mod element;
mod error;
mod interleave;
mod offsets;
mod timestamp;
mod tuple;
mod varint;

pub use batch::{Packable, Singular};
pub use element::Element;
pub use error::{CodecError, Result};

use buffer::{Reader, Writer};

/// Emits `prefix || varint(v)`.
pub fn pack_int(prefix: &[u8], v: u64) -> Vec<u8> {
    let mut w = Writer::with_capacity(prefix.len() + 9);
    w.put_bytes(prefix);
    varint::encode(&mut w, v);
    w.finalize()
}

/// Decodes a bare unsigned integer previously written by [`pack_int`] (with
/// an empty prefix), returning the value and the number of bytes consumed.
pub fn unpack_int(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut r = Reader::new(bytes);
    let v = varint::decode(&mut r)?;
    Ok((v, r.position()))
}

/// Encodes `value` — a single element, a tuple, or a list of tuples, see
/// [`Packable`] — behind `prefix`.
pub fn pack(prefix: &[u8], value: impl Into<Packable>) -> Result<Vec<u8>> {
    batch::pack(prefix, value)
}

/// Alias for [`pack`].
pub fn packs(prefix: &[u8], value: impl Into<Packable>) -> Result<Vec<u8>> {
    pack(prefix, value)
}

/// Decodes a single tuple behind `prefix`. Returns `Ok(None)` — the
/// `NoMatch` sentinel — if `input` does not begin with `prefix`.
pub fn unpack(prefix: &[u8], input: &[u8]) -> Result<Option<Vec<Element>>> {
    batch::unpack_one(prefix, input)
}

/// Decodes every tuple of a batch behind `prefix`. Returns `Ok(None)` — the
/// `NoMatch` sentinel — if `input` does not begin with `prefix`.
pub fn unpacks(prefix: &[u8], input: &[u8]) -> Result<Option<Vec<Vec<Element>>>> {
    batch::unpack_many(prefix, input)
}

/// Returns `value` unchanged if it is already a tuple, otherwise wraps it
/// in a one-element tuple.
pub fn tuplize(value: impl Into<Singular>) -> Vec<Element> {
    batch::tuplize(value)
}

/// Encodes a table of ascending tuple-start offsets.
pub fn encode_offsets(offsets: &[usize]) -> Vec<u8> {
    offsets::encode_offsets(offsets)
}

/// Decodes a table written by [`encode_offsets`], returning the offsets and
/// the number of bytes consumed.
pub fn decode_offsets(bytes: &[u8]) -> Result<(Vec<usize>, usize)> {
    offsets::decode_offsets(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_example_roundtrips() {
        let bytes = pack(b"", vec![Element::Int(7), Element::Text("b".into())]).unwrap();
        let back = unpack(b"", &bytes).unwrap().unwrap();
        assert_eq!(back, vec![Element::Int(7), Element::Text("b".into())]);
    }

    #[test]
    fn pack_int_prepends_prefix() {
        let bytes = pack_int(b"pfx", 5);
        assert!(bytes.starts_with(b"pfx"));
        let (v, consumed) = unpack_int(&bytes[3..]).unwrap();
        assert_eq!(v, 5);
        assert_eq!(consumed, bytes.len() - 3);
    }

    #[test]
    fn packs_is_an_alias_for_pack() {
        let a = pack(b"k", Element::Int(1)).unwrap();
        let b = packs(b"k", Element::Int(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn prefix_respect_and_roundtrip() {
        let value = vec![Element::Null, Element::Bool(true), Element::Int(-1)];
        let bytes = pack(b"x", value.clone()).unwrap();
        assert!(bytes.starts_with(b"x"));
        assert_eq!(unpack(b"x", &bytes).unwrap().unwrap(), tuplize(value));
    }

    #[test]
    fn nomatch_on_foreign_prefix() {
        let bytes = pack(b"p2", Element::Int(1)).unwrap();
        assert_eq!(unpack(b"p1", &bytes).unwrap(), None);
        assert_eq!(unpacks(b"p1", &bytes).unwrap(), None);
    }

    #[test]
    fn unpacks_batch_of_two() {
        let bytes = pack(b"", vec![vec![Element::Int(1)], vec![Element::Int(2)]]).unwrap();
        let sep_count = bytes.iter().filter(|&&b| b == 0).count();
        assert_eq!(sep_count, 1);
        assert_eq!(
            unpacks(b"", &bytes).unwrap().unwrap(),
            vec![vec![Element::Int(1)], vec![Element::Int(2)]]
        );
    }

    #[test]
    fn tuplize_normalizes_both_shapes() {
        assert_eq!(tuplize(Element::Null), vec![Element::Null]);
        assert_eq!(
            tuplize(vec![Element::Null, Element::Bool(true)]),
            vec![Element::Null, Element::Bool(true)]
        );
    }

    #[test]
    fn offset_table_roundtrips() {
        let bytes = encode_offsets(&[0, 3, 10, 10]);
        let (offsets, consumed) = decode_offsets(&bytes).unwrap();
        assert_eq!(offsets, vec![0, 3, 10, 10]);
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn lexicographic_order_across_tuples() {
        let a = pack(b"", Element::Int(1)).unwrap();
        let b = pack(b"", Element::Int(2)).unwrap();
        assert!(a < b);
    }
}
