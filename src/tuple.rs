//! A tuple is simply its elements' encodings concatenated in order — no
//! length prefix, no wrapper tag. Two tuples compare element-by-element,
//! which is why each element codec is itself order-preserving: there is
//! nothing else left to get that property from.

use crate::buffer::{Reader, Writer};
use crate::element::Element;
use crate::error::{CodecError, Result};

/// Appends the concatenated encoding of `elements` to `w`.
pub fn encode_into(w: &mut Writer, elements: &[Element]) -> Result<()> {
    for e in elements {
        e.encode(w)?;
    }
    Ok(())
}

/// Encodes a standalone tuple to a fresh byte vector.
pub fn encode(elements: &[Element]) -> Result<Vec<u8>> {
    let mut w = Writer::new();
    encode_into(&mut w, elements)?;
    Ok(w.finalize())
}

/// Decodes every element from `r` until the input is exhausted. A bare
/// `SEP` byte here is an error: it only has meaning as a tuple boundary
/// inside a batch, and a standalone tuple has no batch around it.
pub fn decode(r: &mut Reader) -> Result<Vec<Element>> {
    let mut out = Vec::new();
    while !r.is_empty() {
        let position = r.position();
        match Element::decode(r)? {
            Some(e) => out.push(e),
            None => return Err(CodecError::UnexpectedSeparator { position }),
        }
    }
    Ok(out)
}

/// Decodes a standalone tuple from a bare byte slice.
pub fn decode_from_slice(bytes: &[u8]) -> Result<Vec<Element>> {
    let mut r = Reader::new(bytes);
    decode(&mut r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn sample_tuple() -> Vec<Element> {
        vec![
            Element::Null,
            Element::Bool(true),
            Element::Int(-42),
            Element::Text("hello".to_string()),
            Element::Blob(vec![1, 2, 3]),
            Element::Uuid(Uuid::from_bytes([7; 16])),
            Element::Time(
                FixedOffset::east_opt(3600)
                    .unwrap()
                    .timestamp_opt(1_000_000, 0)
                    .single()
                    .unwrap(),
            ),
        ]
    }

    #[test]
    fn roundtrips_mixed_tuple() {
        let tuple = sample_tuple();
        let bytes = encode(&tuple).unwrap();
        let decoded = decode_from_slice(&bytes).unwrap();
        assert_eq!(decoded, tuple);
    }

    #[test]
    fn empty_tuple_roundtrips() {
        let bytes = encode(&[]).unwrap();
        assert!(bytes.is_empty());
        assert_eq!(decode_from_slice(&bytes).unwrap(), vec![]);
    }

    #[test]
    fn bare_separator_is_rejected() {
        let bytes = [0u8];
        assert!(matches!(
            decode_from_slice(&bytes),
            Err(CodecError::UnexpectedSeparator { position: 0 })
        ));
    }

    #[test]
    fn tuple_order_is_lexicographic_over_elements() {
        let a = vec![Element::Int(1), Element::Int(1)];
        let b = vec![Element::Int(1), Element::Int(2)];
        assert!(encode(&a).unwrap() < encode(&b).unwrap());
    }

    #[test]
    fn shorter_tuple_with_shared_prefix_sorts_first() {
        let a = vec![Element::Int(1)];
        let b = vec![Element::Int(1), Element::Int(0)];
        assert!(encode(&a).unwrap() < encode(&b).unwrap());
    }

    proptest! {
        #[test]
        fn int_tuple_roundtrips(values: Vec<i64>) {
            let tuple: Vec<Element> = values.iter().copied().map(Element::Int).collect();
            let bytes = encode(&tuple).unwrap();
            prop_assert_eq!(decode_from_slice(&bytes).unwrap(), tuple);
        }

        #[test]
        fn int_tuple_order_preserving(a: Vec<i64>, b: Vec<i64>) {
            let ta: Vec<Element> = a.iter().copied().map(Element::Int).collect();
            let tb: Vec<Element> = b.iter().copied().map(Element::Int).collect();
            let ba = encode(&ta).unwrap();
            let bb = encode(&tb).unwrap();
            prop_assert_eq!(a.cmp(&b), ba.cmp(&bb));
        }
    }
}
