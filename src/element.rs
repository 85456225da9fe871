//! A single typed [`Element`] and its 1-byte-kind-tagged wire encoding.
//!
//! Tag values are chosen once and then fixed — they are part of the on-wire
//! contract, exactly the way `kimberlite_types::RecordKind`'s byte
//! discriminants are pinned rather than left to derive order. The only
//! requirement spec compliance places on the *values* is the total order
//! `SEP < NULL < NEG_TIME < NEG_INTEGER < BOOL < INTEGER < TIME < BLOB <
//! TEXT < UUID`; any assignment satisfying that is conforming, but this one
//! is the one persisted data binds to.

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use crate::buffer::{Reader, Writer};
use crate::error::{CodecError, Result};
use crate::interleave;
use crate::timestamp;
use crate::varint;

/// Separator between tuples in a batch. Strictly smaller than every kind
/// tag so a longer batch sharing a prefix batch never compares less than a
/// shorter one at the separator boundary.
pub const SEP: u8 = 0;

pub const KIND_NULL: u8 = 1;
pub const KIND_NEG_TIME: u8 = 2;
pub const KIND_NEG_INTEGER: u8 = 3;
pub const KIND_BOOL: u8 = 4;
pub const KIND_INTEGER: u8 = 5;
pub const KIND_TIME: u8 = 6;
pub const KIND_BLOB: u8 = 7;
pub const KIND_TEXT: u8 = 8;
pub const KIND_UUID: u8 = 9;

/// A single tagged value encodable by this codec.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Null,
    Bool(bool),
    Int(i64),
    Blob(Vec<u8>),
    Text(String),
    Time(DateTime<FixedOffset>),
    Uuid(Uuid),
}

impl Element {
    /// Encodes this element (kind tag plus payload) into `w`.
    pub fn encode(&self, w: &mut Writer) -> Result<()> {
        match self {
            Element::Null => w.put_byte(KIND_NULL),
            Element::Bool(b) => {
                w.put_byte(KIND_BOOL);
                w.put_byte(u8::from(*b));
            }
            Element::Int(v) => encode_signed(w, *v, KIND_INTEGER, KIND_NEG_INTEGER),
            Element::Blob(bytes) => {
                w.put_byte(KIND_BLOB);
                interleave::encode(w, bytes);
            }
            Element::Text(s) => {
                w.put_byte(KIND_TEXT);
                interleave::encode(w, s.as_bytes());
            }
            Element::Time(dt) => {
                let magnitude = timestamp::pack(*dt)?;
                encode_signed(w, magnitude, KIND_TIME, KIND_NEG_TIME);
            }
            Element::Uuid(id) => {
                w.put_byte(KIND_UUID);
                interleave::encode(w, id.as_bytes());
            }
        }
        Ok(())
    }

    /// Decodes one element, given its kind tag has already been peeked by
    /// the caller. Returns `None` for `SEP`, signalling end-of-tuple inside
    /// a batch.
    pub fn decode(r: &mut Reader) -> Result<Option<Element>> {
        let position = r.position();
        let tag = r.get_byte()?;
        match tag {
            SEP => Ok(None),
            KIND_NULL => Ok(Some(Element::Null)),
            KIND_BOOL => {
                let v = varint::decode(r)?;
                Ok(Some(Element::Bool(v != 0)))
            }
            KIND_INTEGER => Ok(Some(Element::Int(decode_signed_positive(r)?))),
            KIND_NEG_INTEGER => Ok(Some(Element::Int(decode_signed_negative(r)?))),
            KIND_BLOB => Ok(Some(Element::Blob(interleave::decode(r)?))),
            KIND_TEXT => {
                let bytes = interleave::decode(r)?;
                let s = std::str::from_utf8(&bytes)?;
                Ok(Some(Element::Text(s.to_owned())))
            }
            KIND_TIME => {
                let magnitude = decode_signed_positive(r)?;
                Ok(Some(Element::Time(timestamp::unpack(magnitude)?)))
            }
            KIND_NEG_TIME => {
                let magnitude = decode_signed_negative(r)?;
                Ok(Some(Element::Time(timestamp::unpack(magnitude)?)))
            }
            KIND_UUID => {
                let bytes = interleave::decode(r)?;
                let len = bytes.len();
                let arr: [u8; 16] = bytes
                    .try_into()
                    .map_err(|_| CodecError::InvalidUuidLength { len })?;
                Ok(Some(Element::Uuid(Uuid::from_bytes(arr))))
            }
            other => {
                tracing::warn!(byte = other, position, "unrecognized element kind tag");
                Err(CodecError::UnknownKind { byte: other, position })
            }
        }
    }
}

/// Encodes a signed magnitude using the `pos_tag`/`neg_tag` pair: the tag
/// that sorts first carries the bit-complemented varint of `|v|` so that,
/// within the negative range, larger magnitude sorts smaller — preserving
/// `-2 < -1 < 0` lexicographically.
fn encode_signed(w: &mut Writer, v: i64, pos_tag: u8, neg_tag: u8) {
    if v >= 0 {
        w.put_byte(pos_tag);
        varint::encode(w, v as u64);
    } else {
        w.put_byte(neg_tag);
        // v.unsigned_abs() handles i64::MIN correctly (magnitude 2^63).
        varint::encode_complemented(w, v.unsigned_abs());
    }
}

fn decode_signed_positive(r: &mut Reader) -> Result<i64> {
    let v = varint::decode(r)?;
    Ok(v as i64)
}

fn decode_signed_negative(r: &mut Reader) -> Result<i64> {
    let magnitude = varint::decode_complemented(r)?;
    Ok(-(magnitude as i64))
}
