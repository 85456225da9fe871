//! Batches: a shared prefix followed by one or more tuples joined by `SEP`.
//!
//! A batch is how several keys that share a common prefix (for instance, all
//! keys belonging to one logical collection) are packed together: the
//! prefix is written once, then each tuple, with [`element::SEP`](crate::element::SEP)
//! written *between* consecutive tuples (never after the last) so the
//! decoder can tell where one tuple ends and the next begins.
//!
//! [`Packable`] replaces the C source's runtime dispatch on the shape of the
//! Python object handed to `packs()` (a bare value, a single tuple, or a
//! list of tuples) with a static enum fixed at compile time, picked by the
//! caller's `From` conversion rather than sniffed from the argument's type.

use crate::buffer::{Reader, Writer};
use crate::element::{Element, SEP};
use crate::error::Result;
use crate::tuple;

/// The three shapes `pack`/`unpack` accept, chosen statically via `From`
/// rather than inspected at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Packable {
    /// A single bare element, treated as a one-element tuple.
    Value(Element),
    /// A single tuple.
    One(Vec<Element>),
    /// Several tuples packed back to back behind one shared prefix.
    Many(Vec<Vec<Element>>),
}

impl From<Element> for Packable {
    fn from(e: Element) -> Self {
        Packable::Value(e)
    }
}

impl From<Vec<Element>> for Packable {
    fn from(t: Vec<Element>) -> Self {
        Packable::One(t)
    }
}

impl From<Vec<Vec<Element>>> for Packable {
    fn from(ts: Vec<Vec<Element>>) -> Self {
        Packable::Many(ts)
    }
}

impl Packable {
    pub(crate) fn into_tuples(self) -> Vec<Vec<Element>> {
        match self {
            Packable::Value(e) => vec![vec![e]],
            Packable::One(t) => vec![t],
            Packable::Many(ts) => ts,
        }
    }
}

/// The two shapes `tuplize` accepts: a bare value, or an already-formed
/// tuple. Narrower than [`Packable`] because wrapping a *list* of tuples in
/// one more tuple has no sensible meaning — `tuplize` only ever normalizes
/// a single logical key.
#[derive(Debug, Clone, PartialEq)]
pub enum Singular {
    Value(Element),
    One(Vec<Element>),
}

impl From<Element> for Singular {
    fn from(e: Element) -> Self {
        Singular::Value(e)
    }
}

impl From<Vec<Element>> for Singular {
    fn from(t: Vec<Element>) -> Self {
        Singular::One(t)
    }
}

impl Singular {
    fn into_tuple(self) -> Vec<Element> {
        match self {
            Singular::Value(e) => vec![e],
            Singular::One(t) => t,
        }
    }
}

/// Returns `item` unchanged if it is already a tuple, otherwise wraps it in
/// a one-element tuple.
pub fn tuplize(item: impl Into<Singular>) -> Vec<Element> {
    item.into().into_tuple()
}

/// Encodes `prefix` followed by `items`'s tuples, joined by `SEP` —
/// *between* tuples, not after the last one, so a single-tuple batch carries
/// no separator at all. (A zero-tuple batch is therefore indistinguishable
/// on the wire from a batch holding one empty tuple; callers that need to
/// represent "no tuples" should carry that count alongside the bytes.)
pub fn pack(prefix: &[u8], items: impl Into<Packable>) -> Result<Vec<u8>> {
    let tuples = items.into().into_tuples();
    let mut w = Writer::with_capacity(prefix.len() + 16);
    w.put_bytes(prefix);
    for (i, t) in tuples.iter().enumerate() {
        if i > 0 {
            w.put_byte(SEP);
        }
        tuple::encode_into(&mut w, t)?;
    }
    Ok(w.finalize())
}

/// Decodes every tuple in a batch previously produced by [`pack`]. Returns
/// `Ok(None)` — the `NoMatch` sentinel — if `data` does not begin with
/// `prefix`; this is not an error, since a prefix mismatch is the expected
/// way callers probe whether a byte string belongs to a given key range.
pub fn unpack_many(prefix: &[u8], data: &[u8]) -> Result<Option<Vec<Vec<Element>>>> {
    if data.len() < prefix.len() || &data[..prefix.len()] != prefix {
        return Ok(None);
    }
    let mut r = Reader::new(&data[prefix.len()..]);
    let mut tuples = Vec::new();
    let mut current = Vec::new();
    while !r.is_empty() {
        match Element::decode(&mut r)? {
            Some(e) => current.push(e),
            None => tuples.push(std::mem::take(&mut current)),
        }
    }
    tuples.push(current);
    Ok(Some(tuples))
}

/// Decodes the first tuple behind `prefix`, stopping at the first `SEP` (or
/// end of input) and ignoring any further tuples that might follow it in
/// `data`. Returns `Ok(None)` — the `NoMatch` sentinel — if `data` does not
/// begin with `prefix`.
pub fn unpack_one(prefix: &[u8], data: &[u8]) -> Result<Option<Vec<Element>>> {
    if data.len() < prefix.len() || &data[..prefix.len()] != prefix {
        return Ok(None);
    }
    let mut r = Reader::new(&data[prefix.len()..]);
    let mut tuple = Vec::new();
    while !r.is_empty() {
        match Element::decode(&mut r)? {
            Some(e) => tuple.push(e),
            None => break,
        }
    }
    Ok(Some(tuple))
}
