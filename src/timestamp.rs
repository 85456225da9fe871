//! Packs a timestamp's (UTC millisecond epoch, quarter-hour UTC offset) pair
//! into a single signed 64-bit magnitude for the varint codec.
//!
//! Unlike the centidb C extension this is built from, there is no fallback
//! to the host's current local offset for naive (offset-less) timestamps:
//! callers supply an explicit [`chrono::FixedOffset`] up front. An absent
//! offset is implicit, un-inspectable host state, and a codec whose output
//! depends on the machine it ran on is a poor fit for an order-preserving
//! key format meant to be compared across processes.

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::error::{CodecError, Result};

const OFFSET_BIAS: i64 = 64;
const OFFSET_QUARTER_SECONDS: i64 = 15 * 60;

/// Packs `dt` into the signed magnitude used by the `TIME`/`NEG_TIME`
/// element kinds: `(utc_millis << 7) | (offset_quarters + 64)`.
///
/// Microseconds finer than 1ms are truncated, per the codec's documented
/// round-trip normalization.
pub fn pack(dt: DateTime<FixedOffset>) -> Result<i64> {
    let millis = dt.timestamp_millis();
    let offset_secs = i64::from(dt.offset().local_minus_utc());
    let quarters = offset_secs.div_euclid(OFFSET_QUARTER_SECONDS);
    let biased = quarters + OFFSET_BIAS;
    if !(0..=127).contains(&biased) {
        tracing::warn!(quarters = biased, "utc offset out of representable range");
        return Err(CodecError::OffsetOutOfRange {
            quarters: biased as i32,
        });
    }
    Ok((millis << 7) | biased)
}

/// Inverse of [`pack`].
pub fn unpack(magnitude: i64) -> Result<DateTime<FixedOffset>> {
    let biased = magnitude & 0x7f;
    let millis = magnitude >> 7;
    let offset_secs = ((biased - OFFSET_BIAS) * OFFSET_QUARTER_SECONDS) as i32;
    let offset = FixedOffset::east_opt(offset_secs).ok_or(CodecError::OffsetOutOfRange {
        quarters: biased as i32,
    })?;

    let secs = millis.div_euclid(1000);
    let ms = millis.rem_euclid(1000);
    offset
        .timestamp_opt(secs, (ms * 1_000_000) as u32)
        .single()
        .ok_or(CodecError::OffsetOutOfRange {
            quarters: biased as i32,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_epoch_utc() {
        let dt = FixedOffset::east_opt(0)
            .unwrap()
            .timestamp_opt(0, 0)
            .single()
            .unwrap();
        let magnitude = pack(dt).unwrap();
        assert_eq!(unpack(magnitude).unwrap(), dt);
    }

    #[test]
    fn roundtrip_positive_offset() {
        let offset = FixedOffset::east_opt(5 * 3600 + 45 * 60).unwrap(); // +05:45
        let dt = offset.timestamp_opt(1_700_000_000, 123_000_000).single().unwrap();
        let magnitude = pack(dt).unwrap();
        let back = unpack(magnitude).unwrap();
        assert_eq!(back.timestamp_millis(), dt.timestamp_millis());
        assert_eq!(back.offset().local_minus_utc(), dt.offset().local_minus_utc());
    }

    #[test]
    fn roundtrip_negative_offset_and_pre_epoch() {
        let offset = FixedOffset::west_opt(8 * 3600).unwrap(); // -08:00
        let dt = offset.timestamp_opt(-1_000_000, 999_000_000).single().unwrap();
        let magnitude = pack(dt).unwrap();
        let back = unpack(magnitude).unwrap();
        assert_eq!(back.timestamp_millis(), dt.timestamp_millis());
        assert_eq!(back.offset().local_minus_utc(), dt.offset().local_minus_utc());
    }

    #[test]
    fn microseconds_truncate_to_milliseconds() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let dt = offset.timestamp_opt(100, 123_456_789).single().unwrap();
        let magnitude = pack(dt).unwrap();
        let back = unpack(magnitude).unwrap();
        assert_eq!(back.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn offset_at_extremes_of_range() {
        for offset_secs in [-12 * 3600, 15 * 3600 + 45 * 60] {
            let offset = FixedOffset::east_opt(offset_secs).unwrap();
            let dt = offset.timestamp_opt(0, 0).single().unwrap();
            let magnitude = pack(dt).unwrap();
            let back = unpack(magnitude).unwrap();
            assert_eq!(back.offset().local_minus_utc(), offset_secs);
        }
    }

    #[test]
    fn instant_order_dominates_offset() {
        let earlier = FixedOffset::east_opt(0)
            .unwrap()
            .timestamp_opt(1000, 0)
            .single()
            .unwrap();
        let later = FixedOffset::east_opt(3600)
            .unwrap()
            .timestamp_opt(1001, 0)
            .single()
            .unwrap();
        assert!(pack(earlier).unwrap() < pack(later).unwrap());
    }
}
