#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A bare calendar date, used for the `IMAP APPEND` optional datetime
/// argument as well as the RFC 5322 date-time parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Date {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

/// Either a signed numeric offset or one of the obsolete alphabetic
/// zone codes from RFC 5322 §4.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TzCode {
    Ut,
    Utc,
    Gmt,
    Est,
    Edt,
    Cst,
    Cdt,
    Mst,
    Mdt,
    Pst,
    Pdt,
}

/// Discriminates the two `Timezone` variants without requiring both
/// to be zeroed at once on the Rust side; the bit-exact zeroing
/// invariant only matters at the wire boundary (see `wire.rs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Timezone {
    /// Signed offset from UTC. `positive` is the sign bit; `hour` and
    /// `min` are always non-negative magnitudes.
    Offset {
        positive: bool,
        hour: u8,
        min: u8,
    },
    Code(TzCode),
}

impl Timezone {
    /// Bit layout fixed by the wire contract: bit 31 is the sign (1 =
    /// positive), bits 15-8 the hour, bits 7-0 the minute. Only valid
    /// for the `Offset` variant; `Code` has no numeric encoding.
    pub fn encode_offset(positive: bool, hour: u8, min: u8) -> u32 {
        let sign = if positive { 1u32 << 31 } else { 0 };
        sign | ((hour as u32) << 8) | (min as u32)
    }

    pub fn decode_offset(word: u32) -> (bool, u8, u8) {
        let positive = (word >> 31) & 1 == 1;
        let hour = ((word >> 8) & 0xFF) as u8;
        let min = (word & 0xFF) as u8;
        (positive, hour, min)
    }
}

/// A full RFC 5322 date-time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTime {
    pub day: u8,
    pub month: u8,
    pub year: u16,
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
    pub tz: Timezone,
}
