use thiserror::Error;
use tinyvec::ArrayVec;

pub mod fix;
pub mod parser;
mod sentences;

pub use fix::{FixMode, FixQuality, FixRecord, Satellite, UtcDate, UtcTime};
pub use parser::{Event, Events, NmeaParser};

/// Capacity of the raw-sentence buffer carried by diagnostic events.
/// NMEA caps a line at 82 characters; real receivers overshoot, so
/// leave some headroom.
pub const SENTENCE_BUF_SIZE: usize = 96;

/// Capacity of one field between delimiters. Longer fields are
/// truncated, though every byte still counts toward the checksum.
pub const FIELD_BUF_SIZE: usize = 16;

/// Raw text of one sentence, `$` through the last byte before `\r`.
#[derive(Default, Debug, Copy, Clone)]
pub struct SentenceBuf(pub ArrayVec<[u8; SENTENCE_BUF_SIZE]>);

#[cfg(feature = "defmt")]
impl defmt::Format for SentenceBuf {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.0.as_slice())
    }
}

impl SentenceBuf {
    pub fn new() -> Self {
        Self(ArrayVec::new())
    }

    /// Text view of the buffered sentence, when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.0.as_slice()).ok()
    }
}

impl core::ops::Deref for SentenceBuf {
    type Target = ArrayVec<[u8; SENTENCE_BUF_SIZE]>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl core::ops::DerefMut for SentenceBuf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Running XOR over the sentence body, folded one byte at a time.
/// Accumulation covers everything between `$` and `*`, both exclusive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NmeaChecksum(pub u8);

impl NmeaChecksum {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn next(self, byte: u8) -> Self {
        Self(self.0 ^ byte)
    }
}

impl PartialEq<u8> for NmeaChecksum {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum NmeaError {
    /// The transmitted checksum does not match the accumulated one. The
    /// sentence's fields were applied as they were parsed and stay
    /// applied; nothing is rolled back.
    #[error("checksum mismatch: expected {expect:02x}, saw {saw:02x}")]
    ChecksumMismatch { expect: u8, saw: u8 },
}

/// The six recognized sentence kinds, plus everything else.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SentenceKind {
    #[default]
    Unknown,
    Gga,
    Gsa,
    Gsv,
    Rmc,
    Gll,
    Vtg,
}

impl SentenceKind {
    /// Match a talker+type token (field 0, leading `$` included) against
    /// the known three-letter suffixes, e.g. `$GPGGA` or `$GNRMC`.
    pub fn identify(token: &[u8]) -> Self {
        if token.first() != Some(&b'$') {
            return SentenceKind::Unknown;
        }
        for (suffix, kind) in [
            (&b"GGA"[..], SentenceKind::Gga),
            (&b"GSA"[..], SentenceKind::Gsa),
            (&b"GSV"[..], SentenceKind::Gsv),
            (&b"RMC"[..], SentenceKind::Rmc),
            (&b"GLL"[..], SentenceKind::Gll),
            (&b"VTG"[..], SentenceKind::Vtg),
        ] {
            if token.windows(suffix.len()).any(|w| w == suffix) {
                return kind;
            }
        }
        SentenceKind::Unknown
    }

    /// Completion-mask bit for this kind; empty for `Unknown`.
    pub fn mask(self) -> SentenceMask {
        match self {
            SentenceKind::Gga => SentenceMask::GGA,
            SentenceKind::Gsa => SentenceMask::GSA,
            SentenceKind::Gsv => SentenceMask::GSV,
            SentenceKind::Rmc => SentenceMask::RMC,
            SentenceKind::Gll => SentenceMask::GLL,
            SentenceKind::Vtg => SentenceMask::VTG,
            SentenceKind::Unknown => SentenceMask::empty(),
        }
    }
}

bitflags::bitflags! {
    /// Set of sentence kinds, used both for the required-kinds
    /// configuration and for tracking what has arrived this fix cycle.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
    pub struct SentenceMask: u8 {
        const GGA = 1 << 0;
        const GSA = 1 << 1;
        const RMC = 1 << 2;
        const GSV = 1 << 3;
        const GLL = 1 << 4;
        const VTG = 1 << 5;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SentenceMask {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u8:b}", self.bits())
    }
}
