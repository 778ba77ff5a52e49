//! Streaming decoder for NMEA-0183 GNSS sentences.
//!
//! Feed bytes as they arrive off the wire; the parser tokenizes
//! `$`-framed sentences, folds the XOR checksum alongside, decodes the
//! fields of the six kinds it knows (GGA, GSA, GSV, RMC, GLL, VTG) into
//! one accumulating [`FixRecord`], and emits a snapshot once every
//! required kind has reported since the last emission.
//!
//! ```
//! use gnss_nmea::{Event, NmeaParser, SentenceMask};
//!
//! let mut parser = NmeaParser::new(SentenceMask::RMC);
//! let line = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";
//!
//! let fix = parser
//!     .decode(line.as_bytes())
//!     .find_map(|event| match event {
//!         Ok(Event::FixReady(fix)) => Some(fix),
//!         _ => None,
//!     })
//!     .unwrap();
//! assert!(fix.valid);
//! assert_eq!(fix.date.day, 23);
//! ```

#![no_std]

pub mod nmea;

pub use nmea::fix::{MAX_SATS_IN_USE, MAX_SATS_IN_VIEW};
pub use nmea::{
    Event, Events, FixMode, FixQuality, FixRecord, NmeaError, NmeaParser, Satellite,
    SentenceBuf, SentenceKind, SentenceMask, UtcDate, UtcTime,
};

// This isn't in core for some reason, so do this to avoid pulling in a dependency
pub trait Abs {
    fn abs(self) -> Self;
}

impl Abs for f32 {
    fn abs(self) -> Self {
        f32::from_bits(self.to_bits() & 0x7fff_ffff)
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct Position {
    pub lat: f32,
    pub lon: f32,
}
