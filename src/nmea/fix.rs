//! The accumulated navigation state and its component value types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::Position;

/// Most satellite IDs one GSA sentence can report in use.
pub const MAX_SATS_IN_USE: usize = 12;

/// Most satellites tracked across one GSV message group.
pub const MAX_SATS_IN_VIEW: usize = 16;

/// GGA fix quality. Wire values other than 0/1/2 fold into `Invalid`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum FixQuality {
    #[default]
    Invalid,
    Gps,
    Dgps,
}

impl From<u8> for FixQuality {
    fn from(value: u8) -> Self {
        match value {
            1 => FixQuality::Gps,
            2 => FixQuality::Dgps,
            _ => FixQuality::Invalid,
        }
    }
}

/// GSA fix mode. The wire encodes no-fix as 1, so only 2/3 map to a
/// real mode.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum FixMode {
    #[default]
    Invalid,
    TwoD,
    ThreeD,
}

impl From<u8> for FixMode {
    fn from(value: u8) -> Self {
        match value {
            2 => FixMode::TwoD,
            3 => FixMode::ThreeD,
            _ => FixMode::Invalid,
        }
    }
}

/// One satellite in view, from GSV. Elevation and azimuth are whole
/// degrees, SNR is dB.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Satellite {
    pub id: u8,
    pub elevation: u8,
    pub azimuth: u16,
    pub snr: u8,
}

/// UTC time of day, as carried by GGA/RMC/GLL.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct UtcTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millis: u16,
}

/// UTC date from RMC. The year keeps the sentence's two digits.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct UtcDate {
    pub day: u8,
    pub month: u8,
    pub year: u8,
}

/// The accumulating navigation snapshot. Each sentence overwrites its
/// own fields in place; nothing is cleared between fix cycles, so a
/// field keeps its last-known value until a sentence updates it again.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Copy, Clone)]
pub struct FixRecord {
    /// Signed degrees, north positive.
    pub latitude: f32,
    /// Signed degrees, east positive.
    pub longitude: f32,
    /// Meters above mean sea level, geoid separation folded in.
    pub altitude: f32,
    pub quality: FixQuality,
    pub sats_in_use: u8,
    pub time: UtcTime,
    pub date: UtcDate,
    pub fix_mode: FixMode,
    /// IDs of the satellites used for the fix, in GSA slot order.
    pub sat_ids: [u8; MAX_SATS_IN_USE],
    pub hdop: f32,
    pub pdop: f32,
    pub vdop: f32,
    pub sats_in_view: u8,
    pub satellites: [Satellite; MAX_SATS_IN_VIEW],
    /// Receiver-reported validity from RMC/GLL.
    pub valid: bool,
    /// Ground speed (m/s).
    pub speed: f32,
    /// Course over ground, degrees.
    pub course: f32,
    /// Magnetic variation, degrees.
    pub variation: f32,
}

impl FixRecord {
    /// The latitude/longitude pair.
    pub fn position(&self) -> Position {
        Position {
            lat: self.latitude,
            lon: self.longitude,
        }
    }

    /// Timestamp of the fix, once the accumulated date and time form a
    /// real calendar instant. Two-digit years map into 2000-2099.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        let date = NaiveDate::from_ymd_opt(
            2000 + self.date.year as i32,
            self.date.month as u32,
            self.date.day as u32,
        )?;
        let time = NaiveTime::from_hms_milli_opt(
            self.time.hour as u32,
            self.time.minute as u32,
            self.time.second as u32,
            self.time.millis as u32,
        )?;
        Some(DateTime::from_naive_utc_and_offset(
            NaiveDateTime::new(date, time),
            Utc,
        ))
    }
}
