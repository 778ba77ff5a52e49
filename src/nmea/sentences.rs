//! Field-level decoding for the six recognized sentence kinds.
//!
//! Each decoder is keyed by the field's position inside its sentence
//! (the talker+type token is field 0) and writes straight into the
//! shared record. Malformed numeric fields decode as zero rather than
//! erroring; serial input is noisy and a bad field is not worth losing
//! the line over.

use super::fix::{FixMode, FixQuality, FixRecord, UtcDate, UtcTime, MAX_SATS_IN_VIEW};
use super::SentenceKind;

/// GSV group progress, reset at every `$`.
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct GsvCycle {
    /// How many messages the current group declares.
    pub total: u8,
    /// Index of the message being decoded, counted from 1.
    pub msg: u8,
}

pub(crate) fn decode_field(
    kind: SentenceKind,
    fix: &mut FixRecord,
    cycle: &mut GsvCycle,
    index: u8,
    field: &[u8],
) {
    match kind {
        SentenceKind::Gga => gga(fix, index, field),
        SentenceKind::Gsa => gsa(fix, index, field),
        SentenceKind::Gsv => gsv(fix, cycle, index, field),
        SentenceKind::Rmc => rmc(fix, index, field),
        SentenceKind::Gll => gll(fix, index, field),
        SentenceKind::Vtg => vtg(fix, index, field),
        SentenceKind::Unknown => {}
    }
}

/// GGA: time, position, fix quality, satellites in use, HDOP, altitude.
fn gga(fix: &mut FixRecord, index: u8, field: &[u8]) {
    match index {
        1 => read_time(field, &mut fix.time),
        2 => fix.latitude = read_coordinate(field),
        3 => {
            if south(field) {
                fix.latitude = -fix.latitude;
            }
        }
        4 => fix.longitude = read_coordinate(field),
        5 => {
            if west(field) {
                fix.longitude = -fix.longitude;
            }
        }
        6 => fix.quality = FixQuality::from(read_u8(field)),
        7 => fix.sats_in_use = read_u8(field),
        8 => fix.hdop = read_f32(field),
        9 => fix.altitude = read_f32(field),
        // Geoid separation folds into the altitude.
        11 => fix.altitude += read_f32(field),
        _ => {}
    }
}

/// GSA: fix mode, the satellite IDs in use, PDOP/HDOP/VDOP.
fn gsa(fix: &mut FixRecord, index: u8, field: &[u8]) {
    match index {
        2 => fix.fix_mode = FixMode::from(read_u8(field)),
        3..=14 => fix.sat_ids[index as usize - 3] = read_u8(field),
        15 => fix.pdop = read_f32(field),
        16 => fix.hdop = read_f32(field),
        17 => fix.vdop = read_f32(field),
        _ => {}
    }
}

/// GSV: group bookkeeping, then four (id, elevation, azimuth, snr)
/// tuples per message. A group spreads one view over several sentences,
/// so the slot is derived from the message index within the group.
fn gsv(fix: &mut FixRecord, cycle: &mut GsvCycle, index: u8, field: &[u8]) {
    match index {
        1 => cycle.total = read_u8(field),
        2 => cycle.msg = read_u8(field),
        3 => fix.sats_in_view = read_u8(field),
        4..=19 => {
            // Message indices count from 1; index 0 has no slot.
            if cycle.msg == 0 {
                return;
            }
            let tuple = (index - 4) as usize;
            let slot = 4 * (cycle.msg as usize - 1) + tuple / 4;
            if slot >= MAX_SATS_IN_VIEW {
                return;
            }
            let sat = &mut fix.satellites[slot];
            match tuple % 4 {
                0 => sat.id = read_u8(field),
                1 => sat.elevation = read_u8(field),
                2 => sat.azimuth = read_u16(field),
                _ => sat.snr = read_u8(field),
            }
        }
        _ => {}
    }
}

/// RMC: the recommended minimum. Time, validity, position, speed,
/// course, date, magnetic variation.
fn rmc(fix: &mut FixRecord, index: u8, field: &[u8]) {
    match index {
        1 => read_time(field, &mut fix.time),
        2 => fix.valid = field.first() == Some(&b'A'),
        3 => fix.latitude = read_coordinate(field),
        4 => {
            if south(field) {
                fix.latitude = -fix.latitude;
            }
        }
        5 => fix.longitude = read_coordinate(field),
        6 => {
            if west(field) {
                fix.longitude = -fix.longitude;
            }
        }
        7 => fix.speed = read_f32(field) * 1.852,
        8 => fix.course = read_f32(field),
        9 => read_date(field, &mut fix.date),
        10 => fix.variation = read_f32(field),
        _ => {}
    }
}

/// GLL: position, time, validity.
fn gll(fix: &mut FixRecord, index: u8, field: &[u8]) {
    match index {
        1 => fix.latitude = read_coordinate(field),
        2 => {
            if south(field) {
                fix.latitude = -fix.latitude;
            }
        }
        3 => fix.longitude = read_coordinate(field),
        4 => {
            if west(field) {
                fix.longitude = -fix.longitude;
            }
        }
        5 => read_time(field, &mut fix.time),
        6 => fix.valid = field.first() == Some(&b'A'),
        _ => {}
    }
}

/// VTG: course, variation, and ground speed twice over (knots, then
/// km/h). Both speed fields write the same slot; the later one wins.
fn vtg(fix: &mut FixRecord, index: u8, field: &[u8]) {
    match index {
        1 => fix.course = read_f32(field),
        3 => fix.variation = read_f32(field),
        5 => fix.speed = read_f32(field) * 1.852,
        7 => fix.speed = read_f32(field) / 3.6,
        _ => {}
    }
}

fn south(field: &[u8]) -> bool {
    matches!(field.first(), Some(b'S' | b's'))
}

fn west(field: &[u8]) -> bool {
    matches!(field.first(), Some(b'W' | b'w'))
}

/// Leading-prefix float parse: optional sign, digits, one `.`, fraction
/// digits. Anything past the numeric prefix is ignored and no digits at
/// all yield 0, which is the tolerance the field decoders rely on.
pub(crate) fn read_f32(field: &[u8]) -> f32 {
    let mut i = 0;
    let mut sign = 1.0f32;
    match field.first() {
        Some(b'-') => {
            sign = -1.0;
            i = 1;
        }
        Some(b'+') => i = 1,
        _ => {}
    }

    let mut value = 0.0f32;
    while let Some(&b) = field.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value * 10.0 + (b - b'0') as f32;
        i += 1;
    }

    if field.get(i) == Some(&b'.') {
        i += 1;
        let mut scale = 0.1f32;
        while let Some(&b) = field.get(i) {
            if !b.is_ascii_digit() {
                break;
            }
            value += (b - b'0') as f32 * scale;
            scale /= 10.0;
            i += 1;
        }
    }

    sign * value
}

/// Leading-prefix decimal parse into a u8, wrapping like an integer
/// narrowing cast would.
pub(crate) fn read_u8(field: &[u8]) -> u8 {
    let mut value = 0u8;
    for &b in field {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.wrapping_mul(10).wrapping_add(b - b'0');
    }
    value
}

/// Leading-prefix decimal parse into a u16.
pub(crate) fn read_u16(field: &[u8]) -> u16 {
    let mut value = 0u16;
    for &b in field {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.wrapping_mul(10).wrapping_add((b - b'0') as u16);
    }
    value
}

/// Leading-prefix hex parse for the transmitted checksum field.
pub(crate) fn read_hex(field: &[u8]) -> u8 {
    let mut value = 0u8;
    for &b in field {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => break,
        };
        value = value.wrapping_mul(16).wrapping_add(digit);
    }
    value
}

/// `DDMM.MMMM` (longitudes carry one more leading digit) to signed
/// degrees: split whole degrees from minutes at the hundreds place.
pub(crate) fn read_coordinate(field: &[u8]) -> f32 {
    let raw = read_f32(field);
    let degrees = (raw as i32) / 100;
    let minutes = raw - degrees.wrapping_mul(100) as f32;
    degrees as f32 + minutes / 60.0
}

fn two_digits(tens: u8, ones: u8) -> u8 {
    10u8.wrapping_mul(tens.wrapping_sub(b'0'))
        .wrapping_add(ones.wrapping_sub(b'0'))
}

/// `HHMMSS[.fff]`. Fields shorter than the six clock digits leave the
/// stored time untouched; fractional digits fold into the millisecond
/// counter.
pub(crate) fn read_time(field: &[u8], time: &mut UtcTime) {
    if field.len() < 6 {
        return;
    }
    time.hour = two_digits(field[0], field[1]);
    time.minute = two_digits(field[2], field[3]);
    time.second = two_digits(field[4], field[5]);

    if field.get(6) == Some(&b'.') {
        let mut millis = 0u16;
        for &b in &field[7..] {
            millis = millis
                .wrapping_mul(10)
                .wrapping_add((b as u16).wrapping_sub(b'0' as u16));
        }
        time.millis = millis;
    }
}

/// `DDMMYY`, with the same six-digit length gate as the time decoder.
pub(crate) fn read_date(field: &[u8], date: &mut UtcDate) {
    if field.len() < 6 {
        return;
    }
    date.day = two_digits(field[0], field[1]);
    date.month = two_digits(field[2], field[3]);
    date.year = two_digits(field[4], field[5]);
}
