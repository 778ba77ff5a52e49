use gnss_nmea::{Event, FixMode, FixQuality, FixRecord, NmeaError, NmeaParser, SentenceMask};

const GGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
const GSA: &str = "$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39\r\n";
const GSV1: &str = "$GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00*74\r\n";
const GSV2: &str = "$GPGSV,3,2,11,14,25,170,00,16,57,208,39,18,67,296,40,19,40,246,00*74\r\n";
const GSV3: &str = "$GPGSV,3,3,11,22,42,067,42,24,14,311,43,27,05,244,00*4D\r\n";
const RMC: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";
const GLL: &str = "$GPGLL,4916.45,N,12311.12,W,225444,A*31\r\n";
const VTG: &str = "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48\r\n";

fn events(parser: &mut NmeaParser, text: &str) -> Vec<Result<Event, NmeaError>> {
    parser.decode(text.as_bytes()).collect()
}

fn only_fix(events: &[Result<Event, NmeaError>]) -> FixRecord {
    match events {
        [Ok(Event::FixReady(fix))] => *fix,
        other => panic!("expected exactly one fix, got {:?}", other),
    }
}

#[test]
fn golden_rmc_line_end_to_end() {
    let mut parser = NmeaParser::new(SentenceMask::RMC);
    let fix = only_fix(&events(&mut parser, RMC));

    assert!((fix.latitude - 48.1173).abs() < 1e-4);
    assert!((fix.longitude - 11.5167).abs() < 1e-4);
    assert!((fix.speed - 22.4 * 1.852).abs() < 1e-3);
    assert!((fix.course - 84.4).abs() < 1e-4);
    assert!((fix.variation - 3.1).abs() < 1e-5);
    assert!(fix.valid);
    assert_eq!(fix.time.hour, 12);
    assert_eq!(fix.time.minute, 35);
    assert_eq!(fix.time.second, 19);
    assert_eq!(fix.date.day, 23);
    assert_eq!(fix.date.month, 3);
    assert_eq!(fix.date.year, 94);
}

#[test]
fn full_cycle_aggregates_across_all_six_kinds() {
    let mut parser = NmeaParser::default();
    let mut all = String::new();
    for line in [GGA, GSA, GSV1, GSV2, GSV3, RMC, GLL, VTG] {
        all.push_str(line);
    }
    let fix = only_fix(&events(&mut parser, &all));

    // GLL arrived after RMC, so the position is Vancouver harbour.
    assert!((fix.latitude - 49.274166).abs() < 1e-4);
    assert!((fix.longitude + 123.185333).abs() < 1e-4);
    assert!(fix.valid);
    assert_eq!(fix.time.hour, 22);
    assert_eq!(fix.time.minute, 54);
    assert_eq!(fix.date.day, 23);

    // GGA and GSA contributions, with GSA's HDOP overwriting GGA's.
    assert_eq!(fix.quality, FixQuality::Gps);
    assert_eq!(fix.sats_in_use, 8);
    assert!((fix.altitude - 592.3).abs() < 1e-3);
    assert_eq!(fix.fix_mode, FixMode::ThreeD);
    assert!((fix.hdop - 1.3).abs() < 1e-5);
    assert!((fix.pdop - 2.5).abs() < 1e-5);
    assert!((fix.vdop - 2.1).abs() < 1e-5);
    assert_eq!(fix.sat_ids[0], 4);
    assert_eq!(fix.sat_ids[3], 9);
    assert_eq!(fix.sat_ids[7], 24);

    // The three GSV messages filled eleven view slots.
    assert_eq!(fix.sats_in_view, 11);
    assert_eq!(fix.satellites[0].id, 3);
    assert_eq!(fix.satellites[4].id, 14);
    assert_eq!(fix.satellites[4].elevation, 25);
    assert_eq!(fix.satellites[4].azimuth, 170);
    assert_eq!(fix.satellites[5].snr, 39);
    assert_eq!(fix.satellites[10].id, 27);
    assert_eq!(fix.satellites[11].id, 0);

    // VTG was last, so its conversions win over RMC's.
    assert!((fix.speed - 10.2 / 3.6).abs() < 1e-4);
    assert!((fix.course - 54.7).abs() < 1e-4);
    assert!((fix.variation - 34.4).abs() < 1e-4);

    // The live record matches the emitted snapshot.
    assert!((parser.fix().course - 54.7).abs() < 1e-4);
}

#[test]
fn completion_ignores_arrival_order() {
    for order in [[GGA, RMC], [RMC, GGA]] {
        let mut parser = NmeaParser::new(SentenceMask::GGA | SentenceMask::RMC);
        assert!(events(&mut parser, order[0]).is_empty());
        let fix = only_fix(&events(&mut parser, order[1]));
        assert!((fix.latitude - 48.1173).abs() < 1e-4);
    }
}

#[test]
fn unrequired_kinds_neither_block_nor_emit() {
    let mut parser = NmeaParser::new(SentenceMask::RMC);
    assert!(events(&mut parser, GGA).is_empty());
    assert!(events(&mut parser, GSA).is_empty());
    only_fix(&events(&mut parser, RMC));
}

#[test]
fn checksum_mismatch_reports_but_the_kind_still_counts() {
    let mut parser = NmeaParser::new(SentenceMask::GGA | SentenceMask::RMC);
    let flipped = "$GPRMC,123519,B,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";

    let first = events(&mut parser, flipped);
    assert!(matches!(
        first.as_slice(),
        [Err(NmeaError::ChecksumMismatch {
            expect: 0x69,
            saw: 0x6a
        })]
    ));

    // The mismatched RMC still counted, so GGA alone completes the fix.
    let fix = only_fix(&events(&mut parser, GGA));
    assert!(!fix.valid);
    assert_eq!(fix.date.day, 23);
}

#[test]
fn partial_gsv_group_never_completes() {
    let mut parser = NmeaParser::new(SentenceMask::GSV);
    assert!(events(&mut parser, "$GPGSV,3,1,11,03,03,111,00*4A\r\n").is_empty());
    assert!(events(&mut parser, "$GPGSV,3,2,11,14,25,170,00*4C\r\n").is_empty());

    // The fields were still applied while the group stayed incomplete.
    assert_eq!(parser.fix().sats_in_view, 11);
    assert_eq!(parser.fix().satellites[4].id, 14);

    only_fix(&events(&mut parser, "$GPGSV,3,3,11,22,42,067,42*48\r\n"));
}

#[test]
fn empty_numeric_fields_decode_as_zero() {
    let mut parser = NmeaParser::new(SentenceMask::GGA);
    let bare = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,,M,,M,,*7C\r\n";
    let fix = only_fix(&events(&mut parser, bare));
    assert_eq!(fix.altitude, 0.0);
    assert!((fix.hdop - 0.9).abs() < 1e-5);

    // A present geoid separation still accumulates onto the empty altitude.
    let geoid_only = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,,M,46.9,M,,*69\r\n";
    let fix = only_fix(&events(&mut parser, geoid_only));
    assert!((fix.altitude - 46.9).abs() < 1e-4);
}

#[test]
fn unknown_sentences_carry_their_raw_text() {
    let mut parser = NmeaParser::default();
    let out = events(&mut parser, "$GPTXT,01,01,02,ANTENNA OK*36\r\n");
    match &out[..] {
        [Ok(Event::UnknownSentence(raw))] => {
            assert_eq!(raw.as_str(), Some("$GPTXT,01,01,02,ANTENNA OK*36"));
        }
        other => panic!("expected the raw line, got {:?}", other),
    }
    assert_eq!(parser.fix().latitude, 0.0);
}

#[test]
fn decode_stops_at_a_nul_byte() {
    let mut parser = NmeaParser::new(SentenceMask::RMC);
    let mut buf = Vec::new();
    buf.extend_from_slice(GGA.as_bytes());
    buf.push(0);
    buf.extend_from_slice(RMC.as_bytes());

    let out: Vec<_> = parser.decode(&buf).collect();
    assert!(out.is_empty());
    // Nothing after the NUL was consumed.
    assert_eq!(parser.fix().date.day, 0);
}

#[test]
fn south_and_west_hemispheres_negate() {
    let mut parser = NmeaParser::new(SentenceMask::RMC);
    let southern =
        "$GPRMC,071226,A,3751.65,S,14507.36,E,000.0,073.0,130694,011.3,E*64\r\n";
    let fix = only_fix(&events(&mut parser, southern));
    assert!((fix.latitude + 37.860833).abs() < 1e-4);
    assert!((fix.longitude - 145.122666).abs() < 1e-4);

    let mut parser = NmeaParser::new(SentenceMask::GLL);
    let fix = only_fix(&events(&mut parser, GLL));
    assert!((fix.latitude - 49.274166).abs() < 1e-4);
    assert!((fix.longitude + 123.185333).abs() < 1e-4);
}

#[test]
fn vtg_kmh_field_overwrites_the_knots_field() {
    let mut parser = NmeaParser::new(SentenceMask::VTG);
    let fix = only_fix(&events(&mut parser, VTG));
    assert!((fix.speed - 10.2 / 3.6).abs() < 1e-4);
    assert!((fix.speed - 5.5 * 1.852).abs() > 1.0);
    assert!((fix.course - 54.7).abs() < 1e-4);
    assert!((fix.variation - 34.4).abs() < 1e-4);
}

#[test]
fn gll_void_flag_clears_validity() {
    let mut parser = NmeaParser::new(SentenceMask::RMC | SentenceMask::GLL);
    assert!(events(&mut parser, RMC).is_empty());
    assert!(parser.fix().valid);

    let void = "$GPGLL,4916.45,N,12311.12,W,225444,V*26\r\n";
    let fix = only_fix(&events(&mut parser, void));
    assert!(!fix.valid);
}
