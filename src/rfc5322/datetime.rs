//! RFC 5322 §3.3 date-time grammar.

use chrono::{Datelike, Local};
use imap_types::{DateTime, Timezone, TzCode};
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while_m_n},
    character::complete::one_of,
    combinator::{map, map_res, opt, value},
    sequence::{preceded, tuple},
    IResult,
};

use crate::{error::DateTimeError, rfc5322::cfws::opt_cfws};

fn digits_n_m(min: usize, max: usize) -> impl Fn(&[u8]) -> IResult<&[u8], u32> {
    move |input: &[u8]| {
        map_res(
            map_res(take_while_m_n(min, max, |b: u8| b.is_ascii_digit()), std::str::from_utf8),
            str::parse::<u32>,
        )(input)
    }
}

fn day(input: &[u8]) -> IResult<&[u8], u8> {
    map(digits_n_m(1, 2), |n| n as u8)(input)
}

fn month(input: &[u8]) -> IResult<&[u8], u8> {
    alt((
        value(1, tag_no_case(b"Jan")),
        value(2, tag_no_case(b"Feb")),
        value(3, tag_no_case(b"Mar")),
        value(4, tag_no_case(b"Apr")),
        value(5, tag_no_case(b"May")),
        value(6, tag_no_case(b"Jun")),
        value(7, tag_no_case(b"Jul")),
        value(8, tag_no_case(b"Aug")),
        value(9, tag_no_case(b"Sep")),
        value(10, tag_no_case(b"Oct")),
        value(11, tag_no_case(b"Nov")),
        value(12, tag_no_case(b"Dec")),
    ))(input)
}

/// year = 2*4DIGIT, resolved to a 4-digit value when short: compares
/// the candidate against the current local year mod 100 (see the
/// crate's two-digit-year note for the determinism caveat this
/// inherits from reading the host clock).
fn year(input: &[u8]) -> IResult<&[u8], u16> {
    let (rest, digits) = take_while_m_n(2, 4, |b: u8| b.is_ascii_digit())(input)?;
    let digit_count = digits.len();
    let value: u32 = std::str::from_utf8(digits).unwrap().parse().unwrap();

    let resolved = if digit_count <= 2 {
        let current_year_mod_100 = Local::now().year() % 100;
        if value as i32 > current_year_mod_100 {
            value + 1900
        } else {
            value + 2000
        }
    } else {
        value
    };

    Ok((rest, resolved as u16))
}

fn time_of_day(input: &[u8]) -> IResult<&[u8], (u8, u8, u8)> {
    let (rest, (h, _, m, s)) = tuple((
        digits_n_m(2, 2),
        tag(b":"),
        digits_n_m(2, 2),
        opt(preceded(tag(b":"), digits_n_m(2, 2))),
    ))(input)?;
    Ok((rest, (h as u8, m as u8, s.unwrap_or(0) as u8)))
}

fn numeric_zone(input: &[u8]) -> IResult<&[u8], Timezone> {
    alt((
        map(
            tuple((one_of("+-"), digits_n_m(4, 4))),
            |(sign, value)| Timezone::Offset {
                positive: sign == '+',
                hour: (value / 100) as u8,
                min: (value % 100) as u8,
            },
        ),
        // Bare "0000" with no sign: lenient-mode compatibility alias
        // for "+0000".
        map(tag(b"0000"), |_| Timezone::Offset {
            positive: true,
            hour: 0,
            min: 0,
        }),
    ))(input)
}

fn obs_zone(input: &[u8]) -> IResult<&[u8], Timezone> {
    alt((
        value(Timezone::Code(TzCode::Ut), tag_no_case(b"UT")),
        value(Timezone::Code(TzCode::Utc), tag_no_case(b"UTC")),
        value(Timezone::Code(TzCode::Gmt), tag_no_case(b"GMT")),
        value(Timezone::Code(TzCode::Est), tag_no_case(b"EST")),
        value(Timezone::Code(TzCode::Edt), tag_no_case(b"EDT")),
        value(Timezone::Code(TzCode::Cst), tag_no_case(b"CST")),
        value(Timezone::Code(TzCode::Cdt), tag_no_case(b"CDT")),
        value(Timezone::Code(TzCode::Mst), tag_no_case(b"MST")),
        value(Timezone::Code(TzCode::Mdt), tag_no_case(b"MDT")),
        value(Timezone::Code(TzCode::Pst), tag_no_case(b"PST")),
        value(Timezone::Code(TzCode::Pdt), tag_no_case(b"PDT")),
    ))(input)
}

fn zone(input: &[u8]) -> IResult<&[u8], Timezone> {
    alt((numeric_zone, obs_zone))(input)
}

fn day_name(input: &[u8]) -> IResult<&[u8], ()> {
    nom::combinator::value(
        (),
        tuple((nom::bytes::complete::take_while1(|b: u8| b.is_ascii_alphabetic()), tag(b","))),
    )(input)
}

fn grammar(input: &[u8]) -> IResult<&[u8], DateTime> {
    let (rest, _) = opt_cfws(input)?;
    let (rest, _) = opt(tuple((day_name, opt_cfws)))(rest)?;
    let (rest, d) = day(rest)?;
    let (rest, _) = opt_cfws(rest)?;
    let (rest, mo) = month(rest)?;
    let (rest, _) = opt_cfws(rest)?;
    let (rest, y) = year(rest)?;
    let (rest, _) = opt_cfws(rest)?;
    let (rest, (h, mi, s)) = time_of_day(rest)?;
    let (rest, _) = opt_cfws(rest)?;
    let (rest, tz) = zone(rest)?;
    let (rest, _) = opt_cfws(rest)?;

    Ok((
        rest,
        DateTime {
            day: d,
            month: mo,
            year: y,
            hour: h,
            min: mi,
            sec: s,
            tz,
        },
    ))
}

/// Parses a full RFC 5322 date-time value (e.g.
/// `"Fri, 21 Nov 1997 09:55:06 -0600"`) into a `DateTime`.
pub fn parse_date_time(input: &[u8]) -> Result<DateTime, DateTimeError> {
    match grammar(input) {
        Ok((rest, dt)) if rest.is_empty() => Ok(dt),
        Ok((rest, _)) => Err(DateTimeError::Syntax(format!(
            "unexpected trailing bytes: {:?}",
            String::from_utf8_lossy(rest)
        ))),
        Err(e) => Err(DateTimeError::Syntax(format!("{e:?}"))),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_numeric_offset() {
        let dt = parse_date_time(b"Fri, 21 Nov 1997 09:55:06 -0600").unwrap();
        assert_eq!(dt.day, 21);
        assert_eq!(dt.month, 11);
        assert_eq!(dt.year, 1997);
        assert_eq!(dt.hour, 9);
        assert_eq!(dt.min, 55);
        assert_eq!(dt.sec, 6);
        assert_eq!(
            dt.tz,
            Timezone::Offset {
                positive: false,
                hour: 6,
                min: 0
            }
        );
    }

    #[test]
    fn resolves_two_digit_year() {
        let dt = parse_date_time(b"2 Jan 06 15:04:05 -0700").unwrap();
        assert_eq!(dt.year, 2006);
    }

    #[test]
    fn offset_roundtrips_through_bit_layout() {
        let word = Timezone::encode_offset(false, 6, 0);
        assert_eq!(Timezone::decode_offset(word), (false, 6, 0));
    }

    #[test]
    fn bare_zero_zone_means_plus_zero() {
        let dt = parse_date_time(b"1 Jan 2020 00:00:00 0000").unwrap();
        assert_eq!(
            dt.tz,
            Timezone::Offset {
                positive: true,
                hour: 0,
                min: 0
            }
        );
    }

    #[test]
    fn rejects_unknown_month() {
        assert!(parse_date_time(b"1 Foo 2020 00:00:00 +0000").is_err());
    }
}
