//! IMAP `date-time` argument (RFC 3501 §9), used by `APPEND`:
//! `DQUOTE date-day-fixed "-" date-month "-" date-year SP time SP zone DQUOTE`

use imap_types::{DateTime, Timezone};
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while_m_n},
    character::complete::one_of,
    combinator::{map, map_res},
    sequence::{delimited, tuple},
    IResult,
};

use crate::imap::core::sp;

fn digits(min: usize, max: usize) -> impl Fn(&[u8]) -> IResult<&[u8], u32> {
    move |input: &[u8]| {
        map_res(
            map_res(take_while_m_n(min, max, |b: u8| b.is_ascii_digit()), std::str::from_utf8),
            str::parse::<u32>,
        )(input)
    }
}

/// date-day-fixed = (SP DIGIT) / 2DIGIT
fn date_day_fixed(input: &[u8]) -> IResult<&[u8], u8> {
    alt((
        map(tuple((sp, digits(1, 1))), |(_, d)| d as u8),
        map(digits(2, 2), |d| d as u8),
    ))(input)
}

fn date_month(input: &[u8]) -> IResult<&[u8], u8> {
    alt((
        nom::combinator::value(1, tag_no_case(b"Jan")),
        nom::combinator::value(2, tag_no_case(b"Feb")),
        nom::combinator::value(3, tag_no_case(b"Mar")),
        nom::combinator::value(4, tag_no_case(b"Apr")),
        nom::combinator::value(5, tag_no_case(b"May")),
        nom::combinator::value(6, tag_no_case(b"Jun")),
        nom::combinator::value(7, tag_no_case(b"Jul")),
        nom::combinator::value(8, tag_no_case(b"Aug")),
        nom::combinator::value(9, tag_no_case(b"Sep")),
        nom::combinator::value(10, tag_no_case(b"Oct")),
        nom::combinator::value(11, tag_no_case(b"Nov")),
        nom::combinator::value(12, tag_no_case(b"Dec")),
    ))(input)
}

fn date_year(input: &[u8]) -> IResult<&[u8], u16> {
    map(digits(4, 4), |y| y as u16)(input)
}

fn time(input: &[u8]) -> IResult<&[u8], (u8, u8, u8)> {
    map(
        tuple((digits(2, 2), tag(b":"), digits(2, 2), tag(b":"), digits(2, 2))),
        |(h, _, m, _, s)| (h as u8, m as u8, s as u8),
    )(input)
}

fn zone(input: &[u8]) -> IResult<&[u8], Timezone> {
    map(
        tuple((one_of("+-"), digits(4, 4))),
        |(sign, value)| Timezone::Offset {
            positive: sign == '+',
            hour: (value / 100) as u8,
            min: (value % 100) as u8,
        },
    )(input)
}

fn date_text(input: &[u8]) -> IResult<&[u8], imap_types::Date> {
    map(
        tuple((digits(1, 2), tag(b"-"), date_month, tag(b"-"), date_year)),
        |(day, _, month, _, year)| imap_types::Date {
            day: day as u8,
            month,
            year,
        },
    )(input)
}

/// date = date-text / DQUOTE date-text DQUOTE
/// (used by SEARCH keys like BEFORE/SINCE/ON, which carry no time-of-day)
pub fn date_only(input: &[u8]) -> IResult<&[u8], imap_types::Date> {
    alt((delimited(tag(b"\""), date_text, tag(b"\"")), date_text))(input)
}

/// date-time = DQUOTE date-day-fixed "-" date-month "-" date-year SP time SP zone DQUOTE
pub fn date_time(input: &[u8]) -> IResult<&[u8], DateTime> {
    delimited(
        tag(b"\""),
        map(
            tuple((
                date_day_fixed,
                tag(b"-"),
                date_month,
                tag(b"-"),
                date_year,
                sp,
                time,
                sp,
                zone,
            )),
            |(day, _, month, _, year, _, (hour, min, sec), _, tz)| DateTime {
                day,
                month,
                year,
                hour,
                min,
                sec,
                tz,
            },
        ),
        tag(b"\""),
    )(input)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_append_datetime() {
        let (rem, dt) = date_time(br#"" 1-Jan-2020 00:00:00 +0000"rest"#).unwrap();
        assert_eq!(rem, b"rest");
        assert_eq!(dt.day, 1);
        assert_eq!(dt.month, 1);
        assert_eq!(dt.year, 2020);
    }

    #[test]
    fn parses_search_date_unquoted() {
        let (rem, date) = date_only(b"1-Jan-2020 rest").unwrap();
        assert_eq!(rem, b" rest");
        assert_eq!(date.day, 1);
        assert_eq!(date.month, 1);
        assert_eq!(date.year, 2020);
    }

    #[test]
    fn parses_search_date_quoted() {
        let (rem, date) = date_only(br#""21-Nov-1997"rest"#).unwrap();
        assert_eq!(rem, b"rest");
        assert_eq!(date.day, 21);
        assert_eq!(date.month, 11);
        assert_eq!(date.year, 1997);
    }
}
