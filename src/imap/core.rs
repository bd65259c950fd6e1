//! Lexical primitives shared across the IMAP command grammar (RFC
//! 3501 §9, "Formal Syntax", complete-buffer flavor: the whole
//! command line including any literals is already materialized by
//! the time `parse()` runs, so there's nothing to block on).

use abnf_core::streaming::{is_ALPHA, is_CHAR, is_CTL, is_DIGIT};
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take, take_while, take_while1, take_while_m_n},
    character::complete::one_of,
    combinator::{map, map_res, opt, recognize, value},
    sequence::{delimited, tuple},
    IResult,
};
use std::str::from_utf8;

use crate::{error::ImapError, imap::literal::{DefaultLiteralHook, LiteralHook}};

pub fn sp(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(b" ")(input)
}

pub fn crlf(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((tag(b"\r\n"), tag(b"\n")))(input)
}

pub fn dquote(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(b"\"")(input)
}

/// number = 1*DIGIT, 0 <= n < 2^32
pub fn number(input: &[u8]) -> IResult<&[u8], u32> {
    map_res(
        map_res(take_while1(|b: u8| is_DIGIT(b)), from_utf8),
        str::parse::<u32>,
    )(input)
}

/// nz-number = digit-nz *DIGIT
pub fn nz_number(input: &[u8]) -> IResult<&[u8], u32> {
    let (rest, n) = number(input)?;
    if n == 0 {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((rest, n))
}

fn is_quoted_specials(b: u8) -> bool {
    b == b'"' || b == b'\\'
}

fn is_text_char(b: u8) -> bool {
    matches!(b, 0x01..=0x09 | 0x0b..=0x0c | 0x0e..=0x7f)
}

fn is_quoted_char(b: u8) -> bool {
    is_text_char(b) && !is_quoted_specials(b)
}

/// quoted = DQUOTE *QUOTED-CHAR DQUOTE
pub fn quoted(input: &[u8]) -> IResult<&[u8], String> {
    let (rest, _) = dquote(input)?;
    let mut out = Vec::new();
    let mut rest = rest;
    loop {
        if let Ok((r, _)) = dquote(rest) {
            return match String::from_utf8(out) {
                Ok(s) => Ok((r, s)),
                Err(_) => Err(nom::Err::Error(nom::error::Error::new(
                    rest,
                    nom::error::ErrorKind::Verify,
                ))),
            };
        }
        if let Ok((r, (_, c))) = tuple::<_, _, nom::error::Error<&[u8]>, _>((
            tag(b"\\"),
            take_while_m_n(1, 1, is_quoted_specials),
        ))(rest)
        {
            out.extend_from_slice(c);
            rest = r;
            continue;
        }
        match take_while_m_n::<_, _, nom::error::Error<&[u8]>>(1, 1, is_quoted_char)(rest) {
            Ok((r, c)) => {
                out.extend_from_slice(c);
                rest = r;
            }
            Err(_) => {
                return Err(nom::Err::Error(nom::error::Error::new(
                    rest,
                    nom::error::ErrorKind::Tag,
                )))
            }
        }
    }
}

fn is_char8(b: u8) -> bool {
    b != 0
}

/// literal = "{" number "}" CRLF *CHAR8
pub fn literal(input: &[u8]) -> IResult<&[u8], Result<Vec<u8>, ImapError>> {
    let (rest, (count, _)) = tuple((
        delimited(tag(b"{"), nom::character::complete::i64, tag(b"}")),
        crlf,
    ))(input)?;

    let mut hook = DefaultLiteralHook;
    match hook.take(rest, count) {
        Ok((rest, bytes)) => {
            if bytes.iter().any(|&b| !is_char8(b)) {
                return Ok((
                    rest,
                    Err(ImapError::Syntax("literal contains NUL byte".into())),
                ));
            }
            Ok((rest, Ok(bytes)))
        }
        Err(e) => Ok((rest, Err(e))),
    }
}

/// string = quoted / literal
pub fn imap_string(input: &[u8]) -> IResult<&[u8], Result<String, ImapError>> {
    alt((
        map(quoted, Ok),
        map(literal, |res| {
            res.map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        }),
    ))(input)
}

fn is_list_wildcards(b: u8) -> bool {
    b == b'%' || b == b'*'
}

fn is_resp_specials(b: u8) -> bool {
    b == b']'
}

fn is_atom_specials(b: u8) -> bool {
    matches!(b, b'(' | b')' | b'{' | b' ')
        || is_CTL(b)
        || is_list_wildcards(b)
        || is_quoted_specials(b)
        || is_resp_specials(b)
}

pub fn is_atom_char(b: u8) -> bool {
    is_CHAR(b) && !is_atom_specials(b)
}

fn is_astring_char(b: u8) -> bool {
    is_atom_char(b) || is_resp_specials(b)
}

/// atom = 1*ATOM-CHAR
pub fn atom(input: &[u8]) -> IResult<&[u8], &str> {
    map_res(take_while1(is_atom_char), from_utf8)(input)
}

/// astring = 1*ASTRING-CHAR / string
pub fn astring(input: &[u8]) -> IResult<&[u8], Result<String, ImapError>> {
    alt((
        map(map_res(take_while1(is_astring_char), from_utf8), |s: &str| {
            Ok(s.to_string())
        }),
        imap_string,
    ))(input)
}

/// nil = "NIL"
pub fn nil(input: &[u8]) -> IResult<&[u8], ()> {
    value((), tag_no_case(b"NIL"))(input)
}

/// nstring = string / nil
pub fn nstring(input: &[u8]) -> IResult<&[u8], Result<Option<String>, ImapError>> {
    alt((
        map(imap_string, |res| res.map(Some)),
        map(nil, |_| Ok(None)),
    ))(input)
}

/// tag = 1*<any ASTRING-CHAR except "+">
pub fn tag_imap(input: &[u8]) -> IResult<&[u8], &str> {
    map_res(take_while1(|b| is_astring_char(b) && b != b'+'), from_utf8)(input)
}

/// charset = atom / quoted
pub fn charset(input: &[u8]) -> IResult<&[u8], Result<String, ImapError>> {
    alt((map(atom, |a| Ok(a.to_string())), quoted_ok))(input)
}

fn quoted_ok(input: &[u8]) -> IResult<&[u8], Result<String, ImapError>> {
    map(quoted, Ok)(input)
}

/// base64 = *(4base64-char) [base64-terminal]
pub fn base64_token(input: &[u8]) -> IResult<&[u8], &str> {
    map_res(
        recognize(tuple((
            take_while(is_base64_char),
            opt(alt((tag("=="), tag("=")))),
        ))),
        from_utf8,
    )(input)
}

fn is_base64_char(b: u8) -> bool {
    is_ALPHA(b) || is_DIGIT(b) || b == b'+' || b == b'/'
}
