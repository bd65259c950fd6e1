//! RFC 2047 `=?charset?encoding?text?=` encoded-word decoding.

use nom::{
    bytes::complete::{tag, take_until, take_while1},
    combinator::map_res,
    multi::many1,
    sequence::tuple,
    IResult,
};

use crate::{charset::transcode_to_utf8, error::Rfc2047Error};

/// `is_encoded(s)` returns true iff the first two bytes are `=?`. Used
/// by the address-list display-word visitor to decide whether an atom
/// token is an encoded word or plain text.
pub fn is_encoded(s: &[u8]) -> bool {
    s.starts_with(b"=?")
}

struct RawWord<'a> {
    charset: &'a str,
    encoding: u8,
    text: &'a str,
}

fn is_token_char(b: u8) -> bool {
    b != b'?' && b != b' ' && b.is_ascii_graphic()
}

fn encoded_word(input: &[u8]) -> IResult<&[u8], RawWord<'_>> {
    let (rest, (_, charset, _, encoding, _, text, _)) = tuple((
        tag(b"=?"),
        map_res(take_while1(is_token_char), std::str::from_utf8),
        tag(b"?"),
        nom::bytes::complete::take(1usize),
        tag(b"?"),
        map_res(take_until("?="), std::str::from_utf8),
        tag(b"?="),
    ))(input)?;

    Ok((
        rest,
        RawWord {
            charset,
            encoding: encoding[0],
            text,
        },
    ))
}

fn q_decode(text: &str) -> Result<Vec<u8>, Rfc2047Error> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c == b'_' {
            out.push(b' ');
            i += 1;
        } else if c == b'=' {
            if i + 2 >= bytes.len() {
                return Err(Rfc2047Error::InvalidWord);
            }
            let hi = hex_digit(bytes[i + 1])?;
            let lo = hex_digit(bytes[i + 2])?;
            out.push((hi << 4) | lo);
            i += 3;
        } else if (b' '..=b'~').contains(&c) || matches!(c, b'\n' | b'\r' | b'\t') {
            out.push(c);
            i += 1;
        } else {
            return Err(Rfc2047Error::InvalidWord);
        }
    }
    Ok(out)
}

fn hex_digit(b: u8) -> Result<u8, Rfc2047Error> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        _ => Err(Rfc2047Error::InvalidHexByte),
    }
}

fn decode_text(encoding: u8, text: &str) -> Result<Vec<u8>, Rfc2047Error> {
    match encoding.to_ascii_lowercase() {
        b'q' => q_decode(text),
        b'b' => {
            use base64::{engine::general_purpose::STANDARD, Engine};
            STANDARD
                .decode(text.trim_end_matches('='))
                .or_else(|_| STANDARD.decode(text))
                .map_err(|_| Rfc2047Error::InvalidWord)
        }
        _ => Err(Rfc2047Error::InvalidEncoding),
    }
}

/// Decodes a run of one or more encoded words with no intervening
/// whitespace into a single UTF-8 string.
pub fn decode(input: &[u8]) -> Result<String, Rfc2047Error> {
    let (rest, words) =
        many1(encoded_word)(input).map_err(|_| Rfc2047Error::InvalidWord)?;
    if !rest.is_empty() {
        return Err(Rfc2047Error::InvalidWord);
    }

    let mut result = String::new();
    for word in words {
        let decoded = decode_text(word.encoding, word.text)?;
        result.push_str(&transcode_to_utf8(word.charset, &decoded)?);
    }
    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn detects_encoded() {
        assert!(is_encoded(b"=?UTF-8?B?aGk=?="));
        assert!(!is_encoded(b"plain"));
    }

    #[test]
    fn decodes_b_encoding() {
        let s = decode("=?UTF-8?B?PEJlemUgam3DqW5hPg==?=".as_bytes()).unwrap();
        assert_eq!(s, "<Beze jména>");
    }

    #[test]
    fn decodes_q_encoding() {
        let s = decode(b"=?us-ascii?Q?Hello_World?=").unwrap();
        assert_eq!(s, "Hello World");
    }

    #[test]
    fn concatenates_consecutive_words() {
        let s = decode(b"=?us-ascii?Q?Hello?==?us-ascii?Q?World?=").unwrap();
        assert_eq!(s, "HelloWorld");
    }

    #[test]
    fn rejects_bad_hex_escape() {
        assert_eq!(
            decode(b"=?us-ascii?Q?=ZZ?="),
            Err(Rfc2047Error::InvalidHexByte)
        );
    }

    #[test]
    fn rejects_unknown_encoding() {
        assert_eq!(
            decode(b"=?us-ascii?X?hi?="),
            Err(Rfc2047Error::InvalidEncoding)
        );
    }
}
