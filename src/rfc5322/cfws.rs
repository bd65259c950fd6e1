//! Comments and folding whitespace (RFC 5322 §3.2.2), stripped rather
//! than preserved: nothing downstream needs comment text.

use nom::{
    bytes::complete::{is_a, tag},
    character::complete::satisfy,
    combinator::value,
    multi::many0,
    sequence::tuple,
    IResult,
};

const WSP: &str = " \t\r\n";

/// comment = "(" *([FWS] ccontent) [FWS] ")"
/// ccontent = ctext / quoted-pair / comment
fn comment(input: &[u8]) -> IResult<&[u8], ()> {
    let (mut rest, _) = tag(b"(")(input)?;
    loop {
        let (r, _) = many0(is_a(WSP))(rest)?;
        rest = r;
        if let Ok((r, _)) = tag::<_, _, nom::error::Error<&[u8]>>(b")")(rest) {
            return Ok((r, ()));
        }
        if let Ok((r, _)) = comment(rest) {
            rest = r;
            continue;
        }
        if let Ok((r, _)) = tuple::<_, _, nom::error::Error<&[u8]>, _>((
            tag(b"\\"),
            satisfy(|c| (c as u32) < 0x80),
        ))(rest)
        {
            rest = r;
            continue;
        }
        match satisfy::<&[u8], nom::error::Error<&[u8]>>(|c| c != '(' && c != ')' && c != '\\')(
            rest,
        ) {
            Ok((r, _)) => {
                rest = r;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Zero or more runs of folding whitespace and/or comments.
pub fn opt_cfws(input: &[u8]) -> IResult<&[u8], ()> {
    value(
        (),
        many0(nom::branch::alt((value((), is_a(WSP)), comment))),
    )(input)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strips_nested_comments() {
        let (rest, _) = opt_cfws(b"  (outer (inner) comment)  rest").unwrap();
        assert_eq!(rest, b"rest");
    }

    #[test]
    fn handles_empty() {
        let (rest, _) = opt_cfws(b"rest").unwrap();
        assert_eq!(rest, b"rest");
    }
}
