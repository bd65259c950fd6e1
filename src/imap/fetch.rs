//! FETCH attribute grammar, including the BODY section syntax and the
//! ALL/FAST/FULL macro expansion (§4.1 "FETCH macros" — expanded here
//! in the visitor, not the grammar, exactly as the normalization rule
//! requires).

use imap_types::{BodyPartial, BodySection, BodySectionKind, FetchAttribute};
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    combinator::{map, opt, value},
    multi::separated_list1,
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::imap::core::{astring, number, nz_number, sp};

fn header_list(input: &[u8]) -> IResult<&[u8], Vec<String>> {
    delimited(
        tag(b"("),
        separated_list1(sp, |i| astring(i).map(|(r, res)| (r, res.unwrap_or_default()))),
        tag(b")"),
    )(input)
}

fn section_msgtext(input: &[u8]) -> IResult<&[u8], BodySectionKind> {
    alt((
        map(
            preceded(tuple((tag_no_case(b"HEADER.FIELDS.NOT"), sp)), header_list),
            BodySectionKind::HeaderFieldsNot,
        ),
        map(
            preceded(tuple((tag_no_case(b"HEADER.FIELDS"), sp)), header_list),
            BodySectionKind::HeaderFields,
        ),
        value(BodySectionKind::Header, tag_no_case(b"HEADER")),
        value(BodySectionKind::Text, tag_no_case(b"TEXT")),
        value(BodySectionKind::Mime, tag_no_case(b"MIME")),
    ))(input)
}

fn section_part(input: &[u8]) -> IResult<&[u8], Vec<u32>> {
    separated_list1(tag(b"."), nz_number)(input)
}

/// section-spec = section-msgtext / (section-part ["." section-text])
fn section_spec(input: &[u8]) -> IResult<&[u8], (Vec<u32>, BodySectionKind)> {
    alt((
        map(section_msgtext, |kind| (Vec::new(), kind)),
        map(
            tuple((section_part, opt(preceded(tag(b"."), section_msgtext)))),
            |(parts, kind)| (parts, kind.unwrap_or(BodySectionKind::None)),
        ),
    ))(input)
}

fn section(input: &[u8]) -> IResult<&[u8], (Vec<u32>, BodySectionKind)> {
    delimited(
        tag(b"["),
        map(opt(section_spec), |spec| {
            spec.unwrap_or((Vec::new(), BodySectionKind::None))
        }),
        tag(b"]"),
    )(input)
}

/// "<" number "." nz-number ">" — begin may be 0, count may not.
fn partial(input: &[u8]) -> IResult<&[u8], BodyPartial> {
    delimited(
        tag(b"<"),
        map(
            tuple((number, tag(b"."), nz_number)),
            |(begin, _, count)| BodyPartial { begin, count },
        ),
        tag(b">"),
    )(input)
}

fn body_section_attribute(input: &[u8]) -> IResult<&[u8], FetchAttribute> {
    let (rest, peek) = alt((
        value(true, tag_no_case(b"BODY.PEEK")),
        value(false, tag_no_case(b"BODY")),
    ))(input)?;
    let (rest, (parts, kind)) = section(rest)?;
    let (rest, partial) = opt(partial)(rest)?;

    Ok((
        rest,
        FetchAttribute::BodySection(BodySection {
            peek,
            parts,
            kind,
            partial,
        }),
    ))
}

fn single_fetch_attribute(input: &[u8]) -> IResult<&[u8], FetchAttribute> {
    alt((
        body_section_attribute,
        value(FetchAttribute::BodyStructure, tag_no_case(b"BODYSTRUCTURE")),
        value(FetchAttribute::Body, tag_no_case(b"BODY")),
        value(FetchAttribute::Envelope, tag_no_case(b"ENVELOPE")),
        value(FetchAttribute::Flags, tag_no_case(b"FLAGS")),
        value(FetchAttribute::InternalDate, tag_no_case(b"INTERNALDATE")),
        value(FetchAttribute::Rfc822Header, tag_no_case(b"RFC822.HEADER")),
        value(FetchAttribute::Rfc822Size, tag_no_case(b"RFC822.SIZE")),
        value(FetchAttribute::Rfc822Text, tag_no_case(b"RFC822.TEXT")),
        value(FetchAttribute::Rfc822, tag_no_case(b"RFC822")),
        value(FetchAttribute::Uid, tag_no_case(b"UID")),
    ))(input)
}

const FAST: [FetchAttribute; 3] = [
    FetchAttribute::Flags,
    FetchAttribute::InternalDate,
    FetchAttribute::Rfc822Size,
];

fn all_attributes() -> Vec<FetchAttribute> {
    let mut v = FAST.to_vec();
    v.push(FetchAttribute::Envelope);
    v
}

fn full_attributes() -> Vec<FetchAttribute> {
    let mut v = all_attributes();
    v.push(FetchAttribute::Body);
    v
}

/// fetch-att *(SP fetch-att) / "(" fetch-att *(SP fetch-att) ")", with
/// the ALL/FAST/FULL macros expanded to their constituent attributes.
pub fn fetch_attributes(input: &[u8]) -> IResult<&[u8], Vec<FetchAttribute>> {
    alt((
        value(all_attributes(), tag_no_case(b"ALL")),
        value(FAST.to_vec(), tag_no_case(b"FAST")),
        value(full_attributes(), tag_no_case(b"FULL")),
        map(single_fetch_attribute, |a| vec![a]),
        delimited(
            tag(b"("),
            separated_list1(sp, single_fetch_attribute),
            tag(b")"),
        ),
    ))(input)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expands_all_macro() {
        let (rem, atts) = fetch_attributes(b"ALL\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(
            atts,
            vec![
                FetchAttribute::Flags,
                FetchAttribute::InternalDate,
                FetchAttribute::Rfc822Size,
                FetchAttribute::Envelope,
            ]
        );
    }

    #[test]
    fn parses_body_section_with_partial() {
        let (rem, atts) = fetch_attributes(b"BODY[]<0.2048>").unwrap();
        assert!(rem.is_empty());
        assert_eq!(
            atts,
            vec![FetchAttribute::BodySection(BodySection {
                peek: false,
                parts: vec![],
                kind: BodySectionKind::None,
                partial: Some(BodyPartial {
                    begin: 0,
                    count: 2048
                }),
            })]
        );
    }

    #[test]
    fn parses_parenthesized_list() {
        let (rem, atts) = fetch_attributes(b"(FLAGS UID)").unwrap();
        assert!(rem.is_empty());
        assert_eq!(atts, vec![FetchAttribute::Flags, FetchAttribute::Uid]);
    }
}
