//! SEARCH key grammar (RFC 3501 §6.4.4), including the OR/NOT tree
//! nodes (§4.1 "SEARCH OR/NOT" normalization rule).

use imap_types::SearchKey;
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    combinator::{map, value},
    multi::{many1, separated_list1},
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::imap::{
    core::{astring, number, sp},
    datetime::date_only,
    sequence::sequence_set,
};

fn astr(input: &[u8]) -> IResult<&[u8], String> {
    map(astring, |res| res.unwrap_or_default())(input)
}

fn with_text(keyword: &'static str) -> impl Fn(&[u8]) -> IResult<&[u8], String> + '_ {
    move |input: &[u8]| preceded(tuple((tag_no_case(keyword.as_bytes()), sp)), astr)(input)
}

/// search-key = "ALL" / "ANSWERED" / ... — the primitive, non-tree
/// leaves. Ordering matters: longer keywords that share a prefix with
/// a shorter one (e.g. "UNANSWERED" vs "ANSWERED") must be tried
/// before the shorter alternative can shadow them.
fn leaf(input: &[u8]) -> IResult<&[u8], SearchKey> {
    alt((
        alt((
            value(SearchKey::All, tag_no_case(b"ALL")),
            value(SearchKey::Answered, tag_no_case(b"ANSWERED")),
            map(with_text("BCC"), SearchKey::Bcc),
            map(preceded(tuple((tag_no_case(b"BEFORE"), sp)), date_only), SearchKey::Before),
            map(with_text("BODY"), SearchKey::Body),
            map(with_text("CC"), SearchKey::Cc),
            value(SearchKey::Deleted, tag_no_case(b"DELETED")),
            value(SearchKey::Draft, tag_no_case(b"DRAFT")),
            value(SearchKey::Flagged, tag_no_case(b"FLAGGED")),
            map(with_text("FROM"), SearchKey::From),
            map(
                preceded(tuple((tag_no_case(b"HEADER"), sp)), tuple((astr, sp, astr))),
                |(field, _, text)| SearchKey::Header { field, text },
            ),
        )),
        alt((
            map(with_text("KEYWORD"), SearchKey::Keyword),
            map(
                preceded(tuple((tag_no_case(b"LARGER"), sp)), number),
                |n| SearchKey::Larger(n as u64),
            ),
            value(SearchKey::New, tag_no_case(b"NEW")),
            map(preceded(tuple((tag_no_case(b"NOT"), sp)), search_key), |k| {
                SearchKey::Not(Box::new(k))
            }),
            value(SearchKey::Old, tag_no_case(b"OLD")),
            map(preceded(tuple((tag_no_case(b"ON"), sp)), date_only), SearchKey::On),
            map(
                preceded(tuple((tag_no_case(b"OR"), sp)), tuple((search_key, sp, search_key))),
                |(a, _, b)| SearchKey::Or(Box::new(a), Box::new(b)),
            ),
            value(SearchKey::Recent, tag_no_case(b"RECENT")),
            value(SearchKey::Seen, tag_no_case(b"SEEN")),
        )),
        alt((
            map(
                preceded(tuple((tag_no_case(b"SENTBEFORE"), sp)), date_only),
                SearchKey::SentBefore,
            ),
            map(preceded(tuple((tag_no_case(b"SENTON"), sp)), date_only), SearchKey::SentOn),
            map(
                preceded(tuple((tag_no_case(b"SENTSINCE"), sp)), date_only),
                SearchKey::SentSince,
            ),
            map(preceded(tuple((tag_no_case(b"SINCE"), sp)), date_only), SearchKey::Since),
            map(
                preceded(tuple((tag_no_case(b"SMALLER"), sp)), number),
                |n| SearchKey::Smaller(n as u64),
            ),
            map(with_text("SUBJECT"), SearchKey::Subject),
            map(with_text("TEXT"), SearchKey::Text),
            map(with_text("TO"), SearchKey::To),
        )),
        alt((
            value(SearchKey::Unanswered, tag_no_case(b"UNANSWERED")),
            value(SearchKey::Undeleted, tag_no_case(b"UNDELETED")),
            value(SearchKey::Unflagged, tag_no_case(b"UNFLAGGED")),
            map(with_text("UNKEYWORD"), SearchKey::Unkeyword),
            value(SearchKey::Unseen, tag_no_case(b"UNSEEN")),
            value(SearchKey::Undraft, tag_no_case(b"UNDRAFT")),
            map(
                preceded(tuple((tag_no_case(b"UID"), sp)), sequence_set),
                SearchKey::Uid,
            ),
            map(
                delimited(tag(b"("), search_key_list, tag(b")")),
                SearchKey::List,
            ),
            map(sequence_set, SearchKey::SeqSet),
        )),
    ))(input)
}

fn search_key(input: &[u8]) -> IResult<&[u8], SearchKey> {
    leaf(input)
}

fn search_key_list(input: &[u8]) -> IResult<&[u8], Vec<SearchKey>> {
    separated_list1(sp, search_key)(input)
}

/// search = "SEARCH" [SP "CHARSET" SP astring] 1*(SP search-key)
pub fn search_keys(input: &[u8]) -> IResult<&[u8], (Option<String>, Vec<SearchKey>)> {
    let (rest, charset) = nom::combinator::opt(preceded(
        tuple((tag_no_case(b"CHARSET"), sp)),
        astr,
    ))(input)?;
    let (rest, _) = nom::combinator::cond(charset.is_some(), sp)(rest)?;
    let (rest, keys) = many1(preceded(nom::combinator::opt(sp), search_key))(rest)?;
    Ok((rest, (charset, keys)))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_simple_keys() {
        let (rem, (charset, keys)) = search_keys(b"DELETED FLAGGED").unwrap();
        assert!(rem.is_empty());
        assert!(charset.is_none());
        assert_eq!(keys, vec![SearchKey::Deleted, SearchKey::Flagged]);
    }

    #[test]
    fn parses_or_not() {
        let (rem, (_, keys)) = search_keys(b"OR DELETED NOT SEEN").unwrap();
        assert!(rem.is_empty());
        assert_eq!(
            keys,
            vec![SearchKey::Or(
                Box::new(SearchKey::Deleted),
                Box::new(SearchKey::Not(Box::new(SearchKey::Seen)))
            )]
        );
    }

    #[test]
    fn parses_charset() {
        let (rem, (charset, keys)) = search_keys(b"CHARSET UTF-8 DELETED").unwrap();
        assert!(rem.is_empty());
        assert_eq!(charset, Some("UTF-8".to_string()));
        assert_eq!(keys, vec![SearchKey::Deleted]);
    }
}
