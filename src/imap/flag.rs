//! flag = "\Answered" / "\Flagged" / "\Deleted" / "\Seen" / "\Draft" /
//!        flag-keyword / flag-extension

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    combinator::map,
    multi::separated_list0,
    sequence::{delimited, preceded},
    IResult,
};

use crate::imap::core::{atom, sp};

pub fn flag(input: &[u8]) -> IResult<&[u8], String> {
    alt((
        map(tag_no_case(b"\\Answered"), |_| "\\Answered".to_string()),
        map(tag_no_case(b"\\Flagged"), |_| "\\Flagged".to_string()),
        map(tag_no_case(b"\\Deleted"), |_| "\\Deleted".to_string()),
        map(tag_no_case(b"\\Seen"), |_| "\\Seen".to_string()),
        map(tag_no_case(b"\\Draft"), |_| "\\Draft".to_string()),
        map(preceded(tag(b"\\"), atom), |a| format!("\\{a}")),
        map(atom, str::to_string),
    ))(input)
}

/// flag-list = "(" [flag *(SP flag)] ")"
pub fn flag_list(input: &[u8]) -> IResult<&[u8], Vec<String>> {
    delimited(tag(b"("), separated_list0(sp, flag), tag(b")"))(input)
}
