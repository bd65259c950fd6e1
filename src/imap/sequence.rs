//! sequence-set = (seq-number / seq-range) *("," (seq-number / seq-range))

use imap_types::{SequenceItem, SequenceSet};
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, value},
    multi::separated_list1,
    sequence::tuple,
    IResult,
};

use crate::imap::core::nz_number;

fn seq_number(input: &[u8]) -> IResult<&[u8], String> {
    alt((
        map(nz_number, |n| n.to_string()),
        value("*".to_string(), tag(b"*")),
    ))(input)
}

fn seq_item(input: &[u8]) -> IResult<&[u8], SequenceItem> {
    alt((
        map(
            tuple((seq_number, tag(b":"), seq_number)),
            |(begin, _, end)| SequenceItem::Range { begin, end },
        ),
        map(seq_number, SequenceItem::Single),
    ))(input)
}

pub fn sequence_set(input: &[u8]) -> IResult<&[u8], SequenceSet> {
    map(separated_list1(tag(b","), seq_item), SequenceSet)(input)
}
