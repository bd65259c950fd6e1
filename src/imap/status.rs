//! status-att-list = status-att *(SP status-att)

use imap_types::StatusAttribute;
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    combinator::value,
    multi::separated_list1,
    IResult,
};

use crate::imap::core::sp;

fn status_att(input: &[u8]) -> IResult<&[u8], StatusAttribute> {
    alt((
        value(StatusAttribute::Messages, tag_no_case(b"MESSAGES")),
        value(StatusAttribute::Recent, tag_no_case(b"RECENT")),
        value(StatusAttribute::UidNext, tag_no_case(b"UIDNEXT")),
        value(StatusAttribute::UidValidity, tag_no_case(b"UIDVALIDITY")),
        value(StatusAttribute::Unseen, tag_no_case(b"UNSEEN")),
    ))(input)
}

pub fn status_att_list(input: &[u8]) -> IResult<&[u8], Vec<StatusAttribute>> {
    separated_list1(sp, status_att)(input)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_list() {
        let (rem, atts) = status_att_list(b"MESSAGES UIDNEXT?").unwrap();
        assert_eq!(rem, b"?");
        assert_eq!(
            atts,
            vec![StatusAttribute::Messages, StatusAttribute::UidNext]
        );
    }
}
