//! Mailbox name parsing and the INBOX case-folding normalization rule
//! (§4.1).

use nom::IResult;

use crate::{error::ImapError, imap::core::astring};

/// mailbox = "INBOX" / astring, with the INBOX case-folding rule
/// applied here rather than left to the caller: any name whose first
/// five bytes case-insensitively match "INBOX", and which either ends
/// there or is followed by `delimiter`, is folded to exactly "INBOX".
pub fn mailbox(delimiter: u8) -> impl Fn(&[u8]) -> IResult<&[u8], Result<String, ImapError>> {
    move |input: &[u8]| {
        let (rest, raw) = astring(input)?;
        Ok((rest, raw.map(|name| fold_inbox(&name, delimiter))))
    }
}

fn fold_inbox(name: &str, delimiter: u8) -> String {
    if name.len() < 5 {
        return name.to_string();
    }
    let (head, tail) = name.split_at(5);
    if !head.eq_ignore_ascii_case("INBOX") {
        return name.to_string();
    }
    match tail.as_bytes().first() {
        None => "INBOX".to_string(),
        Some(&b) if b == delimiter => format!("INBOX{tail}"),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn folds_bare_inbox() {
        assert_eq!(fold_inbox("inbox", b'/'), "INBOX");
    }

    #[test]
    fn folds_inbox_with_delimiter_suffix() {
        assert_eq!(fold_inbox("InBoX/Sub", b'/'), "INBOX/Sub");
    }

    #[test]
    fn leaves_inboxx_verbatim() {
        assert_eq!(fold_inbox("inboxx", b'/'), "inboxx");
    }

    #[test]
    fn leaves_short_names_verbatim() {
        assert_eq!(fold_inbox("inb", b'/'), "inb");
    }
}
