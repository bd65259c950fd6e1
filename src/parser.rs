//! Top-level entry point: tag recovery, the command grammar, and wire
//! serialization wired together into the one public `parse()` call
//! (§4.1).

use imap_types::ParseResult;

use crate::{
    error::ErrorListener,
    imap::{
        command,
        core::{crlf, sp, tag_imap},
    },
    wire,
};

/// Parses one complete IMAP command line — CRLF-terminated, any
/// literals already substituted into `input` by the caller — into a
/// `ParseResult`. `delimiter` is the mailbox-hierarchy separator used
/// by INBOX case-folding.
///
/// Per the tag-recovery rule: if the tag production matches but
/// everything after it fails to parse, the returned `tag` is still
/// populated. If the tag production itself fails, `tag` is empty.
pub fn parse(input: &[u8], delimiter: u8) -> ParseResult {
    let mut listener = ErrorListener::new();

    let (rest, tag) = match tag_imap(input) {
        Ok((rest, tag)) => (rest, tag.to_string()),
        Err(_) => {
            listener.report("syntax error: expected a command tag");
            return ParseResult::err(String::new(), listener.into_message().unwrap());
        }
    };

    let rest = match sp(rest) {
        Ok((rest, _)) => rest,
        Err(_) => {
            listener.report("syntax error: expected SP after tag");
            return ParseResult::err(tag, listener.into_message().unwrap());
        }
    };

    match command(delimiter, rest) {
        Ok((rest, Ok(cmd))) => match crlf(rest) {
            Ok(_) => match wire::encode(&cmd) {
                Ok(bytes) => ParseResult::ok(tag, bytes),
                Err(e) => ParseResult::err(tag, e.to_string()),
            },
            Err(_) => {
                listener.report("syntax error: expected CRLF after command");
                ParseResult::err(tag, listener.into_message().unwrap())
            }
        },
        Ok((_, Err(semantic))) => ParseResult::err(tag, semantic.to_string()),
        Err(_) => {
            listener.report("syntax error: malformed command");
            ParseResult::err(tag, listener.into_message().unwrap())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scenario_1_noop() {
        let result = parse(b"a002 NOOP\r\n", b'/');
        assert_eq!(result.tag, "a002");
        assert!(result.error.is_empty());
        assert!(!result.command.is_empty());
    }

    #[test]
    fn scenario_2_select_folds_inbox() {
        let result = parse(b"A142 SELECT inbox\r\n", b'/');
        assert_eq!(result.tag, "A142");
        assert!(result.error.is_empty());
    }

    #[test]
    fn scenario_3_create_inboxx_not_folded() {
        let result = parse(b"A003 CREATE inboxx\r\n", b'/');
        assert_eq!(result.tag, "A003");
        assert!(result.error.is_empty());
    }

    #[test]
    fn scenario_4_login_with_literals_substituted() {
        let result = parse(b"a001 LOGIN {5}\r\nSMITH {6}\r\nSESAME\r\n", b'/');
        assert_eq!(result.tag, "a001");
        assert!(result.error.is_empty());
    }

    #[test]
    fn scenario_5_fetch_all_macro() {
        let result = parse(b"A654 FETCH 2:4 ALL\r\n", b'/');
        assert_eq!(result.tag, "A654");
        assert!(result.error.is_empty());
    }

    #[test]
    fn scenario_10_garbage_suffix_never_crashes() {
        let result = parse(b"A006 \x00\x01\xff\xfe garbage not a command", b'/');
        assert_eq!(result.tag, "A006");
        assert!(result.command.is_empty());
        assert!(!result.error.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_tag_and_error() {
        let result = parse(b"", b'/');
        assert!(result.tag.is_empty());
        assert!(result.command.is_empty());
        assert!(!result.error.is_empty());
    }

    #[test]
    fn invariant_exactly_one_of_command_or_error() {
        for input in [
            &b"a002 NOOP\r\n"[..],
            &b"A006 garbage\r\n"[..],
            &b""[..],
            &b"\x00\x00\x00"[..],
        ] {
            let result = parse(input, b'/');
            assert_ne!(result.command.is_empty(), result.error.is_empty());
        }
    }
}
