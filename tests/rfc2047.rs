//! RFC 2047 encoded-word decoding edge cases exercised through the
//! public crate API rather than the in-module unit tests.

use imap_parser::{decode_encoded_word, Rfc2047Error};

#[test]
fn decodes_q_encoded_underscore_as_space() {
    let s = decode_encoded_word(b"=?iso-8859-1?Q?Hello_World?=").unwrap();
    assert_eq!(s, "Hello World");
}

#[test]
fn decodes_b_encoded_utf8() {
    let s = decode_encoded_word(b"=?UTF-8?B?UsOpc3Vtw6k=?=").unwrap();
    assert_eq!(s, "Résumé");
}

#[test]
fn rejects_non_hex_digits_after_equals() {
    assert_eq!(
        decode_encoded_word(b"=?us-ascii?Q?Hi=gg?="),
        Err(Rfc2047Error::InvalidHexByte)
    );
}

#[test]
fn rejects_hex_escape_truncated_at_end_of_word() {
    assert_eq!(
        decode_encoded_word(b"=?us-ascii?Q?Hi=4?="),
        Err(Rfc2047Error::InvalidWord)
    );
}

#[test]
fn rejects_unknown_encoding_letter() {
    assert!(matches!(
        decode_encoded_word(b"=?us-ascii?Z?hi?="),
        Err(Rfc2047Error::InvalidEncoding)
    ));
}

#[test]
fn rejects_leading_garbage_before_marker() {
    assert!(decode_encoded_word(b"not encoded").is_err());
}

#[test]
fn concatenates_runs_of_words_with_different_charsets() {
    let s = decode_encoded_word(b"=?us-ascii?Q?Hello?==?UTF-8?B?IQ==?=").unwrap();
    assert_eq!(s, "Hello!");
}
