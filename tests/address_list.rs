//! Address-list edge cases not already covered by the unit tests
//! alongside the grammar: groups, `;` separators, domain literals,
//! and the documented relaxations.

use imap_parser::parse_address_list;
use imap_types::Address;

#[test]
fn semicolon_separates_top_level_mailboxes() {
    let got = parse_address_list(b"a@x.com; b@x.com").unwrap();
    assert_eq!(
        got,
        vec![Address::new("", "a@x.com"), Address::new("", "b@x.com")]
    );
}

#[test]
fn group_without_closing_semicolon_is_accepted() {
    let got = parse_address_list(b"Undisclosed-Recipients: a@x.com").unwrap();
    assert_eq!(got, vec![Address::new("", "a@x.com")]);
}

#[test]
fn empty_group_flattens_to_no_addresses() {
    let got = parse_address_list(b"Undisclosed-Recipients: ;").unwrap();
    assert!(got.is_empty());
}

#[test]
fn port_suffix_must_be_all_digits() {
    assert!(parse_address_list(b"user@domain.com:abc").is_err());
}

#[test]
fn trailing_comma_inside_angle_addr_is_tolerated() {
    let got = parse_address_list(b"Bob <bob@example.com,>").unwrap();
    assert_eq!(got, vec![Address::new("Bob", "bob@example.com")]);
}

#[test]
fn multiple_mailboxes_preserve_order() {
    let got = parse_address_list(b"a@x.com, b@x.com, c@x.com").unwrap();
    assert_eq!(
        got,
        vec![
            Address::new("", "a@x.com"),
            Address::new("", "b@x.com"),
            Address::new("", "c@x.com"),
        ]
    );
}

#[test]
fn quoted_local_part_contents_survive_unquoted() {
    let got = parse_address_list(br#""john doe"@example.com"#).unwrap();
    assert_eq!(got, vec![Address::new("", "john doe@example.com")]);
}

#[test]
fn malformed_address_reports_syntax_error() {
    assert!(parse_address_list(b"not an address at all <<<").is_err());
}
