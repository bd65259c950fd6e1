#![deny(missing_debug_implementations)]
//! Grammar-driven parsers for an IMAP4rev1 server front-end: the IMAP
//! command grammar itself, plus the RFC 5322 address-list and
//! date-time grammars and the RFC 2047 encoded-word decoder it
//! depends on for display names.
//!
//! [`parse`] is the main entry point for IMAP command lines;
//! [`rfc5322::parse_address_list`] and [`rfc5322::parse_date_time`]
//! cover the two header-syntax parsers. [`capi`] exposes all three
//! across a C ABI boundary.

pub mod capi;
pub mod charset;
pub mod error;
pub mod imap;
pub mod parser;
pub mod rfc2047;
pub mod rfc5322;
pub mod wire;

pub use error::{AddressListError, DateTimeError, ImapError, Rfc2047Error, WireError};
pub use imap_types::{Address, Command, DateTime, ParseResult};
pub use parser::parse;
pub use rfc2047::decode as decode_encoded_word;
pub use rfc5322::{parse_address_list, parse_date_time};
