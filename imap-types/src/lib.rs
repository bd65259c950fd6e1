#![deny(missing_debug_implementations)]

//! Misuse-resistant data structures for the parsers in `imap-parser`.
//!
//! Every value here is owned and fully materialized: a single parse
//! invocation builds one of these, the caller holds it, and there is no
//! shared mutable state across invocations (see the top-level crate's
//! concurrency notes).

pub mod address;
pub mod command;
pub mod datetime;
pub mod fetch;
pub mod search;
pub mod sequence;

pub use address::Address;
pub use command::{Command, ParseResult, StatusAttribute, StoreAction, UidCommand};
pub use datetime::{Date, DateTime, Timezone, TzCode};
pub use fetch::{BodyPartial, BodySection, BodySectionKind, FetchAttribute};
pub use search::SearchKey;
pub use sequence::{SequenceItem, SequenceSet};
