//! The IMAP4rev1 command grammar (RFC 3501), extended with IDLE/DONE
//! (RFC 2177), MOVE (RFC 6851), UID EXPUNGE (RFC 4315), UNSELECT
//! (RFC 3691), and ID (RFC 2971).

pub mod command;
pub mod core;
pub mod datetime;
pub mod fetch;
pub mod flag;
pub mod literal;
pub mod mailbox;
pub mod search;
pub mod sequence;
pub mod status;

pub use command::command;
pub use literal::{DefaultLiteralHook, LiteralHook};
