use crate::datetime::DateTime;
use crate::fetch::FetchAttribute;
use crate::search::SearchKey;
use crate::sequence::SequenceSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `STATUS` data item keyword (RFC 3501 §6.3.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatusAttribute {
    Messages,
    Recent,
    UidNext,
    UidValidity,
    Unseen,
}

/// The normalized `STORE` verb, after stripping the `+`/`-` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StoreAction {
    Add,
    Remove,
    Replace,
}

/// The subset of commands admitted after a `UID` prefix (RFC 3501
/// §6.4.8), each carrying the sequence set it was given in UID space.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UidCommand {
    Copy {
        sequence_set: SequenceSet,
        mailbox: String,
    },
    Move {
        sequence_set: SequenceSet,
        mailbox: String,
    },
    Fetch {
        sequence_set: SequenceSet,
        attributes: Vec<FetchAttribute>,
    },
    Store {
        sequence_set: SequenceSet,
        action: StoreAction,
        silent: bool,
        flags: Vec<String>,
    },
    Search {
        charset: Option<String>,
        keys: Vec<SearchKey>,
    },
}

/// A single normalized IMAP command, one variant per grammar
/// production in the client vocabulary this parser targets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Command {
    // Any-state
    Capability,
    Noop,
    Logout,
    IdGet,
    IdSet(Vec<(String, String)>),

    // Non-authenticated
    StartTls,
    Auth {
        mechanism: String,
        data: Vec<String>,
    },
    Login {
        username: String,
        password: String,
    },

    // Authenticated
    Select(String),
    Examine(String),
    Create(String),
    Delete(String),
    Rename {
        from: String,
        to: String,
    },
    Subscribe(String),
    Unsubscribe(String),
    List {
        reference: String,
        mailbox: String,
    },
    Lsub {
        reference: String,
        mailbox: String,
    },
    Status {
        mailbox: String,
        attributes: Vec<StatusAttribute>,
    },
    Append {
        mailbox: String,
        flags: Vec<String>,
        datetime: Option<DateTime>,
        literal: Vec<u8>,
    },
    Idle,

    // Selected
    Check,
    Close,
    Expunge,
    UidExpunge(SequenceSet),
    Unselect,
    Search {
        charset: Option<String>,
        keys: Vec<SearchKey>,
    },
    Fetch {
        sequence_set: SequenceSet,
        attributes: Vec<FetchAttribute>,
    },
    Store {
        sequence_set: SequenceSet,
        action: StoreAction,
        silent: bool,
        flags: Vec<String>,
    },
    Copy {
        sequence_set: SequenceSet,
        mailbox: String,
    },
    Move {
        sequence_set: SequenceSet,
        mailbox: String,
    },
    Uid(UidCommand),

    // Continuation
    Done,
}

/// The outcome of one call into the IMAP command parser: either a
/// command and an empty error, or an empty command and a non-empty
/// error. `tag` is independent of which side of that pair is set —
/// it is salvaged even when the rest of the line failed to parse
/// (see the tag-recovery rule in the parser module).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParseResult {
    pub tag: String,
    pub command: Vec<u8>,
    pub error: String,
}

impl ParseResult {
    pub fn ok(tag: impl Into<String>, command: Vec<u8>) -> Self {
        Self {
            tag: tag.into(),
            command,
            error: String::new(),
        }
    }

    pub fn err(tag: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            command: Vec::new(),
            error: error.into(),
        }
    }
}
