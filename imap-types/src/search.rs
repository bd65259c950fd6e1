use crate::datetime::Date;
use crate::sequence::SequenceSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One node of a SEARCH key tree. Leaves carry whichever payload
/// their keyword needs; `Or`/`Not` are the only non-leaf shapes, and
/// `And` does not exist as its own node — a flat list of keys at the
/// call site is an implicit conjunction (see `Command::Search`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchKey {
    All,
    Answered,
    Bcc(String),
    Before(Date),
    Body(String),
    Cc(String),
    Deleted,
    Flagged,
    From(String),
    Keyword(String),
    New,
    Old,
    On(Date),
    Recent,
    Seen,
    Since(Date),
    Subject(String),
    Text(String),
    To(String),
    Unanswered,
    Undeleted,
    Unflagged,
    Unkeyword(String),
    Unseen,
    Draft,
    Header { field: String, text: String },
    Larger(u64),
    Smaller(u64),
    Not(Box<SearchKey>),
    Or(Box<SearchKey>, Box<SearchKey>),
    SentBefore(Date),
    SentOn(Date),
    SentSince(Date),
    Uid(SequenceSet),
    Undraft,
    SeqSet(SequenceSet),
    /// A parenthesized list of keys, implicitly AND-ed.
    List(Vec<SearchKey>),
}
