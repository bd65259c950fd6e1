#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One member of a `SequenceSet`. Numbers are kept as their original
/// text so that `*` (the highest message/UID in the mailbox) and
/// leading zeros, if any slipped through, round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SequenceItem {
    Single(String),
    Range { begin: String, end: String },
}

/// An ordered, comma-separated list of message numbers and ranges, as
/// used by FETCH/STORE/COPY/SEARCH and their UID variants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequenceSet(pub Vec<SequenceItem>);

impl SequenceSet {
    pub fn single(item: impl Into<String>) -> Self {
        Self(vec![SequenceItem::Single(item.into())])
    }
}
