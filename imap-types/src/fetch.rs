#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `<start>.<count>` partial-fetch suffix on a BODY section, e.g.
/// `BODY[]<0.2048>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyPartial {
    pub begin: u32,
    pub count: u32,
}

/// The keyword naming which part of a MIME entity a BODY section
/// selects. `None` is the whole-part/whole-message selector (`BODY[]`
/// or `BODY[1.2]` with no trailing keyword).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BodySectionKind {
    None,
    Header,
    HeaderFields(Vec<String>),
    HeaderFieldsNot(Vec<String>),
    Text,
    Mime,
}

/// A `BODY[...]`/`BODY.PEEK[...]` fetch attribute. `parts` is the
/// dotted part-number path (`1.2.3`), empty for the top-level entity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodySection {
    pub peek: bool,
    pub parts: Vec<u32>,
    pub kind: BodySectionKind,
    pub partial: Option<BodyPartial>,
}

/// One item of a FETCH attribute list. `All`/`Fast`/`Full` are
/// surface-grammar macros only; they never appear here; they're
/// expanded to their constituent attributes by the command visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FetchAttribute {
    Envelope,
    Flags,
    InternalDate,
    Rfc822,
    Rfc822Header,
    Rfc822Size,
    Rfc822Text,
    Body,
    BodyStructure,
    Uid,
    BodySection(BodySection),
}
