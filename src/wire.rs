//! Hand-rolled protocol-buffers-wire-format-compatible encoder for
//! `Command` (§6). No code generation and no `.proto` schema: each
//! variant gets a fixed field number, matching the declaration order
//! in `imap_types::command::Command`, and every compound payload is
//! an embedded (length-delimited) sub-message encoded by the same
//! small set of primitives. There is no decoder — the session layer
//! on the other side of the C ABI only ever reads these bytes.

use imap_types::{
    BodyPartial, BodySection, BodySectionKind, Command, DateTime, FetchAttribute, SearchKey,
    SequenceItem, SequenceSet, StatusAttribute, StoreAction, Timezone, UidCommand,
};

use crate::error::WireError;

const WIRE_VARINT: u32 = 0;
const WIRE_LEN: u32 = 2;

/// ~2 GiB, matching §7's "size overflow when serializing a command
/// larger than ≈2 GiB" semantic-error case.
const MAX_COMMAND_SIZE: usize = 2 * 1024 * 1024 * 1024;

fn put_varint(out: &mut Vec<u8>, mut v: u64) {
    loop {
        let byte = (v & 0x7f) as u8;
        v >>= 7;
        if v == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

fn put_tag(out: &mut Vec<u8>, field: u32, wire_type: u32) {
    put_varint(out, ((field as u64) << 3) | wire_type as u64);
}

fn put_varint_field(out: &mut Vec<u8>, field: u32, v: u64) {
    put_tag(out, field, WIRE_VARINT);
    put_varint(out, v);
}

fn put_bool_field(out: &mut Vec<u8>, field: u32, v: bool) {
    put_varint_field(out, field, v as u64);
}

fn put_bytes_field(out: &mut Vec<u8>, field: u32, bytes: &[u8]) {
    put_tag(out, field, WIRE_LEN);
    put_varint(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

fn put_string_field(out: &mut Vec<u8>, field: u32, s: &str) {
    put_bytes_field(out, field, s.as_bytes());
}

fn put_message_field(out: &mut Vec<u8>, field: u32, sub: &[u8]) {
    put_bytes_field(out, field, sub);
}

fn encode_sequence_item(item: &SequenceItem) -> String {
    match item {
        SequenceItem::Single(n) => n.clone(),
        SequenceItem::Range { begin, end } => format!("{begin}:{end}"),
    }
}

fn encode_sequence_set(set: &SequenceSet) -> Vec<u8> {
    let mut out = Vec::new();
    for item in &set.0 {
        put_string_field(&mut out, 1, &encode_sequence_item(item));
    }
    out
}

fn encode_date(date: &imap_types::Date) -> Vec<u8> {
    let mut out = Vec::new();
    put_varint_field(&mut out, 1, date.day as u64);
    put_varint_field(&mut out, 2, date.month as u64);
    put_varint_field(&mut out, 3, date.year as u64);
    out
}

fn encode_timezone(tz: &Timezone) -> Vec<u8> {
    let mut out = Vec::new();
    match tz {
        Timezone::Offset { positive, hour, min } => {
            put_varint_field(&mut out, 1, Timezone::encode_offset(*positive, *hour, *min) as u64);
        }
        Timezone::Code(code) => {
            put_varint_field(&mut out, 2, *code as u64);
        }
    }
    out
}

fn encode_datetime(dt: &DateTime) -> Vec<u8> {
    let mut out = Vec::new();
    put_varint_field(&mut out, 1, dt.day as u64);
    put_varint_field(&mut out, 2, dt.month as u64);
    put_varint_field(&mut out, 3, dt.year as u64);
    put_varint_field(&mut out, 4, dt.hour as u64);
    put_varint_field(&mut out, 5, dt.min as u64);
    put_varint_field(&mut out, 6, dt.sec as u64);
    put_message_field(&mut out, 7, &encode_timezone(&dt.tz));
    out
}

/// SearchKey is a recursive tagged union; field number doubles as the
/// discriminant, one per variant, matching declaration order.
fn encode_search_key(key: &SearchKey) -> Vec<u8> {
    let mut out = Vec::new();
    match key {
        SearchKey::All => put_message_field(&mut out, 1, &[]),
        SearchKey::Answered => put_message_field(&mut out, 2, &[]),
        SearchKey::Bcc(s) => put_string_field(&mut out, 3, s),
        SearchKey::Before(d) => put_message_field(&mut out, 4, &encode_date(d)),
        SearchKey::Body(s) => put_string_field(&mut out, 5, s),
        SearchKey::Cc(s) => put_string_field(&mut out, 6, s),
        SearchKey::Deleted => put_message_field(&mut out, 7, &[]),
        SearchKey::Flagged => put_message_field(&mut out, 8, &[]),
        SearchKey::From(s) => put_string_field(&mut out, 9, s),
        SearchKey::Keyword(s) => put_string_field(&mut out, 10, s),
        SearchKey::New => put_message_field(&mut out, 11, &[]),
        SearchKey::Old => put_message_field(&mut out, 12, &[]),
        SearchKey::On(d) => put_message_field(&mut out, 13, &encode_date(d)),
        SearchKey::Recent => put_message_field(&mut out, 14, &[]),
        SearchKey::Seen => put_message_field(&mut out, 15, &[]),
        SearchKey::Since(d) => put_message_field(&mut out, 16, &encode_date(d)),
        SearchKey::Subject(s) => put_string_field(&mut out, 17, s),
        SearchKey::Text(s) => put_string_field(&mut out, 18, s),
        SearchKey::To(s) => put_string_field(&mut out, 19, s),
        SearchKey::Unanswered => put_message_field(&mut out, 20, &[]),
        SearchKey::Undeleted => put_message_field(&mut out, 21, &[]),
        SearchKey::Unflagged => put_message_field(&mut out, 22, &[]),
        SearchKey::Unkeyword(s) => put_string_field(&mut out, 23, s),
        SearchKey::Unseen => put_message_field(&mut out, 24, &[]),
        SearchKey::Draft => put_message_field(&mut out, 25, &[]),
        SearchKey::Header { field, text } => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, field);
            put_string_field(&mut sub, 2, text);
            put_message_field(&mut out, 26, &sub);
        }
        SearchKey::Larger(n) => put_varint_field(&mut out, 27, *n),
        SearchKey::Smaller(n) => put_varint_field(&mut out, 28, *n),
        SearchKey::Not(inner) => put_message_field(&mut out, 29, &encode_search_key(inner)),
        SearchKey::Or(left, right) => {
            let mut sub = Vec::new();
            put_message_field(&mut sub, 1, &encode_search_key(left));
            put_message_field(&mut sub, 2, &encode_search_key(right));
            put_message_field(&mut out, 30, &sub);
        }
        SearchKey::SentBefore(d) => put_message_field(&mut out, 31, &encode_date(d)),
        SearchKey::SentOn(d) => put_message_field(&mut out, 32, &encode_date(d)),
        SearchKey::SentSince(d) => put_message_field(&mut out, 33, &encode_date(d)),
        SearchKey::Uid(set) => put_message_field(&mut out, 34, &encode_sequence_set(set)),
        SearchKey::Undraft => put_message_field(&mut out, 35, &[]),
        SearchKey::SeqSet(set) => put_message_field(&mut out, 36, &encode_sequence_set(set)),
        SearchKey::List(keys) => {
            let mut sub = Vec::new();
            for key in keys {
                put_message_field(&mut sub, 1, &encode_search_key(key));
            }
            put_message_field(&mut out, 37, &sub);
        }
    }
    out
}

fn encode_search_keys(charset: &Option<String>, keys: &[SearchKey]) -> Vec<u8> {
    let mut out = Vec::new();
    if let Some(charset) = charset {
        put_string_field(&mut out, 1, charset);
    }
    for key in keys {
        put_message_field(&mut out, 2, &encode_search_key(key));
    }
    out
}

fn encode_body_partial(partial: &BodyPartial) -> Vec<u8> {
    let mut out = Vec::new();
    put_varint_field(&mut out, 1, partial.begin as u64);
    put_varint_field(&mut out, 2, partial.count as u64);
    out
}

fn encode_body_section(section: &BodySection) -> Vec<u8> {
    let mut out = Vec::new();
    put_bool_field(&mut out, 1, section.peek);
    for part in &section.parts {
        put_varint_field(&mut out, 2, *part as u64);
    }
    match &section.kind {
        BodySectionKind::None => {}
        BodySectionKind::Header => put_message_field(&mut out, 3, &[]),
        BodySectionKind::HeaderFields(fields) => {
            let mut sub = Vec::new();
            for f in fields {
                put_string_field(&mut sub, 1, f);
            }
            put_message_field(&mut out, 4, &sub);
        }
        BodySectionKind::HeaderFieldsNot(fields) => {
            let mut sub = Vec::new();
            for f in fields {
                put_string_field(&mut sub, 1, f);
            }
            put_message_field(&mut out, 5, &sub);
        }
        BodySectionKind::Text => put_message_field(&mut out, 6, &[]),
        BodySectionKind::Mime => put_message_field(&mut out, 7, &[]),
    }
    if let Some(partial) = &section.partial {
        put_message_field(&mut out, 8, &encode_body_partial(partial));
    }
    out
}

fn encode_fetch_attribute(attr: &FetchAttribute) -> Vec<u8> {
    let mut out = Vec::new();
    match attr {
        FetchAttribute::Envelope => put_message_field(&mut out, 1, &[]),
        FetchAttribute::Flags => put_message_field(&mut out, 2, &[]),
        FetchAttribute::InternalDate => put_message_field(&mut out, 3, &[]),
        FetchAttribute::Rfc822 => put_message_field(&mut out, 4, &[]),
        FetchAttribute::Rfc822Header => put_message_field(&mut out, 5, &[]),
        FetchAttribute::Rfc822Size => put_message_field(&mut out, 6, &[]),
        FetchAttribute::Rfc822Text => put_message_field(&mut out, 7, &[]),
        FetchAttribute::Body => put_message_field(&mut out, 8, &[]),
        FetchAttribute::BodyStructure => put_message_field(&mut out, 9, &[]),
        FetchAttribute::Uid => put_message_field(&mut out, 10, &[]),
        FetchAttribute::BodySection(section) => {
            put_message_field(&mut out, 11, &encode_body_section(section))
        }
    }
    out
}

fn encode_fetch_attributes(attrs: &[FetchAttribute]) -> Vec<u8> {
    let mut out = Vec::new();
    for attr in attrs {
        put_message_field(&mut out, 1, &encode_fetch_attribute(attr));
    }
    out
}

fn status_attribute_ordinal(attr: StatusAttribute) -> u64 {
    match attr {
        StatusAttribute::Messages => 0,
        StatusAttribute::Recent => 1,
        StatusAttribute::UidNext => 2,
        StatusAttribute::UidValidity => 3,
        StatusAttribute::Unseen => 4,
    }
}

fn store_action_ordinal(action: StoreAction) -> u64 {
    match action {
        StoreAction::Add => 0,
        StoreAction::Remove => 1,
        StoreAction::Replace => 2,
    }
}

fn encode_flags(out: &mut Vec<u8>, field: u32, flags: &[String]) {
    for flag in flags {
        put_string_field(out, field, flag);
    }
}

fn encode_store_fields(
    out: &mut Vec<u8>,
    set_field: u32,
    sequence_set: &SequenceSet,
    action_field: u32,
    action: StoreAction,
    silent_field: u32,
    silent: bool,
    flags_field: u32,
    flags: &[String],
) {
    put_message_field(out, set_field, &encode_sequence_set(sequence_set));
    put_varint_field(out, action_field, store_action_ordinal(action));
    put_bool_field(out, silent_field, silent);
    encode_flags(out, flags_field, flags);
}

fn encode_uid_command(cmd: &UidCommand) -> Vec<u8> {
    let mut out = Vec::new();
    match cmd {
        UidCommand::Copy { sequence_set, mailbox } => {
            let mut sub = Vec::new();
            put_message_field(&mut sub, 1, &encode_sequence_set(sequence_set));
            put_string_field(&mut sub, 2, mailbox);
            put_message_field(&mut out, 1, &sub);
        }
        UidCommand::Move { sequence_set, mailbox } => {
            let mut sub = Vec::new();
            put_message_field(&mut sub, 1, &encode_sequence_set(sequence_set));
            put_string_field(&mut sub, 2, mailbox);
            put_message_field(&mut out, 2, &sub);
        }
        UidCommand::Fetch { sequence_set, attributes } => {
            let mut sub = Vec::new();
            put_message_field(&mut sub, 1, &encode_sequence_set(sequence_set));
            put_message_field(&mut sub, 2, &encode_fetch_attributes(attributes));
            put_message_field(&mut out, 3, &sub);
        }
        UidCommand::Store { sequence_set, action, silent, flags } => {
            let mut sub = Vec::new();
            encode_store_fields(&mut sub, 1, sequence_set, 2, *action, 3, *silent, 4, flags);
            put_message_field(&mut out, 4, &sub);
        }
        UidCommand::Search { charset, keys } => {
            put_message_field(&mut out, 5, &encode_search_keys(charset, keys));
        }
    }
    out
}

fn encode_id_set(pairs: &[(String, String)]) -> Vec<u8> {
    let mut out = Vec::new();
    for (k, v) in pairs {
        let mut sub = Vec::new();
        put_string_field(&mut sub, 1, k);
        put_string_field(&mut sub, 2, v);
        put_message_field(&mut out, 1, &sub);
    }
    out
}

/// Serializes a `Command` into its canonical wire form (§6). Fails
/// only if the encoded size would exceed the ~2 GiB ceiling, treated
/// as a semantic (not syntax) error.
pub fn encode(cmd: &Command) -> Result<Vec<u8>, WireError> {
    let mut out = Vec::new();
    match cmd {
        Command::Capability => put_message_field(&mut out, 1, &[]),
        Command::Noop => put_message_field(&mut out, 2, &[]),
        Command::Logout => put_message_field(&mut out, 3, &[]),
        Command::IdGet => put_message_field(&mut out, 4, &[]),
        Command::IdSet(pairs) => put_message_field(&mut out, 5, &encode_id_set(pairs)),
        Command::StartTls => put_message_field(&mut out, 6, &[]),
        Command::Auth { mechanism, data } => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, mechanism);
            for d in data {
                put_string_field(&mut sub, 2, d);
            }
            put_message_field(&mut out, 7, &sub);
        }
        Command::Login { username, password } => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, username);
            put_string_field(&mut sub, 2, password);
            put_message_field(&mut out, 8, &sub);
        }
        Command::Select(mailbox) => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, mailbox);
            put_message_field(&mut out, 9, &sub);
        }
        Command::Examine(mailbox) => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, mailbox);
            put_message_field(&mut out, 10, &sub);
        }
        Command::Create(mailbox) => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, mailbox);
            put_message_field(&mut out, 11, &sub);
        }
        Command::Delete(mailbox) => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, mailbox);
            put_message_field(&mut out, 12, &sub);
        }
        Command::Rename { from, to } => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, from);
            put_string_field(&mut sub, 2, to);
            put_message_field(&mut out, 13, &sub);
        }
        Command::Subscribe(mailbox) => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, mailbox);
            put_message_field(&mut out, 14, &sub);
        }
        Command::Unsubscribe(mailbox) => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, mailbox);
            put_message_field(&mut out, 15, &sub);
        }
        Command::List { reference, mailbox } => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, reference);
            put_string_field(&mut sub, 2, mailbox);
            put_message_field(&mut out, 16, &sub);
        }
        Command::Lsub { reference, mailbox } => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, reference);
            put_string_field(&mut sub, 2, mailbox);
            put_message_field(&mut out, 17, &sub);
        }
        Command::Status { mailbox, attributes } => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, mailbox);
            for attr in attributes {
                put_varint_field(&mut sub, 2, status_attribute_ordinal(*attr));
            }
            put_message_field(&mut out, 18, &sub);
        }
        Command::Append { mailbox, flags, datetime, literal } => {
            let mut sub = Vec::new();
            put_string_field(&mut sub, 1, mailbox);
            encode_flags(&mut sub, 2, flags);
            if let Some(dt) = datetime {
                put_message_field(&mut sub, 3, &encode_datetime(dt));
            }
            put_bytes_field(&mut sub, 4, literal);
            put_message_field(&mut out, 19, &sub);
        }
        Command::Idle => put_message_field(&mut out, 20, &[]),
        Command::Check => put_message_field(&mut out, 21, &[]),
        Command::Close => put_message_field(&mut out, 22, &[]),
        Command::Expunge => put_message_field(&mut out, 23, &[]),
        Command::UidExpunge(set) => put_message_field(&mut out, 24, &encode_sequence_set(set)),
        Command::Unselect => put_message_field(&mut out, 25, &[]),
        Command::Search { charset, keys } => {
            put_message_field(&mut out, 26, &encode_search_keys(charset, keys));
        }
        Command::Fetch { sequence_set, attributes } => {
            let mut sub = Vec::new();
            put_message_field(&mut sub, 1, &encode_sequence_set(sequence_set));
            put_message_field(&mut sub, 2, &encode_fetch_attributes(attributes));
            put_message_field(&mut out, 27, &sub);
        }
        Command::Store { sequence_set, action, silent, flags } => {
            let mut sub = Vec::new();
            encode_store_fields(&mut sub, 1, sequence_set, 2, *action, 3, *silent, 4, flags);
            put_message_field(&mut out, 28, &sub);
        }
        Command::Copy { sequence_set, mailbox } => {
            let mut sub = Vec::new();
            put_message_field(&mut sub, 1, &encode_sequence_set(sequence_set));
            put_string_field(&mut sub, 2, mailbox);
            put_message_field(&mut out, 29, &sub);
        }
        Command::Move { sequence_set, mailbox } => {
            let mut sub = Vec::new();
            put_message_field(&mut sub, 1, &encode_sequence_set(sequence_set));
            put_string_field(&mut sub, 2, mailbox);
            put_message_field(&mut out, 30, &sub);
        }
        Command::Uid(inner) => put_message_field(&mut out, 31, &encode_uid_command(inner)),
        Command::Done => put_message_field(&mut out, 32, &[]),
    }

    if out.len() > MAX_COMMAND_SIZE {
        return Err(WireError::TooLarge(MAX_COMMAND_SIZE));
    }

    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn varint_round_trips_small_values() {
        let mut out = Vec::new();
        put_varint(&mut out, 0);
        assert_eq!(out, vec![0]);

        let mut out = Vec::new();
        put_varint(&mut out, 300);
        assert_eq!(out, vec![0xac, 0x02]);
    }

    #[test]
    fn encodes_noop_as_single_empty_message_field() {
        let bytes = encode(&Command::Noop).unwrap();
        assert_eq!(bytes, vec![(2 << 3) | WIRE_LEN as u8, 0]);
    }

    #[test]
    fn encodes_login_with_nested_string_fields() {
        let bytes = encode(&Command::Login {
            username: "SMITH".to_string(),
            password: "SESAME".to_string(),
        })
        .unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(bytes[0], (8 << 3) | WIRE_LEN as u8);
    }
}
