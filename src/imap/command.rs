//! The top-level `command` production (RFC 3501 §6), tying the
//! per-verb sub-grammars together into one `Command` value, plus the
//! normalization rules that are contractual rather than syntactic
//! (§4.1): STORE prefix/SILENT, ID NIL vs. parameter list, SEARCH
//! charset handling.

use imap_types::{Command, StatusAttribute, StoreAction, UidCommand};
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    combinator::{map, opt, value},
    multi::{many_m_n, separated_list1},
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::{
    error::ImapError,
    imap::{
        core::{astring, atom, base64_token, imap_string, nil, sp},
        datetime::date_time,
        fetch::fetch_attributes,
        flag::flag_list,
        mailbox::mailbox,
        search::search_keys,
        sequence::sequence_set,
        status::status_att_list,
    },
};

/// Maximum number of key/value pairs accepted in `ID (...)`. Guards a
/// trivial memory-exhaustion vector: a client sending a parameter
/// list with no practical size limit.
const MAX_ID_PARAMS: usize = 30;

fn astr(input: &[u8]) -> IResult<&[u8], Result<String, ImapError>> {
    astring(input)
}

fn unwrap_astr(input: &[u8]) -> IResult<&[u8], String> {
    map(astr, |res| res.unwrap_or_default())(input)
}

fn mbox(delimiter: u8) -> impl Fn(&[u8]) -> IResult<&[u8], Result<String, ImapError>> {
    mailbox(delimiter)
}

/// id-param-value = astring / nil, with NIL lowered to the empty string.
fn id_param_value(input: &[u8]) -> IResult<&[u8], String> {
    alt((value(String::new(), nil), unwrap_astr))(input)
}

fn id_param_pair(input: &[u8]) -> IResult<&[u8], (String, String)> {
    map(
        tuple((unwrap_astr, sp, id_param_value)),
        |(k, _, v)| (k, v),
    )(input)
}

/// ID NIL / "(" *(string SP nstring) ")"
fn id_args(input: &[u8]) -> IResult<&[u8], Command> {
    alt((
        value(Command::IdGet, nil),
        map(
            delimited(
                tag(b"("),
                many_m_n(0, MAX_ID_PARAMS, preceded(opt(sp), id_param_pair)),
                tag(b")"),
            ),
            Command::IdSet,
        ),
    ))(input)
}

/// STORE prefix/suffix normalization: `+FLAGS`, `-FLAGS`, `FLAGS`, each
/// optionally followed by `.SILENT`.
fn store_action_and_silence(input: &[u8]) -> IResult<&[u8], (StoreAction, bool)> {
    let (rest, action) = alt((
        value(StoreAction::Add, tag(b"+")),
        value(StoreAction::Remove, tag(b"-")),
        value(StoreAction::Replace, |i| Ok((i, ()))),
    ))(input)?;
    let (rest, _) = tag_no_case(b"FLAGS")(rest)?;
    let (rest, silent) = map(opt(tag_no_case(b".SILENT")), |s| s.is_some())(rest)?;
    Ok((rest, (action, silent)))
}

fn store_flags(input: &[u8]) -> IResult<&[u8], Vec<String>> {
    alt((flag_list, separated_list1(sp, crate::imap::flag::flag)))(input)
}

/// Shared tail for `STORE` and `UID STORE`.
fn store_args(input: &[u8]) -> IResult<&[u8], (StoreAction, bool, Vec<String>)> {
    map(
        tuple((store_action_and_silence, sp, store_flags)),
        |((action, silent), _, flags)| (action, silent, flags),
    )(input)
}

fn status_atts(input: &[u8]) -> IResult<&[u8], Vec<StatusAttribute>> {
    delimited(tag(b"("), status_att_list, tag(b")"))(input)
}

fn append_flags(input: &[u8]) -> IResult<&[u8], Vec<String>> {
    map(opt(preceded(sp, flag_list)), |v| v.unwrap_or_default())(input)
}

fn append_datetime(input: &[u8]) -> IResult<&[u8], Option<imap_types::DateTime>> {
    opt(preceded(sp, date_time))(input)
}

fn auth_data(input: &[u8]) -> IResult<&[u8], Vec<String>> {
    nom::multi::many0(preceded(sp, map(base64_token, str::to_string)))(input)
}

/// command-auth / command-nonauth / command-select / command-any, as
/// one flat alternation keyed on the leading verb keyword.
fn command_body(delimiter: u8, input: &[u8]) -> IResult<&[u8], Result<Command, ImapError>> {
    alt((
        any_state_and_nonauth(delimiter),
        mailbox_verbs(delimiter),
        selected_state(delimiter),
        |i| uid_command(delimiter, i),
    ))(input)
}

fn any_state_and_nonauth(delimiter: u8) -> impl Fn(&[u8]) -> IResult<&[u8], Result<Command, ImapError>> {
    move |input: &[u8]| alt((
        // Any-state
        value(Ok(Command::Capability), tag_no_case(b"CAPABILITY")),
        value(Ok(Command::Noop), tag_no_case(b"NOOP")),
        value(Ok(Command::Logout), tag_no_case(b"LOGOUT")),
        map(
            preceded(tuple((tag_no_case(b"ID"), sp)), id_args),
            Ok,
        ),
        // Non-authenticated
        value(Ok(Command::StartTls), tag_no_case(b"STARTTLS")),
        map(
            preceded(
                tuple((tag_no_case(b"AUTHENTICATE"), sp)),
                tuple((map(atom, str::to_string), auth_data)),
            ),
            |(mechanism, data)| Ok(Command::Auth { mechanism, data }),
        ),
        map(
            preceded(
                tuple((tag_no_case(b"LOGIN"), sp)),
                tuple((imap_string, sp, imap_string)),
            ),
            |(username, _, password)| match (username, password) {
                (Ok(username), Ok(password)) => Ok(Command::Login { username, password }),
                (Err(e), _) | (_, Err(e)) => Err(e),
            },
        ),
    ))(input)
}

fn mailbox_verbs(delimiter: u8) -> impl Fn(&[u8]) -> IResult<&[u8], Result<Command, ImapError>> {
    move |input: &[u8]| alt((
        // Authenticated, mailbox-taking verbs
        map(
            preceded(tuple((tag_no_case(b"SELECT"), sp)), mbox(delimiter)),
            |res| res.map(Command::Select),
        ),
        map(
            preceded(tuple((tag_no_case(b"EXAMINE"), sp)), mbox(delimiter)),
            |res| res.map(Command::Examine),
        ),
        map(
            preceded(tuple((tag_no_case(b"CREATE"), sp)), mbox(delimiter)),
            |res| res.map(Command::Create),
        ),
        map(
            preceded(tuple((tag_no_case(b"DELETE"), sp)), mbox(delimiter)),
            |res| res.map(Command::Delete),
        ),
        map(
            preceded(
                tuple((tag_no_case(b"RENAME"), sp)),
                tuple((mbox(delimiter), sp, mbox(delimiter))),
            ),
            |(from, _, to)| match (from, to) {
                (Ok(from), Ok(to)) => Ok(Command::Rename { from, to }),
                (Err(e), _) | (_, Err(e)) => Err(e),
            },
        ),
        map(
            preceded(tuple((tag_no_case(b"SUBSCRIBE"), sp)), mbox(delimiter)),
            |res| res.map(Command::Subscribe),
        ),
        map(
            preceded(tuple((tag_no_case(b"UNSUBSCRIBE"), sp)), mbox(delimiter)),
            |res| res.map(Command::Unsubscribe),
        ),
        map(
            preceded(
                tuple((tag_no_case(b"LSUB"), sp)),
                tuple((unwrap_astr, sp, unwrap_astr)),
            ),
            |(reference, _, mailbox)| Ok(Command::Lsub { reference, mailbox }),
        ),
        map(
            preceded(
                tuple((tag_no_case(b"LIST"), sp)),
                tuple((unwrap_astr, sp, unwrap_astr)),
            ),
            |(reference, _, mailbox)| Ok(Command::List { reference, mailbox }),
        ),
        map(
            preceded(
                tuple((tag_no_case(b"STATUS"), sp)),
                tuple((mbox(delimiter), sp, status_atts)),
            ),
            |(mailbox, _, attributes)| mailbox.map(|mailbox| Command::Status { mailbox, attributes }),
        ),
        map(
            preceded(
                tuple((tag_no_case(b"APPEND"), sp)),
                tuple((mbox(delimiter), append_flags, append_datetime, sp, crate::imap::core::literal)),
            ),
            |(mailbox, flags, datetime, _, literal)| match (mailbox, literal) {
                (Ok(mailbox), Ok(literal)) => Ok(Command::Append { mailbox, flags, datetime, literal }),
                (Err(e), _) => Err(e),
                (_, Err(e)) => Err(e),
            },
        ),
        value(Ok(Command::Idle), tag_no_case(b"IDLE")),
        value(Ok(Command::Done), tag_no_case(b"DONE")),
    ))(input)
}

fn selected_state(delimiter: u8) -> impl Fn(&[u8]) -> IResult<&[u8], Result<Command, ImapError>> {
    move |input: &[u8]| alt((
        value(Ok(Command::Check), tag_no_case(b"CHECK")),
        value(Ok(Command::Close), tag_no_case(b"CLOSE")),
        value(Ok(Command::Expunge), tag_no_case(b"EXPUNGE")),
        value(Ok(Command::Unselect), tag_no_case(b"UNSELECT")),
        map(
            preceded(tuple((tag_no_case(b"UID"), sp, tag_no_case(b"EXPUNGE"), sp)), sequence_set),
            |set| Ok(Command::UidExpunge(set)),
        ),
        map(
            preceded(tuple((tag_no_case(b"SEARCH"), sp)), search_keys),
            |(charset, keys)| Ok(Command::Search { charset, keys }),
        ),
        map(
            preceded(
                tuple((tag_no_case(b"FETCH"), sp)),
                tuple((sequence_set, sp, fetch_attributes)),
            ),
            |(sequence_set, _, attributes)| Ok(Command::Fetch { sequence_set, attributes }),
        ),
        map(
            preceded(
                tuple((tag_no_case(b"STORE"), sp)),
                tuple((sequence_set, sp, store_args)),
            ),
            |(sequence_set, _, (action, silent, flags))| {
                Ok(Command::Store { sequence_set, action, silent, flags })
            },
        ),
        map(
            preceded(
                tuple((tag_no_case(b"COPY"), sp)),
                tuple((sequence_set, sp, mbox(delimiter))),
            ),
            |(sequence_set, _, mailbox)| mailbox.map(|mailbox| Command::Copy { sequence_set, mailbox }),
        ),
        map(
            preceded(
                tuple((tag_no_case(b"MOVE"), sp)),
                tuple((sequence_set, sp, mbox(delimiter))),
            ),
            |(sequence_set, _, mailbox)| mailbox.map(|mailbox| Command::Move { sequence_set, mailbox }),
        ),
    ))(input)
}

fn uid_command(delimiter: u8, input: &[u8]) -> IResult<&[u8], Result<Command, ImapError>> {
    preceded(
        tuple((tag_no_case(b"UID"), sp)),
        alt((
            map(
                preceded(
                    tuple((tag_no_case(b"COPY"), sp)),
                    tuple((sequence_set, sp, mbox(delimiter))),
                ),
                |(sequence_set, _, mailbox)| {
                    mailbox.map(|mailbox| Command::Uid(UidCommand::Copy { sequence_set, mailbox }))
                },
            ),
            map(
                preceded(
                    tuple((tag_no_case(b"MOVE"), sp)),
                    tuple((sequence_set, sp, mbox(delimiter))),
                ),
                |(sequence_set, _, mailbox)| {
                    mailbox.map(|mailbox| Command::Uid(UidCommand::Move { sequence_set, mailbox }))
                },
            ),
            map(
                preceded(
                    tuple((tag_no_case(b"FETCH"), sp)),
                    tuple((sequence_set, sp, fetch_attributes)),
                ),
                |(sequence_set, _, attributes)| {
                    Ok(Command::Uid(UidCommand::Fetch { sequence_set, attributes }))
                },
            ),
            map(
                preceded(
                    tuple((tag_no_case(b"STORE"), sp)),
                    tuple((sequence_set, sp, store_args)),
                ),
                |(sequence_set, _, (action, silent, flags))| {
                    Ok(Command::Uid(UidCommand::Store { sequence_set, action, silent, flags }))
                },
            ),
            map(
                preceded(tuple((tag_no_case(b"SEARCH"), sp)), search_keys),
                |(charset, keys)| Ok(Command::Uid(UidCommand::Search { charset, keys })),
            ),
        )),
    )(input)
}

/// Top-level entry: `tag SP command-body CRLF`. Tag recovery lives in
/// `crate::parser`, not here — this function only needs to hand the
/// verb alternation a delimiter and return the parsed `Command`.
pub fn command(delimiter: u8, input: &[u8]) -> IResult<&[u8], Result<Command, ImapError>> {
    command_body(delimiter, input)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_noop() {
        let (rem, cmd) = command(b'/', b"NOOP\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(cmd, Ok(Command::Noop));
    }

    #[test]
    fn folds_inbox_on_select() {
        let (rem, cmd) = command(b'/', b"SELECT inbox\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(cmd, Ok(Command::Select("INBOX".to_string())));
    }

    #[test]
    fn does_not_fold_inboxx_on_create() {
        let (rem, cmd) = command(b'/', b"CREATE inboxx\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(cmd, Ok(Command::Create("inboxx".to_string())));
    }

    #[test]
    fn login_with_literals_already_substituted() {
        let (rem, cmd) = command(b'/', b"LOGIN {5}\r\nSMITH {6}\r\nSESAME\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(
            cmd,
            Ok(Command::Login {
                username: "SMITH".to_string(),
                password: "SESAME".to_string(),
            })
        );
    }

    #[test]
    fn fetch_all_macro_expands() {
        let (rem, cmd) = command(b'/', b"FETCH 2:4 ALL\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        match cmd.unwrap() {
            Command::Fetch { attributes, .. } => {
                assert_eq!(
                    attributes,
                    vec![
                        imap_types::FetchAttribute::Flags,
                        imap_types::FetchAttribute::InternalDate,
                        imap_types::FetchAttribute::Rfc822Size,
                        imap_types::FetchAttribute::Envelope,
                    ]
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn store_prefix_and_silent() {
        let (rem, cmd) = command(b'/', b"STORE 1:2 +FLAGS.SILENT (\\Seen)\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        match cmd.unwrap() {
            Command::Store { action, silent, flags, .. } => {
                assert_eq!(action, StoreAction::Add);
                assert!(silent);
                assert_eq!(flags, vec!["\\Seen".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn id_nil_is_id_get() {
        let (rem, cmd) = command(b'/', b"ID NIL\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(cmd, Ok(Command::IdGet));
    }

    #[test]
    fn id_params_map_nil_value_to_empty_string() {
        let (rem, cmd) =
            command(b'/', br#"ID ("name" "imapclient" "version" NIL)"#).unwrap();
        assert!(rem.is_empty());
        assert_eq!(
            cmd,
            Ok(Command::IdSet(vec![
                ("name".to_string(), "imapclient".to_string()),
                ("version".to_string(), String::new()),
            ]))
        );
    }

    #[test]
    fn uid_wraps_fetch() {
        let (rem, cmd) = command(b'/', b"UID FETCH 1 FLAGS\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        match cmd.unwrap() {
            Command::Uid(UidCommand::Fetch { attributes, .. }) => {
                assert_eq!(attributes, vec![imap_types::FetchAttribute::Flags]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
