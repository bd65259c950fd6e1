//! RFC 5322 §3.4 mailbox-list / address-list grammar.
//!
//! Groups are flattened into the output vector; the group name itself
//! never becomes an `Address`. Comments are stripped silently. This
//! additionally accepts the relaxations named in the crate's public
//! docs: `;` as an address separator, a trailing `:port` on
//! `addr-spec`, trailing `,`/whitespace inside `<...>`, empty `<>`,
//! and a group without its closing `;`.

use imap_types::Address;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::satisfy,
    combinator::{map, map_res, opt},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::{error::AddressListError, rfc2047, rfc5322::cfws::opt_cfws};

fn is_atext(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'/'
                | b'='
                | b'?'
                | b'^'
                | b'_'
                | b'`'
                | b'{'
                | b'|'
                | b'}'
                | b'~'
        )
        // Relaxation: accept raw non-ASCII bytes in atoms, so
        // unencoded international display names survive untouched.
        || b >= 0x80
}

fn is_word_char(b: u8) -> bool {
    is_atext(b) || b == b'.'
}

fn atext_run(input: &[u8]) -> IResult<&[u8], &str> {
    map_res(take_while1(is_atext), std::str::from_utf8)(input)
}

fn word_run(input: &[u8]) -> IResult<&[u8], &str> {
    map_res(take_while1(is_word_char), std::str::from_utf8)(input)
}

/// quoted-string, outer DQUOTE stripped; interior quoted-pairs are
/// kept verbatim (not unescaped), matching the grounding visitor.
fn quoted_string(input: &[u8]) -> IResult<&[u8], String> {
    let (rest, _) = tag(b"\"")(input)?;
    let mut out = String::new();
    let mut rest = rest;
    loop {
        if let Ok((r, _)) = tag::<_, _, nom::error::Error<&[u8]>>(b"\"")(rest) {
            return Ok((r, out));
        }
        if let Ok((r, (bs, c))) = tuple::<_, _, nom::error::Error<&[u8]>, _>((
            tag(b"\\"),
            satisfy(|c| (c as u32) < 0x80),
        ))(rest)
        {
            out.push(bs[0] as char);
            out.push(c);
            rest = r;
            continue;
        }
        match satisfy::<&[u8], nom::error::Error<&[u8]>>(|c| c != '"' && c != '\\')(rest) {
            Ok((r, c)) => {
                out.push(c);
                rest = r;
            }
            Err(_) => {
                return Err(nom::Err::Error(nom::error::Error::new(
                    rest,
                    nom::error::ErrorKind::Tag,
                )));
            }
        }
    }
}

/// One atomic piece of a display name, paired with the "space before"
/// flag used by the join rule (see the crate's top-level docs).
struct DisplayWord {
    text: String,
    space_before: bool,
}

fn display_word(input: &[u8]) -> IResult<&[u8], DisplayWord> {
    alt((
        map(quoted_string, |text| DisplayWord {
            text,
            space_before: true,
        }),
        map(word_run, |run| {
            if rfc2047::is_encoded(run.as_bytes()) {
                if let Ok(decoded) = rfc2047::decode(run.as_bytes()) {
                    return DisplayWord {
                        text: decoded,
                        space_before: false,
                    };
                }
            }
            DisplayWord {
                text: run.to_string(),
                space_before: true,
            }
        }),
    ))(input)
}

/// display-name = 1*word, joined per the space_before rule: insert
/// one space between consecutive words iff both have space_before.
fn display_name(input: &[u8]) -> IResult<&[u8], String> {
    let (rest, _) = opt_cfws(input)?;
    let (rest, words) = separated_list1(opt_cfws, display_word)(rest)?;
    let (rest, _) = opt_cfws(rest)?;

    let mut result = String::new();
    let mut prev_space_before = true;
    for (i, word) in words.iter().enumerate() {
        if i > 0 && word.space_before && prev_space_before {
            result.push(' ');
        }
        result.push_str(&word.text);
        prev_space_before = word.space_before;
    }

    Ok((rest, result))
}

/// local-part = dot-atom / quoted-string / obs-local-part, all
/// flattened into a single dot-joined string.
fn local_part(input: &[u8]) -> IResult<&[u8], String> {
    let (rest, parts) = separated_list1(
        tag(b"."),
        alt((quoted_string, map(atext_run, str::to_string))),
    )(input)?;
    Ok((rest, parts.join(".")))
}

fn domain_literal(input: &[u8]) -> IResult<&[u8], String> {
    map(
        delimited(tag(b"["), take_until("]"), tag(b"]")),
        |inner: &[u8]| format!("[{}]", String::from_utf8_lossy(inner)),
    )(input)
}

fn domain(input: &[u8]) -> IResult<&[u8], String> {
    alt((
        domain_literal,
        map(separated_list1(tag(b"."), atext_run), |parts| parts.join(".")),
    ))(input)
}

fn port(input: &[u8]) -> IResult<&[u8], &str> {
    preceded(
        tag(b":"),
        map_res(
            take_while1(|b| !matches!(b, b'>' | b',' | b';' | b' ' | b'\t' | b'\r' | b'\n')),
            std::str::from_utf8,
        ),
    )(input)
}

fn addr_spec(input: &[u8]) -> IResult<&[u8], Result<String, AddressListError>> {
    let (rest, (local, _, dom)) = tuple((local_part, tag(b"@"), domain))(input)?;
    let (rest, maybe_port) = opt(port)(rest)?;

    let result = match maybe_port {
        None => Ok(format!("{local}@{dom}")),
        Some(p) if p.bytes().all(|b| b.is_ascii_digit()) && !p.is_empty() => {
            Ok(format!("{local}@{dom}:{p}"))
        }
        Some(_) => Err(AddressListError::InvalidPort),
    };

    Ok((rest, result))
}

fn angle_addr(input: &[u8]) -> IResult<&[u8], Result<String, AddressListError>> {
    delimited(
        tag(b"<"),
        map(
            tuple((
                opt_cfws,
                opt(addr_spec),
                opt_cfws,
                opt(tag(b",")),
                opt_cfws,
            )),
            |(_, addr, _, _, _)| addr.unwrap_or(Ok(String::new())),
        ),
        tag(b">"),
    )(input)
}

fn name_addr(input: &[u8]) -> IResult<&[u8], (String, Result<String, AddressListError>)> {
    let (rest, name) = opt(display_name)(input)?;
    let (rest, _) = opt_cfws(rest)?;
    let (rest, addr) = angle_addr(rest)?;
    Ok((rest, (name.unwrap_or_default(), addr)))
}

fn mailbox(input: &[u8]) -> IResult<&[u8], Result<Address, AddressListError>> {
    let (rest, _) = opt_cfws(input)?;
    alt((
        map(name_addr, |(name, addr)| {
            addr.map(|address| Address::new(name, address))
        }),
        map(addr_spec, |addr| {
            addr.map(|address| Address::new("", address))
        }),
    ))(rest)
}

fn separator(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((tag(b","), tag(b";")))(input)
}

fn mailbox_list(input: &[u8]) -> IResult<&[u8], Vec<Result<Address, AddressListError>>> {
    let (rest, first) = mailbox(input)?;
    let (rest, _) = opt_cfws(rest)?;
    let (rest, more) = many0(preceded(tuple((separator, opt_cfws)), mailbox))(rest)?;
    let (rest, _) = opt_cfws(rest)?;

    let mut out = vec![first];
    out.extend(more);
    Ok((rest, out))
}

fn group(input: &[u8]) -> IResult<&[u8], Vec<Result<Address, AddressListError>>> {
    let (rest, _) = opt_cfws(input)?;
    let (rest, _name) = display_name(rest)?;
    let (rest, _) = tag(b":")(rest)?;
    let (rest, _) = opt_cfws(rest)?;
    let (rest, members) = opt(mailbox_list)(rest)?;
    let (rest, _) = opt_cfws(rest)?;
    let (rest, _) = opt(tag(b";"))(rest)?;

    Ok((rest, members.unwrap_or_default()))
}

fn address(input: &[u8]) -> IResult<&[u8], Vec<Result<Address, AddressListError>>> {
    alt((group, map(mailbox, |m| vec![m])))(input)
}

/// Parses a full address-list header value into an ordered list of
/// addresses, flattening group membership. Any grammar violation (or
/// an invalid `:port`) aborts the whole parse with the first error.
pub fn parse_address_list(input: &[u8]) -> Result<Vec<Address>, AddressListError> {
    let (rest, _) = opt_cfws(input).map_err(|_| AddressListError::Syntax("cfws".into()))?;

    let (rest, groups) = many1(preceded(opt(separator), address))(rest)
        .map_err(|e| AddressListError::Syntax(format!("{e:?}")))?;

    let (rest, _) = opt_cfws(rest).map_err(|_| AddressListError::Syntax("cfws".into()))?;
    let (rest, _) = many0(separator)(rest).map_err(|_| AddressListError::Syntax("trailer".into()))?;
    let (rest, _) = opt_cfws(rest).map_err(|_| AddressListError::Syntax("cfws".into()))?;

    if !rest.is_empty() {
        return Err(AddressListError::Syntax(format!(
            "unexpected trailing bytes: {:?}",
            String::from_utf8_lossy(rest)
        )));
    }

    let mut addresses = Vec::new();
    for group in groups {
        for addr in group {
            addresses.push(addr?);
        }
    }
    Ok(addresses)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_plain_mailbox() {
        let got = parse_address_list(b"user@domain.com").unwrap();
        assert_eq!(got, vec![Address::new("", "user@domain.com")]);
    }

    #[test]
    fn decodes_encoded_display_name() {
        let got =
            parse_address_list(b"=?UTF-8?B?PEJlemUgam3DqW5hPg==?= <user@domain.com>").unwrap();
        assert_eq!(got, vec![Address::new("<Beze jména>", "user@domain.com")]);
    }

    #[test]
    fn glued_encoded_word_stays_undecoded() {
        let got =
            parse_address_list(b"First Middle=?utf-8?Q?Last?= <user@domain.com>").unwrap();
        assert_eq!(
            got,
            vec![Address::new(
                "First Middle=?utf-8?Q?Last?=",
                "user@domain.com"
            )]
        );
    }

    #[test]
    fn flattens_group_members() {
        let got = parse_address_list(b"Team: a@x.com, b@x.com;").unwrap();
        assert_eq!(
            got,
            vec![Address::new("", "a@x.com"), Address::new("", "b@x.com")]
        );
    }

    #[test]
    fn accepts_port_suffix() {
        let got = parse_address_list(b"user@domain.com:143").unwrap();
        assert_eq!(got, vec![Address::new("", "user@domain.com:143")]);
    }

    #[test]
    fn empty_angle_addr() {
        let got = parse_address_list(br#""Mail Robot" <>"#).unwrap();
        assert_eq!(got, vec![Address::new("Mail Robot", "")]);
    }

    #[test]
    fn domain_literal_kept_verbatim() {
        let got = parse_address_list(b"user@[10.0.0.1]").unwrap();
        assert_eq!(got, vec![Address::new("", "user@[10.0.0.1]")]);
    }
}
