//! Adversarial coverage: arbitrary and truncated byte strings must
//! never panic, regardless of what they parse to. Mirrors the
//! robustness requirement that a malformed or truncated command
//! degrades to an error result rather than a crash.

use imap_parser::{parse, parse_address_list, parse_date_time};

fn corpus() -> Vec<Vec<u8>> {
    let mut inputs: Vec<Vec<u8>> = vec![
        Vec::new(),
        b"\r\n".to_vec(),
        b"a".to_vec(),
        b"a ".to_vec(),
        b"a NOOP".to_vec(),
        b"a NOOP\r".to_vec(),
        b"\x00\x01\x02\x03\x04\x05".to_vec(),
        b"a LOGIN {999999999999999999999}\r\n".to_vec(),
        b"a FETCH 1:* (BODY[".to_vec(),
        b"a ID (".to_vec(),
        vec![0xff; 64],
        b"=?".to_vec(),
        b"=?x?x?".to_vec(),
        b"<<<<<<<<<<<<<<<<<<<<".to_vec(),
        b"31 Feb 9999 99:99:99 ++++".to_vec(),
    ];

    // Every byte value on its own, and doubled, catches anything that
    // only misbehaves on a specific single- or two-byte sequence.
    for b in 0u8..=255 {
        inputs.push(vec![b]);
        inputs.push(vec![b, b]);
    }

    // A known-good command with one byte flipped at every offset.
    let base = b"a001 LOGIN foo bar\r\n".to_vec();
    for i in 0..base.len() {
        let mut mutated = base.clone();
        mutated[i] ^= 0xff;
        inputs.push(mutated);
    }

    inputs
}

#[test]
fn imap_parser_never_panics_on_arbitrary_bytes() {
    for input in corpus() {
        let _ = parse(&input, b'/');
    }
}

#[test]
fn address_list_parser_never_panics_on_arbitrary_bytes() {
    for input in corpus() {
        let _ = parse_address_list(&input);
    }
}

#[test]
fn date_time_parser_never_panics_on_arbitrary_bytes() {
    for input in corpus() {
        let _ = parse_date_time(&input);
    }
}
