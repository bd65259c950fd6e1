//! The `{N}CRLF<N bytes>` literal-continuation hook (§4.1 "Literal
//! protocol"). The grammar never blocks on I/O here: the caller has
//! already assembled the full command line, literal bytes inlined,
//! before calling `parse()`. The hook still exists as a trait so a
//! caller with a different buffering strategy can override how `N`
//! bytes are pulled out of the remaining input.

use crate::error::ImapError;

pub trait LiteralHook {
    /// Advance past `n` bytes starting at the current cursor and
    /// return them. `n` arrives signed because the wire value is
    /// taken straight off the `{N}` count before range-checking.
    fn take<'a>(&mut self, remaining: &'a [u8], n: i64) -> Result<(&'a [u8], Vec<u8>), ImapError>;
}

#[derive(Debug, Default)]
pub struct DefaultLiteralHook;

impl LiteralHook for DefaultLiteralHook {
    fn take<'a>(&mut self, remaining: &'a [u8], n: i64) -> Result<(&'a [u8], Vec<u8>), ImapError> {
        if n <= 0 {
            return Err(ImapError::InvalidLiteralCount);
        }

        let n = n as usize;
        if n >= remaining.len() {
            log::debug!("literal count {n} exceeds remaining {} bytes, truncating", remaining.len());
            Ok((&remaining[remaining.len()..], Vec::new()))
        } else {
            Ok((&remaining[n..], remaining[..n].to_vec()))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_non_positive_count() {
        let mut hook = DefaultLiteralHook;
        assert_eq!(
            hook.take(b"hello", 0),
            Err(ImapError::InvalidLiteralCount)
        );
        assert_eq!(
            hook.take(b"hello", -1),
            Err(ImapError::InvalidLiteralCount)
        );
    }

    #[test]
    fn truncates_when_count_exceeds_remaining() {
        let mut hook = DefaultLiteralHook;
        let (rest, data) = hook.take(b"hi", 10).unwrap();
        assert!(rest.is_empty());
        assert!(data.is_empty());
    }

    #[test]
    fn takes_exact_count() {
        let mut hook = DefaultLiteralHook;
        let (rest, data) = hook.take(b"hello world", 5).unwrap();
        assert_eq!(rest, b" world");
        assert_eq!(data, b"hello");
    }
}
