//! Charset transcoding for RFC 2047 encoded words.
//!
//! Approximates `iconv("UTF-8//TRANSLIT//IGNORE", charset)`: bytes that
//! don't decode cleanly under the named charset become U+FFFD, which we
//! then strip rather than emit, since IGNORE means "drop what can't be
//! represented" rather than "keep the replacement marker".

use encoding_rs::Encoding;

use crate::error::Rfc2047Error;

pub fn transcode_to_utf8(charset: &str, bytes: &[u8]) -> Result<String, Rfc2047Error> {
    let encoding = Encoding::for_label(charset.as_bytes())
        .ok_or_else(|| Rfc2047Error::UnsupportedCharset(charset.to_string()))?;

    let (decoded, _, had_errors) = encoding.decode(bytes);

    if !had_errors {
        return Ok(decoded.into_owned());
    }

    // TRANSLIT+IGNORE: silently drop characters iconv couldn't represent.
    Ok(decoded.chars().filter(|&c| c != '\u{FFFD}').collect())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ascii_roundtrip() {
        assert_eq!(transcode_to_utf8("us-ascii", b"hello").unwrap(), "hello");
    }

    #[test]
    fn utf8_passthrough() {
        assert_eq!(
            transcode_to_utf8("utf-8", "Hořejšek".as_bytes()).unwrap(),
            "Hořejšek"
        );
    }

    #[test]
    fn unknown_charset_errors() {
        assert_eq!(
            transcode_to_utf8("not-a-real-charset", b"x"),
            Err(Rfc2047Error::UnsupportedCharset("not-a-real-charset".into()))
        );
    }
}
