//! Typed errors for the four grammars, plus the single diagnostic
//! channel they all collapse into at the public boundary.

use thiserror::Error;

/// Records the first syntax error reported while parsing one input
/// and discards the rest, mirroring the ANTLR error-listener pattern
/// this crate's grammars were originally driven by.
#[derive(Debug, Default)]
pub struct ErrorListener {
    message: Option<String>,
}

impl ErrorListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, message: impl Into<String>) {
        if self.message.is_none() {
            let message = message.into();
            log::debug!("syntax error: {message}");
            self.message = Some(message);
        }
    }

    pub fn did_error(&self) -> bool {
        self.message.is_some()
    }

    pub fn into_message(self) -> Option<String> {
        self.message
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Rfc2047Error {
    #[error("invalid encoding value")]
    InvalidEncoding,
    #[error("invalid word")]
    InvalidWord,
    #[error("invalid hex byte")]
    InvalidHexByte,
    #[error("invalid or unsupported charset: {0}")]
    UnsupportedCharset(String),
    #[error("invalid multibyte chars")]
    InvalidMultibyte,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AddressListError {
    #[error("invalid port specification")]
    InvalidPort,
    #[error("{0}")]
    Syntax(String),
    #[error(transparent)]
    Rfc2047(#[from] Rfc2047Error),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DateTimeError {
    #[error("invalid month")]
    InvalidMonth,
    #[error("invalid time zone")]
    InvalidZone,
    #[error("{0}")]
    Syntax(String),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ImapError {
    #[error("invalid literal count")]
    InvalidLiteralCount,
    #[error("invalid port specification")]
    InvalidPort,
    #[error("too many ID parameters")]
    TooManyIdParameters,
    #[error("command exceeds maximum encodable size")]
    CommandTooLarge,
    #[error("{0}")]
    Syntax(String),
    #[error(transparent)]
    Rfc2047(#[from] Rfc2047Error),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum WireError {
    #[error("command exceeds maximum encodable size of {0} bytes")]
    TooLarge(usize),
}
