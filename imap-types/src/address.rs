#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single RFC 5322 mailbox, lifted out of an address-list or group.
///
/// `address` is `local@domain`, optionally followed by `:port` (a
/// relaxation over RFC 5322 addr-spec, see the crate's address-list
/// module docs). Either half may be empty, e.g. `"Mail Robot" <>`
/// yields `address == ""`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Address {
    pub display_name: String,
    pub address: String,
}

impl Address {
    pub fn new(display_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            address: address.into(),
        }
    }
}
