//! C ABI surface for the three public parsers (§6): the IMAP command
//! parser, the address-list parser, and the date-time parser.
//! Mirrors the original `IMAPParser_new/_free/_parse/_get*` contract:
//! an opaque boxed handle, returned pointers valid until the next
//! call to `parse` on the same handle or until `free`.

use std::ffi::{c_char, c_int, CString};
use std::ptr;

use imap_types::Timezone;

use crate::{parser, rfc5322};

// ---------------------------------------------------------------
// IMAP command parser
// ---------------------------------------------------------------

#[derive(Debug)]
pub struct ImapParserHandle {
    tag: Option<CString>,
    error: Option<CString>,
    command: Vec<u8>,
}

impl Default for ImapParserHandle {
    fn default() -> Self {
        Self {
            tag: None,
            error: None,
            command: Vec::new(),
        }
    }
}

#[no_mangle]
pub extern "C" fn IMAPParser_new() -> *mut ImapParserHandle {
    Box::into_raw(Box::new(ImapParserHandle::default()))
}

/// # Safety
/// `handle` must be a pointer returned by `IMAPParser_new` and not
/// already freed.
#[no_mangle]
pub unsafe extern "C" fn IMAPParser_free(handle: *mut ImapParserHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// # Safety
/// `handle` must be live; `input` must point to `input_len` readable
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn IMAPParser_parse(
    handle: *mut ImapParserHandle,
    input: *const u8,
    input_len: usize,
    delimiter: c_char,
) -> c_int {
    if handle.is_null() || (input.is_null() && input_len > 0) {
        return -1;
    }
    let handle = &mut *handle;
    let bytes = if input_len == 0 {
        &[][..]
    } else {
        std::slice::from_raw_parts(input, input_len)
    };
    let result = parser::parse(bytes, delimiter as u8);

    handle.tag = CString::new(result.tag).ok();
    if result.error.is_empty() {
        handle.command = result.command;
        handle.error = None;
        0
    } else {
        handle.command = Vec::new();
        handle.error = CString::new(result.error).ok();
        -1
    }
}

/// # Safety
/// `handle` must be live.
#[no_mangle]
pub unsafe extern "C" fn IMAPParser_getTag(handle: *const ImapParserHandle) -> *const c_char {
    if handle.is_null() {
        return ptr::null();
    }
    (*handle).tag.as_ref().map_or(ptr::null(), |s| s.as_ptr())
}

/// # Safety
/// `handle` must be live.
#[no_mangle]
pub unsafe extern "C" fn IMAPParser_getError(handle: *const ImapParserHandle) -> *const c_char {
    if handle.is_null() {
        return ptr::null();
    }
    (*handle).error.as_ref().map_or(ptr::null(), |s| s.as_ptr())
}

/// # Safety
/// `handle` must be live.
#[no_mangle]
pub unsafe extern "C" fn IMAPParser_getCommandData(handle: *const ImapParserHandle) -> *const u8 {
    if handle.is_null() {
        return ptr::null();
    }
    let h = &*handle;
    if h.error.is_some() || h.command.is_empty() {
        ptr::null()
    } else {
        h.command.as_ptr()
    }
}

/// # Safety
/// `handle` must be live.
#[no_mangle]
pub unsafe extern "C" fn IMAPParser_getCommandSize(handle: *const ImapParserHandle) -> c_int {
    if handle.is_null() {
        return 0;
    }
    let h = &*handle;
    if h.error.is_some() {
        0
    } else {
        h.command.len() as c_int
    }
}

// ---------------------------------------------------------------
// Address-list parser
// ---------------------------------------------------------------

#[derive(Debug)]
pub struct AddressListHandle {
    error: Option<CString>,
    addresses: Vec<(CString, CString)>,
}

impl Default for AddressListHandle {
    fn default() -> Self {
        Self {
            error: None,
            addresses: Vec::new(),
        }
    }
}

#[no_mangle]
pub extern "C" fn AddressListParser_new() -> *mut AddressListHandle {
    Box::into_raw(Box::new(AddressListHandle::default()))
}

/// # Safety
/// `handle` must be a pointer returned by `AddressListParser_new` and
/// not already freed.
#[no_mangle]
pub unsafe extern "C" fn AddressListParser_free(handle: *mut AddressListHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Returns the parsed address count, or -1 on error.
///
/// # Safety
/// `handle` must be live; `input` must point to `input_len` readable
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn AddressListParser_parse(
    handle: *mut AddressListHandle,
    input: *const u8,
    input_len: usize,
) -> c_int {
    if handle.is_null() || (input.is_null() && input_len > 0) {
        return -1;
    }
    let handle = &mut *handle;
    let bytes = if input_len == 0 {
        &[][..]
    } else {
        std::slice::from_raw_parts(input, input_len)
    };

    match rfc5322::parse_address_list(bytes) {
        Ok(addresses) => {
            handle.error = None;
            handle.addresses = addresses
                .into_iter()
                .filter_map(|a| {
                    let name = CString::new(a.display_name).ok()?;
                    let addr = CString::new(a.address).ok()?;
                    Some((name, addr))
                })
                .collect();
            handle.addresses.len() as c_int
        }
        Err(e) => {
            handle.addresses = Vec::new();
            handle.error = CString::new(e.to_string()).ok();
            -1
        }
    }
}

/// # Safety
/// `handle` must be live.
#[no_mangle]
pub unsafe extern "C" fn AddressListParser_errorStr(handle: *const AddressListHandle) -> *const c_char {
    if handle.is_null() {
        return ptr::null();
    }
    (*handle).error.as_ref().map_or(ptr::null(), |s| s.as_ptr())
}

/// Writes the display-name/address pair at `index` into `*name_out`
/// and `*addr_out`. Out-of-range indices write a pair of null
/// pointers to both outputs.
///
/// # Safety
/// `handle` must be live; `name_out`/`addr_out` must be valid,
/// writable `*const c_char` slots.
#[no_mangle]
pub unsafe extern "C" fn AddressListParser_get(
    handle: *const AddressListHandle,
    index: usize,
    name_out: *mut *const c_char,
    addr_out: *mut *const c_char,
) {
    if handle.is_null() || name_out.is_null() || addr_out.is_null() {
        return;
    }
    match (*handle).addresses.get(index) {
        Some((name, addr)) => {
            *name_out = name.as_ptr();
            *addr_out = addr.as_ptr();
        }
        None => {
            *name_out = ptr::null();
            *addr_out = ptr::null();
        }
    }
}

// ---------------------------------------------------------------
// Date-time parser
// ---------------------------------------------------------------

#[repr(C)]
#[derive(Debug)]
pub struct DateTimeOut {
    pub day: u8,
    pub month: u8,
    pub year: u16,
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
    /// 0 = numeric offset (see `tz_value`'s bit layout), 1 = named code.
    pub tz_kind: c_int,
    pub tz_value: u32,
}

/// # Safety
/// `out` must point to a valid, writable `DateTimeOut`; `input` must
/// point to `input_len` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn DateTimeParser_parse(
    out: *mut DateTimeOut,
    input: *const u8,
    input_len: usize,
) -> c_int {
    if out.is_null() || (input.is_null() && input_len > 0) {
        return -1;
    }
    let bytes = if input_len == 0 {
        &[][..]
    } else {
        std::slice::from_raw_parts(input, input_len)
    };

    match rfc5322::parse_date_time(bytes) {
        Ok(dt) => {
            let (tz_kind, tz_value) = match dt.tz {
                Timezone::Offset { positive, hour, min } => {
                    (0, Timezone::encode_offset(positive, hour, min))
                }
                Timezone::Code(code) => (1, code as u32),
            };
            *out = DateTimeOut {
                day: dt.day,
                month: dt.month,
                year: dt.year,
                hour: dt.hour,
                min: dt.min,
                sec: dt.sec,
                tz_kind,
                tz_value,
            };
            0
        }
        Err(_) => -1,
    }
}
