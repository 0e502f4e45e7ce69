//! IPv4 address / `u32` conversion in network byte order.

use crate::error::{Error, Result};
use std::net::Ipv4Addr;

/// Render a `u32` as dotted-quad text, most significant byte first.
///
/// `0x0102_0304` becomes `"1.2.3.4"`.
#[must_use]
pub fn u32_to_ipv4_string(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}

/// Parse dotted-quad text into its `u32` value, most significant byte first.
///
/// # Errors
/// - [`Error::MissingInput`] if `address` is empty.
/// - [`Error::Malformed`] if it is not an IPv4 address (IPv6 included).
pub fn ipv4_string_to_u32(address: &str) -> Result<u32> {
    if address.is_empty() {
        return Err(Error::missing("address"));
    }
    address
        .trim()
        .parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|e| Error::malformed("IPv4 address", format!("'{address}': {e}")))
}
