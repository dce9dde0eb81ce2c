//! Outbound links: emergency dial, trusted-contact SMS and map pins.

use crate::capability::Coordinates;
use crate::error::{Error, Result};
use crate::settings::Settings;

/// Fixed emergency dial target.
pub const EMERGENCY_DIAL: &str = "tel:911";

/// Name used in the SMS body when no contact name is saved.
pub const FALLBACK_CONTACT_NAME: &str = "Trusted contact";

/// The prefilled message sent to the trusted contact.
#[must_use]
pub fn trusted_contact_message(contact_name: &str, scenario_title: &str) -> String {
    let name = if contact_name.is_empty() {
        FALLBACK_CONTACT_NAME
    } else {
        contact_name
    };
    format!(
        "Hi {name}, I may need help. I am in \"{scenario_title}\" mode in ProtectCard. Please check in with me."
    )
}

/// Build the `sms:` link for the "Text contact" button.
///
/// Whitespace is stripped from the saved phone number. Without a number the
/// link carries only the body, so the messaging app asks for a recipient.
#[must_use]
pub fn sms_link(settings: &Settings, scenario_title: &str) -> String {
    let phone: String = settings
        .contact_phone
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let body = encode_uri_component(&trusted_contact_message(
        &settings.contact_name,
        scenario_title,
    ));

    if phone.is_empty() {
        format!("sms:?body={body}")
    } else {
        format!("sms:{}?body={body}", encode_uri_component(&phone))
    }
}

/// A map link pinned at the given coordinates.
#[must_use]
pub fn map_link(coords: Coordinates) -> String {
    format!(
        "https://maps.google.com/?q={},{}",
        coords.latitude, coords.longitude
    )
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')'
        )
}

/// Percent-encode a URI component the way browsers' `encodeURIComponent` does.
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        if is_unreserved(byte) {
            out.push(char::from(byte));
        } else {
            out.push('%');
            out.push(char::from(HEX[usize::from(byte >> 4)]));
            out.push(char::from(HEX[usize::from(byte & 0x0F)]));
        }
    }
    out
}

/// Inverse of [`encode_uri_component`].
///
/// # Errors
///
/// Returns [`Error::UriMalformed`] on a truncated or non-hex escape, or if
/// the decoded bytes are not UTF-8.
pub fn decode_uri_component(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|pair| std::str::from_utf8(pair).ok())
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| Error::UriMalformed(input.to_string()))?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).map_err(|_| Error::UriMalformed(input.to_string()))
}
