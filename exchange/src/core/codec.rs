//! Transaction token codec
//!
//! A pending transaction crosses from the entry page to the confirmation page
//! as percent-encoded JSON in the `data` query parameter. Nothing is kept on
//! a server between the two pages.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use shared::{DecodeError, PendingTransaction, SharedError, TOKEN_PARAM};
use crate::error::ExchangeResult;

/// Characters left as-is, matching the browser's `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode a transaction into a URL-safe token
pub fn encode(transaction: &PendingTransaction) -> ExchangeResult<String> {
    let json = serde_json::to_string(transaction).map_err(|e| SharedError::SerializationError {
        message: e.to_string(),
    })?;
    Ok(utf8_percent_encode(&json, COMPONENT).to_string())
}

/// Decode a token taken from the confirmation page's query
pub fn decode(token: Option<&str>) -> Result<PendingTransaction, DecodeError> {
    let token = match token.map(str::trim) {
        Some(token) if !token.is_empty() => token,
        _ => return Err(DecodeError::MissingToken),
    };

    let json = percent_decode_str(token)
        .decode_utf8()
        .map_err(|e| DecodeError::MalformedToken(format!("not UTF-8: {e}")))?;

    serde_json::from_str(&json).map_err(|e| DecodeError::MalformedToken(e.to_string()))
}

/// Confirmation page URL carrying the encoded transaction
pub fn confirm_url(transaction: &PendingTransaction) -> ExchangeResult<String> {
    let token = encode(transaction)?;
    Ok(format!("{}?{}={}", transaction.kind.confirm_path(), TOKEN_PARAM, token))
}

/// Raw token from a query string such as `?data=...&other=1`
///
/// The value is returned still percent-encoded; `decode` undoes that.
pub fn token_from_query(query: &str) -> Option<&str> {
    let prefix = format!("{TOKEN_PARAM}=");
    query
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix(prefix.as_str()))
}
