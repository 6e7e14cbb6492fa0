// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unverified JWT claim inspection (display only).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{Map, Value};

/// Decode the payload segment of a three-part JWT into its claims object.
///
/// The signature is not checked. Returns `None` for anything that is not
/// `header.payload.signature` with a base64url JSON object payload.
pub fn decode_claims(token: &str) -> Option<Map<String, Value>> {
    let mut parts = token.split('.');
    let (_header, payload, _sig) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    match serde_json::from_slice(&bytes).ok()? {
        Value::Object(claims) => Some(claims),
        _ => None,
    }
}

/// Expiry of `token` in epoch milliseconds, from its numeric `exp` claim.
pub fn token_expiration_ms(token: &str) -> Option<u64> {
    let exp = decode_claims(token)?.get("exp")?.as_f64()?;
    if exp < 0.0 {
        return None;
    }
    Some((exp * 1000.0) as u64)
}

#[cfg(test)]
#[path = "jwt_tests.rs"]
mod tests;
