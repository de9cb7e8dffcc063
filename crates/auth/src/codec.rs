//! Unverified decoding of a bearer token's payload.
//!
//! Tokens are three `.`-separated segments; only the middle one is read. It is
//! base64url-encoded JSON. No signature is checked.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::{Map, Value};

use crate::{Claims, Role};

/// base64url that accepts both padded and unpadded input.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a token's claims.
///
/// Total: any malformed input (wrong segment count, bad base64, non-JSON,
/// non-object payload) yields `Claims::default()`. Individual fields of the
/// wrong type or with unknown values are dropped rather than failing the
/// whole decode.
pub fn decode(token: &str) -> Claims {
    match payload(token) {
        Some(map) => claims_from_payload(&map),
        None => {
            tracing::debug!("token payload could not be decoded; using empty claims");
            Claims::default()
        }
    }
}

fn payload(token: &str) -> Option<Map<String, Value>> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(body), Some(_signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return None;
    };

    let bytes = PAYLOAD_ENGINE.decode(body).ok()?;
    match serde_json::from_slice::<Value>(&bytes).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn claims_from_payload(map: &Map<String, Value>) -> Claims {
    Claims {
        sub: map.get("sub").and_then(Value::as_str).map(str::to_string),
        role: map
            .get("role")
            .and_then(Value::as_str)
            .and_then(|r| r.parse::<Role>().ok()),
        iat: map.get("iat").and_then(timestamp),
        exp: map.get("exp").and_then(timestamp),
    }
}

fn timestamp(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}
