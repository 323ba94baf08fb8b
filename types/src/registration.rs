//! Wallet-signed registration payload.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// When the payload was signed, as the client wrote it.
///
/// Browsers send `Date.now()` (a JSON number); other clients send a date
/// string. The value is kept verbatim so the signed message re-serializes to
/// the same bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignedOn {
    Millis(serde_json::Number),
    Text(String),
}

impl fmt::Display for SignedOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for SignedOn {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<u64> for SignedOn {
    fn from(millis: u64) -> Self {
        Self::Millis(millis.into())
    }
}

/// What the user signs to register their address.
///
/// The signed message is the compact JSON serialization of this struct, with
/// keys in declaration order (`address`, `signedOn`, `subject`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub address: String,
    pub signed_on: SignedOn,
    pub subject: String,
}

impl RegistrationPayload {
    /// The exact bytes that were signed.
    pub fn message(&self) -> Result<String, TypesError> {
        serde_json::to_string(self).map_err(|e| TypesError::Serialization(e.to_string()))
    }
}

/// A payload plus its detached signature, as posted by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRegistration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    pub payload: RegistrationPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_compact_json_in_field_order() {
        let payload = RegistrationPayload {
            address: "0xabc".into(),
            signed_on: "2024-05-01T10:00:00.000Z".into(),
            subject: "Linea Voyager registration".into(),
        };
        assert_eq!(
            payload.message().unwrap(),
            r#"{"address":"0xabc","signedOn":"2024-05-01T10:00:00.000Z","subject":"Linea Voyager registration"}"#
        );
    }

    #[test]
    fn numeric_signed_on_stays_a_number() {
        let body = r#"{"address":"0xabc","signedOn":1721033912000,"subject":"s"}"#;
        let payload: RegistrationPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.signed_on, SignedOn::from(1_721_033_912_000u64));
        assert_eq!(payload.signed_on.to_string(), "1721033912000");
        assert_eq!(payload.message().unwrap(), body);
    }

    #[test]
    fn missing_signature_deserializes_as_none() {
        let body = r#"{"payload":{"address":"0xabc","signedOn":"now","subject":"s"}}"#;
        let signed: SignedRegistration = serde_json::from_str(body).unwrap();
        assert!(signed.signature.is_none());
    }
}
