//! Server side of the registration flow.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use voyager_crypto::verify_personal_signature;
use voyager_types::{SignedRegistration, UserAddress};
use voyager_utils::Clock;

use crate::{Ledger, LedgerRow, RegistrationError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    pub message: String,
}

pub struct RegistrationService {
    ledger: Arc<dyn Ledger>,
    clock: Arc<dyn Clock>,
}

impl RegistrationService {
    pub fn new(ledger: Arc<dyn Ledger>, clock: Arc<dyn Clock>) -> Self {
        Self { ledger, clock }
    }

    /// Verify the signature over the serialized payload, then append a row.
    /// Nothing is written unless verification succeeds.
    pub async fn register(
        &self,
        request: SignedRegistration,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        let signature = request
            .signature
            .filter(|s| !s.is_empty())
            .ok_or(RegistrationError::MissingSignature)?;
        let payload = request.payload;

        let address = UserAddress::parse(&payload.address)
            .map_err(|e| RegistrationError::InvalidPayload(e.to_string()))?;
        let message = payload
            .message()
            .map_err(|e| RegistrationError::InvalidPayload(e.to_string()))?;

        match verify_personal_signature(message.as_bytes(), &signature, &address) {
            Ok(true) => {}
            Ok(false) => {
                warn!(address = %address, "signature from another signer");
                return Err(RegistrationError::InvalidSignature);
            }
            Err(e) => {
                warn!(address = %address, error = %e, "unusable signature");
                return Err(RegistrationError::InvalidSignature);
            }
        }

        let row = LedgerRow {
            timestamp: self.clock.now().to_rfc3339(),
            address: payload.address,
            signed_on: payload.signed_on.to_string(),
            subject: payload.subject,
            signature,
        };
        self.ledger.append_row(&row).await?;
        info!(address = %row.address, subject = %row.subject, "address registered");

        Ok(RegistrationReceipt {
            message: format!("Address {} registered", row.address),
        })
    }
}
