//! QR commands for the tokenization CLI.

use tokenization_core::{qr, QrPayload, Result};
use tracing::debug;

/// Generates a citizen QR string.
pub fn citizen(identifier: &str) -> String {
    qr::encode_citizen(identifier)
}

/// Generates a merchant payment-request QR string.
pub fn merchant(wallet_address: &str, amount: &str, concept: &str) -> String {
    qr::encode_merchant(wallet_address, amount, concept)
}

/// Decodes a scanned QR string into a printable description.
pub fn decode(input: &str) -> Result<String> {
    let payload = qr::decode(input)?;
    debug!("Decoded QR payload: {:?}", payload);

    Ok(match payload {
        QrPayload::Citizen(citizen) => format!("citizen {}", citizen.address),
        QrPayload::Merchant(merchant) => format!(
            "merchant {} requests {} for \"{}\"",
            merchant.wallet_address, merchant.amount, merchant.concept
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenization_core::TokenizationError;

    #[test]
    fn test_decode_citizen() {
        let qr = citizen("did:example:123456");
        assert_eq!(decode(&qr).unwrap(), "citizen did:example:123456");
    }

    #[test]
    fn test_decode_merchant() {
        let qr = merchant("0xAB000", "12.5", "Groceries");
        assert_eq!(
            decode(&qr).unwrap(),
            "merchant 0xAB000 requests 12.5 for \"Groceries\""
        );
    }

    #[test]
    fn test_decode_invalid() {
        assert_eq!(decode("SHOP-1"), Err(TokenizationError::InvalidPrefix));
    }
}
