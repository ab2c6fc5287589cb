//! QR code payloads for citizens and merchants.
//!
//! A QR string is `<PREFIX><SEPARATOR><payload>`. Citizen payloads are the raw
//! identifier; merchant payloads are a JSON object.

use crate::errors::{Result, TokenizationError};
use crate::types::{CitizenPayload, MerchantPayload, QrPayload};
use serde::Deserialize;
use tracing::debug;

/// Prefix of citizen QR codes.
pub const CITIZEN_PREFIX: &str = "CITIZEN";

/// Prefix of merchant QR codes.
pub const MERCHANT_PREFIX: &str = "MERCHANT";

/// Separator between the prefix and the payload.
pub const QR_SEPARATOR: char = '-';

/// Generates a QR string for a citizen DID or address.
pub fn encode_citizen(identifier: &str) -> String {
    format!("{}{}{}", CITIZEN_PREFIX, QR_SEPARATOR, identifier)
}

/// Generates a QR string for a merchant payment request.
pub fn encode_merchant(wallet_address: &str, amount: &str, concept: &str) -> String {
    encode_merchant_payload(&MerchantPayload {
        wallet_address: wallet_address.to_string(),
        amount: amount.to_string(),
        concept: concept.to_string(),
    })
}

fn encode_merchant_payload(payload: &MerchantPayload) -> String {
    // A struct of three strings always serializes.
    let data = serde_json::to_string(payload).unwrap_or_default();
    format!("{}{}{}", MERCHANT_PREFIX, QR_SEPARATOR, data)
}

impl QrPayload {
    /// Encodes the payload back into its QR string.
    pub fn encode(&self) -> String {
        match self {
            QrPayload::Citizen(citizen) => encode_citizen(&citizen.address),
            QrPayload::Merchant(merchant) => encode_merchant_payload(merchant),
        }
    }
}

/// Merchant fields as found in the QR, before the presence check.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMerchantFields {
    #[serde(default)]
    wallet_address: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    concept: Option<String>,
}

fn required(field: Option<String>) -> Result<String> {
    field
        .filter(|value| !value.is_empty())
        .ok_or(TokenizationError::MissingFields)
}

fn parse_merchant(data: &str) -> Result<MerchantPayload> {
    let raw: RawMerchantFields = serde_json::from_str(data).map_err(|e| {
        debug!("Merchant QR payload is not valid JSON: {}", e);
        TokenizationError::InvalidFormat
    })?;

    Ok(MerchantPayload {
        wallet_address: required(raw.wallet_address)?,
        amount: required(raw.amount)?,
        concept: required(raw.concept)?,
    })
}

/// Parses a scanned QR string into a citizen or merchant payload.
///
/// Only the first separator splits the string, so the payload may contain
/// the separator itself. A string without separator has an empty payload.
pub fn decode(qr: &str) -> Result<QrPayload> {
    let (prefix, data) = qr.split_once(QR_SEPARATOR).unwrap_or((qr, ""));

    match prefix {
        MERCHANT_PREFIX => parse_merchant(data).map(QrPayload::Merchant),
        CITIZEN_PREFIX => Ok(QrPayload::Citizen(CitizenPayload {
            address: data.to_string(),
        })),
        _ => Err(TokenizationError::InvalidPrefix),
    }
}

/// Parses a QR string that must be a merchant payment request.
pub fn decode_merchant(qr: &str) -> Result<MerchantPayload> {
    match decode(qr)? {
        QrPayload::Merchant(merchant) => Ok(merchant),
        QrPayload::Citizen(_) => Err(TokenizationError::InvalidPrefix),
    }
}
