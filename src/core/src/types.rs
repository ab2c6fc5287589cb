//! Data model of the benefits token program.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a party as reported by the token contract's permission query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleCode {
    /// No role granted
    None = 0,
    /// Benefit recipient
    Citizen = 1,
    /// Accepting merchant
    Merchant = 2,
}

impl RoleCode {
    /// Maps an on-chain role code. Unrecognized codes map to `None`.
    pub fn from_code(code: u64) -> Self {
        match code {
            1 => RoleCode::Citizen,
            2 => RoleCode::Merchant,
            _ => RoleCode::None,
        }
    }

    /// Returns the on-chain role code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the label of the role.
    pub fn label(self) -> &'static str {
        match self {
            RoleCode::None => "NONE",
            RoleCode::Citizen => "CITIZEN",
            RoleCode::Merchant => "MERCHANT",
        }
    }
}

impl fmt::Display for RoleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Benefit (aid) category attached to a citizen.
///
/// On chain the category is stored as a single raw byte (`0x00`, `0x01`,
/// `0x02`). The backend identifies the same categories by their numeric code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BenefitCode {
    /// No benefit
    None = 0,
    /// Stationery aid
    Stationery = 1,
    /// Grocery aid
    Grocery = 2,
}

impl BenefitCode {
    /// Maps a numeric code. Unrecognized codes map to `None`.
    pub fn from_code(code: u64) -> Self {
        match code {
            1 => BenefitCode::Stationery,
            2 => BenefitCode::Grocery,
            _ => BenefitCode::None,
        }
    }

    /// Maps the raw attached data stored on chain.
    ///
    /// Only the exact single-byte encodings are recognized; anything else,
    /// including empty data, is `None`.
    pub fn from_attached_data(data: &[u8]) -> Self {
        match data {
            [0x01] => BenefitCode::Stationery,
            [0x02] => BenefitCode::Grocery,
            _ => BenefitCode::None,
        }
    }

    /// Returns the numeric code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the hexadecimal on-chain encoding, e.g. `0x01`.
    pub fn as_hex(self) -> String {
        format!("0x{:02x}", self.code())
    }

    /// Returns the label of the benefit.
    pub fn label(self) -> &'static str {
        match self {
            BenefitCode::None => "NONE",
            BenefitCode::Stationery => "STATIONERY",
            BenefitCode::Grocery => "GROCERY",
        }
    }
}

impl fmt::Display for BenefitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payload of a citizen QR code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenPayload {
    /// DID or wallet address of the citizen
    pub address: String,
}

/// Payload of a merchant payment-request QR code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantPayload {
    /// Wallet address the payment goes to
    pub wallet_address: String,
    /// Requested amount, as a decimal string
    pub amount: String,
    /// Payment concept
    pub concept: String,
}

/// A decoded QR code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QrPayload {
    /// Citizen identification
    Citizen(CitizenPayload),
    /// Merchant payment request
    Merchant(MerchantPayload),
}

/// A product line the backend recognized on a ticket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AidProduct {
    /// Product name as printed on the ticket
    pub product_name: String,
    /// Total price of the line
    pub product_total_price: String,
}

/// Result of processing a ticket image on the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketProcessingResult {
    /// Total amount to pay
    pub payment_amount: String,
    /// Portion covered by the aid
    pub aid_amount: String,
    /// Products covered by the aid
    pub aid_products: Vec<AidProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_code_mapping() {
        assert_eq!(RoleCode::from_code(0), RoleCode::None);
        assert_eq!(RoleCode::from_code(1), RoleCode::Citizen);
        assert_eq!(RoleCode::from_code(2), RoleCode::Merchant);
        assert_eq!(RoleCode::from_code(7), RoleCode::None);
        assert_eq!(RoleCode::Merchant.code(), 2);
        assert_eq!(RoleCode::Citizen.to_string(), "CITIZEN");
    }

    #[test]
    fn test_benefit_from_attached_data() {
        assert_eq!(BenefitCode::from_attached_data(&[0x00]), BenefitCode::None);
        assert_eq!(BenefitCode::from_attached_data(&[0x01]), BenefitCode::Stationery);
        assert_eq!(BenefitCode::from_attached_data(&[0x02]), BenefitCode::Grocery);
        assert_eq!(BenefitCode::from_attached_data(&[]), BenefitCode::None);
        assert_eq!(BenefitCode::from_attached_data(&[0x01, 0x02]), BenefitCode::None);
        assert_eq!(BenefitCode::from_attached_data(b"2"), BenefitCode::None);
    }

    #[test]
    fn test_benefit_encodings() {
        assert_eq!(BenefitCode::Grocery.as_hex(), "0x02");
        assert_eq!(BenefitCode::Stationery.code(), 1);
        assert_eq!(BenefitCode::from_code(2), BenefitCode::Grocery);
        assert_eq!(BenefitCode::from_code(9), BenefitCode::None);
        assert_eq!(
            serde_json::to_string(&BenefitCode::Stationery).unwrap(),
            "\"STATIONERY\""
        );
    }

    #[test]
    fn test_ticket_result_deserialization() {
        let json = r#"{
            "payment_amount": "12.50",
            "aid_amount": "4.00",
            "aid_products": [
                {"product_name": "Notebook", "product_total_price": "4.00"}
            ]
        }"#;
        let result: TicketProcessingResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.payment_amount, "12.50");
        assert_eq!(result.aid_products.len(), 1);
        assert_eq!(result.aid_products[0].product_name, "Notebook");
    }
}
