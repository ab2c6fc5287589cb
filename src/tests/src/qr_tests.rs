//! Tests for QR payloads and ticket file sources across crates.

use serde_json::json;
use std::convert::TryFrom;
use tokenization_cli::commands::qr as qr_command;
use tokenization_core::{
    is_platform_file_descriptor, qr, CitizenPayload, MerchantPayload, QrPayload, TicketFile,
    TokenizationError,
};

/// A merchant QR generated by one party decodes to the same request on the other side.
#[test]
fn test_merchant_payment_request_flow() {
    let request = MerchantPayload {
        wallet_address: "0x8ba1f109551bD432803012645Ac136ddd64DBA72".to_string(),
        amount: "25.75".to_string(),
        concept: "School supplies - term 2".to_string(),
    };

    let encoded = qr::encode_merchant(&request.wallet_address, &request.amount, &request.concept);
    assert!(encoded.starts_with("MERCHANT-{"));

    let decoded = qr::decode_merchant(&encoded).unwrap();
    assert_eq!(decoded, request);
    assert_eq!(QrPayload::Merchant(decoded).encode(), encoded);
}

/// Citizen QR codes carry the identifier verbatim.
#[test]
fn test_citizen_identification_flow() {
    let did = "did:ethr:0x8ba1f109551bD432803012645Ac136ddd64DBA72";
    let encoded = qr_command::citizen(did);

    assert_eq!(
        qr::decode(&encoded).unwrap(),
        QrPayload::Citizen(CitizenPayload {
            address: did.to_string()
        })
    );
    assert_eq!(
        qr::decode_merchant(&encoded),
        Err(TokenizationError::InvalidPrefix)
    );
}

/// Each decode failure has its own fixed message.
#[test]
fn test_decode_failures_are_deterministic() {
    let cases = [
        ("INVALID-{}", "Lib error: Invalid QR prefix"),
        ("MERCHANT-not-a-json", "Lib error: Invalid QR data format"),
        (
            r#"MERCHANT-{"walletAddress":"0x1","concept":"c"}"#,
            "Lib error: Missing fields in QR data",
        ),
    ];

    for (input, message) in cases.iter() {
        for _ in 0..2 {
            assert_eq!(qr::decode(input).unwrap_err().to_string(), *message);
        }
    }
}

/// File descriptors coming from a mobile client are classified once at the boundary.
#[test]
fn test_mobile_file_descriptor_classification() {
    let descriptor = json!({
        "uri": "file:///data/user/0/app/cache/ticket.jpg",
        "name": "ticket.jpg",
        "type": "image/jpeg",
    });
    assert!(is_platform_file_descriptor(&descriptor));

    match TicketFile::try_from(descriptor).unwrap() {
        TicketFile::Descriptor(file) => {
            assert_eq!(file.local_path(), "/data/user/0/app/cache/ticket.jpg");
        }
        other => panic!("expected a descriptor, got {:?}", other),
    }

    let partial = json!({ "uri": "file:///ticket.jpg", "name": "ticket.jpg" });
    assert!(!is_platform_file_descriptor(&partial));
    assert!(TicketFile::try_from(partial).is_err());
}
