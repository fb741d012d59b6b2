//! End-to-end token lifecycle through the public codec API.

use secrecy::SecretString;

use directory_service::config::TokenConfig;
use directory_service::models::{AuthClaims, Permission};
use directory_service::services::access::is_granted;
use directory_service::services::TokenCodec;

fn codec() -> TokenCodec {
    TokenCodec::new(&TokenConfig {
        secret: SecretString::new("integration-test-secret".to_string()),
    })
}

fn claims() -> AuthClaims {
    AuthClaims {
        id: "U1".to_string(),
        organization: "ORG1".to_string(),
        is_superuser: false,
        is_org_admin: false,
        permissions: vec![Permission::new("CanReadUser")],
        expiry: 0,
    }
}

#[test]
fn issued_token_decodes_to_the_same_identity() {
    let codec = codec();

    let token = codec.encode(&claims()).unwrap();
    let decoded = codec.decode(&format!("JWT {token}")).unwrap();

    assert_eq!(decoded.id, "U1");
    assert_eq!(decoded.organization, "ORG1");
    assert!(!decoded.is_superuser);
}

#[test]
fn decoded_claims_drive_access_checks() {
    let codec = codec();

    let token = codec.encode(&claims()).unwrap();
    let decoded = codec.decode(&format!("JWT {token}")).unwrap();

    assert!(is_granted("CanReadUser", &decoded));
    assert!(!is_granted("CanDeleteUser", &decoded));
}

#[test]
fn tampered_token_never_decodes() {
    let codec = codec();
    let token = codec.encode(&claims()).unwrap();

    // Flip each payload byte position in turn; every variant must fail
    // the signature check.
    let segments: Vec<&str> = token.split('.').collect();
    let payload = segments[1].as_bytes();
    for i in 0..payload.len() {
        let mut bytes = payload.to_vec();
        bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
        let tampered = format!(
            "JWT {}.{}.{}",
            segments[0],
            String::from_utf8(bytes).unwrap(),
            segments[2]
        );
        assert!(codec.decode(&tampered).is_err(), "byte {i} accepted");
    }
}
