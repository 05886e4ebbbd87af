//! Guest support-chat flow against a live Orchard API server.
//!
//! Run with: `cargo test -p orchard-integration-tests -- --ignored`

#![allow(clippy::unwrap_used)]

use orchard_client::api::GuestMessage;
use orchard_client::error::ApiError;
use orchard_integration_tests::{test_client, unique_username};

#[tokio::test]
#[ignore = "Requires a running Orchard API server"]
async fn test_guest_can_write_and_read_back() {
    let client = test_client();
    let email = format!("{}@example.com", unique_username("guest"));

    let sent = client
        .send_guest_message(&GuestMessage {
            text: "Is the mug dishwasher safe?".to_owned(),
            guest_name: "Guest Tester".to_owned(),
            guest_email: email.clone(),
        })
        .await
        .unwrap();
    assert!(!sent.is_admin);

    let history = client.guest_messages(&email).await.unwrap();
    assert!(history.iter().any(|message| message.id == sent.id));
}

#[tokio::test]
#[ignore = "Requires a running Orchard API server"]
async fn test_invalid_guest_identity_never_reaches_the_server() {
    // Also passes without a server: validation fails before the request.
    let client = test_client();

    let error = client
        .send_guest_message(&GuestMessage {
            text: "hello".to_owned(),
            guest_name: String::new(),
            guest_email: "someone@example.com".to_owned(),
        })
        .await
        .expect_err("blank name must be rejected locally");
    assert!(matches!(error, ApiError::Validation(_)));

    let error = client
        .send_guest_message(&GuestMessage {
            text: "hello".to_owned(),
            guest_name: "Guest".to_owned(),
            guest_email: "someone@nodot".to_owned(),
        })
        .await
        .expect_err("dotless domain must be rejected locally");
    assert!(matches!(error, ApiError::Validation(_)));
}
