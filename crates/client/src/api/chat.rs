//! Support-chat endpoints.
//!
//! Guests can write without an account; they identify themselves with a
//! name and email, which are validated locally before anything goes over
//! the wire.

use serde::Serialize;

use orchard_core::{Conversation, ConversationId, Email, Message};

use super::ApiClient;
use crate::error::ApiError;

/// Body of `POST /chat/message` (authenticated sender).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub text: String,
    /// Omitted when starting a new conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<ConversationId>,
    /// Set when an admin replies from the inbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin_reply: Option<bool>,
}

/// Body of `POST /chat/guest-message` (anonymous sender).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestMessage {
    pub text: String,
    pub guest_name: String,
    pub guest_email: String,
}

impl GuestMessage {
    fn validate(&self) -> Result<(), ApiError> {
        if self.guest_name.trim().is_empty() || Email::parse(&self.guest_email).is_err() {
            return Err(ApiError::Validation(
                "Please enter a valid name and email address".to_owned(),
            ));
        }
        Ok(())
    }
}

impl ApiClient {
    /// The admin inbox: every conversation with its latest message.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        self.get_json("/chat/conversations").await
    }

    /// All messages in one conversation, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn conversation_messages(
        &self,
        id: &ConversationId,
    ) -> Result<Vec<Message>, ApiError> {
        self.get_json(&format!("/chat/conversation/{id}")).await
    }

    /// Send a message as the authenticated user (or an admin reply).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn send_message(&self, message: &NewMessage) -> Result<Message, ApiError> {
        self.post_json("/chat/message", message).await
    }

    /// Send a message as an anonymous guest.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the guest name is blank or the
    /// email is malformed, without touching the network; otherwise errors
    /// if the request fails.
    pub async fn send_guest_message(&self, message: &GuestMessage) -> Result<Message, ApiError> {
        message.validate()?;
        self.post_json("/chat/guest-message", message).await
    }

    /// A guest's own message history, looked up by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn guest_messages(&self, email: &str) -> Result<Vec<Message>, ApiError> {
        self.get_json(&format!(
            "/chat/guest-conversation/{}",
            urlencoding::encode(email)
        ))
        .await
    }

    /// Delete a conversation and all its messages (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn delete_conversation(&self, id: &ConversationId) -> Result<(), ApiError> {
        self.delete_unit(&format!("/chat/conversation/{id}")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn guest(name: &str, email: &str) -> GuestMessage {
        GuestMessage {
            text: "hello".to_owned(),
            guest_name: name.to_owned(),
            guest_email: email.to_owned(),
        }
    }

    #[test]
    fn test_guest_message_accepts_valid_identity() {
        assert!(guest("Nadia", "nadia@example.com").validate().is_ok());
    }

    #[test]
    fn test_guest_message_rejects_blank_name() {
        assert!(guest("   ", "nadia@example.com").validate().is_err());
    }

    #[test]
    fn test_guest_message_rejects_dotless_domain() {
        assert!(guest("Nadia", "nadia@localhost").validate().is_err());
    }

    #[test]
    fn test_new_message_omits_unset_fields() {
        let message = NewMessage {
            text: "hi".to_owned(),
            conversation_id: None,
            is_admin_reply: None,
        };
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"text":"hi"}"#);
    }
}
