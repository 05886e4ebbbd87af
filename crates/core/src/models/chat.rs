//! Support-chat messages and conversations.
//!
//! A sender is either an authenticated user or a guest identified only by
//! a self-reported name and email (no verification).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ConversationId, MessageId};

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: MessageId,
    pub text: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub sender_name: String,
    /// True when the message is an admin reply.
    #[serde(default)]
    pub is_admin: bool,
    pub conversation_id: ConversationId,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A conversation summary as shown in the admin inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(rename = "_id")]
    pub id: ConversationId,
    pub last_message: Message,
    pub message_count: u64,
}
