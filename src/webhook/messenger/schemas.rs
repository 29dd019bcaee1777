//! # Messenger Webhook Schemas
//!
//! Data structures for the JSON payloads the platform pushes to the webhook.
//! Every level below the root (`object` / `entry` / `messaging`) is kept raw
//! and decoded on its own, so one malformed entry or event does not poison
//! the rest of the batch.

use crate::consts;
use serde::{Deserialize, Serialize};

/// Root webhook payload
#[derive(Debug, Deserialize, Serialize)]
pub struct WebhookPayload {
    /// The object type, "page" for page subscriptions. Any other value,
    /// including a non-string one, is acknowledged without processing.
    #[serde(default)]
    pub object: serde_json::Value,
    /// Entries, only inspected when `object` is "page"
    #[serde(default)]
    pub entry: serde_json::Value,
}

impl WebhookPayload {
    pub fn is_page(&self) -> bool {
        self.object.as_str() == Some(consts::PAGE_OBJECT)
    }
}

/// Entry object grouping the messaging events of one page
#[derive(Debug, Deserialize, Serialize)]
pub struct Entry {
    /// Page ID
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    /// Time of update (epoch ms)
    #[serde(default)]
    pub time: Option<serde_json::Value>,
    /// Raw messaging events, expected to be an array decoded one by one
    /// into [`MessagingEvent`]
    #[serde(default)]
    pub messaging: serde_json::Value,
}

/// A user or page reference
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Participant {
    pub id: String,
}

/// One messaging event (the InboundEvent)
#[derive(Debug, Deserialize, Serialize)]
pub struct MessagingEvent {
    /// The user who triggered the event
    pub sender: Participant,
    /// The page receiving the event
    pub recipient: Participant,
    /// Time of the event (epoch ms)
    #[serde(default)]
    pub timestamp: Option<serde_json::Number>,
    /// Present for message events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// Present for postback events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postback: Option<Postback>,
}

/// Classification of a messaging event
#[derive(Debug, PartialEq)]
pub enum EventKind<'a> {
    Message(&'a Message),
    Postback(&'a Postback),
    Unknown,
}

impl MessagingEvent {
    /// `message` wins over `postback`; anything else is unknown.
    pub fn kind(&self) -> EventKind<'_> {
        match (&self.message, &self.postback) {
            (Some(message), _) => EventKind::Message(message),
            (None, Some(postback)) => EventKind::Postback(postback),
            (None, None) => EventKind::Unknown,
        }
    }
}

/// Message content
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Message {
    /// Message ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
    /// Text of the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Attachments (image, audio, video, file, location, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

/// Attachment sent by the user
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Attachment {
    /// Attachment type
    #[serde(rename = "type", default)]
    pub attachment_type: Option<String>,
    /// Type specific payload
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

/// Postback triggered by a button tap
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Postback {
    /// Opaque payload chosen by whoever built the button
    pub payload: String,
    /// Title of the tapped button
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
