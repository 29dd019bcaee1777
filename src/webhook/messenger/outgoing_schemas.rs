//! # Messenger Outgoing Message Schemas
//!
//! Data structures for the Send API. Every reply is built from these types
//! and serialized with serde, so user supplied text is always JSON-escaped.

use serde::{Deserialize, Serialize};

/// Message sent through the Send API (the OutboundMessage)
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OutgoingMessage {
    /// Who receives the reply
    pub recipient: OutgoingRecipient,
    /// Reply content
    pub message: OutgoingContent,
}

impl OutgoingMessage {
    /// Creates a new text message
    pub fn new_text(recipient_id: String, text: String) -> Self {
        Self {
            recipient: OutgoingRecipient { id: recipient_id },
            message: OutgoingContent::Text { text },
        }
    }

    /// Creates the fixed two card generic template message
    pub fn new_generic_template(recipient_id: String) -> Self {
        Self {
            recipient: OutgoingRecipient { id: recipient_id },
            message: OutgoingContent::Attachment {
                attachment: OutgoingAttachment {
                    attachment_type: "template".to_string(),
                    payload: TemplatePayload {
                        template_type: "generic".to_string(),
                        elements: vec![
                            GenericElement::new(
                                "rift",
                                "Next-generation virtual reality",
                                "https://www.oculus.com/en-us/rift/",
                                "http://messengerdemo.parseapp.com/img/rift.png",
                                "Payload for first bubble",
                            ),
                            GenericElement::new(
                                "touch",
                                "Your Hands, Now in VR",
                                "https://www.oculus.com/en-us/touch/",
                                "http://messengerdemo.parseapp.com/img/touch.png",
                                "Payload for second bubble",
                            ),
                        ],
                    },
                },
            },
        }
    }

    pub fn recipient_id(&self) -> &str {
        &self.recipient.id
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OutgoingRecipient {
    pub id: String,
}

/// Either `{text}` or `{attachment}`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OutgoingContent {
    Text { text: String },
    Attachment { attachment: OutgoingAttachment },
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OutgoingAttachment {
    /// Attachment type, "template"
    #[serde(rename = "type")]
    pub attachment_type: String,
    pub payload: TemplatePayload,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TemplatePayload {
    /// Template type, "generic"
    pub template_type: String,
    /// Carousel cards
    pub elements: Vec<GenericElement>,
}

/// One card of a generic template
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GenericElement {
    pub title: String,
    pub subtitle: String,
    pub item_url: String,
    pub image_url: String,
    pub buttons: Vec<TemplateButton>,
}

impl GenericElement {
    /// Card with an "Open Web URL" button pointing at `item_url` and a
    /// "Call Postback" button carrying `postback_payload`
    fn new(
        title: &str,
        subtitle: &str,
        item_url: &str,
        image_url: &str,
        postback_payload: &str,
    ) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            item_url: item_url.to_string(),
            image_url: image_url.to_string(),
            buttons: vec![
                TemplateButton::WebUrl {
                    url: item_url.to_string(),
                    title: "Open Web URL".to_string(),
                },
                TemplateButton::Postback {
                    title: "Call Postback".to_string(),
                    payload: postback_payload.to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TemplateButton {
    WebUrl { url: String, title: String },
    Postback { title: String, payload: String },
}

/// Response from the Send API on success
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SendApiResponse {
    pub recipient_id: Option<String>,
    pub message_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message_shape() {
        let message = OutgoingMessage::new_text("U1".into(), "hello".into());

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"recipient": {"id": "U1"}, "message": {"text": "hello"}})
        );
    }

    #[test]
    fn test_text_message_escapes_user_content() {
        let text = r#"he said "hi" \ }, "injected": true"#;
        let message = OutgoingMessage::new_text("U1".into(), text.into());

        let raw = serde_json::to_string(&message).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(parsed["message"]["text"], text);
        assert!(parsed["message"].get("injected").is_none());
    }

    #[test]
    fn test_generic_template_shape() {
        let message = OutgoingMessage::new_generic_template("U1".into());
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["recipient"]["id"], "U1");
        assert_eq!(value["message"]["attachment"]["type"], "template");

        let payload = &value["message"]["attachment"]["payload"];
        assert_eq!(payload["template_type"], "generic");
        assert_eq!(payload["elements"].as_array().unwrap().len(), 2);

        let first = &payload["elements"][0];
        assert_eq!(first["title"], "rift");
        assert_eq!(first["item_url"], "https://www.oculus.com/en-us/rift/");
        assert_eq!(
            first["buttons"],
            json!([
                {"type": "web_url", "url": "https://www.oculus.com/en-us/rift/", "title": "Open Web URL"},
                {"type": "postback", "title": "Call Postback", "payload": "Payload for first bubble"}
            ])
        );

        let second = &payload["elements"][1];
        assert_eq!(second["title"], "touch");
        assert_eq!(second["subtitle"], "Your Hands, Now in VR");
        assert_eq!(second["buttons"][1]["payload"], "Payload for second bubble");
    }

    #[test]
    fn test_generic_template_only_varies_by_recipient() {
        let a = OutgoingMessage::new_generic_template("A".into());
        let b = OutgoingMessage::new_generic_template("B".into());

        assert_eq!(a.message, b.message);
        assert_ne!(a.recipient, b.recipient);
    }

    #[test]
    fn test_send_api_response_deserialization() {
        let response: SendApiResponse =
            serde_json::from_str(r#"{"recipient_id":"U1","message_id":"mid.1"}"#).unwrap();

        assert_eq!(response.recipient_id.as_deref(), Some("U1"));
        assert_eq!(response.message_id.as_deref(), Some("mid.1"));
    }
}
