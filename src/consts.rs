pub const WEBHOOK_PATH: &str = "/webhook";
pub const PAGE_OBJECT: &str = "page";
pub const SUBSCRIBE_MODE: &str = "subscribe";
pub const POST_DONE: &str = "POST done";

pub const GENERIC_KEYWORD: &str = "generic";
pub const ATTACHMENT_RECEIVED_TEXT: &str = "Message with attachment received";
pub const POSTBACK_REPLY_PREFIX: &str = "Postback called with payload: ";

pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";
pub const SIGNATURE_PREFIX: &str = "sha256=";
