use serde::Deserialize;

/// Top level of a Telegram Desktop chat export (`result.json`).
/// Only the fields the importer reads are kept.
#[derive(Debug, Deserialize)]
pub struct ChatExport {
    pub id: Option<i64>,
    #[serde(default)]
    pub messages: Vec<ExportMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ExportMessage {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub text: MessageText,

    /// Attachment path. Telegram leaves this out for text-only posts.
    pub file: Option<String>,
}

/// Message body as Telegram exports it. Plain posts are a bare string,
/// formatted posts are an array mixing strings with entity objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    Plain(String),
    Rich(Vec<TextFragment>),
    Other(serde_json::Value),
}

impl Default for MessageText {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl MessageText {
    /// Collapse the body to plain text. Entity objects contribute their
    /// `text` field, anything unrecognized contributes nothing.
    #[must_use]
    pub fn flatten(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Rich(fragments) => fragments.iter().map(TextFragment::as_str).collect(),
            Self::Other(_) => String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TextFragment {
    Plain(String),
    Styled { text: String },
    Other(serde_json::Value),
}

impl TextFragment {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Styled { text } => text,
            Self::Other(_) => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_message() {
        let message: ExportMessage = serde_json::from_str(
            r#"{"type": "message", "id": 7, "text": "Um filme qualquer"}"#,
        )
        .unwrap();

        assert_eq!(message.kind, "message");
        assert_eq!(message.id, 7);
        assert_eq!(message.text.flatten(), "Um filme qualquer");
    }

    #[test]
    fn test_rich_text_concatenates_fragments() {
        let message: ExportMessage = serde_json::from_str(
            r#"{
                "type": "message",
                "id": 8,
                "text": [
                    "Assista ",
                    {"type": "bold", "text": "Matrix"},
                    {"type": "link", "href": "https://example.com"},
                    " hoje"
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(message.text.flatten(), "Assista Matrix hoje");
    }

    #[test]
    fn test_rich_text_skips_non_text_values() {
        let text: MessageText = serde_json::from_str(r#"["a", 5, null, "b"]"#).unwrap();
        assert_eq!(text.flatten(), "ab");
    }

    #[test]
    fn test_null_text_flattens_to_empty() {
        let message: ExportMessage =
            serde_json::from_str(r#"{"type": "message", "id": 1, "text": null}"#).unwrap();
        assert_eq!(message.text.flatten(), "");
    }

    #[test]
    fn test_missing_text_defaults_to_empty() {
        let message: ExportMessage =
            serde_json::from_str(r#"{"type": "service", "id": 2}"#).unwrap();
        assert_eq!(message.text.flatten(), "");
    }

    #[test]
    fn test_export_without_messages_key() {
        let export: ChatExport = serde_json::from_str(r#"{"id": -1001234567890}"#).unwrap();
        assert_eq!(export.id, Some(-1_001_234_567_890));
        assert!(export.messages.is_empty());
    }
}
