use crate::models::export::{ChatExport, ExportMessage};
use crate::models::ReferenceMap;
use tracing::debug;

/// Only the newest messages of an export are considered.
pub const MAX_MESSAGES: usize = 500;

/// Upper bound on text handed to the enrichment model, in chars.
pub const MAX_TEXT_CHARS: usize = 30_000;

/// Lines at or below this many chars (reference tag included) are
/// dropped as noise.
pub const MIN_LINE_CHARS: usize = 10;

/// Result of normalizing one import: the tagged text block plus the
/// permalinks of every message in the window.
#[derive(Debug, Default)]
pub struct ParsedImport {
    pub text: String,
    pub links: ReferenceMap,
}

/// Normalize raw input into enrichment-ready text.
///
/// Input that parses as a Telegram chat export is normalized message by
/// message; anything else is treated as pre-formatted text and only
/// truncated.
#[must_use]
pub fn parse_import(raw: &str, channel_handle: Option<&str>) -> ParsedImport {
    match serde_json::from_str::<ChatExport>(raw) {
        Ok(export) => normalize_export(&export, channel_handle),
        Err(error) => {
            debug!("Input is not a chat export ({error}), treating it as plain text");
            ParsedImport {
                text: truncate_chars(raw, MAX_TEXT_CHARS).to_string(),
                links: ReferenceMap::new(),
            }
        }
    }
}

fn normalize_export(export: &ChatExport, channel_handle: Option<&str>) -> ParsedImport {
    let chat_id = export.id.map(clean_chat_id).filter(|id| !id.is_empty());

    let retained: Vec<&ExportMessage> = export
        .messages
        .iter()
        .filter(|message| message.kind == "message")
        .collect();

    let start = retained.len().saturating_sub(MAX_MESSAGES);
    let window = &retained[start..];

    let mut links = ReferenceMap::new();
    let mut lines = Vec::new();

    for message in window {
        let ref_id = format!("ID_{}", message.id);

        // The permalink is recorded even when the line below gets
        // dropped, so the model can still be pointed at short posts
        // it learned about from surrounding context.
        if let Some(permalink) = permalink(channel_handle, chat_id.as_deref(), message.id) {
            links.insert(ref_id.clone(), permalink);
        }

        let mut text = message.text.flatten();

        if let Some(file) = message.file.as_deref().filter(|file| !file.is_empty()) {
            text.push_str(&format!(" [Arquivo: {file}]"));
        }

        let line = format!("[{ref_id}] {text}");
        if line.chars().count() > MIN_LINE_CHARS {
            lines.push(line);
        }
    }

    ParsedImport {
        text: lines.join("\n"),
        links,
    }
}

/// Telegram export chat IDs carry a `-100` marshalling prefix for
/// supergroups and channels. Strip it (or a bare sign) to recover the
/// ID used in t.me/c/ links.
fn clean_chat_id(id: i64) -> String {
    let raw = id.to_string();

    raw.strip_prefix("-100")
        .or_else(|| raw.strip_prefix('-'))
        .unwrap_or(&raw)
        .to_string()
}

fn permalink(handle: Option<&str>, chat_id: Option<&str>, message_id: i64) -> Option<String> {
    if let Some(handle) = handle {
        return Some(format!("https://t.me/{handle}/{message_id}"));
    }

    chat_id.map(|chat_id| format!("https://t.me/c/{chat_id}/{message_id}"))
}

#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export_with_messages(id: i64, messages: serde_json::Value) -> String {
        serde_json::json!({"id": id, "messages": messages}).to_string()
    }

    #[test]
    fn test_public_channel_links_use_handle() {
        let raw = export_with_messages(
            -1_001_234_567_890,
            serde_json::json!([
                {"type": "message", "id": 42, "text": "Lancamento imperdivel de hoje"}
            ]),
        );

        let parsed = parse_import(&raw, Some("movies"));

        assert_eq!(
            parsed.links.get("ID_42"),
            Some(&"https://t.me/movies/42".to_string())
        );
        assert_eq!(parsed.text, "[ID_42] Lancamento imperdivel de hoje");
    }

    #[test]
    fn test_private_channel_links_fall_back_to_chat_id() {
        let raw = export_with_messages(
            -1_001_234_567_890,
            serde_json::json!([
                {"type": "message", "id": 7, "text": "Um classico restaurado em 4K"}
            ]),
        );

        let parsed = parse_import(&raw, None);

        assert_eq!(
            parsed.links.get("ID_7"),
            Some(&"https://t.me/c/1234567890/7".to_string())
        );
    }

    #[test]
    fn test_plain_negative_chat_id_drops_sign() {
        let raw = export_with_messages(
            -987,
            serde_json::json!([
                {"type": "message", "id": 3, "text": "Sessao da meia-noite confirmada"}
            ]),
        );

        let parsed = parse_import(&raw, None);

        assert_eq!(
            parsed.links.get("ID_3"),
            Some(&"https://t.me/c/987/3".to_string())
        );
    }

    #[test]
    fn test_no_handle_and_no_chat_id_yields_no_links() {
        let raw = r#"{"messages": [
            {"type": "message", "id": 5, "text": "Estreia surpresa no catalogo"}
        ]}"#;

        let parsed = parse_import(raw, None);

        assert!(parsed.links.is_empty());
        assert_eq!(parsed.text, "[ID_5] Estreia surpresa no catalogo");
    }

    #[test]
    fn test_service_messages_are_filtered_out() {
        let raw = export_with_messages(
            11,
            serde_json::json!([
                {"type": "service", "id": 1, "action": "pin_message"},
                {"type": "message", "id": 2, "text": "Maratona de terror no sabado"}
            ]),
        );

        let parsed = parse_import(&raw, Some("movies"));

        assert!(!parsed.links.contains_key("ID_1"));
        assert_eq!(parsed.text, "[ID_2] Maratona de terror no sabado");
    }

    #[test]
    fn test_short_lines_dropped_but_links_kept() {
        let raw = export_with_messages(
            11,
            serde_json::json!([
                {"type": "message", "id": 8, "text": "ok"},
                {"type": "message", "id": 9, "text": "Indicacao longa o bastante"}
            ]),
        );

        let parsed = parse_import(&raw, Some("movies"));

        assert_eq!(parsed.text, "[ID_9] Indicacao longa o bastante");
        assert_eq!(
            parsed.links.get("ID_8"),
            Some(&"https://t.me/movies/8".to_string())
        );
    }

    #[test]
    fn test_line_length_boundary_counts_reference_tag() {
        // "[ID_7] abc" is exactly 10 chars, "[ID_7] abcd" is 11.
        let raw = export_with_messages(
            11,
            serde_json::json!([
                {"type": "message", "id": 7, "text": "abc"},
                {"type": "message", "id": 8, "text": "abcd"}
            ]),
        );

        let parsed = parse_import(&raw, Some("movies"));

        assert_eq!(parsed.text, "[ID_8] abcd");
    }

    #[test]
    fn test_window_keeps_only_newest_messages() {
        let messages: Vec<serde_json::Value> = (1..=502)
            .map(|id| {
                serde_json::json!({
                    "type": "message",
                    "id": id,
                    "text": format!("Filme numero {id} entrou no catalogo")
                })
            })
            .collect();
        let raw = export_with_messages(11, serde_json::json!(messages));

        let parsed = parse_import(&raw, Some("movies"));

        assert_eq!(parsed.links.len(), 500);
        assert!(!parsed.links.contains_key("ID_1"));
        assert!(!parsed.links.contains_key("ID_2"));
        assert!(parsed.links.contains_key("ID_3"));
        assert!(parsed.links.contains_key("ID_502"));
        assert_eq!(parsed.text.lines().count(), 500);
        assert!(parsed.text.starts_with("[ID_3] "));
    }

    #[test]
    fn test_file_marker_appended_for_attachments() {
        let raw = export_with_messages(
            11,
            serde_json::json!([
                {"type": "message", "id": 4, "text": "Copia dublada", "file": "matrix.mp4"},
                {"type": "message", "id": 5, "text": "Sem anexo nesta postagem", "file": ""}
            ]),
        );

        let parsed = parse_import(&raw, Some("movies"));

        let mut lines = parsed.text.lines();
        assert_eq!(
            lines.next(),
            Some("[ID_4] Copia dublada [Arquivo: matrix.mp4]")
        );
        assert_eq!(lines.next(), Some("[ID_5] Sem anexo nesta postagem"));
    }

    #[test]
    fn test_rich_text_messages_are_flattened() {
        let raw = export_with_messages(
            11,
            serde_json::json!([
                {
                    "type": "message",
                    "id": 6,
                    "text": ["Hoje tem ", {"type": "bold", "text": "Matrix"}, " no canal"]
                }
            ]),
        );

        let parsed = parse_import(&raw, Some("movies"));

        assert_eq!(parsed.text, "[ID_6] Hoje tem Matrix no canal");
    }

    #[test]
    fn test_non_json_input_passes_through() {
        let parsed = parse_import("1995 - Seven, dirigido por David Fincher", None);

        assert_eq!(parsed.text, "1995 - Seven, dirigido por David Fincher");
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_non_json_input_is_truncated() {
        let raw = "x".repeat(MAX_TEXT_CHARS + 1);

        let parsed = parse_import(&raw, None);

        assert_eq!(parsed.text.chars().count(), MAX_TEXT_CHARS);
    }

    #[test]
    fn test_truncate_chars_respects_multibyte_boundaries() {
        let text = "ação";
        assert_eq!(truncate_chars(text, 2), "aç");
        assert_eq!(truncate_chars(text, 10), "ação");
    }

    #[test]
    fn test_clean_chat_id() {
        assert_eq!(clean_chat_id(-1_001_234_567_890), "1234567890");
        assert_eq!(clean_chat_id(-987), "987");
        assert_eq!(clean_chat_id(123), "123");
        assert_eq!(clean_chat_id(-100), "");
    }
}
