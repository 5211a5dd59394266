use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Map from reference ID (e.g. "ID_42") to the t.me permalink of the
/// message the record came from.
pub type ReferenceMap = HashMap<String, String>;

/// A catalog entry. Serialized with camelCase keys so existing
/// catalog.json snapshots stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub genre: String,
    pub rating: f32,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub thumbnail: String,
    pub backdrop: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_link: Option<String>,
}

fn telegram_link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"t\.me/(?:c/)?([^/]+)/(\d+)").expect("Invalid regex pattern defined in code")
    })
}

impl Movie {
    /// `tg://resolve` deep link derived from the web permalink, for
    /// opening the message in a native Telegram client. `None` when
    /// there is no permalink or it does not look like a t.me link.
    #[must_use]
    pub fn deep_link(&self) -> Option<String> {
        let link = self.telegram_link.as_deref()?;
        let captures = telegram_link_regex().captures(link)?;

        Some(format!(
            "tg://resolve?domain={}&post={}",
            &captures[1], &captures[2]
        ))
    }
}

/// One record as returned by the enrichment model. Lenient on purpose:
/// every field falls back to its default so a sloppy response still
/// decodes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrichedMovie {
    pub ref_id: String,
    pub title: String,
    pub description: String,
    pub genre: String,
    pub rating: f32,
    pub year: i32,
    pub duration: Option<String>,
    pub trailer_url: Option<String>,
}
