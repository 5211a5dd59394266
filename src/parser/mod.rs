pub mod export;

pub use export::{
    parse_import, truncate_chars, ParsedImport, MAX_MESSAGES, MAX_TEXT_CHARS, MIN_LINE_CHARS,
};
