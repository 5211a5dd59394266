pub mod export;
pub mod movie;

pub use export::{ChatExport, ExportMessage, MessageText, TextFragment};
pub use movie::{EnrichedMovie, Movie, ReferenceMap};
