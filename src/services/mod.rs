pub mod assembler;
pub use assembler::assemble;

pub mod enrichment;
pub use enrichment::{EnrichmentError, EnrichmentService, GeminiEnrichment};

pub mod sync;
pub use sync::{SyncError, SyncOutcome, SyncService};
