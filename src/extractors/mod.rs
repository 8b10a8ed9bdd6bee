// src/extractors/mod.rs
pub mod dedup;
pub mod dom;
pub mod pipeline;
pub mod record;
pub mod section;

// Re-export key extraction types for convenience
pub use dedup::dedupe_entries;
pub use pipeline::RegisterExtractor;
