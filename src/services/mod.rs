//! Business logic layer (spec §4). Each module is one named component (C1-C12);
//! none of them touch the HTTP layer directly.

pub mod line_push;
pub mod lifecycle;
pub mod normalizer;
pub mod ocr_ingestor;
pub mod order_writer;
pub mod pipeline;
pub mod store_resolver;
pub mod summary_renderer;
pub mod translation;
pub mod voice;
