pub mod aggregate;
pub mod decorate;
pub mod dispatch;
pub mod document;
pub mod locate;
pub mod parsing;
pub mod templates;

// Re-export key types for easier usage
pub use aggregate::{Aggregate, LanguageGroup, Region, aggregate};
pub use decorate::{Annotation, Category, DecorationSink, StyleKey, decorate, redecorate};
pub use dispatch::{
    DispatchError, DispatchRequest, Languages, SessionSink, dispatch, plan_at, plan_region,
};
pub use document::{Applied, Document, Edit};
pub use locate::block_at;
pub use parsing::{Scan, ScanOptions, Span, scan_document, scan_document_with};
pub use templates::{Insertion, code_block, div, div_weight_at, style_block};
