//! Input handling module

pub mod document_builder;
pub mod file_reader;
pub mod glob_resolver;

pub use document_builder::{build_document, CONTENT_ROOT_ID};
pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;
