//! Manifest splitting, classification and Helm acquisition.

pub mod classify;
pub mod helm;
pub mod split;
pub mod value;

pub use classify::{classify_kind, classify_name, kind_of, name_of, parse_document, parse_documents};
pub use split::split_manifests;
pub use value::ValueTree;
