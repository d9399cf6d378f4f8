// Handler modules
pub mod images;

// Re-export all handler functions
pub use images::{handle_all, handle_get, handle_kinds, handle_version};
