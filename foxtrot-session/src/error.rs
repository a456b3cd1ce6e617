//! Error types re-exported from `foxtrot-core`

pub use foxtrot_core::error::{FoxtrotError, FoxtrotResult};
