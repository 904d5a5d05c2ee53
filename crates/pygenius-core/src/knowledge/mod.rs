//! Static fallback knowledge: error explanations and the lesson catalogue

pub mod errors;
pub mod lessons;

pub use errors::{ERROR_TABLE, ErrorEntry, UNKNOWN_ERROR, explain_error_locally};
pub use lessons::LessonCatalog;
