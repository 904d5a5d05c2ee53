//! Deterministic local fallbacks for every assist action

pub mod bugs;
pub mod completion;
pub mod explain;
pub mod tutor;
pub mod voice;

pub use bugs::analyze_locally;
pub use completion::{code_completion, defined_variables};
pub use explain::explain_code_locally;
pub use tutor::{OPTIMIZATION_TIPS, basic_response, offline_tutor_reply};
pub use voice::voice_to_code_locally;

use once_cell::sync::Lazy;
use regex::Regex;

/// `name =` or `name ==`; group 2 is set for the comparison
pub(crate) static ASSIGNMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*=(=)?").expect("valid assignment regex")
});
