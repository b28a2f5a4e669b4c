//! Reply classification domain.
//!
//! Value objects for intent detection, single-field extraction, and explicit
//! closure detection, plus the deterministic Italian-language fast path that
//! runs before any LLM call.

mod fast_path;
mod phrases;
mod types;

pub use fast_path::{classify_fast, normalize};
pub use phrases::{canonical_accept_phrases, canonical_refuse_phrases};
pub use types::{ClosureSignal, Confidence, ExtractedField, FieldKind, Intent, IntentContext};
