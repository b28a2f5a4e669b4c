//! Deterministic intent fast path.
//!
//! Classifies short canonical replies without an LLM call. Anything the
//! fast path is not sure about falls through (`None`) to the LLM fallback.
//! Refuse patterns are checked before accept patterns, biasing against
//! accidental auto-advance.

use once_cell::sync::Lazy;
use regex::Regex;

use super::phrases::{canonical_accept_phrases, canonical_refuse_phrases};
use super::types::{Intent, IntentContext};

/// Replies longer than this are never classified deterministically.
const MAX_FAST_PATH_WORDS: usize = 4;

/// Emphatic accept variants the phrase sets can't enumerate ("siii", "okkk").
static ACCEPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(s[iì]+|ok+|okay|certo+|perfetto+)( grazie| s[iì]+)*$")
        .expect("accept regex is valid")
});

/// Emphatic refuse variants ("nooo", "basta basta").
static REFUSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(no+|basta+( cos[iì])?|stop)( grazie| no+)*$").expect("refuse regex is valid")
});

/// Normalizes a reply for matching: lowercase, punctuation stripped,
/// whitespace collapsed. Accented characters are preserved.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Attempts a deterministic classification of a reply.
///
/// Returns `None` when the reply is not a canonical short answer; the
/// caller should then fall back to the LLM classifier. Empty replies are
/// `Neutral` without any external call.
pub fn classify_fast(context: IntentContext, text: &str) -> Option<Intent> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Some(Intent::Neutral);
    }
    if normalized.split(' ').count() > MAX_FAST_PATH_WORDS {
        return None;
    }

    if canonical_refuse_phrases(context).any(|p| p == normalized) {
        return Some(Intent::Refuse);
    }
    if canonical_accept_phrases(context).any(|p| p == normalized) {
        return Some(Intent::Accept);
    }
    if REFUSE_RE.is_match(&normalized) {
        return Some(Intent::Refuse);
    }
    if ACCEPT_RE.is_match(&normalized) {
        return Some(Intent::Accept);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  Sì, certo!  "), "sì certo");
        assert_eq!(normalize("D'accordo."), "d accordo");
        assert_eq!(normalize("VA   BENE"), "va bene");
    }

    #[test]
    fn every_canonical_accept_phrase_classifies_as_accept() {
        for context in [
            IntentContext::Consent,
            IntentContext::Extension,
            IntentContext::StopConfirmation,
        ] {
            for phrase in canonical_accept_phrases(context) {
                assert_eq!(
                    classify_fast(context, phrase),
                    Some(Intent::Accept),
                    "phrase '{}' in {:?}",
                    phrase,
                    context
                );
            }
        }
    }

    #[test]
    fn every_canonical_refuse_phrase_classifies_as_refuse() {
        for context in [
            IntentContext::Consent,
            IntentContext::Extension,
            IntentContext::StopConfirmation,
        ] {
            for phrase in canonical_refuse_phrases(context) {
                assert_eq!(
                    classify_fast(context, phrase),
                    Some(Intent::Refuse),
                    "phrase '{}' in {:?}",
                    phrase,
                    context
                );
            }
        }
    }

    #[test]
    fn punctuation_and_case_do_not_defeat_matching() {
        assert_eq!(
            classify_fast(IntentContext::Consent, "Sì!"),
            Some(Intent::Accept)
        );
        assert_eq!(
            classify_fast(IntentContext::Consent, "No, grazie."),
            Some(Intent::Refuse)
        );
    }

    #[test]
    fn emphatic_variants_match_via_regex() {
        assert_eq!(
            classify_fast(IntentContext::Extension, "siii"),
            Some(Intent::Accept)
        );
        assert_eq!(
            classify_fast(IntentContext::Extension, "nooo"),
            Some(Intent::Refuse)
        );
        assert_eq!(
            classify_fast(IntentContext::Extension, "okkk"),
            Some(Intent::Accept)
        );
    }

    #[test]
    fn empty_reply_is_neutral_without_fallback() {
        assert_eq!(
            classify_fast(IntentContext::Consent, "   "),
            Some(Intent::Neutral)
        );
    }

    #[test]
    fn long_replies_fall_through_to_llm() {
        assert_eq!(
            classify_fast(
                IntentContext::Consent,
                "sì ma prima vorrei capire come userete i miei dati"
            ),
            None
        );
    }

    #[test]
    fn ambiguous_short_replies_fall_through() {
        assert_eq!(classify_fast(IntentContext::Consent, "forse"), None);
        assert_eq!(classify_fast(IntentContext::Consent, "dipende"), None);
    }

    #[test]
    fn qualified_accept_is_not_classified_deterministically() {
        // "sì ma non voglio" must not be auto-accepted.
        assert_eq!(classify_fast(IntentContext::Consent, "sì ma non voglio"), None);
    }

    #[test]
    fn context_changes_the_verdict_for_the_same_phrase() {
        // "concludiamo" confirms a stop but refuses an extension.
        assert_eq!(
            classify_fast(IntentContext::StopConfirmation, "concludiamo"),
            Some(Intent::Accept)
        );
        assert_eq!(
            classify_fast(IntentContext::Extension, "concludiamo"),
            Some(Intent::Refuse)
        );
    }
}
