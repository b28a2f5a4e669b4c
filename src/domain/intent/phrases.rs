//! Canonical Italian phrase sets for the deterministic fast path.
//!
//! These are the short replies Italian users actually type to consent
//! prompts, extension offers, and stop confirmations. The LLM fallback
//! prompt cites the same sets, so both paths agree on them.

use super::types::IntentContext;

/// Accept phrases shared by every context (normalized form).
pub(super) const BASE_ACCEPT: &[&str] = &[
    "si",
    "sì",
    "ok",
    "okay",
    "va bene",
    "va benissimo",
    "certo",
    "certamente",
    "perfetto",
    "d accordo",
    "daccordo",
    "volentieri",
    "con piacere",
    "assolutamente si",
    "assolutamente sì",
];

/// Refuse phrases shared by every context (normalized form).
pub(super) const BASE_REFUSE: &[&str] = &[
    "no",
    "no grazie",
    "non ora",
    "non adesso",
    "meglio di no",
    "preferisco di no",
    "non mi va",
];

/// Context-specific accept additions.
pub(super) const CONSENT_ACCEPT: &[&str] = &["accetto", "acconsento", "procedi pure", "chiedimi pure"];
pub(super) const EXTENSION_ACCEPT: &[&str] = &["continuiamo", "continuiamo pure", "andiamo avanti", "procediamo"];
pub(super) const STOP_ACCEPT: &[&str] = &["confermo", "concludiamo", "chiudiamo pure", "si concludi", "sì concludi"];

/// Context-specific refuse additions.
pub(super) const CONSENT_REFUSE: &[&str] = &["non acconsento", "non accetto"];
pub(super) const EXTENSION_REFUSE: &[&str] = &["basta", "basta cosi", "basta così", "fermiamoci", "concludiamo", "finiamo qui", "stop"];
pub(super) const STOP_REFUSE: &[&str] = &["no continuiamo", "non ancora", "andiamo avanti"];

/// All accept phrases the fast path recognizes for a context.
pub fn canonical_accept_phrases(context: IntentContext) -> impl Iterator<Item = &'static str> {
    let extra = match context {
        IntentContext::Consent => CONSENT_ACCEPT,
        IntentContext::Extension => EXTENSION_ACCEPT,
        IntentContext::StopConfirmation => STOP_ACCEPT,
    };
    BASE_ACCEPT.iter().chain(extra.iter()).copied()
}

/// All refuse phrases the fast path recognizes for a context.
pub fn canonical_refuse_phrases(context: IntentContext) -> impl Iterator<Item = &'static str> {
    let extra = match context {
        IntentContext::Consent => CONSENT_REFUSE,
        IntentContext::Extension => EXTENSION_REFUSE,
        IntentContext::StopConfirmation => STOP_REFUSE,
    };
    BASE_REFUSE.iter().chain(extra.iter()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_and_refuse_sets_are_disjoint_per_context() {
        for context in [
            IntentContext::Consent,
            IntentContext::Extension,
            IntentContext::StopConfirmation,
        ] {
            let accepts: Vec<_> = canonical_accept_phrases(context).collect();
            for refuse in canonical_refuse_phrases(context) {
                assert!(
                    !accepts.contains(&refuse),
                    "phrase '{}' is in both sets for {:?}",
                    refuse,
                    context
                );
            }
        }
    }

    #[test]
    fn context_extras_are_included() {
        assert!(canonical_accept_phrases(IntentContext::Consent).any(|p| p == "acconsento"));
        assert!(canonical_refuse_phrases(IntentContext::Extension).any(|p| p == "fermiamoci"));
        assert!(canonical_accept_phrases(IntentContext::StopConfirmation).any(|p| p == "confermo"));
    }
}
