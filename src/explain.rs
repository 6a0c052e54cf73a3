use crate::error::RadwalkResult;

/// Prompt sent to whichever generative backend is plugged in.
pub const EXPLANATION_PROMPT: &str = "Explain briefly (max 3 sentences) why \
walking 1 radian steps around a circle creates a non-repeating pattern that \
demonstrates Pi's irrationality. Keep it simple and philosophical.";

const FALLBACK_NO_CREDENTIAL: &str =
    "Please configure your API key to fetch the explanation.";
const FALLBACK_UNAVAILABLE: &str = "Unable to contact the cosmic AI at this moment.";
const FALLBACK_EMPTY: &str = "No explanation available.";

/// A generative-text backend. Implementations may fail however they like;
/// `Explainer` absorbs every failure.
pub trait ExplainBackend {
    /// Whether a usable credential is configured.
    fn has_credential(&self) -> bool;

    /// Fetch explanation text for `prompt`.
    fn generate(&mut self, prompt: &str) -> RadwalkResult<String>;
}

/// Wraps a backend so that requesting an explanation can never surface an
/// error: missing credential, backend failure, and empty responses each map
/// to a human-readable fallback string. `&mut self` keeps at most one
/// request in flight per caller action.
pub struct Explainer<B> {
    backend: B,
}

impl<B: ExplainBackend> Explainer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn request_explanation(&mut self) -> String {
        if !self.backend.has_credential() {
            return FALLBACK_NO_CREDENTIAL.to_string();
        }
        match self.backend.generate(EXPLANATION_PROMPT) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => FALLBACK_EMPTY.to_string(),
            Err(err) => {
                tracing::warn!(%err, "explanation backend failed");
                FALLBACK_UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RadwalkError;

    struct StubBackend {
        credential: bool,
        response: RadwalkResult<String>,
    }

    impl ExplainBackend for StubBackend {
        fn has_credential(&self) -> bool {
            self.credential
        }

        fn generate(&mut self, prompt: &str) -> RadwalkResult<String> {
            assert!(prompt.contains("1 radian"));
            match &self.response {
                Ok(s) => Ok(s.clone()),
                Err(_) => Err(RadwalkError::evaluation("backend down")),
            }
        }
    }

    #[test]
    fn missing_credential_yields_fallback() {
        let mut e = Explainer::new(StubBackend {
            credential: false,
            response: Ok("unused".into()),
        });
        let text = e.request_explanation();
        assert!(!text.is_empty());
        assert!(text.contains("API key"));
    }

    #[test]
    fn backend_error_yields_fallback_not_panic() {
        let mut e = Explainer::new(StubBackend {
            credential: true,
            response: Err(RadwalkError::evaluation("boom")),
        });
        let text = e.request_explanation();
        assert!(!text.is_empty());
        assert!(text.contains("Unable"));
    }

    #[test]
    fn empty_response_yields_fallback() {
        let mut e = Explainer::new(StubBackend {
            credential: true,
            response: Ok("   ".into()),
        });
        assert_eq!(e.request_explanation(), FALLBACK_EMPTY);
    }

    #[test]
    fn successful_response_passes_through() {
        let mut e = Explainer::new(StubBackend {
            credential: true,
            response: Ok("Because 2π is irrational in radians.".into()),
        });
        assert!(e.request_explanation().starts_with("Because"));
    }
}
