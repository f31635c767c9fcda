use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please paste an email first!")]
    EmptyEmail,
}

/// Per-session workflow state.
///
/// A session starts `Idle`. Submitting a non-empty email moves it to `Processed`,
/// where every render re-runs the pipelines against the stored text. Clearing
/// always returns it to `Idle`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Processed {
        raw_email: String,
        submitted_at: DateTime<Utc>,
    },
}

impl SessionState {
    /// Stores `text` verbatim. Blank input is rejected and leaves the state untouched.
    pub fn submit(&mut self, text: &str) -> Result<(), SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyEmail);
        }
        *self = SessionState::Processed {
            raw_email: text.to_string(),
            submitted_at: Utc::now(),
        };
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = SessionState::Idle;
    }

    pub fn is_processed(&self) -> bool {
        matches!(self, SessionState::Processed { .. })
    }

    pub fn raw_email(&self) -> Option<&str> {
        match self {
            SessionState::Processed { raw_email, .. } => Some(raw_email),
            SessionState::Idle => None,
        }
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            SessionState::Processed { submitted_at, .. } => Some(*submitted_at),
            SessionState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let state = SessionState::default();
        assert!(!state.is_processed());
        assert_eq!(state.raw_email(), None);
    }

    #[test]
    fn test_submit_stores_text_unchanged() {
        let mut state = SessionState::default();
        let long_email = format!("  Subject: Order Issue\n\n{}  ", "x".repeat(2000));
        state.submit(&long_email).unwrap();
        assert!(state.is_processed());
        assert_eq!(state.raw_email(), Some(long_email.as_str()));
        assert!(state.submitted_at().is_some());
    }

    #[test]
    fn test_blank_submit_is_rejected() {
        for blank in ["", "   ", "\n\t "] {
            let mut state = SessionState::default();
            assert_eq!(state.submit(blank), Err(SubmitError::EmptyEmail));
            assert_eq!(state, SessionState::Idle);
        }
    }

    #[test]
    fn test_blank_submit_keeps_previous_email() {
        let mut state = SessionState::default();
        state.submit("first email").unwrap();
        assert!(state.submit("  ").is_err());
        assert_eq!(state.raw_email(), Some("first email"));
    }

    #[test]
    fn test_resubmit_overwrites() {
        let mut state = SessionState::default();
        state.submit("first").unwrap();
        state.submit("second").unwrap();
        assert_eq!(state.raw_email(), Some("second"));
    }

    #[test]
    fn test_clear_always_resets() {
        let mut state = SessionState::default();
        state.clear();
        assert_eq!(state, SessionState::Idle);

        state.submit("hello").unwrap();
        state.clear();
        assert_eq!(state, SessionState::Idle);
    }
}
