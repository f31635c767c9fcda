use std::fmt;
use serde::{Deserialize, Serialize};

/// The top class predicted for an email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Classification {
            label: label.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Confidence as a percentage with one decimal, e.g. `87.5%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.confidence_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(Classification::new("Spam", 1.3).confidence, 1.0);
        assert_eq!(Classification::new("Spam", -0.2).confidence, 0.0);
    }

    #[test]
    fn test_confidence_percent() {
        let c = Classification::new("Complaint", 0.875);
        assert_eq!(c.confidence_percent(), "87.5%");
        assert_eq!(c.to_string(), "Complaint (87.5%)");
    }
}
