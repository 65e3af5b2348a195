//! Status taxonomy for asynchronous tasks

use serde::{Deserialize, Serialize};

/// Classification of a task status string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Succeeded,
    Failed,
    Pending,
}

impl StatusClass {
    /// Whether no further transition can occur from this class
    pub fn is_terminal(self) -> bool {
        !matches!(self, StatusClass::Pending)
    }
}

/// Terminal-status vocabulary used to classify task status strings.
///
/// Comparison is ASCII case-insensitive and ignores surrounding whitespace.
/// A status in neither list is non-terminal, so unknown statuses keep the
/// poll loop running rather than aborting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusVocabulary {
    pub success: Vec<String>,
    pub failure: Vec<String>,
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self {
            success: vec!["completed".into(), "success".into(), "done".into()],
            // Both spellings: the service has emitted each at different times.
            failure: vec![
                "failed".into(),
                "error".into(),
                "cancelled".into(),
                "canceled".into(),
            ],
        }
    }
}

impl StatusVocabulary {
    /// Classify a raw status string against this vocabulary
    pub fn classify(&self, status: &str) -> StatusClass {
        let status = status.trim();
        if self.success.iter().any(|s| s.eq_ignore_ascii_case(status)) {
            StatusClass::Succeeded
        } else if self.failure.iter().any(|s| s.eq_ignore_ascii_case(status)) {
            StatusClass::Failed
        } else {
            StatusClass::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_statuses_any_case() {
        let vocabulary = StatusVocabulary::default();
        for status in ["completed", "COMPLETED", "Success", "done", "DoNe"] {
            assert_eq!(vocabulary.classify(status), StatusClass::Succeeded, "{status}");
        }
    }

    #[test]
    fn test_failure_statuses_both_spellings() {
        let vocabulary = StatusVocabulary::default();
        for status in ["failed", "Error", "cancelled", "canceled", "CANCELLED"] {
            assert_eq!(vocabulary.classify(status), StatusClass::Failed, "{status}");
        }
    }

    #[test]
    fn test_unknown_statuses_are_pending() {
        let vocabulary = StatusVocabulary::default();
        for status in ["pending", "running", "provisioning", "", "paused"] {
            assert_eq!(vocabulary.classify(status), StatusClass::Pending, "{status:?}");
        }
    }

    #[test]
    fn test_classification_ignores_whitespace() {
        let vocabulary = StatusVocabulary::default();
        assert_eq!(vocabulary.classify("  completed "), StatusClass::Succeeded);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let vocabulary = StatusVocabulary::default();
        let first = vocabulary.classify("failed");
        assert_eq!(vocabulary.classify("failed"), first);
        assert!(first.is_terminal());
    }

    #[test]
    fn test_custom_vocabulary() {
        let vocabulary = StatusVocabulary {
            success: vec!["ok".into()],
            failure: vec!["dead".into()],
        };
        assert_eq!(vocabulary.classify("ok"), StatusClass::Succeeded);
        assert_eq!(vocabulary.classify("dead"), StatusClass::Failed);
        // "completed" is not terminal under a vocabulary that doesn't list it
        assert_eq!(vocabulary.classify("completed"), StatusClass::Pending);
    }
}
