//! Prediction result types.
//!
//! Represents the output of the two-stage liver disease classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of disease categories in the multiclass distribution.
pub const CLASS_COUNT: usize = 5;

/// Disease categories the multiclass model distributes probability over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiseaseClass {
    NoDisease,
    SuspectDisease,
    Hepatitis,
    Fibrosis,
    Cirrhosis,
}

impl DiseaseClass {
    /// All categories in model output order.
    pub const ALL: [DiseaseClass; CLASS_COUNT] = [
        DiseaseClass::NoDisease,
        DiseaseClass::SuspectDisease,
        DiseaseClass::Hepatitis,
        DiseaseClass::Fibrosis,
        DiseaseClass::Cirrhosis,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DiseaseClass::NoDisease => "No Disease",
            DiseaseClass::SuspectDisease => "Suspect Disease",
            DiseaseClass::Hepatitis => "Hepatitis",
            DiseaseClass::Fibrosis => "Fibrosis",
            DiseaseClass::Cirrhosis => "Cirrhosis",
        }
    }
}

/// Binary outcome of the first-stage classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Negative,
    Positive,
}

impl Outcome {
    /// Map the classifier's binary output (0 → Negative, nonzero → Positive).
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        if code == 0 {
            Outcome::Negative
        } else {
            Outcome::Positive
        }
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(self, Outcome::Positive)
    }
}

/// Result of a completed Predict action.
///
/// The probability distribution is present only for positive outcomes; the
/// multiclass model is not consulted when the binary model reports no
/// disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub id: Uuid,
    pub outcome: Outcome,
    pub probabilities: Option<[f64; CLASS_COUNT]>,
    pub created_at: DateTime<Utc>,
}

impl PredictionResult {
    /// Create a negative (no disease) result.
    #[must_use]
    pub fn negative() -> Self {
        Self {
            id: Uuid::new_v4(),
            outcome: Outcome::Negative,
            probabilities: None,
            created_at: Utc::now(),
        }
    }

    /// Create a positive result carrying the 5-class distribution.
    #[must_use]
    pub fn positive(probabilities: [f64; CLASS_COUNT]) -> Self {
        Self {
            id: Uuid::new_v4(),
            outcome: Outcome::Positive,
            probabilities: Some(probabilities),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_binary_code() {
        assert_eq!(Outcome::from_code(0), Outcome::Negative);
        assert_eq!(Outcome::from_code(1), Outcome::Positive);
        assert_eq!(Outcome::from_code(7), Outcome::Positive);
    }

    #[test]
    fn negative_result_has_no_distribution() {
        let result = PredictionResult::negative();
        assert_eq!(result.outcome, Outcome::Negative);
        assert!(result.probabilities.is_none());
    }

    #[test]
    fn positive_result_keeps_distribution() {
        let probs = [0.1, 0.2, 0.3, 0.25, 0.15];
        let result = PredictionResult::positive(probs);
        assert_eq!(result.outcome, Outcome::Positive);
        assert_eq!(result.probabilities, Some(probs));
    }

    #[test]
    fn class_labels_cover_all_categories() {
        let labels: Vec<_> = DiseaseClass::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "No Disease",
                "Suspect Disease",
                "Hepatitis",
                "Fibrosis",
                "Cirrhosis"
            ]
        );
    }
}
