//! Patient input data collected by the detection form.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of features both classifiers were trained on.
pub const FEATURE_COUNT: usize = 12;

/// Patient sex as collected by the form selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// Numeric encoding used during model training (Male=0, Female=1).
    #[must_use]
    pub fn code(self) -> f64 {
        match self {
            Sex::Male => 0.0,
            Sex::Female => 1.0,
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sex::Male => write!(f, "Male"),
            Sex::Female => write!(f, "Female"),
        }
    }
}

/// Laboratory values and demographics entered on the detection form.
///
/// Field order below matches the collection order of the form; the model
/// feature order is different, see [`PatientInput::feature_vector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PatientInput {
    /// Optional free-text name, never passed to the models.
    #[validate(length(max = 120, message = "Patient name must be 120 characters or fewer"))]
    pub patient_name: String,
    #[validate(range(max = 100, message = "Age must be between 0 and 100"))]
    pub age: u32,
    pub sex: Sex,
    pub albumin: f64,
    pub alanine_aminotransferase: f64,
    pub bilirubin: f64,
    pub cholesterol: f64,
    pub gamma_glutamyl_transferase: f64,
    pub alkaline_phosphatase: f64,
    pub aspartate_aminotransferase: f64,
    pub cholinesterase: f64,
    pub creatinina: f64,
    pub protein: f64,
}

impl Default for PatientInput {
    fn default() -> Self {
        Self {
            patient_name: String::new(),
            age: 0,
            sex: Sex::Male,
            albumin: 0.0,
            alanine_aminotransferase: 0.0,
            bilirubin: 0.0,
            cholesterol: 0.0,
            gamma_glutamyl_transferase: 0.0,
            alkaline_phosphatase: 0.0,
            aspartate_aminotransferase: 0.0,
            cholinesterase: 0.0,
            creatinina: 0.0,
            protein: 0.0,
        }
    }
}

impl PatientInput {
    /// Restore every field to its declared default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Convert the input to the feature vector expected by both models.
    ///
    /// The models were trained on this exact column ordering, which differs
    /// from the collection order of the form: age, sex_code, albumin,
    /// alkaline_phosphatase, alanine_aminotransferase,
    /// aspartate_aminotransferase, bilirubin, cholinesterase, cholesterol,
    /// creatinina, gamma_glutamyl_transferase, protein.
    #[must_use]
    pub fn feature_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.age),
            self.sex.code(),
            self.albumin,
            self.alkaline_phosphatase,
            self.alanine_aminotransferase,
            self.aspartate_aminotransferase,
            self.bilirubin,
            self.cholinesterase,
            self.cholesterol,
            self.creatinina,
            self.gamma_glutamyl_transferase,
            self.protein,
        ]
    }
}

/// Clamp a submitted lab value to the widget minimum of zero.
#[must_use]
pub fn clamp_non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_codes_match_training_encoding() {
        assert_eq!(Sex::Male.code(), 0.0);
        assert_eq!(Sex::Female.code(), 1.0);
    }

    #[test]
    fn defaults_are_all_zero() {
        let input = PatientInput::default();
        assert_eq!(input.age, 0);
        assert_eq!(input.sex, Sex::Male);
        assert!(input.patient_name.is_empty());
        assert!(input.feature_vector().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn feature_vector_uses_model_order() {
        let input = PatientInput {
            patient_name: "Jane Doe".to_string(),
            age: 45,
            sex: Sex::Female,
            albumin: 4.0,
            alanine_aminotransferase: 22.1,
            bilirubin: 0.7,
            cholesterol: 5.2,
            gamma_glutamyl_transferase: 25.0,
            alkaline_phosphatase: 70.0,
            aspartate_aminotransferase: 24.5,
            cholinesterase: 8.1,
            creatinina: 74.0,
            protein: 7.1,
        };

        let features = input.feature_vector();
        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(features[0], 45.0); // age
        assert_eq!(features[1], 1.0); // sex code
        assert_eq!(features[2], 4.0); // albumin
        assert_eq!(features[3], 70.0); // alkaline phosphatase, not ALT
        assert_eq!(features[4], 22.1); // alanine aminotransferase
        assert_eq!(features[5], 24.5); // aspartate aminotransferase
        assert_eq!(features[6], 0.7); // bilirubin
        assert_eq!(features[7], 8.1); // cholinesterase
        assert_eq!(features[8], 5.2); // cholesterol
        assert_eq!(features[9], 74.0); // creatinina
        assert_eq!(features[10], 25.0); // gamma glutamyl transferase
        assert_eq!(features[11], 7.1); // protein
    }

    #[test]
    fn reset_restores_declared_defaults() {
        let mut input = PatientInput {
            patient_name: "X".to_string(),
            age: 61,
            sex: Sex::Female,
            albumin: 3.3,
            ..PatientInput::default()
        };
        input.reset();
        assert_eq!(input, PatientInput::default());
    }

    #[test]
    fn age_above_widget_maximum_fails_validation() {
        let input = PatientInput {
            age: 140,
            ..PatientInput::default()
        };
        assert!(validator::Validate::validate(&input).is_err());
        let ok = PatientInput {
            age: 100,
            ..PatientInput::default()
        };
        assert!(validator::Validate::validate(&ok).is_ok());
    }

    #[test]
    fn negative_values_clamp_to_widget_minimum() {
        assert_eq!(clamp_non_negative(-3.5), 0.0);
        assert_eq!(clamp_non_negative(0.0), 0.0);
        assert_eq!(clamp_non_negative(2.25), 2.25);
        assert_eq!(clamp_non_negative(f64::NAN), 0.0);
    }
}
