//! Raw user attributes as submitted by the form

use serde::{Deserialize, Serialize};

use crate::{FieldError, Occupation};

pub const AGE_RANGE: (u32, u32) = (1, 100);
pub const WEIGHT_RANGE: (f64, f64) = (30.0, 200.0);
pub const HEIGHT_RANGE: (u32, u32) = (120, 220);
pub const MIN_INCOME_LPA: f64 = 0.5;

/// Attributes describing the person being quoted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAttributes {
    /// Age in years
    pub age: u32,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in centimetres
    pub height: u32,
    /// Annual income in lakhs
    pub income_lpa: f64,
    pub smoker: bool,
    /// Free-text city name
    pub city: String,
    pub occupation: Occupation,
}

impl UserAttributes {
    /// Check the numeric ranges the form enforces.
    ///
    /// Every violated field is reported, not just the first.
    pub fn validate(&self) -> std::result::Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.age < AGE_RANGE.0 || self.age > AGE_RANGE.1 {
            errors.push(FieldError {
                field: "age",
                message: format!(
                    "must be between {} and {}, got {}",
                    AGE_RANGE.0, AGE_RANGE.1, self.age
                ),
            });
        }

        if !(WEIGHT_RANGE.0..=WEIGHT_RANGE.1).contains(&self.weight) {
            errors.push(FieldError {
                field: "weight",
                message: format!(
                    "must be between {} and {} kg, got {}",
                    WEIGHT_RANGE.0, WEIGHT_RANGE.1, self.weight
                ),
            });
        }

        if self.height < HEIGHT_RANGE.0 || self.height > HEIGHT_RANGE.1 {
            errors.push(FieldError {
                field: "height",
                message: format!(
                    "must be between {} and {} cm, got {}",
                    HEIGHT_RANGE.0, HEIGHT_RANGE.1, self.height
                ),
            });
        }

        if !self.income_lpa.is_finite() || self.income_lpa < MIN_INCOME_LPA {
            errors.push(FieldError {
                field: "income_lpa",
                message: format!("must be at least {}, got {}", MIN_INCOME_LPA, self.income_lpa),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
