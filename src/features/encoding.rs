//! Model input row and its numeric encoding
//!
//! The classifier sees only the derived features plus occupation and income;
//! raw age, weight, height, city and smoking status never reach it.

use serde::{Deserialize, Serialize};

use super::city::CityTier;
use super::derived::{AgeGroup, DerivedFeatures, LifestyleRisk};
use super::profile::UserAttributes;
use crate::Occupation;

/// The single row passed to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub bmi: f64,
    pub age_group: AgeGroup,
    pub lifestyle_risk: LifestyleRisk,
    pub city_tier: CityTier,
    pub occupation: Occupation,
    pub income_lpa: f64,
}

/// Standardization applied to the numeric columns.
///
/// These values belong to the trained artifact and must match what it was
/// trained with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureScaling {
    pub bmi_mean: f64,
    pub bmi_std: f64,
    pub income_mean: f64,
    pub income_std: f64,
}

impl Default for FeatureScaling {
    fn default() -> Self {
        FeatureScaling {
            bmi_mean: 25.0,
            bmi_std: 5.0,
            income_mean: 15.0,
            income_std: 15.0,
        }
    }
}

impl FeatureScaling {
    fn standardize(value: f64, mean: f64, std: f64) -> f32 {
        if std > 0.0 {
            ((value - mean) / std) as f32
        } else {
            (value - mean) as f32
        }
    }
}

impl FeatureRow {
    /// Length of the encoded vector:
    /// bmi, age group (3), lifestyle risk (3), city tier (3), occupation (7), income
    pub const DIM: usize = 1 + 3 + 3 + 3 + 7 + 1;

    pub fn new(derived: DerivedFeatures, occupation: Occupation, income_lpa: f64) -> Self {
        FeatureRow {
            bmi: derived.bmi,
            age_group: derived.age_group,
            lifestyle_risk: derived.lifestyle_risk,
            city_tier: derived.city_tier,
            occupation,
            income_lpa,
        }
    }

    pub fn from_attributes(attrs: &UserAttributes) -> Self {
        Self::new(
            DerivedFeatures::derive(attrs),
            attrs.occupation,
            attrs.income_lpa,
        )
    }

    /// Convert to a flat vector
    pub fn encode(&self, scaling: &FeatureScaling) -> Vec<f32> {
        let mut v = Vec::with_capacity(Self::DIM);

        v.push(FeatureScaling::standardize(
            self.bmi,
            scaling.bmi_mean,
            scaling.bmi_std,
        ));
        v.extend(one_hot(&AgeGroup::ALL, &self.age_group));
        v.extend(one_hot(&LifestyleRisk::ALL, &self.lifestyle_risk));
        v.extend(one_hot(
            &[CityTier::One, CityTier::Two, CityTier::Three],
            &self.city_tier,
        ));
        v.extend(one_hot(&Occupation::ALL, &self.occupation));
        v.push(FeatureScaling::standardize(
            self.income_lpa,
            scaling.income_mean,
            scaling.income_std,
        ));

        v
    }
}

fn one_hot<T: PartialEq>(categories: &[T], value: &T) -> impl Iterator<Item = f32> {
    let hit = categories.iter().position(|c| c == value);
    (0..categories.len()).map(move |i| if Some(i) == hit { 1.0 } else { 0.0 })
}
