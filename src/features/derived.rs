//! Engineered features derived from user attributes

use serde::{Deserialize, Serialize};

use super::city::CityTier;
use super::profile::UserAttributes;

/// Body mass index rounded to two decimals
pub fn bmi(weight_kg: f64, height_cm: u32) -> f64 {
    let height_m = height_cm as f64 / 100.0;
    round2(weight_kg / (height_m * height_m))
}

/// Round the exact binary value to two decimals, ties to even
fn round2(x: f64) -> f64 {
    format!("{:.2}", x).parse().unwrap_or(x)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Young,
    MiddleAged,
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 3] = [AgeGroup::Young, AgeGroup::MiddleAged, AgeGroup::Senior];

    pub fn from_age(age: u32) -> Self {
        if age < 30 {
            AgeGroup::Young
        } else if age < 50 {
            AgeGroup::MiddleAged
        } else {
            AgeGroup::Senior
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Young => "young",
            AgeGroup::MiddleAged => "middle_aged",
            AgeGroup::Senior => "senior",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleRisk {
    LowRisk,
    MediumRisk,
    HighRisk,
}

impl LifestyleRisk {
    pub const ALL: [LifestyleRisk; 3] = [
        LifestyleRisk::LowRisk,
        LifestyleRisk::MediumRisk,
        LifestyleRisk::HighRisk,
    ];

    /// Non-smokers are always low risk
    pub fn assess(smoker: bool, bmi: f64) -> Self {
        if smoker && bmi > 30.0 {
            LifestyleRisk::HighRisk
        } else if smoker && bmi > 27.0 {
            LifestyleRisk::MediumRisk
        } else {
            LifestyleRisk::LowRisk
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifestyleRisk::LowRisk => "low_risk",
            LifestyleRisk::MediumRisk => "medium_risk",
            LifestyleRisk::HighRisk => "high_risk",
        }
    }
}

/// Features computed from a validated [`UserAttributes`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    pub bmi: f64,
    pub age_group: AgeGroup,
    pub lifestyle_risk: LifestyleRisk,
    pub city_tier: CityTier,
}

impl DerivedFeatures {
    pub fn derive(attrs: &UserAttributes) -> Self {
        let bmi = bmi(attrs.weight, attrs.height);
        DerivedFeatures {
            bmi,
            age_group: AgeGroup::from_age(attrs.age),
            lifestyle_risk: LifestyleRisk::assess(attrs.smoker, bmi),
            city_tier: CityTier::of(&attrs.city),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Occupation;

    fn sample() -> UserAttributes {
        UserAttributes {
            age: 28,
            weight: 70.0,
            height: 170,
            income_lpa: 6.5,
            smoker: false,
            city: "Delhi".to_string(),
            occupation: Occupation::PrivateJob,
        }
    }

    #[test]
    fn test_bmi_rounding() {
        assert_eq!(bmi(70.0, 170), 24.22);
        assert_eq!(bmi(100.0, 200), 25.0);
        assert_eq!(bmi(30.0, 220), 6.2);
    }

    #[test]
    fn test_bmi_reference_values() {
        // (weight, height, expected)
        let cases = [
            (70.0, 170, 24.22),
            (100.0, 200, 25.0),
            (55.5, 160, 21.68),
            (82.3, 175, 26.87),
            (45.25, 150, 20.11),
            (68.75, 180, 21.22),
            (77.7, 166, 28.2),
            (30.0, 120, 20.83),
            (200.0, 120, 138.89),
            (199.99, 121, 136.6),
        ];
        for (weight, height, expected) in cases {
            let b = bmi(weight, height);
            assert_eq!(b, expected, "bmi({}, {})", weight, height);
            assert!(b > 0.0);
        }
    }

    #[test]
    fn test_bmi_ties_and_near_ties() {
        // 21.625 is exact in binary and goes to even
        assert_eq!(bmi(31.14, 120), 21.62);
        // 30.005 and 27.005 sit just below the midpoint
        assert_eq!(bmi(120.02, 200), 30.0);
        assert_eq!(bmi(108.02, 200), 27.0);
    }

    #[test]
    fn test_risk_at_rounded_thresholds() {
        assert_eq!(
            LifestyleRisk::assess(true, bmi(120.02, 200)),
            LifestyleRisk::MediumRisk
        );
        assert_eq!(
            LifestyleRisk::assess(true, bmi(108.02, 200)),
            LifestyleRisk::LowRisk
        );
    }

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(AgeGroup::from_age(1), AgeGroup::Young);
        assert_eq!(AgeGroup::from_age(29), AgeGroup::Young);
        assert_eq!(AgeGroup::from_age(30), AgeGroup::MiddleAged);
        assert_eq!(AgeGroup::from_age(49), AgeGroup::MiddleAged);
        assert_eq!(AgeGroup::from_age(50), AgeGroup::Senior);
        assert_eq!(AgeGroup::from_age(100), AgeGroup::Senior);
    }

    #[test]
    fn test_non_smoker_always_low_risk() {
        for bmi in [15.0, 27.5, 30.01, 45.0] {
            assert_eq!(LifestyleRisk::assess(false, bmi), LifestyleRisk::LowRisk);
        }
    }

    #[test]
    fn test_smoker_risk_thresholds() {
        assert_eq!(LifestyleRisk::assess(true, 27.0), LifestyleRisk::LowRisk);
        assert_eq!(LifestyleRisk::assess(true, 27.01), LifestyleRisk::MediumRisk);
        assert_eq!(LifestyleRisk::assess(true, 30.0), LifestyleRisk::MediumRisk);
        assert_eq!(LifestyleRisk::assess(true, 30.01), LifestyleRisk::HighRisk);
    }

    #[test]
    fn test_derive_example() {
        let features = DerivedFeatures::derive(&sample());
        assert_eq!(features.bmi, 24.22);
        assert_eq!(features.age_group, AgeGroup::Young);
        assert_eq!(features.lifestyle_risk, LifestyleRisk::LowRisk);
        assert_eq!(features.city_tier, CityTier::One);
    }

    #[test]
    fn test_derive_is_idempotent() {
        let attrs = UserAttributes {
            age: 52,
            weight: 95.0,
            height: 168,
            income_lpa: 12.0,
            smoker: true,
            city: "Jaipur".to_string(),
            occupation: Occupation::BusinessOwner,
        };
        let first = DerivedFeatures::derive(&attrs);
        let second = DerivedFeatures::derive(&attrs);
        assert_eq!(first, second);
        assert_eq!(first.lifestyle_risk, LifestyleRisk::HighRisk);
        assert_eq!(first.city_tier, CityTier::Two);
    }

    #[test]
    fn test_serialized_labels() {
        let features = DerivedFeatures::derive(&sample());
        let json = serde_json::to_value(features).unwrap();
        assert_eq!(json["age_group"], "young");
        assert_eq!(json["lifestyle_risk"], "low_risk");
        assert_eq!(json["city_tier"], 1);
    }
}
