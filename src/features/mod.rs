//! Feature derivation and encoding
//!
//! Converts raw user attributes into model-ready features.

pub mod city;
pub mod derived;
pub mod encoding;
pub mod profile;

pub use city::CityTier;
pub use derived::{bmi, AgeGroup, DerivedFeatures, LifestyleRisk};
pub use encoding::{FeatureRow, FeatureScaling};
pub use profile::UserAttributes;
