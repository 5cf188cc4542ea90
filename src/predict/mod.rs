//! Prediction and inference
//!
//! Load the trained model and classify user attributes.

pub mod inference;

pub use inference::{BurnClassifier, PremiumModel, Prediction, Predictor};
