//! Model inference for premium predictions

use std::sync::{Arc, Mutex};

use burn::backend::NdArray;
use burn::tensor::Tensor;
use serde::Serialize;

use crate::features::{DerivedFeatures, FeatureRow, FeatureScaling, UserAttributes};
use crate::model::premium_net::NUM_CLASSES;
use crate::model::{PremiumNet, PremiumNetConfig};
use crate::{Config, PremiumCategory, PremiumError, Result};

/// CPU backend used for serving
pub type ServeBackend = NdArray<f32>;

/// A trained classifier over feature rows.
///
/// Implementations are loaded once and shared read-only between requests.
pub trait PremiumModel: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> Result<PremiumCategory>;
}

/// Classifier backed by a saved [`PremiumNet`] record
pub struct BurnClassifier {
    net: Mutex<PremiumNet<ServeBackend>>,
    device: <ServeBackend as burn::tensor::backend::Backend>::Device,
    scaling: FeatureScaling,
    /// Category for each output index
    labels: Vec<PremiumCategory>,
}

impl BurnClassifier {
    pub fn new(
        net: PremiumNet<ServeBackend>,
        scaling: FeatureScaling,
        labels: Vec<PremiumCategory>,
    ) -> Result<Self> {
        if labels.len() != NUM_CLASSES {
            return Err(PremiumError::Config(format!(
                "model.labels must list {} categories, got {}",
                NUM_CLASSES,
                labels.len()
            )));
        }

        Ok(BurnClassifier {
            net: Mutex::new(net),
            device: Default::default(),
            scaling,
            labels,
        })
    }

    /// Load the classifier described by the config
    pub fn load(config: &Config) -> Result<Self> {
        let device = Default::default();
        let net_config = PremiumNetConfig::from_model_config(&config.model);

        log::info!("Loading model from {}", config.model.path);
        let net = PremiumNet::<ServeBackend>::load(&device, &config.model.path, net_config)?;

        Self::new(net, config.features, config.model.labels.clone())
    }

    /// Class probabilities for a row, in label order
    pub fn probabilities(&self, row: &FeatureRow) -> Result<Vec<f32>> {
        let encoded = row.encode(&self.scaling);
        let input = Tensor::<ServeBackend, 1>::from_floats(encoded.as_slice(), &self.device)
            .reshape([1, FeatureRow::DIM]);

        let net = self
            .net
            .lock()
            .map_err(|_| PremiumError::Inference("model lock poisoned".to_string()))?;

        net.probabilities(input)
            .to_data()
            .to_vec::<f32>()
            .map_err(|e| PremiumError::Inference(format!("{:?}", e)))
    }
}

impl PremiumModel for BurnClassifier {
    fn predict(&self, row: &FeatureRow) -> Result<PremiumCategory> {
        let probs = self.probabilities(row)?;

        let best = probs
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_finite())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .ok_or_else(|| PremiumError::Inference("model produced no finite scores".to_string()))?;

        self.labels
            .get(best)
            .copied()
            .ok_or_else(|| PremiumError::Inference(format!("class index {} has no label", best)))
    }
}

/// Model prediction output
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub category: PremiumCategory,
    pub features: DerivedFeatures,
}

/// Predictor for premium categories
#[derive(Clone)]
pub struct Predictor {
    model: Arc<dyn PremiumModel>,
}

impl Predictor {
    pub fn new(model: Arc<dyn PremiumModel>) -> Self {
        Predictor { model }
    }

    /// Load the trained model described by the config
    pub fn load(config: &Config) -> Result<Self> {
        Ok(Self::new(Arc::new(BurnClassifier::load(config)?)))
    }

    /// Validate, derive features, and classify a single person
    pub fn predict(&self, attrs: &UserAttributes) -> Result<Prediction> {
        attrs.validate().map_err(PremiumError::Validation)?;

        let features = DerivedFeatures::derive(attrs);
        let row = FeatureRow::new(features, attrs.occupation, attrs.income_lpa);
        log::debug!("Feature row: {:?}", row);

        let category = self.model.predict(&row)?;

        Ok(Prediction { category, features })
    }
}

/// Format a prediction for display
pub fn format_prediction(pred: &Prediction) -> String {
    format!(
        r#"
┌─────────────────────────────────────────────────┐
│  Premium category:  {}
├─────────────────────────────────────────────────┤
│  BMI:               {:.2}
│  Age group:         {}
│  Lifestyle risk:    {}
│  City tier:         {}
├─────────────────────────────────────────────────┤
│  {}
└─────────────────────────────────────────────────┘
"#,
        pred.category,
        pred.features.bmi,
        pred.features.age_group.as_str(),
        pred.features.lifestyle_risk.as_str(),
        pred.features.city_tier.number(),
        pred.category.explanation(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{AgeGroup, CityTier, LifestyleRisk};
    use crate::Occupation;

    /// Records every row it sees and answers with a fixed category
    struct StubModel {
        answer: PremiumCategory,
        seen: Mutex<Vec<FeatureRow>>,
    }

    impl StubModel {
        fn new(answer: PremiumCategory) -> Arc<Self> {
            Arc::new(StubModel {
                answer,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl PremiumModel for StubModel {
        fn predict(&self, row: &FeatureRow) -> Result<PremiumCategory> {
            self.seen.lock().unwrap().push(*row);
            Ok(self.answer)
        }
    }

    struct FailingModel;

    impl PremiumModel for FailingModel {
        fn predict(&self, _row: &FeatureRow) -> Result<PremiumCategory> {
            Err(PremiumError::Inference("boom".to_string()))
        }
    }

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
    fn test_predict_passes_derived_row() {
        let stub = StubModel::new(PremiumCategory::Low);
        let predictor = Predictor::new(stub.clone());

        let pred = predictor.predict(&sample()).unwrap();
        assert_eq!(pred.category, PremiumCategory::Low);

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let row = seen[0];
        assert_eq!(row.bmi, 24.22);
        assert_eq!(row.age_group, AgeGroup::Young);
        assert_eq!(row.lifestyle_risk, LifestyleRisk::LowRisk);
        assert_eq!(row.city_tier, CityTier::One);
        assert_eq!(row.occupation, Occupation::PrivateJob);
        assert_eq!(row.income_lpa, 6.5);
    }

    #[test]
    fn test_invalid_input_never_reaches_model() {
        let stub = StubModel::new(PremiumCategory::High);
        let predictor = Predictor::new(stub.clone());

        let mut attrs = sample();
        attrs.height = 50;

        let err = predictor.predict(&attrs).unwrap_err();
        assert!(matches!(err, PremiumError::Validation(ref f) if f[0].field == "height"));
        assert!(stub.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_model_failure_propagates() {
        let predictor = Predictor::new(Arc::new(FailingModel));
        let err = predictor.predict(&sample()).unwrap_err();
        assert!(matches!(err, PremiumError::Inference(_)));
    }

    #[test]
    fn test_burn_classifier_returns_configured_label() {
        let device = Default::default();
        let net = PremiumNet::<ServeBackend>::new(&device, PremiumNetConfig::default());
        let labels = vec![
            PremiumCategory::Average,
            PremiumCategory::High,
            PremiumCategory::Low,
        ];
        let classifier =
            BurnClassifier::new(net, FeatureScaling::default(), labels.clone()).unwrap();

        let row = FeatureRow::from_attributes(&sample());
        let probs = classifier.probabilities(&row).unwrap();
        assert_eq!(probs.len(), NUM_CLASSES);

        let category = classifier.predict(&row).unwrap();
        assert!(labels.contains(&category));

        // Deterministic for identical input
        assert_eq!(classifier.predict(&row).unwrap(), category);
    }

    #[test]
    fn test_burn_classifier_rejects_wrong_label_count() {
        let device = Default::default();
        let net = PremiumNet::<ServeBackend>::new(&device, PremiumNetConfig::default());
        let result = BurnClassifier::new(
            net,
            FeatureScaling::default(),
            vec![PremiumCategory::Low, PremiumCategory::High],
        );
        assert!(matches!(result, Err(PremiumError::Config(_))));
    }

    #[test]
    fn test_load_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("premium_model");

        let mut config = Config::default();
        config.model.path = path.to_str().unwrap().to_string();

        let device = Default::default();
        PremiumNet::<ServeBackend>::new(&device, PremiumNetConfig::from_model_config(&config.model))
            .save(&config.model.path)
            .unwrap();

        let predictor = Predictor::load(&config).unwrap();
        let pred = predictor.predict(&sample()).unwrap();
        assert_eq!(pred.features.bmi, 24.22);
    }

    #[test]
    fn test_format_prediction() {
        let pred = Prediction {
            category: PremiumCategory::Average,
            features: DerivedFeatures::derive(&sample()),
        };
        let text = format_prediction(&pred);
        assert!(text.contains("Average"));
        assert!(text.contains("24.22"));
        assert!(text.contains("moderate risk"));
    }
}
