//! Premium category classifier
//!
//! Architecture: Input(18) → Hidden(h1) → ReLU → [Hidden(h2) → ReLU ...]
//!                        → class_head(3)

use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::record::{FullPrecisionSettings, Recorder};
use burn::tensor::activation::{relu, softmax};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::features::FeatureRow;
use crate::PremiumError;

/// Number of premium categories
pub const NUM_CLASSES: usize = 3;

/// Configuration for the classifier
#[derive(Debug, Clone)]
pub struct PremiumNetConfig {
    /// Input dimension (encoded feature row)
    pub input_dim: usize,
    /// Hidden layer dimensions (e.g., [32, 16] for two layers)
    pub hidden_dims: Vec<usize>,
}

impl Default for PremiumNetConfig {
    fn default() -> Self {
        PremiumNetConfig {
            input_dim: FeatureRow::DIM,
            hidden_dims: vec![32, 16],
        }
    }
}

impl PremiumNetConfig {
    pub fn from_model_config(model: &crate::ModelConfig) -> Self {
        PremiumNetConfig {
            input_dim: FeatureRow::DIM,
            hidden_dims: model.hidden_dims.clone(),
        }
    }
}

/// A single hidden layer block: Linear → ReLU
#[derive(Module, Debug)]
pub struct HiddenBlock<B: Backend> {
    linear: Linear<B>,
}

impl<B: Backend> HiddenBlock<B> {
    pub fn new(device: &B::Device, in_dim: usize, out_dim: usize) -> Self {
        HiddenBlock {
            linear: LinearConfig::new(in_dim, out_dim).init(device),
        }
    }

    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        relu(self.linear.forward(x))
    }
}

/// Feed-forward classifier over encoded feature rows
#[derive(Module, Debug)]
pub struct PremiumNet<B: Backend> {
    hidden: Vec<HiddenBlock<B>>,
    class_head: Linear<B>,
}

impl<B: Backend> PremiumNet<B> {
    /// Create a new, untrained network
    pub fn new(device: &B::Device, config: PremiumNetConfig) -> Self {
        let mut hidden = Vec::with_capacity(config.hidden_dims.len());
        let mut in_dim = config.input_dim;
        for &out_dim in &config.hidden_dims {
            hidden.push(HiddenBlock::new(device, in_dim, out_dim));
            in_dim = out_dim;
        }

        PremiumNet {
            hidden,
            class_head: LinearConfig::new(in_dim, NUM_CLASSES).init(device),
        }
    }

    /// Forward pass
    ///
    /// # Arguments
    /// * `x` - Encoded feature rows [batch, input_dim]
    ///
    /// # Returns
    /// Class logits [batch, NUM_CLASSES]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.hidden.iter().fold(x, |x, block| block.forward(x));
        self.class_head.forward(x)
    }

    /// Class probabilities [batch, NUM_CLASSES]
    pub fn probabilities(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        softmax(self.forward(x), 1)
    }

    /// Save model to file
    pub fn save(&self, path: &str) -> crate::Result<()>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let recorder = burn::record::NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        recorder
            .record(self.clone().into_record(), path.into())
            .map_err(|e| PremiumError::Model(format!("Failed to save {}: {}", path, e)))
    }

    /// Load model from file
    pub fn load(device: &B::Device, path: &str, config: PremiumNetConfig) -> crate::Result<Self>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let recorder = burn::record::NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        let record = recorder
            .load(path.into(), device)
            .map_err(|e| PremiumError::Model(format!("Failed to load {}: {}", path, e)))?;

        let model = Self::new(device, config);
        Ok(model.load_record(record))
    }
}
