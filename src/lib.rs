//! Insurance premium prediction
//!
//! Derives risk features from a person's attributes and classifies them into
//! a premium category with a pre-trained network, served over HTTP.

pub mod api;
pub mod client;
pub mod features;
pub mod model;
pub mod predict;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Occupation categories accepted by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Retired,
    Freelancer,
    GovernmentJob,
    Student,
    Unemployed,
    BusinessOwner,
    PrivateJob,
}

impl Occupation {
    /// All occupations, in one-hot encoding order
    pub const ALL: [Occupation; 7] = [
        Occupation::Retired,
        Occupation::Freelancer,
        Occupation::GovernmentJob,
        Occupation::Student,
        Occupation::Unemployed,
        Occupation::BusinessOwner,
        Occupation::PrivateJob,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Occupation::Retired => "retired",
            Occupation::Freelancer => "freelancer",
            Occupation::GovernmentJob => "government_job",
            Occupation::Student => "student",
            Occupation::Unemployed => "unemployed",
            Occupation::BusinessOwner => "business_owner",
            Occupation::PrivateJob => "private_job",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Occupation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Occupation::ALL
            .iter()
            .copied()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Occupation::ALL.iter().map(|o| o.as_str()).collect();
                format!("Unknown occupation: {}. Use one of: {}", s, names.join(", "))
            })
    }
}

/// Predicted premium category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PremiumCategory {
    Low,
    Average,
    High,
}

impl PremiumCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PremiumCategory::Low => "Low",
            PremiumCategory::Average => "Average",
            PremiumCategory::High => "High",
        }
    }

    /// Short explanation shown alongside the category
    pub fn explanation(&self) -> &'static str {
        match self {
            PremiumCategory::Low => "Low premium – lower risk profile",
            PremiumCategory::Average => "Average premium – moderate risk",
            PremiumCategory::High => "High premium – higher risk profile",
        }
    }
}

impl fmt::Display for PremiumCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PremiumCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Low" => Ok(PremiumCategory::Low),
            "Average" => Ok(PremiumCategory::Average),
            "High" => Ok(PremiumCategory::High),
            _ => Err(format!("Unknown premium category: {}", s)),
        }
    }
}

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum PremiumError {
    #[error("Invalid input: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("{0}")]
    Connection(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, PremiumError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub features: features::FeatureScaling,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Record path without extension
    pub path: String,
    pub hidden_dims: Vec<usize>,
    /// Category for each output class index
    pub labels: Vec<PremiumCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            model: ModelConfig {
                path: "model/premium_model".to_string(),
                hidden_dims: vec![32, 16],
                labels: vec![
                    PremiumCategory::Average,
                    PremiumCategory::High,
                    PremiumCategory::Low,
                ],
            },
            features: features::FeatureScaling::default(),
            client: ClientConfig {
                url: "http://127.0.0.1:8000/predict_insurance_premium/".to_string(),
                timeout_secs: 10,
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PremiumError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| PremiumError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PremiumError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
