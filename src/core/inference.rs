//! Model gateway for the two pre-trained classifiers.
//!
//! Both artifacts are JSON-serialized feed-forward networks: a stack of
//! dense layers with an activation tag per layer. The gateway deserializes
//! each file once at startup, checks the layer shapes, and afterwards
//! treats the coefficients as opaque. Inference is a pure function over the
//! loaded state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::models::patient::FEATURE_COUNT;
use crate::models::prediction::{Outcome, CLASS_COUNT};

/// Supported artifact schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Decision threshold applied to the binary model's sigmoid output.
const BINARY_THRESHOLD: f64 = 0.5;

// ============================================================================
// Errors
// ============================================================================

/// Failure to load a classifier artifact at startup. Fatal: the application
/// cannot start without both models.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported artifact schema version {found} (expected {SCHEMA_VERSION})")]
    UnsupportedVersion { found: u32 },

    #[error("expected a {expected:?} model, found {found:?}")]
    WrongKind { expected: ModelKind, found: ModelKind },

    #[error("malformed model artifact: {0}")]
    Malformed(String),
}

/// Feature vector with the wrong arity. Should not occur under normal UI
/// flow, but is guarded regardless.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("feature vector has wrong arity: expected {expected}, got {got}")]
pub struct InferenceError {
    pub expected: usize,
    pub got: usize,
}

// ============================================================================
// Artifact format
// ============================================================================

/// Which classifier an artifact holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Binary,
    Multiclass,
}

/// Per-layer activation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Sigmoid,
    Softmax,
}

/// One dense layer: `weights[unit][input]` plus a bias per unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    pub activation: Activation,
}

impl DenseLayer {
    fn units(&self) -> usize {
        self.weights.len()
    }
}

/// Serialized classifier blob as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub schema_version: u32,
    pub kind: ModelKind,
    pub num_features: usize,
    pub layers: Vec<DenseLayer>,
}

// ============================================================================
// Classifier
// ============================================================================

/// A shape-checked feed-forward classifier ready for inference.
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    artifact: ClassifierArtifact,
}

impl MlpClassifier {
    /// Validate an in-memory artifact and wrap it for inference.
    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self, ArtifactError> {
        if artifact.schema_version != SCHEMA_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: artifact.schema_version,
            });
        }
        if artifact.layers.is_empty() {
            return Err(ArtifactError::Malformed("artifact has no layers".into()));
        }

        let mut input_dim = artifact.num_features;
        for (idx, layer) in artifact.layers.iter().enumerate() {
            if layer.weights.is_empty() {
                return Err(ArtifactError::Malformed(format!(
                    "layer {idx} has no units"
                )));
            }
            if layer.bias.len() != layer.units() {
                return Err(ArtifactError::Malformed(format!(
                    "layer {idx} has {} bias terms for {} units",
                    layer.bias.len(),
                    layer.units()
                )));
            }
            for (unit, row) in layer.weights.iter().enumerate() {
                if row.len() != input_dim {
                    return Err(ArtifactError::Malformed(format!(
                        "layer {idx} unit {unit} expects {} inputs, got {}",
                        input_dim,
                        row.len()
                    )));
                }
            }
            input_dim = layer.units();
        }

        let output = artifact
            .layers
            .last()
            .expect("layers checked non-empty above");
        match artifact.kind {
            ModelKind::Binary => {
                if output.units() != 1 || output.activation != Activation::Sigmoid {
                    return Err(ArtifactError::Malformed(
                        "binary artifact must end in a single sigmoid unit".into(),
                    ));
                }
            }
            ModelKind::Multiclass => {
                if output.units() != CLASS_COUNT || output.activation != Activation::Softmax {
                    return Err(ArtifactError::Malformed(format!(
                        "multiclass artifact must end in {CLASS_COUNT} softmax units"
                    )));
                }
            }
        }

        Ok(Self { artifact })
    }

    /// Deserialize and validate an artifact file.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ClassifierArtifact =
            serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_artifact(artifact)
    }

    /// Number of input features expected by the network.
    #[must_use]
    pub fn num_features(&self) -> usize {
        self.artifact.num_features
    }

    #[must_use]
    pub fn kind(&self) -> ModelKind {
        self.artifact.kind
    }

    /// Run the forward pass over all layers.
    fn forward(&self, features: &[f64]) -> Vec<f64> {
        let mut activations = features.to_vec();
        for layer in &self.artifact.layers {
            let mut next = Vec::with_capacity(layer.units());
            for (row, bias) in layer.weights.iter().zip(&layer.bias) {
                let sum: f64 = row.iter().zip(&activations).map(|(w, x)| w * x).sum();
                next.push(bias + sum);
            }
            match layer.activation {
                Activation::Relu => {
                    for val in &mut next {
                        *val = val.max(0.0);
                    }
                }
                Activation::Sigmoid => {
                    for val in &mut next {
                        *val = sigmoid(*val);
                    }
                }
                Activation::Softmax => softmax_inplace(&mut next),
            }
            activations = next;
        }
        activations
    }
}

// ============================================================================
// Gateway
// ============================================================================

/// The two loaded classifiers behind a single prediction interface.
#[derive(Debug, Clone)]
pub struct ModelGateway {
    binary: MlpClassifier,
    multiclass: MlpClassifier,
}

impl ModelGateway {
    /// Load both artifacts from disk. Any failure here aborts startup.
    #[instrument]
    pub fn load(binary_path: &Path, multiclass_path: &Path) -> Result<Self, ArtifactError> {
        let binary = MlpClassifier::load(binary_path)?;
        let multiclass = MlpClassifier::load(multiclass_path)?;
        let gateway = Self::from_parts(binary, multiclass)?;
        info!("classifier artifacts loaded and shape-checked");
        Ok(gateway)
    }

    /// Assemble a gateway from already-validated classifiers.
    pub fn from_parts(
        binary: MlpClassifier,
        multiclass: MlpClassifier,
    ) -> Result<Self, ArtifactError> {
        if binary.kind() != ModelKind::Binary {
            return Err(ArtifactError::WrongKind {
                expected: ModelKind::Binary,
                found: binary.kind(),
            });
        }
        if multiclass.kind() != ModelKind::Multiclass {
            return Err(ArtifactError::WrongKind {
                expected: ModelKind::Multiclass,
                found: multiclass.kind(),
            });
        }
        for model in [&binary, &multiclass] {
            if model.num_features() != FEATURE_COUNT {
                return Err(ArtifactError::Malformed(format!(
                    "classifier expects {} features, application supplies {}",
                    model.num_features(),
                    FEATURE_COUNT
                )));
            }
        }
        Ok(Self { binary, multiclass })
    }

    /// Binary disease/no-disease decision.
    pub fn predict(&self, features: &[f64]) -> Result<Outcome, InferenceError> {
        self.check_arity(features)?;
        let output = self.binary.forward(features);
        let probability = output[0];
        Ok(if probability >= BINARY_THRESHOLD {
            Outcome::Positive
        } else {
            Outcome::Negative
        })
    }

    /// Probability distribution over the five disease categories.
    ///
    /// The softmax output layer guarantees the entries sum to 1.0 up to
    /// floating-point epsilon.
    pub fn predict_proba(&self, features: &[f64]) -> Result<[f64; CLASS_COUNT], InferenceError> {
        self.check_arity(features)?;
        let output = self.multiclass.forward(features);
        let mut probabilities = [0.0; CLASS_COUNT];
        probabilities.copy_from_slice(&output);
        Ok(probabilities)
    }

    fn check_arity(&self, features: &[f64]) -> Result<(), InferenceError> {
        if features.len() != FEATURE_COUNT {
            return Err(InferenceError {
                expected: FEATURE_COUNT,
                got: features.len(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Sigmoid function: 1 / (1 + exp(-x))
#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Softmax in-place over a slice, with max-subtraction for stability.
fn softmax_inplace(values: &mut [f64]) {
    if values.is_empty() {
        return;
    }

    let max_val = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut sum = 0.0f64;
    for val in values.iter_mut() {
        *val = (*val - max_val).exp();
        sum += *val;
    }

    if sum > 0.0 {
        for val in values.iter_mut() {
            *val /= sum;
        }
    }
}
