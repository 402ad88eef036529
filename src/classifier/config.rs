//! Classifier Configuration
//!
//! Hyperparameters controlling when the tree stops growing, and json IO shared
//! by the configuration and the fitted classifier.
use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MIN_SAMPLES_LEAF, DEFAULT_MIN_SAMPLES_SPLIT};
use crate::errors::TreeError;
use crate::utils::{items_to_strings, validate_min_parameter};
use hashbrown::HashMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Names of every hyperparameter accepted by `TreeConfig::set_param`.
pub const PARAMETER_NAMES: [&str; 3] = ["max_depth", "min_samples_split", "min_samples_leaf"];

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
fn default_min_samples_split() -> usize {
    DEFAULT_MIN_SAMPLES_SPLIT
}
fn default_min_samples_leaf() -> usize {
    DEFAULT_MIN_SAMPLES_LEAF
}

/// Configuration for the `DecisionTreeClassifier`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Nodes at this depth become leaves. Zero grows a single leaf.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Nodes with fewer rows than this become leaves. At least 1.
    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,
    /// Splits leaving fewer rows than this on either side are rejected. At least 1.
    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            min_samples_leaf: DEFAULT_MIN_SAMPLES_LEAF,
        }
    }
}

impl TreeConfig {
    /// Check every hyperparameter is within its range.
    pub fn validate(&self) -> Result<(), TreeError> {
        validate_min_parameter(self.min_samples_split as i64, 1, "min_samples_split")?;
        validate_min_parameter(self.min_samples_leaf as i64, 1, "min_samples_leaf")?;
        Ok(())
    }

    /// Set a hyperparameter by name.
    ///
    /// The configuration is left untouched if the name is unknown or the
    /// value is out of range.
    ///
    /// * `name` - One of `PARAMETER_NAMES`.
    /// * `value` - New value for the hyperparameter.
    pub fn set_param(&mut self, name: &str, value: i64) -> Result<(), TreeError> {
        let min = match name {
            "max_depth" => 0,
            "min_samples_split" | "min_samples_leaf" => 1,
            _ => {
                return Err(TreeError::UnknownParameter(format!(
                    "{}, valid parameters are: {}",
                    name,
                    items_to_strings(PARAMETER_NAMES.to_vec())
                )))
            }
        };
        validate_min_parameter(value, min, name)?;
        let value = value as usize;
        match name {
            "max_depth" => self.max_depth = value,
            "min_samples_split" => self.min_samples_split = value,
            _ => self.min_samples_leaf = value,
        }
        Ok(())
    }

    /// Get every hyperparameter by name.
    pub fn get_params(&self) -> HashMap<String, usize> {
        HashMap::from([
            ("max_depth".to_string(), self.max_depth),
            ("min_samples_split".to_string(), self.min_samples_split),
            ("min_samples_leaf".to_string(), self.min_samples_leaf),
        ])
    }
}

/// IO
pub trait ModelIO: Serialize + DeserializeOwned + Sized {
    /// Save an object as a json object to a file.
    ///
    /// * `path` - Path to save the object.
    fn save_model<P: AsRef<Path>>(&self, path: P) -> Result<(), TreeError> {
        fs::write(path, self.json_dump()?).map_err(|e| TreeError::UnableToWrite(e.to_string()))
    }

    /// Dump an object as a json string.
    fn json_dump(&self) -> Result<String, TreeError> {
        serde_json::to_string(self).map_err(|e| TreeError::UnableToWrite(e.to_string()))
    }

    /// Load an object from a json string.
    ///
    /// * `json_str` - String object, which can be deserialized from json.
    fn from_json(json_str: &str) -> Result<Self, TreeError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| TreeError::UnableToRead(e.to_string()))
    }

    /// Load an object from a path to a json file.
    ///
    /// * `path` - Path to load the object from.
    fn load_model<P: AsRef<Path>>(path: P) -> Result<Self, TreeError> {
        let json_str = fs::read_to_string(path).map_err(|e| TreeError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ModelIO for TreeConfig {}
