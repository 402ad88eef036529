mod node;

// Modules
pub mod classifier;
pub mod constants;
pub mod data;
pub mod entropy;
pub mod errors;
pub mod splitter;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use classifier::config::{ModelIO, TreeConfig};
pub use classifier::{DecisionTreeClassifier, ImportanceMethod};
pub use data::Matrix;
pub use errors::TreeError;
pub use node::Node;
pub use tree::tree::Tree;
