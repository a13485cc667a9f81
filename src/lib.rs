// Exact principal component analysis (PCA)

#![doc = include_str!("../README.md")]

pub mod error;
pub mod pca;
pub mod transform;

pub use error::PcaError;
pub use pca::{Pca, Projection};
pub use transform::Transformer;
