//! Dataset loaders.

mod qulac;

pub use qulac::{DatasetError, QulacDataset};
