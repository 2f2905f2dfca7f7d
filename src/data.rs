//! Runtime data snapshots loaded from JSON.

mod model;

pub use model::RuntimeData;
