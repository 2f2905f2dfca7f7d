//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use experience::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let bytes = std::fs::read("path/to/experience.json")?;
//! let experience = Experience::from_slice(&bytes)?;
//!
//! let runtime = RuntimeData::from_file("path/to/data.json")?;
//! let ctx = runtime.context();
//! println!("{:?}", evaluate("Hi {{ user.firstName }}", &ctx));
//! # let _ = experience;
//! # Ok(())
//! # }
//! ```

// Decoding and resolution
pub use crate::decoder::{DecodeOutput, Decoder, DecoderBuilder, NodeDecoder, PendingRelationship};
pub use crate::experience::{Appearance, Experience, FontResource};
pub use crate::resolver::{ResolutionReport, UnresolvedReference};

// Node model
pub use crate::node::{Action, Node, NodeId, NodeKind, RelationField};

// Evaluation
pub use crate::context::{DataContext, Namespace};
pub use crate::data::RuntimeData;
pub use crate::query::{Condition, DataRequest, Limit, Predicate, SortDescriptor, query_collection};
pub use crate::template::{Argument, Helper, HelperRegistry, Template, evaluate, try_evaluate};

// Error types
pub use crate::error::{ConversionError, DecodeError, EvaluationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
