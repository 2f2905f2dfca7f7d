//! # Experience Engine - Document Decoding and Template Evaluation
//!
//! **experience-engine** turns server-authored UI documents ("experiences") into an
//! immutable node graph and evaluates the `{{ }}` templates and data queries those
//! documents carry at render time.
//!
//! ## Core Workflow
//!
//! 1.  **Decode**: `Decoder` walks the document JSON once, dispatching each node on its
//!     `__typeName` tag. ID references are not looked up yet; they are recorded as
//!     `PendingRelationship`s.
//! 2.  **Resolve**: `DecodeOutput::resolve` wires every reference over the finished node
//!     index (children and parent, segue targets, carousel and page control) and returns
//!     the `Experience` plus a `ResolutionReport` of anything left dangling.
//! 3.  **Evaluate**: at render time, build a `DataContext` from the fetched data, the URL
//!     parameters and the user info, then evaluate text templates, conditions and
//!     collection queries against it.
//!
//! ## Quick Start
//!
//! ```rust
//! use experience::prelude::{DecodeError, Decoder, NodeKind, RuntimeData};
//! use serde_json::json;
//!
//! let document = r#"{
//!     "id": "welcome",
//!     "initialScreenID": "s1",
//!     "nodes": [{
//!         "__typeName": "Screen", "id": "s1",
//!         "children": [{ "__typeName": "Text", "id": "t1", "text": "Hello {{ user.name }}" }]
//!     }]
//! }"#;
//!
//! let (experience, report) = Decoder::default().decode(document.as_bytes())?.resolve();
//! assert!(report.is_complete());
//!
//! let runtime = RuntimeData::new(json!({})).with_user_info("name", json!("Ada"));
//! let text = match &experience.node("t1").unwrap().kind {
//!     NodeKind::Text(text) => text.interpolated(&runtime.context()),
//!     _ => None,
//! };
//! assert_eq!(text.as_deref(), Some("Hello Ada"));
//! # Ok::<(), DecodeError>(())
//! ```

pub mod context;
pub mod data;
pub mod decoder;
pub mod error;
pub mod experience;
pub mod node;
pub mod prelude;
pub mod query;
pub mod resolver;
pub mod template;
