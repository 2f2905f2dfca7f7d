use crate::error::DecodeError;
use crate::experience::{Envelope, Experience, RawEnvelope};
use crate::node::{Action, Node, NodeId, RelationField, SegueStyle};
use crate::resolver::{self, ResolutionReport};
use ahash::{AHashMap, AHashSet};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::hash_map::Entry;

pub mod parsing;
pub mod pending;

use parsing::*;
pub use parsing::NodeDecoder;
pub use pending::*;

/// The JSON field carrying a node's type discriminator.
pub const TYPE_KEY: &str = "__typeName";

/// Tags of node kinds that belong to other host platforms. They decode to
/// "absent" and are dropped from their parent's children.
pub const DEFAULT_IGNORED_TYPES: [&str; 3] = ["AppBar", "AppBarMenuItem", "MenuItem"];

/// Output of the decode phase: every node with its inline data set, plus the
/// ID references still waiting to be wired.
pub struct DecodeOutput {
    pub envelope: Envelope,
    /// Top-level nodes in document order.
    pub roots: Vec<NodeId>,
    pub index: AHashMap<NodeId, Node>,
    pub pending: Vec<PendingRelationship>,
}

impl DecodeOutput {
    /// Runs the resolve phase, consuming the pending relationships.
    pub fn resolve(self) -> (Experience, ResolutionReport) {
        let DecodeOutput {
            envelope,
            roots,
            mut index,
            pending,
        } = self;
        let report = resolver::resolve(&mut index, pending);
        (Experience::from_parts(envelope, roots, index), report)
    }
}

pub struct Decoder {
    registry: AHashMap<String, Box<dyn NodeDecoder>>,
    ignored: AHashSet<String>,
    index: AHashMap<NodeId, Node>,
    pending: Vec<PendingRelationship>,
}

pub struct DecoderBuilder {
    registry: AHashMap<String, Box<dyn NodeDecoder>>,
    ignored: AHashSet<String>,
}

impl DecoderBuilder {
    pub fn new() -> Self {
        let mut registry: AHashMap<String, Box<dyn NodeDecoder>> = AHashMap::new();
        register_default_decoders(&mut registry);
        Self {
            registry,
            ignored: DEFAULT_IGNORED_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Decodes nodes tagged `user_type_name` as the built-in `known_type_name`.
    pub fn with_type_mapping(mut self, user_type_name: &str, known_type_name: &str) -> Self {
        if let Some(decoder) = create_decoder_by_name(known_type_name) {
            self.registry.insert(user_type_name.to_string(), decoder);
        }
        self
    }

    pub fn with_custom_decoder(mut self, decoder: Box<dyn NodeDecoder>) -> Self {
        self.registry.insert(decoder.type_name().to_string(), decoder);
        self
    }

    pub fn with_ignored_type(mut self, type_name: &str) -> Self {
        self.ignored.insert(type_name.to_string());
        self
    }

    pub fn without_ignored_type(mut self, type_name: &str) -> Self {
        self.ignored.remove(type_name);
        self
    }

    pub fn build(self) -> Decoder {
        Decoder {
            registry: self.registry,
            ignored: self.ignored,
            index: AHashMap::new(),
            pending: Vec::new(),
        }
    }
}

impl Default for DecoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fields shared by every node kind that are read through serde.
#[derive(Deserialize)]
struct BaseFields {
    name: Option<String>,
    action: Option<RawAction>,
}

#[derive(Deserialize)]
#[serde(tag = "__typeName")]
enum RawAction {
    PerformSegue {
        #[serde(rename = "screenID")]
        screen_id: Option<String>,
        #[serde(default)]
        style: SegueStyle,
    },
    #[serde(rename = "OpenURL")]
    OpenUrl { url: String },
    PresentWebsite { url: String },
    Close,
    Custom { identifier: Option<String> },
}

impl Decoder {
    pub fn builder() -> DecoderBuilder {
        DecoderBuilder::new()
    }

    /// Decodes raw document bytes. Fails as a whole on the first fatal error.
    pub fn decode(self, bytes: &[u8]) -> Result<DecodeOutput, DecodeError> {
        let raw: RawEnvelope = serde_json::from_slice(bytes).map_err(|e| {
            if e.is_data() {
                DecodeError::InvalidEnvelope(e.to_string())
            } else {
                DecodeError::Json(e.to_string())
            }
        })?;
        self.decode_envelope(raw)
    }

    /// Decodes an already parsed JSON document.
    pub fn decode_value(self, value: JsonValue) -> Result<DecodeOutput, DecodeError> {
        let raw: RawEnvelope = serde_json::from_value(value)
            .map_err(|e| DecodeError::InvalidEnvelope(e.to_string()))?;
        self.decode_envelope(raw)
    }

    fn decode_envelope(mut self, raw: RawEnvelope) -> Result<DecodeOutput, DecodeError> {
        let (envelope, nodes) = raw.into_parts();

        let mut roots = Vec::with_capacity(nodes.len());
        for value in &nodes {
            if let Some(id) = self.decode_node(value)? {
                roots.push(id);
            }
        }

        tracing::debug!(
            experience = %envelope.id,
            nodes = self.index.len(),
            relationships = self.pending.len(),
            "decoded experience"
        );

        Ok(DecodeOutput {
            envelope,
            roots,
            index: self.index,
            pending: self.pending,
        })
    }

    /// Decodes one node object and, recursively, its inline children and mask.
    /// Returns `None` for nodes whose tag is ignored on this client.
    fn decode_node(&mut self, value: &JsonValue) -> Result<Option<NodeId>, DecodeError> {
        if !value.is_object() {
            return Err(DecodeError::NotAnObject {
                context: "a node".to_string(),
            });
        }

        let raw_id = value.get("id").and_then(JsonValue::as_str);
        let type_name = match value.get(TYPE_KEY) {
            Some(JsonValue::String(tag)) => tag.as_str(),
            _ => {
                return Err(DecodeError::MissingField {
                    node_id: raw_id.unwrap_or("unknown").to_string(),
                    field: TYPE_KEY.to_string(),
                });
            }
        };

        if self.ignored.contains(type_name) {
            tracing::debug!(type_name, id = raw_id, "dropping node of ignored type");
            return Ok(None);
        }

        let node_id = raw_id
            .ok_or_else(|| DecodeError::MissingField {
                node_id: "unknown".to_string(),
                field: "id".to_string(),
            })?
            .to_string();

        let decoder = self
            .registry
            .get(type_name)
            .ok_or_else(|| DecodeError::InvalidNodeType {
                node_id: node_id.clone(),
                type_name: type_name.to_string(),
            })?;
        let kind = decoder.decode(&node_id, value, &mut self.pending)?;

        let base: BaseFields = decode_payload(&node_id, type_name, value)?;
        let mut node = Node::new(node_id.clone(), kind);
        node.name = base.name;
        node.action = base
            .action
            .map(|action| self.convert_action(&node_id, action));

        if let Some(mask) = value.get("mask").filter(|m| !m.is_null()) {
            node.mask = self.decode_node(mask)?;
        }

        if let Some(children) = value.get("children").filter(|c| !c.is_null()) {
            let entries = children.as_array().ok_or_else(|| DecodeError::InvalidField {
                node_id: node_id.clone(),
                type_name: type_name.to_string(),
                message: "'children' must be an array".to_string(),
            })?;

            let mut child_ids = Vec::with_capacity(entries.len());
            for entry in entries {
                match entry {
                    JsonValue::String(id) => child_ids.push(id.clone()),
                    JsonValue::Object(_) => {
                        if let Some(id) = self.decode_node(entry)? {
                            child_ids.push(id);
                        }
                    }
                    other => {
                        return Err(DecodeError::InvalidField {
                            node_id: node_id.clone(),
                            type_name: type_name.to_string(),
                            message: format!("unexpected child entry {}", other),
                        });
                    }
                }
            }

            if !child_ids.is_empty() {
                self.pending.push(
                    PendingRelationship::one_to_many(
                        node_id.clone(),
                        RelationField::Children,
                        child_ids,
                    )
                    .with_inverse(RelationField::Parent),
                );
            }
        }

        match self.index.entry(node_id.clone()) {
            Entry::Occupied(_) => Err(DecodeError::DuplicateNodeId(node_id)),
            Entry::Vacant(slot) => {
                slot.insert(node);
                Ok(Some(node_id))
            }
        }
    }

    fn convert_action(&mut self, node_id: &str, action: RawAction) -> Action {
        match action {
            RawAction::PerformSegue { screen_id, style } => {
                if let Some(screen_id) = screen_id {
                    self.pending.push(
                        PendingRelationship::many_to_one(
                            node_id,
                            RelationField::ActionScreen,
                            screen_id,
                        )
                        .with_inverse(RelationField::SegueSources),
                    );
                }
                Action::PerformSegue {
                    screen: None,
                    style,
                }
            }
            RawAction::OpenUrl { url } => Action::OpenUrl { url },
            RawAction::PresentWebsite { url } => Action::PresentWebsite { url },
            RawAction::Close => Action::Close,
            RawAction::Custom { identifier } => Action::Custom { identifier },
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        DecoderBuilder::new().build()
    }
}
