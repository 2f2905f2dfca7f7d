mod envelope;

pub use envelope::{Appearance, Envelope, FontResource, LocalizationTable};
pub(crate) use envelope::RawEnvelope;

use crate::decoder::Decoder;
use crate::error::DecodeError;
use crate::node::{Node, NodeId, NodeKind};
use ahash::AHashMap;
use std::str::FromStr;

/// A fully decoded and resolved document.
///
/// Immutable once built; the renderer only ever reads from it.
#[derive(Debug, Clone)]
pub struct Experience {
    pub id: String,
    pub name: Option<String>,
    pub revision_id: Option<String>,
    pub appearance: Appearance,
    pub fonts: Vec<FontResource>,
    pub initial_screen_id: String,
    localization: LocalizationTable,
    roots: Vec<NodeId>,
    nodes: AHashMap<NodeId, Node>,
}

impl Experience {
    pub(crate) fn from_parts(
        envelope: Envelope,
        roots: Vec<NodeId>,
        nodes: AHashMap<NodeId, Node>,
    ) -> Self {
        let experience = Self {
            id: envelope.id,
            name: envelope.name,
            revision_id: envelope.revision_id,
            appearance: envelope.appearance,
            fonts: envelope.fonts,
            initial_screen_id: envelope.initial_screen_id,
            localization: envelope.localization,
            roots,
            nodes,
        };
        if experience.initial_screen().is_none() {
            tracing::warn!(
                experience = %experience.id,
                screen = %experience.initial_screen_id,
                "initial screen does not resolve to a screen"
            );
        }
        experience
    }

    /// Decodes and resolves a document with the default decoder.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (experience, _report) = Decoder::default().decode(bytes)?.resolve();
        Ok(experience)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Top-level nodes in document order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.roots.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn screens(&self) -> impl Iterator<Item = &Node> {
        self.roots()
            .filter(|node| matches!(node.kind, NodeKind::Screen(_)))
    }

    pub fn initial_screen(&self) -> Option<&Node> {
        self.node(&self.initial_screen_id)
            .filter(|node| matches!(node.kind, NodeKind::Screen(_)))
    }

    pub fn children_of(&self, id: &str) -> impl Iterator<Item = &Node> {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.children.iter())
            .filter_map(|child| self.nodes.get(child))
    }

    pub fn parent_of(&self, id: &str) -> Option<&Node> {
        self.node(id)?
            .parent
            .as_ref()
            .and_then(|parent| self.nodes.get(parent))
    }

    /// Depth-first descendants of a node in authoring order, excluding the node itself.
    pub fn descendants(&self, id: &str) -> Vec<&Node> {
        let mut result = Vec::new();
        let mut stack: Vec<&Node> = self.children_of(id).collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            result.push(node);
            // Guard against malformed documents that make a node its own ancestor.
            if result.len() > self.nodes.len() {
                break;
            }
            stack.extend(self.children_of(&node.id).collect::<Vec<_>>().into_iter().rev());
        }
        result
    }

    pub fn localization(&self) -> &LocalizationTable {
        &self.localization
    }

    /// Looks up a localized string, falling back from `en-US` to `en` and then
    /// to any regional variant of the same language.
    pub fn localized(&self, key: &str, locale: &str) -> Option<&str> {
        if let Some(text) = self.localization.get(locale).and_then(|t| t.get(key)) {
            return Some(text.as_str());
        }

        let language = language_of(locale);
        if let Some(text) = self.localization.get(language).and_then(|t| t.get(key)) {
            return Some(text.as_str());
        }

        let mut variants: Vec<&String> = self
            .localization
            .keys()
            .filter(|candidate| language_of(candidate).eq_ignore_ascii_case(language))
            .collect();
        variants.sort();
        variants
            .into_iter()
            .find_map(|candidate| {
                self.localization
                    .get(candidate.as_str())
                    .and_then(|table| table.get(key))
            })
            .map(String::as_str)
    }

    pub fn localized_or_key<'a>(&'a self, key: &'a str, locale: &str) -> &'a str {
        self.localized(key, locale).unwrap_or(key)
    }
}

impl FromStr for Experience {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

fn language_of(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}
