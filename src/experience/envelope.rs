use ahash::AHashMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Localized strings: locale identifier → string key → text.
pub type LocalizationTable = AHashMap<String, AHashMap<String, String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Appearance {
    Light,
    Dark,
    #[default]
    Auto,
}

/// A downloadable font used by the document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "__typeName")]
pub enum FontResource {
    #[serde(rename = "FontResource", rename_all = "camelCase")]
    Single {
        url: String,
        font_name: Option<String>,
    },
    #[serde(rename = "FontCollectionResource", rename_all = "camelCase")]
    Collection {
        url: String,
        #[serde(default)]
        font_names: Vec<String>,
    },
}

impl FontResource {
    pub fn url(&self) -> &str {
        match self {
            FontResource::Single { url, .. } | FontResource::Collection { url, .. } => url,
        }
    }
}

/// Document-level fields, everything except the node tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Envelope {
    pub id: String,
    pub name: Option<String>,
    pub revision_id: Option<String>,
    pub localization: LocalizationTable,
    pub fonts: Vec<FontResource>,
    pub initial_screen_id: String,
    pub appearance: Appearance,
}

/// Identifiers are strings in current documents and integers in older ones.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

/// The document JSON as it arrives, with nodes left undecoded.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEnvelope {
    id: RawId,
    name: Option<String>,
    #[serde(rename = "revisionID")]
    revision_id: Option<RawId>,
    #[serde(default)]
    nodes: Vec<JsonValue>,
    #[serde(default)]
    localization: LocalizationTable,
    #[serde(default)]
    fonts: Vec<FontResource>,
    #[serde(rename = "initialScreenID")]
    initial_screen_id: String,
    #[serde(default)]
    appearance: Appearance,
}

impl RawEnvelope {
    pub(crate) fn into_parts(self) -> (Envelope, Vec<JsonValue>) {
        let envelope = Envelope {
            id: self.id.into(),
            name: self.name,
            revision_id: self.revision_id.map(String::from),
            localization: self.localization,
            fonts: self.fonts,
            initial_screen_id: self.initial_screen_id,
            appearance: self.appearance,
        };
        (envelope, self.nodes)
    }
}
