use crate::context::DataContext;
use crate::error::ConversionError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Everything templates and conditions can read, in one serializable value:
///
/// ```json
/// { "data": { ... }, "urlParameters": { "ref": "home" }, "userInfo": { "name": "Ada" } }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeData {
    #[serde(default)]
    pub data: Option<JsonValue>,
    #[serde(default)]
    pub url_parameters: AHashMap<String, String>,
    #[serde(default)]
    pub user_info: AHashMap<String, JsonValue>,
}

impl RuntimeData {
    pub fn new(data: JsonValue) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// Load a snapshot from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConversionError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConversionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        content.parse()
    }

    pub fn with_url_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_user_info(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.user_info.insert(key.into(), value);
        self
    }

    /// Borrows the snapshot as an evaluation context.
    pub fn context(&self) -> DataContext<'_> {
        let ctx = DataContext::new()
            .with_url_parameters(&self.url_parameters)
            .with_user_info(&self.user_info);
        match &self.data {
            Some(data) => ctx.with_data(data),
            None => ctx,
        }
    }
}

impl FromStr for RuntimeData {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}
