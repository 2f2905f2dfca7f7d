use ahash::AHashMap;
use chrono::FixedOffset;
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::fmt;

/// The three sources a path may read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Runtime data fetched for the current node.
    Data,
    /// Query parameters of the URL that opened the document.
    Url,
    /// Caller-supplied information about the user.
    User,
}

impl Namespace {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "data" => Some(Namespace::Data),
            "url" => Some(Namespace::Url),
            "user" => Some(Namespace::User),
            _ => None,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Data => f.write_str("data"),
            Namespace::Url => f.write_str("url"),
            Namespace::User => f.write_str("user"),
        }
    }
}

/// Everything an expression or condition may read, passed explicitly to
/// each evaluation instead of living in shared global state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataContext<'a> {
    data: Option<&'a JsonValue>,
    url_parameters: Option<&'a AHashMap<String, String>>,
    user_info: Option<&'a AHashMap<String, JsonValue>>,
    utc_offset: Option<FixedOffset>,
}

impl<'a> DataContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: &'a JsonValue) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_url_parameters(mut self, parameters: &'a AHashMap<String, String>) -> Self {
        self.url_parameters = Some(parameters);
        self
    }

    pub fn with_user_info(mut self, user_info: &'a AHashMap<String, JsonValue>) -> Self {
        self.user_info = Some(user_info);
        self
    }

    /// Fixes the time zone dates are rendered in. Defaults to the local zone.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = Some(offset);
        self
    }

    pub fn data(&self) -> Option<&'a JsonValue> {
        self.data
    }

    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset
    }

    /// Walks `keys` into the given namespace. Every intermediate value must be an object.
    ///
    /// With no keys, `data` resolves to the data value itself; `url` and `user` do not resolve.
    pub fn resolve<S: AsRef<str>>(&self, namespace: Namespace, keys: &[S]) -> Option<Cow<'a, JsonValue>> {
        match namespace {
            Namespace::Data => walk(self.data?, keys).map(Cow::Borrowed),
            Namespace::Url => match keys {
                [key] => self
                    .url_parameters?
                    .get(key.as_ref())
                    .map(|value| Cow::Owned(JsonValue::String(value.clone()))),
                _ => None,
            },
            Namespace::User => {
                let (first, rest) = keys.split_first()?;
                let value = self.user_info?.get(first.as_ref())?;
                walk(value, rest).map(Cow::Borrowed)
            }
        }
    }

    /// Resolves a dotted path such as `data.user.name`.
    ///
    /// A path that does not start with a namespace is read relative to `data`,
    /// so `name` and `data.name` are equivalent.
    pub fn resolve_path(&self, path: &str) -> Option<Cow<'a, JsonValue>> {
        let segments: Vec<&str> = path.trim().split('.').collect();
        match segments.split_first() {
            Some((first, rest)) => match Namespace::parse(first) {
                Some(namespace) => self.resolve(namespace, rest),
                None => self.resolve(Namespace::Data, &segments),
            },
            None => None,
        }
    }
}

fn walk<'v, S: AsRef<str>>(mut value: &'v JsonValue, keys: &[S]) -> Option<&'v JsonValue> {
    for key in keys {
        value = value.as_object()?.get(key.as_ref())?;
    }
    Some(value)
}
