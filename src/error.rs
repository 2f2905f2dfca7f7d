use thiserror::Error;

/// Errors that abort the decoding of a whole document.
///
/// No partially decoded document is ever handed out: any of these
/// surfaces to the caller as a single failure before a graph exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Failed to parse document JSON: {0}")]
    Json(String),

    #[error("Expected a JSON object for {context}")]
    NotAnObject { context: String },

    #[error("Node '{node_id}' has an unregistered or invalid type: '{type_name}'")]
    InvalidNodeType { node_id: String, type_name: String },

    #[error("Node '{node_id}' is missing required field '{field}'")]
    MissingField { node_id: String, field: String },

    #[error("Node '{node_id}' of type '{type_name}' has an invalid field: {message}")]
    InvalidField {
        node_id: String,
        type_name: String,
        message: String,
    },

    #[error("Node id '{0}' appears more than once in the document")]
    DuplicateNodeId(String),

    #[error("Invalid document envelope: {0}")]
    InvalidEnvelope(String),
}

/// Reasons a template expression could not produce a value.
///
/// The public evaluation API collapses all of these into "no value";
/// they exist for diagnostics and logging.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Syntax error at position {position}: {message}")]
    Syntax { message: String, position: usize },

    #[error("Unterminated string literal starting at position {0}")]
    UnterminatedString(usize),

    #[error("Unbalanced parentheses in expression")]
    UnbalancedParentheses,

    #[error("Unknown helper '{0}'")]
    UnknownHelper(String),

    #[error("Helper '{helper}' expects {expected} argument(s), but received {found}")]
    ArityMismatch {
        helper: String,
        expected: String,
        found: usize,
    },

    #[error("Unknown namespace in path '{0}' (expected data, url or user)")]
    UnknownNamespace(String),

    #[error("Path '{0}' could not be resolved")]
    UnresolvedPath(String),

    #[error("Path '{0}' resolved to a value that cannot be rendered as text")]
    NotRenderable(String),

    #[error("Helper '{helper}' expected an integer, but found '{found}'")]
    NotAnInteger { helper: String, found: String },

    #[error("Helper '{helper}' expected a number, but found '{found}'")]
    NotANumber { helper: String, found: String },

    #[error("'{0}' is not a valid ISO-8601 date")]
    InvalidDate(String),

    #[error("'{0}' is not a supported date pattern")]
    InvalidDatePattern(String),
}

/// Errors that can occur when loading a runtime data snapshot.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid runtime data: {0}")]
    Json(#[from] serde_json::Error),
}
