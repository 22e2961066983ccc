use std::fmt;

/// Failure while building a field map.
///
/// The mapping rules themselves never fail; only encoding a field value
/// into `serde_json::Value` can (e.g. a map keyed by non-strings).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{record}.{field}: {source}")]
    Value {
        record: String,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn value(record: impl Into<String>, field: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Value {
            record: record.into(),
            field: field.into(),
            source,
        }
    }

    /// Add context to the error.
    ///
    /// Produces: `"context: original message"` for `Custom`; for `Value`
    /// the context is prepended to the record name.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        match self {
            Error::Value { record, field, source } => Error::Value {
                record: format!("{ctx}: {record}"),
                field,
                source,
            },
            Error::Custom(msg) => Error::Custom(format!("{ctx}: {msg}")),
        }
    }
}
