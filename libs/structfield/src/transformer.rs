use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Rewrites one field: takes its resolved name and value, returns the
/// output key and value.
///
/// An empty output key drops the field.
pub trait Transformer: Send + Sync {
    fn transform(&self, field: &str, value: Value) -> (String, Value);
}

/// Adapter turning a plain function or closure into a `Transformer`.
#[derive(Clone, Copy)]
pub struct TransformerFn<F>(pub F);

impl<F> Transformer for TransformerFn<F>
where
    F: Fn(&str, Value) -> (String, Value) + Send + Sync,
{
    fn transform(&self, field: &str, value: Value) -> (String, Value) {
        (self.0)(field, value)
    }
}

pub fn transformer_fn<F>(f: F) -> TransformerFn<F>
where
    F: Fn(&str, Value) -> (String, Value) + Send + Sync,
{
    TransformerFn(f)
}

impl<T: Transformer + ?Sized> Transformer for Arc<T> {
    fn transform(&self, field: &str, value: Value) -> (String, Value) {
        (**self).transform(field, value)
    }
}

impl<T: Transformer + ?Sized> Transformer for Box<T> {
    fn transform(&self, field: &str, value: Value) -> (String, Value) {
        (**self).transform(field, value)
    }
}

/// Transformers keyed by resolved field name.
///
/// Fields without an entry are copied unchanged. Cheap to clone; the
/// transformers themselves are shared.
#[derive(Clone, Default)]
pub struct Transformers {
    entries: HashMap<String, Arc<dyn Transformer>>,
}

impl Transformers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `transformer` for `field`, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, transformer: impl Transformer + 'static) {
        self.entries.insert(field.into(), Arc::new(transformer));
    }

    pub fn with(mut self, field: impl Into<String>, transformer: impl Transformer + 'static) -> Self {
        self.insert(field, transformer);
        self
    }

    pub fn get(&self, field: &str) -> Option<&dyn Transformer> {
        self.entries.get(field).map(|t| t.as_ref())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl fmt::Debug for Transformers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, Arc<dyn Transformer>)> for Transformers {
    fn from_iter<I: IntoIterator<Item = (K, Arc<dyn Transformer>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in transformers
// ---------------------------------------------------------------------------

/// Output the value unchanged under another key.
#[derive(Debug, Clone)]
pub struct Rename(pub String);

impl Transformer for Rename {
    fn transform(&self, _field: &str, value: Value) -> (String, Value) {
        (self.0.clone(), value)
    }
}

/// Output the value unchanged under `field + suffix`.
#[derive(Debug, Clone)]
pub struct Suffix(pub String);

impl Transformer for Suffix {
    fn transform(&self, field: &str, value: Value) -> (String, Value) {
        (format!("{field}{}", self.0), value)
    }
}

/// Remove the field from output.
#[derive(Debug, Clone, Copy)]
pub struct Discard;

impl Transformer for Discard {
    fn transform(&self, _field: &str, _value: Value) -> (String, Value) {
        (String::new(), Value::Null)
    }
}

/// Substitute a fixed value, optionally under another key.
#[derive(Debug, Clone)]
pub struct Replace {
    pub name: Option<String>,
    pub value: Value,
}

impl Transformer for Replace {
    fn transform(&self, field: &str, _value: Value) -> (String, Value) {
        let name = self.name.clone().unwrap_or_else(|| field.to_string());
        (name, self.value.clone())
    }
}
