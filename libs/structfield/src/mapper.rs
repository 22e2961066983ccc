use serde_json::Value;

use crate::error::Error;
use crate::record::Record;
use crate::transformer::Transformers;

/// Output of a conversion: output key → value.
pub type Fields = serde_json::Map<String, Value>;

/// Convert a record into a map of its top-level fields.
///
/// Per field, in declaration order:
/// - tagged `-` → skipped, transformers are never consulted;
/// - tagged `omitempty` with an empty value → skipped, no transformer runs;
/// - no transformer for the resolved name → value copied under that name;
/// - otherwise the transformer's `(key, value)` is stored, unless `key` is empty.
///
/// When two fields end up with the same key the later one wins.
///
/// Fails only if a field value cannot be encoded as JSON; no transformer
/// has run in that case.
pub fn transform<R: Record + ?Sized>(record: &R, transformers: &Transformers) -> Result<Fields, Error> {
    let schema = record.schema();

    // All values are encoded before the first transformer runs.
    let mut kept = Vec::with_capacity(schema.len());
    for (index, field) in schema.fields.iter().enumerate() {
        let Some(name) = field.name.as_deref() else {
            tracing::trace!(record = schema.record, field = field.ident, "excluded by tag");
            continue;
        };
        if field.omit_empty && record.field_is_empty(index) {
            tracing::trace!(record = schema.record, field = name, "empty, omitted");
            continue;
        }
        let value = record
            .field_value(index)
            .map_err(|e| Error::value(schema.record, name, e))?;
        kept.push((name, value));
    }

    let mut fields = Fields::new();
    for (name, value) in kept {
        put(&mut fields, schema.record, name, value, transformers);
    }
    Ok(fields)
}

/// Store one resolved field, running its transformer if registered.
pub(crate) fn put(fields: &mut Fields, record: &str, name: &str, value: Value, transformers: &Transformers) {
    let Some(transformer) = transformers.get(name) else {
        fields.insert(name.to_string(), value);
        return;
    };

    let (key, value) = transformer.transform(name, value);
    if key.is_empty() {
        tracing::trace!(record, field = name, "dropped by transformer");
        return;
    }
    if key != name {
        tracing::debug!(record, field = name, %key, "renamed by transformer");
    }
    fields.insert(key, value);
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, OnceLock};

    use serde_json::json;

    use super::*;
    use crate::schema::Schema;
    use crate::transformer::{transformer_fn, Discard, Suffix};

    /// Hand-written record: `key` is tagged `k,omitempty`, `secret` is `-`,
    /// `bad` cannot be encoded.
    struct Manual {
        key: String,
        secret: String,
        bad: Option<HashMap<(u8, u8), u8>>,
    }

    impl Record for Manual {
        fn schema(&self) -> &'static Schema {
            static SCHEMA: OnceLock<Schema> = OnceLock::new();
            SCHEMA.get_or_init(|| Schema::new("Manual", &[("key", "k,omitempty"), ("secret", "-"), ("bad", "")]))
        }

        fn field_is_empty(&self, index: usize) -> bool {
            match index {
                0 => self.key.is_empty(),
                _ => false,
            }
        }

        fn field_value(&self, index: usize) -> Result<Value, serde_json::Error> {
            match index {
                0 => serde_json::to_value(&self.key),
                1 => serde_json::to_value(&self.secret),
                2 => serde_json::to_value(&self.bad),
                _ => Ok(Value::Null),
            }
        }
    }

    fn manual(key: &str) -> Manual {
        Manual { key: key.into(), secret: "s".into(), bad: None }
    }

    #[test]
    fn applies_tags_and_transformers() {
        let fields = transform(&manual("v"), &Transformers::new().with("k", Suffix("_x".into()))).unwrap();
        assert_eq!(Value::Object(fields), json!({"k_x": "v", "bad": null}));

        let fields = transform(&manual(""), &Transformers::new().with("bad", Discard)).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn secret_is_never_visible() {
        let fields = transform(&manual("v"), &Transformers::new().with("secret", Suffix("_x".into()))).unwrap();
        assert!(!fields.keys().any(|k| k.starts_with("secret")));
    }

    #[test]
    fn encoding_failure_names_the_field() {
        let mut record = manual("v");
        record.bad = Some(HashMap::from([((1, 2), 3)]));

        let err = transform(&record, &Transformers::new()).unwrap_err();
        assert!(err.to_string().starts_with("Manual.bad: "), "{err}");
        assert!(err.with_context("user 42").to_string().starts_with("user 42: Manual.bad: "));
    }

    #[test]
    fn encoding_failure_runs_no_transformer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let transformers = Transformers::new().with(
            "k",
            transformer_fn(move |field, value| {
                counter.fetch_add(1, Ordering::SeqCst);
                (field.to_string(), value)
            }),
        );
        let mut record = manual("v");
        record.bad = Some(HashMap::from([((1, 2), 3)]));

        assert!(transform(&record, &transformers).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        record.bad = None;
        assert!(transform(&record, &transformers).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
