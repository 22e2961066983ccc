use serde_json::Value;
use structfield::transformer::{Discard, Rename, Suffix};
use structfield::{Schema, Transformer, Transformers};

use crate::config::{Rule, RuleAction};
use crate::domain::User;

/// Replaces the value with a pre-rendered URL.
struct UrlTransformer {
    url: String,
    to: Option<String>,
}

impl Transformer for UrlTransformer {
    fn transform(&self, field: &str, _value: Value) -> (String, Value) {
        let key = self.to.clone().unwrap_or_else(|| format!("{field}_url"));
        (key, Value::String(self.url.clone()))
    }
}

/// Substitute `{base_url}`, `{id}` and `{field}` in a URL template.
pub fn render(template: &str, base_url: &str, id: &str, field: &str) -> String {
    template
        .replace("{base_url}", base_url.trim_end_matches('/'))
        .replace("{id}", id)
        .replace("{field}", field)
}

/// Transformer table for one user. Url rules depend on the user's id.
pub fn transformers(rules: &[Rule], base_url: &str, user: &User) -> Transformers {
    let mut table = Transformers::new();
    for rule in rules {
        let field = rule.field.as_str();
        match &rule.action {
            RuleAction::Rename { to } => table.insert(field, Rename(to.clone())),
            RuleAction::Suffix { suffix } => table.insert(field, Suffix(suffix.clone())),
            RuleAction::Drop => table.insert(field, Discard),
            RuleAction::Url { template, to } => table.insert(
                field,
                UrlTransformer {
                    url: render(template, base_url, &user.id, field),
                    to: to.clone(),
                },
            ),
        }
    }
    table
}

/// Warn about rules that can never fire for `schema`.
///
/// Returns the number of such rules.
pub fn check(rules: &[Rule], schema: &Schema) -> usize {
    let mut unknown = 0;
    for rule in rules {
        if schema.field(&rule.field).is_none() {
            let known: Vec<_> = schema.names().collect();
            tracing::warn!(
                record = schema.record,
                field = %rule.field,
                known = %known.join(" "),
                "rule for unknown or excluded field, ignored"
            );
            unknown += 1;
        }
    }
    unknown
}
