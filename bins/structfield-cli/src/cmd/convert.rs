use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use structfield::Record;

use crate::config::Effective;
use crate::domain::User;
use crate::error::CliError;
use crate::rules;

pub fn run(eff: &Effective) -> Result<(), CliError> {
    rules::check(&eff.rules, User::default().schema());

    let input: Box<dyn Read> = match &eff.input {
        Some(path) => Box::new(BufReader::new(File::open(path).map_err(|e| {
            CliError::Config(format!("cannot open input {}: {e}", path.display()))
        })?)),
        None => Box::new(io::stdin().lock()),
    };
    let mut output = BufWriter::new(io::stdout().lock());

    let count = convert(input, &mut output, eff)?;
    output.flush()?;

    tracing::info!(records = count, rules = eff.rules.len(), "converted");
    Ok(())
}

/// Read users (one object, an array, or a stream of either) and write
/// one transformed object per line.
pub fn convert<R: Read, W: Write>(input: R, mut output: W, eff: &Effective) -> Result<usize, CliError> {
    let mut count = 0;
    for value in serde_json::Deserializer::from_reader(input).into_iter::<serde_json::Value>() {
        let users: Vec<User> = match value? {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<_, _>>()?,
            other => vec![serde_json::from_value(other)?],
        };

        for user in &users {
            let transformers = rules::transformers(&eff.rules, &eff.base_url, user);
            let fields = structfield::transform(user, &transformers)
                .map_err(|e| e.with_context(format!("user {}", user.id)))?;

            if eff.pretty {
                serde_json::to_writer_pretty(&mut output, &fields)?;
            } else {
                serde_json::to_writer(&mut output, &fields)?;
            }
            output.write_all(b"\n")?;
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::config::{Rule, RuleAction};

    fn eff(rules: Vec<Rule>) -> Effective {
        Effective {
            input: None,
            base_url: "https://some.api.com".into(),
            pretty: false,
            rules,
        }
    }

    fn lines(out: &[u8]) -> Vec<Value> {
        std::str::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    const USERS: &str = r#"
        {"id": "4fa654a", "name": "Lelouch", "age": 22, "password_hash": "x",
         "friends": [{"id": "65de67a", "name": "Ringo", "age": 25}]}
        [{"id": "942ab70", "name": "Vivi"}]
    "#;

    #[test]
    fn replaces_friends_with_url() {
        let rules = vec![Rule {
            field: "friends".into(),
            action: RuleAction::Url { template: "{base_url}/users/{id}/friends".into(), to: None },
        }];
        let mut out = Vec::new();

        let count = convert(USERS.as_bytes(), &mut out, &eff(rules)).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            lines(&out),
            vec![
                json!({
                    "id": "4fa654a",
                    "name": "Lelouch",
                    "age": 22,
                    "friends_url": "https://some.api.com/users/4fa654a/friends"
                }),
                // Empty `friends` and `age` are omitted before the rule runs.
                json!({"id": "942ab70", "name": "Vivi"}),
            ]
        );
    }

    #[test]
    fn without_rules_keeps_nested_records() {
        let mut out = Vec::new();
        convert(USERS.as_bytes(), &mut out, &eff(vec![])).unwrap();

        let first = &lines(&out)[0];
        assert_eq!(first["friends"][0]["id"], json!("65de67a"));
        assert!(first.get("password_hash").is_none());
        assert!(first["friends"][0].get("password_hash").is_none());
    }

    #[test]
    fn rejects_non_object_input() {
        let mut out = Vec::new();
        let err = convert(r#""just a string""#.as_bytes(), &mut out, &eff(vec![])).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }
}
