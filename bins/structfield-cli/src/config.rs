use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use crate::error::CliError;

const DEFAULT_BASE_URL: &str = "http://localhost";

// ═══════════════════════════════════════════════════════════════
//  CLI args
// ═══════════════════════════════════════════════════════════════

#[derive(Parser)]
#[command(name = "structfield", about = "Convert JSON user records into transformed field maps")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert records read from a file or stdin, one JSON object per output line
    Convert(ConvertArgs),
    /// Print the field list of the user record
    Schema,
}

#[derive(Args, Clone, Debug)]
pub struct ConvertArgs {
    /// Path to the rules file (TOML)
    #[arg(long, default_value = "structfield.toml", env = "STRUCTFIELD_CONFIG")]
    pub config: PathBuf,

    /// Input file with a JSON object or array of objects. Stdin when omitted
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Base URL substituted for `{base_url}` in url rules
    #[arg(long)]
    pub base_url: Option<String>,

    /// Pretty-print output objects
    #[arg(long)]
    pub pretty: bool,
}

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub base_url: Option<String>,
    pub pretty: Option<bool>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// One transformer, registered under the resolved field name `field`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rule {
    pub field: String,
    #[serde(flatten)]
    pub action: RuleAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RuleAction {
    /// Same value under `to`.
    Rename { to: String },
    /// Same value under `field + suffix`.
    Suffix { suffix: String },
    /// Field removed.
    Drop,
    /// Value replaced by a URL rendered from `template`; key `to`,
    /// `<field>_url` by default.
    Url { template: String, to: Option<String> },
}

pub fn parse_config(content: &str) -> Result<Config, CliError> {
    toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))
}

pub fn load_config(path: &Path) -> Result<Config, CliError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("cannot read config {}: {e}", path.display())))?;
    parse_config(&content).map_err(|e| CliError::Config(format!("bad config {}: {e}", path.display())))
}

// ═══════════════════════════════════════════════════════════════
//  Effective — merged config
// ═══════════════════════════════════════════════════════════════

/// Final configuration after merging: defaults < config file < env/CLI.
#[derive(Debug)]
pub struct Effective {
    pub input: Option<PathBuf>,
    pub base_url: String,
    pub pretty: bool,
    pub rules: Vec<Rule>,
}

impl Effective {
    pub fn new(args: &ConvertArgs) -> Result<Self, CliError> {
        // A missing config file means "no rules"; an unreadable one is an error.
        let cfg = if args.config.exists() {
            load_config(&args.config)?
        } else {
            tracing::debug!(config = %args.config.display(), "config not found, using defaults");
            Config::default()
        };
        Ok(Self::merge(args, cfg))
    }

    fn merge(args: &ConvertArgs, cfg: Config) -> Self {
        Self {
            input: args.input.clone(),
            base_url: args
                .base_url
                .clone()
                .or(cfg.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            pretty: args.pretty || cfg.pretty.unwrap_or(false),
            rules: cfg.rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ConvertArgs {
        ConvertArgs {
            config: PathBuf::from("does-not-exist.toml"),
            input: None,
            base_url: None,
            pretty: false,
        }
    }

    #[test]
    fn parses_rules() {
        let cfg = parse_config(
            r#"
            base_url = "https://some.api.com"

            [[rules]]
            field = "friends"
            action = "url"
            template = "{base_url}/users/{id}/friends"

            [[rules]]
            field = "email"
            action = "drop"

            [[rules]]
            field = "name"
            action = "rename"
            to = "display_name"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.base_url.as_deref(), Some("https://some.api.com"));
        assert_eq!(
            cfg.rules,
            vec![
                Rule {
                    field: "friends".into(),
                    action: RuleAction::Url { template: "{base_url}/users/{id}/friends".into(), to: None },
                },
                Rule { field: "email".into(), action: RuleAction::Drop },
                Rule { field: "name".into(), action: RuleAction::Rename { to: "display_name".into() } },
            ]
        );
    }

    #[test]
    fn rejects_unknown_action() {
        let err = parse_config("[[rules]]\nfield = \"a\"\naction = \"explode\"\n").unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn missing_config_uses_defaults() {
        let eff = Effective::new(&args()).unwrap();
        assert_eq!(eff.base_url, DEFAULT_BASE_URL);
        assert!(!eff.pretty);
        assert!(eff.rules.is_empty());
    }

    #[test]
    fn cli_overrides_config() {
        let cfg = Config { base_url: Some("https://cfg".into()), pretty: Some(true), rules: vec![] };
        let mut args = args();
        args.base_url = Some("https://cli".into());

        let eff = Effective::merge(&args, cfg);
        assert_eq!(eff.base_url, "https://cli");
        assert!(eff.pretty);
    }
}
