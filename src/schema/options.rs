//! CLI option metadata for the delegate's argument parser.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{SchemaError, SchemaResult};

/// How a repeated occurrence of the flag is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionAction {
    /// Single value, last occurrence wins.
    #[default]
    Store,
    /// Boolean flag, takes no value.
    StoreTrue,
    /// Repeatable KEY=VALUE pairs collected in order.
    Append,
}

/// Key accepted by an append-style option (an override target).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubOption {
    pub key: String,
    #[serde(default)]
    pub help: String,
}

/// One record of the delegate's option table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Unique destination key the parsed value lands under.
    pub dest: String,
    /// Unique command-line flag.
    pub flag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_yaml::Value>,
    #[serde(default)]
    pub action: OptionAction,
    /// Valid KEY targets of an append-style option.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SubOption>,
    /// User-facing help text.
    pub help: String,
}

impl OptionSpec {
    pub fn is_append(&self) -> bool {
        self.action == OptionAction::Append
    }
}

/// Destination keys and flags must be unique across the table; sub-option
/// keys must be unique within their record.
pub fn validate_unique(options: &[OptionSpec]) -> SchemaResult<()> {
    let mut dests = HashSet::new();
    let mut flags = HashSet::new();

    for opt in options {
        if !dests.insert(opt.dest.as_str()) {
            return Err(SchemaError::DuplicateDest(opt.dest.clone()));
        }
        if !flags.insert(opt.flag.as_str()) {
            return Err(SchemaError::DuplicateFlag(opt.flag.clone()));
        }

        let mut keys = HashSet::new();
        for sub in &opt.options {
            if !keys.insert(sub.key.as_str()) {
                return Err(SchemaError::DuplicateSubKey {
                    dest: opt.dest.clone(),
                    key: sub.key.clone(),
                });
            }
        }
    }
    Ok(())
}
