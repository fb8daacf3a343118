//! Typed model of the delegate's declarative configuration
//! (`config/config.yml`): the named path tree, input fields, database
//! build targets, and the CLI option table the delegate's argument parser
//! is generated from.
//!
//! The launcher never reads this document at runtime; the crate ships it,
//! models it, and enforces its invariants in tests.

pub mod options;
pub mod paths;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use options::{OptionAction, OptionSpec, SubOption};
pub use paths::{PathBase, PathEntry, PathSchema};

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to read schema file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse schema: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("duplicate option destination: {0}")]
    DuplicateDest(String),

    #[error("duplicate option flag: {0}")]
    DuplicateFlag(String),

    #[error("duplicate sub-option key `{key}` under `{dest}`")]
    DuplicateSubKey { dest: String, key: String },

    #[error("path `{name}` resolves outside the declared root: {resolved}")]
    PathEscapesRoot { name: String, resolved: String },
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// The full declarative document consumed by the delegate program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub paths: PathSchema,
    /// Delegate input fields with their defaults. Values keep their YAML
    /// types (strings, bools, numbers, lists).
    #[serde(default)]
    pub inputs: BTreeMap<String, serde_yaml::Value>,
    /// Named database build targets with user-facing help.
    #[serde(default)]
    pub build_db_options: BTreeMap<String, String>,
    /// Ordered CLI option records for the delegate's argument parser.
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

impl Schema {
    /// Parse and validate a schema document.
    pub fn parse(content: &str) -> SchemaResult<Self> {
        let schema: Self = serde_yaml::from_str(content)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load and validate a schema file.
    pub fn load(path: &Path) -> SchemaResult<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Enforce the document invariants: unique destination keys and
    /// flags, unique sub-option keys per record, and no path escaping
    /// its root.
    pub fn validate(&self) -> SchemaResult<()> {
        self.paths.validate()?;
        options::validate_unique(&self.options)?;
        Ok(())
    }

    /// Look up an option record by destination key.
    pub fn option(&self, dest: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|opt| opt.dest == dest)
    }
}
