//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsubmit/rsubmit.toml`
//! 3. Environment variables: `RSUBMIT_*` prefix

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::LaunchError;

/// Delegate program the launcher hands control to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DelegateConfig {
    /// Program to execute
    pub program: String,
    /// Arguments placed before the pass-through list
    pub base_args: Vec<String>,
}

impl Default for DelegateConfig {
    fn default() -> Self {
        Self {
            program: "python".into(),
            base_args: vec!["-m".into(), "event_creation.submission.convenience".into()],
        }
    }
}

/// Raw delegate config for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDelegateConfig {
    pub program: Option<String>,
    pub base_args: Option<Vec<String>>,
}

/// Raw settings for intermediate parsing (fields are Option to detect
/// "not specified" during merging).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub freesurfer_home: Option<PathBuf>,
    pub r_bin_dir: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
    pub index_routes: Option<BTreeMap<String, PathBuf>>,
    pub host_prefix: Option<String>,
    pub backup: Option<bool>,
    pub check_user: Option<bool>,
    #[serde(default)]
    pub delegate: RawDelegateConfig,
}

/// Unified configuration for rsubmit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Freesurfer installation root exported as FREESURFER_HOME
    pub freesurfer_home: PathBuf,
    /// R binary directory prepended to PATH
    pub r_bin_dir: PathBuf,
    /// Version-controlled directory receiving index file copies
    pub backup_dir: PathBuf,
    /// Operator name -> index file the operator maintains
    pub index_routes: BTreeMap<String, PathBuf>,
    /// Hosts whose name starts with this prefix skip the confirmation prompt
    pub host_prefix: String,
    /// Back up the index file before delegating
    pub backup: bool,
    /// Enforce the operator identity check
    pub check_user: bool,
    /// Delegate program invocation
    pub delegate: DelegateConfig,
}

impl Default for Settings {
    fn default() -> Self {
        let mut index_routes = BTreeMap::new();
        index_routes.insert("RAM_maint".to_string(), PathBuf::from("/protocols/r1.json"));
        index_routes.insert("maint".to_string(), PathBuf::from("/protocols/ltp.json"));

        Self {
            freesurfer_home: PathBuf::from("/usr/global/freesurfer"),
            r_bin_dir: PathBuf::from("/usr/global/R/bin"),
            backup_dir: PathBuf::from("~/index_file_tracker"),
            index_routes,
            host_prefix: "node".to_string(),
            // Both guards ship disabled; --backup and --check-user enable them.
            backup: false,
            check_user: false,
            delegate: DelegateConfig::default(),
        }
    }
}

/// Get the XDG config directory for rsubmit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rsubmit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rsubmit.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, LaunchError> {
    let content = std::fs::read_to_string(path).map_err(|e| LaunchError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| LaunchError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Look up the index file maintained by `user`.
    pub fn index_route(&self, user: &str) -> Option<&PathBuf> {
        self.index_routes.get(user)
    }

    /// Merge overlay config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - `index_routes`: overlay entries are inserted over the base table
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut index_routes = self.index_routes.clone();
        if let Some(routes) = &overlay.index_routes {
            for (user, route) in routes {
                index_routes.insert(user.clone(), route.clone());
            }
        }

        Self {
            freesurfer_home: overlay
                .freesurfer_home
                .clone()
                .unwrap_or_else(|| self.freesurfer_home.clone()),
            r_bin_dir: overlay
                .r_bin_dir
                .clone()
                .unwrap_or_else(|| self.r_bin_dir.clone()),
            backup_dir: overlay
                .backup_dir
                .clone()
                .unwrap_or_else(|| self.backup_dir.clone()),
            index_routes,
            host_prefix: overlay
                .host_prefix
                .clone()
                .unwrap_or_else(|| self.host_prefix.clone()),
            backup: overlay.backup.unwrap_or(self.backup),
            check_user: overlay.check_user.unwrap_or(self.check_user),
            delegate: DelegateConfig {
                program: overlay
                    .delegate
                    .program
                    .clone()
                    .unwrap_or_else(|| self.delegate.program.clone()),
                base_args: overlay
                    .delegate
                    .base_args
                    .clone()
                    .unwrap_or_else(|| self.delegate.base_args.clone()),
            },
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    ///
    /// Handles `~`, `$VAR`, and `${VAR}` syntax.
    fn expand_paths(&mut self) {
        self.freesurfer_home = expand_path(&self.freesurfer_home);
        self.r_bin_dir = expand_path(&self.r_bin_dir);
        self.backup_dir = expand_path(&self.backup_dir);
        for route in self.index_routes.values_mut() {
            *route = expand_path(route);
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/rsubmit/rsubmit.toml`
    /// 3. Environment variables: `RSUBMIT_*` prefix
    pub fn load() -> Result<Self, LaunchError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply RSUBMIT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, LaunchError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("RSUBMIT")
                .prefix_separator("_")
                .separator("__")
                .list_separator(","),
        );

        let cfg = builder.build().map_err(config_err)?;

        if let Ok(val) = cfg.get_string("freesurfer_home") {
            settings.freesurfer_home = PathBuf::from(val);
        }
        if let Ok(val) = cfg.get_string("r_bin_dir") {
            settings.r_bin_dir = PathBuf::from(val);
        }
        if let Ok(val) = cfg.get_string("backup_dir") {
            settings.backup_dir = PathBuf::from(val);
        }
        if let Ok(val) = cfg.get_string("host_prefix") {
            settings.host_prefix = val;
        }
        if let Ok(val) = cfg.get_bool("backup") {
            settings.backup = val;
        }
        if let Ok(val) = cfg.get_bool("check_user") {
            settings.check_user = val;
        }
        if let Ok(val) = cfg.get_string("delegate.program") {
            settings.delegate.program = val;
        }
        if let Ok(val) = cfg.get::<Vec<String>>("delegate.base_args") {
            settings.delegate.base_args = val;
        }

        Ok(settings)
    }
}

fn expand_path(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    match shellexpand::full(s.as_ref()) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

fn config_err(e: ConfigError) -> LaunchError {
    LaunchError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_guards_are_disabled() {
        let settings = Settings::default();
        assert!(!settings.backup);
        assert!(!settings.check_user);
    }

    #[test]
    fn given_defaults_then_route_table_has_exactly_two_operators() {
        let settings = Settings::default();
        assert_eq!(settings.index_routes.len(), 2);
        assert_eq!(
            settings.index_route("RAM_maint"),
            Some(&PathBuf::from("/protocols/r1.json"))
        );
        assert_eq!(
            settings.index_route("maint"),
            Some(&PathBuf::from("/protocols/ltp.json"))
        );
        assert_eq!(settings.index_route("intruder"), None);
    }

    #[test]
    fn given_tilde_in_backup_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings::default();
        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let backup = settings.backup_dir.to_string_lossy();
        assert!(
            backup.starts_with(&home),
            "backup_dir should start with home dir: {}",
            backup
        );
        assert!(
            !backup.contains('~'),
            "backup_dir should not contain tilde: {}",
            backup
        );
    }

    #[test]
    fn given_overlay_with_route_when_merged_then_route_is_added() {
        let base = Settings::default();
        let overlay = RawSettings {
            index_routes: Some(
                [("nicls_maint".to_string(), PathBuf::from("/protocols/nicls.json"))]
                    .into_iter()
                    .collect(),
            ),
            host_prefix: Some("rhino".to_string()),
            ..Default::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.index_routes.len(), 3);
        assert_eq!(merged.host_prefix, "rhino");
        // Untouched scalars keep their defaults
        assert_eq!(merged.delegate.program, "python");
        assert!(!merged.backup);
    }
}
