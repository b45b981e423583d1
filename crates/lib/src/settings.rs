//! Layered build settings.
//!
//! Settings are read, in increasing precedence, from:
//! - `varcfg.toml` in the source root (unless disabled)
//! - explicit settings files
//! - `VARCFG_<NAME>` environment variables
//! - `NAME=VALUE` definitions given on the command line
//! - an explicit variant argument
//!
//! Names are matched case-insensitively against the recognized settings so
//! that `VARCFG_BUILDTEST` and `BuildTest` address the same option. Names
//! that match nothing are passed through unchanged.

use std::collections::BTreeMap;
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File, Source};
use thiserror::Error;
use tracing::{debug, warn};

use crate::consts::{ENV_PREFIX, SETTINGS_FILE, keys};
use crate::flags::{FeatureFlags, FlagError};

const RECOGNIZED: [&str; 5] = [
  keys::BUILD_TYPE,
  keys::BUILD_DEBUG,
  keys::BUILD_RELEASE,
  keys::BUILD_TEST,
  keys::VERSION,
];

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
  #[error("failed to load settings: {0}")]
  Config(#[from] ConfigError),

  #[error("invalid definition '{0}': expected NAME=VALUE")]
  InvalidDefinition(String),

  #[error("no build variant given: pass --variant, -D BuildType=<variant> or set VARCFG_BUILDTYPE")]
  MissingVariant,
}

/// Where to look for settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsOptions {
  /// Source root searched for the default settings file
  pub source_root: PathBuf,
  /// Additional settings files, each of which must exist
  pub config_files: Vec<PathBuf>,
  /// Skip the default settings file
  pub no_config: bool,
  /// Command-line `NAME=VALUE` definitions, later ones win
  pub definitions: Vec<(String, String)>,
  /// Variant given directly on the command line
  pub variant: Option<String>,
}

/// Settings after all layers are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  /// Requested build variant, not yet validated
  pub variant: String,
  /// Version identifier, if one was given and is non-empty
  pub version: Option<String>,
  values: BTreeMap<String, String>,
}

impl Settings {
  /// Read the feature flags out of the merged settings
  pub fn flags(&self) -> Result<FeatureFlags, FlagError> {
    FeatureFlags::from_definitions(self.values.iter().map(|(k, v)| (k.as_str(), v.as_str())))
  }
}

/// Parse a `NAME=VALUE` definition.
pub fn parse_definition(s: &str) -> Result<(String, String), SettingsError> {
  match s.split_once('=') {
    Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.to_string())),
    _ => Err(SettingsError::InvalidDefinition(s.to_string())),
  }
}

/// Load and merge all settings layers.
pub fn load(options: &SettingsOptions) -> Result<Settings, SettingsError> {
  let mut values = BTreeMap::new();

  let mut files = Config::builder();
  if !options.no_config {
    let default_file = options.source_root.join(SETTINGS_FILE);
    debug!(path = %default_file.display(), "looking for settings file");
    files = files.add_source(File::from(default_file).required(false));
  }
  for path in &options.config_files {
    files = files.add_source(File::from(path.clone()).required(true));
  }
  merge_layer(&mut values, files.build()?)?;

  let env = Config::builder()
    .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(false))
    .build()?;
  merge_layer(&mut values, env)?;

  for (name, value) in &options.definitions {
    values.insert(canonical_name(name), value.clone());
  }

  if let Some(variant) = &options.variant {
    values.insert(keys::BUILD_TYPE.to_string(), variant.clone());
  }

  let variant = values.get(keys::BUILD_TYPE).cloned().ok_or(SettingsError::MissingVariant)?;
  let version = values.get(keys::VERSION).filter(|v| !v.is_empty()).cloned();

  Ok(Settings {
    variant,
    version,
    values,
  })
}

fn merge_layer(values: &mut BTreeMap<String, String>, layer: Config) -> Result<(), SettingsError> {
  for (name, value) in layer.collect()? {
    match value.into_string() {
      Ok(value) => {
        values.insert(canonical_name(&name), value);
      }
      Err(_) => warn!(name = %name, "ignoring non-scalar setting"),
    }
  }
  Ok(())
}

fn canonical_name(name: &str) -> String {
  RECOGNIZED
    .iter()
    .find(|known| known.eq_ignore_ascii_case(name))
    .map_or_else(|| name.to_string(), |known| known.to_string())
}
