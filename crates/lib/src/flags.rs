//! Boolean build options.
//!
//! Options arrive as raw `NAME=VALUE` definitions and accept the usual
//! build-system spellings for booleans (`ON`/`OFF`, `TRUE`/`FALSE`, ...).
//! Any option that is not defined keeps its default of enabled.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::consts::keys;

/// Errors that can occur while reading feature flags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
  #[error("invalid value '{value}' for {name}: expected ON/OFF, TRUE/FALSE, YES/NO or 1/0")]
  InvalidValue { name: String, value: String },
}

/// The three recognized build options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureFlags {
  pub build_debug: bool,
  pub build_release: bool,
  pub build_test: bool,
}

impl Default for FeatureFlags {
  fn default() -> Self {
    Self {
      build_debug: true,
      build_release: true,
      build_test: true,
    }
  }
}

impl FeatureFlags {
  /// Build flags from raw definitions, starting from the defaults.
  ///
  /// The settings that are not flags (`BuildType`, `Version`) are skipped.
  /// Unrecognized names are logged and ignored.
  pub fn from_definitions<'a, I>(definitions: I) -> Result<Self, FlagError>
  where
    I: IntoIterator<Item = (&'a str, &'a str)>,
  {
    let mut flags = Self::default();

    for (name, value) in definitions {
      let slot = match name {
        keys::BUILD_DEBUG => &mut flags.build_debug,
        keys::BUILD_RELEASE => &mut flags.build_release,
        keys::BUILD_TEST => &mut flags.build_test,
        keys::BUILD_TYPE | keys::VERSION => continue,
        _ => {
          warn!(name, "ignoring unknown build option");
          continue;
        }
      };

      *slot = parse_bool(value).ok_or_else(|| FlagError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
      })?;
      debug!(name, value = *slot, "build option set");
    }

    Ok(flags)
  }

  /// Status lines reporting each flag, in declaration order
  pub fn status_lines(&self) -> [String; 3] {
    [
      format!("{}: {}", keys::BUILD_DEBUG, on_off(self.build_debug)),
      format!("{}: {}", keys::BUILD_RELEASE, on_off(self.build_release)),
      format!("{}: {}", keys::BUILD_TEST, on_off(self.build_test)),
    ]
  }
}

/// Parse a boolean option value, case-insensitively.
pub fn parse_bool(value: &str) -> Option<bool> {
  match value.trim().to_ascii_uppercase().as_str() {
    "ON" | "TRUE" | "YES" | "Y" | "1" => Some(true),
    "OFF" | "FALSE" | "NO" | "N" | "0" => Some(false),
    _ => None,
  }
}

fn on_off(value: bool) -> &'static str {
  if value { "ON" } else { "OFF" }
}
