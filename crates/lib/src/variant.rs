//! Build variants and the module directory each one selects.
//!
//! The variant set is closed: a build is configured for exactly one of
//! [`BuildVariant::ALL`], and each variant hands exactly one
//! [`ModuleDir`] to the module build step.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::resolve::ResolveError;

/// Build variant selected by the `BuildType` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuildVariant {
  Client,
  Server,
  Pytorch,
  Ros2,
}

impl BuildVariant {
  /// All variants, in the order a requested name is matched against them.
  pub const ALL: [BuildVariant; 4] = [Self::Client, Self::Server, Self::Pytorch, Self::Ros2];

  /// Returns the exact name used to request this variant
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Client => "Client",
      Self::Server => "Server",
      Self::Pytorch => "Pytorch",
      Self::Ros2 => "Ros2",
    }
  }

  /// Returns the module directory built for this variant
  pub fn module_dir(&self) -> ModuleDir {
    match self {
      Self::Client => ModuleDir::Client,
      Self::Server => ModuleDir::Server,
      Self::Pytorch => ModuleDir::Pytorch,
      Self::Ros2 => ModuleDir::FastDds,
    }
  }

  /// Whether this variant never builds the test module
  pub fn excludes_tests(&self) -> bool {
    matches!(self, Self::Pytorch | Self::Ros2)
  }
}

impl fmt::Display for BuildVariant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for BuildVariant {
  type Err = ResolveError;

  /// Exact, case-sensitive match; the first variant in [`BuildVariant::ALL`] wins.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|variant| variant.as_str() == s)
      .ok_or_else(|| ResolveError::UnknownBuildVariant { value: s.to_string() })
  }
}

/// Module directory handed to the module build step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleDir {
  Client,
  Server,
  Pytorch,
  FastDds,
}

impl ModuleDir {
  /// Returns the directory name, relative to the source root
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Client => "client",
      Self::Server => "server",
      Self::Pytorch => "pytorch",
      Self::FastDds => "fast_dds",
    }
  }
}

impl fmt::Display for ModuleDir {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
