//! Version descriptor templating.
//!
//! When a version identifier is configured, `Version.h.in` under the source
//! tree is copied to `Version.h` with every `@CARLA_VERSION@` token replaced.
//! The output is left untouched when its content would not change, so
//! downstream builds do not see a spurious modification.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{SOURCE_DIR, VERSION_HEADER, VERSION_TEMPLATE, VERSION_TOKEN};

/// Errors that can occur while configuring the version descriptor.
#[derive(Debug, Error)]
pub enum VersionError {
  #[error("version template not found: {}", path.display())]
  TemplateMissing { path: PathBuf },

  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

/// What happened to the generated descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOutcome {
  Written(PathBuf),
  Unchanged(PathBuf),
}

/// Substitute `version` into the template text.
pub fn render(template: &str, version: &str) -> String {
  template.replace(VERSION_TOKEN, version)
}

/// Configure the version descriptor under `source_root`.
pub fn configure(source_root: &Path, version: &str) -> Result<VersionOutcome, VersionError> {
  let source_dir = source_root.join(SOURCE_DIR);
  configure_file(&source_dir.join(VERSION_TEMPLATE), &source_dir.join(VERSION_HEADER), version)
}

/// Render `template` into `output`, skipping the write if nothing changed.
pub fn configure_file(template: &Path, output: &Path, version: &str) -> Result<VersionOutcome, VersionError> {
  if !template.is_file() {
    return Err(VersionError::TemplateMissing {
      path: template.to_path_buf(),
    });
  }

  let text = fs::read_to_string(template).map_err(|e| VersionError::Read {
    path: template.to_path_buf(),
    source: e,
  })?;
  let rendered = render(&text, version);

  if fs::read_to_string(output).is_ok_and(|existing| existing == rendered) {
    debug!(path = %output.display(), "version descriptor up to date");
    return Ok(VersionOutcome::Unchanged(output.to_path_buf()));
  }

  fs::write(output, rendered).map_err(|e| VersionError::Write {
    path: output.to_path_buf(),
    source: e,
  })?;
  info!(path = %output.display(), version, "wrote version descriptor");

  Ok(VersionOutcome::Written(output.to_path_buf()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  const TEMPLATE: &str = "#pragma once\n#define CARLA_VERSION \"@CARLA_VERSION@\"\n";

  fn source_root_with_template() -> TempDir {
    let temp = TempDir::new().unwrap();
    let carla = temp.path().join("source").join("carla");
    fs::create_dir_all(&carla).unwrap();
    fs::write(carla.join("Version.h.in"), TEMPLATE).unwrap();
    temp
  }

  #[test]
  fn render_replaces_every_token() {
    assert_eq!(render("@CARLA_VERSION@-@CARLA_VERSION@", "0.9.15"), "0.9.15-0.9.15");
    assert_eq!(render("no tokens", "0.9.15"), "no tokens");
  }

  #[test]
  fn writes_header_next_to_template() {
    let root = source_root_with_template();
    let header = root.path().join("source/carla/Version.h");

    let outcome = configure(root.path(), "0.9.15").unwrap();

    assert_eq!(outcome, VersionOutcome::Written(header.clone()));
    assert_eq!(
      fs::read_to_string(&header).unwrap(),
      "#pragma once\n#define CARLA_VERSION \"0.9.15\"\n"
    );
  }

  #[test]
  fn unchanged_content_is_not_rewritten() {
    let root = source_root_with_template();
    configure(root.path(), "0.9.15").unwrap();

    let outcome = configure(root.path(), "0.9.15").unwrap();
    assert!(matches!(outcome, VersionOutcome::Unchanged(_)));

    let outcome = configure(root.path(), "0.10.0").unwrap();
    assert!(matches!(outcome, VersionOutcome::Written(_)));
  }

  #[test]
  fn missing_template_is_an_error() {
    let root = TempDir::new().unwrap();
    let err = configure(root.path(), "0.9.15").unwrap_err();
    assert!(matches!(err, VersionError::TemplateMissing { .. }));
  }
}
