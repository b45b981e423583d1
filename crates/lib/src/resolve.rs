//! Build configuration resolution.
//!
//! [`resolve`] turns a requested variant name, the feature flags, the target
//! platform and the source root into a [`Resolution`]: the include paths
//! every module sees, the one module directory to build, and whether the
//! test module is built alongside it.
//!
//! The flag values are reported through a [`StatusSink`] before the variant
//! is validated, so they are visible even when resolution fails.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{SOURCE_DIR, TEST_MODULE_DIR, THIRD_PARTY_DIR};
use crate::flags::FeatureFlags;
use crate::platform::Platform;
use crate::variant::{BuildVariant, ModuleDir};

/// Errors that stop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  #[error("unknown build variant '{value}': expected one of Client, Server, Pytorch, Ros2")]
  UnknownBuildVariant { value: String },
}

/// Receives the status lines emitted during resolution.
pub trait StatusSink {
  fn status(&mut self, line: &str);
}

/// Sink that logs each status line at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
  fn status(&mut self, line: &str) {
    info!("{}", line);
  }
}

impl StatusSink for Vec<String> {
  fn status(&mut self, line: &str) {
    self.push(line.to_string());
  }
}

/// Ordered set of include paths; inserting a path already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IncludePathSet(Vec<PathBuf>);

impl IncludePathSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append `path` unless it is already present. Returns whether it was added.
  pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
    let path = path.into();
    if self.0.contains(&path) {
      return false;
    }
    self.0.push(path);
    true
  }

  pub fn iter(&self) -> impl Iterator<Item = &Path> {
    self.0.iter().map(PathBuf::as_path)
  }
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
  pub variant: BuildVariant,
  pub module_dir: ModuleDir,
  pub include_paths: IncludePathSet,
  pub include_test_module: bool,
  pub flags: FeatureFlags,
  pub platform: Platform,
}

impl Resolution {
  /// Subdirectories handed to the module build step, in build order
  pub fn subdirectories(&self) -> Vec<&'static str> {
    let mut dirs = vec![self.module_dir.as_str()];
    if self.include_test_module {
      dirs.push(TEST_MODULE_DIR);
    }
    dirs
  }
}

/// Whether the test module is built for this combination of inputs.
pub fn includes_test_module(flags: &FeatureFlags, platform: &Platform, variant: BuildVariant) -> bool {
  flags.build_test && !platform.excludes_tests() && !variant.excludes_tests()
}

/// Resolve the build configuration.
///
/// Reports the three flags to `sink` first, then matches `variant` exactly
/// against the known variants. An unknown variant fails with
/// [`ResolveError::UnknownBuildVariant`] and no module is selected.
pub fn resolve<S>(
  variant: &str,
  flags: &FeatureFlags,
  platform: &Platform,
  source_root: &Path,
  sink: &mut S,
) -> Result<Resolution, ResolveError>
where
  S: StatusSink + ?Sized,
{
  for line in flags.status_lines() {
    sink.status(&line);
  }

  let variant: BuildVariant = variant.parse()?;
  let module_dir = variant.module_dir();
  let include_test_module = includes_test_module(flags, platform, variant);

  let source_dir = source_root.join(SOURCE_DIR);
  let mut include_paths = IncludePathSet::new();
  include_paths.insert(source_dir.clone());
  include_paths.insert(source_dir.join(THIRD_PARTY_DIR));

  debug!(
    variant = %variant,
    module = %module_dir,
    tests = include_test_module,
    platform = %platform,
    "resolved build configuration"
  );

  Ok(Resolution {
    variant,
    module_dir,
    include_paths,
    include_test_module,
    flags: *flags,
    platform: *platform,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::arch::Arch;
  use crate::platform::os::Os;
  use tracing_test::traced_test;

  const LINUX: Platform = Platform {
    arch: Arch::X86_64,
    os: Os::Linux,
  };
  const WINDOWS: Platform = Platform {
    arch: Arch::X86_64,
    os: Os::Windows,
  };

  fn resolve_quiet(variant: &str, flags: &FeatureFlags, platform: &Platform) -> Result<Resolution, ResolveError> {
    resolve(variant, flags, platform, Path::new("/work/lib"), &mut Vec::<String>::new())
  }

  fn with_test(build_test: bool) -> FeatureFlags {
    FeatureFlags {
      build_test,
      ..FeatureFlags::default()
    }
  }

  #[test]
  fn server_includes_tests_on_linux() {
    let resolution = resolve_quiet("Server", &with_test(true), &LINUX).unwrap();
    assert_eq!(resolution.module_dir.as_str(), "server");
    assert!(resolution.include_test_module);
    assert_eq!(resolution.subdirectories(), vec!["server", "test"]);
  }

  #[test]
  fn pytorch_never_includes_tests() {
    let resolution = resolve_quiet("Pytorch", &with_test(true), &LINUX).unwrap();
    assert_eq!(resolution.module_dir.as_str(), "pytorch");
    assert!(!resolution.include_test_module);
    assert_eq!(resolution.subdirectories(), vec!["pytorch"]);
  }

  #[test]
  fn ros2_builds_fast_dds() {
    let resolution = resolve_quiet("Ros2", &FeatureFlags::default(), &LINUX).unwrap();
    assert_eq!(resolution.module_dir, ModuleDir::FastDds);
  }

  #[test]
  fn unknown_variant_is_fatal() {
    for value in ["Unknown", "Foo", "", "client"] {
      let err = resolve_quiet(value, &FeatureFlags::default(), &LINUX).unwrap_err();
      assert_eq!(err, ResolveError::UnknownBuildVariant { value: value.to_string() });
    }
  }

  #[test]
  fn error_message_names_the_value() {
    let err = resolve_quiet("Foo", &FeatureFlags::default(), &LINUX).unwrap_err();
    assert!(err.to_string().contains("'Foo'"));
  }

  #[test]
  fn include_paths_are_fixed() {
    let root = Path::new("/work/lib");
    let expected = vec![
      root.join("source"),
      root.join("source").join("third-party"),
    ];

    for variant in BuildVariant::ALL {
      for build_test in [true, false] {
        let flags = FeatureFlags {
          build_debug: !build_test,
          build_release: build_test,
          build_test,
        };
        let resolution = resolve_quiet(variant.as_str(), &flags, &WINDOWS).unwrap();
        let paths: Vec<PathBuf> = resolution.include_paths.iter().map(Path::to_path_buf).collect();
        assert_eq!(paths, expected);
      }
    }
  }

  #[test]
  fn test_inclusion_truth_table() {
    for build_test in [true, false] {
      for platform in [LINUX, WINDOWS] {
        for variant in BuildVariant::ALL {
          let expected = build_test
            && platform.os != Os::Windows
            && !matches!(variant, BuildVariant::Pytorch | BuildVariant::Ros2);
          let resolution = resolve_quiet(variant.as_str(), &with_test(build_test), &platform).unwrap();
          assert_eq!(
            resolution.include_test_module, expected,
            "build_test={build_test} platform={platform} variant={variant}"
          );
        }
      }
    }
  }

  #[test]
  fn resolution_is_idempotent() {
    let flags = with_test(false);
    let first = resolve_quiet("Client", &flags, &LINUX).unwrap();
    let second = resolve_quiet("Client", &flags, &LINUX).unwrap();
    assert_eq!(first, second);
    assert_eq!(
      serde_json::to_string(&first).unwrap(),
      serde_json::to_string(&second).unwrap()
    );
  }

  #[test]
  fn flags_are_reported_before_validation() {
    let mut lines: Vec<String> = Vec::new();
    let flags = FeatureFlags {
      build_debug: false,
      ..FeatureFlags::default()
    };
    let result = resolve("Nope", &flags, &LINUX, Path::new("."), &mut lines);

    assert!(result.is_err());
    assert_eq!(lines, vec!["BuildDebug: OFF", "BuildRelease: ON", "BuildTest: ON"]);
  }

  #[test]
  #[traced_test]
  fn log_sink_reports_flags_on_failure() {
    let result = resolve("Unknown", &FeatureFlags::default(), &LINUX, Path::new("."), &mut LogSink);

    assert!(result.is_err());
    assert!(logs_contain("BuildDebug: ON"));
    assert!(logs_contain("BuildRelease: ON"));
    assert!(logs_contain("BuildTest: ON"));
  }

  #[test]
  fn include_path_set_skips_duplicates() {
    let mut set = IncludePathSet::new();
    assert!(set.insert("/a"));
    assert!(set.insert("/b"));
    assert!(!set.insert("/a"));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![Path::new("/a"), Path::new("/b")]);
  }

  #[test]
  fn resolution_serializes_for_the_build_step() {
    let resolution = resolve_quiet("Ros2", &FeatureFlags::default(), &LINUX).unwrap();
    let json = serde_json::to_value(&resolution).unwrap();
    assert_eq!(json["variant"], "Ros2");
    assert_eq!(json["module_dir"], "fast_dds");
    assert_eq!(json["include_test_module"], false);
    assert_eq!(json["platform"]["os"], "linux");
    assert_eq!(json["include_paths"].as_array().unwrap().len(), 2);
  }
}
