pub mod arch;
pub mod os;

use arch::Arch;
use os::Os;
use serde::Serialize;
use std::fmt;

/// Platform being configured for (e.g., "x86_64-linux")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

impl Platform {
  /// Create a new platform identifier
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: Arch::current()?,
      os: Os::current()?,
    })
  }

  /// Platform for an explicitly chosen target OS
  ///
  /// Never fails: test exclusion depends only on the OS, so an unrecognized
  /// host CPU is recorded as [`Arch::Unknown`].
  pub fn for_os(os: Os) -> Self {
    Self {
      arch: Arch::current().unwrap_or(Arch::Unknown),
      os,
    }
  }

  /// Whether test builds are suppressed on this platform
  pub fn excludes_tests(&self) -> bool {
    self.os == Os::Windows
  }

  /// Returns the platform triple string (e.g., "x86_64-windows")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}
