/// Prefix for environment variable settings (`VARCFG_BUILDTYPE`, ...)
pub const ENV_PREFIX: &str = "VARCFG";

/// Settings file looked up in the source root unless disabled
pub const SETTINGS_FILE: &str = "varcfg.toml";

/// Directory under the source root holding the library sources
pub const SOURCE_DIR: &str = "source";

/// Directory under [`SOURCE_DIR`] holding vendored dependencies
pub const THIRD_PARTY_DIR: &str = "third-party";

/// Module directory of the test suite
pub const TEST_MODULE_DIR: &str = "test";

/// Version descriptor template, relative to [`SOURCE_DIR`]
pub const VERSION_TEMPLATE: &str = "carla/Version.h.in";

/// Generated version descriptor, relative to [`SOURCE_DIR`]
pub const VERSION_HEADER: &str = "carla/Version.h";

/// Token replaced with the version identifier in the template
pub const VERSION_TOKEN: &str = "@CARLA_VERSION@";

/// Setting names recognized by the resolver
pub mod keys {
  pub const BUILD_TYPE: &str = "BuildType";
  pub const BUILD_DEBUG: &str = "BuildDebug";
  pub const BUILD_RELEASE: &str = "BuildRelease";
  pub const BUILD_TEST: &str = "BuildTest";
  pub const VERSION: &str = "Version";
}
