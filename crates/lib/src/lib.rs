//! varcfg-lib: build configuration resolution for the native library build
//!
//! This crate decides what a build invocation compiles:
//! - `BuildVariant`: the closed set of variants and the module each selects
//! - `FeatureFlags`: the debug/release/test options, all enabled by default
//! - `Platform`: the target platform and whether it suppresses test builds
//! - `resolve`: turns the above into a `Resolution` or a fatal error
//! - `settings` and `version`: the settings layers and the optional version
//!   descriptor step that feed the resolver

pub mod consts;
pub mod flags;
pub mod platform;
pub mod resolve;
pub mod settings;
pub mod variant;
pub mod version;

pub use flags::FeatureFlags;
pub use platform::Platform;
pub use resolve::{LogSink, Resolution, ResolveError, StatusSink, resolve};
pub use variant::{BuildVariant, ModuleDir};
