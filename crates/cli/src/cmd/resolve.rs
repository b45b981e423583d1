//! Implementation of the `varcfg resolve` command.
//!
//! Loads the settings layers, resolves the build configuration and reports
//! the selected module, the test decision and the include paths. When a
//! version identifier is configured the version descriptor is generated
//! after a successful resolution.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use varcfg_lib::platform::os::Os;
use varcfg_lib::settings::{self, SettingsOptions, parse_definition};
use varcfg_lib::version::{self, VersionOutcome};
use varcfg_lib::{LogSink, Platform, Resolution, StatusSink, resolve};

use crate::output::{OutputFormat, print_json, print_stat, print_status, print_success, yes_no};

#[derive(Debug, Args)]
pub struct ResolveArgs {
  /// Build variant to configure (Client, Server, Pytorch, Ros2)
  #[arg(short = 't', long)]
  variant: Option<String>,

  /// Define a setting, e.g. -D BuildTest=OFF
  #[arg(short = 'D', value_name = "NAME=VALUE", value_parser = parse_definition)]
  define: Vec<(String, String)>,

  /// Root of the library source tree
  #[arg(long, default_value = ".")]
  source_root: PathBuf,

  /// Configure for this OS instead of the detected one (linux, darwin, windows)
  #[arg(long)]
  platform: Option<Os>,

  /// Additional settings file (may be repeated)
  #[arg(long = "config", value_name = "FILE")]
  config_files: Vec<PathBuf>,

  /// Do not read varcfg.toml from the source root
  #[arg(long)]
  no_config: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t)]
  output: OutputFormat,

  /// Also write the resolution as JSON to this file
  #[arg(long, value_name = "FILE")]
  write: Option<PathBuf>,
}

/// Plain status lines; `--verbose` logs them through tracing instead.
struct TerminalSink;

impl StatusSink for TerminalSink {
  fn status(&mut self, line: &str) {
    print_status(line);
  }
}

pub fn cmd_resolve(args: ResolveArgs, verbose: bool) -> Result<()> {
  let source_root = dunce::canonicalize(&args.source_root)
    .with_context(|| format!("Source root not found: {}", args.source_root.display()))?;

  let options = SettingsOptions {
    source_root: source_root.clone(),
    config_files: args.config_files,
    no_config: args.no_config,
    definitions: args.define,
    variant: args.variant,
  };
  let settings = settings::load(&options)?;
  let flags = settings.flags()?;

  let platform = match args.platform {
    Some(os) => Platform::for_os(os),
    None => Platform::current().context("Unsupported host platform; pass --platform")?,
  };

  let mut sink: Box<dyn StatusSink> = if verbose { Box::new(LogSink) } else { Box::new(TerminalSink) };
  let resolution = resolve(&settings.variant, &flags, &platform, &source_root, sink.as_mut())?;

  let version_header = match &settings.version {
    Some(v) => Some(version::configure(&source_root, v)?),
    None => None,
  };

  if let Some(path) = &args.write {
    let json = serde_json::to_string_pretty(&resolution).context("Failed to serialize resolution")?;
    fs::write(path, json).with_context(|| format!("Failed to write resolution: {}", path.display()))?;
  }

  if args.output.is_json() {
    print_json(&resolution)?;
  } else {
    print_resolution(&resolution, settings.version.as_deref(), version_header.as_ref());
  }

  Ok(())
}

fn print_resolution(resolution: &Resolution, version: Option<&str>, header: Option<&VersionOutcome>) {
  print_success(&format!(
    "Resolved {} build for {}",
    resolution.variant, resolution.platform
  ));
  print_stat("Module", resolution.module_dir.as_str());
  print_stat("Tests", yes_no(resolution.include_test_module));
  print_stat("Subdirectories", &resolution.subdirectories().join(" "));
  for path in resolution.include_paths.iter() {
    print_stat("Include", &path.display().to_string());
  }

  if let (Some(version), Some(header)) = (version, header) {
    let state = match header {
      VersionOutcome::Written(path) => format!("{} (wrote {})", version, path.display()),
      VersionOutcome::Unchanged(path) => format!("{} ({} up to date)", version, path.display()),
    };
    print_stat("Version", &state);
  }
}
