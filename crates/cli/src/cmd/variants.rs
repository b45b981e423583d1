//! Implementation of the `varcfg variants` command.
//!
//! Lists the known build variants and the module directory each one builds.

use anyhow::Result;
use serde::Serialize;

use varcfg_lib::BuildVariant;

use crate::output::{OutputFormat, print_json, symbols, yes_no};

#[derive(Serialize)]
struct VariantRow {
  variant: BuildVariant,
  module_dir: &'static str,
  builds_tests: bool,
}

pub fn cmd_variants(format: OutputFormat) -> Result<()> {
  let rows: Vec<VariantRow> = BuildVariant::ALL
    .into_iter()
    .map(|variant| VariantRow {
      variant,
      module_dir: variant.module_dir().as_str(),
      builds_tests: !variant.excludes_tests(),
    })
    .collect();

  if format.is_json() {
    return print_json(&rows);
  }

  for row in &rows {
    println!(
      "  {:<8} {} {:<9} tests: {}",
      row.variant.as_str(),
      symbols::ARROW,
      row.module_dir,
      yes_no(row.builds_tests)
    );
  }

  Ok(())
}
