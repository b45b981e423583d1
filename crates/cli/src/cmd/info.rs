use varcfg_lib::platform::Platform;

use crate::output::yes_no;

pub fn cmd_info() {
  println!("System:");
  match Platform::current() {
    Some(platform) => {
      println!("Platform: {}", platform.triple());
      println!("Test builds: {}", yes_no(!platform.excludes_tests()));
    }
    _ => println!("Could not detect platform."),
  }
}
