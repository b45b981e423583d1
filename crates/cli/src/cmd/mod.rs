mod info;
mod resolve;
mod variants;

pub use info::cmd_info;
pub use resolve::{ResolveArgs, cmd_resolve};
pub use variants::cmd_variants;
