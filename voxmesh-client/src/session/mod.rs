mod relay_link;
mod session;

pub use relay_link::*;
pub use session::*;
