mod connector;
mod link;

pub use connector::*;
pub use link::*;
